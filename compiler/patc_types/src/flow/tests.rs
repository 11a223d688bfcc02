use pretty_assertions::assert_eq;

use super::*;

fn expr(n: u32) -> FlowValue {
    FlowValue::Expr(ExprId::new(n))
}

fn var(n: u32) -> FlowValue {
    FlowValue::Var(VarId::from_raw(n))
}

#[test]
fn and_is_union_or_is_intersection() {
    let a = FlowInfo::empty()
        .establish(expr(0), Idx::INT)
        .establish(expr(1), Idx::STRING);
    let b = FlowInfo::empty()
        .establish(expr(1), Idx::STRING)
        .establish(expr(2), Idx::LONG);

    assert_eq!(a.and(&b).len(), 3);
    assert_eq!(
        a.or(&b),
        FlowInfo::empty().establish(expr(1), Idx::STRING)
    );
}

#[test]
fn error_type_establishes_nothing() {
    assert!(FlowInfo::empty().establish(expr(0), Idx::ERROR).is_empty());
}

#[test]
fn equality_facts_are_order_normalized() {
    let ab = FlowInfo::empty().equate(expr(1), expr(2), false);
    let ba = FlowInfo::empty().equate(expr(2), expr(1), false);
    assert_eq!(ab, ba);
    assert!(FlowInfo::empty().equate(expr(3), expr(3), true).is_empty());
}

#[test]
fn known_types_follow_identity_chains() {
    let info = FlowInfo::empty()
        .equate(var(0), expr(5), true)
        .equate(expr(5), var(1), true)
        .establish(var(1), Idx::INT)
        .establish(expr(9), Idx::STRING);

    assert_eq!(info.known_types(var(0)).as_slice(), &[Idx::INT]);
    assert!(info.known_types(expr(9)).contains(&Idx::STRING));
}

#[test]
fn non_identity_equality_does_not_share_types() {
    let info = FlowInfo::empty()
        .equate(var(0), expr(5), false)
        .establish(expr(5), Idx::INT);
    assert!(info.known_types(var(0)).is_empty());
}

#[test]
fn conditional_equate_puts_inequality_on_else() {
    let flow = ConditionalFlow::equate(expr(0), expr(1), true);
    assert!(flow
        .then_info
        .contains(&Fact::equal(expr(0), expr(1), true)));
    assert!(flow.else_info.contains(&Fact::not_equal(expr(0), expr(1))));
    assert_eq!(
        ConditionalFlow::disequate(expr(0), expr(1), true),
        flow.not()
    );
}

#[test]
fn conservative_and_else() {
    let a = ConditionalFlow::new(
        FlowInfo::empty().establish(expr(0), Idx::INT),
        FlowInfo::empty().establish(expr(1), Idx::STRING),
    );
    let b = ConditionalFlow::new(
        FlowInfo::empty().establish(expr(2), Idx::INT),
        FlowInfo::empty().establish(expr(3), Idx::STRING),
    );
    let both = a.and(&b);
    assert_eq!(both.then_info.len(), 2);
    assert!(both.else_info.is_empty());
}

mod proptest_laws {
    #![allow(
        clippy::disallowed_types,
        reason = "proptest macros internally use Arc"
    )]

    use proptest::prelude::*;

    use super::super::*;
    use crate::VarId;

    fn value() -> impl Strategy<Value = FlowValue> {
        prop_oneof![
            (0u32..4).prop_map(|n| FlowValue::Expr(ExprId::new(n))),
            (0u32..3).prop_map(|n| FlowValue::Var(VarId::from_raw(n))),
        ]
    }

    fn fact() -> impl Strategy<Value = Fact> {
        prop_oneof![
            (value(), 3u32..6).prop_map(|(value, ty)| Fact::IsType {
                value,
                ty: Idx::from_raw(ty)
            }),
            (value(), value(), any::<bool>()).prop_map(|(a, b, id)| Fact::equal(a, b, id)),
            (value(), value()).prop_map(|(a, b)| Fact::not_equal(a, b)),
        ]
    }

    fn info() -> impl Strategy<Value = FlowInfo> {
        prop::collection::vec(fact(), 0..6).prop_map(FlowInfo::from_facts)
    }

    fn cond() -> impl Strategy<Value = ConditionalFlow> {
        (info(), info()).prop_map(|(t, e)| ConditionalFlow::new(t, e))
    }

    proptest! {
        #[test]
        fn not_is_an_involution(a in cond()) {
            prop_assert_eq!(a.not().not(), a);
        }

        #[test]
        fn and_or_are_idempotent(a in cond()) {
            prop_assert_eq!(a.and(&a), a.clone());
            prop_assert_eq!(a.or(&a), a);
        }

        #[test]
        fn and_then_extends_operands(a in cond(), b in cond()) {
            let both = a.and(&b);
            for f in a.then_info.facts().iter().chain(b.then_info.facts()) {
                prop_assert!(both.then_info.contains(f));
            }
        }

        #[test]
        fn and_is_commutative_and_associative(a in cond(), b in cond(), c in cond()) {
            prop_assert_eq!(a.and(&b), b.and(&a));
            prop_assert_eq!(a.and(&b).and(&c), a.and(&b.and(&c)));
        }

        #[test]
        fn de_morgan(a in cond(), b in cond()) {
            prop_assert_eq!(a.and(&b).not(), a.not().or(&b.not()));
        }

        #[test]
        fn facts_stay_sorted_and_unique(a in info(), b in info()) {
            let merged = a.and(&b);
            prop_assert!(merged.facts().windows(2).all(|w| w[0] < w[1]));
        }
    }
}
