use pretty_assertions::assert_eq;

use patc_ir::{PatternArena, RawConstraint, RawEntry, RawPattern, TypeCall};
use patc_types::{Fact, FlowValue};

use super::*;
use crate::test_helpers::{build, sp, subject, MockServices, SUBJECT_EXPR};

fn subject_value() -> FlowValue {
    FlowValue::Expr(SUBJECT_EXPR)
}

fn is_check(subject: Subject, target: IsTarget, negated: bool, site: MatchSite) -> IsCheck {
    IsCheck {
        subject,
        subject_flow: FlowInfo::empty(),
        target,
        negated,
        site,
        span: sp(0, 20),
    }
}

/// `Point(val a)` over `class Point(Int)`.
fn point_pattern(services: &mut MockServices, arena: &mut PatternArena) -> (Idx, PatternNodeId) {
    let point = services.class("Point");
    services.components(point, &[Idx::INT]);
    let a = services.name("a");
    let raw = RawPattern::new(RawEntry::constraint(
        RawConstraint::tuple(
            Some(TypeCall::new(services.name("Point"), sp(10, 15))),
            vec![RawEntry::declare(a, sp(16, 21))],
            sp(10, 22),
        ),
        sp(10, 22),
    ));
    (point, patc_ir::normalize(&raw, arena))
}

#[test]
fn definitions_allowed_only_in_unambiguous_positions() {
    assert!(MatchSite::IfCondition.allows_definition(false));
    assert!(MatchSite::WhileCondition.allows_definition(false));
    assert!(MatchSite::WhenEntry { conditions: 1 }.allows_definition(false));
    assert!(!MatchSite::WhenEntry { conditions: 2 }.allows_definition(false));
    assert!(!MatchSite::Other.allows_definition(false));
    assert!(!MatchSite::IfCondition.allows_definition(true));
}

// ── is / is like ──

#[test]
fn is_like_own_type_is_useless_and_tells_nothing() {
    let services = MockServices::new();
    let int = services.type_ref("Int", sp(10, 13));
    let (arena, root) = build(&RawPattern::new(RawEntry::constraint(
        RawConstraint::Type(int),
        sp(10, 13),
    )));
    let mut resolver = PatternResolver::new(&arena, &services);

    let check = is_check(subject(Idx::INT), IsTarget::Pattern(root), false, MatchSite::IfCondition);
    let outcome = resolver.analyse_is_match(&check, &FlowInfo::empty(), &PatternScope::new());

    assert_eq!(
        resolver.problems(),
        &[
            PatternProblem::UselessTypeCheck {
                span: sp(10, 13),
                always: true,
            },
            PatternProblem::UselessIsCheck {
                span: sp(0, 20),
                always: true,
            },
        ]
    );
    assert_eq!(outcome.flow.then_info, outcome.flow.else_info);
    assert!(outcome.flow.is_empty());
}

#[test]
fn negated_is_like_swaps_edges_and_forbids_bindings() {
    let mut services = MockServices::new();
    let mut arena = PatternArena::new();
    let (point, root) = point_pattern(&mut services, &mut arena);
    let mut resolver = PatternResolver::new(&arena, &services);

    let check = is_check(subject(Idx::ANY), IsTarget::Pattern(root), true, MatchSite::IfCondition);
    let outcome = resolver.analyse_is_match(&check, &FlowInfo::empty(), &PatternScope::new());

    assert_eq!(
        resolver.problems(),
        &[PatternProblem::BindingNotAllowed {
            name: services.name("a"),
            span: sp(16, 21),
        }]
    );
    let narrowed = Fact::IsType {
        value: subject_value(),
        ty: point,
    };
    assert!(outcome.flow.else_info.contains(&narrowed));
    assert!(!outcome.flow.then_info.contains(&narrowed));
    assert_eq!(
        outcome.scope.map(|s| s.local_bindings().len()),
        Some(0)
    );
}

#[test]
fn plain_is_narrows_and_keeps_subject_facts() {
    let mut services = MockServices::new();
    let point = services.class("Point");
    let arena = PatternArena::new();
    let mut resolver = PatternResolver::new(&arena, &services);

    let evaluated = FlowInfo::empty().establish(FlowValue::Expr(patc_ir::ExprId::new(5)), Idx::INT);
    let mut check = is_check(
        subject(Idx::ANY),
        IsTarget::Type(services.type_ref("Point", sp(5, 10))),
        false,
        MatchSite::Other,
    );
    check.subject_flow = evaluated.clone();
    let outcome = resolver.analyse_is_match(&check, &FlowInfo::empty(), &PatternScope::new());

    assert_eq!(resolver.problems(), &[]);
    assert!(outcome.scope.is_none());
    assert_eq!(
        outcome.flow.then_info,
        evaluated.establish(subject_value(), point)
    );
    assert!(outcome.flow.else_info.is_empty());
}

#[test]
fn redundant_plain_is_reports_only_the_is_check() {
    let mut services = MockServices::new();
    let point = services.class("Point");
    let arena = PatternArena::new();
    let mut resolver = PatternResolver::new(&arena, &services);

    let check = is_check(
        subject(point),
        IsTarget::Type(services.type_ref("Point", sp(5, 10))),
        true,
        MatchSite::IfCondition,
    );
    let outcome = resolver.analyse_is_match(&check, &FlowInfo::empty(), &PatternScope::new());

    assert_eq!(
        resolver.problems(),
        &[PatternProblem::UselessIsCheck {
            span: sp(0, 20),
            always: false,
        }]
    );
    assert!(outcome.flow.is_empty());
}

// ── when ──

fn condition(kind: WhenConditionKind, start: u32) -> WhenCondition {
    WhenCondition {
        kind,
        span: sp(start, start + 4),
    }
}

#[test]
fn when_entries_see_failure_of_earlier_entries() {
    let mut services = MockServices::new();
    let (one, two) = (patc_ir::ExprId::new(1), patc_ir::ExprId::new(2));
    services.expr(one, Idx::INT);
    services.expr(two, Idx::INT);
    let arena = PatternArena::new();
    let mut resolver = PatternResolver::new(&arena, &services);

    let when = WhenExpr {
        subject: Some(subject(Idx::INT)),
        entries: vec![
            WhenEntry::new(vec![condition(WhenConditionKind::Expression(one), 10)], sp(10, 20)),
            WhenEntry::new(vec![condition(WhenConditionKind::Expression(two), 30)], sp(30, 40)),
            WhenEntry::else_branch(sp(50, 60)),
        ],
    };
    let analysis = resolver.analyse_when(&when, &FlowInfo::empty(), &PatternScope::new());

    let not_one = Fact::not_equal(subject_value(), FlowValue::Expr(one));
    let not_two = Fact::not_equal(subject_value(), FlowValue::Expr(two));
    assert_eq!(analysis.entries.len(), 3);
    assert!(analysis.entries[0].input.is_empty());
    assert!(analysis.entries[0]
        .body_facts()
        .contains(&Fact::equal(subject_value(), FlowValue::Expr(one), false)));
    assert_eq!(analysis.entries[1].input, FlowInfo::from_facts([not_one]));
    assert_eq!(analysis.entries[2].input, FlowInfo::from_facts([not_one, not_two]));
    assert!(analysis.entries[2].flow.is_empty());
    assert_eq!(analysis.exhausted, analysis.entries[2].input);
    assert_eq!(resolver.problems(), &[]);
}

#[test]
fn single_condition_entry_binds_and_multi_condition_entry_does_not() {
    let mut services = MockServices::new();
    let mut arena = PatternArena::new();
    let (point, root) = point_pattern(&mut services, &mut arena);
    let a = services.name("a");
    let string = services.type_ref("String", sp(40, 46));
    let mut resolver = PatternResolver::new(&arena, &services);
    let outer = PatternScope::new();

    let single = WhenExpr {
        subject: Some(subject(Idx::ANY)),
        entries: vec![
            WhenEntry::new(
                vec![condition(WhenConditionKind::IsPattern { pattern: root, negated: false }, 0)],
                sp(0, 30),
            ),
            WhenEntry::else_branch(sp(31, 35)),
        ],
    };
    let analysis = resolver.analyse_when(&single, &FlowInfo::empty(), &outer);
    assert_eq!(resolver.problems(), &[]);
    assert_eq!(analysis.entries[0].scope.lookup(a).map(|b| b.ty), Some(Idx::INT));
    assert!(analysis.entries[0].flow.then_info.contains(&Fact::IsType {
        value: subject_value(),
        ty: point,
    }));
    assert_eq!(analysis.entries[1].scope.lookup(a), None);

    // Same pattern, now one of two alternatives: a fresh resolver so the
    // pattern is not served from the memo.
    let mut resolver = PatternResolver::new(&arena, &services);
    let multi = WhenExpr {
        subject: Some(subject(Idx::ANY)),
        entries: vec![WhenEntry::new(
            vec![
                condition(WhenConditionKind::IsPattern { pattern: root, negated: false }, 0),
                condition(WhenConditionKind::IsType { ty: string, negated: false }, 40),
            ],
            sp(0, 50),
        )],
    };
    let analysis = resolver.analyse_when(&multi, &FlowInfo::empty(), &outer);
    assert_eq!(
        resolver.problems(),
        &[PatternProblem::BindingNotAllowed {
            name: a,
            span: sp(16, 21),
        }]
    );
    // Only facts both alternatives agree on survive.
    assert!(analysis.entries[0].flow.then_info.is_empty());
}

#[test]
fn subjectless_when_takes_boolean_conditions_only() {
    let mut services = MockServices::new();
    let mut arena = PatternArena::new();
    let (_, root) = point_pattern(&mut services, &mut arena);
    let cond = patc_ir::ExprId::new(7);
    let on_true = FlowInfo::empty().establish(FlowValue::Expr(patc_ir::ExprId::new(8)), Idx::INT);
    let on_false = FlowInfo::empty().establish(FlowValue::Expr(patc_ir::ExprId::new(8)), Idx::STRING);
    services.condition(cond, ConditionalFlow::new(on_true.clone(), on_false.clone()));
    let mut resolver = PatternResolver::new(&arena, &services);

    let when = WhenExpr {
        subject: None,
        entries: vec![
            WhenEntry::new(
                vec![condition(WhenConditionKind::IsPattern { pattern: root, negated: false }, 0)],
                sp(0, 10),
            ),
            WhenEntry::new(vec![condition(WhenConditionKind::Expression(cond), 20)], sp(20, 30)),
            WhenEntry::new(
                vec![condition(
                    WhenConditionKind::InRange {
                        range: patc_ir::ExprId::new(9),
                        negated: false,
                    },
                    40,
                )],
                sp(40, 50),
            ),
        ],
    };
    let analysis = resolver.analyse_when(&when, &FlowInfo::empty(), &PatternScope::new());

    assert_eq!(
        resolver.problems(),
        &[
            PatternProblem::ExpectedCondition { span: sp(0, 4) },
            PatternProblem::ExpectedCondition { span: sp(40, 44) },
        ]
    );
    assert!(analysis.entries[0].flow.is_empty());
    assert_eq!(analysis.entries[1].flow, ConditionalFlow::new(on_true, on_false.clone()));
    assert_eq!(analysis.entries[2].input, on_false);

    let checked = services.checked.borrow();
    assert_eq!(checked.len(), 1);
    assert_eq!(checked[0].1.expected, Some(Idx::BOOLEAN));
}

#[test]
fn range_conditions_need_a_boolean_in_service() {
    let mut services = MockServices::new();
    let (ok, wrong, unknown) = (
        patc_ir::ExprId::new(1),
        patc_ir::ExprId::new(2),
        patc_ir::ExprId::new(3),
    );
    services.range(ok, Idx::BOOLEAN);
    services.range(wrong, Idx::INT);
    let arena = PatternArena::new();
    let mut resolver = PatternResolver::new(&arena, &services);

    let in_range = |range, start| {
        condition(WhenConditionKind::InRange { range, negated: false }, start)
    };
    let when = WhenExpr {
        subject: Some(subject(Idx::INT)),
        entries: vec![
            WhenEntry::new(vec![in_range(ok, 0)], sp(0, 10)),
            WhenEntry::new(vec![in_range(wrong, 10)], sp(10, 20)),
            WhenEntry::new(vec![in_range(unknown, 20)], sp(20, 30)),
        ],
    };
    let analysis = resolver.analyse_when(&when, &FlowInfo::empty(), &PatternScope::new());

    assert_eq!(
        resolver.problems(),
        &[
            PatternProblem::IncompatibleTypes {
                ty: Idx::INT,
                subject: Idx::BOOLEAN,
                span: sp(10, 14),
            },
            PatternProblem::UnsupportedCondition { span: sp(20, 24) },
        ]
    );
    assert!(analysis.entries.iter().all(|e| e.flow.is_empty()));
}
