use super::{FlowInfo, FlowValue};

/// Facts on the success (`then`) and failure (`else`) edges of a condition.
///
/// Values are deltas: the facts a condition adds on top of whatever flowed
/// into it. A condition that tells nothing is [`ConditionalFlow::empty`].
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConditionalFlow {
    pub then_info: FlowInfo,
    pub else_info: FlowInfo,
}

impl ConditionalFlow {
    pub fn new(then_info: FlowInfo, else_info: FlowInfo) -> Self {
        ConditionalFlow {
            then_info,
            else_info,
        }
    }

    pub fn empty() -> Self {
        ConditionalFlow::default()
    }

    /// The same facts on both edges.
    pub fn both(info: FlowInfo) -> Self {
        ConditionalFlow {
            then_info: info.clone(),
            else_info: info,
        }
    }

    /// Neither edge learns anything.
    pub fn is_empty(&self) -> bool {
        self.then_info.is_empty() && self.else_info.is_empty()
    }

    /// `a && b`: success needs both, failure may come from either.
    ///
    /// The failure side is the intersection of the operands' failure facts,
    /// which is sound but forgets that `a` succeeded whenever `b` failed.
    #[must_use]
    pub fn and(&self, other: &ConditionalFlow) -> ConditionalFlow {
        ConditionalFlow {
            then_info: self.then_info.and(&other.then_info),
            else_info: self.else_info.or(&other.else_info),
        }
    }

    /// `a || b`.
    #[must_use]
    pub fn or(&self, other: &ConditionalFlow) -> ConditionalFlow {
        ConditionalFlow {
            then_info: self.then_info.or(&other.then_info),
            else_info: self.else_info.and(&other.else_info),
        }
    }

    /// `!a`.
    #[must_use]
    pub fn not(&self) -> ConditionalFlow {
        ConditionalFlow {
            then_info: self.else_info.clone(),
            else_info: self.then_info.clone(),
        }
    }

    /// The condition `a == b` (`identity` for `===`).
    pub fn equate(a: FlowValue, b: FlowValue, identity: bool) -> ConditionalFlow {
        ConditionalFlow {
            then_info: FlowInfo::empty().equate(a, b, identity),
            else_info: FlowInfo::empty().disequate(a, b),
        }
    }

    /// The condition `a != b`.
    pub fn disequate(a: FlowValue, b: FlowValue, identity: bool) -> ConditionalFlow {
        ConditionalFlow::equate(a, b, identity).not()
    }
}
