//! Flow facts: what is known about values along one control-flow edge.
//!
//! A [`FlowInfo`] is an immutable, sorted, duplicate-free set of [`Fact`]s.
//! Conjunction is union (both facts hold), disjunction is intersection
//! (only facts known on both paths survive). [`ConditionalFlow`] pairs the
//! facts for the success and failure edges of a condition.

mod conditional;

pub use conditional::ConditionalFlow;

use smallvec::SmallVec;

use patc_ir::{ExprId, PatternNodeId};

use crate::{Idx, VarId};

/// Identity of a value that facts can talk about.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum FlowValue {
    /// A stable host expression (local read, `this`, ...).
    Expr(ExprId),
    /// A transient subject produced inside a pattern (a component, an
    /// element, a deconstructor result).
    Node(PatternNodeId),
    /// A pattern variable.
    Var(VarId),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Fact {
    /// `value` is known to have type `ty` (a smart cast).
    IsType { value: FlowValue, ty: Idx },
    /// The two values are equal; `identity` when reference identity holds,
    /// which also means they share every type fact.
    Equal {
        left: FlowValue,
        right: FlowValue,
        identity: bool,
    },
    NotEqual { left: FlowValue, right: FlowValue },
}

impl Fact {
    /// Order-normalized equality fact.
    pub fn equal(a: FlowValue, b: FlowValue, identity: bool) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Fact::Equal {
            left,
            right,
            identity,
        }
    }

    /// Order-normalized inequality fact.
    pub fn not_equal(a: FlowValue, b: FlowValue) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Fact::NotEqual { left, right }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FlowInfo {
    facts: SmallVec<[Fact; 4]>,
}

impl FlowInfo {
    /// Nothing known.
    pub fn empty() -> Self {
        FlowInfo::default()
    }

    pub fn from_facts(facts: impl IntoIterator<Item = Fact>) -> Self {
        let mut facts: SmallVec<[Fact; 4]> = facts.into_iter().collect();
        facts.sort_unstable();
        facts.dedup();
        FlowInfo { facts }
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.binary_search(fact).is_ok()
    }

    #[must_use]
    pub fn with_fact(mut self, fact: Fact) -> Self {
        if let Err(pos) = self.facts.binary_search(&fact) {
            self.facts.insert(pos, fact);
        }
        self
    }

    /// `value` has type `ty`. Error types establish nothing.
    #[must_use]
    pub fn establish(self, value: FlowValue, ty: Idx) -> Self {
        if ty.is_error() {
            return self;
        }
        self.with_fact(Fact::IsType { value, ty })
    }

    /// Add `a == b`. Equating a value with itself adds nothing.
    #[must_use]
    pub fn equate(self, a: FlowValue, b: FlowValue, identity: bool) -> Self {
        if a == b {
            return self;
        }
        self.with_fact(Fact::equal(a, b, identity))
    }

    /// Add `a != b`.
    #[must_use]
    pub fn disequate(self, a: FlowValue, b: FlowValue) -> Self {
        if a == b {
            return self;
        }
        self.with_fact(Fact::not_equal(a, b))
    }

    /// Both hold: union.
    #[must_use]
    pub fn and(&self, other: &FlowInfo) -> FlowInfo {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut facts = SmallVec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.facts.len() && j < other.facts.len() {
            match self.facts[i].cmp(&other.facts[j]) {
                std::cmp::Ordering::Less => {
                    facts.push(self.facts[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    facts.push(other.facts[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    facts.push(self.facts[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        facts.extend_from_slice(&self.facts[i..]);
        facts.extend_from_slice(&other.facts[j..]);
        FlowInfo { facts }
    }

    /// Either holds: intersection.
    #[must_use]
    pub fn or(&self, other: &FlowInfo) -> FlowInfo {
        FlowInfo {
            facts: self
                .facts
                .iter()
                .filter(|f| other.contains(f))
                .copied()
                .collect(),
        }
    }

    /// Every type known for `value`, following identity equalities
    /// transitively.
    pub fn known_types(&self, value: FlowValue) -> SmallVec<[Idx; 2]> {
        let mut aliases: SmallVec<[FlowValue; 4]> = smallvec::smallvec![value];
        let mut cursor = 0;
        while cursor < aliases.len() {
            let current = aliases[cursor];
            cursor += 1;
            for fact in &self.facts {
                if let Fact::Equal {
                    left,
                    right,
                    identity: true,
                } = *fact
                {
                    let other = if left == current {
                        right
                    } else if right == current {
                        left
                    } else {
                        continue;
                    };
                    if !aliases.contains(&other) {
                        aliases.push(other);
                    }
                }
            }
        }

        let mut types = SmallVec::new();
        for fact in &self.facts {
            if let Fact::IsType { value, ty } = *fact {
                if aliases.contains(&value) && !types.contains(&ty) {
                    types.push(ty);
                }
            }
        }
        types
    }
}

#[cfg(test)]
mod tests;
