//! Results of resolution.

use rustc_hash::{FxHashMap, FxHashSet};

use patc_ir::PatternNodeId;
use patc_types::{ConditionalFlow, FlowInfo, Idx, PatternScope, VarId};

/// Type of the subject after a node matched, plus the facts the match
/// establishes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConditionalTypeInfo {
    pub ty: Idx,
    pub flow: ConditionalFlow,
}

impl ConditionalTypeInfo {
    /// A match that narrows nothing and tells nothing.
    pub fn empty(ty: Idx) -> Self {
        ConditionalTypeInfo {
            ty,
            flow: ConditionalFlow::empty(),
        }
    }

    /// Facts only on the success edge.
    pub fn on_success(ty: Idx, then_info: FlowInfo) -> Self {
        ConditionalTypeInfo {
            ty,
            flow: ConditionalFlow::new(then_info, FlowInfo::empty()),
        }
    }

    /// Conjunction with a sub-match. The type stays ours.
    #[must_use]
    pub fn and(&self, other: &ConditionalTypeInfo) -> Self {
        ConditionalTypeInfo {
            ty: self.ty,
            flow: self.flow.and(&other.flow),
        }
    }

    pub fn then_info(&self) -> &FlowInfo {
        &self.flow.then_info
    }
}

/// Outcome of resolving a whole pattern.
#[derive(Clone, Debug)]
pub struct PatternResolution {
    pub info: ConditionalTypeInfo,
    /// Frame holding every variable the pattern declared; its parent is
    /// the scope the check was resolved in.
    pub scope: PatternScope,
}

/// Per-node answers a later phase (code generation, IDE queries) needs.
#[derive(Clone, Debug, Default)]
pub struct PatternTypeTable {
    pub(crate) infos: FxHashMap<PatternNodeId, ConditionalTypeInfo>,
    pub(crate) redundant_checks: FxHashSet<PatternNodeId>,
    pub(crate) deconstructor_calls: FxHashSet<PatternNodeId>,
    pub(crate) null_checks: FxHashSet<PatternNodeId>,
    pub(crate) bindings: FxHashMap<PatternNodeId, VarId>,
}

impl PatternTypeTable {
    pub fn info(&self, node: PatternNodeId) -> Option<&ConditionalTypeInfo> {
        self.infos.get(&node)
    }

    /// A type test (constraint or type call) that cannot fail.
    pub fn is_redundant_check(&self, node: PatternNodeId) -> bool {
        self.redundant_checks.contains(&node)
    }

    /// The deconstruction's type call resolved to a deconstructor function.
    pub fn is_deconstructor_call(&self, node: PatternNodeId) -> bool {
        self.deconstructor_calls.contains(&node)
    }

    /// The deconstructor returns a nullable value; `null` means no match.
    pub fn needs_null_check(&self, node: PatternNodeId) -> bool {
        self.null_checks.contains(&node)
    }

    /// Variable declared by a declaration node.
    pub fn binding(&self, node: PatternNodeId) -> Option<VarId> {
        self.bindings.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}
