//! Per-node resolution state.

use bitflags::bitflags;

use patc_ir::Span;
use patc_types::{FlowInfo, FlowValue, Idx};

/// The value a (sub-)pattern is matched against.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Subject {
    /// Flow identity; also tells where the value comes from (a host
    /// expression, or a transient value produced inside the pattern).
    pub value: FlowValue,
    pub ty: Idx,
    pub span: Span,
}

impl Subject {
    pub fn new(value: FlowValue, ty: Idx, span: Span) -> Self {
        Subject { value, ty, span }
    }

    #[must_use]
    pub fn with_type(self, ty: Idx) -> Self {
        Subject { ty, ..self }
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ResolveFlags: u8 {
        /// Variable declarations may bind.
        const ALLOW_DEFINITION = 1 << 0;
        /// The enclosing check is `!is`.
        const NEGATED = 1 << 1;
        /// Generic classes may be written without type arguments.
        const BARE_TYPES = 1 << 2;
    }
}

/// Everything a node needs to know about its context. Transitions return a
/// new state; the caller's copy is never affected.
#[derive(Clone, Debug)]
pub struct ResolveState {
    /// Facts known on entry to the node.
    pub flow: FlowInfo,
    pub subject: Subject,
    pub flags: ResolveFlags,
}

impl ResolveState {
    pub fn new(subject: Subject, flow: FlowInfo, flags: ResolveFlags) -> Self {
        ResolveState {
            flow,
            subject,
            flags,
        }
    }

    #[must_use]
    pub fn with_subject(&self, subject: Subject) -> Self {
        ResolveState {
            subject,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_flow(&self, flow: FlowInfo) -> Self {
        ResolveState {
            flow,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_bare_types(&self, allowed: bool) -> Self {
        let mut flags = self.flags;
        flags.set(ResolveFlags::BARE_TYPES, allowed);
        ResolveState {
            flags,
            ..self.clone()
        }
    }

    pub fn allows_definition(&self) -> bool {
        self.flags.contains(ResolveFlags::ALLOW_DEFINITION)
    }

    pub fn is_negated(&self) -> bool {
        self.flags.contains(ResolveFlags::NEGATED)
    }

    pub fn allows_bare_types(&self) -> bool {
        self.flags.contains(ResolveFlags::BARE_TYPES)
    }
}
