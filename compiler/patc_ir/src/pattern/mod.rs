//! Pattern tree for `is like` checks.
//!
//! Parsers hand over a [`RawPattern`] (boxed, owned, may still contain the
//! call form `Name(args)`); [`normalize`] lowers it into a [`PatternArena`]
//! where every node has a stable [`PatternNodeId`]. The normalized kinds have
//! no call variant: a call is always read as a typed deconstruction.
//!
//! ```text
//! x is like Point(val px, _) if px > 0
//!
//! Pattern ─┬─ Entry ── Constraint::Deconstruction(Point, Tuple)
//!          │                ├─ Entry ── Declaration(px)
//!          │                └─ Entry ── Declaration(_)
//!          └─ Guard(px > 0)
//! ```

mod raw;

pub use raw::{normalize, RawConstraint, RawEntry, RawEntryBody, RawPattern};

use smallvec::SmallVec;

use crate::{ExprId, Name, Span, TypeCall, TypeRef};

/// Index of a node in a [`PatternArena`].
///
/// Node identity is what resolution results are memoized on.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct PatternNodeId(u32);

impl PatternNodeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        PatternNodeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a declaration binds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Binding {
    Named(Name),
    /// `_`: matches anything, binds nothing.
    Wildcard,
}

impl Binding {
    pub fn name(self) -> Option<Name> {
        match self {
            Binding::Named(name) => Some(name),
            Binding::Wildcard => None,
        }
    }
}

/// Bracket form of a deconstruction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    /// `(a, b)` / `Point(x = a)`: positional components or named properties.
    Tuple,
    /// `[a, b, *rest]`: iteration, optional trailing tail entry.
    List,
}

/// `TypeCall? (entries)` or `TypeCall? [entries]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Deconstruction {
    pub type_call: Option<TypeCall>,
    pub shape: Shape,
    /// Entry nodes, in source order.
    pub entries: SmallVec<[PatternNodeId; 4]>,
}

/// What a subject is checked against.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Constraint {
    /// `is T`.
    Type(TypeRef),
    Deconstruction(Deconstruction),
    /// Equality against a value; `explicit_eq` is the `eq expr` spelling.
    Expression { expr: ExprId, explicit_eq: bool },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PatternKind {
    /// Root: one entry and an optional trailing guard.
    Pattern {
        entry: PatternNodeId,
        guard: Option<PatternNodeId>,
    },
    /// A slot in a deconstruction (or the root). `name` is the record-style
    /// `name = ...` prefix; `tail` marks `*rest` in lists.
    Entry {
        name: Option<Name>,
        tail: bool,
        body: PatternNodeId,
    },
    /// `val x`, `val x is T`, `_`.
    Declaration {
        binding: Binding,
        constraint: Option<PatternNodeId>,
    },
    Constraint(Constraint),
    /// `if cond` after the pattern.
    Guard { expr: ExprId },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PatternNode {
    pub kind: PatternKind,
    pub span: Span,
}

/// Owner of normalized pattern nodes.
#[derive(Clone, Default, Debug)]
pub struct PatternArena {
    nodes: Vec<PatternNode>,
}

impl PatternArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: PatternKind, span: Span) -> PatternNodeId {
        let raw = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("pattern arena exceeded u32::MAX nodes"));
        self.nodes.push(PatternNode { kind, span });
        PatternNodeId(raw)
    }

    #[inline]
    pub fn get(&self, id: PatternNodeId) -> &PatternNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: PatternNodeId) -> &PatternKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: PatternNodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of `id`, in source order.
    pub fn children(&self, id: PatternNodeId) -> SmallVec<[PatternNodeId; 4]> {
        match self.kind(id) {
            PatternKind::Pattern { entry, guard } => {
                let mut out = SmallVec::new();
                out.push(*entry);
                out.extend(*guard);
                out
            }
            PatternKind::Entry { body, .. } => smallvec::smallvec![*body],
            PatternKind::Declaration { constraint, .. } => constraint.iter().copied().collect(),
            PatternKind::Constraint(Constraint::Deconstruction(d)) => d.entries.clone(),
            PatternKind::Constraint(_) | PatternKind::Guard { .. } => SmallVec::new(),
        }
    }
}
