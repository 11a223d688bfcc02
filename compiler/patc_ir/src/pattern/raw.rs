//! Parser-facing pattern tree and its normalization.

use smallvec::SmallVec;

use super::{Binding, Constraint, Deconstruction, PatternArena, PatternKind, PatternNodeId, Shape};
use crate::{ExprId, Name, Span, TypeCall, TypeRef};

/// Root of a parsed `is like` pattern.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RawPattern {
    pub entry: RawEntry,
    pub guard: Option<(ExprId, Span)>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RawEntry {
    pub name: Option<Name>,
    pub tail: bool,
    pub body: RawEntryBody,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum RawEntryBody {
    Declaration {
        binding: Binding,
        constraint: Option<RawConstraint>,
    },
    Constraint(RawConstraint),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum RawConstraint {
    Type(TypeRef),
    Deconstruction {
        type_call: Option<TypeCall>,
        shape: Shape,
        entries: Vec<RawEntry>,
        span: Span,
    },
    Expression {
        expr: ExprId,
        explicit_eq: bool,
        span: Span,
    },
    /// `Name(args)` before the parser has decided what it is. Never
    /// survives [`normalize`].
    Call {
        callee: TypeCall,
        args: Vec<RawEntry>,
        span: Span,
    },
}

impl RawPattern {
    pub fn new(entry: RawEntry) -> Self {
        let span = entry.span;
        RawPattern {
            entry,
            guard: None,
            span,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, expr: ExprId, span: Span) -> Self {
        self.span = self.span.merge(span);
        self.guard = Some((expr, span));
        self
    }
}

impl RawEntry {
    /// `val name`.
    pub fn declare(name: Name, span: Span) -> Self {
        RawEntry {
            name: None,
            tail: false,
            body: RawEntryBody::Declaration {
                binding: Binding::Named(name),
                constraint: None,
            },
            span,
        }
    }

    /// `_`.
    pub fn wildcard(span: Span) -> Self {
        RawEntry {
            name: None,
            tail: false,
            body: RawEntryBody::Declaration {
                binding: Binding::Wildcard,
                constraint: None,
            },
            span,
        }
    }

    /// A bare constraint with no declaration.
    pub fn constraint(constraint: RawConstraint, span: Span) -> Self {
        RawEntry {
            name: None,
            tail: false,
            body: RawEntryBody::Constraint(constraint),
            span,
        }
    }

    /// Attach a constraint to a declaration (`val x is T`). Bare
    /// constraints are replaced.
    #[must_use]
    pub fn with_constraint(mut self, constraint: RawConstraint) -> Self {
        self.body = match self.body {
            RawEntryBody::Declaration { binding, .. } => RawEntryBody::Declaration {
                binding,
                constraint: Some(constraint),
            },
            RawEntryBody::Constraint(_) => RawEntryBody::Constraint(constraint),
        };
        self
    }

    /// `name = ...`.
    #[must_use]
    pub fn named(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    /// `*...`.
    #[must_use]
    pub fn tail(mut self) -> Self {
        self.tail = true;
        self
    }
}

impl RawConstraint {
    pub fn tuple(type_call: Option<TypeCall>, entries: Vec<RawEntry>, span: Span) -> Self {
        RawConstraint::Deconstruction {
            type_call,
            shape: Shape::Tuple,
            entries,
            span,
        }
    }

    pub fn list(type_call: Option<TypeCall>, entries: Vec<RawEntry>, span: Span) -> Self {
        RawConstraint::Deconstruction {
            type_call,
            shape: Shape::List,
            entries,
            span,
        }
    }

    pub fn expr(expr: ExprId, span: Span) -> Self {
        RawConstraint::Expression {
            expr,
            explicit_eq: false,
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            RawConstraint::Type(ty) => ty.span,
            RawConstraint::Deconstruction { span, .. }
            | RawConstraint::Expression { span, .. }
            | RawConstraint::Call { span, .. } => *span,
        }
    }
}

/// Allocate `pattern` into `arena`, rewriting call forms into typed tuple
/// deconstructions. Returns the root `Pattern` node.
pub fn normalize(pattern: &RawPattern, arena: &mut PatternArena) -> PatternNodeId {
    let entry = normalize_entry(&pattern.entry, arena);
    let guard = pattern
        .guard
        .map(|(expr, span)| arena.alloc(PatternKind::Guard { expr }, span));
    arena.alloc(PatternKind::Pattern { entry, guard }, pattern.span)
}

fn normalize_entry(entry: &RawEntry, arena: &mut PatternArena) -> PatternNodeId {
    let body = match &entry.body {
        RawEntryBody::Declaration {
            binding,
            constraint,
        } => {
            let constraint = constraint.as_ref().map(|c| normalize_constraint(c, arena));
            arena.alloc(
                PatternKind::Declaration {
                    binding: *binding,
                    constraint,
                },
                entry.span,
            )
        }
        RawEntryBody::Constraint(constraint) => normalize_constraint(constraint, arena),
    };
    arena.alloc(
        PatternKind::Entry {
            name: entry.name,
            tail: entry.tail,
            body,
        },
        entry.span,
    )
}

fn normalize_constraint(constraint: &RawConstraint, arena: &mut PatternArena) -> PatternNodeId {
    let span = constraint.span();
    let normalized = match constraint {
        RawConstraint::Type(ty) => Constraint::Type(ty.clone()),
        RawConstraint::Expression {
            expr, explicit_eq, ..
        } => Constraint::Expression {
            expr: *expr,
            explicit_eq: *explicit_eq,
        },
        RawConstraint::Deconstruction {
            type_call,
            shape,
            entries,
            ..
        } => Constraint::Deconstruction(Deconstruction {
            type_call: type_call.clone(),
            shape: *shape,
            entries: normalize_entries(entries, arena),
        }),
        RawConstraint::Call { callee, args, .. } => Constraint::Deconstruction(Deconstruction {
            type_call: Some(callee.clone()),
            shape: Shape::Tuple,
            entries: normalize_entries(args, arena),
        }),
    };
    arena.alloc(PatternKind::Constraint(normalized), span)
}

fn normalize_entries(
    entries: &[RawEntry],
    arena: &mut PatternArena,
) -> SmallVec<[PatternNodeId; 4]> {
    entries.iter().map(|e| normalize_entry(e, arena)).collect()
}
