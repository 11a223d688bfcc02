//! Syntactic type references.
//!
//! These are written types as they appear in a pattern (`is List<Int>?`),
//! not resolved types. Resolution to a type handle belongs to the host's
//! type-test service.

use crate::{Name, Span};

/// A written type: `Name<Args>?`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    pub name: Name,
    pub args: Vec<TypeRef>,
    pub nullable: bool,
    pub span: Span,
}

impl TypeRef {
    /// Non-nullable reference without type arguments.
    pub fn simple(name: Name, span: Span) -> Self {
        TypeRef {
            name,
            args: Vec::new(),
            nullable: false,
            span,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<TypeRef>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Written without type arguments. Whether that is legal depends on the
    /// referenced class and on the bare-types context.
    pub fn is_bare(&self) -> bool {
        self.args.is_empty()
    }
}

/// The callee of a typed deconstruction: `Point(x, y)` or `Box<Int>(v)`.
///
/// Resolved first as a deconstructor function, then as a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeCall {
    pub name: Name,
    pub type_args: Vec<TypeRef>,
    pub span: Span,
}

impl TypeCall {
    pub fn new(name: Name, span: Span) -> Self {
        TypeCall {
            name,
            type_args: Vec::new(),
            span,
        }
    }

    /// The callee read as a type reference.
    pub fn to_type_ref(&self) -> TypeRef {
        TypeRef {
            name: self.name,
            args: self.type_args.clone(),
            nullable: false,
            span: self.span,
        }
    }
}
