//! Patc IR - shared vocabulary for structural pattern matching.
//!
//! - Spans for source locations
//! - Names for interned identifiers
//! - Opaque expression handles owned by the host compiler
//! - Syntactic type references
//! - The pattern tree, both as the parser hands it over ([`RawPattern`])
//!   and in its normalized, arena-allocated form ([`PatternArena`])
//!
//! Everything downstream keys on small `Copy` IDs; the pattern arena is the
//! only owner of pattern nodes.

mod expr_id;
mod interner;
mod name;
pub mod pattern;
mod span;
mod type_ref;

pub use expr_id::ExprId;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use pattern::{
    normalize, Binding, Constraint, Deconstruction, PatternArena, PatternKind, PatternNode,
    PatternNodeId, RawConstraint, RawEntry, RawEntryBody, RawPattern, Shape,
};
pub use span::{Span, SpanError};
pub use type_ref::{TypeCall, TypeRef};
