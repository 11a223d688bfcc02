//! What pattern resolution needs from the host compiler.
//!
//! Accessor lookup, the iteration convention, type-test resolution and
//! general expression typing are the host's business; resolution only
//! combines their answers. Every lookup may fail with [`Unresolved`], which
//! the caller turns into a diagnostic plus an error-typed placeholder.

use patc_ir::{ExprId, Name, StringInterner, TypeCall, TypeRef};

use crate::{ConditionalFlow, FlowInfo, Idx, PatternScope, Pool};

/// A host lookup found nothing usable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Unresolved;

/// Which accessor a deconstruction entry needs.
#[derive(Clone, Copy, Debug)]
pub enum AccessorRequest<'a> {
    /// `componentN()`, 1-based.
    Component(u32),
    /// A property read, for record-style `name = ...` entries.
    Property(Name),
    /// A deconstructor function applied to the subject: `Point(...)`.
    Deconstructor(&'a TypeCall),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Accessor {
    pub return_type: Idx,
    /// The resolved function carries the `deconstructor` modifier.
    pub is_deconstructor: bool,
}

/// Result of resolving `iterator()` / `next()` on a subject.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IterationConvention {
    /// What the tail entry of a list binds.
    pub iterator: Idx,
    /// What every other list entry sees.
    pub element: Idx,
}

/// Result of resolving `subject is ty`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeTest {
    /// The type the subject has after a successful test.
    pub target: Idx,
    /// The subject is already known to be a `target`.
    pub is_redundant: bool,
    /// `target` mentions type arguments that cannot be checked at runtime.
    pub is_erased: bool,
    /// No value of the subject type can be a `target`.
    pub is_incompatible: bool,
}

/// Environment an embedded expression is typed in.
#[derive(Clone, Debug)]
pub struct ExprContext {
    /// Facts known where the expression is evaluated.
    pub flow: FlowInfo,
    /// Pattern variables visible to the expression.
    pub scope: PatternScope,
    /// Type the expression should conform to, if any.
    pub expected: Option<Idx>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprTypeInfo {
    pub ty: Idx,
    /// Facts known after evaluating the expression.
    pub flow: FlowInfo,
}

pub trait PatternServices {
    fn pool(&self) -> &Pool;

    fn interner(&self) -> &StringInterner;

    /// Resolve an accessor on `receiver`. A deconstructor request must not
    /// resolve to a constructor; report [`Unresolved`] instead so the call
    /// is retried as a type.
    fn resolve_accessor(
        &self,
        receiver: Idx,
        request: AccessorRequest<'_>,
    ) -> Result<Accessor, Unresolved>;

    fn resolve_iteration(&self, receiver: Idx) -> Result<IterationConvention, Unresolved>;

    /// Resolve `ty` for testing a value of type `subject`. `allow_bare`
    /// permits generic classes written without arguments, with the
    /// arguments inferred from `subject`.
    fn resolve_type_test(
        &self,
        subject: Idx,
        ty: &TypeRef,
        allow_bare: bool,
    ) -> Result<TypeTest, Unresolved>;

    fn type_expression(&self, expr: ExprId, cx: &ExprContext) -> ExprTypeInfo;

    /// Type `expr` as a boolean condition and report its facts.
    fn check_condition(&self, expr: ExprId, cx: &ExprContext) -> ConditionalFlow;

    /// Values of the two types can be equal.
    fn types_compatible(&self, a: Idx, b: Idx) -> bool;

    /// `==` on this type is reference identity.
    fn has_identity_equals(&self, ty: Idx) -> bool;

    /// Type `subject in range` as a condition. Hosts without ranges keep
    /// the default, which rejects every range condition.
    fn check_in_range(
        &self,
        _subject: Idx,
        _range: ExprId,
        _cx: &ExprContext,
    ) -> Result<ExprTypeInfo, Unresolved> {
        Err(Unresolved)
    }
}
