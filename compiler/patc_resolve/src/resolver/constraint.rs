//! Type and expression constraints.

use patc_ir::{ExprId, PatternNodeId, Span, TypeRef};
use patc_types::{ConditionalFlow, FlowInfo, FlowValue, Idx, PatternServices, Unresolved};

use super::PatternResolver;
use crate::{ConditionalTypeInfo, PatternProblem, ResolveState, Subject};

pub(crate) struct TypeCheck {
    pub(crate) info: ConditionalTypeInfo,
    /// The subject is already known to have the target type.
    pub(crate) redundant: bool,
}

impl<S: PatternServices + ?Sized> PatternResolver<'_, S> {
    /// `is T` inside a pattern.
    pub(super) fn resolve_type_constraint(
        &mut self,
        id: PatternNodeId,
        ty: &TypeRef,
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        self.check_type_for_is(id, ty, state).unwrap_or_else(|Unresolved| {
            self.report(PatternProblem::UnresolvedType {
                name: ty.name,
                span: ty.span,
            });
            ConditionalTypeInfo::empty(Idx::ERROR)
        })
    }

    /// A type test inside a pattern. Redundant tests are recorded against
    /// `id` and reported as useless.
    pub(crate) fn check_type_for_is(
        &mut self,
        id: PatternNodeId,
        ty: &TypeRef,
        state: &ResolveState,
    ) -> Result<ConditionalTypeInfo, Unresolved> {
        let TypeCheck { info, redundant } = self.test_type(ty, state)?;
        if redundant {
            self.table.redundant_checks.insert(id);
            if self.config.report_useless_checks {
                self.report(PatternProblem::UselessTypeCheck {
                    span: ty.span,
                    always: !state.is_negated(),
                });
            }
        }
        Ok(info)
    }

    /// Test the subject against `ty`.
    ///
    /// On success the subject has the target type. A test the flow already
    /// proves is redundant and establishes nothing.
    pub(crate) fn test_type(
        &mut self,
        ty: &TypeRef,
        state: &ResolveState,
    ) -> Result<TypeCheck, Unresolved> {
        let subject = state.subject;
        let test = self
            .services
            .resolve_type_test(subject.ty, ty, state.allows_bare_types())?;
        let target = test.target;
        if target.is_error() || subject.ty.is_error() {
            return Ok(TypeCheck {
                info: ConditionalTypeInfo::empty(target),
                redundant: false,
            });
        }

        if test.is_incompatible {
            self.report(PatternProblem::IncompatibleTypes {
                ty: target,
                subject: subject.ty,
                span: ty.span,
            });
        }
        if test.is_erased {
            self.report(PatternProblem::CannotCheckErased {
                ty: target,
                span: ty.span,
            });
        }

        let redundant =
            test.is_redundant || state.flow.known_types(subject.value).contains(&target);
        let info = if redundant {
            ConditionalTypeInfo::empty(target)
        } else {
            ConditionalTypeInfo::on_success(
                target,
                FlowInfo::empty().establish(subject.value, target),
            )
        };
        Ok(TypeCheck { info, redundant })
    }

    /// `== expr` (or a bare value) inside a pattern.
    pub(super) fn resolve_expression_constraint(
        &mut self,
        id: PatternNodeId,
        expr: ExprId,
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        let span = self.arena.span(id);
        let flow = self.equality_flow(state.subject, expr, &state.flow, span);
        ConditionalTypeInfo {
            ty: state.subject.ty,
            flow,
        }
    }

    /// Facts of `subject == expr`: equal on success, unequal on failure,
    /// both on top of whatever evaluating `expr` established.
    pub(crate) fn equality_flow(
        &mut self,
        subject: Subject,
        expr: ExprId,
        flow: &FlowInfo,
        span: Span,
    ) -> ConditionalFlow {
        let cx = self.expr_context(flow, None);
        let typed = self.services.type_expression(expr, &cx);

        let poisoned = typed.ty.is_error() || subject.ty.is_error();
        if !poisoned && !self.services.types_compatible(subject.ty, typed.ty) {
            self.report(PatternProblem::IncompatibleTypes {
                ty: typed.ty,
                subject: subject.ty,
                span,
            });
        }

        let identity = self.services.has_identity_equals(subject.ty);
        let value = FlowValue::Expr(expr);
        ConditionalFlow::new(
            typed.flow.clone().equate(subject.value, value, identity),
            typed.flow.disequate(subject.value, value),
        )
    }
}
