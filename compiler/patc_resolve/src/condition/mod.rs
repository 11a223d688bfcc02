//! `is` / `is like` checks and `when` conditions.
//!
//! Sits on top of [`PatternResolver::resolve`]: decides whether the check
//! may declare variables, reports checks that cannot fail, applies
//! negation, and threads flow facts from one `when` condition (and entry)
//! to the next.
//!
//! All flows here are deltas on top of the input the caller passed in.

use tracing::debug;

use patc_ir::{ExprId, PatternNodeId, Span, TypeRef};
use patc_types::{
    ConditionalFlow, FlowInfo, Idx, PatternScope, PatternServices, Unresolved,
};

use crate::{PatternProblem, PatternResolver, ResolveFlags, ResolveState, Subject};

/// Where a check appears. Decides whether it may declare variables.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MatchSite {
    IfCondition,
    WhileCondition,
    /// A condition of a `when` entry with `conditions` comma-separated
    /// conditions.
    WhenEntry { conditions: usize },
    /// Any other expression position.
    Other,
}

impl MatchSite {
    /// Variables may be declared only where every one of them is definitely
    /// assigned on the success path.
    pub fn allows_definition(self, negated: bool) -> bool {
        if negated {
            return false;
        }
        match self {
            MatchSite::IfCondition | MatchSite::WhileCondition => true,
            MatchSite::WhenEntry { conditions } => conditions == 1,
            MatchSite::Other => false,
        }
    }
}

/// Right-hand side of `is`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum IsTarget {
    /// `x is T`.
    Type(TypeRef),
    /// `x is like <pattern>`, by root node.
    Pattern(PatternNodeId),
}

/// One `is` expression.
#[derive(Clone, Debug)]
pub struct IsCheck {
    pub subject: Subject,
    /// Facts from evaluating the subject expression.
    pub subject_flow: FlowInfo,
    pub target: IsTarget,
    pub negated: bool,
    pub site: MatchSite,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct MatchOutcome {
    pub flow: ConditionalFlow,
    /// Frame with the declared variables; `None` when nothing could be
    /// declared.
    pub scope: Option<PatternScope>,
}

impl MatchOutcome {
    fn nothing() -> Self {
        MatchOutcome {
            flow: ConditionalFlow::empty(),
            scope: None,
        }
    }
}

/// `when (subject?) { entries }`.
#[derive(Clone, Debug)]
pub struct WhenExpr {
    pub subject: Option<Subject>,
    pub entries: Vec<WhenEntry>,
}

#[derive(Clone, Debug)]
pub struct WhenEntry {
    pub conditions: Vec<WhenCondition>,
    pub is_else: bool,
    pub span: Span,
}

impl WhenEntry {
    pub fn new(conditions: Vec<WhenCondition>, span: Span) -> Self {
        WhenEntry {
            conditions,
            is_else: false,
            span,
        }
    }

    pub fn else_branch(span: Span) -> Self {
        WhenEntry {
            conditions: Vec::new(),
            is_else: true,
            span,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WhenCondition {
    pub kind: WhenConditionKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum WhenConditionKind {
    IsPattern { pattern: PatternNodeId, negated: bool },
    IsType { ty: TypeRef, negated: bool },
    /// Equality with the subject, or a boolean condition without one.
    Expression(ExprId),
    InRange { range: ExprId, negated: bool },
}

/// Facts for one `when` entry.
#[derive(Clone, Debug)]
pub struct EntryAnalysis {
    /// Facts known on entry: the `when` input and the failure facts of
    /// every earlier entry.
    pub input: FlowInfo,
    pub flow: ConditionalFlow,
    /// Names visible in the entry's body.
    pub scope: PatternScope,
}

impl EntryAnalysis {
    /// Everything known inside the entry's body.
    pub fn body_facts(&self) -> FlowInfo {
        self.input.and(&self.flow.then_info)
    }
}

#[derive(Clone, Debug)]
pub struct WhenAnalysis {
    pub entries: Vec<EntryAnalysis>,
    /// Facts known after every entry failed.
    pub exhausted: FlowInfo,
}

impl<S: PatternServices + ?Sized> PatternResolver<'_, S> {
    /// Analyse `subject is T` / `subject is like P` (or the negated form).
    ///
    /// A check that cannot fail is reported. Negation swaps the edges; the
    /// facts from evaluating the subject hold on the success edge.
    pub fn analyse_is_match(
        &mut self,
        check: &IsCheck,
        input: &FlowInfo,
        outer: &PatternScope,
    ) -> MatchOutcome {
        let input = input.and(&check.subject_flow);
        let allow_definition = check.site.allows_definition(check.negated);
        let outcome = self.match_target(
            check.subject,
            &check.target,
            check.negated,
            allow_definition,
            &input,
            outer,
            check.span,
        );
        MatchOutcome {
            flow: ConditionalFlow::new(
                outcome.flow.then_info.and(&check.subject_flow),
                outcome.flow.else_info,
            ),
            scope: outcome.scope,
        }
    }

    /// Analyse every entry of a `when`, in order.
    pub fn analyse_when(
        &mut self,
        when: &WhenExpr,
        input: &FlowInfo,
        outer: &PatternScope,
    ) -> WhenAnalysis {
        debug!(
            entries = when.entries.len(),
            has_subject = when.subject.is_some(),
            "analysing when"
        );
        let mut input = input.clone();
        let mut entries = Vec::with_capacity(when.entries.len());
        for entry in &when.entries {
            let analysis = if entry.is_else {
                EntryAnalysis {
                    input: input.clone(),
                    flow: ConditionalFlow::empty(),
                    scope: outer.clone(),
                }
            } else {
                self.analyse_when_entry(when.subject, entry, &input, outer)
            };
            input = input.and(&analysis.flow.else_info);
            entries.push(analysis);
        }
        WhenAnalysis {
            entries,
            exhausted: input,
        }
    }

    /// Conditions of one entry are alternatives: success facts are those
    /// every condition agrees on, failure facts accumulate. Each condition
    /// sees the failure facts of the ones before it.
    fn analyse_when_entry(
        &mut self,
        subject: Option<Subject>,
        entry: &WhenEntry,
        input: &FlowInfo,
        outer: &PatternScope,
    ) -> EntryAnalysis {
        let mut flow: Option<ConditionalFlow> = None;
        let mut condition_input = input.clone();
        let mut scope = outer.clone();

        for condition in &entry.conditions {
            let outcome = self.analyse_when_condition(
                subject,
                condition,
                entry.conditions.len(),
                &condition_input,
                &scope,
            );
            if let Some(bound) = outcome.scope {
                scope = bound;
            }
            condition_input = condition_input.and(&outcome.flow.else_info);
            flow = Some(match flow {
                Some(previous) => previous.or(&outcome.flow),
                None => outcome.flow,
            });
        }

        EntryAnalysis {
            input: input.clone(),
            flow: flow.unwrap_or_default(),
            scope,
        }
    }

    fn analyse_when_condition(
        &mut self,
        subject: Option<Subject>,
        condition: &WhenCondition,
        conditions: usize,
        input: &FlowInfo,
        scope: &PatternScope,
    ) -> MatchOutcome {
        let span = condition.span;
        let site = MatchSite::WhenEntry { conditions };
        match (&condition.kind, subject) {
            (WhenConditionKind::IsPattern { pattern, negated }, Some(subject)) => self
                .match_target(
                    subject,
                    &IsTarget::Pattern(*pattern),
                    *negated,
                    site.allows_definition(*negated),
                    input,
                    scope,
                    span,
                ),
            (WhenConditionKind::IsType { ty, negated }, Some(subject)) => {
                let flow = self.match_type(subject, ty, *negated, input, span);
                MatchOutcome { flow, scope: None }
            }
            (WhenConditionKind::Expression(expr), Some(subject)) => {
                let saved = self.swap_scope(scope.clone());
                let flow = self.equality_flow(subject, *expr, input, span);
                self.swap_scope(saved);
                MatchOutcome { flow, scope: None }
            }
            (WhenConditionKind::Expression(expr), None) => {
                let saved = self.swap_scope(scope.clone());
                let cx = self.expr_context(input, Some(Idx::BOOLEAN));
                self.swap_scope(saved);
                let flow = self.services().check_condition(*expr, &cx);
                MatchOutcome { flow, scope: None }
            }
            (WhenConditionKind::InRange { range, negated }, Some(subject)) => {
                let saved = self.swap_scope(scope.clone());
                let cx = self.expr_context(input, Some(Idx::BOOLEAN));
                self.swap_scope(saved);
                match self.services().check_in_range(subject.ty, *range, &cx) {
                    Ok(typed) => {
                        if typed.ty != Idx::BOOLEAN && !typed.ty.is_error() {
                            self.report(PatternProblem::IncompatibleTypes {
                                ty: typed.ty,
                                subject: Idx::BOOLEAN,
                                span,
                            });
                        }
                        let flow = ConditionalFlow::both(typed.flow);
                        let flow = if *negated { flow.not() } else { flow };
                        MatchOutcome { flow, scope: None }
                    }
                    Err(Unresolved) => {
                        self.report(PatternProblem::UnsupportedCondition { span });
                        MatchOutcome::nothing()
                    }
                }
            }
            (
                WhenConditionKind::IsPattern { .. }
                | WhenConditionKind::IsType { .. }
                | WhenConditionKind::InRange { .. },
                None,
            ) => {
                self.report(PatternProblem::ExpectedCondition { span });
                MatchOutcome::nothing()
            }
        }
    }

    #[expect(
        clippy::too_many_arguments,
        reason = "an is-check is a subject, a target and its context"
    )]
    fn match_target(
        &mut self,
        subject: Subject,
        target: &IsTarget,
        negated: bool,
        allow_definition: bool,
        input: &FlowInfo,
        outer: &PatternScope,
        span: Span,
    ) -> MatchOutcome {
        match target {
            IsTarget::Type(ty) => MatchOutcome {
                flow: self.match_type(subject, ty, negated, input, span),
                scope: None,
            },
            IsTarget::Pattern(root) => {
                let mut flags = ResolveFlags::empty();
                flags.set(ResolveFlags::ALLOW_DEFINITION, allow_definition);
                flags.set(ResolveFlags::NEGATED, negated);
                let resolution = self.resolve(*root, subject, input, flags, outer);
                if self.is_useless_pattern(*root) {
                    self.report_useless_is(span, negated);
                }
                let flow = resolution.info.flow;
                MatchOutcome {
                    flow: if negated { flow.not() } else { flow },
                    scope: Some(resolution.scope),
                }
            }
        }
    }

    /// Plain `subject is T`; bare generic types are allowed.
    fn match_type(
        &mut self,
        subject: Subject,
        ty: &TypeRef,
        negated: bool,
        input: &FlowInfo,
        span: Span,
    ) -> ConditionalFlow {
        let mut flags = ResolveFlags::BARE_TYPES;
        flags.set(ResolveFlags::NEGATED, negated);
        let state = ResolveState::new(subject, input.clone(), flags);
        let flow = match self.test_type(ty, &state) {
            Ok(check) => {
                if check.redundant {
                    self.report_useless_is(span, negated);
                }
                check.info.flow
            }
            Err(Unresolved) => {
                self.report(PatternProblem::UnresolvedType {
                    name: ty.name,
                    span: ty.span,
                });
                ConditionalFlow::empty()
            }
        };
        if negated {
            flow.not()
        } else {
            flow
        }
    }

    fn report_useless_is(&mut self, span: Span, negated: bool) {
        if self.config().report_useless_checks {
            self.report(PatternProblem::UselessIsCheck {
                span,
                always: !negated,
            });
        }
    }
}

#[cfg(test)]
mod tests;
