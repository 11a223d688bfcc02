//! The pattern resolution pass.
//!
//! One [`PatternResolver`] serves one body: every `is like` check and `when`
//! condition in it goes through the same resolver, which owns the memo
//! cache, the per-node results and the collected problems.
//!
//! # Walk
//!
//! ```text
//! resolve(root, subject)
//! └── Pattern ── Entry ── Declaration ── Constraint
//!       │                                  ├── Type           (type test)
//!       │                                  ├── Expression     (equality)
//!       │                                  └── Deconstruction (type call, then
//!       │                                        Tuple / List entries, recursively)
//!       └── Guard (sees the entry's success facts and every binding)
//! ```
//!
//! Each node yields a [`ConditionalTypeInfo`]; parents AND-combine the
//! results of their children. Bindings go into the resolver's current
//! [`PatternScope`] frame; deconstructions open a child frame and lift its
//! bindings back when they are done.

mod constraint;
mod deconstruct;
mod usefulness;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use patc_diagnostic::{Diagnostic, DiagnosticQueue};
use patc_ir::{Binding, Constraint, PatternArena, PatternKind, PatternNodeId};
use patc_stack::ensure_sufficient_stack;
use patc_types::{
    ExprContext, FlowInfo, FlowValue, Idx, PatternScope, PatternServices, ScopeBinding, VarId,
};

use crate::{
    ConditionalTypeInfo, PatternProblem, PatternResolution, PatternTypeTable, ResolveConfig,
    ResolveFlags, ResolveState, Subject,
};

/// Everything a finished pass produced.
#[derive(Clone, Debug)]
pub struct ResolveOutput {
    pub table: PatternTypeTable,
    /// In the order they were found; each at most once.
    pub problems: Vec<PatternProblem>,
}

pub struct PatternResolver<'a, S: PatternServices + ?Sized> {
    arena: &'a PatternArena,
    services: &'a S,
    config: ResolveConfig,
    /// Innermost frame of the pattern currently being resolved.
    scope: PatternScope,
    /// Whole-pattern results, keyed by root node.
    roots: FxHashMap<PatternNodeId, PatternResolution>,
    table: PatternTypeTable,
    problems: Vec<PatternProblem>,
    reported: FxHashSet<PatternProblem>,
    next_var: u32,
}

impl<'a, S: PatternServices + ?Sized> PatternResolver<'a, S> {
    pub fn new(arena: &'a PatternArena, services: &'a S) -> Self {
        Self::with_config(arena, services, ResolveConfig::default())
    }

    pub fn with_config(arena: &'a PatternArena, services: &'a S, config: ResolveConfig) -> Self {
        PatternResolver {
            arena,
            services,
            config,
            scope: PatternScope::new(),
            roots: FxHashMap::default(),
            table: PatternTypeTable::default(),
            problems: Vec::new(),
            reported: FxHashSet::default(),
            next_var: 0,
        }
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    pub fn arena(&self) -> &'a PatternArena {
        self.arena
    }

    pub fn services(&self) -> &'a S {
        self.services
    }

    pub fn table(&self) -> &PatternTypeTable {
        &self.table
    }

    pub fn problems(&self) -> &[PatternProblem] {
        &self.problems
    }

    /// Resolve the pattern rooted at `root` against `subject`.
    ///
    /// `flags` carries `ALLOW_DEFINITION` and `NEGATED`; bare generic types
    /// are always allowed at the top level. The returned scope is a child of
    /// `outer` holding every variable the pattern declared.
    ///
    /// Resolving the same root twice returns the first result and reports
    /// nothing new.
    pub fn resolve(
        &mut self,
        root: PatternNodeId,
        subject: Subject,
        input: &FlowInfo,
        flags: ResolveFlags,
        outer: &PatternScope,
    ) -> PatternResolution {
        if let Some(done) = self.roots.get(&root) {
            debug!(root = root.raw(), "pattern resolution cache hit");
            return done.clone();
        }
        debug!(
            root = root.raw(),
            subject = ?subject.value,
            ty = ?subject.ty,
            ?flags,
            "resolving pattern"
        );

        let state = ResolveState::new(
            subject,
            input.clone(),
            flags | ResolveFlags::BARE_TYPES,
        );
        let saved = std::mem::replace(&mut self.scope, outer.child());
        let info = self.resolve_node(root, &state);
        let scope = std::mem::replace(&mut self.scope, saved);

        let resolution = PatternResolution { info, scope };
        self.roots.insert(root, resolution.clone());
        debug!(
            root = root.raw(),
            then_facts = resolution.info.flow.then_info.len(),
            else_facts = resolution.info.flow.else_info.len(),
            bindings = resolution.scope.local_bindings().len(),
            "pattern resolved"
        );
        resolution
    }

    /// Finish the pass.
    pub fn into_results(self) -> ResolveOutput {
        ResolveOutput {
            table: self.table,
            problems: self.problems,
        }
    }

    /// Problems found so far, rendered.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.problems
            .iter()
            .map(|p| p.into_diagnostic(self.services.pool(), self.services.interner()))
            .collect()
    }

    pub fn report_into(&self, queue: &mut DiagnosticQueue) {
        queue.extend(self.diagnostics());
    }

    // ── Dispatch ──

    pub(crate) fn resolve_node(
        &mut self,
        id: PatternNodeId,
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        if let Some(info) = self.table.infos.get(&id) {
            trace!(node = id.raw(), "node cache hit");
            return info.clone();
        }
        let info = ensure_sufficient_stack(|| self.resolve_uncached(id, state));
        trace!(node = id.raw(), ty = ?info.ty, "node resolved");
        self.table.infos.insert(id, info.clone());
        info
    }

    fn resolve_uncached(&mut self, id: PatternNodeId, state: &ResolveState) -> ConditionalTypeInfo {
        let arena = self.arena;
        match arena.kind(id) {
            PatternKind::Pattern { entry, guard } => {
                let info = self.resolve_node(*entry, state);
                let Some(guard) = guard else {
                    return info;
                };
                let guard_state = state.with_flow(state.flow.and(info.then_info()));
                let checked = self.resolve_node(*guard, &guard_state);
                info.and(&checked)
            }
            PatternKind::Guard { expr } => {
                let cx = self.expr_context(&state.flow, Some(Idx::BOOLEAN));
                let flow = self.services.check_condition(*expr, &cx);
                ConditionalTypeInfo {
                    ty: Idx::BOOLEAN,
                    flow,
                }
            }
            // Names and tail markers belong to the enclosing deconstruction.
            PatternKind::Entry { body, .. } => self.resolve_node(*body, state),
            PatternKind::Declaration {
                binding,
                constraint,
            } => self.resolve_declaration(id, *binding, *constraint, state),
            PatternKind::Constraint(Constraint::Type(ty)) => {
                self.resolve_type_constraint(id, ty, state)
            }
            PatternKind::Constraint(Constraint::Expression { expr, .. }) => {
                self.resolve_expression_constraint(id, *expr, state)
            }
            PatternKind::Constraint(Constraint::Deconstruction(deconstruction)) => {
                self.resolve_deconstruction(id, deconstruction, state)
            }
        }
    }

    fn resolve_declaration(
        &mut self,
        id: PatternNodeId,
        binding: Binding,
        constraint: Option<PatternNodeId>,
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        let info = match constraint {
            Some(constraint) => self.resolve_node(constraint, state),
            None => ConditionalTypeInfo::empty(state.subject.ty),
        };
        let Binding::Named(name) = binding else {
            return info;
        };

        let span = self.arena.span(id);
        if !state.allows_definition() {
            self.report(PatternProblem::BindingNotAllowed { name, span });
            return info;
        }
        if self.config.report_shadowing {
            if let Some(previous) = self.scope.lookup(name) {
                self.report(PatternProblem::NameShadowing {
                    name,
                    span,
                    previous: previous.span,
                });
            }
        }

        let var = self.fresh_var();
        self.scope.bind(ScopeBinding {
            name,
            ty: info.ty,
            var,
            span,
        });
        self.table.bindings.insert(id, var);

        let alias = FlowInfo::empty().equate(FlowValue::Var(var), state.subject.value, true);
        info.and(&ConditionalTypeInfo::on_success(info.ty, alias))
    }

    // ── Helpers ──

    /// Context for typing an embedded expression: the given facts and every
    /// name bound so far.
    pub(crate) fn expr_context(&self, flow: &FlowInfo, expected: Option<Idx>) -> ExprContext {
        ExprContext {
            flow: flow.clone(),
            scope: self.scope.clone(),
            expected,
        }
    }

    pub(crate) fn enter_scope(&mut self) {
        self.scope = self.scope.child();
    }

    pub(crate) fn leave_scope(&mut self) {
        let scope = std::mem::take(&mut self.scope);
        self.scope = scope.lift_into_parent();
    }

    /// Replace the current frame, returning the old one.
    pub(crate) fn swap_scope(&mut self, scope: PatternScope) -> PatternScope {
        std::mem::replace(&mut self.scope, scope)
    }

    fn fresh_var(&mut self) -> VarId {
        let var = VarId::from_raw(self.next_var);
        self.next_var += 1;
        var
    }

    /// Record a problem unless the same one was already recorded.
    pub(crate) fn report(&mut self, problem: PatternProblem) {
        if self.reported.insert(problem) {
            trace!(?problem, "pattern problem");
            self.problems.push(problem);
        }
    }
}
