//! Typed deconstructions: `TypeCall? (entries)` and `TypeCall? [entries]`.

use patc_ir::{Deconstruction, Name, PatternKind, PatternNodeId, Shape, TypeCall};
use patc_types::{AccessorRequest, FlowInfo, FlowValue, Idx, PatternServices, Unresolved};
use tracing::{trace, warn};

use super::PatternResolver;
use crate::{ConditionalTypeInfo, PatternProblem, ResolveState, Subject};

impl<S: PatternServices + ?Sized> PatternResolver<'_, S> {
    pub(super) fn resolve_deconstruction(
        &mut self,
        id: PatternNodeId,
        deconstruction: &Deconstruction,
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        let (info, subject) = match &deconstruction.type_call {
            Some(call) => self.resolve_type_call(id, call, state),
            None => (ConditionalTypeInfo::empty(state.subject.ty), state.subject),
        };
        let inner = state
            .with_subject(subject)
            .with_flow(state.flow.and(info.then_info()))
            .with_bare_types(false);

        self.enter_scope();
        let entries = match deconstruction.shape {
            Shape::Tuple => self.resolve_tuple(&deconstruction.entries, &inner),
            Shape::List => self.resolve_list(&deconstruction.entries, &inner),
        };
        self.leave_scope();

        if self.config.report_useless_checks
            && deconstruction.shape == Shape::Tuple
            && self.is_all_wildcards(&deconstruction.entries)
        {
            self.report(PatternProblem::UselessDeconstruction {
                span: self.arena.span(id),
            });
        }
        info.and(&entries)
    }

    /// Resolve `Name` in `Name(...)`: a deconstructor function on the
    /// subject first, a type to test against otherwise.
    ///
    /// A deconstructor produces a new subject (its result); a type keeps the
    /// subject and narrows it.
    fn resolve_type_call(
        &mut self,
        id: PatternNodeId,
        call: &TypeCall,
        state: &ResolveState,
    ) -> (ConditionalTypeInfo, Subject) {
        let subject = state.subject;
        if subject.ty.is_error() {
            return (ConditionalTypeInfo::empty(Idx::ERROR), subject);
        }

        let request = AccessorRequest::Deconstructor(call);
        if let Ok(accessor) = self.services.resolve_accessor(subject.ty, request) {
            if !accessor.is_deconstructor {
                self.report(PatternProblem::DeconstructorModifierRequired {
                    name: call.name,
                    span: call.span,
                });
            }
            let services = self.services;
            let pool = services.pool();
            let result = pool.make_not_null(accessor.return_type);
            let value = FlowValue::Node(id);
            let mut then_info = FlowInfo::empty();
            if pool.is_nullable(accessor.return_type) {
                self.table.null_checks.insert(id);
                then_info = then_info.establish(value, result);
            }
            self.table.deconstructor_calls.insert(id);
            trace!(node = id.raw(), ty = ?result, "deconstructor call");
            return (
                ConditionalTypeInfo::on_success(subject.ty, then_info),
                Subject::new(value, result, call.span),
            );
        }

        match self.check_type_for_is(id, &call.to_type_ref(), &state.with_bare_types(false)) {
            Ok(info) => {
                let narrowed = subject.with_type(info.ty);
                (info, narrowed)
            }
            Err(Unresolved) => {
                warn!(node = id.raw(), "unresolved type call");
                self.report(PatternProblem::UnresolvedTypeCall {
                    name: call.name,
                    span: call.span,
                });
                (
                    ConditionalTypeInfo::empty(Idx::ERROR),
                    subject.with_type(Idx::ERROR),
                )
            }
        }
    }

    /// `(a, b)` / `(x = a, y = b)`: positional entries read `componentN()`,
    /// named entries read the property. Once an entry is named, every later
    /// entry must be.
    fn resolve_tuple(
        &mut self,
        entries: &[PatternNodeId],
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        let receiver = state.subject.ty;
        let mut result = ConditionalTypeInfo::empty(receiver);
        let mut seen_named = false;

        for (position, &entry) in (1u32..).zip(entries) {
            let (name, tail) = self.entry_header(entry);
            let span = self.arena.span(entry);
            if tail {
                self.report(PatternProblem::MisplacedTailEntry { span });
            }

            let ty = match name {
                Some(name) => {
                    seen_named = true;
                    self.accessor_type(receiver, AccessorRequest::Property(name))
                        .unwrap_or_else(|Unresolved| {
                            warn!(entry = entry.raw(), "property accessor unresolved");
                            self.report(PatternProblem::PropertyMissing {
                                name,
                                receiver,
                                span,
                            });
                            Idx::ERROR
                        })
                }
                None => {
                    if seen_named {
                        self.report(PatternProblem::MixedTupleEntries { span });
                    }
                    self.accessor_type(receiver, AccessorRequest::Component(position))
                        .unwrap_or_else(|Unresolved| {
                            warn!(entry = entry.raw(), position, "component accessor unresolved");
                            self.report(PatternProblem::ComponentMissing {
                                index: position,
                                receiver,
                                span,
                            });
                            Idx::ERROR
                        })
                }
            };

            let entry_state = state.with_subject(Subject::new(FlowValue::Node(entry), ty, span));
            let info = self.resolve_node(entry, &entry_state);
            result = result.and(&info);
        }
        result
    }

    /// `[a, b, *rest]`: entries see the element type, the tail sees the
    /// iterator type.
    fn resolve_list(
        &mut self,
        entries: &[PatternNodeId],
        state: &ResolveState,
    ) -> ConditionalTypeInfo {
        let receiver = state.subject.ty;
        let convention = if receiver.is_error() {
            None
        } else {
            self.services.resolve_iteration(receiver).ok()
        };
        let (iterator, element) = match convention {
            Some(convention) => (convention.iterator, convention.element),
            None => {
                if !receiver.is_error() {
                    warn!(?receiver, "no iteration convention");
                    self.report(PatternProblem::IterationConventionMissing {
                        receiver,
                        span: state.subject.span,
                    });
                }
                (Idx::ERROR, Idx::ERROR)
            }
        };

        let mut result = ConditionalTypeInfo::empty(receiver);
        let mut seen_tail = false;
        for (index, &entry) in entries.iter().enumerate() {
            let (name, tail) = self.entry_header(entry);
            let span = self.arena.span(entry);
            if name.is_some() {
                self.report(PatternProblem::NamedEntryInList { span });
            }
            if tail && (seen_tail || index + 1 != entries.len()) {
                self.report(PatternProblem::MisplacedTailEntry { span });
            }
            seen_tail |= tail;

            let ty = if tail { iterator } else { element };
            let entry_state = state.with_subject(Subject::new(FlowValue::Node(entry), ty, span));
            let info = self.resolve_node(entry, &entry_state);
            result = result.and(&info);
        }
        result
    }

    fn accessor_type(
        &self,
        receiver: Idx,
        request: AccessorRequest<'_>,
    ) -> Result<Idx, Unresolved> {
        if receiver.is_error() {
            return Ok(Idx::ERROR);
        }
        self.services
            .resolve_accessor(receiver, request)
            .map(|accessor| accessor.return_type)
    }

    /// Record-style name and tail marker of an entry node.
    fn entry_header(&self, entry: PatternNodeId) -> (Option<Name>, bool) {
        match self.arena.kind(entry) {
            PatternKind::Entry { name, tail, .. } => (*name, *tail),
            _ => (None, false),
        }
    }
}
