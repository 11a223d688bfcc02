//! Matching a value against a normalized pattern.
//!
//! - tuples read `componentN()` by position (1-based) or a property for
//!   record-style `name = ...` entries; extra components are ignored
//! - lists match element-wise; without a tail entry the length must be
//!   exact, with one the tail matches the remaining elements as a list
//! - a typed deconstruction first applies its type call, which may reject
//!   the value (failed type test, deconstructor returning null)
//! - the guard runs last and sees every binding

use patc_ir::{
    Constraint, Deconstruction, ExprId, Name, PatternArena, PatternKind, PatternNodeId, Shape,
    StringInterner, TypeCall, TypeRef,
};
use patc_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::{EvalError, MatchValue};

/// Variables bound by a successful match, in binding order.
pub type Bindings = Vec<(Name, MatchValue)>;

/// What the matcher needs from the running program.
pub trait MatchRuntime {
    fn interner(&self) -> &StringInterner;

    /// `value is ty`.
    fn is_instance(&self, value: &MatchValue, ty: &TypeRef) -> bool;

    /// Apply the type call of `Name(...)` to `value`: a deconstructor call or
    /// a type test. `None` when the value is rejected.
    fn apply_type_call(
        &mut self,
        call: &TypeCall,
        value: &MatchValue,
    ) -> Result<Option<MatchValue>, EvalError>;

    /// Evaluate an expression constraint or guard with the bindings made so
    /// far in scope.
    fn evaluate(&mut self, expr: ExprId, bindings: &Bindings) -> Result<MatchValue, EvalError>;
}

/// Match `value` against the pattern rooted at `root`.
pub fn try_match<R: MatchRuntime + ?Sized>(
    arena: &PatternArena,
    root: PatternNodeId,
    value: &MatchValue,
    runtime: &mut R,
) -> Result<Option<Bindings>, EvalError> {
    let mut matcher = Matcher {
        arena,
        runtime,
        bindings: Vec::new(),
    };
    let matched = matcher.match_node(root, value)?;
    debug!(root = root.raw(), matched, bindings = matcher.bindings.len(), "try match");
    Ok(matched.then_some(matcher.bindings))
}

struct Matcher<'a, R: ?Sized> {
    arena: &'a PatternArena,
    runtime: &'a mut R,
    bindings: Bindings,
}

impl<R: MatchRuntime + ?Sized> Matcher<'_, R> {
    fn match_node(&mut self, id: PatternNodeId, value: &MatchValue) -> Result<bool, EvalError> {
        ensure_sufficient_stack(|| {
            let matched = self.match_kind(id, value)?;
            trace!(node = id.raw(), matched, "match node");
            Ok(matched)
        })
    }

    fn match_kind(&mut self, id: PatternNodeId, value: &MatchValue) -> Result<bool, EvalError> {
        let arena = self.arena;
        match arena.kind(id) {
            PatternKind::Pattern { entry, guard } => {
                if !self.match_node(*entry, value)? {
                    return Ok(false);
                }
                match guard {
                    Some(guard) => self.match_node(*guard, value),
                    None => Ok(true),
                }
            }
            PatternKind::Guard { expr } => match self.runtime.evaluate(*expr, &self.bindings)? {
                MatchValue::Bool(passed) => Ok(passed),
                _ => Err(EvalError::GuardNotBoolean(arena.span(id))),
            },
            PatternKind::Entry { body, .. } => self.match_node(*body, value),
            PatternKind::Declaration {
                binding,
                constraint,
            } => {
                if let Some(constraint) = constraint {
                    if !self.match_node(*constraint, value)? {
                        return Ok(false);
                    }
                }
                if let Some(name) = binding.name() {
                    self.bindings.push((name, value.clone()));
                }
                Ok(true)
            }
            PatternKind::Constraint(Constraint::Type(ty)) => {
                Ok(self.runtime.is_instance(value, ty))
            }
            PatternKind::Constraint(Constraint::Expression { expr, .. }) => {
                Ok(self.runtime.evaluate(*expr, &self.bindings)? == *value)
            }
            PatternKind::Constraint(Constraint::Deconstruction(deconstruction)) => {
                self.match_deconstruction(deconstruction, value)
            }
        }
    }

    fn match_deconstruction(
        &mut self,
        deconstruction: &Deconstruction,
        value: &MatchValue,
    ) -> Result<bool, EvalError> {
        let subject = match &deconstruction.type_call {
            Some(call) => match self.runtime.apply_type_call(call, value)? {
                Some(subject) => subject,
                None => return Ok(false),
            },
            None => value.clone(),
        };
        match deconstruction.shape {
            Shape::Tuple => self.match_tuple(&deconstruction.entries, &subject),
            Shape::List => self.match_list(&deconstruction.entries, &subject),
        }
    }

    fn match_tuple(
        &mut self,
        entries: &[PatternNodeId],
        subject: &MatchValue,
    ) -> Result<bool, EvalError> {
        if !matches!(subject, MatchValue::Object { .. }) {
            return Ok(false);
        }
        for (position, &entry) in (1usize..).zip(entries) {
            let (name, tail, body) = self.entry(entry)?;
            let span = self.arena.span(entry);
            if tail {
                return Err(EvalError::MisplacedTail(span));
            }
            let item = match name {
                Some(name) => subject.property(name).ok_or_else(|| EvalError::MissingProperty {
                    name: self.runtime.interner().lookup(name).to_owned(),
                    span,
                })?,
                None => subject
                    .component(position)
                    .ok_or(EvalError::MissingComponent {
                        index: position,
                        span,
                    })?,
            };
            if !self.match_node(body, item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn match_list(
        &mut self,
        entries: &[PatternNodeId],
        subject: &MatchValue,
    ) -> Result<bool, EvalError> {
        let Some(items) = subject.iter_items() else {
            return Ok(false);
        };
        let mut heads = Vec::with_capacity(entries.len());
        let mut tail = None;
        for &entry in entries {
            let (_, is_tail, body) = self.entry(entry)?;
            // Only the last entry may be a tail.
            if let Some((tail_entry, _)) = tail {
                return Err(EvalError::MisplacedTail(self.arena.span(tail_entry)));
            }
            if is_tail {
                tail = Some((entry, body));
            } else {
                heads.push(body);
            }
        }

        let fits = match tail {
            Some(_) => items.len() >= heads.len(),
            None => items.len() == heads.len(),
        };
        if !fits {
            return Ok(false);
        }
        for (&body, item) in heads.iter().zip(items) {
            if !self.match_node(body, item)? {
                return Ok(false);
            }
        }
        match tail {
            Some((_, body)) => {
                let rest = MatchValue::list(items[heads.len()..].iter().cloned());
                self.match_node(body, &rest)
            }
            None => Ok(true),
        }
    }

    fn entry(&self, id: PatternNodeId) -> Result<(Option<Name>, bool, PatternNodeId), EvalError> {
        match self.arena.kind(id) {
            PatternKind::Entry { name, tail, body } => Ok((*name, *tail, *body)),
            _ => Err(EvalError::Malformed(self.arena.span(id))),
        }
    }
}
