//! Whether a resolved pattern can tell anything apart.
//!
//! Read after resolution: redundancy of type tests comes from the table.

use patc_ir::{Binding, Constraint, Deconstruction, PatternKind, PatternNodeId, Shape};
use patc_types::PatternServices;

use super::PatternResolver;

impl<S: PatternServices + ?Sized> PatternResolver<'_, S> {
    /// The pattern matches every value, binds nothing and has no guard.
    pub(crate) fn is_useless_pattern(&self, root: PatternNodeId) -> bool {
        match self.arena.kind(root) {
            PatternKind::Pattern { entry, guard } => guard.is_none() && self.is_useless_body(*entry),
            _ => false,
        }
    }

    /// A non-empty tuple whose entries are all unnamed `_`.
    pub(super) fn is_all_wildcards(&self, entries: &[PatternNodeId]) -> bool {
        !entries.is_empty() && entries.iter().all(|&entry| self.is_empty_declaration(entry))
    }

    fn is_useless_body(&self, node: PatternNodeId) -> bool {
        match self.arena.kind(node) {
            PatternKind::Entry { body, .. } => self.is_useless_body(*body),
            PatternKind::Declaration {
                binding,
                constraint,
            } => {
                *binding == Binding::Wildcard
                    && match constraint {
                        Some(constraint) => self.is_useless_constraint(*constraint),
                        None => true,
                    }
            }
            PatternKind::Constraint(_) => self.is_useless_constraint(node),
            PatternKind::Pattern { .. } | PatternKind::Guard { .. } => false,
        }
    }

    fn is_useless_constraint(&self, node: PatternNodeId) -> bool {
        match self.arena.kind(node) {
            PatternKind::Constraint(Constraint::Type(_)) => self.table.is_redundant_check(node),
            PatternKind::Constraint(Constraint::Deconstruction(deconstruction)) => {
                let call_useless = deconstruction.type_call.is_none()
                    || (!self.table.is_deconstructor_call(node)
                        && self.table.is_redundant_check(node));
                call_useless && self.is_useless_shape(deconstruction)
            }
            _ => false,
        }
    }

    /// Lists always check a length; empty tuples check nothing.
    fn is_useless_shape(&self, deconstruction: &Deconstruction) -> bool {
        deconstruction.shape == Shape::Tuple
            && deconstruction
                .entries
                .iter()
                .all(|&entry| self.is_empty_declaration(entry))
    }

    /// An unnamed `_` entry. Record-style `x = _` still reads `x`.
    fn is_empty_declaration(&self, entry: PatternNodeId) -> bool {
        let body = match self.arena.kind(entry) {
            PatternKind::Entry { name: Some(_), .. } => return false,
            PatternKind::Entry { body, .. } => *body,
            _ => entry,
        };
        matches!(
            self.arena.kind(body),
            PatternKind::Declaration {
                binding: Binding::Wildcard,
                constraint: None,
            }
        )
    }
}
