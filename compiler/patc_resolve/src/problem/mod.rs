//! Problems found while resolving patterns.
//!
//! Collected during the pass and converted to diagnostics by the caller.
//! None of them stop resolution.

use patc_diagnostic::{Diagnostic, ErrorCode};
use patc_ir::{Name, Span, StringInterner};
use patc_types::{Idx, Pool};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternProblem {
    /// The whole check succeeds whenever it is reached (`always`) or never
    /// does (negated check).
    UselessIsCheck { span: Span, always: bool },
    /// A type test inside a pattern that cannot fail.
    UselessTypeCheck { span: Span, always: bool },
    /// A tuple whose entries are all `_`.
    UselessDeconstruction { span: Span },
    /// Declaration in a position whose bindings could not be used.
    BindingNotAllowed { name: Name, span: Span },
    NameShadowing {
        name: Name,
        span: Span,
        previous: Span,
    },
    DeconstructorModifierRequired { name: Name, span: Span },
    CannotCheckErased { ty: Idx, span: Span },
    UnresolvedTypeCall { name: Name, span: Span },
    /// `componentN` (1-based) missing on the receiver.
    ComponentMissing { index: u32, receiver: Idx, span: Span },
    PropertyMissing { name: Name, receiver: Idx, span: Span },
    IterationConventionMissing { receiver: Idx, span: Span },
    IncompatibleTypes { ty: Idx, subject: Idx, span: Span },
    UnresolvedType { name: Name, span: Span },
    /// A positional entry after a named one.
    MixedTupleEntries { span: Span },
    NamedEntryInList { span: Span },
    /// A tail entry in a tuple, or not last in a list.
    MisplacedTailEntry { span: Span },
    /// A pattern or range in a `when` without subject.
    ExpectedCondition { span: Span },
    UnsupportedCondition { span: Span },
}

impl PatternProblem {
    pub fn span(&self) -> Span {
        match self {
            PatternProblem::UselessIsCheck { span, .. }
            | PatternProblem::UselessTypeCheck { span, .. }
            | PatternProblem::UselessDeconstruction { span }
            | PatternProblem::BindingNotAllowed { span, .. }
            | PatternProblem::NameShadowing { span, .. }
            | PatternProblem::DeconstructorModifierRequired { span, .. }
            | PatternProblem::CannotCheckErased { span, .. }
            | PatternProblem::UnresolvedTypeCall { span, .. }
            | PatternProblem::ComponentMissing { span, .. }
            | PatternProblem::PropertyMissing { span, .. }
            | PatternProblem::IterationConventionMissing { span, .. }
            | PatternProblem::IncompatibleTypes { span, .. }
            | PatternProblem::UnresolvedType { span, .. }
            | PatternProblem::MixedTupleEntries { span }
            | PatternProblem::NamedEntryInList { span }
            | PatternProblem::MisplacedTailEntry { span }
            | PatternProblem::ExpectedCondition { span }
            | PatternProblem::UnsupportedCondition { span } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PatternProblem::UselessIsCheck { .. } => ErrorCode::W3001,
            PatternProblem::UselessTypeCheck { .. } => ErrorCode::W3002,
            PatternProblem::UselessDeconstruction { .. } => ErrorCode::W3003,
            PatternProblem::NameShadowing { .. } => ErrorCode::W3004,
            PatternProblem::BindingNotAllowed { .. } => ErrorCode::E3001,
            PatternProblem::DeconstructorModifierRequired { .. } => ErrorCode::E3002,
            PatternProblem::CannotCheckErased { .. } => ErrorCode::E3003,
            PatternProblem::UnresolvedTypeCall { .. } => ErrorCode::E3004,
            PatternProblem::ComponentMissing { .. } => ErrorCode::E3005,
            PatternProblem::PropertyMissing { .. } => ErrorCode::E3006,
            PatternProblem::IterationConventionMissing { .. } => ErrorCode::E3007,
            PatternProblem::IncompatibleTypes { .. } => ErrorCode::E3008,
            PatternProblem::UnresolvedType { .. } => ErrorCode::E3009,
            PatternProblem::MixedTupleEntries { .. } => ErrorCode::E3010,
            PatternProblem::NamedEntryInList { .. } => ErrorCode::E3011,
            PatternProblem::MisplacedTailEntry { .. } => ErrorCode::E3012,
            PatternProblem::ExpectedCondition { .. } => ErrorCode::E3013,
            PatternProblem::UnsupportedCondition { .. } => ErrorCode::E3014,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.code().is_warning()
    }

    pub fn into_diagnostic(self, pool: &Pool, interner: &StringInterner) -> Diagnostic {
        let code = self.code();
        let span = self.span();
        let base = if code.is_warning() {
            Diagnostic::warning(code)
        } else {
            Diagnostic::error(code)
        };
        let ty = |idx: Idx| pool.display(idx, interner);
        let name = |n: Name| interner.lookup(n);

        match self {
            PatternProblem::UselessIsCheck { always, .. } => base
                .with_message(format!("check for instance is always '{always}'"))
                .with_label(span, "this check does not narrow anything"),
            PatternProblem::UselessTypeCheck { always, .. } => base
                .with_message(format!("type check is always '{always}'"))
                .with_label(span, "the subject already has this type"),
            PatternProblem::UselessDeconstruction { .. } => base
                .with_message("deconstruction checks and binds nothing")
                .with_label(span, "every entry is `_`")
                .with_suggestion("remove the deconstruction"),
            PatternProblem::BindingNotAllowed { name: n, .. } => base
                .with_message(format!("cannot declare `{}` here", name(n)))
                .with_label(span, "declaration not allowed")
                .with_note(
                    "variables can only be declared in a non-negated `if`, `while` or single-condition `when` check",
                ),
            PatternProblem::NameShadowing {
                name: n, previous, ..
            } => base
                .with_message(format!("name shadowed: {}", name(n)))
                .with_label(span, "shadowing declaration")
                .with_secondary_label(previous, "previously declared here"),
            PatternProblem::DeconstructorModifierRequired { name: n, .. } => base
                .with_message(format!(
                    "'{}' must be marked with 'deconstructor' to be used in a pattern",
                    name(n)
                ))
                .with_label(span, "not a deconstructor")
                .with_suggestion("add the `deconstructor` modifier to the function"),
            PatternProblem::CannotCheckErased { ty: t, .. } => base
                .with_message(format!("cannot check for instance of erased type: {}", ty(t)))
                .with_label(span, "type arguments are not available at runtime"),
            PatternProblem::UnresolvedTypeCall { name: n, .. } => base
                .with_message(format!(
                    "`{}` is neither a deconstructor nor a type",
                    name(n)
                ))
                .with_label(span, "unresolved"),
            PatternProblem::ComponentMissing {
                index, receiver, ..
            } => base
                .with_message(format!(
                    "destructuring declaration initializer of type {} must have a 'component{index}()' function",
                    ty(receiver)
                ))
                .with_label(span, "no component for this entry"),
            PatternProblem::PropertyMissing {
                name: n, receiver, ..
            } => base
                .with_message(format!(
                    "unresolved property `{}` on {}",
                    name(n),
                    ty(receiver)
                ))
                .with_label(span, "no such property"),
            PatternProblem::IterationConventionMissing { receiver, .. } => base
                .with_message(format!(
                    "{} cannot be deconstructed as a list: no 'iterator()' convention",
                    ty(receiver)
                ))
                .with_label(span, "not iterable"),
            PatternProblem::IncompatibleTypes {
                ty: t, subject, ..
            } => base
                .with_message(format!("incompatible types: {} and {}", ty(t), ty(subject)))
                .with_label(span, "this can never match"),
            PatternProblem::UnresolvedType { name: n, .. } => base
                .with_message(format!("unresolved type `{}`", name(n)))
                .with_label(span, "unknown type"),
            PatternProblem::MixedTupleEntries { .. } => base
                .with_message("positional entry after a named entry")
                .with_label(span, "name this entry")
                .with_note("once an entry is named, every later entry must be named"),
            PatternProblem::NamedEntryInList { .. } => base
                .with_message("list entries cannot be named")
                .with_label(span, "named entry"),
            PatternProblem::MisplacedTailEntry { .. } => base
                .with_message("tail entry is only allowed as the last entry of a list")
                .with_label(span, "misplaced tail"),
            PatternProblem::ExpectedCondition { .. } => base
                .with_message("expected condition of type Boolean")
                .with_label(span, "`when` without subject needs a condition"),
            PatternProblem::UnsupportedCondition { .. } => base
                .with_message("unsupported `when` condition")
                .with_label(span, "not supported here"),
        }
    }
}
