//! Resolution of structural patterns.
//!
//! Given a normalized pattern tree and the subject it is matched against,
//! [`PatternResolver`] infers the type seen by every sub-pattern, validates
//! deconstruction calls, binds pattern variables into a [`PatternScope`]
//! and produces the [`ConditionalFlow`] facts the host uses for smart
//! casts on either branch.
//!
//! Resolution never aborts: every failure is recorded as a
//! [`PatternProblem`] and replaced by an error-typed placeholder so the
//! rest of the pattern is still checked.
//!
//! [`PatternScope`]: patc_types::PatternScope
//! [`ConditionalFlow`]: patc_types::ConditionalFlow

mod condition;
mod config;
mod info;
mod problem;
mod resolver;
mod state;

#[cfg(test)]
mod test_helpers;

pub use condition::{
    EntryAnalysis, IsCheck, IsTarget, MatchOutcome, MatchSite, WhenAnalysis, WhenCondition,
    WhenConditionKind, WhenEntry, WhenExpr,
};
pub use config::ResolveConfig;
pub use info::{ConditionalTypeInfo, PatternResolution, PatternTypeTable};
pub use problem::PatternProblem;
pub use resolver::{PatternResolver, ResolveOutput};
pub use state::{ResolveFlags, ResolveState, Subject};
