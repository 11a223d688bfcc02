use patc_ir::Span;
use thiserror::Error;

/// Failures that stop a match outright. A value that simply does not match
/// is `Ok(None)`, never an error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("guard at {0} did not produce a boolean")]
    GuardNotBoolean(Span),

    #[error("tail entry at {0} is not the last entry of a list")]
    MisplacedTail(Span),

    #[error("no `component{index}()` on the value matched at {span}")]
    MissingComponent { index: usize, span: Span },

    #[error("no property `{name}` on the value matched at {span}")]
    MissingProperty { name: String, span: Span },

    #[error("malformed pattern node at {0}")]
    Malformed(Span),

    #[error("{0}")]
    Host(String),
}
