//! Reference semantics for `is like`.
//!
//! [`try_match`] walks a normalized pattern against a runtime
//! [`MatchValue`] and returns the variables it binds, or `None` when the
//! value does not match. Type tests, deconstructor calls and expression
//! evaluation are delegated to a [`MatchRuntime`].
//!
//! This pins down what compiled matching code must do; it is not on the
//! compilation path.

mod error;
mod matcher;
mod value;

pub use error::EvalError;
pub use matcher::{try_match, Bindings, MatchRuntime};
pub use value::MatchValue;
