//! Diagnostics for pattern resolution and branch lowering.
//!
//! Semantic passes collect their own problem enums and convert them into
//! [`Diagnostic`]s at the boundary; the [`DiagnosticQueue`] dedups, limits
//! and orders them by source position.

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
