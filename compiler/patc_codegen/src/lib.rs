//! Branch lowering for a stack VM.
//!
//! Boolean-valued computations (comparisons, `&&`, `||`, `!`, and the
//! conjunctions a pattern match expands to) are represented as a
//! [`BranchValue`] tree and lowered by [`BranchCompiler`] into
//! conditional-jump code:
//!
//! ```text
//! CondExpr ──lower_condition──▶ BranchValue ──BranchCompiler──▶ [Insn]
//!                                     │                           │
//!                               CachedTemp ◀── FrameMap (LIFO temp slots)
//! ```
//!
//! Every leaf is evaluated at most once, and evaluation stops as soon as
//! the outcome is known.

mod compiler;
mod condition;
mod error;
mod frame;
mod insn;
mod opcode;
mod value;

#[cfg(test)]
mod interp;

use std::sync::Once;

pub use compiler::BranchCompiler;
pub use condition::{lower_condition, CondExpr};
pub use error::CodegenError;
pub use frame::FrameMap;
pub use insn::{Constant, Insn, Label, Operand, OperandKind};
pub use opcode::Opcode;
pub use value::{BranchValue, CachedBuilder, CachedTemp, Compare, Relation};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only the first call has any
/// effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
