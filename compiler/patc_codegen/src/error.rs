//! Structural failures while building or lowering branch values.
//!
//! These indicate a front end handing codegen something it should have
//! rejected; they are not user diagnostics.

use patc_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

use crate::{Opcode, OperandKind, Relation};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("cannot compare {kind} operands with `{relation}`")]
    UnsupportedComparison {
        relation: Relation,
        kind: OperandKind,
    },

    #[error("`{opcode}` cannot compare {operands} {kind} operand(s)")]
    OperandMismatch {
        opcode: Opcode,
        kind: OperandKind,
        operands: usize,
    },

    #[error("`{0}` is not a conditional jump")]
    NotConditional(Opcode),

    #[error("temporary slot {found} released while slot {expected} is live")]
    TempOutOfOrder { expected: u16, found: u16 },

    #[error("temporary slot {0} released but no temporary is live")]
    NoLiveTemp(u16),

    #[error("local variable slots exhausted")]
    FrameOverflow,
}

impl CodegenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::UnsupportedComparison { .. }
            | CodegenError::OperandMismatch { .. }
            | CodegenError::NotConditional(_) => ErrorCode::E5001,
            CodegenError::TempOutOfOrder { .. } | CodegenError::NoLiveTemp(_) => ErrorCode::E5002,
            CodegenError::FrameOverflow => ErrorCode::E9001,
        }
    }

    /// Report as an unlocated error; codegen has no source spans.
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}
