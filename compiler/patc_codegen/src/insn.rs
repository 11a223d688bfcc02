//! Instruction model at the jump/label level.

use std::fmt;

use patc_ir::ExprId;

use crate::Opcode;

/// A jump target, bound with [`Insn::Label`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u32);

impl Label {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Label(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Computational type of a stack operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Int,
    Boolean,
    Long,
    Float,
    Double,
    Reference,
}

impl OperandKind {
    /// Local-variable slots taken by one value of this kind.
    #[inline]
    pub const fn width(self) -> u16 {
        match self {
            OperandKind::Long | OperandKind::Double => 2,
            _ => 1,
        }
    }

    /// Kinds compared with a zero test or `if_icmp*` directly.
    #[inline]
    pub const fn is_int_like(self) -> bool {
        matches!(self, OperandKind::Int | OperandKind::Boolean)
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperandKind::Int => "int",
            OperandKind::Boolean => "boolean",
            OperandKind::Long => "long",
            OperandKind::Float => "float",
            OperandKind::Double => "double",
            OperandKind::Reference => "reference",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Null,
}

/// Something that can be pushed onto the operand stack.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operand {
    Const(Constant),
    /// A local-variable load.
    Local(u16),
    /// A host expression; its code is generated by the host.
    Expr(ExprId),
}

impl Operand {
    pub const fn int(value: i32) -> Self {
        Operand::Const(Constant::Int(value))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Insn {
    Push { operand: Operand, kind: OperandKind },
    Store { slot: u16, kind: OperandKind },
    /// `lcmp`, `fcmp*` or `dcmp*`.
    Compare(Opcode),
    Jump { opcode: Opcode, target: Label },
    Goto(Label),
    /// An `ifeq` the verifier sees as conditional but whose outcome is
    /// fixed; `always` says whether it is taken.
    FakeIfeq { always: bool, target: Label },
    Label(Label),
}
