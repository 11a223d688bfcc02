//! JVM branch and comparison opcodes.

use std::fmt;

/// The opcodes branch lowering emits. Discriminants are the JVM encodings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Lcmp = 148,
    Fcmpl = 149,
    Fcmpg = 150,
    Dcmpl = 151,
    Dcmpg = 152,
    Ifeq = 153,
    Ifne = 154,
    Iflt = 155,
    Ifge = 156,
    Ifgt = 157,
    Ifle = 158,
    IfIcmpeq = 159,
    IfIcmpne = 160,
    IfIcmplt = 161,
    IfIcmpge = 162,
    IfIcmpgt = 163,
    IfIcmple = 164,
    IfAcmpeq = 165,
    IfAcmpne = 166,
    Goto = 167,
    Ifnull = 198,
    Ifnonnull = 199,
}

/// Logical negation pairs. Lookup goes both ways.
const NEGATIONS: [(Opcode, Opcode); 8] = [
    (Opcode::Ifeq, Opcode::Ifne),
    (Opcode::Iflt, Opcode::Ifge),
    (Opcode::Ifgt, Opcode::Ifle),
    (Opcode::IfIcmpeq, Opcode::IfIcmpne),
    (Opcode::IfIcmplt, Opcode::IfIcmpge),
    (Opcode::IfIcmpgt, Opcode::IfIcmple),
    (Opcode::IfAcmpeq, Opcode::IfAcmpne),
    (Opcode::Ifnull, Opcode::Ifnonnull),
];

impl Opcode {
    /// Every conditional jump, in encoding order.
    pub const CONDITIONAL_JUMPS: [Opcode; 16] = [
        Opcode::Ifeq,
        Opcode::Ifne,
        Opcode::Iflt,
        Opcode::Ifge,
        Opcode::Ifgt,
        Opcode::Ifle,
        Opcode::IfIcmpeq,
        Opcode::IfIcmpne,
        Opcode::IfIcmplt,
        Opcode::IfIcmpge,
        Opcode::IfIcmpgt,
        Opcode::IfIcmple,
        Opcode::IfAcmpeq,
        Opcode::IfAcmpne,
        Opcode::Ifnull,
        Opcode::Ifnonnull,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The jump taken exactly when `self` is not, or `None` for opcodes
    /// that do not branch conditionally.
    pub const fn negate(self) -> Option<Opcode> {
        let mut i = 0;
        while i < NEGATIONS.len() {
            let (a, b) = NEGATIONS[i];
            if a as u8 == self as u8 {
                return Some(b);
            }
            if b as u8 == self as u8 {
                return Some(a);
            }
            i += 1;
        }
        None
    }

    #[inline]
    pub const fn is_conditional_jump(self) -> bool {
        self.negate().is_some()
    }

    /// Jumps that test a single `int` against zero.
    pub const fn is_zero_test(self) -> bool {
        matches!(
            self,
            Opcode::Ifeq | Opcode::Ifne | Opcode::Iflt | Opcode::Ifge | Opcode::Ifgt | Opcode::Ifle
        )
    }

    /// Jumps that pop a single operand.
    pub const fn is_unary_jump(self) -> bool {
        self.is_zero_test() || matches!(self, Opcode::Ifnull | Opcode::Ifnonnull)
    }

    /// The two-operand `if_icmp*` form of a zero test.
    pub const fn to_int_compare(self) -> Option<Opcode> {
        match self {
            Opcode::Ifeq => Some(Opcode::IfIcmpeq),
            Opcode::Ifne => Some(Opcode::IfIcmpne),
            Opcode::Iflt => Some(Opcode::IfIcmplt),
            Opcode::Ifge => Some(Opcode::IfIcmpge),
            Opcode::Ifgt => Some(Opcode::IfIcmpgt),
            Opcode::Ifle => Some(Opcode::IfIcmple),
            _ => None,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Lcmp => "lcmp",
            Opcode::Fcmpl => "fcmpl",
            Opcode::Fcmpg => "fcmpg",
            Opcode::Dcmpl => "dcmpl",
            Opcode::Dcmpg => "dcmpg",
            Opcode::Ifeq => "ifeq",
            Opcode::Ifne => "ifne",
            Opcode::Iflt => "iflt",
            Opcode::Ifge => "ifge",
            Opcode::Ifgt => "ifgt",
            Opcode::Ifle => "ifle",
            Opcode::IfIcmpeq => "if_icmpeq",
            Opcode::IfIcmpne => "if_icmpne",
            Opcode::IfIcmplt => "if_icmplt",
            Opcode::IfIcmpge => "if_icmpge",
            Opcode::IfIcmpgt => "if_icmpgt",
            Opcode::IfIcmple => "if_icmple",
            Opcode::IfAcmpeq => "if_acmpeq",
            Opcode::IfAcmpne => "if_acmpne",
            Opcode::Goto => "goto",
            Opcode::Ifnull => "ifnull",
            Opcode::Ifnonnull => "ifnonnull",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
