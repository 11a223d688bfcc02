//! Branch value trees.
//!
//! A [`BranchValue`] is a boolean computation in a form that can be lowered
//! straight to jumps. Leaves are comparisons and constants; interior nodes
//! are the short-circuit connectives, negation, and [`CachedTemp`], which
//! evaluates an operand once into a temporary and builds its body against
//! loads of that temporary.

use std::fmt;

use crate::{CodegenError, Opcode, Operand, OperandKind};

/// A source-level comparison operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `===`
    Identity,
    /// `!==`
    NotIdentity,
}

impl Relation {
    pub const fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "==",
            Relation::NotEq => "!=",
            Relation::Lt => "<",
            Relation::LtEq => "<=",
            Relation::Gt => ">",
            Relation::GtEq => ">=",
            Relation::Identity => "===",
            Relation::NotIdentity => "!==",
        }
    }

    /// The jump taken when a numeric comparison is false.
    const fn number_opcode(self) -> Opcode {
        match self {
            Relation::Eq | Relation::Identity => Opcode::Ifne,
            Relation::NotEq | Relation::NotIdentity => Opcode::Ifeq,
            Relation::Gt => Opcode::Ifle,
            Relation::GtEq => Opcode::Iflt,
            Relation::Lt => Opcode::Ifge,
            Relation::LtEq => Opcode::Ifgt,
        }
    }

    /// The jump taken when a reference comparison is false.
    const fn object_opcode(self) -> Option<Opcode> {
        match self {
            Relation::Identity => Some(Opcode::IfAcmpne),
            Relation::NotIdentity => Some(Opcode::IfAcmpeq),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A comparison leaf.
///
/// `opcode` is the jump taken when the comparison is *false*; its
/// [negation](Opcode::negate) is taken when it is true. For `int` and
/// `boolean` operand pairs it is stored in zero-test form and widened to
/// `if_icmp*` at emission; `long`, `float` and `double` pairs get an
/// ordering compare first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Compare {
    opcode: Opcode,
    kind: OperandKind,
    left: Operand,
    right: Option<Operand>,
}

impl Compare {
    /// Check that `opcode` fits `kind` and the operand count.
    pub fn new(
        opcode: Opcode,
        kind: OperandKind,
        left: Operand,
        right: Option<Operand>,
    ) -> Result<Self, CodegenError> {
        if !opcode.is_conditional_jump() {
            return Err(CodegenError::NotConditional(opcode));
        }
        let binary = right.is_some();
        let fits = match opcode {
            Opcode::Ifnull | Opcode::Ifnonnull => kind == OperandKind::Reference && !binary,
            Opcode::IfAcmpeq | Opcode::IfAcmpne => kind == OperandKind::Reference && binary,
            // Zero tests against a single operand only exist for ints;
            // wide and floating kinds compare two values.
            op if op.is_zero_test() => match kind {
                OperandKind::Int | OperandKind::Boolean => true,
                OperandKind::Long | OperandKind::Float | OperandKind::Double => binary,
                OperandKind::Reference => false,
            },
            // `if_icmp*` is produced at emission, never stored.
            _ => false,
        };
        if !fits {
            return Err(CodegenError::OperandMismatch {
                opcode,
                kind,
                operands: 1 + usize::from(binary),
            });
        }
        Ok(Compare {
            opcode,
            kind,
            left,
            right,
        })
    }

    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    #[inline]
    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    #[inline]
    pub fn left(&self) -> Operand {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<Operand> {
        self.right
    }
}

/// Builds the body of a [`CachedTemp`] from a load of the temporary.
pub type CachedBuilder = Box<dyn FnOnce(Operand) -> Result<BranchValue, CodegenError>>;

pub struct CachedTemp {
    kind: OperandKind,
    value: Operand,
    builder: CachedBuilder,
}

impl CachedTemp {
    #[inline]
    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> Operand {
        self.value
    }

    pub(crate) fn into_parts(self) -> (OperandKind, Operand, CachedBuilder) {
        (self.kind, self.value, self.builder)
    }
}

impl fmt::Debug for CachedTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedTemp")
            .field("kind", &self.kind)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum BranchValue {
    Compare(Compare),
    And(Box<BranchValue>, Box<BranchValue>),
    Or(Box<BranchValue>, Box<BranchValue>),
    Not(Box<BranchValue>),
    CachedTemp(CachedTemp),
    Constant(bool),
}

impl BranchValue {
    pub const TRUE: BranchValue = BranchValue::Constant(true);
    pub const FALSE: BranchValue = BranchValue::Constant(false);

    #[inline]
    pub fn constant(value: bool) -> Self {
        if value {
            BranchValue::TRUE
        } else {
            BranchValue::FALSE
        }
    }

    /// `left <relation> right` for two operands of `kind`.
    ///
    /// References only support identity comparisons; value equality on
    /// objects is a method call and never reaches here.
    pub fn cmp(
        relation: Relation,
        kind: OperandKind,
        left: Operand,
        right: Operand,
    ) -> Result<Self, CodegenError> {
        let opcode = if kind == OperandKind::Reference {
            relation
                .object_opcode()
                .ok_or(CodegenError::UnsupportedComparison { relation, kind })?
        } else {
            relation.number_opcode()
        };
        Compare::new(opcode, kind, left, Some(right)).map(BranchValue::Compare)
    }

    /// `operand == null` (or `!= null` when `is_null` is false).
    pub fn null_check(operand: Operand, is_null: bool) -> Self {
        let opcode = if is_null {
            Opcode::Ifnonnull
        } else {
            Opcode::Ifnull
        };
        BranchValue::Compare(Compare {
            opcode,
            kind: OperandKind::Reference,
            left: operand,
            right: None,
        })
    }

    /// A `boolean` operand used directly as a condition.
    pub fn boolean(operand: Operand) -> Self {
        BranchValue::Compare(Compare {
            opcode: Opcode::Ifeq,
            kind: OperandKind::Boolean,
            left: operand,
            right: None,
        })
    }

    pub fn and(left: BranchValue, right: BranchValue) -> Self {
        BranchValue::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: BranchValue, right: BranchValue) -> Self {
        BranchValue::Or(Box::new(left), Box::new(right))
    }

    pub fn invert(inner: BranchValue) -> Self {
        BranchValue::Not(Box::new(inner))
    }

    /// Evaluate `value` once into a temporary and build the rest of the
    /// condition against loads of it.
    pub fn cached(
        kind: OperandKind,
        value: Operand,
        builder: impl FnOnce(Operand) -> Result<BranchValue, CodegenError> + 'static,
    ) -> Self {
        BranchValue::CachedTemp(CachedTemp {
            kind,
            value,
            builder: Box::new(builder),
        })
    }

    /// [`cached`](Self::cached) when `cache` holds; otherwise `builder`
    /// runs right away against `value` itself.
    pub fn cached_if(
        cache: bool,
        kind: OperandKind,
        value: Operand,
        builder: impl FnOnce(Operand) -> Result<BranchValue, CodegenError> + 'static,
    ) -> Result<Self, CodegenError> {
        if cache {
            Ok(BranchValue::cached(kind, value, builder))
        } else {
            builder(value)
        }
    }

    /// `Some(b)` for a constant.
    pub fn as_constant(&self) -> Option<bool> {
        match self {
            BranchValue::Constant(value) => Some(*value),
            _ => None,
        }
    }
}
