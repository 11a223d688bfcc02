//! Boolean conditions as the front end hands them over.
//!
//! [`CondExpr`] is the shape of an `if`/`while`/`&&`/`||`/`!` condition
//! after typing; [`lower_condition`] turns it into a [`BranchValue`].

use patc_stack::ensure_sufficient_stack;

use crate::{BranchValue, CodegenError, Operand, OperandKind, Relation};

#[derive(Clone, Debug, PartialEq)]
pub enum CondExpr {
    Literal(bool),
    /// A `boolean`-typed operand.
    Value(Operand),
    Compare {
        relation: Relation,
        kind: OperandKind,
        left: Operand,
        right: Operand,
    },
    /// `operand == null`, or `!= null` when `negated`.
    IsNull { operand: Operand, negated: bool },
    And(Box<CondExpr>, Box<CondExpr>),
    Or(Box<CondExpr>, Box<CondExpr>),
    Not(Box<CondExpr>),
}

/// Build the branch value for `expr`.
///
/// Negated literals fold to the opposite constant so that loop conditions
/// like `while (!false)` still take the constant path.
pub fn lower_condition(expr: &CondExpr) -> Result<BranchValue, CodegenError> {
    ensure_sufficient_stack(|| match expr {
        CondExpr::Literal(value) => Ok(BranchValue::constant(*value)),
        CondExpr::Value(operand) => Ok(BranchValue::boolean(*operand)),
        CondExpr::Compare {
            relation,
            kind,
            left,
            right,
        } => BranchValue::cmp(*relation, *kind, *left, *right),
        CondExpr::IsNull { operand, negated } => Ok(BranchValue::null_check(*operand, !negated)),
        CondExpr::And(left, right) => Ok(BranchValue::and(
            lower_condition(left)?,
            lower_condition(right)?,
        )),
        CondExpr::Or(left, right) => Ok(BranchValue::or(
            lower_condition(left)?,
            lower_condition(right)?,
        )),
        CondExpr::Not(inner) => {
            let inner = lower_condition(inner)?;
            Ok(match inner.as_constant() {
                Some(value) => BranchValue::constant(!value),
                None => BranchValue::invert(inner),
            })
        }
    })
}
