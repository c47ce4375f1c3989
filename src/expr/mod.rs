//! Scalar expressions over the output fields of a multi join.
//!
//! Fields are referenced by their global ordinal in the multi join's row, i.e. field `k` of the
//! `i`th input is `InputRef(join_start(i) + k)`.

mod utils;
pub use utils::*;

use std::fmt::{Display, Formatter};

use enum_as_inner::EnumAsInner;
use enumset::{enum_set, EnumSet, EnumSetType};
use itertools::Itertools;
use strum_macros::EnumIter;

/// Operators that compare two operands.
pub const COMPARISON_OPERATORS: EnumSet<ScalarOperator> = enum_set!(
    ScalarOperator::Eq
        | ScalarOperator::NotEq
        | ScalarOperator::Lt
        | ScalarOperator::LtEq
        | ScalarOperator::Gt
        | ScalarOperator::GtEq
);

#[derive(EnumSetType, Debug, Hash, EnumIter, strum_macros::Display)]
pub enum ScalarOperator {
    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "<>")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    LtEq,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    GtEq,
    #[strum(serialize = "AND")]
    And,
    #[strum(serialize = "OR")]
    Or,
    #[strum(serialize = "NOT")]
    Not,
    #[strum(serialize = "IS NULL")]
    IsNull,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

impl ScalarOperator {
    pub fn is_comparison(self) -> bool {
        COMPARISON_OPERATORS.contains(self)
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, derive_more::Display)]
pub enum ScalarValue {
    #[display(fmt = "NULL")]
    Null,
    #[display(fmt = "{}", _0)]
    Boolean(bool),
    #[display(fmt = "{}", _0)]
    Int64(i64),
    #[display(fmt = "'{}'", _0)]
    Utf8(String),
}

/// Operator applied to a list of operands.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ScalarCall {
    op: ScalarOperator,
    operands: Vec<ScalarExpr>,
}

impl ScalarCall {
    pub fn new(op: ScalarOperator, operands: Vec<ScalarExpr>) -> Self {
        Self { op, operands }
    }

    pub fn op(&self) -> ScalarOperator {
        self.op
    }

    pub fn operands(&self) -> &[ScalarExpr] {
        &self.operands
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner)]
pub enum ScalarExpr {
    /// Reference to a field of the multi join row by global ordinal.
    InputRef(usize),
    Literal(ScalarValue),
    Call(ScalarCall),
}

/// Creates a reference to the field with global ordinal `field`.
pub fn col(field: usize) -> ScalarExpr {
    ScalarExpr::InputRef(field)
}

pub fn lit<V: Into<ScalarValue>>(value: V) -> ScalarExpr {
    ScalarExpr::Literal(value.into())
}

pub fn and(left: ScalarExpr, right: ScalarExpr) -> ScalarExpr {
    left.binary(ScalarOperator::And, right)
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Boolean(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int64(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Utf8(v.to_string())
    }
}

impl ScalarExpr {
    pub fn call(op: ScalarOperator, operands: Vec<ScalarExpr>) -> Self {
        ScalarExpr::Call(ScalarCall::new(op, operands))
    }

    fn binary(self, op: ScalarOperator, other: ScalarExpr) -> Self {
        Self::call(op, vec![self, other])
    }

    pub fn eq(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::Eq, other)
    }

    pub fn not_eq(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::NotEq, other)
    }

    pub fn lt(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::Lt, other)
    }

    pub fn lt_eq(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::LtEq, other)
    }

    pub fn gt(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::Gt, other)
    }

    pub fn gt_eq(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::GtEq, other)
    }

    pub fn and(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::And, other)
    }

    pub fn or(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::Or, other)
    }

    pub fn plus(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::Plus, other)
    }

    pub fn minus(self, other: ScalarExpr) -> Self {
        self.binary(ScalarOperator::Minus, other)
    }

    pub fn not(self) -> Self {
        Self::call(ScalarOperator::Not, vec![self])
    }

    pub fn is_null(self) -> Self {
        Self::call(ScalarOperator::IsNull, vec![self])
    }

    /// Whether this is the literal `TRUE`.
    pub fn is_always_true(&self) -> bool {
        matches!(self, ScalarExpr::Literal(ScalarValue::Boolean(true)))
    }

    /// Returns the call if this expression is a comparison.
    pub fn as_comparison(&self) -> Option<&ScalarCall> {
        self.as_call().filter(|call| call.op.is_comparison())
    }
}

impl Display for ScalarExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarExpr::InputRef(field) => write!(f, "${}", field),
            ScalarExpr::Literal(value) => write!(f, "{}", value),
            ScalarExpr::Call(call) => match call.operands.as_slice() {
                [operand] => write!(f, "{}({})", call.op, operand),
                [left, right] => write!(f, "({} {} {})", left, call.op, right),
                operands => write!(f, "{}({})", call.op, operands.iter().join(", ")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_comparison_operators() {
        let comparisons: Vec<ScalarOperator> = ScalarOperator::iter()
            .filter(|op| op.is_comparison())
            .collect();
        assert_eq!(
            vec![
                ScalarOperator::Eq,
                ScalarOperator::NotEq,
                ScalarOperator::Lt,
                ScalarOperator::LtEq,
                ScalarOperator::Gt,
                ScalarOperator::GtEq
            ],
            comparisons
        );
        assert!(!ScalarOperator::And.is_comparison());
    }

    #[test]
    fn test_as_comparison() {
        assert!(col(0).eq(col(1)).as_comparison().is_some());
        assert!(col(0).gt_eq(lit(3i64)).as_comparison().is_some());
        assert!(col(0).plus(col(1)).as_comparison().is_none());
        assert!(col(0).as_comparison().is_none());
        assert!(lit(true).as_comparison().is_none());
    }

    #[test]
    fn test_is_always_true() {
        assert!(lit(true).is_always_true());
        assert!(!lit(false).is_always_true());
        assert!(!lit(1i64).is_always_true());
        assert!(!col(0).eq(col(0)).is_always_true());
    }

    #[test]
    fn test_display() {
        let expr = col(0).eq(col(2)).and(col(1).plus(lit(1i64)).gt(lit("a")));
        assert_eq!("(($0 = $2) AND (($1 + 1) > 'a'))", expr.to_string());
        assert_eq!("NOT($3)", col(3).not().to_string());
        assert_eq!("IS NULL($3)", col(3).is_null().to_string());
        assert_eq!(
            "($0 - NULL)",
            col(0).minus(lit(ScalarValue::Null)).to_string()
        );
    }
}
