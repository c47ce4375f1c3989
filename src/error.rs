use thiserror::Error;

use crate::expr::ScalarOperator;
use crate::multijoin::FactorId;

pub type OptResult<T> = anyhow::Result<T>;

/// Invariant violations raised while building or querying a join factor graph.
///
/// None of these are user facing: each one means an upstream component handed us inconsistent
/// data, and the current optimization attempt should be abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptError {
    #[error("Multi join must have at least one input")]
    EmptyMultiJoin,
    #[error("Field {field} is not owned by any join factor, total fields: {total_fields}")]
    FieldOutOfRange { field: usize, total_fields: usize },
    #[error("Join factor {factor} does not exist, factor count: {factor_count}")]
    FactorOutOfRange { factor: FactorId, factor_count: usize },
    #[error("Comparison {operator} expects 2 operands, but got {operands}")]
    MalformedComparison {
        operator: ScalarOperator,
        operands: usize,
    },
    #[error("Invalid weight policy: {0}")]
    InvalidWeightPolicy(String),
}
