use crate::expr::{lit, ScalarExpr};
use crate::operator::TableScan;
use crate::properties::Field;

/// Logical n-way inner join.
///
/// The output row is the concatenation of the inputs' rows in input order, and `condition` refers
/// to fields of that concatenated row by global ordinal.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiJoin {
    inputs: Vec<TableScan>,
    condition: ScalarExpr,
}

impl MultiJoin {
    pub fn new(inputs: Vec<TableScan>, condition: ScalarExpr) -> Self {
        Self { inputs, condition }
    }

    /// Multi join without any join condition, i.e. a cross product of all inputs.
    pub fn cross_product(inputs: Vec<TableScan>) -> Self {
        Self::new(inputs, lit(true))
    }

    pub fn inputs(&self) -> &[TableScan] {
        &self.inputs
    }

    pub fn condition(&self) -> &ScalarExpr {
        &self.condition
    }

    /// Fields of the output row, across all inputs.
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.inputs.iter().flat_map(|input| input.fields())
    }
}
