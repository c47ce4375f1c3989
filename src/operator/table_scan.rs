use crate::properties::{Field, LogicalProperty, Schema};

/// Scan of a named table, one input of a multi join.
#[derive(Clone, Debug, PartialEq)]
pub struct TableScan {
    table_name: String,
    logical_prop: LogicalProperty,
}

impl TableScan {
    pub fn new<S: Into<String>>(table_name: S, schema: Schema) -> Self {
        Self {
            table_name: table_name.into(),
            logical_prop: LogicalProperty::new(schema),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn logical_prop(&self) -> &LogicalProperty {
        &self.logical_prop
    }

    pub fn fields(&self) -> &[Field] {
        self.logical_prop.schema().fields()
    }

    /// Number of fields this relation contributes to a join row.
    pub fn field_count(&self) -> usize {
        self.logical_prop.schema().len()
    }
}
