use std::sync::Arc;

use derive_more::Display;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display)]
pub enum DataType {
    Boolean,
    Int64,
    Utf8,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, Display)]
#[display(fmt = "{}: {}", name, data_type)]
pub struct Field {
    name: String,
    data_type: DataType,
}

impl Field {
    pub fn new<S: Into<String>>(name: S, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// Ordered fields of a relation's output row.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct LogicalProperty {
    schema: Arc<Schema>,
}

impl LogicalProperty {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
