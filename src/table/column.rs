//! Column descriptors

use std::sync::Arc;

use serde_json::Value;

use super::table::Table;
use super::types::ValueType;

/// A configured column default
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    /// Literal value
    Static(Value),
    /// Assigned by the database on insert (serial keys, `now()`, ...)
    Generated,
}

/// A column in a table definition
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Logical column name
    name: String,
    /// Declared value type
    value_type: ValueType,
    /// Configured default, if any
    default: Option<ColumnDefault>,
    /// Whether null is permitted
    null: bool,
    /// Whether this column is the table's primary key
    primary_key: bool,
    /// Table name (not class name) of the referenced table, for foreign keys
    references: Option<String>,
}

impl Column {
    /// Create a non-null column of the given type with no default
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            null: false,
            primary_key: false,
            references: None,
        }
    }

    /// Create a text column
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Text)
    }

    /// Create an integer column
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Integer)
    }

    /// Create a float column
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Float)
    }

    /// Create a boolean column
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Boolean)
    }

    /// Create a uuid column
    pub fn uuid(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Uuid)
    }

    /// Create a timestamp column
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Timestamp)
    }

    /// Create a date column
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Date)
    }

    /// Create a json column
    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Json)
    }

    /// Create a foreign-key column referencing `target`.
    ///
    /// The value type is the target's primary-key type. Foreign keys permit
    /// null unless `not_null` is applied.
    pub fn foreign_key(name: impl Into<String>, target: &Arc<Table>) -> Self {
        Self {
            name: name.into(),
            value_type: target.primary_key().value_type().clone(),
            default: None,
            null: true,
            primary_key: false,
            references: Some(target.tablename().to_string()),
        }
    }

    /// Permit null
    pub fn null(mut self) -> Self {
        self.null = true;
        self
    }

    /// Forbid null
    pub fn not_null(mut self) -> Self {
        self.null = false;
        self
    }

    /// Configure a default value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ColumnDefault::Static(value.into()));
        self
    }

    /// Mark the default as assigned by the database
    pub fn generated(mut self) -> Self {
        self.default = Some(ColumnDefault::Generated);
        self
    }

    /// Mark as primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub(crate) fn clear_primary_key(&mut self) {
        self.primary_key = false;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// True if a default was configured when the column was defined.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&ColumnDefault> {
        self.default.as_ref()
    }

    pub fn is_nullable(&self) -> bool {
        self.null
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }

    /// Table name of the referenced table, for foreign keys
    pub fn references(&self) -> Option<&str> {
        self.references.as_deref()
    }
}
