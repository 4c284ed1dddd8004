//! Column value types
//!
//! Supported types:
//! - text: UTF-8 string
//! - integer: 64-bit signed integer
//! - float: 64-bit floating point
//! - boolean
//! - uuid: identifier, serialized as its hyphenated string form
//! - timestamp: RFC 3339 date-time
//! - date: calendar date (YYYY-MM-DD)
//! - json: any JSON value
//! - array: homogeneous array with element type
//! - arbitrary: a named type outside the built-in set

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared value type of a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueType {
    /// UTF-8 string
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Float,
    /// Boolean
    Boolean,
    /// Identifier
    Uuid,
    /// Date and time with offset
    Timestamp,
    /// Calendar date
    Date,
    /// Any JSON value
    Json,
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<ValueType>,
    },
    /// Type outside the built-in set, identified by name
    Arbitrary {
        /// Type name
        name: String,
    },
}

impl ValueType {
    /// Create an array type
    pub fn array(element_type: ValueType) -> Self {
        ValueType::Array {
            element_type: Box::new(element_type),
        }
    }

    /// Create an arbitrary named type
    pub fn arbitrary(name: impl Into<String>) -> Self {
        ValueType::Arbitrary { name: name.into() }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &str {
        match self {
            ValueType::Text => "text",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Uuid => "uuid",
            ValueType::Timestamp => "timestamp",
            ValueType::Date => "date",
            ValueType::Json => "json",
            ValueType::Array { .. } => "array",
            ValueType::Arbitrary { name } => name,
        }
    }

    /// Parse a type name as written in table definition files.
    ///
    /// Accepts the ORM column class names as aliases (`varchar`, `serial`,
    /// `bigint`, ...). Array and arbitrary types use the tagged form instead.
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "text" | "varchar" | "string" | "secret" | "email" => ValueType::Text,
            "integer" | "int" | "bigint" | "smallint" | "serial" | "bigserial" => {
                ValueType::Integer
            }
            "float" | "real" | "double" | "doubleprecision" | "numeric" | "decimal" => {
                ValueType::Float
            }
            "boolean" | "bool" => ValueType::Boolean,
            "uuid" => ValueType::Uuid,
            "timestamp" | "timestamptz" => ValueType::Timestamp,
            "date" => ValueType::Date,
            "json" | "jsonb" => ValueType::Json,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Array { element_type } => write!(f, "array<{}>", element_type),
            ValueType::Arbitrary { name } => write!(f, "arbitrary({})", name),
            other => f.write_str(other.type_name()),
        }
    }
}
