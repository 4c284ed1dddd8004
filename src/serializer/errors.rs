//! Model construction and record validation errors
//!
//! Error codes:
//! - MODEL_INVALID_FIELD_NAME
//! - MODEL_ARBITRARY_TYPE_NOT_ALLOWED
//! - MODEL_UNSUPPORTED_TYPE
//! - MODEL_VALIDATION_FAILED

use std::fmt;

use thiserror::Error;

/// Result type for model construction
pub type ModelResult<T> = Result<T, ModelError>;

/// Result type for record validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while building a model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Field name is empty or reserved
    #[error("Model '{model}': invalid field name '{field}'")]
    InvalidFieldName { model: String, field: String },

    /// Field uses a type outside the built-in set and the model forbids it
    #[error("Model '{model}': field '{field}' has type '{ty}' but arbitrary types are not allowed")]
    ArbitraryTypeNotAllowed {
        model: String,
        field: String,
        ty: String,
    },

    /// Field type cannot be represented at all
    #[error("Model '{model}': field '{field}' has unsupported type '{ty}'")]
    UnsupportedType {
        model: String,
        field: String,
        ty: String,
    },
}

impl ModelError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidFieldName { .. } => "MODEL_INVALID_FIELD_NAME",
            ModelError::ArbitraryTypeNotAllowed { .. } => "MODEL_ARBITRARY_TYPE_NOT_ALLOWED",
            ModelError::UnsupportedType { .. } => "MODEL_UNSUPPORTED_TYPE",
        }
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "tags[2]")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// A record did not satisfy a model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Model '{model}' validation failed: {details}")]
pub struct ValidationError {
    model: String,
    details: ValidationDetails,
}

impl ValidationError {
    pub fn new(model: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            model: model.into(),
            details,
        }
    }

    pub fn code(&self) -> &'static str {
        "MODEL_VALIDATION_FAILED"
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn details(&self) -> &ValidationDetails {
        &self.details
    }
}
