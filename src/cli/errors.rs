//! CLI-specific error types

use std::fmt;
use std::io;

use crate::serializer::{ModelError, ValidationError};
use crate::table::TableError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Table definitions could not be loaded
    TablesError,
    /// Requested table is not defined
    UnknownTable,
    /// Model could not be built
    ModelError,
    /// Input record rejected by the model
    ValidationFailed,
    /// I/O error (stdin/stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::TablesError => "CLI_TABLES_ERROR",
            Self::UnknownTable => "CLI_UNKNOWN_TABLE",
            Self::ModelError => "CLI_MODEL_ERROR",
            Self::ValidationFailed => "CLI_VALIDATION_FAILED",
            Self::IoError => "CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn unknown_table(name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownTable,
            format!("Table '{}' is not defined", name),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        Self::new(CliErrorCode::TablesError, e.to_string())
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        Self::new(CliErrorCode::ModelError, e.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(CliErrorCode::ValidationFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::unknown_table("Movie");
        assert_eq!(err.code(), &CliErrorCode::UnknownTable);
        assert_eq!(err.to_string(), "CLI_UNKNOWN_TABLE: Table 'Movie' is not defined");
    }

    #[test]
    fn test_from_table_error() {
        let err: CliError = TableError::DuplicateTable("Movie".into()).into();
        assert_eq!(err.code_str(), "CLI_TABLES_ERROR");
        assert!(err.message().contains("Movie"));
    }
}
