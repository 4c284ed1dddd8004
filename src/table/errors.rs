//! Table definition errors

use thiserror::Error;

/// Result type for table definition operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while loading table definitions
#[derive(Debug, Error)]
pub enum TableError {
    /// Definition file could not be read
    #[error("Failed to read table definitions '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Definition document is not valid JSON or has the wrong shape
    #[error("Malformed table definitions: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two tables share a class name
    #[error("Table '{0}' is defined more than once")]
    DuplicateTable(String),

    /// Two columns of one table share a name
    #[error("Column '{column}' is defined more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// More than one primary key declared
    #[error("Table '{0}' declares more than one primary key")]
    MultiplePrimaryKeys(String),

    /// Foreign key references a table not defined before it
    #[error("Column '{table}.{column}' references unknown table '{references}'")]
    UnknownReference {
        table: String,
        column: String,
        references: String,
    },

    /// Unrecognized column type name
    #[error("Column '{table}.{column}' has unsupported type '{ty}'")]
    UnsupportedType {
        table: String,
        column: String,
        ty: String,
    },
}

impl TableError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Io { .. } => "TABLE_IO_ERROR",
            TableError::Malformed(_) => "TABLE_MALFORMED",
            TableError::DuplicateTable(_) => "TABLE_DUPLICATE",
            TableError::DuplicateColumn { .. } => "TABLE_DUPLICATE_COLUMN",
            TableError::MultiplePrimaryKeys(_) => "TABLE_MULTIPLE_PRIMARY_KEYS",
            TableError::UnknownReference { .. } => "TABLE_UNKNOWN_REFERENCE",
            TableError::UnsupportedType { .. } => "TABLE_UNSUPPORTED_TYPE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_reference_display() {
        let err = TableError::UnknownReference {
            table: "Movie".into(),
            column: "studio".into(),
            references: "Studio".into(),
        };
        let display = err.to_string();
        assert!(display.contains("Movie.studio"));
        assert!(display.contains("'Studio'"));
        assert_eq!(err.code(), "TABLE_UNKNOWN_REFERENCE");
    }
}
