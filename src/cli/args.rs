//! CLI argument definitions using clap
//!
//! Commands:
//! - tablemodel tables --tables <path>
//! - tablemodel schema --tables <path> --table <Class> [flags]
//! - tablemodel validate --tables <path> --table <Class> [flags]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::serializer::ModelOptions;

/// tablemodel - validation models derived from table definitions
#[derive(Parser, Debug)]
#[command(name = "tablemodel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tables in a definitions file
    Tables {
        /// Path to table definitions
        #[arg(long, default_value = "./tables.json")]
        tables: PathBuf,
    },

    /// Print the JSON schema of a table's model
    Schema {
        #[command(flatten)]
        target: ModelArgs,
    },

    /// Validate one JSON object from stdin against a table's model
    Validate {
        #[command(flatten)]
        target: ModelArgs,
    },
}

/// Selects a table and the model options to derive it with
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Path to table definitions
    #[arg(long, default_value = "./tables.json")]
    pub tables: PathBuf,

    /// Class name of the table
    #[arg(long)]
    pub table: String,

    /// Include default columns such as the primary key
    #[arg(long)]
    pub include_default_columns: bool,

    /// Add a `<column>_readable` field per foreign key
    #[arg(long)]
    pub include_readable: bool,
}

impl ModelArgs {
    pub fn options(&self) -> ModelOptions {
        ModelOptions::new(self.include_default_columns, self.include_readable)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_flags() {
        let cli = Cli::try_parse_from([
            "tablemodel",
            "schema",
            "--tables",
            "defs.json",
            "--table",
            "Movie",
            "--include-readable",
        ])
        .unwrap();

        match cli.command {
            Command::Schema { target } => {
                assert_eq!(target.tables, PathBuf::from("defs.json"));
                assert_eq!(target.table, "Movie");
                assert_eq!(target.options(), ModelOptions::new(false, true));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_tables_path_defaults() {
        let cli = Cli::try_parse_from(["tablemodel", "tables"]).unwrap();
        match cli.command {
            Command::Tables { tables } => assert_eq!(tables, PathBuf::from("./tables.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_table_is_required() {
        assert!(Cli::try_parse_from(["tablemodel", "validate"]).is_err());
    }
}
