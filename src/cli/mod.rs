//! CLI module for tablemodel
//!
//! Provides command-line interface for:
//! - tables: list table definitions
//! - schema: print a table's model as JSON schema
//! - validate: validate a record from stdin against a table's model

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ModelArgs};
pub use commands::{list_tables, run, run_command, schema, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
