//! CLI command implementations
//!
//! Every command loads the table definitions file first. Model commands
//! then derive the requested model through the process-wide translator.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::observability::{log_event_with_fields, Event};
use crate::serializer::{create_model, ValidationModel};
use crate::table::TableRegistry;

use super::args::{Command, ModelArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Parse CLI args and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command).inspect_err(|e| {
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
    })
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Tables { tables } => write_response(list_tables(&TableRegistry::load(&tables)?)),
        Command::Schema { target } => {
            let registry = TableRegistry::load(&target.tables)?;
            write_response(schema(&registry, &target)?)
        }
        Command::Validate { target } => {
            let registry = TableRegistry::load(&target.tables)?;
            let input = read_request()?;
            match validate(&registry, &target, &input) {
                Ok(record) => write_response(record),
                Err(e) => {
                    write_error(e.code_str(), e.message())?;
                    Err(e)
                }
            }
        }
    }
}

/// Summaries of every table: class name, table name and columns
pub fn list_tables(registry: &TableRegistry) -> Value {
    let tables: Vec<Value> = registry
        .tables()
        .iter()
        .map(|table| {
            let columns: Vec<Value> = table
                .columns()
                .iter()
                .map(|c| {
                    json!({
                        "name": c.name(),
                        "type": c.value_type().to_string(),
                        "null": c.is_nullable(),
                        "has_default": c.has_default(),
                        "primary_key": c.is_primary_key(),
                        "references": c.references(),
                    })
                })
                .collect();
            json!({
                "name": table.name(),
                "tablename": table.tablename(),
                "columns": columns,
            })
        })
        .collect();
    Value::Array(tables)
}

/// JSON schema of the selected table's model
pub fn schema(registry: &TableRegistry, target: &ModelArgs) -> CliResult<Value> {
    Ok(model_for(registry, target)?.json_schema())
}

/// Validate `input` against the selected table's model and return the
/// serialized record
pub fn validate(registry: &TableRegistry, target: &ModelArgs, input: &Value) -> CliResult<Value> {
    let model = model_for(registry, target)?;
    let record = model.validate(input).inspect_err(|e| {
        log_event_with_fields(
            Event::RecordRejected,
            &[("model", e.model()), ("field", e.details().field.as_str())],
        );
    })?;
    Ok(record.to_json())
}

fn model_for(registry: &TableRegistry, target: &ModelArgs) -> CliResult<Arc<ValidationModel>> {
    let table = registry
        .get(&target.table)
        .ok_or_else(|| CliError::unknown_table(&target.table))?;
    Ok(create_model(table, target.options())?)
}
