//! Table definitions loaded from JSON
//!
//! Format:
//!
//! ```json
//! {
//!   "tables": [
//!     { "name": "Studio", "columns": [ { "name": "name", "type": "varchar" } ] },
//!     {
//!       "name": "Movie",
//!       "tablename": "movie",
//!       "columns": [
//!         { "name": "title", "type": "text" },
//!         { "name": "studio", "references": "Studio" },
//!         { "name": "tags", "type": { "type": "array", "element_type": { "type": "text" } } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Foreign keys name the referenced table by class name and must refer to a
//! table defined earlier in the document.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};

use super::column::Column;
use super::errors::{TableError, TableResult};
use super::table::Table;
use super::types::ValueType;

#[derive(Debug, Deserialize)]
struct TablesDoc {
    tables: Vec<TableSpec>,
}

#[derive(Debug, Deserialize)]
struct TableSpec {
    name: String,
    #[serde(default)]
    tablename: Option<String>,
    #[serde(default)]
    columns: Vec<ColumnSpec>,
}

#[derive(Debug, Deserialize)]
struct ColumnSpec {
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<TypeSpec>,
    /// Class name of the referenced table
    #[serde(default)]
    references: Option<String>,
    #[serde(default)]
    null: Option<bool>,
    /// Present (even as null) means a default is configured
    #[serde(default, deserialize_with = "deserialize_present")]
    default: Option<Value>,
    #[serde(default)]
    generated: bool,
    #[serde(default)]
    primary_key: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeSpec {
    Name(String),
    Tagged(ValueType),
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Ordered set of table definitions, addressable by class name
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: Vec<Arc<Table>>,
    by_name: HashMap<String, usize>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load table definitions from a JSON file
    pub fn load(path: &Path) -> TableResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let registry = Self::from_json(&content)?;

        let count = registry.len().to_string();
        let path = path.display().to_string();
        log_event_with_fields(
            Event::TablesLoaded,
            &[("count", count.as_str()), ("path", path.as_str())],
        );

        Ok(registry)
    }

    /// Build table definitions from a JSON document
    pub fn from_json(content: &str) -> TableResult<Self> {
        let doc: TablesDoc = serde_json::from_str(content)?;

        let mut registry = Self::new();
        for spec in doc.tables {
            let table = registry.build_table(spec)?;
            registry.register(table)?;
        }

        Ok(registry)
    }

    /// Add an already-built table
    pub fn register(&mut self, table: Arc<Table>) -> TableResult<()> {
        if self.by_name.contains_key(table.name()) {
            return Err(TableError::DuplicateTable(table.name().to_string()));
        }
        self.by_name.insert(table.name().to_string(), self.tables.len());
        self.tables.push(table);
        Ok(())
    }

    /// Get a table by class name
    pub fn get(&self, name: &str) -> Option<&Arc<Table>> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }

    /// Tables in definition order
    pub fn tables(&self) -> &[Arc<Table>] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn build_table(&self, spec: TableSpec) -> TableResult<Arc<Table>> {
        if self.by_name.contains_key(&spec.name) {
            return Err(TableError::DuplicateTable(spec.name));
        }

        let mut seen = HashSet::new();
        let mut primary_keys = 0;
        let mut builder = Table::builder(spec.name.as_str());
        if let Some(tablename) = spec.tablename {
            builder = builder.tablename(tablename);
        }

        for col in spec.columns {
            if !seen.insert(col.name.clone()) {
                return Err(TableError::DuplicateColumn {
                    table: spec.name,
                    column: col.name,
                });
            }
            if col.primary_key {
                primary_keys += 1;
            }
            builder = builder.column(self.build_column(&spec.name, col)?);
        }

        if primary_keys > 1 {
            return Err(TableError::MultiplePrimaryKeys(spec.name));
        }

        Ok(builder.build())
    }

    fn build_column(&self, table: &str, spec: ColumnSpec) -> TableResult<Column> {
        let mut column = match &spec.references {
            Some(target) => {
                let target = self.get(target).ok_or_else(|| TableError::UnknownReference {
                    table: table.to_string(),
                    column: spec.name.clone(),
                    references: target.clone(),
                })?;
                Column::foreign_key(spec.name.as_str(), target)
            }
            None => {
                let ty = match spec.ty {
                    Some(TypeSpec::Tagged(ty)) => ty,
                    Some(TypeSpec::Name(name)) => {
                        ValueType::from_name(&name).ok_or_else(|| TableError::UnsupportedType {
                            table: table.to_string(),
                            column: spec.name.clone(),
                            ty: name,
                        })?
                    }
                    // Untyped columns default to varchar
                    None => ValueType::Text,
                };
                Column::new(spec.name.as_str(), ty)
            }
        };

        match spec.null {
            Some(true) => column = column.null(),
            Some(false) => column = column.not_null(),
            None => {}
        }
        if let Some(default) = spec.default {
            column = column.with_default(default);
        } else if spec.generated {
            column = column.generated();
        }
        if spec.primary_key {
            column = column.primary_key();
        }

        Ok(column)
    }
}
