//! Table definitions
//!
//! A table is built once and shared behind `Arc`. Its `TableId` is unique
//! for the lifetime of the process and serves as the table's identity.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use heck::ToSnakeCase;

use super::column::Column;
use super::types::ValueType;

static NEXT_TABLE_ID: AtomicUsize = AtomicUsize::new(0);

/// Name of the primary key used when a table does not declare one
const DEFAULT_PRIMARY_KEY: &str = "id";

/// Uniquely identifies a table within the process
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TableId(usize);

impl TableId {
    fn next() -> Self {
        Self(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}

/// A table definition
#[derive(Debug)]
pub struct Table {
    id: TableId,

    /// Class name, used to name generated models (e.g. `Movie`)
    name: String,

    /// Name of the table in the database (e.g. `movie`)
    tablename: String,

    /// All columns in declaration order; the primary key comes first.
    /// Never empty: `TableBuilder::build` always places a primary key.
    columns: Vec<Column>,
}

impl Table {
    /// Start building a table with the given class name
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name)
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tablename(&self) -> &str {
        &self.tablename
    }

    /// All columns, default columns included
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The primary-key column
    pub fn primary_key(&self) -> &Column {
        debug_assert!(!self.columns.is_empty());
        &self.columns[0]
    }

    /// Columns the table manages itself (the primary key)
    pub fn default_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|c| c.is_primary_key())
    }

    /// Columns declared by the user
    pub fn non_default_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|c| !c.is_primary_key())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }
}

/// Builder for [`Table`]
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    tablename: Option<String>,
    columns: Vec<Column>,
}

impl TableBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tablename: None,
            columns: vec![],
        }
    }

    /// Override the table name (defaults to the snake-cased class name)
    pub fn tablename(mut self, tablename: impl Into<String>) -> Self {
        self.tablename = Some(tablename.into());
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Finish the table.
    ///
    /// When no column is marked as primary key, a column named `id` becomes
    /// the key; failing that, a generated integer `id` key is added. Only
    /// the first primary-key column is kept as such; later ones are treated
    /// as ordinary columns.
    pub fn build(self) -> Arc<Table> {
        let tablename = self
            .tablename
            .unwrap_or_else(|| self.name.to_snake_case());

        let mut columns = self.columns;
        let pk_pos = columns
            .iter()
            .position(Column::is_primary_key)
            .or_else(|| columns.iter().position(|c| c.name() == DEFAULT_PRIMARY_KEY));

        match pk_pos {
            Some(pos) => {
                let pk = columns.remove(pos).primary_key();
                for column in columns.iter_mut() {
                    column.clear_primary_key();
                }
                columns.insert(0, pk);
            }
            None => {
                let id = Column::new(DEFAULT_PRIMARY_KEY, ValueType::Integer)
                    .generated()
                    .primary_key();
                columns.insert(0, id);
            }
        }
        debug_assert!(columns.first().is_some_and(Column::is_primary_key));

        Arc::new(Table {
            id: TableId::next(),
            name: self.name,
            tablename,
            columns,
        })
    }
}
