//! Table definitions consumed by the model translator
//!
//! A table is an ordered list of columns plus a class name and a table
//! name. Each column carries:
//! - a declared value type
//! - whether a default is configured
//! - whether null is permitted
//! - whether it is the primary key (the table's default column)
//! - an optional foreign-key reference
//!
//! Tables are immutable once built and shared behind `Arc`.

mod column;
mod errors;
mod registry;
#[allow(clippy::module_inception)]
mod table;
mod types;

pub use column::{Column, ColumnDefault};
pub use errors::{TableError, TableResult};
pub use registry::TableRegistry;
pub use table::{Table, TableBuilder, TableId};
pub use types::ValueType;
