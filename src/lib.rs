//! tablemodel - request/response validation models derived from table
//! definitions
//!
//! - `table`: column and table definitions, plus a JSON loader
//! - `serializer`: model translation, caching and record validation
//! - `observability`: structured JSON logging
//! - `cli`: command-line entry points

pub mod cli;
pub mod observability;
pub mod serializer;
pub mod table;

pub use serializer::{create_model, ModelOptions, ValidationModel};
pub use table::{Column, Table};
