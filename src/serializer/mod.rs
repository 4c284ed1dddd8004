//! Validation models derived from table definitions
//!
//! [`create_model`] turns a [`Table`](crate::table::Table) into a
//! [`ValidationModel`] that validates request data and serializes
//! responses. Models are cached per table and [`ModelOptions`].
//!
//! # Design Principles
//!
//! - Translation is a pure function of the table and options
//! - One model instance per (table, options) for the life of the process
//! - Builder errors propagate unchanged; failures are never cached
//! - Models are immutable once built

mod builder;
mod config;
mod errors;
mod model;
mod record;
mod translator;

pub use builder::ModelBuilder;
pub use config::{IdentifierEncoding, ModelConfig};
pub use errors::{ModelError, ModelResult, ValidationDetails, ValidationError, ValidationResult};
pub use model::{FieldDefault, FieldInfo, FieldSpec, ModelField, ValidationModel};
pub use record::{FieldValue, Record};
pub use translator::{build_model, create_model, ModelOptions, Translator, READABLE_SUFFIX};
