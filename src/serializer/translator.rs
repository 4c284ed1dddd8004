//! Table → validation model translation
//!
//! Field rules, applied per column in table order:
//!
//! - Foreign key: optional when the column has a default OR permits null.
//!   Carries `foreign_key`/`to` metadata and always an explicit null
//!   default. With `include_readable`, a `<name>_readable` optional text
//!   field follows it.
//! - Any other column: optional only when the column has a default.
//!   Nullability alone does not make it optional. Bare type, no metadata.
//!
//! Results are memoized per (table identity, options) for the life of the
//! process. The cache is never invalidated.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::observability::{log_event_with_fields, Event};
use crate::table::{Column, Table, TableId, ValueType};

use super::builder::ModelBuilder;
use super::config::ModelConfig;
use super::errors::ModelResult;
use super::model::{FieldInfo, FieldSpec, ValidationModel};

/// Suffix of the synthesized human-readable companion field
pub const READABLE_SUFFIX: &str = "_readable";

static GLOBAL: OnceLock<Translator> = OnceLock::new();

/// Which columns and companion fields a model includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModelOptions {
    /// Include default columns (the primary key)
    pub include_default_columns: bool,
    /// Add a `<column>_readable` text field per foreign key
    pub include_readable: bool,
}

impl ModelOptions {
    pub const fn new(include_default_columns: bool, include_readable: bool) -> Self {
        Self {
            include_default_columns,
            include_readable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    table: TableId,
    options: ModelOptions,
}

/// Builds validation models from tables and memoizes them
#[derive(Debug, Default)]
pub struct Translator {
    cache: RwLock<HashMap<CacheKey, Arc<ValidationModel>>>,
}

impl Translator {
    /// Create a translator with its own, empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide translator
    pub fn global() -> &'static Translator {
        GLOBAL.get_or_init(Translator::new)
    }

    /// Get the model for `table`, building it on first request.
    ///
    /// Repeated calls with the same table and options return the same `Arc`.
    /// Construction errors are returned as-is and nothing is cached.
    pub fn create_model(
        &self,
        table: &Table,
        options: ModelOptions,
    ) -> ModelResult<Arc<ValidationModel>> {
        let key = CacheKey {
            table: table.id(),
            options,
        };

        // Cached models are immutable, so a poisoned lock still holds
        // consistent data.
        if let Some(model) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(model));
        }

        let built = Arc::new(build_model(table, options)?);

        // A concurrent caller may have inserted first; keep theirs.
        let model = Arc::clone(
            self.cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key)
                .or_insert(built),
        );

        let field_count = model.len().to_string();
        log_event_with_fields(
            Event::ModelCreated,
            &[
                ("fields", field_count.as_str()),
                ("model", model.name()),
                ("tablename", table.tablename()),
            ],
        );

        Ok(model)
    }

    /// Number of cached models
    pub fn cached_models(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Get the model for `table` from the process-wide translator
pub fn create_model(table: &Table, options: ModelOptions) -> ModelResult<Arc<ValidationModel>> {
    Translator::global().create_model(table, options)
}

/// Translate `table` without consulting any cache
pub fn build_model(table: &Table, options: ModelOptions) -> ModelResult<ValidationModel> {
    let columns: Vec<&Column> = if options.include_default_columns {
        table.columns().iter().collect()
    } else {
        table.non_default_columns().collect()
    };

    let mut builder = ModelBuilder::new(table.name()).config(ModelConfig::api());

    for column in columns {
        match column.references() {
            Some(references) => {
                let optional = column.has_default() || column.is_nullable();
                let spec = FieldSpec::of(column.value_type().clone(), optional)
                    .default_null()
                    .with_info(FieldInfo::foreign_key(references));
                builder = builder.field(column.name(), spec);

                if options.include_readable {
                    builder = builder.field(
                        format!("{}{}", column.name(), READABLE_SUFFIX),
                        FieldSpec::optional(ValueType::Text),
                    );
                }
            }
            None => {
                let spec = FieldSpec::of(column.value_type().clone(), column.has_default());
                builder = builder.field(column.name(), spec);
            }
        }
    }

    builder.build()
}
