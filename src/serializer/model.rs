//! Validation models
//!
//! A model is an ordered set of typed fields plus a [`ModelConfig`]. Models
//! are produced by [`ModelBuilder`](super::ModelBuilder) and are immutable.

use heck::ToTitleCase;
use serde_json::{json, Map, Value};

use crate::table::ValueType;

use super::config::ModelConfig;
use super::errors::ValidationResult;
use super::record::{self, Record};

/// Default declared for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldDefault {
    /// Bare type declaration: no default
    Required,
    /// Explicit null default
    Null,
}

/// Metadata attached to a field for downstream tooling
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldInfo {
    /// Field holds a foreign-key value
    pub foreign_key: bool,
    /// Table name the foreign key points to
    pub to: Option<String>,
}

impl FieldInfo {
    /// Metadata for a foreign key referencing `tablename`
    pub fn foreign_key(tablename: impl Into<String>) -> Self {
        Self {
            foreign_key: true,
            to: Some(tablename.into()),
        }
    }
}

/// Declaration of a field: type, optionality, default and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub ty: ValueType,
    pub optional: bool,
    pub default: FieldDefault,
    pub info: Option<FieldInfo>,
}

impl FieldSpec {
    /// Bare, non-optional type
    pub fn required(ty: ValueType) -> Self {
        Self {
            ty,
            optional: false,
            default: FieldDefault::Required,
            info: None,
        }
    }

    /// Bare type wrapped as optional
    pub fn optional(ty: ValueType) -> Self {
        Self {
            optional: true,
            ..Self::required(ty)
        }
    }

    /// `ty`, optional when `optional` is set
    pub fn of(ty: ValueType, optional: bool) -> Self {
        Self {
            optional,
            ..Self::required(ty)
        }
    }

    /// Declare an explicit null default
    pub fn default_null(mut self) -> Self {
        self.default = FieldDefault::Null;
        self
    }

    pub fn with_info(mut self, info: FieldInfo) -> Self {
        self.info = Some(info);
        self
    }
}

/// A field of a built model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    name: String,
    spec: FieldSpec,
}

impl ModelField {
    pub(crate) fn new(name: String, spec: FieldSpec) -> Self {
        Self { name, spec }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ValueType {
        &self.spec.ty
    }

    /// True if the declared type is wrapped as optional
    pub fn is_optional(&self) -> bool {
        self.spec.optional
    }

    pub fn default(&self) -> FieldDefault {
        self.spec.default
    }

    /// True if input must supply this field: not optional and no default.
    pub fn is_required(&self) -> bool {
        !self.spec.optional && self.spec.default == FieldDefault::Required
    }

    /// True if null is an acceptable value
    pub fn accepts_null(&self) -> bool {
        self.spec.optional || self.spec.default == FieldDefault::Null
    }

    pub fn info(&self) -> Option<&FieldInfo> {
        self.spec.info.as_ref()
    }

    pub fn is_foreign_key(&self) -> bool {
        self.info().is_some_and(|info| info.foreign_key)
    }

    fn json_schema(&self) -> Value {
        let mut schema = match type_schema(self.ty()) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        schema.insert("title".into(), Value::String(self.name.to_title_case()));

        if let Some(info) = self.info() {
            if info.foreign_key {
                schema.insert("foreign_key".into(), Value::Bool(true));
            }
            if let Some(to) = &info.to {
                schema.insert("to".into(), Value::String(to.clone()));
            }
        }

        Value::Object(schema)
    }
}

fn type_schema(ty: &ValueType) -> Value {
    match ty {
        ValueType::Text => json!({ "type": "string" }),
        ValueType::Integer => json!({ "type": "integer" }),
        ValueType::Float => json!({ "type": "number" }),
        ValueType::Boolean => json!({ "type": "boolean" }),
        ValueType::Uuid => json!({ "type": "string", "format": "uuid" }),
        ValueType::Timestamp => json!({ "type": "string", "format": "date-time" }),
        ValueType::Date => json!({ "type": "string", "format": "date" }),
        ValueType::Json | ValueType::Arbitrary { .. } => json!({}),
        ValueType::Array { element_type } => {
            json!({ "type": "array", "items": type_schema(element_type) })
        }
    }
}

/// A validation model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationModel {
    name: String,
    fields: Vec<ModelField>,
    config: ModelConfig,
}

impl ValidationModel {
    pub(crate) fn new(name: String, fields: Vec<ModelField>, config: ModelConfig) -> Self {
        Self {
            name,
            fields,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[ModelField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Foreign-key fields with the table each one points to
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&ModelField, &str)> + '_ {
        self.fields.iter().filter_map(|f| {
            let info = f.info().filter(|info| info.foreign_key)?;
            info.to.as_deref().map(|to| (f, to))
        })
    }

    /// Describe the model as a JSON Schema object.
    ///
    /// Foreign-key metadata is exposed as `foreign_key` / `to` keys on the
    /// field's property so documentation tools can link related tables.
    pub fn json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.json_schema()))
            .collect();

        let required: Vec<Value> = self
            .fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| Value::String(f.name.clone()))
            .collect();

        let mut schema = Map::new();
        schema.insert("title".into(), Value::String(self.name.clone()));
        schema.insert("type".into(), Value::String("object".into()));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        Value::Object(schema)
    }

    /// Validate mapping data against this model.
    ///
    /// Keys the model does not declare are ignored. Missing fields take
    /// their default (null) when they accept null; otherwise they fail.
    pub fn validate(&self, data: &Value) -> ValidationResult<Record> {
        record::validate(self, data)
    }
}
