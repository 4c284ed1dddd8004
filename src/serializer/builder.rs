//! Model builder
//!
//! Accepts an ordered list of (name, [`FieldSpec`]) declarations and checks
//! them against the model's [`ModelConfig`] when building.

use crate::table::ValueType;

use super::config::ModelConfig;
use super::errors::{ModelError, ModelResult};
use super::model::{FieldSpec, ModelField, ValidationModel};

/// Builder for [`ValidationModel`]
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    config: ModelConfig,
    fields: Vec<(String, FieldSpec)>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: ModelConfig::default(),
            fields: vec![],
        }
    }

    pub fn config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a field.
    ///
    /// Declaring a name twice replaces the earlier declaration but keeps its
    /// position.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = spec,
            None => self.fields.push((name, spec)),
        }
        self
    }

    /// Build the model.
    ///
    /// Names starting with `_` are private and left out of the model. An
    /// empty name is an error.
    pub fn build(self) -> ModelResult<ValidationModel> {
        let mut fields = Vec::with_capacity(self.fields.len());

        for (name, spec) in self.fields {
            if name.is_empty() {
                return Err(ModelError::InvalidFieldName {
                    model: self.name,
                    field: name,
                });
            }
            if name.starts_with('_') {
                continue;
            }
            check_type(&self.name, &name, &spec.ty, &self.config)?;
            fields.push(ModelField::new(name, spec));
        }

        Ok(ValidationModel::new(self.name, fields, self.config))
    }
}

fn check_type(model: &str, field: &str, ty: &ValueType, config: &ModelConfig) -> ModelResult<()> {
    match ty {
        ValueType::Arbitrary { name } if name.trim().is_empty() => {
            Err(ModelError::UnsupportedType {
                model: model.to_string(),
                field: field.to_string(),
                ty: ty.to_string(),
            })
        }
        ValueType::Arbitrary { .. } if !config.arbitrary_types_allowed => {
            Err(ModelError::ArbitraryTypeNotAllowed {
                model: model.to_string(),
                field: field.to_string(),
                ty: ty.to_string(),
            })
        }
        ValueType::Array { element_type } => check_type(model, field, element_type, config),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_order() {
        let model = ModelBuilder::new("Movie")
            .field("title", FieldSpec::required(ValueType::Text))
            .field("rating", FieldSpec::optional(ValueType::Integer))
            .field("released", FieldSpec::required(ValueType::Date))
            .build()
            .unwrap();

        let names: Vec<_> = model.field_names().collect();
        assert_eq!(names, vec!["title", "rating", "released"]);
        assert_eq!(model.config(), &ModelConfig::default());
    }

    #[test]
    fn test_redeclared_field_replaced_in_place() {
        let model = ModelBuilder::new("Movie")
            .field("title", FieldSpec::required(ValueType::Text))
            .field("rating", FieldSpec::required(ValueType::Integer))
            .field("title", FieldSpec::optional(ValueType::Text))
            .build()
            .unwrap();

        let names: Vec<_> = model.field_names().collect();
        assert_eq!(names, vec!["title", "rating"]);
        assert!(model.field("title").unwrap().is_optional());
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = ModelBuilder::new("Movie")
            .field("", FieldSpec::required(ValueType::Text))
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "MODEL_INVALID_FIELD_NAME");
        assert!(matches!(err, ModelError::InvalidFieldName { ref field, .. } if field.is_empty()));
    }

    #[test]
    fn test_underscore_fields_left_out() {
        let model = ModelBuilder::new("Movie")
            .field("title", FieldSpec::required(ValueType::Text))
            .field("_secret", FieldSpec::required(ValueType::Text))
            .field("_shape", FieldSpec::required(ValueType::arbitrary("")))
            .build()
            .unwrap();

        let names: Vec<_> = model.field_names().collect();
        assert_eq!(names, vec!["title"]);
        assert!(model.field("_secret").is_none());
    }

    #[test]
    fn test_arbitrary_type_requires_config() {
        let spec = FieldSpec::required(ValueType::arbitrary("Point"));

        let err = ModelBuilder::new("Place")
            .field("location", spec.clone())
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "MODEL_ARBITRARY_TYPE_NOT_ALLOWED");

        let model = ModelBuilder::new("Place")
            .config(ModelConfig::api())
            .field("location", spec)
            .build()
            .unwrap();
        assert_eq!(model.field("location").unwrap().ty(), &ValueType::arbitrary("Point"));
    }

    #[test]
    fn test_unnamed_arbitrary_type_is_unsupported() {
        let err = ModelBuilder::new("Place")
            .config(ModelConfig::api())
            .field(
                "shapes",
                FieldSpec::required(ValueType::array(ValueType::arbitrary(""))),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "MODEL_UNSUPPORTED_TYPE");
    }

    #[test]
    fn test_empty_model() {
        let model = ModelBuilder::new("Empty").build().unwrap();
        assert!(model.is_empty());
        assert_eq!(model.name(), "Empty");
    }
}
