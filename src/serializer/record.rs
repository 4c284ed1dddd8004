//! Record validation and serialization
//!
//! Validation rules:
//! - Input must be a JSON object
//! - Undeclared keys are ignored
//! - Missing fields are null when the field accepts null, else rejected
//! - Null is only accepted by optional fields and fields with a null default
//! - Values must match the field type exactly; no numeric or boolean
//!   coercion. Identifiers, timestamps and dates are parsed from strings.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::table::ValueType;

use super::config::ModelConfig;
use super::errors::{ValidationDetails, ValidationError, ValidationResult};
use super::model::ValidationModel;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(DateTime<FixedOffset>),
    Date(NaiveDate),
    Json(Value),
    Array(Vec<FieldValue>),
    /// Value of an arbitrary type, kept as given
    Opaque(Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Encode to JSON, applying the model's identifier encoding
    pub fn to_json(&self, config: &ModelConfig) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Uuid(id) => Value::String(config.identifier_encoding.encode(id)),
            FieldValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            FieldValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            FieldValue::Json(v) | FieldValue::Opaque(v) => v.clone(),
            FieldValue::Array(items) => {
                Value::Array(items.iter().map(|item| item.to_json(config)).collect())
            }
        }
    }
}

/// A record that passed model validation
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: String,
    config: ModelConfig,
    values: Vec<(String, FieldValue)>,
}

impl Record {
    /// Name of the model this record was validated against
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Values in field declaration order
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Encode as a JSON object
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(n, v)| (n.clone(), v.to_json(&self.config)))
            .collect();
        Value::Object(map)
    }

    /// Encode as a JSON string with fields in declaration order
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, &value.to_json(&self.config))?;
        }
        map.end()
    }
}

pub(crate) fn validate(model: &ValidationModel, data: &Value) -> ValidationResult<Record> {
    let fail = |details| ValidationError::new(model.name(), details);

    let obj = data.as_object().ok_or_else(|| {
        fail(ValidationDetails::type_mismatch(
            "$root",
            "object",
            json_type_name(data),
        ))
    })?;

    let mut values = Vec::with_capacity(model.len());
    for field in model.fields() {
        let value = match obj.get(field.name()) {
            None | Some(Value::Null) if field.accepts_null() => FieldValue::Null,
            None => return Err(fail(ValidationDetails::missing_field(field.name()))),
            Some(Value::Null) => return Err(fail(ValidationDetails::null_value(field.name()))),
            Some(value) => validate_value(field.ty(), value, field.name()).map_err(fail)?,
        };
        values.push((field.name().to_string(), value));
    }

    Ok(Record {
        model: model.name().to_string(),
        config: *model.config(),
        values,
    })
}

fn validate_value(ty: &ValueType, value: &Value, path: &str) -> Result<FieldValue, ValidationDetails> {
    let mismatch = || ValidationDetails::type_mismatch(path, ty.to_string(), json_type_name(value));

    match ty {
        ValueType::Text => value
            .as_str()
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or_else(mismatch),
        ValueType::Integer => value.as_i64().map(FieldValue::Integer).ok_or_else(mismatch),
        ValueType::Float => value.as_f64().map(FieldValue::Float).ok_or_else(mismatch),
        ValueType::Boolean => value.as_bool().map(FieldValue::Boolean).ok_or_else(mismatch),
        ValueType::Uuid => value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(FieldValue::Uuid)
            .ok_or_else(mismatch),
        ValueType::Timestamp => value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(FieldValue::Timestamp)
            .ok_or_else(mismatch),
        ValueType::Date => value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
            .map(FieldValue::Date)
            .ok_or_else(mismatch),
        ValueType::Json => Ok(FieldValue::Json(value.clone())),
        ValueType::Arbitrary { .. } => Ok(FieldValue::Opaque(value.clone())),
        ValueType::Array { element_type } => {
            let items = value.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let item_path = format!("{}[{}]", path, i);
                    if item.is_null() {
                        return Err(ValidationDetails::null_value(item_path));
                    }
                    validate_value(element_type, item, &item_path)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Array)
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::{FieldInfo, FieldSpec, ModelBuilder};
    use serde_json::json;

    const STUDIO_ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    fn movie_model() -> ValidationModel {
        ModelBuilder::new("Movie")
            .config(ModelConfig::api())
            .field("title", FieldSpec::required(ValueType::Text))
            .field(
                "studio",
                FieldSpec::required(ValueType::Uuid)
                    .default_null()
                    .with_info(FieldInfo::foreign_key("studio")),
            )
            .field("rating", FieldSpec::optional(ValueType::Float))
            .field("released", FieldSpec::optional(ValueType::Date))
            .field("tags", FieldSpec::optional(ValueType::array(ValueType::Text)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_record() {
        let model = movie_model();
        let record = model
            .validate(&json!({
                "title": "Metropolis",
                "studio": STUDIO_ID,
                "rating": 9,
                "released": "1927-01-10",
                "tags": ["silent", "sci-fi"]
            }))
            .unwrap();

        assert_eq!(record.model(), "Movie");
        assert_eq!(record.get("title"), Some(&FieldValue::Text("Metropolis".into())));
        assert_eq!(record.get("rating"), Some(&FieldValue::Float(9.0)));
        assert!(matches!(record.get("studio"), Some(FieldValue::Uuid(_))));
    }

    #[test]
    fn test_missing_fields_take_null_default() {
        let model = movie_model();
        let record = model.validate(&json!({ "title": "Metropolis" })).unwrap();

        assert!(record.get("studio").unwrap().is_null());
        assert!(record.get("rating").unwrap().is_null());
        assert!(record.get("tags").unwrap().is_null());
    }

    #[test]
    fn test_missing_required_field() {
        let model = movie_model();
        let err = model.validate(&json!({ "rating": 7.5 })).unwrap_err();

        assert_eq!(err.details(), &ValidationDetails::missing_field("title"));
    }

    #[test]
    fn test_null_rejected_for_required_field() {
        let model = movie_model();
        let err = model.validate(&json!({ "title": null })).unwrap_err();
        assert_eq!(err.details().actual, "null");
    }

    #[test]
    fn test_no_coercion() {
        let model = movie_model();

        let err = model.validate(&json!({ "title": 42 })).unwrap_err();
        assert_eq!(err.details().field, "title");
        assert_eq!(err.details().expected, "text");
        assert_eq!(err.details().actual, "integer");

        let err = model
            .validate(&json!({ "title": "M", "studio": "not-a-uuid" }))
            .unwrap_err();
        assert_eq!(err.details().field, "studio");
    }

    #[test]
    fn test_array_element_errors_carry_index() {
        let model = movie_model();

        let err = model
            .validate(&json!({ "title": "M", "tags": ["ok", 3] }))
            .unwrap_err();
        assert_eq!(err.details().field, "tags[1]");

        let err = model
            .validate(&json!({ "title": "M", "tags": ["ok", null] }))
            .unwrap_err();
        assert_eq!(err.details(), &ValidationDetails::null_value("tags[1]"));
    }

    #[test]
    fn test_root_must_be_object() {
        let model = movie_model();
        let err = model.validate(&json!(["title"])).unwrap_err();
        assert_eq!(err.details().field, "$root");
        assert_eq!(err.details().actual, "array");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let model = movie_model();
        let record = model
            .validate(&json!({ "title": "M", "director": "Lang" }))
            .unwrap();
        assert!(record.get("director").is_none());
    }

    #[test]
    fn test_identifiers_serialize_as_strings() {
        let model = movie_model();
        let record = model
            .validate(&json!({ "title": "M", "studio": STUDIO_ID.to_uppercase() }))
            .unwrap();

        let out = record.to_json();
        assert_eq!(out["studio"], json!(STUDIO_ID));
    }

    #[test]
    fn test_json_string_keeps_declaration_order() {
        let model = movie_model();
        let record = model
            .validate(&json!({ "title": "M", "released": "1927-01-10" }))
            .unwrap();

        let out = record.to_json_string().unwrap();
        assert!(out.starts_with(r#"{"title":"M","studio":null"#));
        assert!(out.contains(r#""released":"1927-01-10""#));
    }

    #[test]
    fn test_timestamp_round_trips_offset() {
        let model = ModelBuilder::new("Screening")
            .field("starts", FieldSpec::required(ValueType::Timestamp))
            .build()
            .unwrap();

        let record = model
            .validate(&json!({ "starts": "2024-05-01T20:30:00+02:00" }))
            .unwrap();
        assert_eq!(record.to_json()["starts"], "2024-05-01T20:30:00+02:00");

        let err = model.validate(&json!({ "starts": "tonight" })).unwrap_err();
        assert_eq!(err.details().expected, "timestamp");
    }

    #[test]
    fn test_arbitrary_and_json_values_pass_through() {
        let model = ModelBuilder::new("Place")
            .config(ModelConfig::api())
            .field("location", FieldSpec::required(ValueType::arbitrary("Point")))
            .field("extra", FieldSpec::required(ValueType::Json))
            .build()
            .unwrap();

        let data = json!({ "location": { "x": 1, "y": 2 }, "extra": [1, "two"] });
        let record = model.validate(&data).unwrap();
        assert_eq!(record.to_json(), data);
    }
}
