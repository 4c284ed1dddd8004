//! Model Translation Invariant Tests
//!
//! - Same table and options always yield the same cached model
//! - Default columns only appear when requested
//! - Foreign keys are optional on default OR null; plain columns on default only
//! - Readable companion fields are reserved for foreign keys
//! - Empty tables produce empty, usable models

use std::sync::Arc;

use serde_json::json;
use tablemodel::serializer::{
    create_model, FieldDefault, FieldInfo, ModelOptions, Translator, ValidationModel,
};
use tablemodel::table::{Column, Table, TableRegistry, ValueType};

// =============================================================================
// Helper Functions
// =============================================================================

fn studio() -> Arc<Table> {
    Table::builder("Studio").column(Column::text("name")).build()
}

fn movie(studio: &Arc<Table>) -> Arc<Table> {
    Table::builder("Movie")
        .column(Column::text("title"))
        .column(Column::foreign_key("studio", studio))
        .build()
}

fn names(model: &ValidationModel) -> Vec<&str> {
    model.field_names().collect()
}

const ALL_OPTIONS: [ModelOptions; 4] = [
    ModelOptions::new(false, false),
    ModelOptions::new(false, true),
    ModelOptions::new(true, false),
    ModelOptions::new(true, true),
];

// =============================================================================
// Memoization Tests
// =============================================================================

/// Repeated calls return the identical model instance for every option set.
#[test]
fn test_create_model_is_memoized() {
    let studio = studio();
    let movie = movie(&studio);

    for options in ALL_OPTIONS {
        let first = create_model(&movie, options).unwrap();
        for _ in 0..10 {
            let again = create_model(&movie, options).unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }
    }
}

/// Concurrent first use still hands every caller the same instance.
#[test]
fn test_concurrent_first_use_agrees() {
    let translator = Arc::new(Translator::new());
    let studio = studio();
    let movie = movie(&studio);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let translator = Arc::clone(&translator);
            let movie = Arc::clone(&movie);
            std::thread::spawn(move || {
                translator
                    .create_model(&movie, ModelOptions::new(true, true))
                    .unwrap()
            })
        })
        .collect();

    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let cached = translator
        .create_model(&movie, ModelOptions::new(true, true))
        .unwrap();

    for model in &models {
        assert!(Arc::ptr_eq(model, &cached));
    }
    assert_eq!(translator.cached_models(), 1);
}

// =============================================================================
// Column Selection Tests
// =============================================================================

/// Non-default fields are a subset of the fields with default columns.
#[test]
fn test_default_columns_superset() {
    let studio = studio();
    let movie = movie(&studio);

    for include_readable in [false, true] {
        let without = create_model(&movie, ModelOptions::new(false, include_readable)).unwrap();
        let with = create_model(&movie, ModelOptions::new(true, include_readable)).unwrap();

        assert!(!names(&without).contains(&"id"));
        assert!(names(&with).contains(&"id"));
        for name in names(&without) {
            assert!(names(&with).contains(&name));
        }
    }
}

// =============================================================================
// Field Rule Tests
// =============================================================================

/// Movie(title, studio -> Studio nullable) with readable fields.
#[test]
fn test_movie_scenario() {
    let studio = studio();
    let movie = movie(&studio);

    let model = create_model(&movie, ModelOptions::new(false, true)).unwrap();
    assert_eq!(model.name(), "Movie");
    assert_eq!(names(&model), vec!["title", "studio", "studio_readable"]);

    let title = model.field("title").unwrap();
    assert_eq!(title.ty(), &ValueType::Text);
    assert!(title.is_required());

    let fk = model.field("studio").unwrap();
    assert!(fk.is_optional());
    assert_eq!(fk.info(), Some(&FieldInfo::foreign_key("studio")));

    let readable = model.field("studio_readable").unwrap();
    assert_eq!(readable.ty(), &ValueType::Text);
    assert!(readable.is_optional());
    assert!(readable.info().is_none());
}

/// A foreign key with a default is optional and gets a readable companion.
#[test]
fn test_foreign_key_with_default() {
    let studio = studio();
    let table = Table::builder("Award")
        .column(Column::foreign_key("studio", &studio).not_null().with_default(1))
        .build();

    let model = create_model(&table, ModelOptions::new(false, true)).unwrap();
    let fk = model.field("studio").unwrap();

    assert!(fk.is_optional());
    assert!(fk.is_foreign_key());
    assert!(model.field("studio_readable").unwrap().is_optional());

    let fks: Vec<_> = model.foreign_keys().map(|(f, to)| (f.name(), to)).collect();
    assert_eq!(fks, vec![("studio", "studio")]);
}

/// A non-null foreign key without default is not optional, but keeps its
/// null default.
#[test]
fn test_foreign_key_without_default_or_null() {
    let studio = studio();
    let table = Table::builder("Contract")
        .column(Column::foreign_key("studio", &studio).not_null())
        .build();

    let model = create_model(&table, ModelOptions::default()).unwrap();
    let fk = model.field("studio").unwrap();

    assert!(!fk.is_optional());
    assert_eq!(fk.default(), FieldDefault::Null);
}

/// Nullability alone leaves a plain column required.
#[test]
fn test_nullable_plain_column_required() {
    let table = Table::builder("Review")
        .column(Column::text("body").null())
        .column(Column::integer("stars").with_default(3))
        .build();

    let model = create_model(&table, ModelOptions::default()).unwrap();

    assert!(!model.field("body").unwrap().is_optional());
    assert!(model.field("stars").unwrap().is_optional());

    let err = model.validate(&json!({ "stars": 4 })).unwrap_err();
    assert_eq!(err.details().field, "body");
}

/// Tables without user columns produce an empty model that still validates.
#[test]
fn test_empty_table() {
    let table = Table::builder("Marker").build();

    let model = create_model(&table, ModelOptions::default()).unwrap();
    assert!(model.is_empty());

    let record = model.validate(&json!({ "anything": 1 })).unwrap();
    assert_eq!(record.to_json(), json!({}));
}

// =============================================================================
// End-to-end Tests
// =============================================================================

/// Definitions file → model → validated record with uuid encoded as string.
#[test]
fn test_loaded_tables_round_trip_record() {
    let registry = TableRegistry::from_json(
        r#"{ "tables": [
            { "name": "Studio", "columns": [
                { "name": "uid", "type": "uuid", "primary_key": true },
                { "name": "name" }
            ] },
            { "name": "Movie", "columns": [
                { "name": "title", "type": "varchar" },
                { "name": "studio", "references": "Studio" },
                { "name": "released", "type": "date", "default": null }
            ] }
        ] }"#,
    )
    .unwrap();

    let movie = registry.get("Movie").unwrap();
    let model = create_model(movie, ModelOptions::new(false, true)).unwrap();

    let record = model
        .validate(&json!({
            "title": "Metropolis",
            "studio": "67E55044-10B1-426F-9247-BB680E5FE0C8",
            "released": "1927-01-10"
        }))
        .unwrap();

    assert_eq!(
        record.to_json(),
        json!({
            "title": "Metropolis",
            "studio": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "studio_readable": null,
            "released": "1927-01-10"
        })
    );
}
