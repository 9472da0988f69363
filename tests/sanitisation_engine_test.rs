//! End-to-end tests for the sanitisation rule engine

use anonkit::domain::{AnonkitError, Dataset, Series, Value};
use anonkit::rules::{ColumnRule, SanitisationRules};
use anonkit::sanitisation::sanitise;
use serde_json::json;
use std::io::Write;

fn sample_dataset() -> Dataset {
    Dataset::from_columns([
        Series::from_numbers(
            "age",
            [25.0, 40.0, 15.0, 60.0, 18.0, 90.0, 22.0, 45.0, 50.0, 55.0],
        ),
        Series::from_numbers(
            "income",
            [
                50000.0, 80000.0, 65000.0, 120000.0, 20000.0, 90000.0, 55000.0, 75000.0, 85000.0,
                95000.0,
            ],
        ),
        Series::from_texts(
            "name",
            [
                "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack",
            ],
        ),
        Series::from_texts(
            "city",
            [
                "New York",
                "Los Angeles",
                "Chicago",
                "Houston",
                "Phoenix",
                "New York",
                "Chicago",
                "Los Angeles",
                "Dallas",
                "Dallas",
            ],
        ),
    ])
    .unwrap()
}

fn column_texts(dataset: &Dataset, name: &str) -> Vec<String> {
    dataset
        .column(name)
        .unwrap()
        .iter()
        .map(Value::to_string)
        .collect()
}

#[test]
fn test_clip_scenario() {
    let dataset = Dataset::from_columns([Series::from_numbers("age", [25.0, 40.0, 15.0, 90.0])])
        .unwrap();
    let rules = SanitisationRules::new().with_rule(
        "age",
        ColumnRule::new("clip", [("min_value", json!(18)), ("max_value", json!(80))]),
    );

    let result = sanitise(&dataset, &["age"], &rules, false).unwrap();

    let ages: Vec<f64> = result
        .column("age")
        .unwrap()
        .iter()
        .filter_map(Value::as_number)
        .collect();
    assert_eq!(ages, [25.0, 40.0, 18.0, 80.0]);
    assert_eq!(result.height(), dataset.height());
}

#[test]
fn test_suppress_scenario() {
    let dataset = Dataset::from_columns([Series::from_texts(
        "city",
        ["NY", "NY", "LA", "LA", "Chicago"],
    )])
    .unwrap();
    let rules = SanitisationRules::new().with_rule(
        "city",
        ColumnRule::new(
            "suppress",
            [("threshold", json!(2)), ("replacement", json!("Other"))],
        ),
    );

    let result = sanitise(&dataset, &["city"], &rules, false).unwrap();
    assert_eq!(
        column_texts(&result, "city"),
        ["NY", "NY", "LA", "LA", "Other"]
    );
}

#[test]
fn test_suppress_threshold_property() {
    // After suppression, every surviving distinct value (other than the
    // replacement) meets the threshold in the original frequency table.
    let dataset = sample_dataset();
    let rules = SanitisationRules::new().with_rule(
        "city",
        ColumnRule::new(
            "suppress",
            [("threshold", json!(2)), ("replacement", json!("Other"))],
        ),
    );

    let result = sanitise(&dataset, &["city"], &rules, false).unwrap();

    let original = column_texts(&dataset, "city");
    for survivor in column_texts(&result, "city") {
        if survivor == "Other" {
            continue;
        }
        let frequency = original.iter().filter(|c| **c == survivor).count();
        assert!(frequency >= 2, "'{survivor}' survived with frequency {frequency}");
    }
    assert!(!column_texts(&result, "city").contains(&"Phoenix".to_string()));
}

#[test]
fn test_categorise_via_rule_engine() {
    let rules = SanitisationRules::new().with_rule(
        "income",
        ColumnRule::new(
            "categorise",
            [
                ("bins", json!(3)),
                ("labels", json!(["low", "medium", "high"])),
            ],
        ),
    );

    let result = sanitise(&sample_dataset(), &["income"], &rules, false).unwrap();

    for label in column_texts(&result, "income") {
        assert!(["low", "medium", "high"].contains(&label.as_str()));
    }
}

#[test]
fn test_hash_changes_every_value_and_is_reproducible() {
    let dataset = sample_dataset();
    let rules = SanitisationRules::new()
        .with_rule("name", ColumnRule::new("hash", [("salt", json!("test_salt"))]));

    let first = sanitise(&dataset, &["name"], &rules, false).unwrap();
    let second = sanitise(&dataset, &["name"], &rules, false).unwrap();

    let originals = column_texts(&dataset, "name");
    let hashed = column_texts(&first, "name");
    for (original, digest) in originals.iter().zip(hashed.iter()) {
        assert_ne!(original, digest);
    }
    assert_eq!(first.column("name"), second.column("name"));
}

#[test]
fn test_multiple_methods_in_one_call() {
    let rules = SanitisationRules::new()
        .with_rule(
            "age",
            ColumnRule::new("clip", [("min_value", json!(18)), ("max_value", json!(80))]),
        )
        .with_rule(
            "income",
            ColumnRule::new(
                "categorise",
                [
                    ("bins", json!(3)),
                    ("labels", json!(["low", "medium", "high"])),
                ],
            ),
        )
        .with_rule(
            "city",
            ColumnRule::new(
                "suppress",
                [("threshold", json!(2)), ("replacement", json!("Other"))],
            ),
        );

    let result = sanitise(&sample_dataset(), &["age", "income", "city"], &rules, false).unwrap();

    let ages: Vec<f64> = result
        .column("age")
        .unwrap()
        .iter()
        .filter_map(Value::as_number)
        .collect();
    assert!(ages.iter().all(|a| (18.0..=80.0).contains(a)));
    for label in column_texts(&result, "income") {
        assert!(["low", "medium", "high"].contains(&label.as_str()));
    }
    assert!(column_texts(&result, "city").contains(&"Other".to_string()));
}

#[test]
fn test_error_handling() {
    let dataset = sample_dataset();

    let missing_column_rules = SanitisationRules::new()
        .with_rule("invalid_column", ColumnRule::new("clip", []));
    let err = sanitise(&dataset, &["invalid_column"], &missing_column_rules, false).unwrap_err();
    assert!(err.to_string().contains("'invalid_column' not found"));

    let bad_method_rules =
        SanitisationRules::new().with_rule("age", ColumnRule::new("invalid_method", []));
    let err = sanitise(&dataset, &["age"], &bad_method_rules, false).unwrap_err();
    assert!(err.to_string().contains("Unknown sanitisation method"));

    let no_params_rules = SanitisationRules::new().with_rule("age", ColumnRule::new("clip", []));
    let err = sanitise(&dataset, &["age"], &no_params_rules, false).unwrap_err();
    assert!(matches!(err, AnonkitError::MissingParameter { .. }));
}

#[test]
fn test_empty_dataset() {
    let empty = Dataset::from_columns([
        Series::new("age", vec![]),
        Series::new("income", vec![]),
        Series::new("name", vec![]),
        Series::new("city", vec![]),
    ])
    .unwrap();
    let rules = SanitisationRules::new().with_rule(
        "age",
        ColumnRule::new("clip", [("min_value", json!(18)), ("max_value", json!(80))]),
    );

    let result = sanitise(&empty, &["age"], &rules, false).unwrap();
    assert_eq!(result.height(), 0);
    assert_eq!(result.column_names(), empty.column_names());
}

#[test]
fn test_rules_loaded_from_toml_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"
        [age]
        method = "clip"
        params = {{ min_value = 18, max_value = 80 }}

        [city]
        method = "suppress"
        params = {{ threshold = 2, replacement = "Other" }}
        "#
    )?;

    let rules = SanitisationRules::from_file(file.path())?;
    let result = sanitise(&sample_dataset(), &["age", "city"], &rules, false)?;

    let ages: Vec<f64> = result
        .column("age")
        .unwrap()
        .iter()
        .filter_map(Value::as_number)
        .collect();
    assert!(ages.iter().all(|a| (18.0..=80.0).contains(a)));
    Ok(())
}

#[test]
fn test_rules_file_not_found() {
    let err = SanitisationRules::from_file("/nonexistent/rules.toml").unwrap_err();
    assert!(matches!(err, AnonkitError::RuleSpec(message) if message.contains("not found")));
}
