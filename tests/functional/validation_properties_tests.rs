//! Behavioural properties of the comparison engine on in-memory tables

use chrono::NaiveDate;
use datasure::validation::{
    validate_column_stats, validate_file_level, validate_row_level, validate_schema,
    ValidationDetails, ValidationResult, COLUMN_STATISTICS, FILE_VALIDATION,
    ROW_LEVEL_DIFFERENCES, SCHEMA_VALIDATION,
};
use datasure::{
    compute_overall_status, validate, Column, CompareOptions, DataType, Table, ValidationStatus,
    Value,
};

fn wide_table() -> Table {
    let day = |d| {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    };
    Table::new(vec![
        Column::integers("id", vec![1i64, 2, 3, 4]),
        Column::floats("price", vec![Some(9.99f64), None, Some(0.5), Some(-3.25)]),
        Column::strings("label", vec![Some("a"), Some("b"), None, Some("a")]),
        Column::booleans("active", vec![Some(true), Some(false), None, Some(true)]),
        Column::timestamps("created", vec![Some(day(1)), Some(day(2)), Some(day(3)), None]),
        Column::new("code", DataType::Other("BLOB".to_string()), vec![Value::from("x"); 4]),
    ])
    .unwrap()
}

fn status_of(result: &ValidationResult) -> ValidationStatus {
    result.status()
}

#[test]
fn test_identical_tables_pass_every_check() {
    let table = wide_table();
    let outcome = validate(&table, &table.clone(), &CompareOptions::default());

    assert_eq!(outcome.results().len(), 4);
    for result in outcome.results() {
        assert_eq!(status_of(result), ValidationStatus::Pass, "{} should pass", result.name());
    }
    assert_eq!(outcome.overall_status(), ValidationStatus::Pass);
}

#[test]
fn test_self_comparison_has_no_differences() {
    let table = wide_table();
    let result = validate_row_level(&table, &table, 100);
    assert_eq!(result.status(), ValidationStatus::Pass);
    assert!(result.details().as_rows().unwrap().differences.is_empty());
}

#[test]
fn test_file_shape_row_mismatch() {
    let a = Table::new(vec![Column::integers("a", vec![1i64, 2, 3])]).unwrap();
    let b = Table::new(vec![Column::integers("a", vec![1i64, 2])]).unwrap();

    let result = validate_file_level(&a, &b);
    let details = result.details().as_file().unwrap();
    assert_eq!(result.status(), ValidationStatus::Fail);
    assert!(!details.row_match);
    assert!(details.column_match);
    assert_eq!((details.row_count_1, details.row_count_2), (3, 2));
}

#[test]
fn test_schema_missing_column() {
    let a = Table::new(vec![
        Column::integers("a", vec![1i64]),
        Column::integers("b", vec![1i64]),
        Column::integers("c", vec![1i64]),
    ])
    .unwrap();
    let b = Table::new(vec![
        Column::integers("a", vec![1i64]),
        Column::integers("b", vec![1i64]),
    ])
    .unwrap();

    let result = validate_schema(&a, &b);
    let details = result.details().as_schema().unwrap();
    assert_eq!(result.status(), ValidationStatus::Fail);
    assert_eq!(details.missing_columns, vec!["c".to_string()]);
    assert!(details.extra_columns.is_empty());
}

#[test]
fn test_schema_integer_vs_string_storage() {
    let a = Table::new(vec![Column::integers("a", vec![1i64, 2, 3])]).unwrap();
    let b = Table::new(vec![Column::strings("a", vec!["1", "2", "3"])]).unwrap();

    let result = validate_schema(&a, &b);
    let details = result.details().as_schema().unwrap();
    assert_eq!(result.status(), ValidationStatus::Fail);
    assert_eq!(details.type_mismatches.len(), 1);
    assert_eq!(details.type_mismatches[0].column, "a");
}

#[test]
fn test_stats_sum_mismatch() {
    let a = Table::new(vec![Column::integers("a", vec![1i64, 2, 3])]).unwrap();
    let b = Table::new(vec![Column::integers("a", vec![1i64, 2, 4])]).unwrap();

    let result = validate_column_stats(&a, &b);
    assert_eq!(result.status(), ValidationStatus::Fail);
    assert_eq!(result.details().as_stats().unwrap().mismatch_count, 1);
}

#[test]
fn test_stats_without_overlap_warns() {
    let a = Table::new(vec![Column::integers("a", vec![1i64])]).unwrap();
    let b = Table::new(vec![Column::integers("b", vec![1i64])]).unwrap();

    let result = validate_column_stats(&a, &b);
    assert_eq!(result.status(), ValidationStatus::Warning);
    assert!(result.details().as_stats().unwrap().stats.is_empty());
}

#[test]
fn test_rows_missing_equals_missing() {
    let a = Table::new(vec![Column::integers("a", vec![Some(1i64), None, Some(3)])]).unwrap();
    let b = Table::new(vec![Column::integers("a", vec![Some(1i64), None, Some(3)])]).unwrap();
    assert_eq!(validate_row_level(&a, &b, 100).status(), ValidationStatus::Pass);
}

#[test]
fn test_rows_short_circuit_ignores_content() {
    let a = Table::new(vec![Column::integers("a", vec![1i64, 2, 3])]).unwrap();
    let b = Table::new(vec![Column::integers("a", vec![7i64, 8])]).unwrap();

    let result = validate_row_level(&a, &b, 100);
    assert_eq!(result.status(), ValidationStatus::Warning);
    assert!(result.details().as_rows().unwrap().differences.is_empty());
}

#[test]
fn test_rows_cap_at_one_hundred_of_one_fifty() {
    let a = Table::new(vec![Column::integers("n", (0..150i64).collect::<Vec<_>>())]).unwrap();
    let b = Table::new(vec![Column::integers("n", (0..150i64).map(|n| n + 1).collect::<Vec<_>>())])
        .unwrap();

    let result = validate_row_level(&a, &b, 100);
    let details = result.details().as_rows().unwrap();
    assert_eq!(result.status(), ValidationStatus::Fail);
    assert_eq!(details.differences.len(), 100);
    assert!(details.truncated);
    assert!(result.summary().contains("showing first 100"));
}

#[test]
fn test_permuted_rows_are_reported_positionally() {
    let a = Table::new(vec![Column::strings("k", vec!["x", "y", "z"])]).unwrap();
    let b = Table::new(vec![Column::strings("k", vec!["z", "x", "y"])]).unwrap();

    let outcome = validate(&a, &b, &CompareOptions::default());
    // Same multiset, so statistics agree; positions do not.
    assert_eq!(outcome.result(COLUMN_STATISTICS).unwrap().status(), ValidationStatus::Pass);
    let rows = outcome.result(ROW_LEVEL_DIFFERENCES).unwrap();
    assert_eq!(rows.details().as_rows().unwrap().differences.len(), 3);
    assert_eq!(outcome.overall_status(), ValidationStatus::Fail);
}

#[test]
fn test_aggregator_precedence() {
    let table = wide_table();
    let pass = validate_file_level(&table, &table);
    let warn = validate_row_level(
        &table,
        &Table::new(vec![Column::integers("id", vec![1i64])]).unwrap(),
        100,
    );
    let fail = validate_file_level(&table, &Table::new(Vec::new()).unwrap());

    assert_eq!(pass.status(), ValidationStatus::Pass);
    assert_eq!(warn.status(), ValidationStatus::Warning);
    assert_eq!(fail.status(), ValidationStatus::Fail);

    assert_eq!(
        compute_overall_status(&[pass.clone(), warn.clone(), fail.clone()]),
        ValidationStatus::Fail
    );
    assert_eq!(
        compute_overall_status(&[pass.clone(), warn.clone(), pass.clone()]),
        ValidationStatus::Warning
    );
    assert_eq!(
        compute_overall_status(&[pass.clone(), pass.clone(), pass.clone(), pass]),
        ValidationStatus::Pass
    );
}

#[test]
fn test_results_serialize_with_fixed_names_and_detail_shapes() {
    let table = wide_table();
    let outcome = validate(&table, &table, &CompareOptions::default());
    let json = serde_json::to_value(outcome.results()).unwrap();

    assert_eq!(json[0]["name"], FILE_VALIDATION);
    assert_eq!(json[0]["details"]["row_count_1"], 4);
    assert_eq!(json[1]["name"], SCHEMA_VALIDATION);
    assert_eq!(json[1]["details"]["common_columns"].as_array().unwrap().len(), 6);
    assert_eq!(json[2]["name"], COLUMN_STATISTICS);
    assert_eq!(json[2]["details"]["stats"][0]["column"], "active");
    assert_eq!(json[3]["name"], ROW_LEVEL_DIFFERENCES);
    assert_eq!(json[3]["details"]["max_differences"], 100);
    assert_eq!(json[3]["status"], "pass");

    assert!(matches!(outcome.results()[2].details(), ValidationDetails::Stats(_)));
}
