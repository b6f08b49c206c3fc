//! End-to-end migration scenarios: legacy export vs migrated export

use crate::common::{report_json, sample_data, CliTestRunner};
use datasure::commands::CommandStatus;
use datasure::validation::{
    COLUMN_STATISTICS, FILE_VALIDATION, ROW_LEVEL_DIFFERENCES, SCHEMA_VALIDATION,
};

#[test]
fn test_reordered_columns_still_pass() {
    let runner = CliTestRunner::new().unwrap();
    let source = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();
    let target = runner
        .fixture()
        .create_csv("powerbi.csv", &sample_data::powerbi_export_matching())
        .unwrap();

    let report = runner.compare_report(&source, &target, &["--fail-on-mismatch"]);
    assert_eq!(report["overall_status"], "pass");

    let schema = report_json::result(&report, SCHEMA_VALIDATION);
    assert_eq!(
        schema["details"]["common_columns"],
        serde_json::json!(["amount", "order_id", "region", "shipped"])
    );
    assert_eq!(report_json::status(&report, ROW_LEVEL_DIFFERENCES), "pass");
}

#[test]
fn test_drifted_amount_is_caught() {
    let runner = CliTestRunner::new().unwrap();
    let source = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();
    let target = runner
        .fixture()
        .create_csv("powerbi.csv", &sample_data::powerbi_export_drifted())
        .unwrap();

    let report = runner.compare_report(&source, &target, &[]);
    assert_eq!(report["overall_status"], "fail");
    assert_eq!(report_json::status(&report, FILE_VALIDATION), "pass");
    assert_eq!(report_json::status(&report, SCHEMA_VALIDATION), "pass");

    let stats = report_json::result(&report, COLUMN_STATISTICS);
    assert_eq!(stats["status"], "fail");
    assert_eq!(stats["details"]["mismatch_count"], 1);
    assert_eq!(stats["summary"], "1 column(s) with statistical differences");
    let amount = stats["details"]["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["column"] == "amount")
        .unwrap();
    assert_eq!(amount["type"], "numeric");
    assert_eq!(amount["match"], false);
    assert_eq!(amount["source_nulls"], 1);

    let rows = report_json::result(&report, ROW_LEVEL_DIFFERENCES);
    assert_eq!(rows["status"], "fail");
    assert_eq!(rows["summary"], "Found 1 difference(s)");
    let diff = &rows["details"]["differences"][0];
    assert_eq!(diff["row_index"], 1);
    assert_eq!(diff["column"], "amount");
    assert_eq!(diff["source_value"], "99.99");
    assert_eq!(diff["target_value"], "99.95");
}

#[test]
fn test_fail_on_mismatch_signals_failure() {
    let runner = CliTestRunner::new().unwrap();
    let source = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();
    let target = runner
        .fixture()
        .create_csv("powerbi.csv", &sample_data::powerbi_export_drifted())
        .unwrap();

    let status = runner.expect_success(&[
        "compare",
        source.to_str().unwrap(),
        target.to_str().unwrap(),
        "--fail-on-mismatch",
    ]);
    assert_eq!(status, CommandStatus::ValidationFailed);
}

#[test]
fn test_fail_on_mismatch_with_passing_exports() {
    let runner = CliTestRunner::new().unwrap();
    let source = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();
    let target = runner.fixture().create_csv("powerbi.csv", &sample_data::cognos_export()).unwrap();

    let status = runner.expect_success(&[
        "compare",
        source.to_str().unwrap(),
        target.to_str().unwrap(),
        "--fail-on-mismatch",
    ]);
    assert_eq!(status, CommandStatus::Success);
}

#[test]
fn test_wholesale_drift_is_capped_at_default() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let source = fixture.create_sequence_csv("a.csv", "n", 0..150).unwrap();
    let target = fixture.create_sequence_csv("b.csv", "n", 1..151).unwrap();

    let report = runner.compare_report(&source, &target, &[]);
    let rows = report_json::result(&report, ROW_LEVEL_DIFFERENCES);
    assert_eq!(rows["details"]["differences"].as_array().unwrap().len(), 100);
    assert_eq!(rows["details"]["truncated"], true);
    assert_eq!(rows["summary"], "Found 100 difference(s) (showing first 100)");
    // Differences are enumerated in row order
    assert_eq!(rows["details"]["differences"][0]["row_index"], 0);
    assert_eq!(rows["details"]["differences"][99]["row_index"], 99);
}

#[test]
fn test_custom_cap_on_command_line() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let source = fixture.create_sequence_csv("a.csv", "n", 0..150).unwrap();
    let target = fixture.create_sequence_csv("b.csv", "n", 1..151).unwrap();

    let report = runner.compare_report(&source, &target, &["--max-differences", "10"]);
    let rows = report_json::result(&report, ROW_LEVEL_DIFFERENCES);
    assert_eq!(rows["details"]["differences"].as_array().unwrap().len(), 10);
    assert_eq!(rows["details"]["max_differences"], 10);
    assert_eq!(rows["summary"], "Found 10 difference(s) (showing first 10)");
}

#[test]
fn test_integer_export_vs_float_export() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let source = fixture.create_file("legacy.csv", b"id,qty\n1,10\n2,20\n").unwrap();
    let target = fixture.create_file("migrated.csv", b"id,qty\n1,10.0\n2,20.0\n").unwrap();

    let report = runner.compare_report(&source, &target, &[]);

    let schema = report_json::result(&report, SCHEMA_VALIDATION);
    assert_eq!(schema["status"], "fail");
    assert_eq!(schema["summary"], "1 type mismatch(es)");
    let mismatch = &schema["details"]["type_mismatches"][0];
    assert_eq!(mismatch["column"], "qty");
    assert_eq!(mismatch["source_type"], "integer");
    assert_eq!(mismatch["target_type"], "float");

    // Values are numerically equal, so only the schema check objects
    assert_eq!(report_json::status(&report, COLUMN_STATISTICS), "pass");
    assert_eq!(report_json::status(&report, ROW_LEVEL_DIFFERENCES), "pass");
    assert_eq!(report["overall_status"], "fail");
}

#[test]
fn test_dropped_column_in_migration() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    let source = fixture.create_file("legacy.csv", b"id,region,amount\n1,N,5\n2,S,6\n").unwrap();
    let target = fixture.create_file("migrated.csv", b"id,amount\n1,5\n2,6\n").unwrap();

    let report = runner.compare_report(&source, &target, &[]);

    let file = report_json::result(&report, FILE_VALIDATION);
    assert_eq!(file["status"], "fail");
    assert_eq!(file["summary"], "column count mismatch (3 vs 2)");

    let schema = report_json::result(&report, SCHEMA_VALIDATION);
    assert_eq!(schema["summary"], "1 missing column(s)");

    assert_eq!(report_json::status(&report, COLUMN_STATISTICS), "pass");
    assert_eq!(report_json::status(&report, ROW_LEVEL_DIFFERENCES), "warning");
}
