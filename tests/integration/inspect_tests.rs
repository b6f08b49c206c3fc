//! Integration tests for the inspect command

use crate::common::{sample_data, CliTestRunner};
use datasure::commands::CommandStatus;
use datasure::{TableLoader, TypeTag};

#[test]
fn test_inspect_pretty() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();

    let status = runner.expect_success(&["inspect", path.to_str().unwrap()]);
    assert_eq!(status, CommandStatus::Success);
}

#[test]
fn test_inspect_json() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();

    let status = runner.expect_success(&["inspect", path.to_str().unwrap(), "--format", "json"]);
    assert_eq!(status, CommandStatus::Success);
}

#[test]
fn test_inspect_missing_file() {
    let runner = CliTestRunner::new().unwrap();
    let missing = runner.fixture().root().join("nope.csv");

    let err = runner.expect_failure(&["inspect", missing.to_str().unwrap()]);
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_inspect_descriptors_match_loaded_types() {
    let runner = CliTestRunner::new().unwrap();
    let path = runner.fixture().create_csv("cognos.csv", &sample_data::cognos_export()).unwrap();

    let table = TableLoader::new().unwrap().load_file(&path).unwrap();
    let descriptors = table.descriptors();

    let tags: Vec<(String, TypeTag)> = descriptors
        .iter()
        .map(|d| (d.name.clone(), d.type_tag))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("order_id".to_string(), TypeTag::Integer),
            ("region".to_string(), TypeTag::String),
            ("amount".to_string(), TypeTag::Float),
            ("shipped".to_string(), TypeTag::Boolean),
        ]
    );

    let json = serde_json::to_value(&descriptors).unwrap();
    assert_eq!(json[0]["type_tag"], "integer");
    assert_eq!(json[0]["data_type"], "BIGINT");
}
