//! Schema check: column name sets and per-column type tags

use super::result::{ValidationDetails, ValidationResult, ValidationStatus, SCHEMA_VALIDATION};
use crate::table::Table;
use crate::types::{classify, TypeTag};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMismatch {
    pub column: String,
    pub source_type: TypeTag,
    pub target_type: TypeTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDetails {
    pub missing_columns: Vec<String>,
    pub extra_columns: Vec<String>,
    pub common_columns: Vec<String>,
    pub type_mismatches: Vec<TypeMismatch>,
}

fn name_set(table: &Table) -> BTreeSet<&str> {
    table.column_names().collect()
}

/// Names present in both tables, sorted
pub fn common_columns(source: &Table, target: &Table) -> Vec<String> {
    name_set(source)
        .intersection(&name_set(target))
        .map(|s| s.to_string())
        .collect()
}

/// Compare column name sets and the type tag of every shared column
pub fn validate_schema(source: &Table, target: &Table) -> ValidationResult {
    let source_names = name_set(source);
    let target_names = name_set(target);

    let missing: Vec<String> = source_names
        .difference(&target_names)
        .map(|s| s.to_string())
        .collect();
    let extra: Vec<String> = target_names
        .difference(&source_names)
        .map(|s| s.to_string())
        .collect();
    let common: Vec<String> = source_names
        .intersection(&target_names)
        .map(|s| s.to_string())
        .collect();

    let type_mismatches: Vec<TypeMismatch> = common
        .iter()
        .filter_map(|name| {
            let source_type = classify(source.column(name)?);
            let target_type = classify(target.column(name)?);
            (source_type != target_type).then(|| TypeMismatch {
                column: name.clone(),
                source_type,
                target_type,
            })
        })
        .collect();

    let (status, summary) =
        if missing.is_empty() && extra.is_empty() && type_mismatches.is_empty() {
            (ValidationStatus::Pass, "Schema matches perfectly".to_string())
        } else {
            let mut issues = Vec::new();
            if !missing.is_empty() {
                issues.push(format!("{} missing column(s)", missing.len()));
            }
            if !extra.is_empty() {
                issues.push(format!("{} extra column(s)", extra.len()));
            }
            if !type_mismatches.is_empty() {
                issues.push(format!("{} type mismatch(es)", type_mismatches.len()));
            }
            (ValidationStatus::Fail, issues.join(", "))
        };

    ValidationResult::new(
        SCHEMA_VALIDATION,
        status,
        summary,
        ValidationDetails::Schema(SchemaDetails {
            missing_columns: missing,
            extra_columns: extra,
            common_columns: common,
            type_mismatches,
        }),
    )
}
