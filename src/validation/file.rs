//! File-level shape check: row and column counts

use super::result::{ValidationDetails, ValidationResult, ValidationStatus, FILE_VALIDATION};
use crate::table::Table;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDetails {
    pub row_count_1: usize,
    pub row_count_2: usize,
    pub column_count_1: usize,
    pub column_count_2: usize,
    pub row_match: bool,
    pub column_match: bool,
}

/// Compare row and column counts. Any mismatch fails.
pub fn validate_file_level(source: &Table, target: &Table) -> ValidationResult {
    let details = FileDetails {
        row_count_1: source.row_count(),
        row_count_2: target.row_count(),
        column_count_1: source.column_count(),
        column_count_2: target.column_count(),
        row_match: source.row_count() == target.row_count(),
        column_match: source.column_count() == target.column_count(),
    };

    let (status, summary) = if details.row_match && details.column_match {
        (ValidationStatus::Pass, "File structure matches".to_string())
    } else {
        let mut issues = Vec::new();
        if !details.row_match {
            issues.push(format!(
                "row count mismatch ({} vs {})",
                details.row_count_1, details.row_count_2
            ));
        }
        if !details.column_match {
            issues.push(format!(
                "column count mismatch ({} vs {})",
                details.column_count_1, details.column_count_2
            ));
        }
        (ValidationStatus::Fail, issues.join(", "))
    };

    ValidationResult::new(FILE_VALIDATION, status, summary, ValidationDetails::File(details))
}
