//! Row-level positional comparison

use super::result::{ValidationDetails, ValidationResult, ValidationStatus, ROW_LEVEL_DIFFERENCES};
use crate::table::{Column, Table, Value};
use chrono::NaiveTime;
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_MAX_DIFFERENCES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDifference {
    pub row_index: usize,
    pub column: String,
    pub source_value: String,
    pub target_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDetails {
    pub differences: Vec<RowDifference>,
    pub max_differences: usize,
    pub truncated: bool,
}

/// Cell equality used by the differ: two missing values are equal, missing
/// never equals a concrete value, integers and floats compare numerically
/// and a date equals the midnight timestamp of the same day.
pub fn cells_equal(left: &Value, right: &Value) -> bool {
    match (left.is_missing(), right.is_missing()) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                left.as_f64() == right.as_f64()
            }
            (Value::Date(d), Value::Timestamp(ts)) | (Value::Timestamp(ts), Value::Date(d)) => {
                d.and_time(NaiveTime::MIN) == *ts
            }
            _ => left == right,
        },
    }
}

fn skipped(summary: &str, max_differences: usize) -> ValidationResult {
    ValidationResult::new(
        ROW_LEVEL_DIFFERENCES,
        ValidationStatus::Warning,
        summary,
        ValidationDetails::Rows(RowDetails {
            differences: Vec::new(),
            max_differences,
            truncated: false,
        }),
    )
}

/// Compare cells by row index, pairing the target's columns to the source's
/// column order. The walk stops as soon as `max_differences` is reached.
pub fn validate_row_level(source: &Table, target: &Table, max_differences: usize) -> ValidationResult {
    if source.row_count() != target.row_count() {
        return skipped("Cannot compare rows - row counts differ", max_differences);
    }

    let source_names: HashSet<&str> = source.column_names().collect();
    let target_names: HashSet<&str> = target.column_names().collect();
    if source_names != target_names {
        return skipped("Cannot compare rows - column names differ", max_differences);
    }

    let pairs: Vec<(&Column, &Column)> = source
        .columns()
        .filter_map(|left| Some((left, target.column(left.name())?)))
        .collect();

    let mut differences = Vec::new();
    let mut truncated = false;

    'rows: for row_index in 0..source.row_count() {
        for (left, right) in &pairs {
            let (Some(a), Some(b)) = (left.get(row_index), right.get(row_index)) else {
                continue;
            };
            if cells_equal(a, b) {
                continue;
            }

            if differences.len() < max_differences {
                differences.push(RowDifference {
                    row_index,
                    column: left.name().to_string(),
                    source_value: a.display_string(),
                    target_value: b.display_string(),
                });
            }
            if differences.len() >= max_differences {
                truncated = true;
                break 'rows;
            }
        }
    }

    let (status, summary) = if differences.is_empty() && !truncated {
        (ValidationStatus::Pass, "All rows match perfectly".to_string())
    } else if truncated {
        (
            ValidationStatus::Fail,
            format!(
                "Found {} difference(s) (showing first {})",
                differences.len(),
                max_differences
            ),
        )
    } else {
        (
            ValidationStatus::Fail,
            format!("Found {} difference(s)", differences.len()),
        )
    };

    log::debug!(
        "Row comparison over {} rows x {} columns: {} difference(s){}",
        source.row_count(),
        pairs.len(),
        differences.len(),
        if truncated { " (capped)" } else { "" }
    );

    ValidationResult::new(
        ROW_LEVEL_DIFFERENCES,
        status,
        summary,
        ValidationDetails::Rows(RowDetails {
            differences,
            max_differences,
            truncated,
        }),
    )
}
