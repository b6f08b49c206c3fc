//! Column statistics check
//!
//! Numeric columns (both sides integer or float) are compared on null count,
//! min, max and sum; every other column on null count and distinct count.
//! Aggregates over an all-null column are `None`, never zero.

use super::result::{ValidationDetails, ValidationResult, ValidationStatus, COLUMN_STATISTICS};
use super::schema::common_columns;
use crate::table::{Column, Table, Value};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub column: String,
    pub source_nulls: usize,
    pub target_nulls: usize,
    pub source_min: Option<f64>,
    pub target_min: Option<f64>,
    pub source_max: Option<f64>,
    pub target_max: Option<f64>,
    pub source_sum: Option<f64>,
    pub target_sum: Option<f64>,
    #[serde(rename = "match")]
    pub is_match: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalStats {
    pub column: String,
    pub source_nulls: usize,
    pub target_nulls: usize,
    pub source_unique: usize,
    pub target_unique: usize,
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// Per-column statistics record, tagged `numeric` or `non-numeric`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ColumnStats {
    #[serde(rename = "numeric")]
    Numeric(NumericStats),
    #[serde(rename = "non-numeric")]
    NonNumeric(CategoricalStats),
}

impl ColumnStats {
    pub fn column(&self) -> &str {
        match self {
            ColumnStats::Numeric(s) => &s.column,
            ColumnStats::NonNumeric(s) => &s.column,
        }
    }

    pub fn is_match(&self) -> bool {
        match self {
            ColumnStats::Numeric(s) => s.is_match,
            ColumnStats::NonNumeric(s) => s.is_match,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsDetails {
    pub stats: Vec<ColumnStats>,
    pub mismatch_count: usize,
}

/// Null count and min/max/sum of a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericSummary {
    pub nulls: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sum: Option<f64>,
}

impl NumericSummary {
    pub fn of(column: &Column) -> Self {
        let mut nulls = 0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        // Integer part is summed exactly; only the final value is widened.
        let mut int_sum: i128 = 0;
        let mut float_sum = 0.0f64;
        let mut seen = false;

        for value in column.values() {
            if value.is_missing() {
                nulls += 1;
                continue;
            }
            let x = match value {
                Value::Integer(i) => {
                    int_sum += i128::from(*i);
                    *i as f64
                }
                Value::Float(f) => {
                    float_sum += f;
                    *f
                }
                _ => continue,
            };
            seen = true;
            min = Some(min.map_or(x, |m| m.min(x)));
            max = Some(max.map_or(x, |m| m.max(x)));
        }

        Self {
            nulls,
            min,
            max,
            sum: seen.then(|| int_sum as f64 + float_sum),
        }
    }
}

/// Hashable identity of a non-missing value for distinct counting
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Boolean(bool),
    Integer(i64),
    Float(u64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Text(&'a str),
}

impl<'a> ValueKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            _ if value.is_missing() => None,
            Value::Boolean(b) => Some(Self::Boolean(*b)),
            Value::Integer(i) => Some(Self::Integer(*i)),
            // -0.0 and 0.0 are the same value
            Value::Float(f) => Some(Self::Float(if *f == 0.0 { 0 } else { f.to_bits() })),
            Value::Date(d) => Some(Self::Date(*d)),
            Value::Timestamp(ts) => Some(Self::Timestamp(*ts)),
            Value::Text(s) => Some(Self::Text(s)),
            Value::Null => None,
        }
    }
}

/// Number of distinct non-missing values in a column
pub fn distinct_count(column: &Column) -> usize {
    column
        .values()
        .iter()
        .filter_map(ValueKey::of)
        .collect::<HashSet<_>>()
        .len()
}

fn compare_column(name: &str, source: &Column, target: &Column) -> ColumnStats {
    match (source.type_tag().is_numeric(), target.type_tag().is_numeric()) {
        (true, true) => {
            let s = NumericSummary::of(source);
            let t = NumericSummary::of(target);
            ColumnStats::Numeric(NumericStats {
                column: name.to_string(),
                source_nulls: s.nulls,
                target_nulls: t.nulls,
                source_min: s.min,
                target_min: t.min,
                source_max: s.max,
                target_max: t.max,
                source_sum: s.sum,
                target_sum: t.sum,
                is_match: s == t,
            })
        }
        _ => {
            let source_nulls = source.null_count();
            let target_nulls = target.null_count();
            let source_unique = distinct_count(source);
            let target_unique = distinct_count(target);
            ColumnStats::NonNumeric(CategoricalStats {
                column: name.to_string(),
                source_nulls,
                target_nulls,
                source_unique,
                target_unique,
                is_match: source_nulls == target_nulls && source_unique == target_unique,
            })
        }
    }
}

/// Compare aggregate statistics of every column present in both tables
pub fn validate_column_stats(source: &Table, target: &Table) -> ValidationResult {
    let common = common_columns(source, target);

    if common.is_empty() {
        return ValidationResult::new(
            COLUMN_STATISTICS,
            ValidationStatus::Warning,
            "No common columns to compare",
            ValidationDetails::Stats(StatsDetails {
                stats: Vec::new(),
                mismatch_count: 0,
            }),
        );
    }

    let stats: Vec<ColumnStats> = common
        .iter()
        .filter_map(|name| {
            Some(compare_column(name, source.column(name)?, target.column(name)?))
        })
        .collect();
    let mismatch_count = stats.iter().filter(|s| !s.is_match()).count();

    let (status, summary) = if mismatch_count > 0 {
        (
            ValidationStatus::Fail,
            format!("{} column(s) with statistical differences", mismatch_count),
        )
    } else {
        (ValidationStatus::Pass, "All column statistics match".to_string())
    };

    ValidationResult::new(
        COLUMN_STATISTICS,
        status,
        summary,
        ValidationDetails::Stats(StatsDetails {
            stats,
            mismatch_count,
        }),
    )
}
