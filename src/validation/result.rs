//! Validation result records and the status aggregation rule

use super::file::FileDetails;
use super::rows::RowDetails;
use super::schema::SchemaDetails;
use super::stats::StatsDetails;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FILE_VALIDATION: &str = "File Validation";
pub const SCHEMA_VALIDATION: &str = "Schema Validation";
pub const COLUMN_STATISTICS: &str = "Column Statistics";
pub const ROW_LEVEL_DIFFERENCES: &str = "Row Level Differences";

/// Outcome of a single check. Ordering follows severity so the most severe
/// status of a set is its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Warning,
    Fail,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Pass => "pass",
            ValidationStatus::Warning => "warning",
            ValidationStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Check-specific payload of a [`ValidationResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidationDetails {
    File(FileDetails),
    Schema(SchemaDetails),
    Stats(StatsDetails),
    Rows(RowDetails),
}

impl ValidationDetails {
    pub fn as_file(&self) -> Option<&FileDetails> {
        match self {
            Self::File(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&SchemaDetails> {
        match self {
            Self::Schema(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&StatsDetails> {
        match self {
            Self::Stats(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&RowDetails> {
        match self {
            Self::Rows(d) => Some(d),
            _ => None,
        }
    }
}

/// Result of one validation check. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    name: &'static str,
    status: ValidationStatus,
    summary: String,
    details: ValidationDetails,
}

impl ValidationResult {
    pub fn new(
        name: &'static str,
        status: ValidationStatus,
        summary: impl Into<String>,
        details: ValidationDetails,
    ) -> Self {
        Self {
            name,
            status,
            summary: summary.into(),
            details,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn details(&self) -> &ValidationDetails {
        &self.details
    }
}

/// Reduce statuses with precedence FAIL > WARNING > PASS
pub fn aggregate_statuses<I>(statuses: I) -> ValidationStatus
where
    I: IntoIterator<Item = ValidationStatus>,
{
    statuses.into_iter().max().unwrap_or(ValidationStatus::Pass)
}

/// Overall verdict for a set of results
pub fn compute_overall_status(results: &[ValidationResult]) -> ValidationStatus {
    aggregate_statuses(results.iter().map(ValidationResult::status))
}
