//! The comparison engine: four independent checks and their aggregate verdict

pub mod file;
pub mod result;
pub mod rows;
pub mod schema;
pub mod stats;

pub use file::{validate_file_level, FileDetails};
pub use result::{
    aggregate_statuses, compute_overall_status, ValidationDetails, ValidationResult,
    ValidationStatus, COLUMN_STATISTICS, FILE_VALIDATION, ROW_LEVEL_DIFFERENCES,
    SCHEMA_VALIDATION,
};
pub use rows::{validate_row_level, RowDetails, RowDifference, DEFAULT_MAX_DIFFERENCES};
pub use schema::{validate_schema, SchemaDetails, TypeMismatch};
pub use stats::{validate_column_stats, ColumnStats, StatsDetails};

use crate::table::Table;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Cap on enumerated row-level differences
    pub max_differences: usize,
    /// Run the four checks on the rayon pool
    pub parallel: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            max_differences: DEFAULT_MAX_DIFFERENCES,
            parallel: true,
        }
    }
}

/// The four check results, in fixed order, plus the overall verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    overall_status: ValidationStatus,
    results: Vec<ValidationResult>,
}

impl ValidationOutcome {
    pub fn overall_status(&self) -> ValidationStatus {
        self.overall_status
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn result(&self, name: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.name() == name)
    }

    pub fn into_results(self) -> Vec<ValidationResult> {
        self.results
    }
}

/// Run every check on `source` vs `target`
pub fn validate(source: &Table, target: &Table, options: &CompareOptions) -> ValidationOutcome {
    let max_differences = options.max_differences;

    let (file, schema, stats, rows) = if options.parallel {
        let ((file, schema), (stats, rows)) = rayon::join(
            || {
                rayon::join(
                    || validate_file_level(source, target),
                    || validate_schema(source, target),
                )
            },
            || {
                rayon::join(
                    || validate_column_stats(source, target),
                    || validate_row_level(source, target, max_differences),
                )
            },
        );
        (file, schema, stats, rows)
    } else {
        (
            validate_file_level(source, target),
            validate_schema(source, target),
            validate_column_stats(source, target),
            validate_row_level(source, target, max_differences),
        )
    };

    let results = vec![file, schema, stats, rows];
    for result in &results {
        debug!("{}: {} - {}", result.name(), result.status(), result.summary());
    }

    let overall_status = compute_overall_status(&results);
    info!("Validation finished with overall status {}", overall_status);

    ValidationOutcome {
        overall_status,
        results,
    }
}
