//! Validation report envelope handed to clients and renderers

use crate::config::{Environment, ReportSettings};
use crate::table::Table;
use crate::validation::{ValidationOutcome, ValidationResult, ValidationStatus};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

impl TableShape {
    pub fn of(table: &Table) -> Self {
        Self {
            rows: table.row_count(),
            columns: table.column_count(),
        }
    }
}

/// The outcome of comparing two exports together with the labels needed to
/// present it
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub overall_status: ValidationStatus,
    pub validation_date: DateTime<Local>,
    pub project_name: String,
    pub report_name: String,
    pub environment: Environment,
    pub source_file: String,
    pub target_file: String,
    pub source_shape: TableShape,
    pub target_shape: TableShape,
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn new(
        settings: &ReportSettings,
        source_file: impl Into<String>,
        target_file: impl Into<String>,
        source: &Table,
        target: &Table,
        outcome: ValidationOutcome,
    ) -> Self {
        Self {
            success: true,
            overall_status: outcome.overall_status(),
            validation_date: Local::now(),
            project_name: settings.project_name.clone(),
            report_name: settings.report_name.clone(),
            environment: settings.environment,
            source_file: source_file.into(),
            target_file: target_file.into(),
            source_shape: TableShape::of(source),
            target_shape: TableShape::of(target),
            results: outcome.into_results(),
        }
    }

    /// File name for a saved report, stamped with the validation time
    pub fn suggested_file_name(&self) -> String {
        format!(
            "DataSure_Validation_Report_{}.json",
            self.validation_date.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn result(&self, name: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.name() == name)
    }
}
