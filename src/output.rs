//! Output formatting utilities

use crate::error::Result;
use crate::report::ValidationReport;
use crate::table::{format_float, ColumnDescriptor};
use crate::validation::{
    ColumnStats, RowDetails, SchemaDetails, StatsDetails, ValidationDetails, ValidationResult,
    ValidationStatus,
};

/// Number of row differences listed in pretty output
const PRETTY_DIFFERENCE_LIMIT: usize = 10;

/// Parse output format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

fn status_icon(status: ValidationStatus) -> &'static str {
    match status {
        ValidationStatus::Pass => "✅",
        ValidationStatus::Warning => "⚠️ ",
        ValidationStatus::Fail => "❌",
    }
}

/// Pretty printer for datasure output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Render a report as a tree
    pub fn render_report(report: &ValidationReport) -> String {
        let mut out = Vec::new();
        out.push(format!(
            "📊 {} ({}, {})",
            report.report_name, report.project_name, report.environment
        ));
        out.push(format!(
            "├─ Source: {} ({} rows x {} columns)",
            report.source_file, report.source_shape.rows, report.source_shape.columns
        ));
        out.push(format!(
            "├─ Target: {} ({} rows x {} columns)",
            report.target_file, report.target_shape.rows, report.target_shape.columns
        ));
        out.push(format!(
            "├─ Validated: {}",
            report.validation_date.format("%Y-%m-%d %H:%M")
        ));

        for result in &report.results {
            Self::render_result(result, &mut out);
        }

        out.push(format!(
            "└─ {} Overall: {}",
            status_icon(report.overall_status),
            report.overall_status
        ));
        out.join("\n")
    }

    /// Machine-readable one-line-per-check summary
    pub fn render_quiet(report: &ValidationReport) -> String {
        let mut lines: Vec<String> = report
            .results
            .iter()
            .map(|r| format!("{}={}", r.name(), r.status().as_str()))
            .collect();
        lines.push(format!("overall={}", report.overall_status.as_str()));
        lines.join("\n")
    }

    fn render_result(result: &ValidationResult, out: &mut Vec<String>) {
        out.push(format!(
            "├─ {} {}: {}",
            status_icon(result.status()),
            result.name(),
            result.summary()
        ));
        match result.details() {
            ValidationDetails::File(_) => {}
            ValidationDetails::Schema(d) => Self::render_schema(d, out),
            ValidationDetails::Stats(d) => Self::render_stats(d, out),
            ValidationDetails::Rows(d) => Self::render_rows(d, out),
        }
    }

    fn render_schema(details: &SchemaDetails, out: &mut Vec<String>) {
        if !details.missing_columns.is_empty() {
            out.push(format!("│  ├─ Missing in target: {}", details.missing_columns.join(", ")));
        }
        if !details.extra_columns.is_empty() {
            out.push(format!("│  ├─ Extra in target: {}", details.extra_columns.join(", ")));
        }
        for mismatch in &details.type_mismatches {
            out.push(format!(
                "│  ├─ {}: {} → {}",
                mismatch.column, mismatch.source_type, mismatch.target_type
            ));
        }
    }

    fn render_stats(details: &StatsDetails, out: &mut Vec<String>) {
        for stats in details.stats.iter().filter(|s| !s.is_match()) {
            match stats {
                ColumnStats::Numeric(s) => out.push(format!(
                    "│  ├─ {}: nulls {} vs {}, min {} vs {}, max {} vs {}, sum {} vs {}",
                    s.column,
                    s.source_nulls,
                    s.target_nulls,
                    format_aggregate(s.source_min),
                    format_aggregate(s.target_min),
                    format_aggregate(s.source_max),
                    format_aggregate(s.target_max),
                    format_aggregate(s.source_sum),
                    format_aggregate(s.target_sum),
                )),
                ColumnStats::NonNumeric(s) => out.push(format!(
                    "│  ├─ {}: nulls {} vs {}, distinct {} vs {}",
                    s.column, s.source_nulls, s.target_nulls, s.source_unique, s.target_unique
                )),
            }
        }
    }

    fn render_rows(details: &RowDetails, out: &mut Vec<String>) {
        for diff in details.differences.iter().take(PRETTY_DIFFERENCE_LIMIT) {
            out.push(format!(
                "│  ├─ row {} [{}]: '{}' → '{}'",
                diff.row_index, diff.column, diff.source_value, diff.target_value
            ));
        }
        if details.differences.len() > PRETTY_DIFFERENCE_LIMIT {
            out.push(format!(
                "│  └─ ... {} more (use --format json for the full list)",
                details.differences.len() - PRETTY_DIFFERENCE_LIMIT
            ));
        }
    }

    /// Print the column layout of a loaded file
    pub fn print_table_info(name: &str, rows: usize, columns: &[ColumnDescriptor]) {
        println!("📄 {}", name);
        println!("├─ Rows: {}", rows);
        println!("├─ Columns: {}", columns.len());
        for (i, column) in columns.iter().enumerate() {
            let prefix = if i == columns.len() - 1 { "└─" } else { "├─" };
            println!(
                "{} {}: {} ({})",
                prefix, column.name, column.type_tag, column.data_type
            );
        }
    }
}

fn format_aggregate(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_else(|| "-".to_string())
}

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as pretty JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}
