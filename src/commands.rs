//! Command implementations for datasure CLI

use crate::cli::Commands;
use crate::config::{ConfigOverrides, DatasureConfig};
use crate::error::{DatasureError, Result};
use crate::loader::TableLoader;
use crate::output::{JsonFormatter, OutputFormat, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::report::ValidationReport;
use crate::validation::{validate, ValidationStatus};
use std::path::{Path, PathBuf};

/// How a successfully executed command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Comparison ran but the verdict was FAIL and the caller asked to be told
    ValidationFailed,
}

/// Execute a command
pub fn execute_command(
    command: Commands,
    config_path: Option<&Path>,
    quiet: bool,
) -> Result<CommandStatus> {
    match command {
        Commands::Compare {
            source,
            target,
            max_differences,
            sequential,
            format,
            output,
            project_name,
            report_name,
            environment,
            fail_on_mismatch,
        } => {
            let overrides = ConfigOverrides {
                max_differences,
                sequential,
                project_name,
                report_name,
                environment,
            };
            compare_command(
                config_path,
                &source,
                &target,
                overrides,
                &format,
                output.as_deref(),
                fail_on_mismatch,
                quiet,
            )
        }
        Commands::Inspect { input, format } => inspect_command(&input, &format),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Compare two exports and report the verdict
#[allow(clippy::too_many_arguments)]
fn compare_command(
    config_path: Option<&Path>,
    source_path: &Path,
    target_path: &Path,
    overrides: ConfigOverrides,
    format: &str,
    output_path: Option<&Path>,
    fail_on_mismatch: bool,
    quiet: bool,
) -> Result<CommandStatus> {
    let output_format = OutputFormat::parse(format).map_err(DatasureError::invalid_input)?;
    let current_dir = std::env::current_dir()?;
    let config = DatasureConfig::discover(config_path, &current_dir)?.with_overrides(overrides)?;

    let mut progress = if quiet || output_format == OutputFormat::Json {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_compare()
    };

    let source_name = display_name(source_path);
    let target_name = display_name(target_path);
    let loader = TableLoader::new()?;

    progress.loading(&format!("Loading {}...", source_name));
    let source = loader.load_file_named(source_path, &source_name)?;
    progress.loading(&format!("Loading {}...", target_name));
    let target = loader.load_file_named(target_path, &target_name)?;
    progress.finish_loading("Exports loaded");

    progress.validating();
    let outcome = validate(&source, &target, &config.compare);
    progress.finish_validating("Validation complete");

    let report = ValidationReport::new(
        &config.report,
        source_name,
        target_name,
        &source,
        &target,
        outcome,
    );

    let written = output_path
        .map(|path| write_report(&report, path))
        .transpose()?;
    println!(
        "{}",
        render_compare_output(&report, output_format, quiet, written.as_deref())?
    );

    if fail_on_mismatch && report.overall_status == ValidationStatus::Fail {
        Ok(CommandStatus::ValidationFailed)
    } else {
        Ok(CommandStatus::Success)
    }
}

/// Everything `compare` prints to stdout. JSON output is the report
/// document alone so it can be piped into other tools.
fn render_compare_output(
    report: &ValidationReport,
    format: OutputFormat,
    quiet: bool,
    written: Option<&Path>,
) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => JsonFormatter::format(report)?,
        OutputFormat::Pretty if quiet => PrettyPrinter::render_quiet(report),
        OutputFormat::Pretty => {
            let mut text = PrettyPrinter::render_report(report);
            if let Some(path) = written {
                text.push_str(&format!("\n💾 Report written to: {}", path.display()));
            }
            text
        }
    };
    Ok(rendered)
}

/// Write the JSON report; a directory target gets a timestamped file name
fn write_report(report: &ValidationReport, path: &Path) -> Result<PathBuf> {
    let destination = if path.is_dir() {
        path.join(report.suggested_file_name())
    } else {
        path.to_path_buf()
    };
    std::fs::write(&destination, JsonFormatter::format(report)?)?;
    log::info!("Saved report to {}", destination.display());
    Ok(destination)
}

/// Show the shape and column types of one export
fn inspect_command(input: &Path, format: &str) -> Result<CommandStatus> {
    let output_format = OutputFormat::parse(format).map_err(DatasureError::invalid_input)?;
    let name = display_name(input);
    let table = TableLoader::new()?.load_file_named(input, &name)?;
    let columns = table.descriptors();

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_table_info(&name, table.row_count(), &columns),
        OutputFormat::Json => {
            let info = serde_json::json!({
                "file": name,
                "rows": table.row_count(),
                "columns": columns,
            });
            println!("{}", JsonFormatter::format(&info)?);
        }
    }

    Ok(CommandStatus::Success)
}
