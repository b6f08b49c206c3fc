//! # datasure
//!
//! Migration verification for tabular report exports. Two tables (a legacy
//! "source" export and a migrated "target" export) are compared on shape,
//! schema, column statistics and cell values; the four results are reduced
//! to a single PASS / WARNING / FAIL verdict.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod progress;
pub mod report;
pub mod table;
pub mod types;
pub mod validation;

pub use config::DatasureConfig;
pub use error::{DatasureError, Result};
pub use loader::TableLoader;
pub use report::ValidationReport;
pub use table::{Column, DataType, Table, Value};
pub use types::TypeTag;
pub use validation::{
    compute_overall_status, validate, CompareOptions, ValidationOutcome, ValidationResult,
    ValidationStatus,
};
