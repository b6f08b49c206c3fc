//! Error types for datasure operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasureError>;

#[derive(Error, Debug)]
pub enum DatasureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{name} is empty or has no data")]
    EmptyTable { name: String },

    #[error("{name} has encoding issues. Tried: {tried}")]
    Encoding { name: String, tried: String },

    #[error("Data processing error: {message}")]
    DataProcessing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl DatasureError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn empty_table(name: impl Into<String>) -> Self {
        Self::EmptyTable { name: name.into() }
    }

    pub fn data_processing(msg: impl Into<String>) -> Self {
        Self::DataProcessing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
