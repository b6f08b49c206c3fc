//! Configuration: JSON config file, report metadata defaults and CLI overrides

use crate::error::{DatasureError, Result};
use crate::validation::CompareOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "datasure.json";

pub const DEFAULT_PROJECT_NAME: &str = "DataSure Validation";
pub const DEFAULT_REPORT_NAME: &str = "Data Validation Report";

/// Deployment environment the compared exports came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Dev,
    Sit,
    #[default]
    Uat,
    Qa,
    Prod,
}

impl Environment {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_uppercase().as_str() {
            "DEV" => Ok(Self::Dev),
            "SIT" => Ok(Self::Sit),
            "UAT" => Ok(Self::Uat),
            "QA" => Ok(Self::Qa),
            "PROD" => Ok(Self::Prod),
            _ => Err(format!(
                "Invalid environment: {}. Use DEV, SIT, UAT, QA or PROD",
                s
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dev => "DEV",
            Self::Sit => "SIT",
            Self::Uat => "UAT",
            Self::Qa => "QA",
            Self::Prod => "PROD",
        };
        f.write_str(s)
    }
}

/// Labels attached to a validation report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub project_name: String,
    pub report_name: String,
    pub environment: Environment,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            report_name: DEFAULT_REPORT_NAME.to_string(),
            environment: Environment::default(),
        }
    }
}

/// Everything configurable about a comparison run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasureConfig {
    pub compare: CompareOptions,
    pub report: ReportSettings,
}

/// Values given on the command line; `None` leaves the config value alone
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_differences: Option<usize>,
    pub sequential: bool,
    pub project_name: Option<String>,
    pub report_name: Option<String>,
    pub environment: Option<Environment>,
}

impl DatasureConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DatasureError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Use `explicit` if given, otherwise `datasure.json` in `dir` when it
    /// exists, otherwise defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.compare.max_differences == 0 {
            return Err(DatasureError::config("max_differences must be greater than 0"));
        }
        if self.report.project_name.trim().is_empty() || self.report.report_name.trim().is_empty() {
            return Err(DatasureError::config("project_name and report_name must not be empty"));
        }
        Ok(())
    }

    /// Apply command-line values on top of the file configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(max) = overrides.max_differences {
            self.compare.max_differences = max;
        }
        if overrides.sequential {
            self.compare.parallel = false;
        }
        if let Some(name) = overrides.project_name.filter(|s| !s.trim().is_empty()) {
            self.report.project_name = name;
        }
        if let Some(name) = overrides.report_name.filter(|s| !s.trim().is_empty()) {
            self.report.report_name = name;
        }
        if let Some(env) = overrides.environment {
            self.report.environment = env;
        }
        self.validate()?;
        Ok(self)
    }
}
