//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinners for the load and validate phases of a comparison
#[derive(Debug)]
pub struct ProgressReporter {
    pub load_pb: Option<ProgressBar>,
    pub validate_pb: Option<ProgressBar>,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a comparison
    pub fn new_for_compare() -> Self {
        Self {
            load_pb: None,
            validate_pb: None,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            load_pb: None,
            validate_pb: None,
            show_progress: false,
        }
    }

    /// Show what is being loaded
    pub fn loading(&mut self, message: &str) {
        if !self.show_progress {
            return;
        }
        match &self.load_pb {
            Some(pb) => pb.set_message(message.to_string()),
            None => self.load_pb = Some(create_spinner(message)),
        }
    }

    pub fn finish_loading(&mut self, message: &str) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn validating(&mut self) {
        if self.show_progress && self.validate_pb.is_none() {
            self.validate_pb = Some(create_spinner("Running validation checks..."));
        }
    }

    pub fn finish_validating(&mut self, message: &str) {
        if let Some(pb) = self.validate_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Clear anything left running, e.g. after an error
        if let Some(pb) = self.load_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.validate_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
