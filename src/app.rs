//! Interactive front-end state.
//!
//! [`App`] holds the input path field and the report settings. The
//! surrounding UI supplies a [`FilePicker`] for the browse action and a
//! [`Notifier`] that shows the single outcome of each conversion.

use crate::config::ReportConfig;
use crate::error::Error;
use crate::pipeline;
use std::path::PathBuf;

/// Window title of the front end.
pub const APP_TITLE: &str = "CSV to PDF Converter";

/// Label shown next to the input path field.
pub const INPUT_LABEL: &str = "CSV File:";

/// Source of a user-selected file path.
pub trait FilePicker {
    /// Ask the user for a file; `None` when the pick was cancelled.
    fn pick_file(&mut self) -> Option<PathBuf>;
}

/// Sink for outcome messages.
pub trait Notifier {
    /// Show an informational message.
    fn info(&mut self, title: &str, message: &str);

    /// Show an error message.
    fn error(&mut self, title: &str, message: &str);
}

/// Result of one triggered conversion.
#[derive(Debug)]
pub enum Outcome {
    /// The report was written to this path.
    Converted(PathBuf),
    /// Nothing was produced.
    Failed(Error),
}

impl Outcome {
    /// Whether the conversion produced a report.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Converted(_))
    }
}

/// Application state: the input field and report settings.
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Contents of the input path field.
    pub input: String,
    /// Settings used for every conversion.
    pub config: ReportConfig,
}

impl App {
    /// Create the application with an empty input field.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            input: String::new(),
            config,
        }
    }

    /// Browse action: fill the input field from `picker`.
    ///
    /// A cancelled pick leaves the field as it was.
    pub fn browse(&mut self, picker: &mut dyn FilePicker) {
        if let Some(path) = picker.pick_file() {
            self.input = path.to_string_lossy().into_owned();
            log::debug!("Selected {}", self.input);
        }
    }

    /// Trigger action: run the conversion and notify exactly once.
    pub fn trigger(&self, notifier: &mut dyn Notifier) -> Outcome {
        let input = self.input.trim();
        if input.is_empty() {
            let err = Error::Input;
            notifier.error("Error", &err.to_string());
            return Outcome::Failed(err);
        }

        log::info!("{} {}", INPUT_LABEL, input);

        match pipeline::convert(input, &self.config) {
            Ok(output) => {
                notifier.info(
                    "Success",
                    &format!("Conversion completed successfully. Output PDF: {}", output.display()),
                );
                Outcome::Converted(output)
            },
            Err(err) => {
                log::error!("Conversion of {} failed: {}", input, err);
                notifier.error("Error", &format!("An error occurred: {}", err));
                Outcome::Failed(err)
            },
        }
    }
}
