// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # txn_report
//!
//! Turns a transactions CSV into a paginated PDF report.
//!
//! ## Pipeline
//!
//! ```text
//! CSV file
//!     ↓ [loader]   validate header, read Records in file order
//!     ↓ [report]   stable sort by date, number 1..N, project 5 columns,
//!     ↓            append the decimal Total row, split into 40-row pages
//!     ↓ [writer]   caption + grid table per page → PDF bytes
//!     ↓            atomic write to `<stem>_output.pdf`
//! PDF file
//! ```
//!
//! [`app::App`] wraps the pipeline with the input field, browse action and
//! trigger action of the interactive front end.
//!
//! ## Quick Start
//!
//! ```ignore
//! use txn_report::{convert, ReportConfig};
//!
//! # fn main() -> txn_report::Result<()> {
//! let output = convert("transactions.csv", &ReportConfig::default())?;
//! println!("{}", output.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Settings
pub mod config;

// Input
pub mod loader;

// Row transformation and pagination
pub mod report;

// PDF output
pub mod object;
pub mod writer;

// Orchestration
pub mod app;
pub mod pipeline;

pub use app::{App, FilePicker, Notifier, Outcome};
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use loader::{load_records, Record};
pub use pipeline::{convert, output_path_for};
pub use report::{Page, Report, ReportRow};
pub use writer::DocumentRenderer;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
