//! End-to-end conversion: table file in, PDF report out.

use crate::config::{ReportConfig, OUTPUT_SUFFIX};
use crate::error::Result;
use crate::loader::load_records;
use crate::report::Report;
use crate::writer::DocumentRenderer;
use std::path::{Path, PathBuf};

/// Where the report for `input` is written: `<stem>_output.pdf` in the
/// input's directory.
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.pdf", stem, OUTPUT_SUFFIX))
}

/// Convert the table at `input` into a PDF report and return its path.
///
/// Nothing is written unless every stage succeeds.
pub fn convert(input: impl AsRef<Path>, config: &ReportConfig) -> Result<PathBuf> {
    let input = input.as_ref();
    log::info!("Converting {}", input.display());

    let records = load_records(input)?;
    let report = Report::build(records, config)?;
    log::info!(
        "Report has {} rows over {} pages, total {}",
        report.len(),
        report.page_count(),
        report.total()
    );

    let output = output_path_for(input);
    DocumentRenderer::new(config).save(&report, &output)?;
    log::info!("Wrote {}", output.display());

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_directory() {
        assert_eq!(output_path_for("a/b/tx.csv"), PathBuf::from("a/b/tx_output.pdf"));
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(output_path_for("report"), PathBuf::from("report_output.pdf"));
    }

    #[test]
    fn test_output_path_only_last_extension_is_dropped() {
        assert_eq!(output_path_for("/data/march.2024.csv"), PathBuf::from("/data/march.2024_output.pdf"));
    }
}
