//! Error types for the report pipeline.
//!
//! Every stage returns [`Result`]; the single top-level boundary
//! ([`crate::app::App::trigger`]) turns an [`Error`] into a user message.

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a table into a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No input path was supplied before triggering a conversion
    #[error("Please select a CSV file.")]
    Input,

    /// Required column(s) absent from the header line
    #[error("Missing required column(s): {}", missing.join(", "))]
    Schema {
        /// Names of the absent columns, in declaration order
        missing: Vec<String>,
    },

    /// A value that must be numeric could not be coerced
    #[error("Invalid amount '{value}' on line {line}: {reason}")]
    Data {
        /// 1-based line number in the source file (header is line 1)
        line: u64,
        /// The offending cell text
        value: String,
        /// Why coercion failed
        reason: String,
    },

    /// IO error (file not found, unreadable, unwritable)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Document layout failure
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error() {
        let msg = format!("{}", Error::Input);
        assert_eq!(msg, "Please select a CSV file.");
    }

    #[test]
    fn test_schema_error_lists_columns() {
        let err = Error::Schema {
            missing: vec!["Amount".to_string(), "Status".to_string()],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Amount, Status"));
    }

    #[test]
    fn test_data_error() {
        let err = Error::Data {
            line: 4,
            value: "abc".to_string(),
            reason: "Invalid decimal".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let msg = format!("{}", err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_render_error() {
        let msg = format!("{}", Error::Render("table too tall".to_string()));
        assert!(msg.contains("Rendering error"));
        assert!(msg.contains("table too tall"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
