//! Error types for the profile-data crate.
//!
//! Generation and export failures are separate enums. Both map onto a coarse
//! [`ErrorKind`] so collaborators can pick a response without matching every
//! variant.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Coarse classification of a failure for collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a bad count, selection, or record set.
    InvalidInput,
    /// The email composition loop hit its attempt cap.
    RetryExhausted,
    /// Rendering or writing output failed.
    Internal,
}

/// Errors that can occur while generating person records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested record count was zero.
    #[error("record count must be at least 1, got {count}")]
    InvalidCount {
        /// The rejected count.
        count: usize,
    },

    /// A field selection flag could not be interpreted.
    #[error("malformed field selection for '{field}': {message}")]
    MalformedSelection {
        /// Flag or group name as supplied.
        field: String,
        /// Why the flag was rejected.
        message: String,
    },

    /// No valid email address was produced within the attempt cap.
    #[error("failed to compose a valid email address after {max_attempts} attempts")]
    RetryExhausted {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}

impl GenerationError {
    /// Returns the coarse failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCount { .. } | Self::MalformedSelection { .. } => ErrorKind::InvalidInput,
            Self::RetryExhausted { .. } => ErrorKind::RetryExhausted,
        }
    }
}

/// Errors that can occur while rendering or writing a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// There were no records to export.
    #[error("no records supplied for export")]
    EmptyRecordSet,

    /// The xlsx writer rejected the table.
    #[error("failed to build workbook: {message}")]
    Workbook {
        /// Description of the writer error.
        message: String,
    },

    /// The CSV writer failed.
    #[error("failed to write CSV: {message}")]
    Csv {
        /// Description of the writer error.
        message: String,
    },

    /// JSON serialisation failed.
    #[error("failed to serialise records as JSON: {message}")]
    Json {
        /// Description of the serialiser error.
        message: String,
    },

    /// The output file could not be written.
    #[error("failed to write export file at '{path}': {message}")]
    WriteError {
        /// Path to the output file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

impl ExportError {
    /// Returns the coarse failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyRecordSet => ErrorKind::InvalidInput,
            Self::Workbook { .. }
            | Self::Csv { .. }
            | Self::Json { .. }
            | Self::WriteError { .. } => ErrorKind::Internal,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_count_formats_correctly() {
        let err = GenerationError::InvalidCount { count: 0 };
        assert_eq!(err.to_string(), "record count must be at least 1, got 0");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn malformed_selection_formats_correctly() {
        let err = GenerationError::MalformedSelection {
            field: "includeAge".to_owned(),
            message: "expected true or false, got 'yes'".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "malformed field selection for 'includeAge': expected true or false, got 'yes'"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn retry_exhausted_formats_correctly() {
        let err = GenerationError::RetryExhausted { max_attempts: 100 };
        assert_eq!(
            err.to_string(),
            "failed to compose a valid email address after 100 attempts"
        );
        assert_eq!(err.kind(), ErrorKind::RetryExhausted);
    }

    #[test]
    fn empty_record_set_is_invalid_input() {
        let err = ExportError::EmptyRecordSet;
        assert_eq!(err.to_string(), "no records supplied for export");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn write_error_formats_correctly() {
        let err = ExportError::WriteError {
            path: Utf8PathBuf::from("out/profiles.xlsx"),
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write export file at 'out/profiles.xlsx': permission denied"
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
