//! Transport-agnostic error payload.
//!
//! Core generation and export failures are folded into [`Error`] here; the
//! HTTP adapter decides status codes and redaction.

use std::fmt;

use profile_data::{ErrorKind, ExportError, GenerationError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

use super::TraceId;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Error envelope returned to clients.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("count must be a number");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "count must be a number");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    code: ErrorCode,
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    /// Structured context, e.g. `{"field": "includeAge", "code": "malformed_selection"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace identifier, when one was in scope or attached explicitly.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "count" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }


    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        match (&err, err.kind()) {
            (GenerationError::MalformedSelection { field, .. }, _) => {
                let field = field.clone();
                Self::invalid_request(err.to_string()).with_details(json!({
                    "field": field,
                    "code": "malformed_selection",
                }))
            }
            (_, ErrorKind::InvalidInput) => Self::invalid_request(err.to_string()),
            (_, ErrorKind::RetryExhausted | ErrorKind::Internal) => {
                error!(error = %err, "profile generation failed");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => Self::invalid_request("No people data provided"),
            ErrorKind::RetryExhausted | ErrorKind::Internal => {
                error!(error = %err, "profile export failed");
                Self::internal(err.to_string())
            }
        }
    }
}
