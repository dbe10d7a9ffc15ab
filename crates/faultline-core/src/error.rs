use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Trait for errors that know how they should appear on the wire
///
/// The server layer renders implementors into error envelopes, keeping
/// the error types themselves decoupled from axum. Raise one through
/// [`Failure::http`](crate::Failure::http) to keep its status and code.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Stable machine-readable code (e.g. `1006`)
    fn error_code(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Diagnostic payload received from an external system
    fn external_error(&self) -> Option<&Value> {
        None
    }
}

/// An error with an explicit status and code, captured as it will be rendered
///
/// Used for failures whose status and code are chosen by the code raising
/// them rather than by a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code})")]
pub struct CustomError {
    status: StatusCode,
    code: String,
    message: String,
    external_error: Option<Value>,
}

impl CustomError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            external_error: None,
        }
    }

    /// Snapshot of how `error` renders
    pub fn from_http_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            status: error.status_code(),
            code: error.error_code().to_owned(),
            message: error.client_message(),
            external_error: error.external_error().cloned(),
        }
    }

    #[must_use]
    pub fn with_external_error(mut self, external_error: Value) -> Self {
        self.external_error = Some(external_error);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl HttpError for CustomError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_code(&self) -> &str {
        &self.code
    }

    fn client_message(&self) -> String {
        self.message.clone()
    }

    fn external_error(&self) -> Option<&Value> {
        self.external_error.as_ref()
    }
}
