use std::borrow::Cow;

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{ErrorDescriptor, ErrorId};
use crate::error::HttpError;

/// A request that failed for a known reason
///
/// References a catalog descriptor and carries the message for this
/// occurrence. Overriding the message never touches the descriptor, so
/// faults can be built concurrently from the same catalog entry.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} ({})", .descriptor.code())]
pub struct DomainFault {
    descriptor: &'static ErrorDescriptor,
    message: Cow<'static, str>,
    external_error: Option<Value>,
}

impl DomainFault {
    /// Fault carrying the descriptor's default message
    pub fn new(id: ErrorId) -> Self {
        let descriptor = id.descriptor();
        Self {
            descriptor,
            message: Cow::Borrowed(descriptor.default_message()),
            external_error: None,
        }
    }

    /// Fault with a message for this occurrence only
    ///
    /// A blank message falls back to the descriptor's default.
    pub fn with_message(id: ErrorId, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fault = Self::new(id);
        if !message.trim().is_empty() {
            fault.message = Cow::Owned(message);
        }
        fault
    }

    /// Attach a diagnostic payload received from an external system
    #[must_use]
    pub fn with_external_error(mut self, external_error: Value) -> Self {
        self.external_error = Some(external_error);
        self
    }

    pub const fn id(&self) -> ErrorId {
        self.descriptor.id()
    }

    pub const fn descriptor(&self) -> &'static ErrorDescriptor {
        self.descriptor
    }

    pub const fn status(&self) -> StatusCode {
        self.descriptor.status()
    }

    pub const fn code(&self) -> &'static str {
        self.descriptor.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn external_error(&self) -> Option<&Value> {
        self.external_error.as_ref()
    }
}

impl From<ErrorId> for DomainFault {
    fn from(id: ErrorId) -> Self {
        Self::new(id)
    }
}

impl HttpError for DomainFault {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_code(&self) -> &str {
        self.code()
    }

    fn client_message(&self) -> String {
        self.message.clone().into_owned()
    }

    fn external_error(&self) -> Option<&Value> {
        self.external_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_message_comes_from_descriptor() {
        let fault = DomainFault::new(ErrorId::DuplicateRequest);
        assert_eq!(fault.message(), "duplicate request");
        assert_eq!(fault.code(), "1005");
        assert_eq!(fault.status(), StatusCode::BAD_REQUEST);
        assert!(fault.external_error().is_none());
    }

    #[test]
    fn override_leaves_descriptor_untouched() {
        let fault = DomainFault::with_message(ErrorId::InvalidParameterDetail, "missing parameter: 'page'");
        assert_eq!(fault.message(), "missing parameter: 'page'");

        let fresh = DomainFault::new(ErrorId::InvalidParameterDetail);
        assert_eq!(fresh.message(), "bad request");
        assert_eq!(ErrorId::InvalidParameterDetail.descriptor().default_message(), "bad request");
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        let fault = DomainFault::with_message(ErrorId::ResourceNotFound, "   ");
        assert_eq!(fault.message(), "the requested resource does not exist");
    }

    #[test]
    fn external_error_is_kept() {
        let fault = DomainFault::new(ErrorId::ExternalApiError).with_external_error(json!({"upstream": "timeout"}));
        assert_eq!(fault.external_error(), Some(&json!({"upstream": "timeout"})));
    }

    #[test]
    fn display_includes_code() {
        let fault = DomainFault::new(ErrorId::ExpiredSession);
        assert_eq!(fault.to_string(), "session has expired (1101)");
    }

    #[test]
    fn http_error_view() {
        let fault: DomainFault = ErrorId::ServiceUnavailable.into();
        assert_eq!(fault.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(fault.error_code(), "1007");
        assert_eq!(fault.client_message(), fault.message());
    }
}
