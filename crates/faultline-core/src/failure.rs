use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::error::{CustomError, HttpError};
use crate::fault::DomainFault;

/// A single field that failed to bind, with the value that was rejected
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub rejected: Value,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rejected: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            rejected: rejected.into(),
        }
    }
}

/// What a raised failure is, independent of its message text
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// Already classified by the code that raised it
    Fault(DomainFault),
    /// Raised with an explicit status and code
    Custom(CustomError),
    /// An argument was rejected at the call site
    IllegalArgument,
    /// One or more form or query fields could not be bound
    FieldBinding(Vec<FieldViolation>),
    /// The request body could not be read; `syntax_error` holds the parser
    /// message when the body was malformed structured data
    UnreadableBody { syntax_error: Option<String> },
    /// The body parsed but failed schema or type validation
    ValidationFailed,
    /// A typed argument could not be coerced from its raw value
    TypeMismatch { name: Option<String> },
    /// A required query or form parameter was absent
    MissingParameter { name: Option<String> },
    /// A required multipart part was absent
    MissingPart { name: String },
    /// A required header was absent
    MissingHeader { name: String },
    /// The path matched but the method is not routed
    MethodNotAllowed { method: String, path: String },
    /// Nothing matched the path
    NoRoute { method: String, path: String },
    /// A uniqueness constraint was violated
    Duplicate,
    /// Anything this crate does not recognize
    Unrecognized,
}

impl FailureKind {
    /// Stable identifier used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fault(_) => "domain-fault",
            Self::Custom(_) => "custom-error",
            Self::IllegalArgument => "illegal-argument",
            Self::FieldBinding(_) => "field-binding",
            Self::UnreadableBody { .. } => "unreadable-body",
            Self::ValidationFailed => "validation-failed",
            Self::TypeMismatch { .. } => "type-mismatch",
            Self::MissingParameter { .. } => "missing-parameter",
            Self::MissingPart { .. } => "missing-part",
            Self::MissingHeader { .. } => "missing-header",
            Self::MethodNotAllowed { .. } => "method-not-allowed",
            Self::NoRoute { .. } => "no-route",
            Self::Duplicate => "duplicate",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// A failure raised while handling a request, before classification
///
/// Carries every kind the failure belongs to, most specific first. A
/// missing query parameter is also an invalid argument, so it lists both
/// and the classifier picks the most specific rule that applies.
#[derive(Debug)]
pub struct Failure {
    type_name: Cow<'static, str>,
    message: Option<String>,
    kinds: Vec<FailureKind>,
    source: Option<anyhow::Error>,
}

impl Failure {
    /// Failure of a single kind, identified by the kind's name
    pub fn new(kind: FailureKind) -> Self {
        Self {
            type_name: Cow::Borrowed(kind.name()),
            message: None,
            kinds: vec![kind],
            source: None,
        }
    }

    /// Override the identifier logged for this failure
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<Cow<'static, str>>) -> Self {
        self.type_name = type_name.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Record the underlying error for diagnostics
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Declare a broader kind this failure also belongs to
    #[must_use]
    pub fn also(mut self, kind: FailureKind) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new(FailureKind::IllegalArgument).with_message(message)
    }

    pub fn binding(violations: Vec<FieldViolation>) -> Self {
        Self::new(FailureKind::FieldBinding(violations)).also(FailureKind::IllegalArgument)
    }

    pub fn malformed_json(parser_message: impl Into<String>) -> Self {
        let parser_message = parser_message.into();
        Self::new(FailureKind::UnreadableBody {
            syntax_error: Some(parser_message.clone()),
        })
        .with_message(parser_message)
    }

    pub fn unreadable_body(message: impl Into<String>) -> Self {
        Self::new(FailureKind::UnreadableBody { syntax_error: None }).with_message(message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ValidationFailed).with_message(message)
    }

    pub fn type_mismatch(name: Option<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::TypeMismatch { name }).with_message(message)
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(FailureKind::MissingParameter { name: Some(name.clone()) })
            .with_message(format!("required parameter '{name}' is not present"))
            .also(FailureKind::IllegalArgument)
    }

    pub fn missing_part(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(FailureKind::MissingPart { name: name.clone() })
            .with_message(format!("required part '{name}' is not present"))
    }

    pub fn missing_header(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(FailureKind::MissingHeader { name: name.clone() })
            .with_message(format!("required header '{name}' is not present"))
    }

    pub fn method_not_allowed(method: impl Into<String>, path: impl Into<String>) -> Self {
        let (method, path) = (method.into(), path.into());
        let message = format!("request method '{method}' is not supported for {path}");
        Self::new(FailureKind::MethodNotAllowed { method, path }).with_message(message)
    }

    pub fn no_route(method: impl Into<String>, path: impl Into<String>) -> Self {
        let (method, path) = (method.into(), path.into());
        let message = format!("no route for {method} {path}");
        Self::new(FailureKind::NoRoute { method, path }).with_message(message)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Duplicate).with_message(message)
    }

    /// Failure that renders with the error's own status, code and message
    pub fn http<E>(error: E) -> Self
    where
        E: HttpError + Send + Sync + 'static,
    {
        let custom = CustomError::from_http_error(&error);
        Self::new(FailureKind::Custom(custom))
            .with_type_name(std::any::type_name::<E>())
            .with_message(error.client_message())
            .with_source(anyhow::Error::new(error))
    }

    /// Wrap an arbitrary error; it is identified by its Rust type name
    pub fn unrecognized<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let message = error.to_string();
        Self::new(FailureKind::Unrecognized)
            .with_type_name(std::any::type_name::<E>())
            .with_message(message)
            .with_source(anyhow::Error::new(error))
    }

    /// Identifier of what was raised, for logs
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Raw message, if any was attached
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether the failure carries a non-empty message
    pub fn has_message(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.trim().is_empty())
    }

    /// Kinds from most to least specific; never empty
    pub fn kinds(&self) -> &[FailureKind] {
        &self.kinds
    }

    /// The most specific kind
    pub fn primary(&self) -> &FailureKind {
        &self.kinds[0]
    }

    /// The pre-classified fault, if this failure carries one
    pub fn as_fault(&self) -> Option<&DomainFault> {
        match self.kinds.first() {
            Some(FailureKind::Fault(fault)) => Some(fault),
            _ => None,
        }
    }

    /// The explicit status and code, if this failure was raised with them
    pub fn as_custom(&self) -> Option<&CustomError> {
        match self.kinds.first() {
            Some(FailureKind::Custom(custom)) => Some(custom),
            _ => None,
        }
    }

    pub const fn source_error(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.as_fault(), self.message.as_deref()) {
            (Some(fault), _) => write!(f, "{}: {fault}", self.type_name),
            (None, Some(message)) if !message.trim().is_empty() => write!(f, "{}: {message}", self.type_name),
            _ => f.write_str(&self.type_name),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| -> &(dyn std::error::Error + 'static) { e.as_ref() })
    }
}

impl From<DomainFault> for Failure {
    fn from(fault: DomainFault) -> Self {
        Self::new(FailureKind::Fault(fault)).with_type_name(std::any::type_name::<DomainFault>())
    }
}

impl From<CustomError> for Failure {
    fn from(custom: CustomError) -> Self {
        let message = custom.message().to_owned();
        Self::new(FailureKind::Custom(custom))
            .with_type_name(std::any::type_name::<CustomError>())
            .with_message(message)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<DomainFault>() {
            Ok(fault) => return fault.into(),
            Err(error) => error,
        };

        match error.downcast::<CustomError>() {
            Ok(custom) => custom.into(),
            Err(error) => Self::new(FailureKind::Unrecognized)
                .with_type_name(std::any::type_name::<anyhow::Error>())
                .with_message(format!("{error:#}"))
                .with_source(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ErrorId;

    #[test]
    fn single_kind_failure() {
        let failure = Failure::missing_header("X-Session-Id");
        assert_eq!(failure.type_name(), "missing-header");
        assert_eq!(failure.kinds().len(), 1);
        assert!(matches!(failure.primary(), FailureKind::MissingHeader { name } if name == "X-Session-Id"));
        assert!(failure.has_message());
    }

    #[test]
    fn missing_parameter_is_also_illegal_argument() {
        let failure = Failure::missing_parameter("page");
        assert_eq!(
            failure.kinds(),
            &[
                FailureKind::MissingParameter {
                    name: Some("page".to_owned())
                },
                FailureKind::IllegalArgument,
            ]
        );
    }

    #[test]
    fn fault_round_trips_through_anyhow() {
        let fault = DomainFault::new(ErrorId::UserNotFound);
        let failure = Failure::from(anyhow::Error::new(fault.clone()));
        assert_eq!(failure.as_fault(), Some(&fault));
        assert!(!failure.has_message());
    }

    #[test]
    fn plain_anyhow_is_unrecognized() {
        let failure = Failure::from(anyhow::anyhow!("disk on fire").context("saving upload"));
        assert_eq!(failure.primary(), &FailureKind::Unrecognized);
        assert_eq!(failure.message(), Some("saving upload: disk on fire"));
        assert!(failure.source_error().is_some());
    }

    #[test]
    fn unrecognized_uses_rust_type_name() {
        let io = std::io::Error::other("socket closed");
        let failure = Failure::unrecognized(io);
        assert!(failure.type_name().starts_with("std::io::"));
        assert_eq!(failure.message(), Some("socket closed"));
        assert!(failure.to_string().ends_with(": socket closed"));
    }

    #[test]
    fn http_error_keeps_its_wire_fields() {
        let failure = Failure::http(CustomError::new(http::StatusCode::CONFLICT, "4090", "version conflict"));
        let custom = failure.as_custom().unwrap();
        assert_eq!(custom.error_code(), "4090");
        assert_eq!(failure.message(), Some("version conflict"));
        assert!(failure.as_fault().is_none());
        assert!(failure.source_error().is_some());
    }

    #[test]
    fn custom_error_round_trips_through_anyhow() {
        let custom = CustomError::new(http::StatusCode::SERVICE_UNAVAILABLE, "1007", "quota exhausted");
        let failure = Failure::from(anyhow::Error::new(custom.clone()));
        assert_eq!(failure.as_custom(), Some(&custom));
        assert_eq!(failure.primary().name(), "custom-error");
    }

    #[test]
    fn blank_message_does_not_count() {
        let failure = Failure::new(FailureKind::Unrecognized).with_message("  ");
        assert!(!failure.has_message());
        assert_eq!(failure.to_string(), "unrecognized");
    }
}
