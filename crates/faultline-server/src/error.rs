use std::sync::{Arc, LazyLock};

use axum::extract::path::ErrorKind;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use faultline_core::{CustomError, DomainFault, ErrorId, Failure, HttpError};
use http::StatusCode;
use regex::Regex;

/// A failure raised by a handler or extractor
///
/// Rendering does not classify: the failure is parked in the response
/// extensions and the fault boundary turns it into an error envelope. Without
/// the boundary installed the client sees a bare `500`.
#[derive(Debug)]
pub struct ApiError(pub Failure);

/// Failure waiting for the fault boundary
#[derive(Debug, Clone)]
pub(crate) struct PendingFailure(pub(crate) Arc<Failure>);

impl ApiError {
    /// Raise an error that renders with its own status, code and message
    pub fn http<E>(error: E) -> Self
    where
        E: HttpError + Send + Sync + 'static,
    {
        Self(Failure::http(error))
    }

    pub const fn failure(&self) -> &Failure {
        &self.0
    }

    pub fn into_failure(self) -> Failure {
        self.0
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(PendingFailure(Arc::new(self.0)));
        response
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self(failure)
    }
}

impl From<DomainFault> for ApiError {
    fn from(fault: DomainFault) -> Self {
        Self(fault.into())
    }
}

impl From<ErrorId> for ApiError {
    fn from(id: ErrorId) -> Self {
        Self(DomainFault::new(id).into())
    }
}

impl From<CustomError> for ApiError {
    fn from(custom: CustomError) -> Self {
        Self(custom.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self(error.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let failure = match &rejection {
            JsonRejection::JsonSyntaxError(e) => Failure::malformed_json(innermost_message(e)),
            JsonRejection::JsonDataError(e) => Failure::validation(innermost_message(e)),
            other => Failure::unreadable_body(other.body_text()),
        };
        Self(failure.with_source(rejection.into()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let failure = deserialize_failure(&rejection.body_text());
        Self(failure.with_source(rejection.into()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        let failure = match &rejection {
            FormRejection::FailedToDeserializeForm(_) | FormRejection::FailedToDeserializeFormBody(_) => {
                deserialize_failure(&rejection.body_text())
            }
            other => Failure::unreadable_body(other.body_text()),
        };
        Self(failure.with_source(rejection.into()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let name = match &rejection {
            PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
                ErrorKind::ParseErrorAtKey { key, .. }
                | ErrorKind::DeserializeError { key, .. }
                | ErrorKind::InvalidUtf8InPathParam { key } => Some(key.clone()),
                _ => None,
            },
            _ => None,
        };
        let failure = Failure::type_mismatch(name, rejection.body_text());
        Self(failure.with_source(rejection.into()))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        let failure = Failure::unreadable_body(rejection.body_text());
        Self(failure.with_source(rejection.into()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        let failure = Failure::unreadable_body(error.body_text());
        Self(failure.with_source(error.into()))
    }
}

/// Query strings and form bodies share one deserializer, and a missing
/// field is reported only through its message
fn deserialize_failure(body_text: &str) -> Failure {
    match missing_field(body_text) {
        Some(name) => Failure::missing_parameter(name),
        None => Failure::type_mismatch(None, body_text),
    }
}

static MISSING_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"missing field `([^`]+)`").expect("must be valid regex"));

fn missing_field(message: &str) -> Option<String> {
    MISSING_FIELD_RE.captures(message).map(|caps| caps[1].to_string())
}

/// Message of the deepest error in the chain, which for JSON is the parser's
/// own line and column report
fn innermost_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

#[cfg(test)]
mod tests {
    use faultline_core::{Classifier, FailureKind};

    use super::*;

    #[test]
    fn missing_field_name_is_extracted() {
        assert_eq!(
            missing_field("Failed to deserialize query string: missing field `page`").as_deref(),
            Some("page")
        );
        assert_eq!(missing_field("invalid digit found in string"), None);
    }

    #[test]
    fn missing_query_field_is_also_an_illegal_argument() {
        let failure = deserialize_failure("Failed to deserialize query string: missing field `page`");
        assert!(matches!(
            failure.kinds(),
            [FailureKind::MissingParameter { .. }, FailureKind::IllegalArgument]
        ));

        let fault = Classifier::resolve(&failure);
        assert_eq!(fault.id(), ErrorId::InvalidParameterDetail);
        assert_eq!(fault.message(), "missing parameter: 'page'");
    }

    #[test]
    fn bad_query_value_is_a_type_mismatch() {
        let failure = deserialize_failure("Failed to deserialize query string: page: invalid digit found in string");
        assert!(matches!(failure.primary(), FailureKind::TypeMismatch { name: None }));
        assert_eq!(Classifier::resolve(&failure).id(), ErrorId::InvalidRequestParameter);
    }

    #[test]
    fn innermost_message_walks_the_chain() {
        let inner = std::io::Error::other("line 1 column 2");
        let outer = anyhow::Error::new(inner).context("Failed to parse the request body as JSON");
        assert_eq!(innermost_message(outer.as_ref()), "line 1 column 2");
    }

    #[test]
    fn rendering_parks_the_failure() {
        let response = ApiError::from(ErrorId::DuplicateRequest).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let pending = response.extensions().get::<PendingFailure>().unwrap();
        assert_eq!(pending.0.as_fault().unwrap().id(), ErrorId::DuplicateRequest);
    }
}
