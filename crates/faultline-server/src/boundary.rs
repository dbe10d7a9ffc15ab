use std::any::Any;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use faultline_core::{Classifier, Envelope, Failure, FailureKind};
use http::{Method, Uri};

use crate::error::{ApiError, PendingFailure};
use crate::response::ApiResponse;

/// Turn a parked failure into an error envelope
///
/// The single place failures are classified and logged. Failures raised
/// with an explicit status and code keep them on the wire. Responses without
/// a parked failure pass through untouched.
pub async fn fault_boundary(State(classifier): State<Arc<Classifier>>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(PendingFailure(failure)) = response.extensions_mut().remove::<PendingFailure>() else {
        return response;
    };

    let fault = classifier.classify(&failure);
    let envelope = match failure.as_custom() {
        Some(custom) => Envelope::<()>::from_error(custom),
        None => Envelope::from_fault(&fault),
    };
    ApiResponse(envelope).into_response()
}

/// Fallback for paths no route matches
pub(crate) async fn no_route(method: Method, uri: Uri) -> ApiError {
    Failure::no_route(method.as_str(), uri.path()).into()
}

/// Fallback for known paths requested with the wrong method
pub(crate) async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    Failure::method_not_allowed(method.as_str(), uri.path()).into()
}

/// Catch-panic handler; the payload becomes an unrecognized failure
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string());

    let failure = Failure::new(FailureKind::Unrecognized)
        .with_type_name("panic")
        .with_message(message);

    ApiError(failure).into_response()
}
