//! The static table of error descriptors
//!
//! Codes are partitioned by range and are part of the client contract:
//!
//! - `1000`–`1099`: generic request errors
//! - `1100`–`1199`: session errors
//! - `1200`–`1299`: user errors
//! - `8000`–`8999`: external dependency errors
//! - `9999`: unclassified
//!
//! Two code strings are shared on purpose and are only unique together with the status:
//! `1001` names both `resource-not-found` (404) and `invalid-parameter-detail` (400), and
//! `9999` names both `unclassified-internal-error` (500) and `log-only-notice` (503).
//!
//! Two entries were renumbered away from the code they historically shared:
//! `invalid-json-detail` (400) now sends `1008` and `external-api-error` (503)
//! now sends `8003`. Both used to go out as `1001`. For the JSON entry that
//! collided with `invalid-parameter-detail` on (400, `1001`), leaving the pair
//! ambiguous for [`resolve`]; the external entry moved into the `8000` range it
//! belongs to. Clients matching on the old `1001` for these two must switch.

use http::StatusCode;
use serde::Serialize;
use strum::IntoEnumIterator;
use thiserror::Error;

/// Stable identifier of a catalog entry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorId {
    ResourceNotFound,
    InvalidEnumParameter,
    MissingRequiredParameter,
    UnknownRoute,
    DuplicateRequest,
    InvalidRequestParameter,
    ServiceUnavailable,
    Unauthorized,
    ExpiredSession,
    InvalidCredential,
    UserNotFound,
    EmptyExternalResponse,
    ExternalCallFailed,
    UnclassifiedInternalError,
    InvalidParameterDetail,
    InvalidJsonDetail,
    ExternalApiError,
    LogOnlyNotice,
}

impl ErrorId {
    /// The descriptor registered for this id
    pub fn descriptor(self) -> &'static ErrorDescriptor {
        &CATALOG[self as usize]
    }
}

/// Immutable catalog entry: status, code and default message of one kind of failure
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorDescriptor {
    id: ErrorId,
    status: StatusCode,
    code: &'static str,
    default_message: &'static str,
}

impl ErrorDescriptor {
    const fn new(id: ErrorId, status: StatusCode, code: &'static str, default_message: &'static str) -> Self {
        Self {
            id,
            status,
            code,
            default_message,
        }
    }

    pub const fn id(&self) -> ErrorId {
        self.id
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub const fn default_message(&self) -> &'static str {
        self.default_message
    }
}

/// Catalog lookup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No descriptor is registered under the given id
    #[error("unknown error descriptor: {0}")]
    UnknownDescriptor(String),
}

// Entries are laid out in `ErrorId` declaration order.
static CATALOG: [ErrorDescriptor; <ErrorId as strum::EnumCount>::COUNT] = [
    ErrorDescriptor::new(
        ErrorId::ResourceNotFound,
        StatusCode::NOT_FOUND,
        "1001",
        "the requested resource does not exist",
    ),
    ErrorDescriptor::new(
        ErrorId::InvalidEnumParameter,
        StatusCode::BAD_REQUEST,
        "1002",
        "invalid enum value",
    ),
    ErrorDescriptor::new(
        ErrorId::MissingRequiredParameter,
        StatusCode::BAD_REQUEST,
        "1003",
        "a required parameter is missing",
    ),
    ErrorDescriptor::new(ErrorId::UnknownRoute, StatusCode::BAD_REQUEST, "1004", "API path not found"),
    ErrorDescriptor::new(ErrorId::DuplicateRequest, StatusCode::BAD_REQUEST, "1005", "duplicate request"),
    ErrorDescriptor::new(
        ErrorId::InvalidRequestParameter,
        StatusCode::BAD_REQUEST,
        "1006",
        "invalid API request",
    ),
    ErrorDescriptor::new(
        ErrorId::ServiceUnavailable,
        StatusCode::SERVICE_UNAVAILABLE,
        "1007",
        "a problem occurred while processing, please retry",
    ),
    ErrorDescriptor::new(ErrorId::Unauthorized, StatusCode::UNAUTHORIZED, "1100", "unauthenticated user"),
    ErrorDescriptor::new(ErrorId::ExpiredSession, StatusCode::UNAUTHORIZED, "1101", "session has expired"),
    ErrorDescriptor::new(
        ErrorId::InvalidCredential,
        StatusCode::UNAUTHORIZED,
        "1102",
        "invalid authentication",
    ),
    ErrorDescriptor::new(ErrorId::UserNotFound, StatusCode::BAD_REQUEST, "1202", "user not found"),
    ErrorDescriptor::new(
        ErrorId::EmptyExternalResponse,
        StatusCode::SERVICE_UNAVAILABLE,
        "8001",
        "no response was received from the external API",
    ),
    ErrorDescriptor::new(
        ErrorId::ExternalCallFailed,
        StatusCode::SERVICE_UNAVAILABLE,
        "8002",
        "an error occurred while calling the external API",
    ),
    ErrorDescriptor::new(
        ErrorId::UnclassifiedInternalError,
        StatusCode::INTERNAL_SERVER_ERROR,
        "9999",
        "unidentified error",
    ),
    ErrorDescriptor::new(ErrorId::InvalidParameterDetail, StatusCode::BAD_REQUEST, "1001", "bad request"),
    ErrorDescriptor::new(
        ErrorId::InvalidJsonDetail,
        StatusCode::BAD_REQUEST,
        "1008",
        "invalid JSON request",
    ),
    ErrorDescriptor::new(
        ErrorId::ExternalApiError,
        StatusCode::SERVICE_UNAVAILABLE,
        "8003",
        "external API error",
    ),
    ErrorDescriptor::new(ErrorId::LogOnlyNotice, StatusCode::SERVICE_UNAVAILABLE, "9999", "check log"),
];

/// Look up a descriptor by its kebab-case id (e.g. `duplicate-request`)
///
/// # Errors
///
/// Returns [`CatalogError::UnknownDescriptor`] if no entry is registered under `id`
pub fn lookup(id: &str) -> Result<&'static ErrorDescriptor, CatalogError> {
    id.parse::<ErrorId>()
        .map(ErrorId::descriptor)
        .map_err(|_| CatalogError::UnknownDescriptor(id.to_owned()))
}

/// All descriptors in declaration order
pub fn descriptors() -> impl Iterator<Item = &'static ErrorDescriptor> {
    ErrorId::iter().map(ErrorId::descriptor)
}

/// Find the descriptor that renders as the given status and code
///
/// Every `(status, code)` pair in the catalog is unique, so this recovers
/// the descriptor an error envelope was built from.
pub fn resolve(status: StatusCode, code: &str) -> Option<&'static ErrorDescriptor> {
    CATALOG.iter().find(|d| d.status == status && d.code == code)
}
