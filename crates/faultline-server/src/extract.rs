//! Extractors whose rejections flow through the fault boundary
//!
//! Drop-in replacements for the axum extractors of the same name. A request
//! they cannot decode is rejected with an [`ApiError`] instead of axum's
//! plain-text response.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use faultline_core::Failure;
use http::HeaderMap;

use crate::error::ApiError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

/// Deserialized query string
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// URL-encoded form body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct Form<T>(pub T);

/// Path parameters
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Value of a header the handler cannot do without
///
/// # Errors
///
/// Returns a missing-header failure if the header is absent or not visible
/// ASCII
pub fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, Failure> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Failure::missing_header(name))
}

/// `multipart/form-data` body, buffered by part name
///
/// Unnamed parts are skipped and a repeated name keeps its last part.
#[derive(Debug, Clone, Default)]
pub struct Parts(HashMap<String, Bytes>);

impl Parts {
    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.0.get(name)
    }

    /// Content of a part the handler cannot do without
    ///
    /// # Errors
    ///
    /// Returns a missing-part failure if no part has this name
    pub fn required(&self, name: &str) -> Result<&Bytes, Failure> {
        self.get(name).ok_or_else(|| Failure::missing_part(name))
    }

    /// Like [`Parts::required`], decoded as UTF-8
    ///
    /// # Errors
    ///
    /// Returns a missing-part failure if no part has this name, or a type
    /// mismatch if its content is not UTF-8
    pub fn required_text(&self, name: &str) -> Result<&str, Failure> {
        let bytes = self.required(name)?;
        std::str::from_utf8(bytes).map_err(|e| Failure::type_mismatch(Some(name.to_owned()), e.to_string()))
    }
}

impl<S> FromRequest<S> for Parts
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(request, state).await?;
        let mut parts = HashMap::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            parts.insert(name, field.bytes().await?);
        }

        Ok(Self(parts))
    }
}
