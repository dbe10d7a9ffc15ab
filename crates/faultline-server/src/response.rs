use axum::response::{IntoResponse, Response};
use faultline_core::{DomainFault, Envelope, PageInfo};
use serde::Serialize;

/// Success or error envelope rendered as an HTTP response
#[derive(Debug)]
pub struct ApiResponse<T>(pub Envelope<T>);

impl<T> ApiResponse<T> {
    /// `200` with `{"data": ...}`
    pub fn success(data: impl Into<Option<T>>) -> Self {
        Self(Envelope::from_success(data))
    }

    /// `200` with `list` and optional `pageInfo`
    pub fn list(list: Vec<T>, page_info: Option<PageInfo>) -> Self {
        Self(Envelope::from_list(list, page_info))
    }

    /// `200` with an empty object
    pub const fn empty() -> Self {
        Self(Envelope::empty())
    }

    pub fn into_inner(self) -> Envelope<T> {
        self.0
    }
}

impl<T> From<Envelope<T>> for ApiResponse<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Self(envelope)
    }
}

impl<T> From<&DomainFault> for ApiResponse<T> {
    fn from(fault: &DomainFault) -> Self {
        Self(Envelope::from_fault(fault))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.0.status();
        (status, axum::Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use faultline_core::ErrorId;
    use http::StatusCode;

    use super::*;

    async fn render<T: Serialize>(response: ApiResponse<T>) -> (StatusCode, String) {
        let response = response.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn success_renders_data() {
        let (status, body) = render(ApiResponse::success(42)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"data":42}"#);
    }

    #[tokio::test]
    async fn empty_renders_empty_object() {
        let (status, body) = render(ApiResponse::<()>::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn list_renders_page_info() {
        let (_, body) = render(ApiResponse::list(vec!["a", "b"], Some(PageInfo::new(2, 1, 20)))).await;
        insta::assert_snapshot!(body, @r#"{"pageInfo":{"totalCount":2,"page":1,"showCount":20},"list":["a","b"]}"#);
    }

    #[tokio::test]
    async fn fault_uses_descriptor_status() {
        let fault = DomainFault::new(ErrorId::ExpiredSession);
        let (status, body) = render(ApiResponse::<()>::from(&fault)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        insta::assert_snapshot!(body, @r#"{"errorCode":"1101","errorMessage":"session has expired"}"#);
    }
}
