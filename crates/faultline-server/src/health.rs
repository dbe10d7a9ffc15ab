use crate::response::ApiResponse;

/// Health check handler
pub async fn health_handler() -> ApiResponse<&'static str> {
    ApiResponse::success("ok")
}
