//! Read-only routes exposing the error-code table
//!
//! `GET /v1/error-codes?page=&showCount=` lists descriptors in catalog order
//! and `GET /v1/error-codes/{id}` returns one by its kebab-case id.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use faultline_config::PaginationConfig;
use faultline_core::{DomainFault, ErrorDescriptor, ErrorId, Failure, PageInfo, catalog};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{Path, Query};
use crate::response::ApiResponse;

/// Wire form of one catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorView {
    pub id: ErrorId,
    pub status: u16,
    pub code: &'static str,
    pub message: &'static str,
}

impl From<&'static ErrorDescriptor> for DescriptorView {
    fn from(descriptor: &'static ErrorDescriptor) -> Self {
        Self {
            id: descriptor.id(),
            status: descriptor.status().as_u16(),
            code: descriptor.code(),
            message: descriptor.default_message(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    page: u32,
    show_count: Option<u32>,
}

pub fn router(pagination: PaginationConfig) -> Router {
    Router::new()
        .route("/v1/error-codes", get(list_descriptors))
        .route("/v1/error-codes/{id}", get(get_descriptor))
        .with_state(pagination)
}

async fn list_descriptors(
    State(pagination): State<PaginationConfig>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<DescriptorView>, ApiError> {
    if params.page == 0 {
        return Err(Failure::illegal_argument("page starts at 1").into());
    }

    let show_count = pagination.show_count(params.show_count);
    let skip = (params.page as usize - 1).saturating_mul(show_count as usize);

    let list: Vec<DescriptorView> = catalog::descriptors()
        .skip(skip)
        .take(show_count as usize)
        .map(DescriptorView::from)
        .collect();

    let total_count = u64::try_from(catalog::descriptors().count()).unwrap_or(u64::MAX);
    let page_info = PageInfo::new(total_count, params.page, show_count);
    Ok(ApiResponse::list(list, Some(page_info)))
}

async fn get_descriptor(Path(id): Path<String>) -> Result<ApiResponse<DescriptorView>, ApiError> {
    let descriptor = catalog::lookup(&id).map_err(|e| {
        tracing::debug!(error = %e, "catalog lookup failed");
        DomainFault::with_message(ErrorId::ResourceNotFound, format!("no error code with id '{id}'"))
    })?;

    Ok(ApiResponse::success(DescriptorView::from(descriptor)))
}
