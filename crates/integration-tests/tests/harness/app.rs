//! Fixture routes raising each kind of failure the boundary handles

use axum::Router;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::http::StatusCode;
use faultline_core::{CustomError, DomainFault, ErrorId, Failure, FieldViolation, PageInfo};
use faultline_server::{ApiError, ApiResponse, Json, Parts, Path, Query, required_header};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub keyword: String,
    pub show_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Signup {
    pub age: serde_json::Value,
    pub email: serde_json::Value,
}

pub fn routes() -> Router {
    Router::new()
        .route("/v1/users", post(create_user).get(search_users))
        .route("/v1/users/{id}", get(get_user))
        .route("/v1/signup", post(signup))
        .route("/v1/session", get(session))
        .route("/v1/orders/{id}/submit", post(submit_order))
        .route("/v1/upstream", get(upstream))
        .route("/v1/quota", get(quota))
        .route("/v1/documents/{id}", axum::routing::put(update_document))
        .route("/v1/upload", post(upload))
        .route("/v1/nothing", get(nothing))
        .route("/v1/panic", get(explode))
}

async fn create_user(Json(new_user): Json<NewUser>) -> ApiResponse<User> {
    ApiResponse::success(User {
        id: 1,
        name: new_user.name,
        age: new_user.age,
    })
}

fn ada() -> User {
    User {
        id: 1,
        name: "ada".to_owned(),
        age: 36,
    }
}

async fn search_users(Query(search): Query<Search>) -> ApiResponse<User> {
    let users: Vec<User> = std::iter::once(ada())
        .filter(|user| user.name.contains(&search.keyword))
        .collect();
    let total_count = users.len() as u64;

    ApiResponse::list(users, Some(PageInfo::new(total_count, 1, search.show_count.unwrap_or(20))))
}

async fn get_user(Path(id): Path<u64>) -> Result<ApiResponse<User>, ApiError> {
    if id != 1 {
        return Err(ErrorId::UserNotFound.into());
    }

    Ok(ApiResponse::success(ada()))
}

/// Field-level validation done by the handler itself
async fn signup(Json(signup): Json<Signup>) -> Result<ApiResponse<()>, ApiError> {
    let mut violations = Vec::new();
    if !signup.age.is_u64() {
        violations.push(FieldViolation::new("age", signup.age));
    }
    if !signup.email.is_string() {
        violations.push(FieldViolation::new("email", signup.email));
    }

    if violations.is_empty() {
        Ok(ApiResponse::empty())
    } else {
        Err(Failure::binding(violations).into())
    }
}

async fn session(headers: HeaderMap) -> Result<ApiResponse<String>, ApiError> {
    let session_id = required_header(&headers, "X-Session-Id")?;
    Ok(ApiResponse::success(session_id.to_owned()))
}

async fn submit_order(Path(id): Path<u64>) -> Result<ApiResponse<u64>, ApiError> {
    Err(Failure::duplicate(format!("order {id} was already submitted")).into())
}

async fn upstream() -> Result<ApiResponse<()>, ApiError> {
    let fault = DomainFault::with_message(ErrorId::ExternalApiError, "billing provider rejected the charge")
        .with_external_error(serde_json::json!({ "code": "card_declined" }));
    Err(fault.into())
}

/// Raised with a status and code that are registered in the catalog
async fn quota() -> Result<ApiResponse<()>, ApiError> {
    Err(CustomError::new(StatusCode::SERVICE_UNAVAILABLE, "1007", "daily quota exhausted").into())
}

/// Raised with a status and code the catalog does not know
async fn update_document(Path(id): Path<u64>) -> Result<ApiResponse<()>, ApiError> {
    let conflict = CustomError::new(StatusCode::CONFLICT, "4090", format!("document {id} was modified"))
        .with_external_error(serde_json::json!({ "expectedVersion": 3, "currentVersion": 4 }));
    Err(ApiError::http(conflict))
}

async fn upload(parts: Parts) -> Result<ApiResponse<usize>, ApiError> {
    let file = parts.required("file")?;
    Ok(ApiResponse::success(file.len()))
}

async fn nothing() -> ApiResponse<()> {
    ApiResponse::success(None)
}

async fn explode() -> ApiResponse<()> {
    panic!("fixture handler exploded");
}
