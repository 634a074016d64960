use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::query::QueryError;
use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        error!("Course store error: {value}");
        match value {
            StoreError::Read { .. } => ApiError::Internal("Failed to load course data".into()),
            StoreError::Decode(_) => ApiError::Internal("Course data is malformed".into()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(value: QueryError) -> Self {
        error!("Course query error: {value}");
        ApiError::Internal(value.to_string())
    }
}
