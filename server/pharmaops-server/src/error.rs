//! API error and response envelope types
//!
//! Every endpoint returns an [`ApiResponse`] wrapper; failures convert to
//! [`ApiError`] which maps onto an HTTP status and the same envelope with
//! `success = false`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pharmacy_service::PharmacyError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard API response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

/// Metadata attached to list responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Pagination block inside [`ResponseMetadata`]
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationInfo {
    pub page: i32,
    pub page_size: i32,
    pub total_pages: i32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Wrap successful data in the standard envelope
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        metadata: None,
    }
}

/// Wrap successful data with metadata in the standard envelope
pub fn api_success_with_meta<T>(data: T, metadata: ResponseMetadata) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        metadata: Some(metadata),
    }
}

/// API error taxonomy
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.to_string()),
            metadata: None,
        };
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound("Row".to_string()),
            // Constraint violations and trigger rejections surface with the
            // raw database error text, per the error handling design.
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<PharmacyError> for ApiError {
    fn from(e: PharmacyError) -> Self {
        match e {
            PharmacyError::Validation(msg) => Self::Validation(msg),
            PharmacyError::NotFound(what) => Self::NotFound(what),
            PharmacyError::OrderNotPending(order_id) => {
                Self::Conflict(format!("Order {} is not in PENDING status", order_id))
            }
            PharmacyError::OverCoverage {
                requested,
                remaining,
            } => Self::Conflict(format!(
                "Coverage amount {} exceeds remaining balance {}",
                requested, remaining
            )),
            PharmacyError::RowCountMismatch { expected, actual } => Self::Internal(format!(
                "Expected {} affected row(s), found {}",
                expected, actual
            )),
            PharmacyError::Pool(err) => Self::Database(err.to_string()),
            PharmacyError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::validation("Quantity must be positive");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: ApiError = PharmacyError::NotFound("Dispense 5101".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Dispense 5101 not found");
    }

    #[test]
    fn over_coverage_maps_to_conflict() {
        let err: ApiError = PharmacyError::OverCoverage {
            requested: Decimal::new(2000, 2),
            remaining: Decimal::new(560, 2),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn order_not_pending_maps_to_conflict() {
        let err: ApiError = PharmacyError::OrderNotPending(6109).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn success_envelope_omits_error_field() {
        let response = api_success(vec![1, 2, 3]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }
}
