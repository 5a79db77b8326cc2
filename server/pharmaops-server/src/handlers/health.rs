use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::PharmaOpsServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2026-08-30T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "1.0.0")]
    pub version: String,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Application name
    #[schema(example = "PharmaOps Engine")]
    pub name: String,
    /// Application version
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Health check handler
///
/// Probes the database pool so load balancers see connection loss.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let mut checks = HashMap::new();

    let database = if server.db.is_healthy().await {
        "healthy"
    } else {
        "unreachable"
    };
    checks.insert("database".to_string(), database.to_string());

    let response = HealthResponse {
        status: if database == "healthy" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    Ok(Json(api_success(response)))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let response = VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(Json(api_success(response)))
}
