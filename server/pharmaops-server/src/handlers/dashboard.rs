use axum::{
    extract::{Query, State},
    Json,
};
use pharmacy_service::{DashboardMetrics, InventoryFilter, InventoryRow};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::PharmaOpsServer;

/// Query parameters for the inventory overview
#[derive(Debug, Deserialize, IntoParams)]
pub struct InventoryQuery {
    /// Case-insensitive substring match on the drug name
    pub search: Option<String>,
    /// Restrict to lots below the low-stock threshold
    pub low_stock_only: Option<bool>,
}

/// Dashboard metrics handler
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/metrics",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard metrics retrieved successfully", body = DashboardMetrics)
    )
)]
pub async fn get_metrics(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<DashboardMetrics>>, ApiError> {
    let metrics = server.pharmacy.dashboard_metrics().await?;
    Ok(Json(api_success(metrics)))
}

/// Inventory overview handler
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/inventory",
    tag = "dashboard",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Inventory rows retrieved successfully", body = [InventoryRow])
    )
)]
pub async fn list_inventory(
    State(server): State<PharmaOpsServer>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<ApiResponse<Vec<InventoryRow>>>, ApiError> {
    let filter = InventoryFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        low_stock_only: query.low_stock_only.unwrap_or(false),
    };

    let rows = server.pharmacy.inventory_overview(&filter).await?;
    Ok(Json(api_success(rows)))
}
