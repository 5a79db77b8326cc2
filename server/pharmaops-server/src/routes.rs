pub mod paths;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{coverage, dashboard, dispense, health, orders, reference};
use crate::openapi;
use crate::server::PharmaOpsServer;

/// Create health check routes
pub fn health_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .route(paths::api_v1::DASHBOARD_METRICS, get(dashboard::get_metrics))
        .route(
            paths::api_v1::DASHBOARD_INVENTORY,
            get(dashboard::list_inventory),
        )
}

/// Create reference data routes
pub fn reference_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .route(paths::api_v1::REFERENCE_PATIENTS, get(reference::list_patients))
        .route(paths::api_v1::REFERENCE_DOCTORS, get(reference::list_doctors))
        .route(
            paths::api_v1::REFERENCE_PHARMACISTS,
            get(reference::list_pharmacists),
        )
        .route(paths::api_v1::REFERENCE_DRUGS, get(reference::list_drugs))
        .route(paths::api_v1::REFERENCE_SUPPLIERS, get(reference::list_suppliers))
        .route(paths::api_v1::REFERENCE_POLICIES, get(reference::list_policies))
}

/// Create dispense routes
pub fn dispense_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .route(paths::api_v1::DISPENSES, post(dispense::create_dispense))
        .route(
            paths::api_v1::DISPENSE_BY_ID,
            delete(dispense::reverse_dispense),
        )
        .route(
            paths::api_v1::DISPENSE_COVERAGE,
            get(coverage::get_coverage_summary),
        )
}

/// Create purchase order routes
pub fn order_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .route(paths::api_v1::ORDERS, get(orders::list_orders))
        .route(paths::api_v1::ORDERS, post(orders::create_order))
        .route(paths::api_v1::ORDER_ITEMS, get(orders::get_order_items))
        .route(paths::api_v1::ORDER_REVISIONS, post(orders::revise_order))
        .route(paths::api_v1::ORDER_CANCEL, post(orders::cancel_order))
}

/// Create insurance coverage routes
pub fn coverage_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .route(paths::api_v1::COVERAGE, post(coverage::record_coverage))
        .route(
            paths::api_v1::COVERAGE_BY_KEY,
            delete(coverage::undo_coverage),
        )
}

/// Assemble all routes
pub fn create_routes() -> Router<PharmaOpsServer> {
    Router::new()
        .merge(health_routes())
        .merge(dashboard_routes())
        .merge(reference_routes())
        .merge(dispense_routes())
        .merge(order_routes())
        .merge(coverage_routes())
        .merge(openapi::create_docs_routes())
}
