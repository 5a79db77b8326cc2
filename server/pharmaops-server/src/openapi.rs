//! OpenAPI documentation for the PharmaOps HTTP API

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::server::PharmaOpsServer;

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::version_info,
        handlers::dashboard::get_metrics,
        handlers::dashboard::list_inventory,
        handlers::reference::list_patients,
        handlers::reference::list_doctors,
        handlers::reference::list_pharmacists,
        handlers::reference::list_drugs,
        handlers::reference::list_suppliers,
        handlers::reference::list_policies,
        handlers::dispense::create_dispense,
        handlers::dispense::reverse_dispense,
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order_items,
        handlers::orders::revise_order,
        handlers::orders::cancel_order,
        handlers::coverage::record_coverage,
        handlers::coverage::undo_coverage,
        handlers::coverage::get_coverage_summary,
    ),
    components(schemas(
        handlers::health::HealthResponse,
        handlers::health::VersionResponse,
        handlers::orders::CancelOutcome,
        handlers::orders::OrderItemsResponse,
        handlers::coverage::UndoCoverageOutcome,
        pharmacy_service::DispenseRequest,
        pharmacy_service::DispenseOutcome,
        pharmacy_service::ReversalOutcome,
        pharmacy_service::OrderLine,
        pharmacy_service::CreateOrderRequest,
        pharmacy_service::OrderOutcome,
        pharmacy_service::QtyChange,
        pharmacy_service::ReviseOrderRequest,
        pharmacy_service::RevisionOutcome,
        pharmacy_service::CoverageRequest,
        pharmacy_service::CoverageOutcome,
        pharmacy_service::CoverageEntry,
        pharmacy_service::CoverageSummary,
        pharmacy_service::ReferenceEntry,
        pharmacy_service::OrderSummary,
        pharmacy_service::OrderItemRow,
        pharmacy_service::InventoryRow,
        pharmacy_service::DashboardMetrics,
    )),
    tags(
        (name = "health", description = "Service health and version"),
        (name = "dashboard", description = "Operational metrics and inventory overview"),
        (name = "reference", description = "Reference data for selection lists"),
        (name = "dispense", description = "Dispense transactions and reversals"),
        (name = "orders", description = "Purchase order lifecycle"),
        (name = "coverage", description = "Insurance coverage against dispenses"),
    ),
    info(
        title = "PharmaOps Engine API",
        description = "Pharmacy operations service: dispensing, purchase orders and insurance coverage over an externally owned PostgreSQL schema",
        license(name = "AGPL-3.0-only")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI routes serving the generated document
pub fn create_docs_routes() -> Router<PharmaOpsServer> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
