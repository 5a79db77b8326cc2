//! PharmaOps Engine HTTP server
//!
//! Exposes the pharmacy operations service over an axum REST API with a
//! standard response envelope, OpenAPI documentation and request tracing.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;
pub mod validation;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ApiResponse};
pub use server::{PharmaOpsServer, ServerConfig};

/// Build the application router over the given server state
pub fn create_app(server: PharmaOpsServer) -> Router {
    routes::create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}
