//! Reference data handlers backing selection lists in clients
//!
//! All six endpoints read through the service-level cache, so a burst of
//! form loads costs at most one round of catalogue queries per TTL window.

use axum::{extract::State, Json};
use pharmacy_service::ReferenceEntry;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::PharmaOpsServer;

/// List patients as `(id, label)` pairs
#[utoipa::path(
    get,
    path = "/api/v1/reference/patients",
    tag = "reference",
    responses(
        (status = 200, description = "Patients retrieved successfully", body = [ReferenceEntry])
    )
)]
pub async fn list_patients(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<Vec<ReferenceEntry>>>, ApiError> {
    let data = server.pharmacy.reference_data().await?;
    Ok(Json(api_success(data.patients.clone())))
}

/// List doctors as `(id, label)` pairs
#[utoipa::path(
    get,
    path = "/api/v1/reference/doctors",
    tag = "reference",
    responses(
        (status = 200, description = "Doctors retrieved successfully", body = [ReferenceEntry])
    )
)]
pub async fn list_doctors(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<Vec<ReferenceEntry>>>, ApiError> {
    let data = server.pharmacy.reference_data().await?;
    Ok(Json(api_success(data.doctors.clone())))
}

/// List pharmacists as `(id, label)` pairs
#[utoipa::path(
    get,
    path = "/api/v1/reference/pharmacists",
    tag = "reference",
    responses(
        (status = 200, description = "Pharmacists retrieved successfully", body = [ReferenceEntry])
    )
)]
pub async fn list_pharmacists(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<Vec<ReferenceEntry>>>, ApiError> {
    let data = server.pharmacy.reference_data().await?;
    Ok(Json(api_success(data.pharmacists.clone())))
}

/// List catalogue drugs as `(id, label)` pairs
#[utoipa::path(
    get,
    path = "/api/v1/reference/drugs",
    tag = "reference",
    responses(
        (status = 200, description = "Drugs retrieved successfully", body = [ReferenceEntry])
    )
)]
pub async fn list_drugs(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<Vec<ReferenceEntry>>>, ApiError> {
    let data = server.pharmacy.reference_data().await?;
    Ok(Json(api_success(data.drugs.clone())))
}

/// List suppliers as `(id, label)` pairs
#[utoipa::path(
    get,
    path = "/api/v1/reference/suppliers",
    tag = "reference",
    responses(
        (status = 200, description = "Suppliers retrieved successfully", body = [ReferenceEntry])
    )
)]
pub async fn list_suppliers(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<Vec<ReferenceEntry>>>, ApiError> {
    let data = server.pharmacy.reference_data().await?;
    Ok(Json(api_success(data.suppliers.clone())))
}

/// List insurance policies as `(id, label)` pairs
#[utoipa::path(
    get,
    path = "/api/v1/reference/policies",
    tag = "reference",
    responses(
        (status = 200, description = "Policies retrieved successfully", body = [ReferenceEntry])
    )
)]
pub async fn list_policies(
    State(server): State<PharmaOpsServer>,
) -> Result<Json<ApiResponse<Vec<ReferenceEntry>>>, ApiError> {
    let data = server.pharmacy.reference_data().await?;
    Ok(Json(api_success(data.policies.clone())))
}
