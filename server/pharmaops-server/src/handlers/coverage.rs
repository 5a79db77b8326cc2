use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pharmacy_service::{CoverageOutcome, CoverageRequest, CoverageSummary};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::PharmaOpsServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_id};

/// Result of removing a recorded coverage entry
#[derive(Debug, Serialize, ToSchema)]
pub struct UndoCoverageOutcome {
    pub dispense_id: i32,
    pub policy_id: i32,
}

impl RequestValidation for CoverageRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_id!(self.dispense_id, "Dispense ID must be positive");
        validate_id!(self.policy_id, "Policy ID must be positive");
        validate_field!(
            self.amount_covered,
            self.amount_covered > Decimal::ZERO,
            "Coverage amount must be greater than zero"
        );
        Ok(())
    }
}

/// Record insurance coverage against a dispense
///
/// The insert is guarded so the covered total can never exceed the dispense
/// total, even under concurrent requests for the same dispense.
#[utoipa::path(
    post,
    path = "/api/v1/coverage",
    tag = "coverage",
    request_body = CoverageRequest,
    responses(
        (status = 201, description = "Coverage recorded", body = CoverageOutcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Dispense not found"),
        (status = 409, description = "Amount exceeds the remaining balance")
    )
)]
pub async fn record_coverage(
    State(server): State<PharmaOpsServer>,
    Json(request): Json<CoverageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CoverageOutcome>>), ApiError> {
    request.validate()?;

    let outcome = server.pharmacy.record_coverage(request).await?;
    Ok((StatusCode::CREATED, Json(api_success(outcome))))
}

/// Remove a recorded coverage entry
#[utoipa::path(
    delete,
    path = "/api/v1/coverage/{dispense_id}/{policy_id}",
    tag = "coverage",
    params(
        ("dispense_id" = i32, Path, description = "Dispense the entry belongs to"),
        ("policy_id" = i32, Path, description = "Policy that paid the entry")
    ),
    responses(
        (status = 200, description = "Coverage entry removed", body = UndoCoverageOutcome),
        (status = 404, description = "Coverage entry not found")
    )
)]
pub async fn undo_coverage(
    State(server): State<PharmaOpsServer>,
    Path((dispense_id, policy_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<UndoCoverageOutcome>>, ApiError> {
    server.pharmacy.undo_coverage(dispense_id, policy_id).await?;
    Ok(Json(api_success(UndoCoverageOutcome {
        dispense_id,
        policy_id,
    })))
}

/// Coverage summary for a dispense
#[utoipa::path(
    get,
    path = "/api/v1/dispenses/{dispense_id}/coverage",
    tag = "coverage",
    params(
        ("dispense_id" = i32, Path, description = "Dispense to summarize")
    ),
    responses(
        (status = 200, description = "Coverage summary retrieved successfully", body = CoverageSummary),
        (status = 404, description = "Dispense not found")
    )
)]
pub async fn get_coverage_summary(
    State(server): State<PharmaOpsServer>,
    Path(dispense_id): Path<i32>,
) -> Result<Json<ApiResponse<CoverageSummary>>, ApiError> {
    let summary = server.pharmacy.coverage_summary(dispense_id).await?;
    Ok(Json(api_success(summary)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: &str) -> CoverageRequest {
        CoverageRequest {
            dispense_id: 5101,
            policy_id: 9001,
            amount_covered: amount.parse().unwrap(),
        }
    }

    #[test]
    fn positive_amount_validates() {
        assert!(request("6.40").validate().is_ok());
    }

    #[test]
    fn zero_amount_is_rejected() {
        assert!(request("0.00").validate().is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(request("-1.00").validate().is_err());
    }

    #[test]
    fn nonpositive_policy_id_is_rejected() {
        let mut req = request("6.40");
        req.policy_id = 0;
        assert!(req.validate().is_err());
    }
}
