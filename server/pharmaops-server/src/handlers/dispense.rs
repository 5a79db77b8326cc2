use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pharmacy_service::{DispenseOutcome, DispenseRequest, ReversalOutcome};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::PharmaOpsServer;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_id, validate_required};

impl RequestValidation for DispenseRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_id!(self.rx_id, "Prescription ID must be positive");
        validate_id!(self.dispense_id, "Dispense ID must be positive");
        validate_id!(self.line_item_id, "Line item ID must be positive");
        validate_id!(self.patient_id, "Patient ID must be positive");
        validate_id!(self.doctor_id, "Doctor ID must be positive");
        validate_id!(self.pharmacist_id, "Pharmacist ID must be positive");
        validate_id!(self.drug_id, "Drug ID must be positive");
        validate_id!(self.lot_batch_id, "Lot batch ID must be positive");
        validate_required!(self.urgency, "Urgency is required");
        validate_required!(self.dosage_instruc, "Dosage instructions are required");
        validate_required!(self.frequency, "Frequency is required");
        validate_field!(
            self.qty_prescribed,
            self.qty_prescribed >= 1,
            "Prescribed quantity must be at least 1"
        );
        validate_field!(
            self.qty_dispensed,
            self.qty_dispensed >= 1,
            "Dispensed quantity must be at least 1"
        );
        validate_field!(
            self.refills_allowed,
            self.refills_allowed >= 0,
            "Refills allowed cannot be negative"
        );
        Ok(())
    }
}

/// Dispense a drug to a patient
///
/// Writes the prescription, its line item, the dispense record and the
/// dispensed item in one transaction. The lot stock deduction happens in
/// the database trigger on `dispensed_items`.
#[utoipa::path(
    post,
    path = "/api/v1/dispenses",
    tag = "dispense",
    request_body = DispenseRequest,
    responses(
        (status = 201, description = "Dispense committed", body = DispenseOutcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced lot not found"),
        (status = 500, description = "Database rejected the transaction")
    )
)]
pub async fn create_dispense(
    State(server): State<PharmaOpsServer>,
    Json(request): Json<DispenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DispenseOutcome>>), ApiError> {
    request.validate()?;

    let outcome = server.pharmacy.dispense(request).await?;
    Ok((StatusCode::CREATED, Json(api_success(outcome))))
}

/// Reverse a dispense
///
/// Restores lot stock and deletes the dispense chain down to the
/// prescription, including any recorded insurance coverage.
#[utoipa::path(
    delete,
    path = "/api/v1/dispenses/{dispense_id}",
    tag = "dispense",
    params(
        ("dispense_id" = i32, Path, description = "Dispense record to reverse")
    ),
    responses(
        (status = 200, description = "Dispense reversed", body = ReversalOutcome),
        (status = 404, description = "Dispense not found")
    )
)]
pub async fn reverse_dispense(
    State(server): State<PharmaOpsServer>,
    Path(dispense_id): Path<i32>,
) -> Result<Json<ApiResponse<ReversalOutcome>>, ApiError> {
    if dispense_id <= 0 {
        return Err(ApiError::validation("Dispense ID must be positive"));
    }

    let outcome = server.pharmacy.reverse_dispense(dispense_id).await?;
    Ok(Json(api_success(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DispenseRequest {
        DispenseRequest {
            rx_id: 4101,
            dispense_id: 5101,
            line_item_id: 6101,
            patient_id: 601,
            doctor_id: 701,
            pharmacist_id: 801,
            drug_id: 2001,
            lot_batch_id: 3001,
            urgency: "High".to_string(),
            qty_prescribed: 5,
            qty_dispensed: 2,
            dosage_instruc: "Take with water".to_string(),
            frequency: "2x daily".to_string(),
            refills_allowed: 0,
        }
    }

    #[test]
    fn well_formed_request_validates() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn blank_urgency_is_rejected() {
        let mut req = request();
        req.urgency = "  ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_dispensed_quantity_is_rejected() {
        let mut req = request();
        req.qty_dispensed = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn nonpositive_lot_id_is_rejected() {
        let mut req = request();
        req.lot_batch_id = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn negative_refills_are_rejected() {
        let mut req = request();
        req.refills_allowed = -1;
        assert!(req.validate().is_err());
    }
}
