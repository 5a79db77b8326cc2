use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use pharmacy_service::{
    CreateOrderRequest, OrderItemRow, OrderOutcome, OrderSummary, ReviseOrderRequest,
    RevisionOutcome,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{api_success, api_success_with_meta, ApiError, ApiResponse};
use crate::server::PharmaOpsServer;
use crate::types::pagination::PaginationParams;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_id};

const ORDER_STATUSES: [&str; 3] = ["PENDING", "FULFILLED", "CANCELLED"];

/// Query parameters for the order history listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderListQuery {
    /// Optional status filter (PENDING, FULFILLED or CANCELLED)
    pub status: Option<String>,
}

/// Result of a committed order cancellation
#[derive(Debug, Serialize, ToSchema)]
pub struct CancelOutcome {
    pub order_id: i32,
    #[schema(example = "CANCELLED")]
    pub status: String,
}

/// An order's status and its line items
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemsResponse {
    pub order_id: i32,
    pub status: String,
    pub items: Vec<OrderItemRow>,
}

impl RequestValidation for CreateOrderRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_id!(self.order_id, "Order ID must be positive");
        validate_id!(self.supplier_id, "Supplier ID must be positive");
        // Zero-to-many lines: zero-quantity lines are skipped downstream, so
        // only lines that will actually be inserted need a priced unit cost.
        for line in &self.items {
            validate_id!(line.drug_id, "Drug ID must be positive");
            validate_field!(
                line.qty_ordered,
                line.qty_ordered >= 0,
                "Order line quantities cannot be negative"
            );
            if line.qty_ordered > 0 {
                validate_field!(
                    line.unit_cost,
                    line.unit_cost > Decimal::ZERO,
                    "Unit cost must be greater than zero"
                );
            }
        }
        Ok(())
    }
}

impl RequestValidation for ReviseOrderRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(
            self,
            self.add.is_some() || self.update.is_some() || self.remove.is_some(),
            "Revision must include at least one operation"
        );
        if let Some(ref line) = self.add {
            validate_id!(line.drug_id, "Drug ID must be positive");
            validate_field!(
                line.qty_ordered,
                line.qty_ordered >= 1,
                "Added line quantity must be at least 1"
            );
            validate_field!(
                line.unit_cost,
                line.unit_cost > Decimal::ZERO,
                "Unit cost must be greater than zero"
            );
        }
        if let Some(ref change) = self.update {
            validate_id!(change.drug_id, "Drug ID must be positive");
            validate_field!(
                change.qty_ordered,
                change.qty_ordered >= 1,
                "Updated quantity must be at least 1"
            );
        }
        if let Some(drug_id) = self.remove {
            validate_id!(drug_id, "Drug ID must be positive");
        }
        Ok(())
    }
}

/// Order history handler
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "orders",
    params(OrderListQuery, PaginationParams),
    responses(
        (status = 200, description = "Orders retrieved successfully", body = [OrderSummary]),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_orders(
    State(server): State<PharmaOpsServer>,
    Query(filter): Query<OrderListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<OrderSummary>>>, ApiError> {
    let status = match filter.status.as_deref() {
        None => None,
        Some(s) if ORDER_STATUSES.contains(&s) => Some(s),
        Some(s) => {
            return Err(ApiError::validation(format!(
                "Unknown order status '{}'",
                s
            )))
        }
    };

    let orders = server
        .pharmacy
        .order_history(status, pagination.limit(), pagination.offset())
        .await?;
    let total = server.pharmacy.order_count(status).await?;

    Ok(Json(api_success_with_meta(
        orders,
        pagination.to_metadata(total),
    )))
}

/// Create a purchase order
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order committed", body = OrderOutcome),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_order(
    State(server): State<PharmaOpsServer>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderOutcome>>), ApiError> {
    request.validate()?;

    let outcome = server.pharmacy.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(api_success(outcome))))
}

/// List an order's line items
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}/items",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Purchase order to inspect")
    ),
    responses(
        (status = 200, description = "Order items retrieved successfully", body = OrderItemsResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order_items(
    State(server): State<PharmaOpsServer>,
    Path(order_id): Path<i32>,
) -> Result<Json<ApiResponse<OrderItemsResponse>>, ApiError> {
    let (status, items) = server.pharmacy.order_items(order_id).await?;
    Ok(Json(api_success(OrderItemsResponse {
        order_id,
        status,
        items,
    })))
}

/// Revise a pending purchase order
///
/// Add, update and remove operations are all optional but at least one is
/// required; they commit together against a PENDING order only.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{order_id}/revisions",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Purchase order to revise")
    ),
    request_body = ReviseOrderRequest,
    responses(
        (status = 200, description = "Revision committed", body = RevisionOutcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Order or targeted line not found"),
        (status = 409, description = "Order is not PENDING")
    )
)]
pub async fn revise_order(
    State(server): State<PharmaOpsServer>,
    Path(order_id): Path<i32>,
    Json(request): Json<ReviseOrderRequest>,
) -> Result<Json<ApiResponse<RevisionOutcome>>, ApiError> {
    request.validate()?;

    let outcome = server.pharmacy.revise_order(order_id, request).await?;
    Ok(Json(api_success(outcome)))
}

/// Cancel a pending purchase order
#[utoipa::path(
    post,
    path = "/api/v1/orders/{order_id}/cancel",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Purchase order to cancel")
    ),
    responses(
        (status = 200, description = "Order cancelled", body = CancelOutcome),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not PENDING")
    )
)]
pub async fn cancel_order(
    State(server): State<PharmaOpsServer>,
    Path(order_id): Path<i32>,
) -> Result<Json<ApiResponse<CancelOutcome>>, ApiError> {
    server.pharmacy.cancel_order(order_id).await?;
    Ok(Json(api_success(CancelOutcome {
        order_id,
        status: "CANCELLED".to_string(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_service::{OrderLine, QtyChange};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(drug_id: i32, qty_ordered: i32) -> OrderLine {
        OrderLine {
            drug_id,
            qty_ordered,
            unit_cost: dec("4.25"),
        }
    }

    #[test]
    fn create_order_with_positive_lines_validates() {
        let request = CreateOrderRequest {
            order_id: 6101,
            supplier_id: 901,
            items: vec![line(2001, 10), line(2002, 5)],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_order_rejects_negative_quantity() {
        let request = CreateOrderRequest {
            order_id: 6101,
            supplier_id: 901,
            items: vec![line(2001, -1)],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_order_allows_all_zero_quantity_lines() {
        // A header with no surviving lines still commits downstream.
        let request = CreateOrderRequest {
            order_id: 6101,
            supplier_id: 901,
            items: vec![line(2001, 0), line(2002, 0), line(2003, 0)],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_order_allows_empty_items() {
        let request = CreateOrderRequest {
            order_id: 6101,
            supplier_id: 901,
            items: vec![],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_order_ignores_unit_cost_on_skipped_lines() {
        let mut skipped = line(2001, 0);
        skipped.unit_cost = Decimal::ZERO;
        let request = CreateOrderRequest {
            order_id: 6101,
            supplier_id: 901,
            items: vec![skipped, line(2002, 3)],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn revise_order_rejects_no_operations() {
        let request = ReviseOrderRequest::default();
        assert!(request.validate().is_err());
    }

    #[test]
    fn revise_order_rejects_zero_quantity_update() {
        let request = ReviseOrderRequest {
            update: Some(QtyChange {
                drug_id: 2001,
                qty_ordered: 0,
            }),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn revise_order_with_single_remove_validates() {
        let request = ReviseOrderRequest {
            remove: Some(2001),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}
