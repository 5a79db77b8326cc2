use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Inputs for the dispense transaction
///
/// Identifiers are caller-supplied and expected to be unused; referenced
/// patient, doctor, pharmacist, drug and lot rows must already exist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DispenseRequest {
    pub rx_id: i32,
    pub dispense_id: i32,
    pub line_item_id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub pharmacist_id: i32,
    pub drug_id: i32,
    pub lot_batch_id: i32,
    pub urgency: String,
    pub qty_prescribed: i32,
    pub qty_dispensed: i32,
    pub dosage_instruc: String,
    pub frequency: String,
    pub refills_allowed: i32,
}

/// Result of a committed dispense transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DispenseOutcome {
    pub dispense_id: i32,
    pub rx_id: i32,
    pub total_amount: Decimal,
    pub commission: Decimal,
    pub lot_batch_id: i32,
    /// Lot quantity after the stock trigger ran, read back inside the transaction
    pub qty_on_hand_after: i32,
}

/// Result of a committed reversal transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReversalOutcome {
    pub dispense_id: i32,
    pub rx_id: i32,
    pub items_reversed: u32,
    pub units_restored: i64,
}

/// One purchase-order line item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub drug_id: i32,
    pub qty_ordered: i32,
    pub unit_cost: Decimal,
}

/// Inputs for the purchase order transaction
///
/// Lines with a zero quantity are skipped; a request with no surviving
/// lines still creates the order header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub order_id: i32,
    pub supplier_id: i32,
    pub items: Vec<OrderLine>,
}

/// Result of a committed purchase order transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderOutcome {
    pub order_id: i32,
    pub lines_inserted: u32,
}

/// Quantity change for one existing order line, addressed by drug id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QtyChange {
    pub drug_id: i32,
    pub qty_ordered: i32,
}

/// Inputs for the order revision transaction
///
/// Each operation is optional and independent, but at least one must be
/// present. All selected operations commit together or not at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviseOrderRequest {
    pub add: Option<OrderLine>,
    pub update: Option<QtyChange>,
    pub remove: Option<i32>,
}

/// Result of a committed order revision
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RevisionOutcome {
    pub order_id: i32,
    pub added: bool,
    pub updated: bool,
    pub removed: bool,
}

/// Inputs for the insurance coverage transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageRequest {
    pub dispense_id: i32,
    pub policy_id: i32,
    pub amount_covered: Decimal,
}

/// Result of a committed coverage transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageOutcome {
    pub dispense_id: i32,
    pub policy_id: i32,
    pub amount_covered: Decimal,
    pub remaining_balance: Decimal,
}

/// One recorded coverage row for a dispense
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct CoverageEntry {
    pub policy_id: i32,
    pub company: String,
    pub amount_covered: Decimal,
}

/// Coverage state of a dispense: totals plus all recorded payments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageSummary {
    pub dispense_id: i32,
    pub total_amount: Decimal,
    pub already_covered: Decimal,
    pub remaining_balance: Decimal,
    pub entries: Vec<CoverageEntry>,
}

/// Generic `(id, label)` pair for selection lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct ReferenceEntry {
    pub id: i32,
    pub label: String,
}

/// One row of the order history listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct OrderSummary {
    pub order_id: i32,
    pub supplier: String,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    pub status: String,
}

/// One line item of an order, joined with the drug catalogue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct OrderItemRow {
    pub drug_id: i32,
    pub drug_name: String,
    pub qty_ordered: i32,
    pub unit_cost: Decimal,
}

/// One row of the inventory overview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct InventoryRow {
    pub drug_name: String,
    pub qty_on_hand: i32,
    pub expiry_date: NaiveDate,
}

/// Live counters for the operations dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardMetrics {
    pub total_patients: i64,
    pub low_stock_lots: i64,
    pub pending_orders: i64,
    pub expired_lots: i64,
    pub expiring_within_90_days: i64,
}

/// Filters for the inventory overview
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    /// Case-insensitive substring match on the drug name
    pub search: Option<String>,
    /// Restrict to lots under the low-stock threshold
    pub low_stock_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn dispense_request_round_trips_through_json() {
        let req = DispenseRequest {
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
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: DispenseRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lot_batch_id, 3001);
        assert_eq!(back.qty_dispensed, 2);
    }

    #[test]
    fn revise_request_defaults_to_no_operations() {
        let req: ReviseOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(req.add.is_none());
        assert!(req.update.is_none());
        assert!(req.remove.is_none());
    }

    #[test]
    fn coverage_amount_deserializes_as_decimal() {
        let req: CoverageRequest =
            serde_json::from_str(r#"{"dispense_id":5101,"policy_id":9001,"amount_covered":"6.40"}"#)
                .unwrap();
        assert_eq!(req.amount_covered, Decimal::new(640, 2));
    }
}
