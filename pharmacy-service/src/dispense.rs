//! Dispense and reversal transactions
//!
//! The dispense protocol inserts prescription, prescription item, dispense and
//! dispensed-item rows in one transaction. The final insert fires the external
//! database trigger that validates lot expiry and stock and decrements
//! `inventory_lot.qty_on_hand`; a trigger rejection rolls the whole
//! transaction back. The reversal restores lot quantities first, then deletes
//! dependent rows in strict child-before-parent order.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{PharmacyError, PharmacyResult};
use crate::models::{DispenseOutcome, DispenseRequest, ReversalOutcome};
use crate::service::{dispense_totals, PharmacyService};

impl PharmacyService {
    /// Execute the dispense transaction
    pub async fn dispense(&self, req: DispenseRequest) -> PharmacyResult<DispenseOutcome> {
        if req.qty_dispensed < 1 {
            return Err(PharmacyError::Validation(
                "Dispensed quantity must be at least 1".to_string(),
            ));
        }
        if req.qty_prescribed < 1 {
            return Err(PharmacyError::Validation(
                "Prescribed quantity must be at least 1".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let unit_cost: Decimal = sqlx::query_scalar(
            "SELECT unit_cost FROM inventory_lot WHERE lot_batch_id = $1",
        )
        .bind(req.lot_batch_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| PharmacyError::NotFound(format!("Inventory lot {}", req.lot_batch_id)))?;

        let (total_amount, commission) = dispense_totals(unit_cost, req.qty_dispensed);

        sqlx::query(
            r#"
            INSERT INTO prescription
                (rx_id, rx_date, status, urgency, patient_id, doctor_id, pharmacist_id)
            VALUES ($1, CURRENT_DATE, 'Dispensed', $2, $3, $4, $5)
            "#,
        )
        .bind(req.rx_id)
        .bind(&req.urgency)
        .bind(req.patient_id)
        .bind(req.doctor_id)
        .bind(req.pharmacist_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO prescription_items
                (rx_id, drug_id, qty_prescribed, dosage_instruc, frequency, refills_allowed)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(req.rx_id)
        .bind(req.drug_id)
        .bind(req.qty_prescribed)
        .bind(&req.dosage_instruc)
        .bind(&req.frequency)
        .bind(req.refills_allowed)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO dispense
                (dispense_id, dispense_date, total_amount, commission, pharmacist_id, rx_id)
            VALUES ($1, CURRENT_DATE, $2, $3, $4, $5)
            "#,
        )
        .bind(req.dispense_id)
        .bind(total_amount)
        .bind(commission)
        .bind(req.pharmacist_id)
        .bind(req.rx_id)
        .execute(&mut *tx)
        .await?;

        // Fires the stock trigger: an expired lot or insufficient quantity
        // aborts here and rolls back everything above.
        sqlx::query(
            r#"
            INSERT INTO dispensed_items
                (line_item_id, qty_dispensed, dispense_id, lot_batch_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(req.line_item_id)
        .bind(req.qty_dispensed)
        .bind(req.dispense_id)
        .bind(req.lot_batch_id)
        .execute(&mut *tx)
        .await?;

        let qty_on_hand_after: i32 = sqlx::query_scalar(
            "SELECT qty_on_hand FROM inventory_lot WHERE lot_batch_id = $1",
        )
        .bind(req.lot_batch_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            dispense_id = req.dispense_id,
            rx_id = req.rx_id,
            lot_batch_id = req.lot_batch_id,
            %total_amount,
            "dispense committed"
        );

        Ok(DispenseOutcome {
            dispense_id: req.dispense_id,
            rx_id: req.rx_id,
            total_amount,
            commission,
            lot_batch_id: req.lot_batch_id,
            qty_on_hand_after,
        })
    }

    /// Execute the reversal transaction, undoing a previously committed dispense
    pub async fn reverse_dispense(&self, dispense_id: i32) -> PharmacyResult<ReversalOutcome> {
        let mut tx = self.db.begin().await?;

        let rx_id: i32 = sqlx::query_scalar("SELECT rx_id FROM dispense WHERE dispense_id = $1")
            .bind(dispense_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| PharmacyError::NotFound(format!("Dispense {}", dispense_id)))?;

        let items: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT lot_batch_id, qty_dispensed FROM dispensed_items WHERE dispense_id = $1",
        )
        .bind(dispense_id)
        .fetch_all(&mut *tx)
        .await?;

        // Restore stock before any deletion so a mid-transaction failure can
        // never lose inventory.
        let mut units_restored: i64 = 0;
        for (lot_batch_id, qty_dispensed) in &items {
            sqlx::query(
                "UPDATE inventory_lot SET qty_on_hand = qty_on_hand + $1 WHERE lot_batch_id = $2",
            )
            .bind(qty_dispensed)
            .bind(lot_batch_id)
            .execute(&mut *tx)
            .await?;
            units_restored += i64::from(*qty_dispensed);
        }

        // Child-before-parent deletion order to satisfy foreign keys.
        sqlx::query("DELETE FROM pays WHERE dispense_id = $1")
            .bind(dispense_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM dispensed_items WHERE dispense_id = $1")
            .bind(dispense_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM dispense WHERE dispense_id = $1")
            .bind(dispense_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM prescription_items WHERE rx_id = $1")
            .bind(rx_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM prescription WHERE rx_id = $1")
            .bind(rx_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            dispense_id,
            rx_id,
            units_restored,
            "dispense reversed"
        );

        Ok(ReversalOutcome {
            dispense_id,
            rx_id,
            items_reversed: items.len() as u32,
            units_restored,
        })
    }
}
