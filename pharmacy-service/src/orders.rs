//! Purchase order transactions: create, revise, cancel, plus the order read paths

use tracing::info;

use crate::error::{PharmacyError, PharmacyResult};
use crate::models::{
    CreateOrderRequest, OrderItemRow, OrderOutcome, OrderSummary, ReviseOrderRequest,
    RevisionOutcome,
};
use crate::service::PharmacyService;

/// Days between order date and expected delivery, matching the supplier SLA
/// baked into the schema's check constraint.
const DELIVERY_OFFSET_DAYS: i32 = 5;

impl PharmacyService {
    /// Execute the purchase order transaction: one header plus its line items
    pub async fn create_order(&self, req: CreateOrderRequest) -> PharmacyResult<OrderOutcome> {
        if req.items.iter().any(|line| line.qty_ordered < 0) {
            return Err(PharmacyError::Validation(
                "Order line quantities cannot be negative".to_string(),
            ));
        }
        // An order is one header plus zero-to-many lines. Zero-quantity
        // lines are skipped; when none survive, the header commits alone.
        let lines: Vec<_> = req.items.iter().filter(|line| line.qty_ordered > 0).collect();

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO purchase_order
                (order_id, order_date, expected_delivery_date, status, supplier_id)
            VALUES ($1, CURRENT_DATE, CURRENT_DATE + $2, 'PENDING', $3)
            "#,
        )
        .bind(req.order_id)
        .bind(DELIVERY_OFFSET_DAYS)
        .bind(req.supplier_id)
        .execute(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                r#"
                INSERT INTO purchase_order_item (product_id, drug_id, qty_ordered, unit_cost)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(req.order_id)
            .bind(line.drug_id)
            .bind(line.qty_ordered)
            .bind(line.unit_cost)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            order_id = req.order_id,
            supplier_id = req.supplier_id,
            lines = lines.len(),
            "purchase order created"
        );

        Ok(OrderOutcome {
            order_id: req.order_id,
            lines_inserted: lines.len() as u32,
        })
    }

    /// Execute the order revision transaction against one PENDING order
    pub async fn revise_order(
        &self,
        order_id: i32,
        req: ReviseOrderRequest,
    ) -> PharmacyResult<RevisionOutcome> {
        if req.add.is_none() && req.update.is_none() && req.remove.is_none() {
            return Err(PharmacyError::Validation(
                "Order revision requires at least one of add, update or remove".to_string(),
            ));
        }
        if let Some(line) = &req.add {
            if line.qty_ordered < 1 {
                return Err(PharmacyError::Validation(
                    "Added line quantity must be at least 1".to_string(),
                ));
            }
        }
        if let Some(change) = &req.update {
            if change.qty_ordered < 1 {
                return Err(PharmacyError::Validation(
                    "Updated line quantity must be at least 1".to_string(),
                ));
            }
        }

        let mut tx = self.db.begin().await?;

        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM purchase_order WHERE order_id = $1")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;
        match status.as_deref() {
            None => return Err(PharmacyError::NotFound(format!("Order {}", order_id))),
            Some("PENDING") => {}
            Some(_) => return Err(PharmacyError::OrderNotPending(order_id)),
        }

        let mut outcome = RevisionOutcome {
            order_id,
            added: false,
            updated: false,
            removed: false,
        };

        if let Some(line) = &req.add {
            sqlx::query(
                r#"
                INSERT INTO purchase_order_item (product_id, drug_id, qty_ordered, unit_cost)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(line.drug_id)
            .bind(line.qty_ordered)
            .bind(line.unit_cost)
            .execute(&mut *tx)
            .await?;
            outcome.added = true;
        }

        if let Some(change) = &req.update {
            let result = sqlx::query(
                r#"
                UPDATE purchase_order_item
                SET qty_ordered = $1
                WHERE product_id = $2 AND drug_id = $3
                "#,
            )
            .bind(change.qty_ordered)
            .bind(order_id)
            .bind(change.drug_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(PharmacyError::NotFound(format!(
                    "Drug {} on order {}",
                    change.drug_id, order_id
                )));
            }
            outcome.updated = true;
        }

        if let Some(drug_id) = req.remove {
            let result = sqlx::query(
                "DELETE FROM purchase_order_item WHERE product_id = $1 AND drug_id = $2",
            )
            .bind(order_id)
            .bind(drug_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(PharmacyError::NotFound(format!(
                    "Drug {} on order {}",
                    drug_id, order_id
                )));
            }
            outcome.removed = true;
        }

        tx.commit().await?;

        info!(
            order_id,
            added = outcome.added,
            updated = outcome.updated,
            removed = outcome.removed,
            "purchase order revised"
        );

        Ok(outcome)
    }

    /// Cancel a PENDING order
    ///
    /// The status guard lives inside the statement itself so there is no
    /// read-then-write window.
    pub async fn cancel_order(&self, order_id: i32) -> PharmacyResult<()> {
        let result = sqlx::query(
            "UPDATE purchase_order SET status = 'CANCELLED' WHERE order_id = $1 AND status = 'PENDING'",
        )
        .bind(order_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM purchase_order WHERE order_id = $1)",
            )
            .bind(order_id)
            .fetch_one(self.pool())
            .await?;
            return Err(if exists {
                PharmacyError::OrderNotPending(order_id)
            } else {
                PharmacyError::NotFound(format!("Order {}", order_id))
            });
        }

        info!(order_id, "purchase order cancelled");
        Ok(())
    }

    /// Order history listing, newest first, with an optional status filter
    pub async fn order_history(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> PharmacyResult<Vec<OrderSummary>> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT
                po.order_id,
                s.company_name AS supplier,
                po.order_date,
                po.expected_delivery_date,
                po.status
            FROM purchase_order po
            JOIN supplier s ON po.supplier_id = s.supplier_id
            WHERE ($1::text IS NULL OR po.status = $1)
            ORDER BY po.order_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        Ok(orders)
    }

    /// Total order count for the history listing's pagination metadata
    pub async fn order_count(&self, status: Option<&str>) -> PharmacyResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM purchase_order WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(self.pool())
        .await?;
        Ok(count)
    }

    /// Current line items of one order (the revision read path)
    ///
    /// Only PENDING orders are offered for revision, so the order's status is
    /// returned alongside the rows for the caller to gate on.
    pub async fn order_items(&self, order_id: i32) -> PharmacyResult<(String, Vec<OrderItemRow>)> {
        let status: String =
            sqlx::query_scalar("SELECT status FROM purchase_order WHERE order_id = $1")
                .bind(order_id)
                .fetch_optional(self.pool())
                .await?
                .ok_or_else(|| PharmacyError::NotFound(format!("Order {}", order_id)))?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT poi.drug_id, dc.drug_name, poi.qty_ordered, poi.unit_cost
            FROM purchase_order_item poi
            JOIN drug_catalogue dc ON poi.drug_id = dc.drug_id
            WHERE poi.product_id = $1
            ORDER BY poi.drug_id
            "#,
        )
        .bind(order_id)
        .fetch_all(self.pool())
        .await?;

        Ok((status, items))
    }
}
