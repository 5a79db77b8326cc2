//! Read-only dashboard queries: live counters and the inventory overview

use crate::error::PharmacyResult;
use crate::models::{DashboardMetrics, InventoryFilter, InventoryRow};
use crate::service::PharmacyService;

/// Lots below this quantity count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 100;

/// Expiry horizon for the "expiring soon" counter.
pub const EXPIRY_WINDOW_DAYS: i32 = 90;

impl PharmacyService {
    /// Live counters for the operations dashboard
    pub async fn dashboard_metrics(&self) -> PharmacyResult<DashboardMetrics> {
        let total_patients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patient")
            .fetch_one(self.pool())
            .await?;

        let low_stock_lots: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_lot WHERE qty_on_hand < $1")
                .bind(LOW_STOCK_THRESHOLD)
                .fetch_one(self.pool())
                .await?;

        let pending_orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_order WHERE status = 'PENDING'")
                .fetch_one(self.pool())
                .await?;

        let expired_lots: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_lot WHERE expiry_date < CURRENT_DATE")
                .fetch_one(self.pool())
                .await?;

        let expiring_within_90_days: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM inventory_lot
            WHERE expiry_date BETWEEN CURRENT_DATE AND (CURRENT_DATE + $1)
            "#,
        )
        .bind(EXPIRY_WINDOW_DAYS)
        .fetch_one(self.pool())
        .await?;

        Ok(DashboardMetrics {
            total_patients,
            low_stock_lots,
            pending_orders,
            expired_lots,
            expiring_within_90_days,
        })
    }

    /// Inventory overview, most critical lots first
    pub async fn inventory_overview(
        &self,
        filter: &InventoryFilter,
    ) -> PharmacyResult<Vec<InventoryRow>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT d.drug_name, i.qty_on_hand, i.expiry_date
            FROM inventory_lot i
            JOIN drug_catalogue d ON i.drug_id = d.drug_id
            WHERE ($1::text IS NULL OR d.drug_name ILIKE '%' || $1 || '%')
              AND ($2::bool = false OR i.qty_on_hand < $3)
            ORDER BY i.qty_on_hand ASC, i.expiry_date ASC
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.low_stock_only)
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }
}
