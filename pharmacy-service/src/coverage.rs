//! Insurance coverage transactions
//!
//! Recording coverage uses a single guarded INSERT so the balance check and
//! the write are one atomic statement; two concurrent callers cannot both get
//! past the check the way a separate read-then-insert would allow.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{PharmacyError, PharmacyResult};
use crate::models::{CoverageEntry, CoverageOutcome, CoverageRequest, CoverageSummary};
use crate::service::PharmacyService;

impl PharmacyService {
    /// Record an insurance payment against a dispense
    pub async fn record_coverage(&self, req: CoverageRequest) -> PharmacyResult<CoverageOutcome> {
        if req.amount_covered <= Decimal::ZERO {
            return Err(PharmacyError::Validation(
                "Coverage amount must be greater than zero".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // Guarded insert: only succeeds while the remaining uncovered balance
        // can absorb the requested amount.
        let result = sqlx::query(
            r#"
            INSERT INTO pays (dispense_id, policy_id, amount_covered)
            SELECT d.dispense_id, $2, $3
            FROM dispense d
            WHERE d.dispense_id = $1
              AND d.total_amount
                  - COALESCE((SELECT SUM(p.amount_covered)
                              FROM pays p
                              WHERE p.dispense_id = d.dispense_id), 0) >= $3
            "#,
        )
        .bind(req.dispense_id)
        .bind(req.policy_id)
        .bind(req.amount_covered)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Either the dispense does not exist or the guard rejected the
            // amount; read back to tell the two apart.
            let total: Option<Decimal> =
                sqlx::query_scalar("SELECT total_amount FROM dispense WHERE dispense_id = $1")
                    .bind(req.dispense_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match total {
                None => PharmacyError::NotFound(format!("Dispense {}", req.dispense_id)),
                Some(total_amount) => {
                    let covered = already_covered(&mut tx, req.dispense_id).await?;
                    PharmacyError::OverCoverage {
                        requested: req.amount_covered,
                        remaining: total_amount - covered,
                    }
                }
            });
        }

        let total_amount: Decimal =
            sqlx::query_scalar("SELECT total_amount FROM dispense WHERE dispense_id = $1")
                .bind(req.dispense_id)
                .fetch_one(&mut *tx)
                .await?;
        let covered = already_covered(&mut tx, req.dispense_id).await?;
        let remaining_balance = total_amount - covered;

        tx.commit().await?;

        info!(
            dispense_id = req.dispense_id,
            policy_id = req.policy_id,
            %remaining_balance,
            "insurance coverage recorded"
        );

        Ok(CoverageOutcome {
            dispense_id: req.dispense_id,
            policy_id: req.policy_id,
            amount_covered: req.amount_covered,
            remaining_balance,
        })
    }

    /// Remove one previously recorded coverage row by its composite key
    pub async fn undo_coverage(&self, dispense_id: i32, policy_id: i32) -> PharmacyResult<()> {
        let mut tx = self.db.begin().await?;

        let result =
            sqlx::query("DELETE FROM pays WHERE dispense_id = $1 AND policy_id = $2")
                .bind(dispense_id)
                .bind(policy_id)
                .execute(&mut *tx)
                .await?;

        // Exactly one row must go away; anything else aborts before commit.
        match result.rows_affected() {
            0 => {
                return Err(PharmacyError::NotFound(format!(
                    "Coverage for dispense {} by policy {}",
                    dispense_id, policy_id
                )))
            }
            1 => {}
            actual => {
                return Err(PharmacyError::RowCountMismatch {
                    expected: 1,
                    actual,
                })
            }
        }

        tx.commit().await?;

        info!(dispense_id, policy_id, "insurance coverage removed");
        Ok(())
    }

    /// Coverage state of a dispense: totals plus every recorded payment
    pub async fn coverage_summary(&self, dispense_id: i32) -> PharmacyResult<CoverageSummary> {
        let total_amount: Decimal =
            sqlx::query_scalar("SELECT total_amount FROM dispense WHERE dispense_id = $1")
                .bind(dispense_id)
                .fetch_optional(self.pool())
                .await?
                .ok_or_else(|| PharmacyError::NotFound(format!("Dispense {}", dispense_id)))?;

        let entries = sqlx::query_as::<_, CoverageEntry>(
            r#"
            SELECT p.policy_id, i.company, p.amount_covered
            FROM pays p
            JOIN insurance i ON p.policy_id = i.policy_id
            WHERE p.dispense_id = $1
            ORDER BY p.policy_id
            "#,
        )
        .bind(dispense_id)
        .fetch_all(self.pool())
        .await?;

        let already_covered: Decimal = entries.iter().map(|e| e.amount_covered).sum();

        Ok(CoverageSummary {
            dispense_id,
            total_amount,
            already_covered,
            remaining_balance: total_amount - already_covered,
            entries,
        })
    }
}

async fn already_covered(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    dispense_id: i32,
) -> PharmacyResult<Decimal> {
    let covered: Decimal = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount_covered), 0) FROM pays WHERE dispense_id = $1",
    )
    .bind(dispense_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(covered)
}
