use database_layer::DatabasePool;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;

use crate::reference::ReferenceCache;

/// Pharmacist commission as a fraction of the dispense total.
pub fn commission_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Dispense total and commission for a lot's unit cost and a dispensed quantity.
///
/// Both values are rounded to two decimal places to match the NUMERIC money
/// columns they are written to.
pub fn dispense_totals(unit_cost: Decimal, qty_dispensed: i32) -> (Decimal, Decimal) {
    let total = (unit_cost * Decimal::from(qty_dispensed))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let commission = (total * commission_rate())
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    (total, commission)
}

/// Pharmacy operations service
///
/// Holds the shared connection pool and the reference-data cache. All
/// transactional operations live in the sibling modules as `impl` blocks on
/// this type.
#[derive(Clone)]
pub struct PharmacyService {
    pub(crate) db: DatabasePool,
    pub(crate) reference: ReferenceCache,
}

impl PharmacyService {
    /// Create a new pharmacy service over a connection pool
    pub fn new(db: DatabasePool) -> Self {
        Self {
            db,
            reference: ReferenceCache::with_default_ttl(),
        }
    }

    /// Get the underlying PgPool for read-only queries
    pub(crate) fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn totals_for_the_reference_scenario() {
        // Dispense 5101: qty 2 against lot 3001 at unit cost 6.00.
        let (total, commission) = dispense_totals(dec("6.00"), 2);
        assert_eq!(total, dec("12.00"));
        assert_eq!(commission, dec("0.60"));
    }

    #[test]
    fn commission_rounds_to_two_decimals() {
        let (total, commission) = dispense_totals(dec("1.90"), 3);
        assert_eq!(total, dec("5.70"));
        // 5% of 5.70 is 0.285, rounded half-up to 0.29.
        assert_eq!(commission, dec("0.29"));
    }

    #[test]
    fn zero_quantity_produces_zero_totals() {
        let (total, commission) = dispense_totals(dec("6.00"), 0);
        assert_eq!(total, dec("0.00"));
        assert_eq!(commission, dec("0.00"));
    }

    #[test]
    fn totals_scale_linearly_with_quantity() {
        let (one, _) = dispense_totals(dec("2.50"), 1);
        let (four, _) = dispense_totals(dec("2.50"), 4);
        assert_eq!(four, one * Decimal::from(4));
    }
}
