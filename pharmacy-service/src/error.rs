use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PharmacyError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Order {0} is not in PENDING status")]
    OrderNotPending(i32),

    #[error("Coverage amount {requested} exceeds remaining balance {remaining}")]
    OverCoverage { requested: Decimal, remaining: Decimal },

    #[error("Expected {expected} affected row(s), found {actual}")]
    RowCountMismatch { expected: u64, actual: u64 },

    #[error("Database error: {0}")]
    Pool(#[from] database_layer::DatabaseError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type PharmacyResult<T> = Result<T, PharmacyError>;
