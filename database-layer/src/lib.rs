//! Database layer for the PharmaOps engine
//!
//! Provides the shared PostgreSQL connection pool and transaction scoping used
//! by the pharmacy service. The schema itself (tables, triggers, constraints)
//! is owned by the database and is not defined or migrated here; this crate
//! only hands out pooled connections and transaction guards against it.

pub mod connection;
pub mod error;

pub use connection::DatabasePool;
pub use error::{DatabaseError, DatabaseResult};
