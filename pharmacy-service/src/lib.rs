//! Pharmacy operations service
//!
//! Exposes the transactional operations of the pharmacy platform as discrete,
//! typed calls against an externally owned PostgreSQL schema:
//! - Dispense a prescription (four inserts, stock deducted by a database trigger)
//! - Reverse a dispense (restore stock, delete child-before-parent)
//! - Create, revise and cancel purchase orders
//! - Record and undo insurance coverage with an atomic balance guard
//!
//! Read paths cover the operations dashboard, order history and the
//! reference-data lists used to populate selection UIs.
//!
//! Every multi-statement operation runs on a single transaction checked out of
//! the shared [`database_layer::DatabasePool`]; an error on any statement rolls
//! the whole operation back when the transaction guard drops.

pub mod coverage;
pub mod dashboard;
pub mod dispense;
pub mod error;
pub mod models;
pub mod orders;
pub mod reference;
pub mod service;

pub use error::{PharmacyError, PharmacyResult};
pub use models::*;
pub use reference::{ReferenceCache, ReferenceData};
pub use service::PharmacyService;
