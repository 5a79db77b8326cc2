pub mod coverage;
pub mod dashboard;
pub mod dispense;
pub mod health;
pub mod orders;
pub mod reference;
