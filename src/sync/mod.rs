//! Reconciliation of current assignments against the desired set.

pub mod engine;
pub mod report;

pub use engine::{plan, reconcile, SyncPlan};
pub use report::SyncReport;
