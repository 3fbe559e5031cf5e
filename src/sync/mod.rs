//! Reconciliation of local templates against the CMP catalog.

pub mod reconciler;

pub use reconciler::{index_by_name, CatalogReconciler, SyncReport};
