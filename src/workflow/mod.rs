//! Order reconciliation and invoice-finalization workflow
//!
//! Three components composed as a short pipeline: [`OrderIndex`] lists one
//! aggregate per customer per date, [`AggregateView`] re-derives a single
//! aggregate with line-item detail, and [`FinalizationEngine`] converts
//! that aggregate into an immutable invoice while retiring its source
//! submissions. The index and the view share the merge algorithm in
//! `domain::aggregate` at different granularities.

mod finalize;
mod index;
mod view;

pub use finalize::{DeleteFailure, FinalizationEngine, FinalizeError, FinalizeReceipt};
pub use index::{OrderIndex, OrderListing};
pub use view::AggregateView;

use thiserror::Error;

use crate::store::StoreError;

/// Read-side workflow failures.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// An underlying collection could not be read. Partial data is
    /// treated as total failure: an aggregate without verified order data
    /// is misleading.
    #[error("order data unavailable: {0}")]
    DataUnavailable(#[from] StoreError),

    /// No order submission matches the requested key. A normal outcome,
    /// not an error worth logging: a customer with no orders on a date is
    /// not an aggregate.
    #[error("no orders for {email} on {date}")]
    NotFound { email: String, date: String },
}
