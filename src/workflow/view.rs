//! Aggregate view
//!
//! Detail view for one `(email, date)` key. Same merge as the index,
//! restricted to the key and retaining per-item rows.

use std::sync::Arc;

use crate::domain::{merge_order_aggregates, OrderAggregate};
use crate::store::DocumentStore;

use super::WorkflowError;

/// Per-key detail view; its output is also the finalization input.
pub struct AggregateView {
    store: Arc<dyn DocumentStore>,
}

impl AggregateView {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Re-derive the aggregate for one key.
    ///
    /// `NotFound` when no submission matches, even if a registration
    /// exists for the email. No side effects.
    pub async fn get_aggregate(
        &self,
        email: &str,
        date: &str,
    ) -> Result<OrderAggregate, WorkflowError> {
        let registrations = self.store.find_registrations(email).await?;
        let submissions = self.store.find_order_submissions(email, date).await?;

        merge_order_aggregates(&registrations, &submissions)
            .into_iter()
            .next()
            .ok_or_else(|| WorkflowError::NotFound {
                email: email.to_string(),
                date: date.to_string(),
            })
    }
}
