//! Order index
//!
//! The listing view: every `(email, date)` aggregate, flattened to one
//! tabular row each. Read-only and rebuilt on demand.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{merge_order_aggregates, OrderAggregate};
use crate::store::DocumentStore;

use super::WorkflowError;

/// One row of the order listing: an aggregate flattened for tabular
/// display, product names joined with `", "` and amounts combined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListing {
    pub email: String,
    pub date: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<String>,
    pub product_name: String,
    pub total_amount: Decimal,
    pub total_orders: u32,
}

impl From<&OrderAggregate> for OrderListing {
    fn from(aggregate: &OrderAggregate) -> Self {
        Self {
            email: aggregate.email.clone(),
            date: aggregate.date.clone(),
            name: aggregate.name.clone(),
            phone: aggregate.phone.clone(),
            user_type: aggregate.user_type.clone(),
            product_name: aggregate.product_summary(),
            total_amount: aggregate.total_amount,
            total_orders: aggregate.total_orders,
        }
    }
}

/// Listing view over all order aggregates.
pub struct OrderIndex {
    store: Arc<dyn DocumentStore>,
}

impl OrderIndex {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// One listing row per distinct `(email, date)`, in first-appearance
    /// order. Either collection failing to read fails the whole call;
    /// nothing partial is ever returned. No side effects.
    pub async fn list_aggregates(&self) -> Result<Vec<OrderListing>, WorkflowError> {
        let registrations = self.store.list_registrations().await?;
        let submissions = self.store.list_order_submissions().await?;

        let aggregates = merge_order_aggregates(&registrations, &submissions);
        Ok(aggregates.iter().map(OrderListing::from).collect())
    }
}
