//! Order aggregation
//!
//! One aggregate per `(email, date)`: every submission for that key folded
//! together and joined with the customer's registration. The same fold
//! backs the order index (flattened rows) and the detail view (per-item
//! rows); only the presentation differs.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::order::OrderSubmission;
use super::registration::Registration;

/// The `(email, date)` pair identifying one logical customer order for
/// one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateKey {
    pub email: String,
    pub date: String,
}

/// One product row in an aggregate. Carries the submission date so the
/// detail view can show it per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total_amount: Decimal,
    pub date: String,
}

/// Merged per-customer-per-date order. Derived and request-scoped; never
/// persisted.
///
/// Customer fields are `None` when no registration matches the email; the
/// aggregate still exists in that case.
///
/// # Invariants
/// - `total_amount` is the sum of every contributing item's `total_amount`
/// - `products` preserves the concatenation order of the contributing
///   submissions' items
/// - `total_orders` counts contributing submissions, not line items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    pub email: String,
    pub date: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_type: Option<String>,
    pub products: Vec<ProductLine>,
    pub total_amount: Decimal,
    pub total_orders: u32,
}

impl OrderAggregate {
    /// Seed a new aggregate from the first submission for its key. This is
    /// the only point where the registration is consulted; later
    /// submissions for the key never re-query it.
    fn seed(submission: &OrderSubmission, registration: Option<&Registration>) -> Self {
        let mut aggregate = Self {
            email: submission.email.clone(),
            date: submission.date.clone(),
            name: registration.map(|r| r.name.clone()),
            phone: registration.map(|r| r.phone.clone()),
            address: registration.map(Registration::postal_address),
            user_type: registration.map(|r| r.user_type.clone()),
            products: Vec::new(),
            total_amount: Decimal::ZERO,
            total_orders: 0,
        };
        aggregate.absorb(submission);
        aggregate
    }

    /// Fold one more submission into this aggregate. A submission with no
    /// items contributes nothing to `products` or the total but still
    /// counts as an order.
    fn absorb(&mut self, submission: &OrderSubmission) {
        for item in &submission.items {
            self.total_amount += item.total_amount;
            self.products.push(ProductLine {
                product_name: item.product_name.clone(),
                price: item.price,
                quantity: item.quantity,
                total_amount: item.total_amount,
                date: submission.date.clone(),
            });
        }
        self.total_orders += 1;
    }

    /// All product names joined with `", "` for tabular display.
    pub fn product_summary(&self) -> String {
        self.products
            .iter()
            .map(|p| p.product_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Fold submissions into aggregates keyed by `(email, date)`.
///
/// Registrations are indexed by email first (last write wins on duplicate
/// emails). The first submission for a key seeds its aggregate and
/// performs the one registration lookup; every later submission for the
/// key appends its items and amount and bumps the order count. Result
/// order is first-appearance order of each key; no sort is imposed.
pub fn merge_order_aggregates(
    registrations: &[Registration],
    submissions: &[OrderSubmission],
) -> Vec<OrderAggregate> {
    let by_email: HashMap<&str, &Registration> = registrations
        .iter()
        .map(|r| (r.email.as_str(), r))
        .collect();

    let mut aggregates: Vec<OrderAggregate> = Vec::new();
    let mut positions: HashMap<AggregateKey, usize> = HashMap::new();

    for submission in submissions {
        let key = AggregateKey {
            email: submission.email.clone(),
            date: submission.date.clone(),
        };

        match positions.get(&key) {
            Some(&at) => aggregates[at].absorb(submission),
            None => {
                let registration = by_email.get(submission.email.as_str()).copied();
                positions.insert(key, aggregates.len());
                aggregates.push(OrderAggregate::seed(submission, registration));
            }
        }
    }

    aggregates
}
