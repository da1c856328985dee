//! Raw order submissions
//!
//! One document per order event, exactly as the ordering flow recorded
//! it. The workflow only reads these and, on finalization, deletes them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One purchased line item inside a submission.
///
/// Precondition: `total_amount` is taken as stored and is never recomputed
/// from `price * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total_amount: Decimal,
}

/// One raw order event from the `DOrders` collection.
///
/// `date` is the calendar day exactly as submitted; aggregate keys compare
/// it by string equality, never as a parsed date. Several submissions may
/// share the same `(email, date)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Store-assigned document id, not part of the document body.
    #[serde(skip, default)]
    pub id: Uuid,
    pub email: String,
    pub date: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}
