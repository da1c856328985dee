//! Invoices
//!
//! The immutable record a finalized aggregate becomes. Created exactly
//! once per successful finalization and never mutated afterwards; looked
//! up later by invoice number for display.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::OrderAggregate;

/// Fixed factory/sales metadata stamped onto every invoice. Supplied by
/// configuration, never derived from order data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesContext {
    pub sales_person: String,
    pub factory_details: String,
    pub factory_phone_number: String,
}

/// One billed line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Product name.
    pub item: String,
    pub quantity: u32,
    /// The line's total, copied from the aggregate product's
    /// `totalAmount`.
    pub cost: Decimal,
    /// Unit price.
    pub price: Decimal,
}

/// A document from the `invoice` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Six-digit number in `[100000, 999999]`, randomly drawn. Not checked
    /// for uniqueness against existing invoices; collisions are a known
    /// open risk.
    pub invoice_number: u32,
    pub date_issued: String,
    pub invoice_to: String,
    pub customer_email: String,
    pub customer_address: String,
    pub sales_person: String,
    pub factory_details: String,
    pub factory_phone_number: String,
    pub total: Decimal,
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    /// Draw a random invoice number in the six-digit range.
    pub fn generate_number() -> u32 {
        rand::thread_rng().gen_range(100_000..=999_999)
    }

    /// Build an invoice from an aggregate's products, one item per product
    /// row. Customer fields fall back to empty strings when the aggregate
    /// has no matching registration. `dateIssued` is the UTC calendar day
    /// this runs, not the order date.
    pub fn from_aggregate(
        aggregate: &OrderAggregate,
        invoice_number: u32,
        sales: &SalesContext,
    ) -> Self {
        let items = aggregate
            .products
            .iter()
            .map(|product| InvoiceItem {
                item: product.product_name.clone(),
                quantity: product.quantity,
                cost: product.total_amount,
                price: product.price,
            })
            .collect();

        Self {
            invoice_number,
            date_issued: Utc::now().date_naive().to_string(),
            invoice_to: aggregate.name.clone().unwrap_or_default(),
            customer_email: aggregate.email.clone(),
            customer_address: aggregate.address.clone().unwrap_or_default(),
            sales_person: sales.sales_person.clone(),
            factory_details: sales.factory_details.clone(),
            factory_phone_number: sales.factory_phone_number.clone(),
            total: aggregate.total_amount,
            items,
        }
    }
}
