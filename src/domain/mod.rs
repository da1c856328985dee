//! Domain module
//!
//! Core domain types and the shared merge algorithm.

pub mod aggregate;
pub mod invoice;
pub mod order;
pub mod registration;

pub use aggregate::{merge_order_aggregates, AggregateKey, OrderAggregate, ProductLine};
pub use invoice::{Invoice, InvoiceItem, SalesContext};
pub use order::{OrderItem, OrderSubmission};
pub use registration::Registration;
