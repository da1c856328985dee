//! Document store access
//!
//! The workflow consumes a remote document store through three primitives:
//! list documents matching a filter, insert a document, and delete a
//! document by id. [`DocumentStore`] types those primitives per
//! collection. Workflow components take the store as an injected
//! dependency and hold no collection state of their own.

mod error;
mod memory;
mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Invoice, OrderSubmission, Registration};

/// Collection-scoped access to the document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `registrations`.
    async fn list_registrations(&self) -> Result<Vec<Registration>, StoreError>;

    /// `registrations` filtered by email.
    async fn find_registrations(&self, email: &str) -> Result<Vec<Registration>, StoreError>;

    /// All documents in `DOrders`.
    async fn list_order_submissions(&self) -> Result<Vec<OrderSubmission>, StoreError>;

    /// `DOrders` filtered by email and date (string equality on both).
    async fn find_order_submissions(
        &self,
        email: &str,
        date: &str,
    ) -> Result<Vec<OrderSubmission>, StoreError>;

    /// Delete one `DOrders` document. Deleting an id that no longer
    /// exists is success, not an error: concurrent finalizations race on
    /// the same documents and the loser's deletes land on nothing.
    async fn delete_order_submission(&self, id: Uuid) -> Result<(), StoreError>;

    /// Insert into `invoice`, returning the store-assigned document id.
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<Uuid, StoreError>;

    /// Look up an invoice by its number (numeric equality filter).
    async fn find_invoice(&self, invoice_number: u32) -> Result<Option<Invoice>, StoreError>;
}
