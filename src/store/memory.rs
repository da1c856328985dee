//! In-memory document store
//!
//! Backs the test suites so the workflow and the HTTP layer can be driven
//! without Postgres. Fault-injection switches cover the failure paths the
//! workflow must surface: unreadable collections, a failing invoice
//! insert, and deletes that fail for specific documents.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Invoice, OrderSubmission, Registration};

use super::{DocumentStore, StoreError};

#[derive(Debug, Default)]
struct Collections {
    registrations: Vec<Registration>,
    orders: Vec<OrderSubmission>,
    invoices: Vec<Invoice>,
    fail_registration_reads: bool,
    fail_order_reads: bool,
    fail_invoice_inserts: bool,
    failing_deletes: HashSet<Uuid>,
}

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().expect("store lock poisoned")
    }

    pub fn add_registration(&self, registration: Registration) {
        self.lock().registrations.push(registration);
    }

    /// Insert a submission under a fresh store-assigned id, returning it.
    pub fn add_order_submission(&self, mut submission: OrderSubmission) -> Uuid {
        let id = Uuid::new_v4();
        submission.id = id;
        self.lock().orders.push(submission);
        id
    }

    pub fn order_submission_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.lock().invoices.clone()
    }

    /// Make every `registrations` read fail until further notice.
    pub fn fail_registration_reads(&self) {
        self.lock().fail_registration_reads = true;
    }

    /// Make every `DOrders` read fail until further notice.
    pub fn fail_order_reads(&self) {
        self.lock().fail_order_reads = true;
    }

    /// Make every invoice insert fail until further notice.
    pub fn fail_invoice_inserts(&self) {
        self.lock().fail_invoice_inserts = true;
    }

    /// Make deletes of one specific document fail.
    pub fn fail_delete_of(&self, id: Uuid) {
        self.lock().failing_deletes.insert(id);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_registrations(&self) -> Result<Vec<Registration>, StoreError> {
        let inner = self.lock();
        if inner.fail_registration_reads {
            return Err(StoreError::Unavailable("registrations read failed".into()));
        }
        Ok(inner.registrations.clone())
    }

    async fn find_registrations(&self, email: &str) -> Result<Vec<Registration>, StoreError> {
        let inner = self.lock();
        if inner.fail_registration_reads {
            return Err(StoreError::Unavailable("registrations read failed".into()));
        }
        Ok(inner
            .registrations
            .iter()
            .filter(|r| r.email == email)
            .cloned()
            .collect())
    }

    async fn list_order_submissions(&self) -> Result<Vec<OrderSubmission>, StoreError> {
        let inner = self.lock();
        if inner.fail_order_reads {
            return Err(StoreError::Unavailable("DOrders read failed".into()));
        }
        Ok(inner.orders.clone())
    }

    async fn find_order_submissions(
        &self,
        email: &str,
        date: &str,
    ) -> Result<Vec<OrderSubmission>, StoreError> {
        let inner = self.lock();
        if inner.fail_order_reads {
            return Err(StoreError::Unavailable("DOrders read failed".into()));
        }
        Ok(inner
            .orders
            .iter()
            .filter(|o| o.email == email && o.date == date)
            .cloned()
            .collect())
    }

    async fn delete_order_submission(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.failing_deletes.contains(&id) {
            return Err(StoreError::Unavailable(format!("delete of {id} failed")));
        }
        // An absent id is a no-op, matching the delete contract.
        inner.orders.retain(|o| o.id != id);
        Ok(())
    }

    async fn insert_invoice(&self, invoice: &Invoice) -> Result<Uuid, StoreError> {
        let mut inner = self.lock();
        if inner.fail_invoice_inserts {
            return Err(StoreError::Unavailable("invoice insert failed".into()));
        }
        inner.invoices.push(invoice.clone());
        Ok(Uuid::new_v4())
    }

    async fn find_invoice(&self, invoice_number: u32) -> Result<Option<Invoice>, StoreError> {
        Ok(self
            .lock()
            .invoices
            .iter()
            .find(|i| i.invoice_number == invoice_number)
            .cloned())
    }
}
