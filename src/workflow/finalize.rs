//! Finalization engine
//!
//! Converts one order aggregate into an invoice record and retires the
//! consumed order submissions. The insert and the deletes are separate
//! store calls with no shared transaction, so the engine's job is to make
//! the partial-failure window observable rather than hide it behind a
//! boolean.

use std::sync::Arc;

use futures_util::future::join_all;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Invoice, OrderAggregate, SalesContext};
use crate::store::{DocumentStore, StoreError};

/// One submission the engine failed to retire.
#[derive(Debug)]
pub struct DeleteFailure {
    pub submission_id: Uuid,
    pub source: StoreError,
}

/// Outcome of a fully successful finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReceipt {
    pub invoice_number: u32,
    /// How many source submissions were deleted. Zero when a concurrent
    /// finalization already emptied the key.
    pub retired_submissions: usize,
}

/// Finalization failures.
///
/// The variants distinguish "nothing happened" from "the invoice exists
/// but its source submissions were not fully retired"; callers must not
/// collapse the two, since retrying the latter would mint a second
/// invoice.
#[derive(Debug, Error)]
pub enum FinalizeError {
    /// The invoice insert failed. No document was created or deleted.
    #[error("invoice was not created: {0}")]
    InvoiceNotCreated(#[source] StoreError),

    /// The invoice exists but the submissions for the key could not be
    /// re-read, so no delete was attempted.
    #[error("invoice {invoice_number} created but source orders could not be re-read: {source}")]
    SubmissionsUnread {
        invoice_number: u32,
        #[source]
        source: StoreError,
    },

    /// The invoice exists and some deletes failed; the rest were still
    /// attempted. The store now holds already-invoiced submissions that
    /// need manual reconciliation.
    #[error("invoice {invoice_number} created but {} of {total} source orders not retired", .failed.len())]
    PartialRetirement {
        invoice_number: u32,
        total: usize,
        failed: Vec<DeleteFailure>,
    },
}

/// Turns aggregates into invoices.
///
/// Not idempotent: finalizing the same aggregate twice produces two
/// invoices with independently drawn numbers, and the second run's delete
/// pass finds nothing to remove. There is no lock against two concurrent
/// calls on the same key either; both insert their own invoice and race
/// on the deletes, which the store's delete contract absorbs. The engine
/// never retries internally.
pub struct FinalizationEngine {
    store: Arc<dyn DocumentStore>,
}

impl FinalizationEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Finalize one aggregate: draw an invoice number, insert the
    /// invoice, then delete every submission currently matching
    /// `(aggregate.email, date)`.
    ///
    /// The submission set is re-queried rather than taken from the
    /// aggregate, so submissions that arrived between viewing and
    /// finalizing are retired too. All deletes are issued concurrently
    /// and every one is awaited; a failed delete does not cancel the
    /// others.
    pub async fn finalize(
        &self,
        aggregate: &OrderAggregate,
        date: &str,
        sales: &SalesContext,
    ) -> Result<FinalizeReceipt, FinalizeError> {
        let invoice_number = Invoice::generate_number();
        let invoice = Invoice::from_aggregate(aggregate, invoice_number, sales);

        self.store
            .insert_invoice(&invoice)
            .await
            .map_err(FinalizeError::InvoiceNotCreated)?;

        tracing::info!(invoice_number, email = %aggregate.email, date, "invoice recorded");

        let submissions = self
            .store
            .find_order_submissions(&aggregate.email, date)
            .await
            .map_err(|source| FinalizeError::SubmissionsUnread {
                invoice_number,
                source,
            })?;

        let total = submissions.len();
        let deletes = submissions
            .iter()
            .map(|submission| self.store.delete_order_submission(submission.id));

        let failed: Vec<DeleteFailure> = join_all(deletes)
            .await
            .into_iter()
            .zip(&submissions)
            .filter_map(|(result, submission)| {
                result.err().map(|source| DeleteFailure {
                    submission_id: submission.id,
                    source,
                })
            })
            .collect();

        if !failed.is_empty() {
            tracing::error!(
                invoice_number,
                failed = failed.len(),
                total,
                "finalization left already-invoiced submissions behind"
            );
            return Err(FinalizeError::PartialRetirement {
                invoice_number,
                total,
                failed,
            });
        }

        tracing::info!(invoice_number, retired = total, "finalization complete");

        Ok(FinalizeReceipt {
            invoice_number,
            retired_submissions: total,
        })
    }
}
