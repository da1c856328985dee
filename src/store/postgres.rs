//! Postgres-backed document store
//!
//! Each collection is a `(id UUID, doc JSONB, created_at)` table, so
//! documents keep their wire shape end to end. Filters index into the
//! JSONB with `doc ->> field`; see `db::ensure_schema` for the expression
//! indexes backing them.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Invoice, OrderSubmission, Registration};

use super::{DocumentStore, StoreError};

/// Document store over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn submission_from_row(
        (id, doc): (Uuid, serde_json::Value),
    ) -> Result<OrderSubmission, StoreError> {
        let mut submission: OrderSubmission = serde_json::from_value(doc)?;
        submission.id = id;
        Ok(submission)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_registrations(&self) -> Result<Vec<Registration>, StoreError> {
        let rows: Vec<(serde_json::Value,)> =
            sqlx::query_as("SELECT doc FROM registrations ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(doc,)| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    async fn find_registrations(&self, email: &str) -> Result<Vec<Registration>, StoreError> {
        let rows: Vec<(serde_json::Value,)> = sqlx::query_as(
            "SELECT doc FROM registrations WHERE doc->>'email' = $1 ORDER BY created_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(doc,)| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    async fn list_order_submissions(&self) -> Result<Vec<OrderSubmission>, StoreError> {
        let rows: Vec<(Uuid, serde_json::Value)> =
            sqlx::query_as("SELECT id, doc FROM dorders ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Self::submission_from_row).collect()
    }

    async fn find_order_submissions(
        &self,
        email: &str,
        date: &str,
    ) -> Result<Vec<OrderSubmission>, StoreError> {
        let rows: Vec<(Uuid, serde_json::Value)> = sqlx::query_as(
            r#"
            SELECT id, doc FROM dorders
            WHERE doc->>'email' = $1 AND doc->>'date' = $2
            ORDER BY created_at
            "#,
        )
        .bind(email)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::submission_from_row).collect()
    }

    async fn delete_order_submission(&self, id: Uuid) -> Result<(), StoreError> {
        // Zero rows affected means another caller already deleted the
        // document, which is fine.
        sqlx::query("DELETE FROM dorders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_invoice(&self, invoice: &Invoice) -> Result<Uuid, StoreError> {
        let doc = serde_json::to_value(invoice)?;

        let id: Uuid = sqlx::query_scalar("INSERT INTO invoice (doc) VALUES ($1) RETURNING id")
            .bind(&doc)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find_invoice(&self, invoice_number: u32) -> Result<Option<Invoice>, StoreError> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            "SELECT doc FROM invoice WHERE (doc->>'invoiceNumber')::bigint = $1 LIMIT 1",
        )
        .bind(i64::from(invoice_number))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(doc,)| serde_json::from_value(doc).map_err(StoreError::from))
            .transpose()
    }
}
