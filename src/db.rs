//! Database module
//!
//! Schema bootstrap for the three collection tables. Documents keep their
//! wire shape in a JSONB column; the expression indexes back the filters
//! the store runs.

use sqlx::PgPool;

/// Create the collection tables and their indexes if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS registrations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doc JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS dorders (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doc JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS invoice (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doc JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS registrations_email_idx
            ON registrations ((doc->>'email'))
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS dorders_email_date_idx
            ON dorders ((doc->>'email'), (doc->>'date'))
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS invoice_number_idx
            ON invoice (((doc->>'invoiceNumber')::bigint))
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Collection tables ready");
    Ok(())
}
