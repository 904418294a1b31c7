//! Table definitions for donations and their items
//!
//! `donations` must exist before `donation_items` can reference it, so the
//! statements run in order.

use sqlx::PgPool;

const CREATE_DONATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS donations (
        id SERIAL PRIMARY KEY,
        nome TEXT,
        endereco TEXT,
        numero TEXT,
        complemento TEXT,
        bairro TEXT,
        cidade TEXT,
        estado TEXT,
        cep TEXT,
        obs TEXT,
        created_at TIMESTAMP DEFAULT NOW()
    )
"#;

const CREATE_DONATION_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS donation_items (
        id SERIAL PRIMARY KEY,
        donation_id INT REFERENCES donations(id) ON DELETE CASCADE,
        nome_item TEXT NOT NULL,
        quantidade NUMERIC NOT NULL,
        unidade TEXT NOT NULL
    )
"#;

const CREATE_ITEMS_DONATION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_donation_items_donation ON donation_items(donation_id)";

/// Create both tables if they are missing.
///
/// Safe to call on every start.
pub async fn create_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring donation tables exist...");

    sqlx::query(CREATE_DONATIONS).execute(pool).await?;
    sqlx::query(CREATE_DONATION_ITEMS).execute(pool).await?;
    sqlx::query(CREATE_ITEMS_DONATION_INDEX).execute(pool).await?;

    tracing::info!("Donation tables ready");
    Ok(())
}
