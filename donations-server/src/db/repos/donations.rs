//! Donation repository
//!
//! Plain inserts against the shared pool, plus a transactional variant
//! that writes the donation and its items on one connection.

use sqlx::PgPool;

use crate::models::{DonorFields, NewDonation, NewDonationItem};

const INSERT_DONATION: &str = r#"
    INSERT INTO donations
        (nome, endereco, numero, complemento, bairro, cidade, estado, cep, obs)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING id
"#;

const INSERT_ITEM: &str = r#"
    INSERT INTO donation_items (donation_id, nome_item, quantidade, unidade)
    VALUES ($1, $2, $3::numeric, $4)
"#;

/// Donation repository
pub struct DonationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DonationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert the donation row and return its serial id.
    pub async fn insert_donation(&self, donor: &DonorFields) -> Result<i32, sqlx::Error> {
        bind_donor(sqlx::query_scalar(INSERT_DONATION), donor)
            .fetch_one(self.pool)
            .await
    }

    /// Insert one item for an existing donation.
    pub async fn insert_item(
        &self,
        donation_id: i32,
        item: &NewDonationItem,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_ITEM)
            .bind(donation_id)
            .bind(&item.nome_item)
            .bind(item.quantidade.as_str())
            .bind(&item.unidade)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Insert the donation and all items in one transaction.
    ///
    /// Items go in sequentially on the transaction's connection; any failure
    /// rolls back the donation row too.
    pub async fn insert_with_items(&self, donation: &NewDonation) -> Result<i32, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let donation_id: i32 = bind_donor(sqlx::query_scalar(INSERT_DONATION), &donation.donor)
            .fetch_one(&mut *tx)
            .await?;

        for item in &donation.items {
            sqlx::query(INSERT_ITEM)
                .bind(donation_id)
                .bind(&item.nome_item)
                .bind(item.quantidade.as_str())
                .bind(&item.unidade)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(donation_id)
    }
}

fn bind_donor<'q, O>(
    query: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    donor: &'q DonorFields,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    query
        .bind(&donor.nome)
        .bind(&donor.endereco)
        .bind(&donor.numero)
        .bind(&donor.complemento)
        .bind(&donor.bairro)
        .bind(&donor.cidade)
        .bind(&donor.estado)
        .bind(&donor.cep)
        .bind(&donor.obs)
}
