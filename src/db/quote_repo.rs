// src/db/quote_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{common::error::AppError, models::quote::Quote};

#[derive(Clone)]
pub struct QuoteRepository;

impl QuoteRepository {
    pub fn new() -> Self {
        Self
    }

    /// Lista completa, mais recentes primeiro (data de emissão).
    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Quote>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY date DESC, id DESC")
            .fetch_all(executor)
            .await?;

        Ok(quotes)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Quote>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = ?1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(quote)
    }

    pub async fn insert<'e, E>(&self, executor: E, quote: &Quote) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                id, original_quote_id, version, client_id, client_name, client_details,
                date, items, sub_total, discount, total_amount, payment_terms,
                installments, installment_amount, status, notes, salesperson, validity_days,
                installation_address, installation_date, installation_cost,
                installation_progress, installation_materials, installation_notes
            )
            VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17, ?18,
                ?19, ?20, ?21, ?22, ?23, ?24
            )
            RETURNING *
            "#,
        )
        .bind(&quote.id)
        .bind(quote.original_quote_id.as_deref())
        .bind(quote.version)
        .bind(&quote.client_id)
        .bind(&quote.client_name)
        .bind(&quote.client_details)
        .bind(&quote.date)
        .bind(&quote.items)
        .bind(quote.sub_total)
        .bind(quote.discount)
        .bind(quote.total_amount)
        .bind(&quote.payment_terms)
        .bind(quote.installments)
        .bind(quote.installment_amount)
        .bind(quote.status)
        .bind(quote.notes.as_deref())
        .bind(quote.salesperson.as_deref())
        .bind(quote.validity_days)
        .bind(quote.installation_address.as_deref())
        .bind(quote.installation_date.as_deref())
        .bind(quote.installation_cost)
        .bind(quote.installation_progress)
        .bind(quote.installation_materials.as_deref())
        .bind(quote.installation_notes.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::DuplicateQuoteId,
            other => AppError::DatabaseError(other),
        })?;

        Ok(inserted)
    }

    pub async fn update<'e, E>(&self, executor: E, quote: &Quote) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET
                original_quote_id = ?2, version = ?3, client_id = ?4, client_name = ?5,
                client_details = ?6, date = ?7, items = ?8, sub_total = ?9, discount = ?10,
                total_amount = ?11, payment_terms = ?12, installments = ?13,
                installment_amount = ?14, status = ?15, notes = ?16, salesperson = ?17,
                validity_days = ?18, installation_address = ?19, installation_date = ?20,
                installation_cost = ?21, installation_progress = ?22,
                installation_materials = ?23, installation_notes = ?24
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(&quote.id)
        .bind(quote.original_quote_id.as_deref())
        .bind(quote.version)
        .bind(&quote.client_id)
        .bind(&quote.client_name)
        .bind(&quote.client_details)
        .bind(&quote.date)
        .bind(&quote.items)
        .bind(quote.sub_total)
        .bind(quote.discount)
        .bind(quote.total_amount)
        .bind(&quote.payment_terms)
        .bind(quote.installments)
        .bind(quote.installment_amount)
        .bind(quote.status)
        .bind(quote.notes.as_deref())
        .bind(quote.salesperson.as_deref())
        .bind(quote.validity_days)
        .bind(quote.installation_address.as_deref())
        .bind(quote.installation_date.as_deref())
        .bind(quote.installation_cost)
        .bind(quote.installation_progress)
        .bind(quote.installation_materials.as_deref())
        .bind(quote.installation_notes.as_deref())
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::QuoteNotFound)?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::QuoteNotFound);
        }

        Ok(())
    }
}
