// src/db/finance_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{common::error::AppError, models::finance::ManualTransaction};

#[derive(Clone)]
pub struct FinanceRepository;

impl FinanceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_all_transactions<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<ManualTransaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transactions = sqlx::query_as::<_, ManualTransaction>(
            "SELECT id, kind, description, amount, date, category, notes FROM manual_transactions ORDER BY date DESC, id DESC",
        )
        .fetch_all(executor)
        .await?;

        Ok(transactions)
    }

    pub async fn insert_transaction<'e, E>(
        &self,
        executor: E,
        transaction: &ManualTransaction,
    ) -> Result<ManualTransaction, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, ManualTransaction>(
            r#"
            INSERT INTO manual_transactions (id, kind, description, amount, date, category, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, kind, description, amount, date, category, notes
            "#,
        )
        .bind(&transaction.id)
        .bind(transaction.kind)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(&transaction.date)
        .bind(transaction.category.as_deref())
        .bind(transaction.notes.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(inserted)
    }

    pub async fn update_transaction<'e, E>(
        &self,
        executor: E,
        transaction: &ManualTransaction,
    ) -> Result<ManualTransaction, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, ManualTransaction>(
            r#"
            UPDATE manual_transactions
            SET kind = ?2, description = ?3, amount = ?4, date = ?5, category = ?6, notes = ?7
            WHERE id = ?1
            RETURNING id, kind, description, amount, date, category, notes
            "#,
        )
        .bind(&transaction.id)
        .bind(transaction.kind)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(&transaction.date)
        .bind(transaction.category.as_deref())
        .bind(transaction.notes.as_deref())
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RecordNotFound)?;

        Ok(updated)
    }

    pub async fn delete_transaction<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM manual_transactions WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }
}
