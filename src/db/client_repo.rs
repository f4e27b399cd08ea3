// src/db/client_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{common::error::AppError, models::client::Client};

#[derive(Clone)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, address, contact, cnpj FROM clients ORDER BY name ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, address, contact, cnpj FROM clients WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    /// Busca por nome ignorando caixa (regra de deduplicação de clientes).
    pub async fn find_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, address, contact, cnpj FROM clients WHERE lower(name) = lower(?1)",
        )
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    pub async fn insert<'e, E>(&self, executor: E, client: &Client) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, address, contact, cnpj)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, address, contact, cnpj
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.contact)
        .bind(client.cnpj.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(inserted)
    }

    pub async fn update<'e, E>(&self, executor: E, client: &Client) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = ?2, address = ?3, contact = ?4, cnpj = ?5
            WHERE id = ?1
            RETURNING id, name, address, contact, cnpj
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.contact)
        .bind(client.cnpj.as_deref())
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ClientNotFound)?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ClientNotFound);
        }

        Ok(())
    }
}
