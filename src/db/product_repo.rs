// src/db/product_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{common::error::AppError, models::product::Product};

#[derive(Clone)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, unit_price, cost_price FROM products ORDER BY name ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, unit_price, cost_price FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    /// Busca por nome ignorando caixa (regra de upsert da importação).
    pub async fn find_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, unit_price, cost_price
            FROM products
            WHERE lower(name) = lower(?1)
            "#,
        )
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    pub async fn insert<'e, E>(&self, executor: E, product: &Product) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, description, unit_price, cost_price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, description, unit_price, cost_price
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(product.cost_price)
        .fetch_one(executor)
        .await?;

        Ok(inserted)
    }

    pub async fn update<'e, E>(&self, executor: E, product: &Product) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?2, description = ?3, unit_price = ?4, cost_price = ?5
            WHERE id = ?1
            RETURNING id, name, description, unit_price, cost_price
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(product.cost_price)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ProductNotFound)?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }

        Ok(())
    }
}
