// src/db/user_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

#[derive(Clone)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, name, password, role FROM users ORDER BY name ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, name, password, role FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    pub async fn find_by_username<'e, E>(
        &self,
        executor: E,
        username: &str,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, name, password, role FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    pub async fn count_by_role<'e, E>(&self, executor: E, role: UserRole) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = ?1")
            .bind(role)
            .fetch_one(executor)
            .await?;

        Ok(count.0)
    }

    pub async fn insert<'e, E>(&self, executor: E, user: &User) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, name, password, role)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, username, name, password, role
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.role)
        .fetch_one(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::UsernameAlreadyExists
            }
            other => AppError::DatabaseError(other),
        })?;

        Ok(inserted)
    }

    pub async fn update<'e, E>(&self, executor: E, user: &User) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET username = ?2, name = ?3, password = ?4, role = ?5
            WHERE id = ?1
            RETURNING id, username, name, password, role
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.role)
        .fetch_optional(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::UsernameAlreadyExists
            }
            other => AppError::DatabaseError(other),
        })?
        .ok_or(AppError::UserNotFound)?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }

        Ok(())
    }
}
