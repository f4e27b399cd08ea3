// src/db/settings_repo.rs

use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::settings::{AppSettings, CompanyInfo, ImportantLink, UserPoints},
};

#[derive(Clone)]
pub struct SettingsRepository;

impl SettingsRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  PREFERÊNCIAS (registro único)
    // =========================================================================

    pub async fn get_settings<'e, E>(&self, executor: E) -> Result<AppSettings, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let settings = sqlx::query_as::<_, AppSettings>(
            r#"
            SELECT default_salesperson, default_validity_days, payment_term_suggestions
            FROM app_settings WHERE id = 1
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(settings)
    }

    pub async fn update_settings<'e, E>(
        &self,
        executor: E,
        settings: &AppSettings,
    ) -> Result<AppSettings, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, AppSettings>(
            r#"
            UPDATE app_settings
            SET default_salesperson = ?1, default_validity_days = ?2, payment_term_suggestions = ?3
            WHERE id = 1
            RETURNING default_salesperson, default_validity_days, payment_term_suggestions
            "#,
        )
        .bind(&settings.default_salesperson)
        .bind(settings.default_validity_days)
        .bind(&settings.payment_term_suggestions)
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    // =========================================================================
    //  DADOS DA EMPRESA (registro único)
    // =========================================================================

    pub async fn get_company_info<'e, E>(&self, executor: E) -> Result<CompanyInfo, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let info = sqlx::query_as::<_, CompanyInfo>(
            r#"
            SELECT name, address, phone, email, website, cnpj, logo_url
            FROM company_info WHERE id = 1
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(info)
    }

    pub async fn update_company_info<'e, E>(
        &self,
        executor: E,
        info: &CompanyInfo,
    ) -> Result<CompanyInfo, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, CompanyInfo>(
            r#"
            UPDATE company_info
            SET name = ?1, address = ?2, phone = ?3, email = ?4,
                website = ?5, cnpj = ?6, logo_url = ?7
            WHERE id = 1
            RETURNING name, address, phone, email, website, cnpj, logo_url
            "#,
        )
        .bind(&info.name)
        .bind(&info.address)
        .bind(&info.phone)
        .bind(&info.email)
        .bind(info.website.as_deref())
        .bind(info.cnpj.as_deref())
        .bind(info.logo_url.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    // =========================================================================
    //  LINKS IMPORTANTES
    // =========================================================================

    pub async fn get_all_links<'e, E>(&self, executor: E) -> Result<Vec<ImportantLink>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let links = sqlx::query_as::<_, ImportantLink>(
            "SELECT id, name, url, description FROM important_links ORDER BY name ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(links)
    }

    pub async fn insert_link<'e, E>(
        &self,
        executor: E,
        link: &ImportantLink,
    ) -> Result<ImportantLink, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, ImportantLink>(
            r#"
            INSERT INTO important_links (id, name, url, description)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, url, description
            "#,
        )
        .bind(&link.id)
        .bind(&link.name)
        .bind(&link.url)
        .bind(link.description.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(inserted)
    }

    pub async fn update_link<'e, E>(
        &self,
        executor: E,
        link: &ImportantLink,
    ) -> Result<ImportantLink, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, ImportantLink>(
            r#"
            UPDATE important_links SET name = ?2, url = ?3, description = ?4
            WHERE id = ?1
            RETURNING id, name, url, description
            "#,
        )
        .bind(&link.id)
        .bind(&link.name)
        .bind(&link.url)
        .bind(link.description.as_deref())
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RecordNotFound)?;

        Ok(updated)
    }

    pub async fn delete_link<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM important_links WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }

        Ok(())
    }

    // =========================================================================
    //  PONTUAÇÃO (registro único)
    // =========================================================================

    pub async fn get_points<'e, E>(&self, executor: E) -> Result<UserPoints, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let points =
            sqlx::query_as::<_, UserPoints>("SELECT points FROM user_points WHERE id = 1")
                .fetch_one(executor)
                .await?;

        Ok(points)
    }

    pub async fn add_points<'e, E>(&self, executor: E, amount: i64) -> Result<UserPoints, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let points = sqlx::query_as::<_, UserPoints>(
            "UPDATE user_points SET points = points + ?1 WHERE id = 1 RETURNING points",
        )
        .bind(amount)
        .fetch_one(executor)
        .await?;

        Ok(points)
    }
}
