// src/services/settings_service.rs

use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::settings::{AppSettings, CompanyInfo, ImportantLink, UserPoints},
};

#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    pub async fn get_settings(&self, pool: &SqlitePool) -> Result<AppSettings, AppError> {
        self.repo.get_settings(pool).await
    }

    pub async fn update_settings(
        &self,
        pool: &SqlitePool,
        default_salesperson: String,
        default_validity_days: i64,
        payment_term_suggestions: Vec<String>,
    ) -> Result<AppSettings, AppError> {
        let settings = AppSettings {
            default_salesperson,
            default_validity_days,
            payment_term_suggestions: Json(payment_term_suggestions),
        };
        self.repo.update_settings(pool, &settings).await
    }

    pub async fn get_company_info(&self, pool: &SqlitePool) -> Result<CompanyInfo, AppError> {
        self.repo.get_company_info(pool).await
    }

    pub async fn update_company_info(
        &self,
        pool: &SqlitePool,
        info: CompanyInfo,
    ) -> Result<CompanyInfo, AppError> {
        self.repo.update_company_info(pool, &info).await
    }

    pub async fn list_links(&self, pool: &SqlitePool) -> Result<Vec<ImportantLink>, AppError> {
        self.repo.get_all_links(pool).await
    }

    pub async fn create_link(
        &self,
        pool: &SqlitePool,
        name: String,
        url: String,
        description: Option<String>,
    ) -> Result<ImportantLink, AppError> {
        let link =
            ImportantLink { id: format!("link-{}", Uuid::new_v4()), name, url, description };
        self.repo.insert_link(pool, &link).await
    }

    pub async fn update_link(
        &self,
        pool: &SqlitePool,
        id: &str,
        name: String,
        url: String,
        description: Option<String>,
    ) -> Result<ImportantLink, AppError> {
        let link = ImportantLink { id: id.to_string(), name, url, description };
        self.repo.update_link(pool, &link).await
    }

    pub async fn delete_link(&self, pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        self.repo.delete_link(pool, id).await
    }

    pub async fn get_points(&self, pool: &SqlitePool) -> Result<UserPoints, AppError> {
        self.repo.get_points(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::test_pool;

    #[tokio::test]
    async fn link_guarda_descricao_opcional() {
        let pool = test_pool().await;
        let svc = SettingsService::new(SettingsRepository::new());

        let created = svc
            .create_link(
                &pool,
                "Portal Intelbras".to_string(),
                "https://www.intelbras.com".to_string(),
                Some("Catálogo e suporte do fabricante".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(created.description.as_deref(), Some("Catálogo e suporte do fabricante"));

        // Sem descrição o campo fica vazio, inclusive na listagem
        let updated = svc
            .update_link(
                &pool,
                &created.id,
                "Portal Intelbras".to_string(),
                "https://www.intelbras.com".to_string(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.description, None);

        let links = svc.list_links(&pool).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].description, None);
    }
}
