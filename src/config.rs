// src/config.rs

use std::{env, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{
        ClientRepository, FinanceRepository, ProductRepository, QuoteRepository,
        SettingsRepository, UserRepository,
    },
    services::{
        AuthService, ClientService, DocumentService, FinanceService, ProductService,
        QuoteService, SettingsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub product_service: ProductService,
    pub quote_service: QuoteService,
    pub finance_service: FinanceService,
    pub document_service: DocumentService,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://orcamentos.db".to_string());

        let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let client_repo = ClientRepository::new();
        let product_repo = ProductRepository::new();
        let quote_repo = QuoteRepository::new();
        let finance_repo = FinanceRepository::new();
        let settings_repo = SettingsRepository::new();
        let user_repo = UserRepository::new();

        let auth_service = AuthService::new(user_repo);
        let client_service = ClientService::new(client_repo.clone());
        let product_service = ProductService::new(product_repo);
        let quote_service =
            QuoteService::new(quote_repo.clone(), client_repo, settings_repo.clone());
        let finance_service = FinanceService::new(finance_repo, quote_repo.clone());
        let document_service = DocumentService::new(quote_repo, settings_repo.clone());
        let settings_service = SettingsService::new(settings_repo);

        Ok(Self {
            db_pool,
            auth_service,
            client_service,
            product_service,
            quote_service,
            finance_service,
            document_service,
            settings_service,
        })
    }
}
