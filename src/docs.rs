// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::list_users,
        handlers::auth::create_user,
        handlers::auth::update_user,
        handlers::auth::delete_user,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::import_products,

        // --- Quotes ---
        handlers::quotes::list_quotes,
        handlers::quotes::get_board,
        handlers::quotes::get_quote,
        handlers::quotes::create_quote,
        handlers::quotes::update_quote,
        handlers::quotes::create_quote_version,
        handlers::quotes::update_quote_status,
        handlers::quotes::update_quote_installation,
        handlers::quotes::move_quote,
        handlers::quotes::delete_quote,

        // --- Finance ---
        handlers::finance::get_summary,
        handlers::finance::list_transactions,
        handlers::finance::create_transaction,
        handlers::finance::update_transaction,
        handlers::finance::delete_transaction,
        handlers::finance::client_revenue_report,
        handlers::finance::product_revenue_report,
        handlers::finance::profitability_report,

        // --- Documents ---
        handlers::documents::quote_pdf,
        handlers::documents::service_order_pdf,
        handlers::documents::render_document,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::settings::get_company_info,
        handlers::settings::update_company_info,
        handlers::settings::list_links,
        handlers::settings::create_link,
        handlers::settings::update_link,
        handlers::settings::delete_link,
        handlers::settings::get_points,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            handlers::auth::LoginPayload,
            handlers::auth::CreateUserPayload,
            handlers::auth::UpdateUserPayload,

            // --- Clients ---
            models::client::Client,
            handlers::clients::SaveClientPayload,

            // --- Products ---
            models::product::Product,
            models::product::ImportSummary,
            handlers::products::SaveProductPayload,

            // --- Quotes ---
            models::quote::QuoteStatus,
            models::quote::InstallationProgress,
            models::quote::BoardColumn,
            models::quote::QuoteItem,
            models::quote::Quote,
            models::quote::QuoteBoard,
            handlers::quotes::QuoteItemPayload,
            handlers::quotes::SaveQuotePayload,
            handlers::quotes::UpdateStatusPayload,
            handlers::quotes::UpdateInstallationPayload,
            handlers::quotes::MoveQuotePayload,

            // --- Finance ---
            models::finance::TransactionKind,
            models::finance::ManualTransaction,
            models::finance::PeriodSummary,
            models::finance::ClientRevenueEntry,
            models::finance::ProductRevenueEntry,
            models::finance::InstallationProfitEntry,
            handlers::finance::SaveTransactionPayload,

            // --- Documents ---
            services::document_service::DocumentKind,
            handlers::documents::RenderDocumentPayload,

            // --- Settings ---
            models::settings::AppSettings,
            models::settings::CompanyInfo,
            models::settings::ImportantLink,
            models::settings::UserPoints,
            handlers::settings::UpdateSettingsPayload,
            handlers::settings::SaveLinkPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação local"),
        (name = "Users", description = "Usuários e perfis de acesso"),
        (name = "Clients", description = "Cadastro de clientes"),
        (name = "Products", description = "Catálogo de produtos e importação"),
        (name = "Quotes", description = "Orçamentos, revisões e quadro de instalações"),
        (name = "Finance", description = "Fechamento mensal, lançamentos e relatórios"),
        (name = "Documents", description = "Geração de PDFs (orçamento e ordem de serviço)"),
        (name = "Settings", description = "Preferências, dados da empresa, links e pontuação")
    )
)]
pub struct ApiDoc;
