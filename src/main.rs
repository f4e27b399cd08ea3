//src/main.rs

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::auth::list_users).post(handlers::auth::create_user),
        )
        .route(
            "/{id}",
            put(handlers::auth::update_user).delete(handlers::auth::delete_user),
        );

    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/{id}",
            put(handlers::clients::update_client).delete(handlers::clients::delete_client),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/import", post(handlers::products::import_products))
        .route(
            "/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        );

    let quote_routes = Router::new()
        .route(
            "/",
            get(handlers::quotes::list_quotes).post(handlers::quotes::create_quote),
        )
        .route("/board", get(handlers::quotes::get_board))
        .route(
            "/{id}",
            get(handlers::quotes::get_quote)
                .put(handlers::quotes::update_quote)
                .delete(handlers::quotes::delete_quote),
        )
        .route("/{id}/versions", post(handlers::quotes::create_quote_version))
        .route("/{id}/status", put(handlers::quotes::update_quote_status))
        .route(
            "/{id}/installation",
            put(handlers::quotes::update_quote_installation),
        )
        .route("/{id}/board", put(handlers::quotes::move_quote));

    let finance_routes = Router::new()
        .route("/summary", get(handlers::finance::get_summary))
        .route(
            "/transactions",
            get(handlers::finance::list_transactions)
                .post(handlers::finance::create_transaction),
        )
        .route(
            "/transactions/{id}",
            put(handlers::finance::update_transaction)
                .delete(handlers::finance::delete_transaction),
        )
        .route(
            "/reports/clients",
            get(handlers::finance::client_revenue_report),
        )
        .route(
            "/reports/products",
            get(handlers::finance::product_revenue_report),
        )
        .route(
            "/reports/profitability",
            get(handlers::finance::profitability_report),
        );

    let document_routes = Router::new()
        .route("/quotes/{id}", get(handlers::documents::quote_pdf))
        .route(
            "/service-orders/{id}",
            get(handlers::documents::service_order_pdf),
        )
        .route("/render", post(handlers::documents::render_document));

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route(
            "/company",
            get(handlers::settings::get_company_info)
                .put(handlers::settings::update_company_info),
        );

    let link_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::list_links).post(handlers::settings::create_link),
        )
        .route(
            "/{id}",
            put(handlers::settings::update_link).delete(handlers::settings::delete_link),
        );

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/api/points", get(handlers::settings::get_points))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/products", product_routes)
        .nest("/api/quotes", quote_routes)
        .nest("/api/finance", finance_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/links", link_routes)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
