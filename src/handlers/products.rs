// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::product::{ImportSummary, Product},
    services::product_service::ProductDraft,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Câmera IP Dome Full HD")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0.0, message = "invalid_price"))]
    #[schema(example = 450.0)]
    pub unit_price: f64,

    #[schema(example = 300.0)]
    pub cost_price: Option<f64>,
}

impl SaveProductPayload {
    fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            description: self.description,
            unit_price: self.unit_price,
            cost_price: self.cost_price,
        }
    }
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Catálogo de produtos", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(products)))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = SaveProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create(&app_state.db_pool, payload.into_draft())
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    request_body = SaveProductPayload,
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .update(&app_state.db_pool, &id, payload.into_draft())
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete(&app_state.db_pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/products/import
#[utoipa::path(
    post,
    path = "/api/products/import",
    tag = "Products",
    request_body(content = String, content_type = "text/csv", description = "Planilha CSV com colunas Nome, Preço/Valor de Venda, Custo/Valor de Compra e Descrição"),
    responses(
        (status = 200, description = "Resumo da importação", body = ImportSummary),
        (status = 400, description = "Planilha ilegível")
    )
)]
pub async fn import_products(
    State(app_state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .product_service
        .import_spreadsheet(&app_state.db_pool, body.as_bytes())
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
