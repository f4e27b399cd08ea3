// src/handlers/quotes.rs

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
    models::quote::{BoardColumn, InstallationProgress, Quote, QuoteBoard, QuoteStatus},
    services::quote_service::{InstallationUpdate, QuoteDraft, QuoteItemDraft},
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemPayload {
    pub product_id: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Câmera IP Dome Full HD")]
    pub product_name: String,

    #[serde(default)]
    #[schema(example = "Câmera de segurança IP, resolução Full HD.")]
    pub description: String,

    #[schema(example = 4.0)]
    pub quantity: f64,

    #[schema(example = 450.0)]
    pub unit_price: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuotePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "client-1")]
    pub client_id: String,

    /// Data de emissão, ISO yyyy-mm-dd.
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "2024-06-10")]
    pub date: String,

    #[validate(nested)]
    pub items: Vec<QuoteItemPayload>,

    pub discount: Option<f64>,

    #[serde(default)]
    #[schema(example = "3X sem juros")]
    pub payment_terms: String,

    pub installments: Option<i64>,

    pub status: QuoteStatus,

    pub notes: Option<String>,

    /// Ausente, assume o vendedor padrão das preferências.
    pub salesperson: Option<String>,

    /// Ausente, assume a validade padrão das preferências.
    pub validity_days: Option<i64>,

    pub installation_address: Option<String>,
    pub installation_date: Option<String>,
    pub installation_cost: Option<f64>,
    pub installation_progress: Option<InstallationProgress>,
    pub installation_materials: Option<String>,
    pub installation_notes: Option<String>,
}

impl SaveQuotePayload {
    fn into_draft(self) -> QuoteDraft {
        QuoteDraft {
            client_id: self.client_id,
            date: self.date,
            items: self
                .items
                .into_iter()
                .map(|item| QuoteItemDraft {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    description: item.description,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            discount: self.discount,
            payment_terms: self.payment_terms,
            installments: self.installments,
            status: self.status,
            notes: self.notes,
            salesperson: self.salesperson,
            validity_days: self.validity_days,
            installation_address: self.installation_address,
            installation_date: self.installation_date,
            installation_cost: self.installation_cost,
            installation_progress: self.installation_progress,
            installation_materials: self.installation_materials,
            installation_notes: self.installation_notes,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: QuoteStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstallationPayload {
    pub progress: InstallationProgress,
    pub address: Option<String>,
    pub date: Option<String>,
    pub cost: Option<f64>,
    pub materials: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveQuotePayload {
    pub column: BoardColumn,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/quotes
#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    responses(
        (status = 200, description = "Orçamentos, mais recentes primeiro", body = Vec<Quote>)
    )
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let quotes = app_state.quote_service.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/quotes/board
#[utoipa::path(
    get,
    path = "/api/quotes/board",
    tag = "Quotes",
    responses(
        (status = 200, description = "Quadro kanban derivado de status + andamento", body = QuoteBoard)
    )
)]
pub async fn get_board(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let board = app_state.quote_service.board(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(board)))
}

// GET /api/quotes/{id}
#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "Orçamento", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn get_quote(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_service.get(&app_state.db_pool, &id).await?;
    Ok((StatusCode::OK, Json(quote)))
}

// POST /api/quotes
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Quotes",
    request_body = SaveQuotePayload,
    responses(
        (status = 201, description = "Orçamento criado (versão 1)", body = Quote),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = app_state
        .quote_service
        .create(&app_state.db_pool, payload.into_draft())
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// PUT /api/quotes/{id}
#[utoipa::path(
    put,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    request_body = SaveQuotePayload,
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "Orçamento substituído in-place", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn update_quote(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = app_state
        .quote_service
        .update(&app_state.db_pool, &id, payload.into_draft())
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// POST /api/quotes/{id}/versions
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/versions",
    tag = "Quotes",
    request_body = SaveQuotePayload,
    params(("id" = String, Path, description = "Código do orçamento de origem")),
    responses(
        (status = 201, description = "Nova revisão criada; a origem fica intacta", body = Quote),
        (status = 404, description = "Orçamento de origem não encontrado"),
        (status = 409, description = "Código de revisão já existente")
    )
)]
pub async fn create_quote_version(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = app_state
        .quote_service
        .create_version(&app_state.db_pool, &id, payload.into_draft())
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// PUT /api/quotes/{id}/status
#[utoipa::path(
    put,
    path = "/api/quotes/{id}/status",
    tag = "Quotes",
    request_body = UpdateStatusPayload,
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "Status atualizado", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn update_quote_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state
        .quote_service
        .set_status(&app_state.db_pool, &id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// PUT /api/quotes/{id}/installation
#[utoipa::path(
    put,
    path = "/api/quotes/{id}/installation",
    tag = "Quotes",
    request_body = UpdateInstallationPayload,
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "Ordem de serviço atualizada", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn update_quote_installation(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateInstallationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let update = InstallationUpdate {
        progress: payload.progress,
        address: payload.address,
        date: payload.date,
        cost: payload.cost,
        materials: payload.materials,
        notes: payload.notes,
    };

    let quote = app_state
        .quote_service
        .set_installation(&app_state.db_pool, &id, update)
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// PUT /api/quotes/{id}/board
#[utoipa::path(
    put,
    path = "/api/quotes/{id}/board",
    tag = "Quotes",
    request_body = MoveQuotePayload,
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "Orçamento movido no quadro", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn move_quote(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MoveQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state
        .quote_service
        .move_to_column(&app_state.db_pool, &id, payload.column)
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// DELETE /api/quotes/{id}
#[utoipa::path(
    delete,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 204, description = "Orçamento excluído"),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn delete_quote(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.quote_service.delete(&app_state.db_pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
