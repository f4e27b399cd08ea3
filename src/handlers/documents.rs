// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    services::document_service::DocumentKind,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderDocumentPayload {
    pub kind: DocumentKind,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "ORC-1718000000000")]
    pub quote_id: String,

    /// Captura da pré-visualização em data URL (`data:image/png;base64,...`).
    #[validate(length(min = 1, message = "required"))]
    pub image_data: String,
}

fn pdf_response(filename: String, bytes: Vec<u8>) -> impl IntoResponse {
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    (StatusCode::OK, headers, bytes)
}

// GET /api/documents/quotes/{id}
#[utoipa::path(
    get,
    path = "/api/documents/quotes/{id}",
    tag = "Documents",
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "PDF do orçamento", content_type = "application/pdf"),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn quote_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (filename, bytes) = app_state
        .document_service
        .generate_quote_pdf(&app_state.db_pool, &id)
        .await?;

    Ok(pdf_response(filename, bytes))
}

// GET /api/documents/service-orders/{id}
#[utoipa::path(
    get,
    path = "/api/documents/service-orders/{id}",
    tag = "Documents",
    params(("id" = String, Path, description = "Código do orçamento")),
    responses(
        (status = 200, description = "PDF da ordem de serviço", content_type = "application/pdf"),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn service_order_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (filename, bytes) = app_state
        .document_service
        .generate_service_order_pdf(&app_state.db_pool, &id)
        .await?;

    Ok(pdf_response(filename, bytes))
}

// POST /api/documents/render
#[utoipa::path(
    post,
    path = "/api/documents/render",
    tag = "Documents",
    request_body = RenderDocumentPayload,
    responses(
        (status = 200, description = "PDF paginado da captura", content_type = "application/pdf"),
        (status = 400, description = "Imagem inválida"),
        (status = 409, description = "Exportação já em andamento para este documento")
    )
)]
pub async fn render_document(
    State(app_state): State<AppState>,
    Json(payload): Json<RenderDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (filename, bytes) = app_state
        .document_service
        .render_snapshot(
            &app_state.db_pool,
            payload.kind,
            &payload.quote_id,
            &payload.image_data,
        )
        .await?;

    Ok(pdf_response(filename, bytes))
}
