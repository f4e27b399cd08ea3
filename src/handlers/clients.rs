// src/handlers/clients.rs

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
    models::client::Client,
    services::client_service::ClientDraft,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "COND. ED. TELLES")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "Rua das Palmeiras, 123, São Paulo, SP")]
    pub address: String,

    #[serde(default)]
    #[schema(example = "Sr. Telles (11) 99999-0001")]
    pub contact: String,

    #[schema(example = "12.345.678/0001-99")]
    pub cnpj: Option<String>,
}

impl SaveClientPayload {
    fn into_draft(self) -> ClientDraft {
        ClientDraft {
            name: self.name,
            address: self.address,
            contact: self.contact,
            cnpj: self.cnpj,
        }
    }
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Client>)
    )
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(clients)))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = SaveClientPayload,
    responses(
        (status = 201, description = "Cliente cadastrado (ou registro homônimo atualizado)", body = Client),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .create(&app_state.db_pool, payload.into_draft())
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    request_body = SaveClientPayload,
    params(("id" = String, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .update(&app_state.db_pool, &id, payload.into_draft())
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = String, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente excluído"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete(&app_state.db_pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
