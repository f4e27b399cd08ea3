// src/handlers/settings.rs

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
    models::settings::{AppSettings, CompanyInfo, ImportantLink, UserPoints},
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Jorcimar")]
    pub default_salesperson: String,

    #[validate(range(min = 1, message = "invalid_validity"))]
    #[schema(example = 15)]
    pub default_validity_days: i64,

    #[serde(default)]
    pub payment_term_suggestions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveLinkPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Portal da prefeitura")]
    pub name: String,

    #[validate(url(message = "invalid_url"))]
    #[schema(example = "https://www.prefeitura.sp.gov.br")]
    pub url: String,

    #[schema(example = "Emissão de notas e alvarás")]
    pub description: Option<String>,
}

// =============================================================================
//  PREFERÊNCIAS
// =============================================================================

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Preferências do sistema", body = AppSettings)
    )
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_service.get_settings(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsPayload,
    responses(
        (status = 200, description = "Preferências atualizadas", body = AppSettings),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = app_state
        .settings_service
        .update_settings(
            &app_state.db_pool,
            payload.default_salesperson,
            payload.default_validity_days,
            payload.payment_term_suggestions,
        )
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}

// =============================================================================
//  DADOS DA EMPRESA
// =============================================================================

// GET /api/settings/company
#[utoipa::path(
    get,
    path = "/api/settings/company",
    tag = "Settings",
    responses(
        (status = 200, description = "Dados da empresa emitidos nos documentos", body = CompanyInfo)
    )
)]
pub async fn get_company_info(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let info = app_state.settings_service.get_company_info(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(info)))
}

// PUT /api/settings/company
#[utoipa::path(
    put,
    path = "/api/settings/company",
    tag = "Settings",
    request_body = CompanyInfo,
    responses(
        (status = 200, description = "Dados da empresa atualizados", body = CompanyInfo)
    )
)]
pub async fn update_company_info(
    State(app_state): State<AppState>,
    Json(info): Json<CompanyInfo>,
) -> Result<impl IntoResponse, AppError> {
    let info = app_state
        .settings_service
        .update_company_info(&app_state.db_pool, info)
        .await?;

    Ok((StatusCode::OK, Json(info)))
}

// =============================================================================
//  LINKS IMPORTANTES
// =============================================================================

// GET /api/links
#[utoipa::path(
    get,
    path = "/api/links",
    tag = "Settings",
    responses(
        (status = 200, description = "Links importantes", body = Vec<ImportantLink>)
    )
)]
pub async fn list_links(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let links = app_state.settings_service.list_links(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(links)))
}

// POST /api/links
#[utoipa::path(
    post,
    path = "/api/links",
    tag = "Settings",
    request_body = SaveLinkPayload,
    responses(
        (status = 201, description = "Link cadastrado", body = ImportantLink),
        (status = 400, description = "URL inválida")
    )
)]
pub async fn create_link(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveLinkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let link = app_state
        .settings_service
        .create_link(&app_state.db_pool, payload.name, payload.url, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

// PUT /api/links/{id}
#[utoipa::path(
    put,
    path = "/api/links/{id}",
    tag = "Settings",
    request_body = SaveLinkPayload,
    params(("id" = String, Path, description = "ID do link")),
    responses(
        (status = 200, description = "Link atualizado", body = ImportantLink),
        (status = 404, description = "Link não encontrado")
    )
)]
pub async fn update_link(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveLinkPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let link = app_state
        .settings_service
        .update_link(&app_state.db_pool, &id, payload.name, payload.url, payload.description)
        .await?;

    Ok((StatusCode::OK, Json(link)))
}

// DELETE /api/links/{id}
#[utoipa::path(
    delete,
    path = "/api/links/{id}",
    tag = "Settings",
    params(("id" = String, Path, description = "ID do link")),
    responses(
        (status = 204, description = "Link excluído"),
        (status = 404, description = "Link não encontrado")
    )
)]
pub async fn delete_link(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.settings_service.delete_link(&app_state.db_pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PONTUAÇÃO
// =============================================================================

// GET /api/points
#[utoipa::path(
    get,
    path = "/api/points",
    tag = "Settings",
    responses(
        (status = 200, description = "Pontuação acumulada por instalações concluídas", body = UserPoints)
    )
)]
pub async fn get_points(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let points = app_state.settings_service.get_points(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(points)))
}
