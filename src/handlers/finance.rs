// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::finance::{
        ClientRevenueEntry, InstallationProfitEntry, ManualTransaction, PeriodSummary,
        ProductRevenueEntry, TransactionKind,
    },
};

// =============================================================================
//  PARÂMETROS E PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryParams {
    /// Mês do fechamento (1 a 12).
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeParams {
    /// Início do intervalo, ISO yyyy-mm-dd (inclusivo).
    pub start: Option<String>,
    /// Fim do intervalo, ISO yyyy-mm-dd (inclusivo).
    pub end: Option<String>,
}

impl RangeParams {
    fn parse(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
        let parse = |value: &Option<String>, label: &str| match value.as_deref() {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| AppError::InvalidPeriod(format!("{} '{}'", label, raw))),
        };

        Ok((parse(&self.start, "data inicial")?, parse(&self.end, "data final")?))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTransactionPayload {
    pub kind: TransactionKind,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Compra de ferramentas")]
    pub description: String,

    #[validate(range(min = 0.01, message = "invalid_amount"))]
    #[schema(example = 350.0)]
    pub amount: f64,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "2024-06-05")]
    pub date: String,

    #[schema(example = "Ferramentas")]
    pub category: Option<String>,

    pub notes: Option<String>,
}

// =============================================================================
//  FECHAMENTO DO MÊS
// =============================================================================

// GET /api/finance/summary
#[utoipa::path(
    get,
    path = "/api/finance/summary",
    tag = "Finance",
    params(SummaryParams),
    responses(
        (status = 200, description = "Fechamento do mês", body = PeriodSummary),
        (status = 400, description = "Período inválido")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .finance_service
        .monthly_summary(&app_state.db_pool, params.month, params.year)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

// =============================================================================
//  LANÇAMENTOS MANUAIS
// =============================================================================

// GET /api/finance/transactions
#[utoipa::path(
    get,
    path = "/api/finance/transactions",
    tag = "Finance",
    responses(
        (status = 200, description = "Lançamentos manuais", body = Vec<ManualTransaction>)
    )
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state
        .finance_service
        .list_transactions(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(transactions)))
}

// POST /api/finance/transactions
#[utoipa::path(
    post,
    path = "/api/finance/transactions",
    tag = "Finance",
    request_body = SaveTransactionPayload,
    responses(
        (status = 201, description = "Lançamento registrado", body = ManualTransaction),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .create_transaction(
            &app_state.db_pool,
            payload.kind,
            payload.description,
            payload.amount,
            payload.date,
            payload.category,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// PUT /api/finance/transactions/{id}
#[utoipa::path(
    put,
    path = "/api/finance/transactions/{id}",
    tag = "Finance",
    request_body = SaveTransactionPayload,
    params(("id" = String, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento atualizado", body = ManualTransaction),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaveTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .update_transaction(
            &app_state.db_pool,
            &id,
            payload.kind,
            payload.description,
            payload.amount,
            payload.date,
            payload.category,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::OK, Json(transaction)))
}

// DELETE /api/finance/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/finance/transactions/{id}",
    tag = "Finance",
    params(("id" = String, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Lançamento excluído"),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .finance_service
        .delete_transaction(&app_state.db_pool, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  RELATÓRIOS
// =============================================================================

// GET /api/finance/reports/clients
#[utoipa::path(
    get,
    path = "/api/finance/reports/clients",
    tag = "Finance",
    params(RangeParams),
    responses(
        (status = 200, description = "Receita por cliente (Aprovados)", body = Vec<ClientRevenueEntry>)
    )
)]
pub async fn client_revenue_report(
    State(app_state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = params.parse()?;
    let entries = app_state
        .finance_service
        .client_revenue_report(&app_state.db_pool, start, end)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/finance/reports/products
#[utoipa::path(
    get,
    path = "/api/finance/reports/products",
    tag = "Finance",
    params(RangeParams),
    responses(
        (status = 200, description = "Receita por produto (Aprovados)", body = Vec<ProductRevenueEntry>)
    )
)]
pub async fn product_revenue_report(
    State(app_state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = params.parse()?;
    let entries = app_state
        .finance_service
        .product_revenue_report(&app_state.db_pool, start, end)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/finance/reports/profitability
#[utoipa::path(
    get,
    path = "/api/finance/reports/profitability",
    tag = "Finance",
    params(RangeParams),
    responses(
        (status = 200, description = "Lucratividade das instalações", body = Vec<InstallationProfitEntry>)
    )
)]
pub async fn profitability_report(
    State(app_state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = params.parse()?;
    let entries = app_state
        .finance_service
        .profitability_report(&app_state.db_pool, start, end)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}
