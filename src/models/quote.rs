// src/models/quote.rs

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::client::Client;

// --- Enums (gravados como TEXT no SQLite) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,    // Rascunho
    Pending,  // Pendente
    Approved, // Aprovado
    Rejected, // Rejeitado
    Canceled, // Cancelado
}

impl QuoteStatus {
    /// Rótulo exibido nos documentos impressos.
    pub fn label(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "Rascunho",
            QuoteStatus::Pending => "Pendente",
            QuoteStatus::Approved => "Aprovado",
            QuoteStatus::Rejected => "Rejeitado",
            QuoteStatus::Canceled => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
pub enum InstallationProgress {
    NotStarted, // Não Iniciada
    Scheduled,  // Agendada
    InProgress, // Em Andamento
    Completed,  // Concluída
    OnHold,     // Em Espera
    Canceled,   // Cancelada
}

impl InstallationProgress {
    pub fn label(&self) -> &'static str {
        match self {
            InstallationProgress::NotStarted => "Não Iniciada",
            InstallationProgress::Scheduled => "Agendada",
            InstallationProgress::InProgress => "Em Andamento",
            InstallationProgress::Completed => "Concluída",
            InstallationProgress::OnHold => "Em Espera",
            InstallationProgress::Canceled => "Cancelada",
        }
    }
}

/// Colunas do quadro kanban do Dashboard. Visão derivada, nunca persistida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BoardColumn {
    Draft,
    Pending,
    Approved,
    Completed,
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: String,

    pub product_id: Option<String>,

    #[schema(example = "Câmera IP Dome Full HD")]
    pub product_name: String,

    /// Texto livre do item; pode ser editado sem alterar o catálogo.
    #[schema(example = "Câmera de segurança IP, resolução Full HD.")]
    pub description: String,

    #[schema(example = 4.0)]
    pub quantity: f64,

    #[schema(example = 450.0)]
    pub unit_price: f64,

    /// Sempre `quantity * unit_price`, recalculado a cada gravação.
    #[schema(example = 1800.0)]
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Código legível: `ORC-{timestamp}` ou `{base}-v{N}` para revisões.
    #[schema(example = "ORC-1718000000000-v2")]
    pub id: String,

    /// Raiz da cadeia de revisões (ausente na primeira versão).
    #[schema(example = "ORC-1718000000000")]
    pub original_quote_id: Option<String>,

    #[schema(example = 2)]
    pub version: i64,

    pub client_id: String,

    #[schema(example = "COND. ED. TELLES")]
    pub client_name: String,

    /// Snapshot do cliente no momento da emissão.
    #[schema(value_type = Option<Client>)]
    pub client_details: Option<Json<Client>>,

    /// Data de emissão, ISO yyyy-mm-dd.
    #[schema(example = "2024-06-10")]
    pub date: String,

    #[schema(value_type = Vec<QuoteItem>)]
    pub items: Json<Vec<QuoteItem>>,

    #[schema(example = 1800.0)]
    pub sub_total: f64,

    pub discount: Option<f64>,

    #[schema(example = 1800.0)]
    pub total_amount: f64,

    #[schema(example = "3X sem juros")]
    pub payment_terms: String,

    pub installments: Option<i64>,

    pub installment_amount: Option<f64>,

    pub status: QuoteStatus,

    pub notes: Option<String>,

    #[schema(example = "Jorcimar")]
    pub salesperson: Option<String>,

    #[schema(example = 15)]
    pub validity_days: Option<i64>,

    pub installation_address: Option<String>,

    #[schema(example = "2024-06-20")]
    pub installation_date: Option<String>,

    pub installation_cost: Option<f64>,

    pub installation_progress: Option<InstallationProgress>,

    /// Materiais previstos para a instalação (texto livre).
    pub installation_materials: Option<String>,

    pub installation_notes: Option<String>,
}

/// Totais derivados dos itens de um orçamento.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub sub_total: f64,
    pub total_amount: f64,
    pub installment_amount: f64,
}

/// Agrupamento do quadro kanban, montado sob demanda a partir dos orçamentos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBoard {
    pub draft: Vec<Quote>,
    pub pending: Vec<Quote>,
    pub approved: Vec<Quote>,
    pub completed: Vec<Quote>,
}
