// src/models/finance.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,  // Entrada
    Expense, // Saída
}

/// Lançamento manual do financeiro (fora do fluxo de orçamentos).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualTransaction {
    pub id: String,

    pub kind: TransactionKind,

    #[schema(example = "Compra de ferramentas")]
    pub description: String,

    #[schema(example = 350.0)]
    pub amount: f64,

    /// Data do lançamento, ISO yyyy-mm-dd.
    #[schema(example = "2024-06-05")]
    pub date: String,

    #[schema(example = "Ferramentas")]
    pub category: Option<String>,

    pub notes: Option<String>,
}

/// Fechamento financeiro de um mês.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    #[schema(example = 6)]
    pub month: u32,
    #[schema(example = 2024)]
    pub year: i32,

    // A receber: orçamentos Aprovados/Pendentes (pela data de emissão) + entradas manuais
    pub quote_receivables: f64,
    pub manual_income: f64,
    pub total_receivables: f64,

    // A pagar: custos de instalação de Aprovados (pela data da instalação) + saídas + imposto
    pub installation_payables: f64,
    pub manual_expenses: f64,
    pub estimated_tax: f64,
    pub total_payables: f64,

    pub net_balance: f64,
}

// --- Relatórios ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRevenueEntry {
    pub client_name: String,
    pub quote_count: usize,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenueEntry {
    pub product_name: String,
    pub quantity: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallationProfitEntry {
    pub quote_id: String,
    pub client_name: String,
    pub total_amount: f64,
    pub installation_cost: f64,
    pub profit: f64,
}
