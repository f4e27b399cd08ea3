// src/models/settings.rs

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Preferências de preenchimento dos orçamentos (registro único).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[schema(example = "Jorcimar")]
    pub default_salesperson: String,

    #[schema(example = 15)]
    pub default_validity_days: i64,

    #[schema(value_type = Vec<String>, example = json!(["3X sem juros", "Entrada + 30 dias"]))]
    pub payment_term_suggestions: Json<Vec<String>>,
}

/// Dados da empresa exibidos no cabeçalho dos documentos (registro único).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[schema(example = "A COMPANY")]
    pub name: String,

    #[schema(example = "Rua Exemplo, 123, Cidade, Estado")]
    pub address: String,

    #[schema(example = "(11) 99999-0000")]
    pub phone: String,

    #[schema(example = "contato@suaempresa.com")]
    pub email: String,

    pub website: Option<String>,

    #[schema(example = "00.000.000/0001-00")]
    pub cnpj: Option<String>,

    /// Logo em data URL (opcional).
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportantLink {
    pub id: String,

    #[schema(example = "Portal Intelbras")]
    pub name: String,

    #[schema(example = "https://www.intelbras.com")]
    pub url: String,

    #[schema(example = "Catálogo e suporte do fabricante")]
    pub description: Option<String>,
}

/// Contador de pontos de conclusão de instalações (registro único).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPoints {
    #[schema(example = 75)]
    pub points: i64,
}
