// src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = "prod-1")]
    pub id: String,

    #[schema(example = "Câmera IP Dome Full HD")]
    pub name: String,

    #[schema(example = "Câmera de segurança IP, resolução Full HD.")]
    pub description: String,

    #[schema(example = 450.0)]
    pub unit_price: f64,

    // Preço de compra (uso interno, relatórios de lucratividade)
    #[schema(example = 300.0)]
    pub cost_price: Option<f64>,
}

/// Resultado de uma importação de planilha de produtos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    #[schema(example = 42)]
    pub imported: usize,

    #[schema(example = 3)]
    pub skipped: usize,
}
