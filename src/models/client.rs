// src/models/client.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "client-1")]
    pub id: String,

    #[schema(example = "COND. ED. TELLES")]
    pub name: String,

    #[schema(example = "Rua das Palmeiras, 123, São Paulo, SP")]
    pub address: String,

    #[schema(example = "Sr. Telles (11) 99999-0001")]
    pub contact: String,

    #[schema(example = "12.345.678/0001-99")]
    pub cnpj: Option<String>,
}
