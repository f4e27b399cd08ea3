// src/models/auth.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
pub enum UserRole {
    Administrator, // Administrador
    User,          // Usuário
    Salesperson,   // Vendedor
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "user-admin-iac")]
    pub id: String,

    #[schema(example = "IAC2010")]
    pub username: String,

    #[schema(example = "Administrador IAC")]
    pub name: String,

    // Senha em texto puro, comparação direta no login (sistema local de usuário único).
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,

    pub role: UserRole,
}
