use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Orçamento não encontrado")]
    QuoteNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Registro não encontrado")]
    RecordNotFound,

    #[error("Já existe um orçamento com este código")]
    DuplicateQuoteId,

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Não é possível excluir o único administrador")]
    LastAdministrator,

    #[error("Período inválido: {0}")]
    InvalidPeriod(String),

    #[error("Imagem inválida: {0}")]
    InvalidImage(String),

    #[error("Exportação já em andamento para {0}")]
    ExportInProgress(String),

    #[error("Planilha inválida")]
    SpreadsheetError(#[from] csv::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos.".to_string())
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string()),
            AppError::QuoteNotFound => (StatusCode::NOT_FOUND, "Orçamento não encontrado.".to_string()),
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado.".to_string()),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado.".to_string()),
            AppError::RecordNotFound => (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string()),
            AppError::DuplicateQuoteId => {
                (StatusCode::CONFLICT, "Já existe um orçamento com este código.".to_string())
            }
            AppError::UsernameAlreadyExists => {
                (StatusCode::CONFLICT, "Este nome de usuário já está em uso.".to_string())
            }
            AppError::LastAdministrator => (
                StatusCode::CONFLICT,
                "Não é possível excluir o único administrador do sistema.".to_string(),
            ),
            AppError::InvalidPeriod(ref msg) => {
                (StatusCode::BAD_REQUEST, format!("Período inválido: {}.", msg))
            }
            AppError::InvalidImage(ref msg) => {
                (StatusCode::BAD_REQUEST, format!("Imagem inválida: {}.", msg))
            }
            AppError::ExportInProgress(ref doc) => (
                StatusCode::CONFLICT,
                format!("A exportação de {} já está em andamento.", doc),
            ),
            AppError::SpreadsheetError(ref e) => {
                tracing::warn!("Falha ao ler planilha: {}", e);
                (StatusCode::BAD_REQUEST, "Não foi possível ler a planilha enviada.".to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
