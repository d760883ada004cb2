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

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("CNPJ já cadastrado")]
    CnpjAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado à empresa")]
    CompanyAccessDenied,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Departamento não encontrado")]
    DepartmentNotFound,

    #[error("Colaborador não encontrado")]
    ProfileNotFound,

    #[error("Psicólogo não encontrado")]
    PsychologistNotFound,

    #[error("Atividade não encontrada")]
    ActivityNotFound,

    #[error("Licença não encontrada")]
    LicenseNotFound,

    #[error("Relatório não encontrado")]
    ReportNotFound,

    #[error("Prompt não encontrado")]
    PromptNotFound,

    #[error("Convite não encontrado")]
    InviteNotFound,

    #[error("Convite já respondido")]
    InviteAlreadyHandled,

    #[error("Departamento possui {0} colaboradores vinculados")]
    DepartmentHasEmployees(i64),

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Atividade concluída: apenas participação pode ser alterada")]
    ActivityLocked,

    #[error("Período do relatório inválido (fim antes do início)")]
    InvalidReportPeriod,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
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
            AppError::DepartmentHasEmployees(count) => {
                let body = Json(json!({
                    "error": format!(
                        "Não é possível excluir: {} colaboradores vinculados ao departamento.",
                        count
                    ),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::InvalidStatusTransition { from, to } => {
                let body = Json(json!({
                    "error": format!("Transição de status inválida: {} -> {}.", from, to),
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::CnpjAlreadyExists => (StatusCode::CONFLICT, "Este CNPJ já está cadastrado."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.")
            }
            AppError::CompanyAccessDenied => {
                (StatusCode::FORBIDDEN, "Você não tem acesso a esta empresa.")
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::CompanyNotFound => (StatusCode::NOT_FOUND, "Empresa não encontrada."),
            AppError::DepartmentNotFound => (StatusCode::NOT_FOUND, "Departamento não encontrado."),
            AppError::ProfileNotFound => (StatusCode::NOT_FOUND, "Colaborador não encontrado."),
            AppError::PsychologistNotFound => (StatusCode::NOT_FOUND, "Psicólogo não encontrado."),
            AppError::ActivityNotFound => (StatusCode::NOT_FOUND, "Atividade não encontrada."),
            AppError::LicenseNotFound => (StatusCode::NOT_FOUND, "Licença não encontrada."),
            AppError::ReportNotFound => (StatusCode::NOT_FOUND, "Relatório não encontrado."),
            AppError::PromptNotFound => (StatusCode::NOT_FOUND, "Prompt não encontrado."),
            AppError::InviteNotFound => (StatusCode::NOT_FOUND, "Convite não encontrado."),
            AppError::InviteAlreadyHandled => {
                (StatusCode::CONFLICT, "Este convite já foi respondido.")
            }
            AppError::ActivityLocked => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Atividade concluída: apenas os números de participação podem ser alterados.",
            ),
            AppError::InvalidReportPeriod => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Período inválido: a data final deve ser igual ou posterior à inicial.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
