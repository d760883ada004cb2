// src/middleware/company.rs

// A identidade da empresa vem sempre do servidor: token + cabeçalho
// x-company-id verificados contra company_admins. Nada de confiar em
// estado guardado no cliente.

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::UserRole};

const COMPANY_ID_HEADER: &str = "x-company-id";

// O contexto de empresa resolvido para a requisição
#[derive(Debug, Clone, Copy)]
pub struct CompanyContext(pub Uuid);

pub async fn company_middleware(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();

    let token = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let user = app_state.auth_service.validate_token(token).await?;

    let company_id = headers
        .get(COMPANY_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or(AppError::CompanyAccessDenied)?;

    // Admin da plataforma passa; os demais precisam constar em
    // company_admins para a empresa pedida
    if user.role != UserRole::Admin {
        let is_admin = app_state
            .company_repo
            .is_company_admin(company_id, user.id)
            .await?;
        if !is_admin {
            return Err(AppError::CompanyAccessDenied);
        }
    }

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(CompanyContext(company_id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CompanyContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CompanyContext>()
            .copied()
            .ok_or(AppError::CompanyAccessDenied)
    }
}
