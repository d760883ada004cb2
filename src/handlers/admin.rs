// src/handlers/admin.rs

// Rotas do admin da plataforma: empresas, psicólogos e prompts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        company::{Company, Psychologist},
        prompt::{AiPrompt, CreatePromptPayload, UpdatePromptPayload},
    },
};

// =============================================================================
//  1. EMPRESAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    #[schema(example = "Empresa Exemplo Ltda")]
    pub name: String,

    // Aceita com ou sem máscara
    #[schema(example = "12.345.678/0001-95")]
    pub cnpj: String,

    #[validate(email(message = "O e-mail de contato é inválido."))]
    #[schema(example = "contato@empresa.com")]
    pub contact_email: String,

    pub billing_email: Option<String>,

    // Usuário que passa a administrar a conta da empresa
    pub owner_user_id: Option<Uuid>,
}

// POST /api/admin/companies
#[utoipa::path(
    post,
    path = "/api/admin/companies",
    tag = "Admin",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .company_service
        .create_company(
            &payload.name,
            &payload.cnpj,
            &payload.contact_email,
            payload.billing_email.as_deref(),
            payload.owner_user_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /api/admin/companies
#[utoipa::path(
    get,
    path = "/api/admin/companies",
    tag = "Admin",
    responses(
        (status = 200, description = "Lista de empresas", body = [Company])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
    Ok(Json(app_state.company_service.list_companies().await?))
}

// GET /api/admin/companies/{id}
#[utoipa::path(
    get,
    path = "/api/admin/companies/{company_id}",
    tag = "Admin",
    params(("company_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(app_state.company_service.get_company(company_id).await?))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    pub billing_email: Option<String>,
    pub is_active: Option<bool>,
}

// PUT /api/admin/companies/{id}
#[utoipa::path(
    put,
    path = "/api/admin/companies/{company_id}",
    tag = "Admin",
    params(("company_id" = Uuid, Path, description = "ID da Empresa")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<Json<Company>, AppError> {
    let company = app_state
        .company_service
        .update_company(
            company_id,
            payload.name.as_deref(),
            payload.contact_email.as_deref(),
            payload.billing_email.as_deref(),
            payload.is_active,
        )
        .await?;
    Ok(Json(company))
}

// =============================================================================
//  2. PSICÓLOGOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePsychologistPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Dra. Ana Souza")]
    pub full_name: String,

    #[validate(length(min = 1, message = "O CRP é obrigatório."))]
    #[schema(example = "CRP 06/12345")]
    pub crp: String,

    #[validate(email(message = "O e-mail é inválido."))]
    pub email: String,

    pub user_id: Option<Uuid>,
}

// POST /api/admin/psychologists
#[utoipa::path(
    post,
    path = "/api/admin/psychologists",
    tag = "Admin",
    request_body = CreatePsychologistPayload,
    responses(
        (status = 201, description = "Psicólogo cadastrado", body = Psychologist)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_psychologist(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePsychologistPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let psychologist = app_state
        .psychologist_service
        .create_psychologist(payload.user_id, &payload.full_name, &payload.crp, &payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(psychologist)))
}

// GET /api/admin/psychologists
#[utoipa::path(
    get,
    path = "/api/admin/psychologists",
    tag = "Admin",
    responses(
        (status = 200, description = "Lista de psicólogos", body = [Psychologist])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_psychologists(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Psychologist>>, AppError> {
    Ok(Json(app_state.psychologist_service.list_psychologists().await?))
}

// GET /api/admin/psychologists/{id}
#[utoipa::path(
    get,
    path = "/api/admin/psychologists/{psychologist_id}",
    tag = "Admin",
    params(("psychologist_id" = Uuid, Path, description = "ID do Psicólogo")),
    responses(
        (status = 200, description = "Psicólogo", body = Psychologist),
        (status = 404, description = "Psicólogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_psychologist(
    State(app_state): State<AppState>,
    Path(psychologist_id): Path<Uuid>,
) -> Result<Json<Psychologist>, AppError> {
    Ok(Json(app_state.psychologist_service.get_psychologist(psychologist_id).await?))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePsychologistPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

// PUT /api/admin/psychologists/{id}
#[utoipa::path(
    put,
    path = "/api/admin/psychologists/{psychologist_id}",
    tag = "Admin",
    params(("psychologist_id" = Uuid, Path, description = "ID do Psicólogo")),
    request_body = UpdatePsychologistPayload,
    responses(
        (status = 200, description = "Psicólogo atualizado", body = Psychologist),
        (status = 404, description = "Psicólogo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_psychologist(
    State(app_state): State<AppState>,
    Path(psychologist_id): Path<Uuid>,
    Json(payload): Json<UpdatePsychologistPayload>,
) -> Result<Json<Psychologist>, AppError> {
    let psychologist = app_state
        .psychologist_service
        .update_psychologist(
            psychologist_id,
            payload.full_name.as_deref(),
            payload.email.as_deref(),
            payload.is_active,
        )
        .await?;
    Ok(Json(psychologist))
}

// =============================================================================
//  3. PROMPTS
// =============================================================================

// GET /api/admin/prompts
#[utoipa::path(
    get,
    path = "/api/admin/prompts",
    tag = "Admin",
    responses(
        (status = 200, description = "Lista de prompts", body = [AiPrompt])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_prompts(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AiPrompt>>, AppError> {
    Ok(Json(app_state.prompt_service.list_prompts().await?))
}

// POST /api/admin/prompts
#[utoipa::path(
    post,
    path = "/api/admin/prompts",
    tag = "Admin",
    request_body = CreatePromptPayload,
    responses(
        (status = 201, description = "Prompt criado", body = AiPrompt)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_prompt(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePromptPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let prompt = app_state
        .prompt_service
        .create_prompt(&payload.name, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(prompt)))
}

// PUT /api/admin/prompts/{id}
#[utoipa::path(
    put,
    path = "/api/admin/prompts/{prompt_id}",
    tag = "Admin",
    params(("prompt_id" = Uuid, Path, description = "ID do Prompt")),
    request_body = UpdatePromptPayload,
    responses(
        (status = 200, description = "Prompt atualizado (versão incrementada)", body = AiPrompt),
        (status = 404, description = "Prompt não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_prompt(
    State(app_state): State<AppState>,
    Path(prompt_id): Path<Uuid>,
    Json(payload): Json<UpdatePromptPayload>,
) -> Result<Json<AiPrompt>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let prompt = app_state
        .prompt_service
        .update_prompt(prompt_id, &payload.content)
        .await?;
    Ok(Json(prompt))
}

// POST /api/admin/prompts/{id}/activate
#[utoipa::path(
    post,
    path = "/api/admin/prompts/{prompt_id}/activate",
    tag = "Admin",
    params(("prompt_id" = Uuid, Path, description = "ID do Prompt")),
    responses(
        (status = 200, description = "Prompt ativado (os demais foram desativados)", body = AiPrompt),
        (status = 404, description = "Prompt não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn activate_prompt(
    State(app_state): State<AppState>,
    Path(prompt_id): Path<Uuid>,
) -> Result<Json<AiPrompt>, AppError> {
    Ok(Json(app_state.prompt_service.set_active_prompt(prompt_id).await?))
}
