// src/handlers/company.rs

// Rotas da empresa: departamentos, colaboradores, licenças e atividades.
// Todas exigem o cabeçalho x-company-id, validado pelo middleware.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::{
        activity::{ActivityStatus, ActivityType, CompanyActivity},
        company::{Department, License, LicenseStatus, UserProfile},
    },
};

// =============================================================================
//  1. DEPARTAMENTOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentPayload {
    #[validate(length(min = 1, message = "O nome do departamento é obrigatório."))]
    #[schema(example = "Vendas")]
    pub name: String,
}

// POST /api/company/departments
#[utoipa::path(
    post,
    path = "/api/company/departments",
    tag = "Company",
    request_body = CreateDepartmentPayload,
    responses(
        (status = 201, description = "Departamento criado", body = Department)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateDepartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let department = app_state
        .company_service
        .create_department(company.0, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(department)))
}

// GET /api/company/departments
#[utoipa::path(
    get,
    path = "/api/company/departments",
    tag = "Company",
    responses(
        (status = 200, description = "Departamentos da empresa", body = [Department])
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<Vec<Department>>, AppError> {
    Ok(Json(app_state.company_service.list_departments(company.0).await?))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentPayload {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

// PUT /api/company/departments/{id}
#[utoipa::path(
    put,
    path = "/api/company/departments/{department_id}",
    tag = "Company",
    params(
        ("department_id" = Uuid, Path, description = "ID do Departamento"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    request_body = UpdateDepartmentPayload,
    responses(
        (status = 200, description = "Departamento atualizado", body = Department),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentPayload>,
) -> Result<Json<Department>, AppError> {
    let department = app_state
        .company_service
        .update_department(department_id, company.0, payload.name.as_deref(), payload.is_active)
        .await?;
    Ok(Json(department))
}

// DELETE /api/company/departments/{id}
#[utoipa::path(
    delete,
    path = "/api/company/departments/{department_id}",
    tag = "Company",
    params(
        ("department_id" = Uuid, Path, description = "ID do Departamento"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 204, description = "Departamento excluído"),
        (status = 409, description = "Departamento possui colaboradores vinculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_department(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(department_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .company_service
        .delete_department(department_id, company.0)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. COLABORADORES
// =============================================================================

// GET /api/company/employees
#[utoipa::path(
    get,
    path = "/api/company/employees",
    tag = "Company",
    responses(
        (status = 200, description = "Colaboradores vinculados", body = [UserProfile])
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    Ok(Json(app_state.company_service.list_employees(company.0).await?))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkEmployeePayload {
    pub profile_id: Uuid,
    pub department_id: Option<Uuid>,
}

// POST /api/company/employees/link
#[utoipa::path(
    post,
    path = "/api/company/employees/link",
    tag = "Company",
    request_body = LinkEmployeePayload,
    responses(
        (status = 200, description = "Colaborador vinculado", body = UserProfile),
        (status = 404, description = "Colaborador ou departamento não encontrado")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn link_employee(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<LinkEmployeePayload>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = app_state
        .company_service
        .link_employee(company.0, payload.profile_id, payload.department_id)
        .await?;
    Ok(Json(profile))
}

// POST /api/company/employees/{id}/unlink
#[utoipa::path(
    post,
    path = "/api/company/employees/{profile_id}/unlink",
    tag = "Company",
    params(
        ("profile_id" = Uuid, Path, description = "ID do Perfil"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Colaborador desvinculado", body = UserProfile),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn unlink_employee(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = app_state
        .company_service
        .unlink_employee(company.0, profile_id)
        .await?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatusPayload {
    pub license_status: LicenseStatus,
}

// PUT /api/company/employees/{id}/license-status
#[utoipa::path(
    put,
    path = "/api/company/employees/{profile_id}/license-status",
    tag = "Company",
    params(
        ("profile_id" = Uuid, Path, description = "ID do Perfil"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    request_body = LicenseStatusPayload,
    responses(
        (status = 200, description = "Status da licença atualizado", body = UserProfile),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_employee_license_status(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(profile_id): Path<Uuid>,
    Json(payload): Json<LicenseStatusPayload>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = app_state
        .company_service
        .set_employee_license_status(company.0, profile_id, payload.license_status)
        .await?;
    Ok(Json(profile))
}

// =============================================================================
//  3. LICENÇAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicensePayload {
    #[validate(length(min = 1, message = "O nome do plano é obrigatório."))]
    #[schema(example = "Plano Bem-Estar 100")]
    pub plan_name: String,

    #[schema(example = "1499.90")]
    pub monthly_fee: Decimal,

    #[validate(range(min = 1, message = "A licença precisa de pelo menos 1 assento."))]
    #[schema(example = 100)]
    pub seats: i32,

    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
}

// POST /api/company/licenses
#[utoipa::path(
    post,
    path = "/api/company/licenses",
    tag = "Company",
    request_body = CreateLicensePayload,
    responses(
        (status = 201, description = "Licença criada (inativa)", body = License)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_license(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateLicensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let license = app_state
        .company_service
        .create_license(
            company.0,
            &payload.plan_name,
            payload.monthly_fee,
            payload.seats,
            payload.starts_on,
            payload.ends_on,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(license)))
}

// GET /api/company/licenses
#[utoipa::path(
    get,
    path = "/api/company/licenses",
    tag = "Company",
    responses(
        (status = 200, description = "Licenças da empresa", body = [License])
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_licenses(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<Vec<License>>, AppError> {
    Ok(Json(app_state.company_service.list_licenses(company.0).await?))
}

// POST /api/company/licenses/{id}/activate
#[utoipa::path(
    post,
    path = "/api/company/licenses/{license_id}/activate",
    tag = "Company",
    params(
        ("license_id" = Uuid, Path, description = "ID da Licença"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Licença ativada (a anterior foi desativada)", body = License),
        (status = 404, description = "Licença não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn activate_license(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(license_id): Path<Uuid>,
) -> Result<Json<License>, AppError> {
    let license = app_state
        .company_service
        .activate_license(company.0, license_id)
        .await?;
    Ok(Json(license))
}

// =============================================================================
//  4. ATIVIDADES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityPayload {
    #[validate(length(min = 1, message = "O título da atividade é obrigatório."))]
    #[schema(example = "Workshop de Gestão do Estresse")]
    pub title: String,

    pub description: Option<String>,
    pub activity_type: ActivityType,
    pub scheduled_date: NaiveDate,
    pub max_participants: Option<i32>,
}

// POST /api/company/activities
#[utoipa::path(
    post,
    path = "/api/company/activities",
    tag = "Company",
    request_body = CreateActivityPayload,
    responses(
        (status = 201, description = "Atividade criada (planejada)", body = CompanyActivity)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_activity(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity = app_state
        .company_service
        .create_activity(
            company.0,
            &payload.title,
            payload.description.as_deref(),
            payload.activity_type,
            payload.scheduled_date,
            payload.max_participants,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

// GET /api/company/activities
#[utoipa::path(
    get,
    path = "/api/company/activities",
    tag = "Company",
    responses(
        (status = 200, description = "Atividades da empresa", body = [CompanyActivity])
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_activities(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<Vec<CompanyActivity>>, AppError> {
    Ok(Json(app_state.company_service.list_activities(company.0).await?))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    pub registered_participants: Option<i32>,
    pub attended_participants: Option<i32>,
    #[validate(range(min = 1, max = 10, message = "A nota de satisfação vai de 1 a 10."))]
    pub satisfaction_score: Option<i16>,
    #[validate(range(min = 1, max = 10, message = "A nota de efetividade vai de 1 a 10."))]
    pub effectiveness_score: Option<i16>,
}

// PUT /api/company/activities/{id}
#[utoipa::path(
    put,
    path = "/api/company/activities/{activity_id}",
    tag = "Company",
    params(
        ("activity_id" = Uuid, Path, description = "ID da Atividade"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    request_body = UpdateActivityPayload,
    responses(
        (status = 200, description = "Atividade atualizada", body = CompanyActivity),
        (status = 422, description = "Atividade concluída: só participação pode mudar")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_activity(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(activity_id): Path<Uuid>,
    Json(payload): Json<UpdateActivityPayload>,
) -> Result<Json<CompanyActivity>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity = app_state
        .company_service
        .update_activity(
            company.0,
            activity_id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.scheduled_date,
            payload.max_participants,
            payload.registered_participants,
            payload.attended_participants,
            payload.satisfaction_score,
            payload.effectiveness_score,
        )
        .await?;
    Ok(Json(activity))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionActivityPayload {
    #[schema(example = "concluida")]
    pub status: ActivityStatus,
    #[validate(range(min = 1, max = 10, message = "A nota de satisfação vai de 1 a 10."))]
    pub satisfaction_score: Option<i16>,
    #[validate(range(min = 1, max = 10, message = "A nota de efetividade vai de 1 a 10."))]
    pub effectiveness_score: Option<i16>,
}

// POST /api/company/activities/{id}/transition
#[utoipa::path(
    post,
    path = "/api/company/activities/{activity_id}/transition",
    tag = "Company",
    params(
        ("activity_id" = Uuid, Path, description = "ID da Atividade"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    request_body = TransitionActivityPayload,
    responses(
        (status = 200, description = "Status alterado", body = CompanyActivity),
        (status = 422, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn transition_activity(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(activity_id): Path<Uuid>,
    Json(payload): Json<TransitionActivityPayload>,
) -> Result<Json<CompanyActivity>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity = app_state
        .company_service
        .transition_activity(
            company.0,
            activity_id,
            payload.status,
            payload.satisfaction_score,
            payload.effectiveness_score,
        )
        .await?;
    Ok(Json(activity))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPayload {
    pub profile_id: Uuid,
}

// POST /api/company/activities/{id}/participants
#[utoipa::path(
    post,
    path = "/api/company/activities/{activity_id}/participants",
    tag = "Company",
    params(
        ("activity_id" = Uuid, Path, description = "ID da Atividade"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    request_body = ParticipantPayload,
    responses(
        (status = 201, description = "Participante registrado"),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_participant(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(activity_id): Path<Uuid>,
    Json(payload): Json<ParticipantPayload>,
) -> Result<StatusCode, AppError> {
    app_state
        .company_service
        .register_participant(company.0, activity_id, payload.profile_id)
        .await?;
    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePayload {
    pub profile_id: Uuid,
    pub attended: bool,
}

// PUT /api/company/activities/{id}/attendance
#[utoipa::path(
    put,
    path = "/api/company/activities/{activity_id}/attendance",
    tag = "Company",
    params(
        ("activity_id" = Uuid, Path, description = "ID da Atividade"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Presença registrada"),
        (status = 404, description = "Atividade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_attendance(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(activity_id): Path<Uuid>,
    Json(payload): Json<AttendancePayload>,
) -> Result<StatusCode, AppError> {
    app_state
        .company_service
        .mark_attendance(company.0, activity_id, payload.profile_id, payload.attended)
        .await?;
    Ok(StatusCode::OK)
}
