// src/handlers/notifications.rs

// Convites e notificações. A lista de notificações é o conjunto de
// convites pendentes do usuário autenticado.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, company::CompanyContext},
    models::notification::{CompanyPsychologistLink, Notification, PsychologistPatientLink},
};

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses(
        (status = 200, description = "Convites pendentes do usuário", body = [Notification])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(app_state.notification_service.pending_for_user(&user).await?))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitePsychologistPayload {
    pub psychologist_id: Uuid,
    #[schema(example = "Gostaríamos de contar com você no nosso programa.")]
    pub message: Option<String>,
}

// POST /api/company/invites/psychologists
#[utoipa::path(
    post,
    path = "/api/company/invites/psychologists",
    tag = "Notifications",
    request_body = InvitePsychologistPayload,
    responses(
        (status = 201, description = "Convite enviado", body = CompanyPsychologistLink),
        (status = 404, description = "Psicólogo não encontrado")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn invite_psychologist(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(payload): Json<InvitePsychologistPayload>,
) -> Result<impl IntoResponse, AppError> {
    let link = app_state
        .notification_service
        .invite_psychologist(company.0, payload.psychologist_id, payload.message.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitePatientPayload {
    pub profile_id: Uuid,
    pub message: Option<String>,
}

// POST /api/invites/patients
#[utoipa::path(
    post,
    path = "/api/invites/patients",
    tag = "Notifications",
    request_body = InvitePatientPayload,
    responses(
        (status = 201, description = "Convite enviado", body = PsychologistPatientLink),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn invite_patient(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<InvitePatientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let link = app_state
        .notification_service
        .invite_patient(user.id, payload.profile_id, payload.message.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondInvitePayload {
    pub accept: bool,
}

// POST /api/invites/company/{id}/respond
#[utoipa::path(
    post,
    path = "/api/invites/company/{invite_id}/respond",
    tag = "Notifications",
    params(("invite_id" = Uuid, Path, description = "ID do Convite")),
    request_body = RespondInvitePayload,
    responses(
        (status = 200, description = "Convite respondido", body = CompanyPsychologistLink),
        (status = 409, description = "Convite já respondido")
    ),
    security(("api_jwt" = []))
)]
pub async fn respond_company_invite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(invite_id): Path<Uuid>,
    Json(payload): Json<RespondInvitePayload>,
) -> Result<Json<CompanyPsychologistLink>, AppError> {
    let link = app_state
        .notification_service
        .respond_company_invite(&user, invite_id, payload.accept)
        .await?;
    Ok(Json(link))
}

// POST /api/invites/patient/{id}/respond
#[utoipa::path(
    post,
    path = "/api/invites/patient/{invite_id}/respond",
    tag = "Notifications",
    params(("invite_id" = Uuid, Path, description = "ID do Convite")),
    request_body = RespondInvitePayload,
    responses(
        (status = 200, description = "Convite respondido", body = PsychologistPatientLink),
        (status = 409, description = "Convite já respondido")
    ),
    security(("api_jwt" = []))
)]
pub async fn respond_patient_invite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(invite_id): Path<Uuid>,
    Json(payload): Json<RespondInvitePayload>,
) -> Result<Json<PsychologistPatientLink>, AppError> {
    let link = app_state
        .notification_service
        .respond_patient_invite(&user, invite_id, payload.accept)
        .await?;
    Ok(Json(link))
}
