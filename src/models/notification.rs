// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invite_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Pendente,
    Aceito,
    Recusado,
}

// Vínculo empresa <-> psicólogo (nasce como convite pendente)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPsychologistLink {
    pub id: Uuid,
    pub company_id: Uuid,
    pub psychologist_id: Uuid,
    pub status: InviteStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Vínculo psicólogo <-> paciente (colaborador)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PsychologistPatientLink {
    pub id: Uuid,
    pub psychologist_id: Uuid,
    pub profile_id: Uuid,
    pub status: InviteStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CompanyPsychologist,
    PsychologistPatient,
}

// Notificação derivada: materializada na leitura a partir dos convites
// pendentes. Não existe tabela própria; responder o convite a remove
// do conjunto pendente.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    // id do vínculo subjacente
    pub id: Uuid,
    pub kind: NotificationKind,
    #[schema(example = "Clínica Calma")]
    pub sender_name: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
