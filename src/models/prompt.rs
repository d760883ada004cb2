// src/models/prompt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Prompt gerenciado pelo admin. Invariante: no máximo uma linha com
// is_active = true na tabela inteira.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiPrompt {
    pub id: Uuid,
    #[schema(example = "insights-relatorio-v2")]
    pub name: String,
    pub content: String,
    // Incrementada a cada edição de conteúdo
    #[schema(example = 3)]
    pub version: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptPayload {
    #[validate(length(min = 1, message = "O nome do prompt é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O conteúdo do prompt é obrigatório."))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptPayload {
    #[validate(length(min = 1, message = "O conteúdo do prompt é obrigatório."))]
    pub content: String,
}
