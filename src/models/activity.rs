// src/models/activity.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Workshop,
    Palestra,
    Conversa,
    Intervencao,
    Treinamento,
    GrupoApoio,
    SessaoIndividual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Planejada,
    EmAndamento,
    Concluida,
    Cancelada,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Planejada => "planejada",
            ActivityStatus::EmAndamento => "em_andamento",
            ActivityStatus::Concluida => "concluida",
            ActivityStatus::Cancelada => "cancelada",
        }
    }

    /// Transições só andam para frente: planejada -> em_andamento/concluida/cancelada,
    /// em_andamento -> concluida/cancelada. Concluída e cancelada são terminais.
    pub fn can_transition(&self, to: ActivityStatus) -> bool {
        use ActivityStatus::*;
        matches!(
            (self, to),
            (Planejada, EmAndamento)
                | (Planejada, Concluida)
                | (Planejada, Cancelada)
                | (EmAndamento, Concluida)
                | (EmAndamento, Cancelada)
        )
    }

    /// Depois de concluída, só os números de participação podem mudar.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActivityStatus::Concluida | ActivityStatus::Cancelada)
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyActivity {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Workshop de Gestão do Estresse")]
    pub title: String,
    pub description: Option<String>,
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    pub scheduled_date: NaiveDate,
    pub max_participants: Option<i32>,
    pub registered_participants: i32,
    pub attended_participants: i32,
    // Notas de 1 a 10, preenchidas após a conclusão
    pub satisfaction_score: Option<i16>,
    pub effectiveness_score: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityParticipant {
    pub activity_id: Uuid,
    pub profile_id: Uuid,
    pub attended: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActivityStatus::*;

    #[test]
    fn transicoes_validas_so_para_frente() {
        assert!(Planejada.can_transition(EmAndamento));
        assert!(Planejada.can_transition(Concluida));
        assert!(Planejada.can_transition(Cancelada));
        assert!(EmAndamento.can_transition(Concluida));
        assert!(EmAndamento.can_transition(Cancelada));
    }

    #[test]
    fn estados_terminais_nao_transicionam() {
        for alvo in [Planejada, EmAndamento, Concluida, Cancelada] {
            assert!(!Concluida.can_transition(alvo));
            assert!(!Cancelada.can_transition(alvo));
        }
        assert!(!EmAndamento.can_transition(Planejada));
    }

    #[test]
    fn terminal_flag() {
        assert!(Concluida.is_terminal());
        assert!(Cancelada.is_terminal());
        assert!(!Planejada.is_terminal());
        assert!(!EmAndamento.is_terminal());
    }
}
