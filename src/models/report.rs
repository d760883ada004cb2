// src/models/report.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "report_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Lei14831,
    Nr1,
    Customizado,
}

impl ReportType {
    pub fn default_title(&self) -> &'static str {
        match self {
            ReportType::Lei14831 => "Relatório de Conformidade - Lei 14.831",
            ReportType::Nr1 => "Relatório de Conformidade - NR-1",
            ReportType::Customizado => "Relatório de Bem-Estar Corporativo",
        }
    }
}

// Os cinco passos do assistente de geração, sempre nesta ordem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Configuration,
    DataCollection,
    Evidence,
    AdditionalInfo,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Configuration,
        WizardStep::DataCollection,
        WizardStep::Evidence,
        WizardStep::AdditionalInfo,
        WizardStep::Review,
    ];

    pub fn next(&self) -> Option<WizardStep> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

// --- Snapshot de métricas ---

// As três estimativas de uso do app são heurísticas (colaboradores x constante),
// não valores medidos. O flag `estimated` deixa isso explícito no snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppUsageEstimates {
    pub meditation_hours: f64,
    pub conversation_sessions: f64,
    pub diary_entries: f64,
    pub estimated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypeCount {
    pub activity_type: crate::models::activity::ActivityType,
    pub count: i64,
}

// Snapshot desnormalizado gravado no relatório no momento da geração.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    pub total_employees: i64,
    pub total_activities: i64,
    pub completed_activities: i64,
    pub planned_activities: i64,
    pub in_progress_activities: i64,
    pub cancelled_activities: i64,
    pub activities_by_type: Vec<ActivityTypeCount>,
    pub distinct_participants: i64,
    // Percentuais inteiros 0..=100
    pub participation_rate: i64,
    pub engagement_rate: i64,
    // Média das notas 1-10 das atividades concluídas; 0.0 sem dados
    pub average_satisfaction: f64,
    pub app_usage: AppUsageEstimates,
    pub departments: Vec<DepartmentEngagement>,
}

// Engajamento por departamento ativo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentEngagement {
    pub department_id: Uuid,
    pub name: String,
    pub employee_count: i64,
    pub participant_count: i64,
    pub engagement_rate: i64,
}

// --- Linha persistida ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub report_type: ReportType,
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[schema(value_type = ReportMetrics)]
    pub metrics: sqlx::types::Json<ReportMetrics>,
    #[schema(value_type = Vec<String>)]
    pub insights: sqlx::types::Json<Vec<String>>,
    #[schema(example = 78)]
    pub compliance_score: i32,
    #[schema(example = "Maria Silva")]
    pub approver_name: String,
    #[schema(example = "maria@empresa.com")]
    pub approver_email: String,
    // Preenchido depois que o PDF é gerado e gravado
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Rascunho do assistente ---

// O que o front acumula nos cinco passos e envia no submit final.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub report_type: ReportType,
    pub title: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub evidence_notes: Option<String>,
    pub additional_info: Option<String>,
    #[validate(length(min = 1, message = "O nome do aprovador é obrigatório."))]
    pub approver_name: String,
    #[validate(email(message = "O e-mail do aprovador é inválido."))]
    pub approver_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_avanca_na_ordem_fixa() {
        assert_eq!(WizardStep::Configuration.next(), Some(WizardStep::DataCollection));
        assert_eq!(WizardStep::DataCollection.next(), Some(WizardStep::Evidence));
        assert_eq!(WizardStep::Evidence.next(), Some(WizardStep::AdditionalInfo));
        assert_eq!(WizardStep::AdditionalInfo.next(), Some(WizardStep::Review));
        assert_eq!(WizardStep::Review.next(), None);
    }

    #[test]
    fn titulo_padrao_por_tipo() {
        assert!(ReportType::Lei14831.default_title().contains("14.831"));
        assert!(ReportType::Nr1.default_title().contains("NR-1"));
    }
}
