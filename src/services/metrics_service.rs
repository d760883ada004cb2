// src/services/metrics_service.rs

// O coletor de métricas do relatório: contagens reais vindas do banco,
// mais três estimativas heurísticas de uso do app (colaboradores x
// constante), sempre marcadas como estimadas no snapshot.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::{
        activity::ActivityStatus,
        report::{AppUsageEstimates, DepartmentEngagement, ReportMetrics},
    },
};

// Constantes heurísticas: não são valores medidos
const AVG_MEDITATION_HOURS_PER_EMPLOYEE: f64 = 3.5;
const AVG_CONVERSATION_SESSIONS_PER_EMPLOYEE: f64 = 2.0;
const AVG_DIARY_ENTRIES_PER_EMPLOYEE: f64 = 4.0;

/// Percentual inteiro arredondado; 0 quando o denominador é 0.
pub fn percentage(part: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as i64
}

#[derive(Clone)]
pub struct MetricsService {
    repo: ReportRepository,
    pool: PgPool,
}

impl MetricsService {
    pub fn new(repo: ReportRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Coleta o snapshot completo dentro de uma transação (leitura
    /// consistente). Ausência de dados produz campos zerados, nunca erro.
    pub async fn collect(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReportMetrics, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_employees = self.repo.count_employees(&mut *tx, company_id).await?;

        let status_counts = self
            .repo
            .activity_status_counts(&mut *tx, company_id, start, end)
            .await?;
        let mut completed = 0;
        let mut planned = 0;
        let mut in_progress = 0;
        let mut cancelled = 0;
        for row in &status_counts {
            match row.status {
                ActivityStatus::Concluida => completed = row.count,
                ActivityStatus::Planejada => planned = row.count,
                ActivityStatus::EmAndamento => in_progress = row.count,
                ActivityStatus::Cancelada => cancelled = row.count,
            }
        }

        let activities_by_type = self
            .repo
            .activity_type_counts(&mut *tx, company_id, start, end)
            .await?;

        let distinct_participants = self
            .repo
            .count_distinct_participants(&mut *tx, company_id, start, end)
            .await?;

        let average_satisfaction = self
            .repo
            .average_satisfaction(&mut *tx, company_id, start, end)
            .await?;

        // Agregação por departamento: primeira query traz os departamentos
        // ativos com a contagem de colaboradores; a segunda conta os
        // participantes de cada um.
        let dept_rows = self
            .repo
            .active_departments_with_counts(&mut *tx, company_id)
            .await?;

        let mut departments = Vec::with_capacity(dept_rows.len());
        for row in dept_rows {
            let participant_count = if row.employee_count > 0 {
                self.repo
                    .count_department_participants(&mut *tx, company_id, row.id, start, end)
                    .await?
            } else {
                0
            };

            departments.push(DepartmentEngagement {
                department_id: row.id,
                name: row.name,
                employee_count: row.employee_count,
                participant_count,
                engagement_rate: percentage(participant_count, row.employee_count),
            });
        }

        tx.commit().await?;

        let participation_rate = percentage(distinct_participants, total_employees);

        // Engajamento da empresa: participantes / colaboradores dos
        // departamentos ativos (colaborador sem departamento não entra)
        let dept_employees: i64 = departments.iter().map(|d| d.employee_count).sum();
        let dept_participants: i64 = departments.iter().map(|d| d.participant_count).sum();
        let engagement_rate = percentage(dept_participants, dept_employees);

        let total_activities = completed + planned + in_progress + cancelled;

        Ok(ReportMetrics {
            total_employees,
            total_activities,
            completed_activities: completed,
            planned_activities: planned,
            in_progress_activities: in_progress,
            cancelled_activities: cancelled,
            activities_by_type,
            distinct_participants,
            participation_rate,
            engagement_rate,
            average_satisfaction,
            app_usage: estimate_app_usage(total_employees),
            departments,
        })
    }
}

/// Estimativas proporcionais de uso do app. Heurísticas declaradas:
/// o flag `estimated` acompanha o snapshot até o PDF.
pub fn estimate_app_usage(employee_count: i64) -> AppUsageEstimates {
    let n = employee_count.max(0) as f64;
    AppUsageEstimates {
        meditation_hours: n * AVG_MEDITATION_HOURS_PER_EMPLOYEE,
        conversation_sessions: n * AVG_CONVERSATION_SESSIONS_PER_EMPLOYEE,
        diary_entries: n * AVG_DIARY_ENTRIES_PER_EMPLOYEE,
        estimated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentual_com_denominador_zero_eh_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(10, 0), 0);
        assert_eq!(percentage(5, -1), 0);
    }

    #[test]
    fn percentual_arredonda() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn estimativas_sao_proporcionais_e_marcadas() {
        let usage = estimate_app_usage(100);
        assert_eq!(usage.meditation_hours, 350.0);
        assert_eq!(usage.conversation_sessions, 200.0);
        assert_eq!(usage.diary_entries, 400.0);
        assert!(usage.estimated);
    }

    #[test]
    fn estimativas_sem_colaboradores_sao_zero() {
        let usage = estimate_app_usage(0);
        assert_eq!(usage.meditation_hours, 0.0);
        assert_eq!(usage.conversation_sessions, 0.0);
        assert_eq!(usage.diary_entries, 0.0);
    }
}
