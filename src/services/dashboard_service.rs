// src/services/dashboard_service.rs

// O painel da empresa: agregados medidos no banco, sem valores
// simulados. Mesmas queries brutas do coletor de métricas, sem o
// recorte de período.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::{
        activity::ActivityStatus,
        dashboard::{CompanyDashboardSummary, DepartmentDashboard},
        report::DepartmentEngagement,
    },
    services::metrics_service::percentage,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: ReportRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(repo: ReportRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Resumo geral da empresa, lido numa única transação.
    pub async fn company_summary(
        &self,
        company_id: Uuid,
    ) -> Result<CompanyDashboardSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_employees = self.repo.count_employees(&mut *tx, company_id).await?;
        let licensed_employees = self.repo.count_licensed_employees(&mut *tx, company_id).await?;
        let active_departments = self.repo.count_active_departments(&mut *tx, company_id).await?;

        let status_counts = self
            .repo
            .activity_status_counts_all(&mut *tx, company_id)
            .await?;
        let mut planned = 0;
        let mut in_progress = 0;
        let mut completed = 0;
        for row in &status_counts {
            match row.status {
                ActivityStatus::Planejada => planned = row.count,
                ActivityStatus::EmAndamento => in_progress = row.count,
                ActivityStatus::Concluida => completed = row.count,
                ActivityStatus::Cancelada => {}
            }
        }

        let distinct_participants = self
            .repo
            .count_distinct_participants_all(&mut *tx, company_id)
            .await?;
        let average_satisfaction = self.repo.average_satisfaction_all(&mut *tx, company_id).await?;

        tx.commit().await?;

        Ok(CompanyDashboardSummary {
            total_employees,
            licensed_employees,
            active_departments,
            planned_activities: planned,
            in_progress_activities: in_progress,
            completed_activities: completed,
            engagement_rate: percentage(distinct_participants, total_employees),
            average_satisfaction,
        })
    }

    /// Engajamento por departamento ativo (mesma forma usada no
    /// relatório de conformidade).
    pub async fn department_dashboard(
        &self,
        company_id: Uuid,
    ) -> Result<DepartmentDashboard, AppError> {
        let mut tx = self.pool.begin().await?;

        let dept_rows = self
            .repo
            .active_departments_with_counts(&mut *tx, company_id)
            .await?;

        let mut departments = Vec::with_capacity(dept_rows.len());
        for row in dept_rows {
            let participant_count = if row.employee_count > 0 {
                self.repo
                    .count_department_participants_all(&mut *tx, company_id, row.id)
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

        Ok(DepartmentDashboard { departments })
    }
}
