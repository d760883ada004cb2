// src/db/report_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        activity::ActivityStatus,
        report::{ActivityTypeCount, ComplianceReport, ReportDraft, ReportMetrics, ReportType},
    },
};

// Linha intermediária das contagens por status
#[derive(Debug, FromRow)]
pub struct StatusCountRow {
    pub status: ActivityStatus,
    pub count: i64,
}

// Departamento ativo com a contagem de colaboradores (primeira query do
// agregador; os participantes vêm de uma segunda query por departamento)
#[derive(Debug, FromRow)]
pub struct DepartmentCountRow {
    pub id: Uuid,
    pub name: String,
    pub employee_count: i64,
}

// As queries brutas por trás do coletor de métricas + persistência
// dos relatórios de conformidade.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  1. CONTAGENS (MetricsCollector)
    // =========================================================================

    pub async fn count_employees<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_profiles WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn count_licensed_employees<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_profiles WHERE company_id = $1 AND license_status = 'ativa'",
        )
        .bind(company_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn count_active_departments<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM departments WHERE company_id = $1 AND is_active",
        )
        .bind(company_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    // Contagem de atividades agrupada por status dentro do período
    pub async fn activity_status_counts<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StatusCountRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, StatusCountRow>(
            r#"
            SELECT status, COUNT(*) as count
            FROM company_activities
            WHERE company_id = $1
              AND scheduled_date BETWEEN $2 AND $3
            GROUP BY status
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    // Versão sem recorte de período, usada pelo painel
    pub async fn activity_status_counts_all<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<Vec<StatusCountRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, StatusCountRow>(
            r#"
            SELECT status, COUNT(*) as count
            FROM company_activities
            WHERE company_id = $1
            GROUP BY status
            "#,
        )
        .bind(company_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn activity_type_counts<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityTypeCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ActivityTypeCount>(
            r#"
            SELECT activity_type, COUNT(*) as count
            FROM company_activities
            WHERE company_id = $1
              AND scheduled_date BETWEEN $2 AND $3
            GROUP BY activity_type
            ORDER BY count DESC
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn count_distinct_participants<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT ap.profile_id)
            FROM activity_participants ap
            JOIN company_activities a ON ap.activity_id = a.id
            WHERE a.company_id = $1
              AND a.scheduled_date BETWEEN $2 AND $3
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    // Versão sem recorte de período, usada pelo painel
    pub async fn count_distinct_participants_all<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT ap.profile_id)
            FROM activity_participants ap
            JOIN company_activities a ON ap.activity_id = a.id
            WHERE a.company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    // Média das notas de satisfação das atividades concluídas no período.
    // Sem dados retorna 0, nunca erro.
    pub async fn average_satisfaction<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let avg = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(AVG(satisfaction_score)::float8, 0)
            FROM company_activities
            WHERE company_id = $1
              AND status = 'concluida'
              AND satisfaction_score IS NOT NULL
              AND scheduled_date BETWEEN $2 AND $3
            "#,
        )
        .bind(company_id)
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;
        Ok(avg)
    }

    pub async fn average_satisfaction_all<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<f64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let avg = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(AVG(satisfaction_score)::float8, 0)
            FROM company_activities
            WHERE company_id = $1
              AND status = 'concluida'
              AND satisfaction_score IS NOT NULL
            "#,
        )
        .bind(company_id)
        .fetch_one(executor)
        .await?;
        Ok(avg)
    }

    // =========================================================================
    //  2. AGREGAÇÃO POR DEPARTAMENTO (DepartmentAggregator)
    // =========================================================================

    pub async fn active_departments_with_counts<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<Vec<DepartmentCountRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, DepartmentCountRow>(
            r#"
            SELECT d.id, d.name, COUNT(p.id) as employee_count
            FROM departments d
            LEFT JOIN user_profiles p ON p.department_id = d.id
            WHERE d.company_id = $1 AND d.is_active
            GROUP BY d.id, d.name
            ORDER BY d.name
            "#,
        )
        .bind(company_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn count_department_participants<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        department_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT ap.profile_id)
            FROM activity_participants ap
            JOIN company_activities a ON ap.activity_id = a.id
            JOIN user_profiles p ON ap.profile_id = p.id
            WHERE a.company_id = $1
              AND p.department_id = $2
              AND a.scheduled_date BETWEEN $3 AND $4
            "#,
        )
        .bind(company_id)
        .bind(department_id)
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn count_department_participants_all<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        department_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT ap.profile_id)
            FROM activity_participants ap
            JOIN company_activities a ON ap.activity_id = a.id
            JOIN user_profiles p ON ap.profile_id = p.id
            WHERE a.company_id = $1
              AND p.department_id = $2
            "#,
        )
        .bind(company_id)
        .bind(department_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    // =========================================================================
    //  3. RELATÓRIOS
    // =========================================================================

    pub async fn insert_report(
        &self,
        company_id: Uuid,
        report_type: ReportType,
        title: &str,
        draft: &ReportDraft,
        metrics: &ReportMetrics,
        insights: &[String],
        compliance_score: i32,
    ) -> Result<ComplianceReport, AppError> {
        let report = sqlx::query_as::<_, ComplianceReport>(
            r#"
            INSERT INTO compliance_reports
                (company_id, report_type, title, period_start, period_end,
                 metrics, insights, compliance_score, approver_name, approver_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(report_type)
        .bind(title)
        .bind(draft.period_start)
        .bind(draft.period_end)
        .bind(sqlx::types::Json(metrics))
        .bind(sqlx::types::Json(insights))
        .bind(compliance_score)
        .bind(&draft.approver_name)
        .bind(&draft.approver_email)
        .fetch_one(&self.pool)
        .await?;
        Ok(report)
    }

    pub async fn list_reports(&self, company_id: Uuid) -> Result<Vec<ComplianceReport>, AppError> {
        let reports = sqlx::query_as::<_, ComplianceReport>(
            "SELECT * FROM compliance_reports WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reports)
    }

    pub async fn find_report(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<ComplianceReport>, AppError> {
        let report = sqlx::query_as::<_, ComplianceReport>(
            "SELECT * FROM compliance_reports WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(report)
    }

    // Único campo mutável depois da criação: o back-fill da URL do PDF
    pub async fn set_pdf_url(
        &self,
        id: Uuid,
        company_id: Uuid,
        pdf_url: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE compliance_reports SET pdf_url = $3 WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .bind(pdf_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ReportNotFound);
        }
        Ok(())
    }
}
