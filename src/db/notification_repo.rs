// src/db/notification_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notification::{CompanyPsychologistLink, InviteStatus, PsychologistPatientLink},
};

// Linha crua de um convite pendente; o serviço acrescenta o `kind`
#[derive(Debug, FromRow)]
pub struct PendingInviteRow {
    pub id: Uuid,
    pub sender_name: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// As notificações não têm tabela própria: são os convites pendentes
// das duas tabelas de vínculo, materializados na leitura.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  1. EMPRESA -> PSICÓLOGO
    // =========================================================================

    // O status vem decidido pelo serviço: reenvio sobre um vínculo
    // recusado volta para 'pendente', um aceite não é desfeito
    pub async fn upsert_company_psychologist_invite(
        &self,
        company_id: Uuid,
        psychologist_id: Uuid,
        message: Option<&str>,
        status: InviteStatus,
    ) -> Result<CompanyPsychologistLink, AppError> {
        let link = sqlx::query_as::<_, CompanyPsychologistLink>(
            r#"
            INSERT INTO company_psychologists (company_id, psychologist_id, message, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_id, psychologist_id)
            DO UPDATE SET message = EXCLUDED.message, status = EXCLUDED.status, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(psychologist_id)
        .bind(message)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn find_company_psychologist_link(
        &self,
        company_id: Uuid,
        psychologist_id: Uuid,
    ) -> Result<Option<CompanyPsychologistLink>, AppError> {
        let link = sqlx::query_as::<_, CompanyPsychologistLink>(
            "SELECT * FROM company_psychologists WHERE company_id = $1 AND psychologist_id = $2",
        )
        .bind(company_id)
        .bind(psychologist_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn pending_for_psychologist(
        &self,
        psychologist_id: Uuid,
    ) -> Result<Vec<PendingInviteRow>, AppError> {
        let rows = sqlx::query_as::<_, PendingInviteRow>(
            r#"
            SELECT cp.id, c.name as sender_name, cp.message, cp.created_at
            FROM company_psychologists cp
            JOIN companies c ON cp.company_id = c.id
            WHERE cp.psychologist_id = $1 AND cp.status = 'pendente'
            ORDER BY cp.created_at DESC
            "#,
        )
        .bind(psychologist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_company_psychologist_invite(
        &self,
        id: Uuid,
    ) -> Result<Option<CompanyPsychologistLink>, AppError> {
        let link = sqlx::query_as::<_, CompanyPsychologistLink>(
            "SELECT * FROM company_psychologists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn set_company_psychologist_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: InviteStatus,
    ) -> Result<CompanyPsychologistLink, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, CompanyPsychologistLink>(
            r#"
            UPDATE company_psychologists SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::InviteNotFound)?;
        Ok(link)
    }

    // =========================================================================
    //  2. PSICÓLOGO -> PACIENTE
    // =========================================================================

    pub async fn upsert_psychologist_patient_invite(
        &self,
        psychologist_id: Uuid,
        profile_id: Uuid,
        message: Option<&str>,
        status: InviteStatus,
    ) -> Result<PsychologistPatientLink, AppError> {
        let link = sqlx::query_as::<_, PsychologistPatientLink>(
            r#"
            INSERT INTO psychologist_patients (psychologist_id, profile_id, message, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (psychologist_id, profile_id)
            DO UPDATE SET message = EXCLUDED.message, status = EXCLUDED.status, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(psychologist_id)
        .bind(profile_id)
        .bind(message)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn find_psychologist_patient_link(
        &self,
        psychologist_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<PsychologistPatientLink>, AppError> {
        let link = sqlx::query_as::<_, PsychologistPatientLink>(
            "SELECT * FROM psychologist_patients WHERE psychologist_id = $1 AND profile_id = $2",
        )
        .bind(psychologist_id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn pending_for_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<PendingInviteRow>, AppError> {
        let rows = sqlx::query_as::<_, PendingInviteRow>(
            r#"
            SELECT pp.id, psy.full_name as sender_name, pp.message, pp.created_at
            FROM psychologist_patients pp
            JOIN psychologists psy ON pp.psychologist_id = psy.id
            WHERE pp.profile_id = $1 AND pp.status = 'pendente'
            ORDER BY pp.created_at DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_psychologist_patient_invite(
        &self,
        id: Uuid,
    ) -> Result<Option<PsychologistPatientLink>, AppError> {
        let link = sqlx::query_as::<_, PsychologistPatientLink>(
            "SELECT * FROM psychologist_patients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn set_psychologist_patient_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: InviteStatus,
    ) -> Result<PsychologistPatientLink, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, PsychologistPatientLink>(
            r#"
            UPDATE psychologist_patients SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::InviteNotFound)?;
        Ok(link)
    }
}
