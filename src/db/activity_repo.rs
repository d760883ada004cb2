// src/db/activity_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{ActivityStatus, ActivityType, CompanyActivity},
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        title: &str,
        description: Option<&str>,
        activity_type: ActivityType,
        scheduled_date: NaiveDate,
        max_participants: Option<i32>,
    ) -> Result<CompanyActivity, AppError> {
        let activity = sqlx::query_as::<_, CompanyActivity>(
            r#"
            INSERT INTO company_activities
                (company_id, title, description, activity_type, scheduled_date, max_participants)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(title)
        .bind(description)
        .bind(activity_type)
        .bind(scheduled_date)
        .bind(max_participants)
        .fetch_one(&self.pool)
        .await?;
        Ok(activity)
    }

    pub async fn list(&self, company_id: Uuid) -> Result<Vec<CompanyActivity>, AppError> {
        let activities = sqlx::query_as::<_, CompanyActivity>(
            "SELECT * FROM company_activities WHERE company_id = $1 ORDER BY scheduled_date DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }

    pub async fn find(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<CompanyActivity>, AppError> {
        let activity = sqlx::query_as::<_, CompanyActivity>(
            "SELECT * FROM company_activities WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(activity)
    }

    // Atualização completa: usada enquanto a atividade ainda não terminou
    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        scheduled_date: Option<NaiveDate>,
        max_participants: Option<i32>,
        registered_participants: Option<i32>,
        attended_participants: Option<i32>,
        satisfaction_score: Option<i16>,
        effectiveness_score: Option<i16>,
    ) -> Result<CompanyActivity, AppError> {
        let activity = sqlx::query_as::<_, CompanyActivity>(
            r#"
            UPDATE company_activities SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                scheduled_date = COALESCE($5, scheduled_date),
                max_participants = COALESCE($6, max_participants),
                registered_participants = COALESCE($7, registered_participants),
                attended_participants = COALESCE($8, attended_participants),
                satisfaction_score = COALESCE($9, satisfaction_score),
                effectiveness_score = COALESCE($10, effectiveness_score),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(title)
        .bind(description)
        .bind(scheduled_date)
        .bind(max_participants)
        .bind(registered_participants)
        .bind(attended_participants)
        .bind(satisfaction_score)
        .bind(effectiveness_score)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ActivityNotFound)?;
        Ok(activity)
    }

    // Atividade concluída só aceita ajuste dos números de participação
    pub async fn update_participation_only(
        &self,
        id: Uuid,
        company_id: Uuid,
        registered_participants: Option<i32>,
        attended_participants: Option<i32>,
    ) -> Result<CompanyActivity, AppError> {
        let activity = sqlx::query_as::<_, CompanyActivity>(
            r#"
            UPDATE company_activities SET
                registered_participants = COALESCE($3, registered_participants),
                attended_participants = COALESCE($4, attended_participants),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(registered_participants)
        .bind(attended_participants)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ActivityNotFound)?;
        Ok(activity)
    }

    // Na conclusão as notas podem vir junto (depois a atividade trava)
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        company_id: Uuid,
        status: ActivityStatus,
        satisfaction_score: Option<i16>,
        effectiveness_score: Option<i16>,
    ) -> Result<CompanyActivity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let activity = sqlx::query_as::<_, CompanyActivity>(
            r#"
            UPDATE company_activities SET
                status = $3,
                satisfaction_score = COALESCE($4, satisfaction_score),
                effectiveness_score = COALESCE($5, effectiveness_score),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(status)
        .bind(satisfaction_score)
        .bind(effectiveness_score)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ActivityNotFound)?;
        Ok(activity)
    }

    pub async fn add_participant(
        &self,
        activity_id: Uuid,
        profile_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO activity_participants (activity_id, profile_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(activity_id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn mark_attendance(
        &self,
        activity_id: Uuid,
        profile_id: Uuid,
        attended: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE activity_participants SET attended = $3
            WHERE activity_id = $1 AND profile_id = $2
            "#,
        )
        .bind(activity_id)
        .bind(profile_id)
        .bind(attended)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
