// src/db/psychologist_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::company::Psychologist};

#[derive(Clone)]
pub struct PsychologistRepository {
    pool: PgPool,
}

impl PsychologistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Option<Uuid>,
        full_name: &str,
        crp: &str,
        email: &str,
    ) -> Result<Psychologist, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let psychologist = sqlx::query_as::<_, Psychologist>(
            r#"
            INSERT INTO psychologists (user_id, full_name, crp, email)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(crp)
        .bind(email)
        .fetch_one(executor)
        .await?;
        Ok(psychologist)
    }

    pub async fn list(&self) -> Result<Vec<Psychologist>, AppError> {
        let psychologists =
            sqlx::query_as::<_, Psychologist>("SELECT * FROM psychologists ORDER BY full_name")
                .fetch_all(&self.pool)
                .await?;
        Ok(psychologists)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Psychologist>, AppError> {
        let psychologist =
            sqlx::query_as::<_, Psychologist>("SELECT * FROM psychologists WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(psychologist)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Psychologist>, AppError> {
        let psychologist =
            sqlx::query_as::<_, Psychologist>("SELECT * FROM psychologists WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(psychologist)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Psychologist, AppError> {
        let psychologist = sqlx::query_as::<_, Psychologist>(
            r#"
            UPDATE psychologists SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::PsychologistNotFound)?;
        Ok(psychologist)
    }
}
