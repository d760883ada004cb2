// src/db/prompt_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::prompt::AiPrompt};

#[derive(Clone)]
pub struct PromptRepository {
    pool: PgPool,
}

impl PromptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<AiPrompt>, AppError> {
        let prompts =
            sqlx::query_as::<_, AiPrompt>("SELECT * FROM ai_prompts ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(prompts)
    }

    pub async fn find<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<AiPrompt>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prompt = sqlx::query_as::<_, AiPrompt>("SELECT * FROM ai_prompts WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(prompt)
    }

    pub async fn find_active(&self) -> Result<Option<AiPrompt>, AppError> {
        let prompt = sqlx::query_as::<_, AiPrompt>("SELECT * FROM ai_prompts WHERE is_active")
            .fetch_optional(&self.pool)
            .await?;
        Ok(prompt)
    }

    pub async fn create(&self, name: &str, content: &str) -> Result<AiPrompt, AppError> {
        let prompt = sqlx::query_as::<_, AiPrompt>(
            "INSERT INTO ai_prompts (name, content) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(prompt)
    }

    // Editar conteúdo incrementa a versão (monotônica)
    pub async fn update_content(&self, id: Uuid, content: &str) -> Result<AiPrompt, AppError> {
        let prompt = sqlx::query_as::<_, AiPrompt>(
            r#"
            UPDATE ai_prompts SET
                content = $2,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::PromptNotFound)?;
        Ok(prompt)
    }

    // Os dois passos abaixo rodam sempre dentro da mesma transação
    // (ver PromptService::set_active_prompt).

    pub async fn deactivate_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE ai_prompts SET is_active = FALSE, updated_at = NOW() WHERE is_active")
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    // Ativa sem mexer na versão: ativação não é edição de conteúdo
    pub async fn activate<'e, E>(&self, executor: E, id: Uuid) -> Result<AiPrompt, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prompt = sqlx::query_as::<_, AiPrompt>(
            r#"
            UPDATE ai_prompts SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::PromptNotFound)?;
        Ok(prompt)
    }
}
