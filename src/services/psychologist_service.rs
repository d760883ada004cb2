// src/services/psychologist_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError, db::PsychologistRepository, models::company::Psychologist,
};

#[derive(Clone)]
pub struct PsychologistService {
    repo: PsychologistRepository,
    pool: PgPool,
}

impl PsychologistService {
    pub fn new(repo: PsychologistRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Cadastro feito pelo admin da plataforma; o vínculo com um usuário
    /// autenticável é opcional e pode vir depois.
    pub async fn create_psychologist(
        &self,
        user_id: Option<Uuid>,
        full_name: &str,
        crp: &str,
        email: &str,
    ) -> Result<Psychologist, AppError> {
        self.repo.create(&self.pool, user_id, full_name, crp, email).await
    }

    pub async fn list_psychologists(&self) -> Result<Vec<Psychologist>, AppError> {
        self.repo.list().await
    }

    pub async fn get_psychologist(&self, id: Uuid) -> Result<Psychologist, AppError> {
        self.repo.find(id).await?.ok_or(AppError::PsychologistNotFound)
    }

    pub async fn update_psychologist(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Psychologist, AppError> {
        self.repo.update(id, full_name, email, is_active).await
    }
}
