// src/services/prompt_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::PromptRepository, models::prompt::AiPrompt};

/// O que fazer ao ativar um registro sob o invariante "no máximo um
/// ativo": alvo já ativo é um no-op (nada muda, nem a versão); caso
/// contrário desativa todos e ativa o alvo na mesma transação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPlan {
    AlreadyActive,
    DeactivateAllThenActivate,
}

pub fn plan_activation(target_is_active: bool) -> ActivationPlan {
    if target_is_active {
        ActivationPlan::AlreadyActive
    } else {
        ActivationPlan::DeactivateAllThenActivate
    }
}

#[derive(Clone)]
pub struct PromptService {
    repo: PromptRepository,
    pool: PgPool,
}

impl PromptService {
    pub fn new(repo: PromptRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_prompts(&self) -> Result<Vec<AiPrompt>, AppError> {
        self.repo.list().await
    }

    pub async fn create_prompt(&self, name: &str, content: &str) -> Result<AiPrompt, AppError> {
        self.repo.create(name, content).await
    }

    /// Editar o conteúdo incrementa a versão; ativação não passa por aqui.
    pub async fn update_prompt(&self, id: Uuid, content: &str) -> Result<AiPrompt, AppError> {
        self.repo.update_content(id, content).await
    }

    /// No máximo um prompt ativo. Desativar todos e ativar o alvo roda na
    /// mesma transação; ativar o que já está ativo é um no-op (a versão
    /// não muda).
    pub async fn set_active_prompt(&self, id: Uuid) -> Result<AiPrompt, AppError> {
        let mut tx = self.pool.begin().await?;

        let prompt = self
            .repo
            .find(&mut *tx, id)
            .await?
            .ok_or(AppError::PromptNotFound)?;

        match plan_activation(prompt.is_active) {
            ActivationPlan::AlreadyActive => {
                tx.commit().await?;
                Ok(prompt)
            }
            ActivationPlan::DeactivateAllThenActivate => {
                self.repo.deactivate_all(&mut *tx).await?;
                let prompt = self.repo.activate(&mut *tx, id).await?;

                tx.commit().await?;

                tracing::info!("Prompt '{}' (v{}) ativado", prompt.name, prompt.version);
                Ok(prompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn prompt(name: &str, version: i32, is_active: bool) -> AiPrompt {
        AiPrompt {
            id: Uuid::new_v4(),
            name: name.to_string(),
            content: "Gere os insights do relatório.".to_string(),
            version,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // Espelha o corpo da transação: desativar todos, ativar o alvo
    fn apply(rows: &mut [AiPrompt], target: usize) -> ActivationPlan {
        let plan = plan_activation(rows[target].is_active);
        if plan == ActivationPlan::DeactivateAllThenActivate {
            for row in rows.iter_mut() {
                row.is_active = false;
            }
            rows[target].is_active = true;
        }
        plan
    }

    #[test]
    fn alvo_ja_ativo_eh_noop() {
        assert_eq!(plan_activation(true), ActivationPlan::AlreadyActive);
        assert_eq!(plan_activation(false), ActivationPlan::DeactivateAllThenActivate);
    }

    #[test]
    fn ativar_duas_vezes_mantem_um_unico_ativo_e_a_versao() {
        let mut rows = vec![prompt("antigo", 5, true), prompt("novo", 2, false)];

        assert_eq!(apply(&mut rows, 1), ActivationPlan::DeactivateAllThenActivate);
        // A segunda chamada encontra o alvo já ativo e não escreve nada
        assert_eq!(apply(&mut rows, 1), ActivationPlan::AlreadyActive);

        let ativos: Vec<_> = rows.iter().filter(|r| r.is_active).collect();
        assert_eq!(ativos.len(), 1);
        assert_eq!(ativos[0].name, "novo");
        assert_eq!(ativos[0].version, 2);
    }
}
