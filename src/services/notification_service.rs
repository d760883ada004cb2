// src/services/notification_service.rs

// Convites e notificações. Notificação não tem tabela própria: é o
// conjunto de convites pendentes do usuário, montado na leitura.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, NotificationRepository, PsychologistRepository},
    models::{
        auth::{User, UserRole},
        notification::{
            CompanyPsychologistLink, InviteStatus, Notification, NotificationKind,
            PsychologistPatientLink,
        },
    },
};

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    company_repo: CompanyRepository,
    psychologist_repo: PsychologistRepository,
    pool: sqlx::PgPool,
}

impl NotificationService {
    pub fn new(
        repo: NotificationRepository,
        company_repo: CompanyRepository,
        psychologist_repo: PsychologistRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self { repo, company_repo, psychologist_repo, pool }
    }

    // =========================================================================
    //  1. CRIAÇÃO DE CONVITES
    // =========================================================================

    /// Empresa convida um psicólogo. Reenviar atualiza a mensagem do
    /// convite existente em vez de duplicar o vínculo; um convite
    /// recusado volta para a fila pendente.
    pub async fn invite_psychologist(
        &self,
        company_id: Uuid,
        psychologist_id: Uuid,
        message: Option<&str>,
    ) -> Result<CompanyPsychologistLink, AppError> {
        self.psychologist_repo
            .find(psychologist_id)
            .await?
            .ok_or(AppError::PsychologistNotFound)?;

        let existing = self
            .repo
            .find_company_psychologist_link(company_id, psychologist_id)
            .await?;
        let status = resend_status(existing.map(|l| l.status));

        self.repo
            .upsert_company_psychologist_invite(company_id, psychologist_id, message, status)
            .await
    }

    /// Psicólogo convida um colaborador para acompanhamento.
    pub async fn invite_patient(
        &self,
        psychologist_user_id: Uuid,
        profile_id: Uuid,
        message: Option<&str>,
    ) -> Result<PsychologistPatientLink, AppError> {
        let psychologist = self
            .psychologist_repo
            .find_by_user(psychologist_user_id)
            .await?
            .ok_or(AppError::PsychologistNotFound)?;

        self.company_repo
            .find_profile(profile_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;

        let existing = self
            .repo
            .find_psychologist_patient_link(psychologist.id, profile_id)
            .await?;
        let status = resend_status(existing.map(|l| l.status));

        self.repo
            .upsert_psychologist_patient_invite(psychologist.id, profile_id, message, status)
            .await
    }

    // =========================================================================
    //  2. LEITURA
    // =========================================================================

    /// Os convites pendentes do usuário, pelo papel dele: psicólogos
    /// recebem convites de empresas, colaboradores recebem convites de
    /// psicólogos.
    pub async fn pending_for_user(&self, user: &User) -> Result<Vec<Notification>, AppError> {
        match user.role {
            UserRole::Psychologist => {
                let psychologist = self
                    .psychologist_repo
                    .find_by_user(user.id)
                    .await?
                    .ok_or(AppError::PsychologistNotFound)?;
                let rows = self.repo.pending_for_psychologist(psychologist.id).await?;
                Ok(rows
                    .into_iter()
                    .map(|r| Notification {
                        id: r.id,
                        kind: NotificationKind::CompanyPsychologist,
                        sender_name: r.sender_name,
                        message: r.message,
                        created_at: r.created_at,
                    })
                    .collect())
            }
            UserRole::Employee | UserRole::Company => {
                let profile = self
                    .company_repo
                    .find_profile_by_user(user.id)
                    .await?
                    .ok_or(AppError::ProfileNotFound)?;
                let rows = self.repo.pending_for_profile(profile.id).await?;
                Ok(rows
                    .into_iter()
                    .map(|r| Notification {
                        id: r.id,
                        kind: NotificationKind::PsychologistPatient,
                        sender_name: r.sender_name,
                        message: r.message,
                        created_at: r.created_at,
                    })
                    .collect())
            }
            UserRole::Admin => Ok(Vec::new()),
        }
    }

    // =========================================================================
    //  3. RESPOSTA
    // =========================================================================

    /// Só o psicólogo convidado responde, e só enquanto o convite está
    /// pendente.
    pub async fn respond_company_invite(
        &self,
        user: &User,
        invite_id: Uuid,
        accept: bool,
    ) -> Result<CompanyPsychologistLink, AppError> {
        let psychologist = self
            .psychologist_repo
            .find_by_user(user.id)
            .await?
            .ok_or(AppError::PsychologistNotFound)?;

        let invite = self
            .repo
            .find_company_psychologist_invite(invite_id)
            .await?
            .ok_or(AppError::InviteNotFound)?;

        if invite.psychologist_id != psychologist.id {
            return Err(AppError::InviteNotFound);
        }
        if invite.status != InviteStatus::Pendente {
            return Err(AppError::InviteAlreadyHandled);
        }

        let status = if accept { InviteStatus::Aceito } else { InviteStatus::Recusado };
        self.repo
            .set_company_psychologist_status(&self.pool, invite_id, status)
            .await
    }

    /// Resposta do colaborador ao convite de acompanhamento.
    pub async fn respond_patient_invite(
        &self,
        user: &User,
        invite_id: Uuid,
        accept: bool,
    ) -> Result<PsychologistPatientLink, AppError> {
        let profile = self
            .company_repo
            .find_profile_by_user(user.id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;

        let invite = self
            .repo
            .find_psychologist_patient_invite(invite_id)
            .await?
            .ok_or(AppError::InviteNotFound)?;

        if invite.profile_id != profile.id {
            return Err(AppError::InviteNotFound);
        }
        if invite.status != InviteStatus::Pendente {
            return Err(AppError::InviteAlreadyHandled);
        }

        let status = if accept { InviteStatus::Aceito } else { InviteStatus::Recusado };
        self.repo
            .set_psychologist_patient_status(&self.pool, invite_id, status)
            .await
    }
}

/// Status do vínculo após um reenvio de convite: quem recusou volta
/// para a fila pendente; um aceite não é desfeito.
pub fn resend_status(current: Option<InviteStatus>) -> InviteStatus {
    match current {
        Some(InviteStatus::Aceito) => InviteStatus::Aceito,
        _ => InviteStatus::Pendente,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convite_recusado_volta_a_pendente_no_reenvio() {
        // Sem isso o psicólogo que recusou uma vez nunca mais veria o
        // convite: a linha ficava 'recusado' fora do conjunto pendente
        assert_eq!(resend_status(Some(InviteStatus::Recusado)), InviteStatus::Pendente);
    }

    #[test]
    fn reenvio_nao_desfaz_um_aceite() {
        assert_eq!(resend_status(Some(InviteStatus::Aceito)), InviteStatus::Aceito);
    }

    #[test]
    fn convite_novo_ou_pendente_fica_pendente() {
        assert_eq!(resend_status(None), InviteStatus::Pendente);
        assert_eq!(resend_status(Some(InviteStatus::Pendente)), InviteStatus::Pendente);
    }
}
