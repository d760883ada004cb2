// src/services/company_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{cnpj, error::AppError},
    db::{ActivityRepository, CompanyRepository},
    models::{
        activity::{ActivityStatus, ActivityType, CompanyActivity},
        company::{Company, Department, License, LicenseStatus, UserProfile},
    },
    services::prompt_service::{plan_activation, ActivationPlan},
};

#[derive(Clone)]
pub struct CompanyService {
    company_repo: CompanyRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl CompanyService {
    pub fn new(
        company_repo: CompanyRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self { company_repo, activity_repo, pool }
    }

    // =========================================================================
    //  1. EMPRESAS (admin)
    // =========================================================================

    /// Cria a empresa e, na mesma transação, registra o usuário
    /// administrador da conta (se informado).
    pub async fn create_company(
        &self,
        name: &str,
        cnpj_input: &str,
        contact_email: &str,
        billing_email: Option<&str>,
        owner_user_id: Option<Uuid>,
    ) -> Result<Company, AppError> {
        let digits = cnpj::strip_cnpj(cnpj_input);
        if !cnpj::is_complete_cnpj(&digits) {
            let mut errors = validator::ValidationErrors::new();
            let mut err = validator::ValidationError::new("cnpj");
            err.message = Some("O CNPJ deve ter 14 dígitos.".into());
            errors.add("cnpj", err);
            return Err(AppError::ValidationError(errors));
        }

        let mut tx = self.pool.begin().await?;

        let company = self
            .company_repo
            .create_company(&mut *tx, name, &digits, contact_email, billing_email)
            .await?;

        if let Some(user_id) = owner_user_id {
            self.company_repo
                .add_company_admin(&mut *tx, company.id, user_id)
                .await?;
        }

        tx.commit().await?;

        Ok(mask_company(company))
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let companies = self.company_repo.list_companies().await?;
        Ok(companies.into_iter().map(mask_company).collect())
    }

    pub async fn get_company(&self, id: Uuid) -> Result<Company, AppError> {
        let company = self
            .company_repo
            .find_company(id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;
        Ok(mask_company(company))
    }

    pub async fn update_company(
        &self,
        id: Uuid,
        name: Option<&str>,
        contact_email: Option<&str>,
        billing_email: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Company, AppError> {
        let company = self
            .company_repo
            .update_company(id, name, contact_email, billing_email, is_active)
            .await?;
        Ok(mask_company(company))
    }

    // =========================================================================
    //  2. DEPARTAMENTOS
    // =========================================================================

    pub async fn create_department(
        &self,
        company_id: Uuid,
        name: &str,
    ) -> Result<Department, AppError> {
        self.company_repo
            .create_department(&self.pool, company_id, name)
            .await
    }

    pub async fn list_departments(&self, company_id: Uuid) -> Result<Vec<Department>, AppError> {
        self.company_repo.list_departments(company_id).await
    }

    pub async fn update_department(
        &self,
        id: Uuid,
        company_id: Uuid,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Department, AppError> {
        self.company_repo
            .update_department(id, company_id, name, is_active)
            .await
    }

    /// Conta primeiro; com colaboradores vinculados o DELETE nem é emitido.
    pub async fn delete_department(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.company_repo
            .find_department(id, company_id)
            .await?
            .ok_or(AppError::DepartmentNotFound)?;

        let employee_count = self.company_repo.count_department_employees(id).await?;
        ensure_department_deletable(employee_count)?;

        self.company_repo.delete_department(id, company_id).await
    }

    // =========================================================================
    //  3. COLABORADORES
    // =========================================================================

    pub async fn list_employees(&self, company_id: Uuid) -> Result<Vec<UserProfile>, AppError> {
        self.company_repo.list_company_profiles(company_id).await
    }

    pub async fn link_employee(
        &self,
        company_id: Uuid,
        profile_id: Uuid,
        department_id: Option<Uuid>,
    ) -> Result<UserProfile, AppError> {
        // Departamento informado precisa pertencer à empresa
        if let Some(dept_id) = department_id {
            self.company_repo
                .find_department(dept_id, company_id)
                .await?
                .ok_or(AppError::DepartmentNotFound)?;
        }

        self.company_repo
            .link_profile_to_company(profile_id, company_id, department_id)
            .await
    }

    pub async fn unlink_employee(
        &self,
        company_id: Uuid,
        profile_id: Uuid,
    ) -> Result<UserProfile, AppError> {
        self.company_repo.unlink_profile(profile_id, company_id).await
    }

    pub async fn set_employee_license_status(
        &self,
        company_id: Uuid,
        profile_id: Uuid,
        status: LicenseStatus,
    ) -> Result<UserProfile, AppError> {
        self.company_repo
            .set_profile_license_status(profile_id, company_id, status)
            .await
    }

    // =========================================================================
    //  4. LICENÇAS
    // =========================================================================

    pub async fn create_license(
        &self,
        company_id: Uuid,
        plan_name: &str,
        monthly_fee: Decimal,
        seats: i32,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
    ) -> Result<License, AppError> {
        self.company_repo
            .create_license(&self.pool, company_id, plan_name, monthly_fee, seats, starts_on, ends_on)
            .await
    }

    pub async fn list_licenses(&self, company_id: Uuid) -> Result<Vec<License>, AppError> {
        self.company_repo.list_licenses(company_id).await
    }

    /// No máximo uma licença ativa por empresa: desativa todas e ativa a
    /// alvo dentro da mesma transação.
    pub async fn activate_license(
        &self,
        company_id: Uuid,
        license_id: Uuid,
    ) -> Result<License, AppError> {
        let current = self
            .company_repo
            .find_license(license_id, company_id)
            .await?
            .ok_or(AppError::LicenseNotFound)?;

        // Já ativa: nada a fazer (idempotente)
        if plan_activation(current.is_active) == ActivationPlan::AlreadyActive {
            return Ok(current);
        }

        let mut tx = self.pool.begin().await?;

        self.company_repo
            .deactivate_company_licenses(&mut *tx, company_id)
            .await?;
        let license = self
            .company_repo
            .activate_license(&mut *tx, license_id, company_id)
            .await?;

        tx.commit().await?;

        Ok(license)
    }

    // =========================================================================
    //  5. ATIVIDADES
    // =========================================================================

    pub async fn create_activity(
        &self,
        company_id: Uuid,
        title: &str,
        description: Option<&str>,
        activity_type: ActivityType,
        scheduled_date: NaiveDate,
        max_participants: Option<i32>,
    ) -> Result<CompanyActivity, AppError> {
        self.activity_repo
            .create(company_id, title, description, activity_type, scheduled_date, max_participants)
            .await
    }

    pub async fn list_activities(&self, company_id: Uuid) -> Result<Vec<CompanyActivity>, AppError> {
        self.activity_repo.list(company_id).await
    }

    /// Edição respeita o estado: atividade concluída só aceita ajuste dos
    /// números de participação.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_activity(
        &self,
        company_id: Uuid,
        activity_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        scheduled_date: Option<NaiveDate>,
        max_participants: Option<i32>,
        registered_participants: Option<i32>,
        attended_participants: Option<i32>,
        satisfaction_score: Option<i16>,
        effectiveness_score: Option<i16>,
    ) -> Result<CompanyActivity, AppError> {
        let activity = self
            .activity_repo
            .find(activity_id, company_id)
            .await?
            .ok_or(AppError::ActivityNotFound)?;

        if activity.status == ActivityStatus::Concluida {
            let touches_locked_fields = title.is_some()
                || description.is_some()
                || scheduled_date.is_some()
                || max_participants.is_some()
                || satisfaction_score.is_some()
                || effectiveness_score.is_some();
            if touches_locked_fields {
                return Err(AppError::ActivityLocked);
            }
            return self
                .activity_repo
                .update_participation_only(
                    activity_id,
                    company_id,
                    registered_participants,
                    attended_participants,
                )
                .await;
        }

        self.activity_repo
            .update(
                activity_id,
                company_id,
                title,
                description,
                scheduled_date,
                max_participants,
                registered_participants,
                attended_participants,
                satisfaction_score,
                effectiveness_score,
            )
            .await
    }

    /// Transições só andam para frente; as notas podem vir junto com a
    /// conclusão.
    pub async fn transition_activity(
        &self,
        company_id: Uuid,
        activity_id: Uuid,
        to: ActivityStatus,
        satisfaction_score: Option<i16>,
        effectiveness_score: Option<i16>,
    ) -> Result<CompanyActivity, AppError> {
        let activity = self
            .activity_repo
            .find(activity_id, company_id)
            .await?
            .ok_or(AppError::ActivityNotFound)?;

        // Concluída/cancelada são terminais: nenhuma transição sai delas
        if activity.status.is_terminal() || !activity.status.can_transition(to) {
            return Err(AppError::InvalidStatusTransition {
                from: activity.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        self.activity_repo
            .set_status(
                &self.pool,
                activity_id,
                company_id,
                to,
                satisfaction_score,
                effectiveness_score,
            )
            .await
    }

    pub async fn register_participant(
        &self,
        company_id: Uuid,
        activity_id: Uuid,
        profile_id: Uuid,
    ) -> Result<(), AppError> {
        self.activity_repo
            .find(activity_id, company_id)
            .await?
            .ok_or(AppError::ActivityNotFound)?;
        self.activity_repo.add_participant(activity_id, profile_id).await
    }

    pub async fn mark_attendance(
        &self,
        company_id: Uuid,
        activity_id: Uuid,
        profile_id: Uuid,
        attended: bool,
    ) -> Result<(), AppError> {
        self.activity_repo
            .find(activity_id, company_id)
            .await?
            .ok_or(AppError::ActivityNotFound)?;
        self.activity_repo
            .mark_attendance(activity_id, profile_id, attended)
            .await
    }
}

/// A decisão pura por trás da recusa de exclusão.
pub fn ensure_department_deletable(employee_count: i64) -> Result<(), AppError> {
    if employee_count > 0 {
        return Err(AppError::DepartmentHasEmployees(employee_count));
    }
    Ok(())
}

// CNPJ sai mascarado da API; a coluna guarda só os dígitos
fn mask_company(mut company: Company) -> Company {
    company.cnpj = cnpj::format_cnpj(&company.cnpj);
    company
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departamento_com_colaboradores_nao_pode_ser_excluido() {
        // Cenário "Vendas com 3 vinculados": a recusa acontece antes de
        // qualquer DELETE
        let err = ensure_department_deletable(3).unwrap_err();
        match err {
            AppError::DepartmentHasEmployees(n) => assert_eq!(n, 3),
            other => panic!("erro inesperado: {:?}", other),
        }
    }

    #[test]
    fn departamento_vazio_pode_ser_excluido() {
        assert!(ensure_department_deletable(0).is_ok());
    }

    #[test]
    fn reativar_licenca_ja_ativa_nao_abre_transacao() {
        // A licença ativa sai antes do begin(); só a inativa passa pelo
        // desativa-todas-e-ativa
        assert_eq!(plan_activation(true), ActivationPlan::AlreadyActive);
        assert_eq!(plan_activation(false), ActivationPlan::DeactivateAllThenActivate);
    }
}
