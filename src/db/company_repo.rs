// src/db/company_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::company::{Company, Department, License, LicenseStatus, UserProfile},
};

// Tudo que é escopado pela empresa: cadastro, departamentos,
// colaboradores (user_profiles) e licenças.
#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  1. EMPRESAS
    // =========================================================================

    pub async fn create_company<'e, E>(
        &self,
        executor: E,
        name: &str,
        cnpj: &str,
        contact_email: &str,
        billing_email: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, cnpj, contact_email, billing_email)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(cnpj)
        .bind(contact_email)
        .bind(billing_email)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CnpjAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let companies =
            sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(companies)
    }

    pub async fn find_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn update_company(
        &self,
        id: Uuid,
        name: Option<&str>,
        contact_email: Option<&str>,
        billing_email: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                billing_email = COALESCE($4, billing_email),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(contact_email)
        .bind(billing_email)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::CompanyNotFound)?;
        Ok(company)
    }

    pub async fn is_company_admin(
        &self,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM company_admins WHERE company_id = $1 AND user_id = $2",
        )
        .bind(company_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn add_company_admin<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO company_admins (company_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(company_id)
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // =========================================================================
    //  2. DEPARTAMENTOS
    // =========================================================================

    pub async fn create_department<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        name: &str,
    ) -> Result<Department, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (company_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(company_id)
        .bind(name)
        .fetch_one(executor)
        .await?;
        Ok(department)
    }

    pub async fn list_departments(&self, company_id: Uuid) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE company_id = $1 ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    pub async fn find_department(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(department)
    }

    pub async fn update_department(
        &self,
        id: Uuid,
        company_id: Uuid,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments SET
                name = COALESCE($3, name),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(name)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::DepartmentNotFound)?;
        Ok(department)
    }

    // A regra "não excluir departamento com colaboradores" é checada
    // na aplicação contando primeiro; este é o count.
    pub async fn count_department_employees(
        &self,
        department_id: Uuid,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_profiles WHERE department_id = $1",
        )
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn delete_department(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::DepartmentNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  3. COLABORADORES (user_profiles)
    // =========================================================================

    pub async fn create_profile<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<UserProfile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, full_name, email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .fetch_one(executor)
        .await?;
        Ok(profile)
    }

    pub async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let profile =
            sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    pub async fn find_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, AppError> {
        let profile =
            sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    pub async fn list_company_profiles(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<UserProfile>, AppError> {
        let profiles = sqlx::query_as::<_, UserProfile>(
            "SELECT * FROM user_profiles WHERE company_id = $1 ORDER BY full_name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }

    // Vincula o colaborador à empresa (e opcionalmente a um departamento)
    pub async fn link_profile_to_company(
        &self,
        profile_id: Uuid,
        company_id: Uuid,
        department_id: Option<Uuid>,
    ) -> Result<UserProfile, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profiles SET
                company_id = $2,
                department_id = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(company_id)
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ProfileNotFound)?;
        Ok(profile)
    }

    // Desvincula: limpa empresa, departamento e volta a licença para pendente
    pub async fn unlink_profile(
        &self,
        profile_id: Uuid,
        company_id: Uuid,
    ) -> Result<UserProfile, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profiles SET
                company_id = NULL,
                department_id = NULL,
                license_status = 'pendente',
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ProfileNotFound)?;
        Ok(profile)
    }

    pub async fn set_profile_license_status(
        &self,
        profile_id: Uuid,
        company_id: Uuid,
        status: LicenseStatus,
    ) -> Result<UserProfile, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profiles SET
                license_status = $3,
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(company_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ProfileNotFound)?;
        Ok(profile)
    }

    // =========================================================================
    //  4. LICENÇAS
    // =========================================================================

    pub async fn create_license<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        plan_name: &str,
        monthly_fee: rust_decimal::Decimal,
        seats: i32,
        starts_on: chrono::NaiveDate,
        ends_on: Option<chrono::NaiveDate>,
    ) -> Result<License, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let license = sqlx::query_as::<_, License>(
            r#"
            INSERT INTO licenses (company_id, plan_name, monthly_fee, seats, starts_on, ends_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(plan_name)
        .bind(monthly_fee)
        .bind(seats)
        .bind(starts_on)
        .bind(ends_on)
        .fetch_one(executor)
        .await?;
        Ok(license)
    }

    pub async fn list_licenses(&self, company_id: Uuid) -> Result<Vec<License>, AppError> {
        let licenses = sqlx::query_as::<_, License>(
            "SELECT * FROM licenses WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(licenses)
    }

    pub async fn find_license(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<License>, AppError> {
        let license = sqlx::query_as::<_, License>(
            "SELECT * FROM licenses WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(license)
    }

    // Os dois passos abaixo rodam sempre dentro da mesma transação
    // (ver CompanyService::activate_license).

    pub async fn deactivate_company_licenses<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE licenses SET is_active = FALSE, updated_at = NOW() WHERE company_id = $1 AND is_active",
        )
        .bind(company_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn activate_license<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<License, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let license = sqlx::query_as::<_, License>(
            r#"
            UPDATE licenses SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::LicenseNotFound)?;
        Ok(license)
    }
}
