// src/models/company.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Company (A raiz do tenant)
// ---
// A conta principal: tudo (colaboradores, departamentos, atividades,
// relatórios) é escopado pelo id dela.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    #[schema(example = "Empresa Exemplo Ltda")]
    pub name: String,
    // Guardado como 14 dígitos; os handlers servem a versão mascarada
    #[schema(example = "12345678000195")]
    pub cnpj: String,
    #[schema(example = "contato@empresa.com")]
    pub contact_email: String,
    pub billing_email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. Department
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Vendas")]
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 3. UserProfile (O colaborador - linha de user_profiles)
// ---
// company_id fica nulo até a empresa vincular o colaborador.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Maria Silva")]
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub license_status: LicenseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "license_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Pendente,
    Ativa,
    Suspensa,
}

// ---
// 4. License (Licença corporativa)
// ---
// Invariante: no máximo uma licença ativa por empresa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Plano Bem-Estar 100")]
    pub plan_name: String,
    #[schema(example = "1499.90")]
    pub monthly_fee: Decimal,
    #[schema(example = 100)]
    pub seats: i32,
    pub is_active: bool,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 5. Psychologist
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Psychologist {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[schema(example = "Dra. Ana Souza")]
    pub full_name: String,
    #[schema(example = "CRP 06/12345")]
    pub crp: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
