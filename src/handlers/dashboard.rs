// src/handlers/dashboard.rs

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::dashboard::{CompanyDashboardSummary, DepartmentDashboard},
};

// GET /api/company/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/company/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo da empresa", body = CompanyDashboardSummary)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<CompanyDashboardSummary>, AppError> {
    Ok(Json(app_state.dashboard_service.company_summary(company.0).await?))
}

// GET /api/company/dashboard/departments
#[utoipa::path(
    get,
    path = "/api/company/dashboard/departments",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Engajamento por departamento", body = DepartmentDashboard)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn get_departments(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<DepartmentDashboard>, AppError> {
    Ok(Json(app_state.dashboard_service.department_dashboard(company.0).await?))
}
