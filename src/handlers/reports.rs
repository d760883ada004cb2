// src/handlers/reports.rs

// O assistente de relatórios: validação do rascunho, geração completa
// e download do PDF.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::company::CompanyContext,
    models::report::{ComplianceReport, ReportDraft, WizardStep},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDraftQuery {
    // Passo do assistente até onde validar; ausente = rascunho inteiro
    pub step: Option<WizardStep>,
}

// POST /api/company/reports/validate
#[utoipa::path(
    post,
    path = "/api/company/reports/validate",
    tag = "Reports",
    request_body = ReportDraft,
    responses(
        (status = 200, description = "Rascunho válido até o passo informado; devolve o próximo passo"),
        (status = 422, description = "Período inválido"),
        (status = 400, description = "Campos obrigatórios ausentes")
    ),
    params(
        ValidateDraftQuery,
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn validate_draft(
    State(app_state): State<AppState>,
    _company: CompanyContext,
    Query(query): Query<ValidateDraftQuery>,
    Json(draft): Json<ReportDraft>,
) -> Result<impl IntoResponse, AppError> {
    app_state.report_service.validate_only(&draft, query.step)?;

    // O front avança para o próximo passo; null encerra o assistente
    let next_step = query.step.and_then(|s| s.next());
    Ok(Json(json!({ "valid": true, "nextStep": next_step })))
}

// POST /api/company/reports
#[utoipa::path(
    post,
    path = "/api/company/reports",
    tag = "Reports",
    request_body = ReportDraft,
    responses(
        (status = 201, description = "Relatório gerado com PDF", body = ComplianceReport),
        (status = 422, description = "Período inválido")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn generate_report(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Json(draft): Json<ReportDraft>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .report_service
        .generate_report(company.0, draft)
        .await?;

    Ok((StatusCode::CREATED, Json(report)))
}

// GET /api/company/reports
#[utoipa::path(
    get,
    path = "/api/company/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Relatórios da empresa", body = [ComplianceReport])
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_reports(
    State(app_state): State<AppState>,
    company: CompanyContext,
) -> Result<Json<Vec<ComplianceReport>>, AppError> {
    Ok(Json(app_state.report_service.list_reports(company.0).await?))
}

// GET /api/company/reports/{id}
#[utoipa::path(
    get,
    path = "/api/company/reports/{report_id}",
    tag = "Reports",
    params(
        ("report_id" = Uuid, Path, description = "ID do Relatório"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Relatório", body = ComplianceReport),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(report_id): Path<Uuid>,
) -> Result<Json<ComplianceReport>, AppError> {
    Ok(Json(app_state.report_service.get_report(company.0, report_id).await?))
}

// GET /api/company/reports/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/company/reports/{report_id}/pdf",
    tag = "Reports",
    params(
        ("report_id" = Uuid, Path, description = "ID do Relatório"),
        ("x-company-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "PDF do relatório", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Relatório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_report_pdf(
    State(app_state): State<AppState>,
    company: CompanyContext,
    Path(report_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = app_state
        .report_service
        .load_report_pdf(company.0, report_id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"relatorio-{}.pdf\"", report_id),
        ),
    ];

    Ok((headers, bytes))
}
