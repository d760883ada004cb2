// src/services/report_service.rs

// O orquestrador do relatório de conformidade: valida o rascunho do
// assistente, coleta o snapshot de métricas, calcula a nota, gera os
// insights, persiste e por fim renderiza o PDF em disco.

use std::path::PathBuf;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, ReportRepository},
    models::report::{ComplianceReport, ReportDraft, WizardStep},
    services::{
        document_service::DocumentService,
        insights::InsightService,
        metrics_service::MetricsService,
        scoring::{compliance_score, ScoreInputs},
    },
};

#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    company_repo: CompanyRepository,
    metrics: MetricsService,
    insights: InsightService,
    documents: DocumentService,
    storage_dir: String,
}

impl ReportService {
    pub fn new(
        report_repo: ReportRepository,
        company_repo: CompanyRepository,
        metrics: MetricsService,
        insights: InsightService,
        documents: DocumentService,
        storage_dir: String,
    ) -> Self {
        Self { report_repo, company_repo, metrics, insights, documents, storage_dir }
    }

    /// Pipeline completo de geração. A linha do relatório é gravada antes
    /// do PDF: se a renderização falhar, o relatório existe sem `pdf_url`
    /// e o PDF pode ser regerado depois.
    pub async fn generate_report(
        &self,
        company_id: Uuid,
        draft: ReportDraft,
    ) -> Result<ComplianceReport, AppError> {
        validate_draft(&draft)?;

        let company = self
            .company_repo
            .find_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        // 1. Snapshot de métricas do período
        let metrics = self
            .metrics
            .collect(company_id, draft.period_start, draft.period_end)
            .await?;

        // 2. Nota de conformidade
        let score = compliance_score(&ScoreInputs {
            completed_activities: metrics.completed_activities,
            engagement_rate: metrics.engagement_rate,
            participation_rate: metrics.participation_rate,
            satisfaction_score: metrics.average_satisfaction,
        });

        // 3. Insights (nunca derruba a geração)
        let insights = self.insights.generate_for_report(&metrics).await;

        // 4. Persistência do snapshot
        let title = draft
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| draft.report_type.default_title().to_string());

        let mut report = self
            .report_repo
            .insert_report(
                company_id,
                draft.report_type,
                &title,
                &draft,
                &metrics,
                &insights,
                score,
            )
            .await?;

        tracing::info!(
            "✅ Relatório {} gerado para a empresa {} (nota {})",
            report.id,
            company_id,
            score
        );

        // 5. PDF em disco + back-fill da URL
        let pdf_bytes = self.documents.render_report_pdf(&company, &report)?;

        let dir = PathBuf::from(&self.storage_dir).join("reports");
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar diretório de relatórios: {}", e))?;

        let path = dir.join(format!("{}.pdf", report.id));
        tokio::fs::write(&path, &pdf_bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao gravar o PDF do relatório: {}", e))?;

        let pdf_url = format!("/api/company/reports/{}/pdf", report.id);
        self.report_repo
            .set_pdf_url(report.id, company_id, &pdf_url)
            .await?;
        report.pdf_url = Some(pdf_url);

        Ok(report)
    }

    pub async fn list_reports(&self, company_id: Uuid) -> Result<Vec<ComplianceReport>, AppError> {
        self.report_repo.list_reports(company_id).await
    }

    pub async fn get_report(
        &self,
        company_id: Uuid,
        report_id: Uuid,
    ) -> Result<ComplianceReport, AppError> {
        self.report_repo
            .find_report(report_id, company_id)
            .await?
            .ok_or(AppError::ReportNotFound)
    }

    /// Lê o PDF do disco; regera na hora se a linha existe mas o arquivo
    /// sumiu (ou nunca chegou a ser gravado).
    pub async fn load_report_pdf(
        &self,
        company_id: Uuid,
        report_id: Uuid,
    ) -> Result<Vec<u8>, AppError> {
        let report = self.get_report(company_id, report_id).await?;

        let path = PathBuf::from(&self.storage_dir)
            .join("reports")
            .join(format!("{}.pdf", report.id));

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(_) => {
                tracing::warn!("PDF do relatório {} ausente em disco, regerando", report.id);
                let company = self
                    .company_repo
                    .find_company(company_id)
                    .await?
                    .ok_or(AppError::CompanyNotFound)?;
                let bytes = self.documents.render_report_pdf(&company, &report)?;

                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| anyhow::anyhow!("Falha ao criar diretório: {}", e))?;
                }
                tokio::fs::write(&path, &bytes)
                    .await
                    .map_err(|e| anyhow::anyhow!("Falha ao regravar o PDF: {}", e))?;
                Ok(bytes)
            }
        }
    }

    /// Validação sem efeito colateral, usada pelo assistente a cada
    /// passo. Sem passo informado, valida o rascunho inteiro.
    pub fn validate_only(
        &self,
        draft: &ReportDraft,
        step: Option<WizardStep>,
    ) -> Result<(), AppError> {
        match step {
            Some(step) => validate_up_to(draft, step),
            None => validate_draft(draft),
        }
    }
}

/// As regras do rascunho que não dependem do banco: campos obrigatórios
/// (via `validator`) e período bem formado.
pub fn validate_draft(draft: &ReportDraft) -> Result<(), AppError> {
    draft.validate()?;
    if draft.period_end < draft.period_start {
        return Err(AppError::InvalidReportPeriod);
    }
    Ok(())
}

/// Validação incremental do assistente: cada passo só exige o que já
/// foi preenchido até ele. O aprovador só é cobrado na revisão final.
pub fn validate_up_to(draft: &ReportDraft, step: WizardStep) -> Result<(), AppError> {
    // O período entra no primeiro passo (configuração)
    if draft.period_end < draft.period_start {
        return Err(AppError::InvalidReportPeriod);
    }
    if step == WizardStep::Review {
        draft.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::ReportType;
    use chrono::NaiveDate;

    fn draft(start: &str, end: &str) -> ReportDraft {
        ReportDraft {
            report_type: ReportType::Lei14831,
            title: None,
            period_start: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            period_end: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
            evidence_notes: None,
            additional_info: None,
            approver_name: "Maria Silva".to_string(),
            approver_email: "maria@empresa.com".to_string(),
        }
    }

    #[test]
    fn periodo_invertido_eh_recusado() {
        let err = validate_draft(&draft("2026-06-30", "2026-06-01")).unwrap_err();
        assert!(matches!(err, AppError::InvalidReportPeriod));
    }

    #[test]
    fn periodo_de_um_dia_eh_aceito() {
        assert!(validate_draft(&draft("2026-06-01", "2026-06-01")).is_ok());
    }

    #[test]
    fn aprovador_sem_nome_eh_recusado() {
        let mut d = draft("2026-06-01", "2026-06-30");
        d.approver_name = String::new();
        assert!(matches!(validate_draft(&d), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn email_do_aprovador_eh_validado() {
        let mut d = draft("2026-06-01", "2026-06-30");
        d.approver_email = "nao-eh-email".to_string();
        assert!(matches!(validate_draft(&d), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn aprovador_so_eh_cobrado_na_revisao() {
        let mut d = draft("2026-06-01", "2026-06-30");
        d.approver_name = String::new();

        // Nos passos intermediários o aprovador ainda pode estar vazio
        for step in [
            WizardStep::Configuration,
            WizardStep::DataCollection,
            WizardStep::Evidence,
            WizardStep::AdditionalInfo,
        ] {
            assert!(validate_up_to(&d, step).is_ok(), "passo {:?}", step);
        }

        assert!(matches!(
            validate_up_to(&d, WizardStep::Review),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn periodo_invertido_falha_em_qualquer_passo() {
        let d = draft("2026-06-30", "2026-06-01");
        for step in WizardStep::ALL {
            assert!(matches!(
                validate_up_to(&d, step),
                Err(AppError::InvalidReportPeriod)
            ));
        }
    }
}
