// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::{cnpj, error::AppError},
    models::{company::Company, report::ComplianceReport},
};

// Renderiza o relatório de conformidade em PDF a partir do snapshot já
// gravado. Nenhum acesso ao banco aqui: tudo vem da linha do relatório.
#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: String,
}

impl DocumentService {
    pub fn new(fonts_dir: String) -> Self {
        Self { fonts_dir }
    }

    pub fn render_report_pdf(
        &self,
        company: &Company,
        report: &ComplianceReport,
    ) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(report.title.clone());
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(&report.title)
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(&company.name).styled(style::Style::new().with_font_size(12)));
        doc.push(
            elements::Paragraph::new(format!("CNPJ: {}", cnpj::format_cnpj(&company.cnpj)))
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Período: {} a {}",
            report.period_start.format("%d/%m/%Y"),
            report.period_end.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!(
            "Emitido em: {}",
            report.created_at.format("%d/%m/%Y")
        )));

        doc.push(elements::Break::new(1.5));

        // --- NOTA DE CONFORMIDADE ---
        doc.push(
            elements::Paragraph::new(format!("Nota de conformidade: {}/100", report.compliance_score))
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        doc.push(elements::Break::new(2));

        // --- TABELA DE MÉTRICAS ---
        let metrics = &report.metrics.0;
        let mut table = elements::TableLayout::new(vec![3, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Indicador").styled(style_bold))
            .element(elements::Paragraph::new("Valor").styled(style_bold))
            .push()
            .expect("Table error");

        let rows: Vec<(&str, String)> = vec![
            ("Colaboradores", metrics.total_employees.to_string()),
            ("Atividades no período", metrics.total_activities.to_string()),
            ("Atividades concluídas", metrics.completed_activities.to_string()),
            ("Participantes distintos", metrics.distinct_participants.to_string()),
            ("Taxa de participação", format!("{}%", metrics.participation_rate)),
            ("Taxa de engajamento", format!("{}%", metrics.engagement_rate)),
            ("Satisfação média", format!("{:.1}/10", metrics.average_satisfaction)),
        ];
        for (label, value) in rows {
            table
                .row()
                .element(elements::Paragraph::new(label))
                .element(elements::Paragraph::new(value))
                .push()
                .expect("Table row error");
        }
        doc.push(table);

        doc.push(elements::Break::new(1.5));

        // --- USO DO APLICATIVO ---
        let usage = &metrics.app_usage;
        let usage_heading = if usage.estimated {
            "Uso do aplicativo (valores estimados)"
        } else {
            "Uso do aplicativo"
        };
        doc.push(elements::Paragraph::new(usage_heading).styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Paragraph::new(format!(
            "Horas de meditação: {:.0} | Sessões de conversa: {:.0} | Registros de diário: {:.0}",
            usage.meditation_hours, usage.conversation_sessions, usage.diary_entries
        )));

        doc.push(elements::Break::new(1.5));

        // --- ENGAJAMENTO POR DEPARTAMENTO ---
        if !metrics.departments.is_empty() {
            doc.push(
                elements::Paragraph::new("Engajamento por departamento")
                    .styled(style::Style::new().bold().with_font_size(12)),
            );

            let mut dept_table = elements::TableLayout::new(vec![3, 1, 1, 1]);
            dept_table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
            dept_table
                .row()
                .element(elements::Paragraph::new("Departamento").styled(style_bold))
                .element(elements::Paragraph::new("Colab.").styled(style_bold))
                .element(elements::Paragraph::new("Partic.").styled(style_bold))
                .element(elements::Paragraph::new("Engaj.").styled(style_bold))
                .push()
                .expect("Table error");

            for dept in &metrics.departments {
                dept_table
                    .row()
                    .element(elements::Paragraph::new(&dept.name))
                    .element(elements::Paragraph::new(dept.employee_count.to_string()))
                    .element(elements::Paragraph::new(dept.participant_count.to_string()))
                    .element(elements::Paragraph::new(format!("{}%", dept.engagement_rate)))
                    .push()
                    .expect("Table row error");
            }
            doc.push(dept_table);
            doc.push(elements::Break::new(1.5));
        }

        // --- INSIGHTS ---
        doc.push(
            elements::Paragraph::new("Análise e recomendações")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        for insight in report.insights.0.iter() {
            doc.push(elements::Paragraph::new(format!("• {}", insight)));
        }

        doc.push(elements::Break::new(2));

        // --- APROVAÇÃO ---
        doc.push(elements::Paragraph::new(format!(
            "Aprovado por: {} ({})",
            report.approver_name, report.approver_email
        )));

        doc.push(elements::Break::new(1));

        // --- QR CODE DE VERIFICAÇÃO ---
        let verification_payload = format!("portal-calma:relatorio:{}", report.id);
        let code = QrCode::new(verification_payload.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);
        doc.push(
            elements::Paragraph::new("Verificação de autenticidade")
                .styled(style::Style::new().italic().with_font_size(8)),
        );

        // Renderiza para buffer em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
