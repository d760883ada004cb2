// src/services/insights.rs

// Geração de insights: regras determinísticas de limiar sobre o snapshot
// de métricas. O nome "IA" é herdado do produto; hoje nenhuma chamada
// externa acontece e a saída é totalmente testável por tabela.

use crate::{common::error::AppError, db::PromptRepository, models::report::ReportMetrics};

#[derive(Clone)]
pub struct InsightService {
    prompt_repo: PromptRepository,
}

impl InsightService {
    pub fn new(prompt_repo: PromptRepository) -> Self {
        Self { prompt_repo }
    }

    /// Nunca falha o relatório: qualquer erro no caminho normal cai no
    /// conjunto padrão de insights.
    pub async fn generate_for_report(&self, metrics: &ReportMetrics) -> Vec<String> {
        match self.try_generate(metrics).await {
            Ok(insights) => insights,
            Err(e) => {
                tracing::warn!("Geração de insights falhou, usando conjunto padrão: {}", e);
                fallback_insights()
            }
        }
    }

    async fn try_generate(&self, metrics: &ReportMetrics) -> Result<Vec<String>, AppError> {
        // O prompt ativo existe para a futura integração com um modelo real;
        // por enquanto só registramos qual versão seria usada.
        if let Some(prompt) = self.prompt_repo.find_active().await? {
            tracing::debug!("Prompt ativo: {} (v{})", prompt.name, prompt.version);
        }

        let insights = evaluate_rules(metrics);
        if insights.is_empty() {
            return Ok(fallback_insights());
        }
        Ok(insights)
    }
}

/// Avaliação pura das regras, na ordem fixa: engajamento, participação,
/// cadência de atividades, satisfação, departamentos.
pub fn evaluate_rules(metrics: &ReportMetrics) -> Vec<String> {
    let mut insights = Vec::new();

    // 1. Engajamento
    if metrics.engagement_rate >= 70 {
        insights.push(format!(
            "O engajamento geral de {}% indica forte adesão dos colaboradores ao programa de bem-estar.",
            metrics.engagement_rate
        ));
    } else if metrics.engagement_rate < 50 {
        insights.push(format!(
            "Atenção: o engajamento de {}% está abaixo do recomendado. Considere ampliar a divulgação interna das atividades.",
            metrics.engagement_rate
        ));
    }

    // 2. Participação
    if metrics.participation_rate >= 60 {
        insights.push(format!(
            "A taxa de participação de {}% supera a referência de mercado para programas corporativos.",
            metrics.participation_rate
        ));
    } else if metrics.participation_rate < 40 {
        insights.push(format!(
            "Apenas {}% dos colaboradores participaram de alguma atividade no período. Formatos mais curtos podem reduzir a barreira de entrada.",
            metrics.participation_rate
        ));
    }

    // 3. Cadência de atividades
    if metrics.completed_activities == 0 {
        insights.push(
            "Nenhuma atividade foi concluída no período. A conformidade exige ações recorrentes de promoção de saúde mental.".to_string(),
        );
    } else if metrics.completed_activities >= 12 {
        insights.push(format!(
            "{} atividades concluídas no período atendem à cadência mensal recomendada.",
            metrics.completed_activities
        ));
    }

    // 4. Satisfação
    if metrics.average_satisfaction >= 8.0 {
        insights.push(format!(
            "A satisfação média de {:.1}/10 demonstra boa receptividade às ações realizadas.",
            metrics.average_satisfaction
        ));
    } else if metrics.average_satisfaction > 0.0 && metrics.average_satisfaction < 5.0 {
        insights.push(format!(
            "A satisfação média de {:.1}/10 sugere revisar o formato ou os temas das atividades.",
            metrics.average_satisfaction
        ));
    }

    // 5. Departamento com menor engajamento (só entre os que têm gente)
    let lowest = metrics
        .departments
        .iter()
        .filter(|d| d.employee_count > 0)
        .min_by_key(|d| d.engagement_rate);
    if let Some(dept) = lowest {
        if dept.engagement_rate < 50 {
            insights.push(format!(
                "O departamento {} apresenta o menor engajamento ({}%). Ações direcionadas podem equilibrar a cobertura do programa.",
                dept.name, dept.engagement_rate
            ));
        }
    }

    insights
}

/// Conjunto padrão usado quando a avaliação falha ou não produz nada.
pub fn fallback_insights() -> Vec<String> {
    vec![
        "O programa de bem-estar está em andamento. Recomenda-se manter a regularidade das atividades.".to_string(),
        "Monitore o engajamento por departamento para identificar áreas com menor adesão.".to_string(),
        "Colete feedback de satisfação ao final de cada atividade para acompanhar a evolução do programa.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{AppUsageEstimates, DepartmentEngagement, ReportMetrics};
    use uuid::Uuid;

    fn metrics(eng: i64, part: i64, completed: i64, sat: f64) -> ReportMetrics {
        ReportMetrics {
            total_employees: 100,
            total_activities: completed + 2,
            completed_activities: completed,
            planned_activities: 1,
            in_progress_activities: 1,
            cancelled_activities: 0,
            activities_by_type: vec![],
            distinct_participants: part,
            participation_rate: part,
            engagement_rate: eng,
            average_satisfaction: sat,
            app_usage: AppUsageEstimates {
                meditation_hours: 350.0,
                conversation_sessions: 200.0,
                diary_entries: 400.0,
                estimated: true,
            },
            departments: vec![],
        }
    }

    #[test]
    fn engajamento_alto_gera_insight_positivo() {
        let insights = evaluate_rules(&metrics(75, 50, 5, 6.0));
        assert!(insights[0].contains("forte adesão"));
    }

    #[test]
    fn engajamento_baixo_gera_alerta() {
        let insights = evaluate_rules(&metrics(30, 50, 5, 6.0));
        assert!(insights[0].contains("abaixo do recomendado"));
    }

    #[test]
    fn faixa_neutra_de_engajamento_nao_comenta() {
        let insights = evaluate_rules(&metrics(60, 50, 5, 6.0));
        assert!(!insights.iter().any(|i| i.contains("engajamento")));
    }

    #[test]
    fn zero_atividades_vira_alerta() {
        let insights = evaluate_rules(&metrics(60, 50, 0, 0.0));
        assert!(insights.iter().any(|i| i.contains("Nenhuma atividade")));
    }

    #[test]
    fn cadencia_atingida_eh_reconhecida() {
        let insights = evaluate_rules(&metrics(60, 50, 14, 6.0));
        assert!(insights.iter().any(|i| i.contains("cadência mensal")));
    }

    #[test]
    fn departamento_com_menor_engajamento_eh_apontado() {
        let mut m = metrics(60, 50, 5, 6.0);
        m.departments = vec![
            DepartmentEngagement {
                department_id: Uuid::new_v4(),
                name: "Vendas".to_string(),
                employee_count: 10,
                participant_count: 2,
                engagement_rate: 20,
            },
            DepartmentEngagement {
                department_id: Uuid::new_v4(),
                name: "TI".to_string(),
                employee_count: 8,
                participant_count: 6,
                engagement_rate: 75,
            },
            // Departamento vazio não entra na comparação
            DepartmentEngagement {
                department_id: Uuid::new_v4(),
                name: "Jurídico".to_string(),
                employee_count: 0,
                participant_count: 0,
                engagement_rate: 0,
            },
        ];
        let insights = evaluate_rules(&m);
        assert!(insights.iter().any(|i| i.contains("Vendas")));
        assert!(!insights.iter().any(|i| i.contains("Jurídico")));
    }

    #[test]
    fn ordem_das_regras_eh_estavel() {
        let a = evaluate_rules(&metrics(75, 65, 12, 9.0));
        let b = evaluate_rules(&metrics(75, 65, 12, 9.0));
        assert_eq!(a, b);
        // engajamento vem antes de participação, que vem antes da cadência
        assert!(a[0].contains("engajamento"));
        assert!(a[1].contains("participação"));
    }

    #[test]
    fn conjunto_padrao_quando_nada_dispara() {
        // faixas neutras em tudo
        let insights = evaluate_rules(&metrics(60, 50, 5, 6.0));
        assert!(insights.is_empty());
        assert_eq!(fallback_insights().len(), 3);
    }
}
