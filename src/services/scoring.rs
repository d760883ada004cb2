// src/services/scoring.rs

// Nota de conformidade: soma ponderada determinística, 0-100.
// Só o termo de atividades precisa de teto explícito; os outros três
// já são limitados pela própria definição (percentuais e nota/10).

const WEIGHT_ACTIVITIES: f64 = 0.25;
const WEIGHT_ENGAGEMENT: f64 = 0.30;
const WEIGHT_PARTICIPATION: f64 = 0.25;
const WEIGHT_SATISFACTION: f64 = 0.20;

// Cadência de referência: 12 atividades concluídas no período = nota cheia
const TARGET_COMPLETED_ACTIVITIES: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub completed_activities: i64,
    /// Percentual inteiro 0..=100
    pub engagement_rate: i64,
    /// Percentual inteiro 0..=100
    pub participation_rate: i64,
    /// Média 0.0..=10.0
    pub satisfaction_score: f64,
}

pub fn compliance_score(inputs: &ScoreInputs) -> i32 {
    let activity_term =
        (inputs.completed_activities as f64 / TARGET_COMPLETED_ACTIVITIES * 100.0).min(100.0);
    let satisfaction_term = inputs.satisfaction_score / 10.0 * 100.0;

    let score = WEIGHT_ACTIVITIES * activity_term
        + WEIGHT_ENGAGEMENT * inputs.engagement_rate as f64
        + WEIGHT_PARTICIPATION * inputs.participation_rate as f64
        + WEIGHT_SATISFACTION * satisfaction_term;

    score.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(completed: i64, eng: i64, part: i64, sat: f64) -> ScoreInputs {
        ScoreInputs {
            completed_activities: completed,
            engagement_rate: eng,
            participation_rate: part,
            satisfaction_score: sat,
        }
    }

    #[test]
    fn empresa_sem_dados_tem_nota_zero() {
        assert_eq!(compliance_score(&inputs(0, 0, 0, 0.0)), 0);
    }

    #[test]
    fn nota_maxima_eh_cem() {
        assert_eq!(compliance_score(&inputs(12, 100, 100, 10.0)), 100);
    }

    #[test]
    fn exemplo_de_referencia() {
        // 0.25*100 + 0.30*70 + 0.25*60 + 0.20*80 = 77
        assert_eq!(compliance_score(&inputs(12, 70, 60, 8.0)), 77);
    }

    #[test]
    fn termo_de_atividades_trava_em_cem() {
        // 12, 50 ou 500 atividades concluídas dão o mesmo termo
        let base = compliance_score(&inputs(12, 40, 40, 5.0));
        assert_eq!(compliance_score(&inputs(50, 40, 40, 5.0)), base);
        assert_eq!(compliance_score(&inputs(500, 40, 40, 5.0)), base);
    }

    #[test]
    fn nota_eh_monotonica_em_cada_entrada() {
        let base = inputs(6, 50, 50, 5.0);
        let base_score = compliance_score(&base);

        for extra in 1..=20 {
            let mut i = base;
            i.completed_activities += extra;
            assert!(compliance_score(&i) >= base_score, "atividades: {}", extra);
        }
        for extra in 1..=50 {
            let mut i = base;
            i.engagement_rate += extra;
            assert!(compliance_score(&i) >= base_score, "engajamento: {}", extra);

            let mut i = base;
            i.participation_rate += extra;
            assert!(compliance_score(&i) >= base_score, "participação: {}", extra);
        }
        for extra in [0.5, 1.0, 2.5, 5.0] {
            let mut i = base;
            i.satisfaction_score += extra;
            assert!(compliance_score(&i) >= base_score, "satisfação: {}", extra);
        }
    }

    #[test]
    fn arredonda_para_o_inteiro_mais_proximo() {
        // 0.25*(1/12*100) + 0.30*33 + 0.25*33 + 0.20*33 = 2.0833 + 9.9 + 8.25 + 6.6 = 26.83
        assert_eq!(compliance_score(&inputs(1, 33, 33, 3.3)), 27);
    }
}
