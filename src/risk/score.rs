use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RiskError;
use super::input::{QuestionnaireScale, RiskInput};

pub const QUESTIONNAIRE_WEIGHT: f64 = 0.50;
pub const AGE_WEIGHT: f64 = 0.20;
pub const INCOME_WEIGHT: f64 = 0.20;
pub const HORIZON_WEIGHT: f64 = 0.10;

/// Age at which the age factor reaches zero
pub const AGE_CEILING_YEARS: f64 = 60.0;
/// Annual income at which the income factor saturates
pub const INCOME_CEILING: f64 = 200_000.0;
/// Horizon at which the horizon factor saturates
pub const HORIZON_CEILING_YEARS: f64 = 30.0;

pub const PENALTY_PER_DEPENDENT: f64 = 0.01;
pub const MAX_DEPENDENTS_PENALTY: f64 = 0.10;

/// Normalized sub-scores behind a composite risk score.
///
/// Each factor is in `[0, 1]`; `dependents_adjustment` is in `[-0.10, 0]` and
/// sits outside the weighted budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub questionnaire: f64,
    pub age: f64,
    pub income: f64,
    pub horizon: f64,
    pub dependents_adjustment: f64,
}

impl RiskFactors {
    /// Weighted contribution of each factor to the unclamped total
    pub fn contributions(&self) -> [(&'static str, f64); 5] {
        [
            ("questionnaire", self.questionnaire * QUESTIONNAIRE_WEIGHT),
            ("age", self.age * AGE_WEIGHT),
            ("income", self.income * INCOME_WEIGHT),
            ("horizon", self.horizon * HORIZON_WEIGHT),
            ("dependents", self.dependents_adjustment),
        ]
    }

    /// Unclamped composite in roughly `[-0.1, 1.0]`
    pub fn total(&self) -> f64 {
        self.contributions().iter().map(|(_, c)| c).sum()
    }

    /// Composite on the 0-100 scale.
    ///
    /// Rounds half away from zero. The percentage is first snapped to six
    /// decimals so binary noise cannot push an exact half either way.
    pub fn score(&self) -> u8 {
        let pct = self.total().clamp(0.0, 1.0) * 100.0;
        let snapped = (pct * 1e6).round() / 1e6;
        snapped.round() as u8
    }
}

/// Compute the factor breakdown for an input against a questionnaire scale
pub fn score_factors(input: &RiskInput, scale: &QuestionnaireScale) -> Result<RiskFactors, RiskError> {
    scale.validate(&input.questionnaire)?;

    if !input.annual_income.is_finite() || input.annual_income < 0.0 {
        return Err(RiskError::InvalidIncome(input.annual_income.to_string()));
    }

    let answers = &input.questionnaire;
    let average = answers.iter().map(|&a| a as f64).sum::<f64>() / answers.len() as f64;

    let factors = RiskFactors {
        questionnaire: scale.rescale(average),
        age: unit_clamp((AGE_CEILING_YEARS - input.age as f64) / AGE_CEILING_YEARS),
        income: unit_clamp(input.annual_income / INCOME_CEILING),
        horizon: unit_clamp(input.time_horizon as f64 / HORIZON_CEILING_YEARS),
        dependents_adjustment: (-PENALTY_PER_DEPENDENT * input.dependents as f64)
            .max(-MAX_DEPENDENTS_PENALTY),
    };

    let total = factors.total();
    if !total.is_finite() {
        return Err(RiskError::NonFiniteScore(total.to_string()));
    }

    debug!(
        questionnaire = factors.questionnaire,
        age = factors.age,
        income = factors.income,
        horizon = factors.horizon,
        dependents = factors.dependents_adjustment,
        "Scored risk factors"
    );

    Ok(factors)
}

/// Composite 0-100 risk score using the canonical 8-item, 1-5 questionnaire
pub fn compute_risk_score(
    age: u32,
    annual_income: f64,
    dependents: u32,
    time_horizon: u32,
    questionnaire: &[i64],
) -> Result<u8, RiskError> {
    let input = RiskInput {
        age,
        annual_income,
        dependents,
        time_horizon,
        questionnaire: questionnaire.to_vec(),
    };
    score_factors(&input, &QuestionnaireScale::default()).map(|f| f.score())
}

fn unit_clamp(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn young_max_tolerance_scores_84() {
        let score = compute_risk_score(18, 100_000.0, 0, 30, &[5; 8]).unwrap();
        assert_eq!(score, 84);
    }

    #[test]
    fn neutral_answers_no_income_scores_38() {
        let score = compute_risk_score(30, 0.0, 0, 10, &[3; 8]).unwrap();
        assert_eq!(score, 38);
    }

    #[test]
    fn empty_questionnaire_fails_instead_of_scoring_zero() {
        assert_eq!(
            compute_risk_score(30, 50_000.0, 0, 10, &[]),
            Err(RiskError::EmptyQuestionnaire)
        );
    }

    #[test]
    fn negative_or_nan_income_is_rejected() {
        assert!(matches!(
            compute_risk_score(30, -1.0, 0, 10, &[3; 8]),
            Err(RiskError::InvalidIncome(_))
        ));
        assert!(matches!(
            compute_risk_score(30, f64::NAN, 0, 10, &[3; 8]),
            Err(RiskError::InvalidIncome(_))
        ));
    }

    #[test]
    fn factors_saturate_at_their_ceilings() {
        let input = RiskInput {
            age: 75,
            annual_income: 1_000_000.0,
            dependents: 40,
            time_horizon: 45,
            questionnaire: vec![1; 8],
        };
        let f = score_factors(&input, &QuestionnaireScale::default()).unwrap();
        assert_eq!(f.questionnaire, 0.0);
        assert_eq!(f.age, 0.0);
        assert_eq!(f.income, 1.0);
        assert_eq!(f.horizon, 1.0);
        assert_eq!(f.dependents_adjustment, -MAX_DEPENDENTS_PENALTY);
        // 0.2 income + 0.1 horizon - 0.1 penalty
        assert_eq!(f.score(), 20);
    }

    #[test]
    fn total_below_zero_clamps_to_zero() {
        let f = RiskFactors {
            questionnaire: 0.0,
            age: 0.0,
            income: 0.0,
            horizon: 0.0,
            dependents_adjustment: -0.1,
        };
        assert!(f.total() < 0.0);
        assert_eq!(f.score(), 0);
    }

    #[test]
    fn four_point_scale_uses_its_own_bounds() {
        let scale = QuestionnaireScale::new(1, 4, Some(5)).unwrap();
        let input = RiskInput {
            age: 60,
            annual_income: 0.0,
            dependents: 0,
            time_horizon: 0,
            questionnaire: vec![4; 5],
        };
        let f = score_factors(&input, &scale).unwrap();
        assert_eq!(f.questionnaire, 1.0);
        assert_eq!(f.score(), 50);
    }

    #[test]
    fn each_dependent_costs_one_point_until_the_cap() {
        let answers = [4, 4, 4, 4, 4, 4, 4, 5];
        let base = compute_risk_score(30, 80_000.0, 0, 15, &answers).unwrap();
        let three = compute_risk_score(30, 80_000.0, 3, 15, &answers).unwrap();
        let twenty = compute_risk_score(30, 80_000.0, 20, 15, &answers).unwrap();
        assert_eq!(base, 62);
        assert_eq!(base - three, 3);
        assert_eq!(base - twenty, 10);
    }
}
