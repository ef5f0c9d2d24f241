use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::RiskError;
use super::input::{QuestionnaireScale, RiskInput};
use super::level::{compute_risk_level, RiskLevel};
use super::questionnaire::{normalize_questionnaire, RawQuestionnaire};
use super::score::{score_factors, RiskFactors};

/// Outcome of a risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub factors: RiskFactors,
}

/// Stateless scorer bound to one questionnaire scale.
///
/// Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    scale: QuestionnaireScale,
}

impl RiskEngine {
    pub fn new(scale: QuestionnaireScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> &QuestionnaireScale {
        &self.scale
    }

    /// Score and classify an already-normalized input
    pub fn assess(&self, input: &RiskInput) -> Result<RiskResult, RiskError> {
        let factors = score_factors(input, &self.scale).map_err(|e| {
            warn!("Rejected risk input: {}", e);
            e
        })?;
        let risk_score = factors.score();

        Ok(RiskResult {
            risk_score,
            risk_level: compute_risk_level(risk_score as i64),
            factors,
        })
    }

    /// Full pipeline: normalize the questionnaire, score, classify
    pub fn assess_raw(
        &self,
        age: u32,
        annual_income: f64,
        dependents: u32,
        time_horizon: u32,
        questionnaire: &RawQuestionnaire,
    ) -> Result<RiskResult, RiskError> {
        let questionnaire = normalize_questionnaire(questionnaire)?;
        self.assess(&RiskInput {
            age,
            annual_income,
            dependents,
            time_horizon,
            questionnaire,
        })
    }
}
