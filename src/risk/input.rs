use serde::{Deserialize, Serialize};

use super::error::RiskError;

/// Number of questions in the canonical risk questionnaire
pub const DEFAULT_QUESTIONNAIRE_LEN: usize = 8;

/// Lowest answer on the canonical Likert scale
pub const DEFAULT_SCALE_LOW: i64 = 1;

/// Highest answer on the canonical Likert scale
pub const DEFAULT_SCALE_HIGH: i64 = 5;

/// Declared answer scale of the questionnaire and, optionally, its fixed length.
///
/// Answers outside `low..=high` are rejected, never clamped. Deserialization
/// goes through [`QuestionnaireScale::new`], so `low < high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScaleBounds")]
pub struct QuestionnaireScale {
    low: i64,
    high: i64,
    expected_len: Option<usize>,
}

#[derive(Deserialize)]
struct ScaleBounds {
    low: i64,
    high: i64,
    #[serde(default)]
    expected_len: Option<usize>,
}

impl TryFrom<ScaleBounds> for QuestionnaireScale {
    type Error = RiskError;

    fn try_from(bounds: ScaleBounds) -> Result<Self, Self::Error> {
        QuestionnaireScale::new(bounds.low, bounds.high, bounds.expected_len)
    }
}

impl Default for QuestionnaireScale {
    fn default() -> Self {
        Self {
            low: DEFAULT_SCALE_LOW,
            high: DEFAULT_SCALE_HIGH,
            expected_len: Some(DEFAULT_QUESTIONNAIRE_LEN),
        }
    }
}

impl QuestionnaireScale {
    pub fn new(low: i64, high: i64, expected_len: Option<usize>) -> Result<Self, RiskError> {
        if low >= high {
            return Err(RiskError::InvalidScale { low, high });
        }
        Ok(Self {
            low,
            high,
            expected_len,
        })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn expected_len(&self) -> Option<usize> {
        self.expected_len
    }

    /// Check emptiness, length and answer range
    pub fn validate(&self, answers: &[i64]) -> Result<(), RiskError> {
        if answers.is_empty() {
            return Err(RiskError::EmptyQuestionnaire);
        }

        if let Some(expected) = self.expected_len {
            if answers.len() != expected {
                return Err(RiskError::WrongLength {
                    expected,
                    actual: answers.len(),
                });
            }
        }

        if let Some((position, &value)) = answers
            .iter()
            .enumerate()
            .find(|(_, a)| **a < self.low || **a > self.high)
        {
            return Err(RiskError::AnswerOutOfScale {
                position,
                value,
                low: self.low,
                high: self.high,
            });
        }

        Ok(())
    }

    /// Rescale an average answer from `[low, high]` onto `[0, 1]`
    pub fn rescale(&self, average: f64) -> f64 {
        (average - self.low as f64) / (self.high - self.low) as f64
    }
}

/// Income as a caller holds it. The engine only ever sees annual income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "amount", rename_all = "snake_case")]
pub enum IncomeBasis {
    Annual(f64),
    Monthly(f64),
}

impl IncomeBasis {
    pub fn annual(self) -> f64 {
        match self {
            IncomeBasis::Annual(amount) => amount,
            IncomeBasis::Monthly(amount) => amount * 12.0,
        }
    }
}

/// Everything the engine scores, already reduced to scalars by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    /// Age in whole years
    pub age: u32,
    /// Annual income, currency-agnostic
    pub annual_income: f64,
    pub dependents: u32,
    /// Years until the investor's goal target date
    pub time_horizon: u32,
    pub questionnaire: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_is_eight_items_one_to_five() {
        let scale = QuestionnaireScale::default();
        assert_eq!(scale.low(), 1);
        assert_eq!(scale.high(), 5);
        assert_eq!(scale.expected_len(), Some(8));
    }

    #[test]
    fn scale_rejects_inverted_bounds() {
        assert_eq!(
            QuestionnaireScale::new(4, 1, None),
            Err(RiskError::InvalidScale { low: 4, high: 1 })
        );
        assert!(QuestionnaireScale::new(3, 3, None).is_err());
    }

    #[test]
    fn deserialized_scale_is_validated() {
        let scale: QuestionnaireScale =
            serde_json::from_str(r#"{"low":1,"high":4,"expected_len":5}"#).unwrap();
        assert_eq!(scale, QuestionnaireScale::new(1, 4, Some(5)).unwrap());

        let flat = serde_json::from_str::<QuestionnaireScale>(r#"{"low":3,"high":3,"expected_len":null}"#);
        assert!(flat.unwrap_err().to_string().contains("must be below"));
        assert!(serde_json::from_str::<QuestionnaireScale>(r#"{"low":5,"high":1}"#).is_err());
    }

    #[test]
    fn degenerate_scale_never_scores_zero() {
        // Only reachable from inside the module; every public path goes through `new`
        let flat = QuestionnaireScale {
            low: 3,
            high: 3,
            expected_len: None,
        };
        let input = RiskInput {
            age: 18,
            annual_income: 200_000.0,
            dependents: 0,
            time_horizon: 30,
            questionnaire: vec![3, 3],
        };
        assert!(matches!(
            crate::risk::score_factors(&input, &flat),
            Err(RiskError::NonFiniteScore(_))
        ));
    }

    #[test]
    fn validate_reports_first_out_of_scale_answer() {
        let scale = QuestionnaireScale::default();
        let err = scale.validate(&[3, 3, 6, 0, 3, 3, 3, 3]).unwrap_err();
        assert_eq!(
            err,
            RiskError::AnswerOutOfScale {
                position: 2,
                value: 6,
                low: 1,
                high: 5
            }
        );
    }

    #[test]
    fn validate_checks_length_only_when_configured() {
        let fixed = QuestionnaireScale::default();
        assert_eq!(
            fixed.validate(&[3, 3]),
            Err(RiskError::WrongLength {
                expected: 8,
                actual: 2
            })
        );

        let free = QuestionnaireScale::new(1, 5, None).unwrap();
        assert!(free.validate(&[3, 3]).is_ok());
        assert_eq!(free.validate(&[]), Err(RiskError::EmptyQuestionnaire));
    }

    #[test]
    fn rescale_maps_bounds_to_unit_interval() {
        let scale = QuestionnaireScale::new(1, 4, Some(5)).unwrap();
        assert_eq!(scale.rescale(1.0), 0.0);
        assert_eq!(scale.rescale(4.0), 1.0);
        assert!((scale.rescale(2.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn monthly_income_is_annualized() {
        assert_eq!(IncomeBasis::Monthly(1_000.0).annual(), 12_000.0);
        assert_eq!(IncomeBasis::Annual(1_000.0).annual(), 1_000.0);
    }
}
