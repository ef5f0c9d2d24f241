use thiserror::Error;

/// Errors raised by the risk engine.
///
/// Every variant is an invalid-input condition: the engine is pure arithmetic,
/// so a failure always means the caller handed it something it cannot score.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    #[error("Questionnaire is empty")]
    EmptyQuestionnaire,

    #[error("Questionnaire answer for question {question} is not an integer: {value}")]
    NonNumericAnswer { question: String, value: String },

    #[error("Questionnaire answer {value} at position {position} is outside the scale {low}..={high}")]
    AnswerOutOfScale {
        position: usize,
        value: i64,
        low: i64,
        high: i64,
    },

    #[error("Questionnaire expects {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Invalid income: {0}")]
    InvalidIncome(String),

    #[error("Invalid questionnaire scale: low {low} must be below high {high}")]
    InvalidScale { low: i64, high: i64 },

    #[error("Risk composite is not a finite number: {0}")]
    NonFiniteScore(String),
}

impl RiskError {
    /// Name of the input field the error refers to, for field-level error reporting
    pub fn field(&self) -> &'static str {
        match self {
            RiskError::InvalidIncome(_) => "annual_income",
            RiskError::InvalidScale { .. } => "questionnaire_scale",
            _ => "questionnaire",
        }
    }
}
