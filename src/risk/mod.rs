//! Investor risk scoring.
//!
//! Pure and synchronous: `normalize_questionnaire` -> `compute_risk_score`
//! -> `compute_risk_level`, or all three at once through [`RiskEngine`].

pub mod engine;
pub mod error;
pub mod input;
pub mod level;
pub mod questionnaire;
pub mod score;

pub use engine::{RiskEngine, RiskResult};
pub use error::RiskError;
pub use input::{IncomeBasis, QuestionnaireScale, RiskInput};
pub use level::{compute_risk_level, RiskLevel, RiskLevelInfo};
pub use questionnaire::{normalize_questionnaire, RawQuestionnaire};
pub use score::{compute_risk_score, score_factors, RiskFactors};
