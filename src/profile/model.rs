use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::risk::{normalize_questionnaire, IncomeBasis, RawQuestionnaire, RiskInput, RiskLevel, RiskResult};

use super::error::ProfileError;

/// Stored investor profile with its cached risk classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorProfile {
    pub id: Uuid,
    pub date_of_birth: NaiveDate,
    pub annual_income: f64,
    pub dependents: u32,
    /// Years until the goal target date
    pub time_horizon: u32,
    pub goal_name: Option<String>,
    pub questionnaire: Vec<i64>,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a profile
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub date_of_birth: NaiveDate,
    pub income: IncomeBasis,
    #[serde(default)]
    pub dependents: u32,
    pub time_horizon: u32,
    #[serde(default)]
    pub goal_name: Option<String>,
    pub questionnaire: RawQuestionnaire,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub date_of_birth: Option<NaiveDate>,
    pub income: Option<IncomeBasis>,
    pub dependents: Option<u32>,
    pub time_horizon: Option<u32>,
    pub goal_name: Option<String>,
    pub questionnaire: Option<RawQuestionnaire>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.goal_name.is_none() && !self.touches_risk_inputs()
    }

    /// Whether applying this patch can change the risk classification
    pub fn touches_risk_inputs(&self) -> bool {
        self.date_of_birth.is_some()
            || self.income.is_some()
            || self.dependents.is_some()
            || self.time_horizon.is_some()
            || self.questionnaire.is_some()
    }
}

impl InvestorProfile {
    /// Apply a patch field by field. The cached classification is not touched.
    pub fn apply(&mut self, patch: ProfilePatch) -> Result<(), ProfileError> {
        if let Some(dob) = patch.date_of_birth {
            self.date_of_birth = dob;
        }
        if let Some(income) = patch.income {
            self.annual_income = income.annual();
        }
        if let Some(dependents) = patch.dependents {
            self.dependents = dependents;
        }
        if let Some(time_horizon) = patch.time_horizon {
            self.time_horizon = time_horizon;
        }
        if let Some(goal_name) = patch.goal_name {
            self.goal_name = Some(goal_name);
        }
        if let Some(raw) = patch.questionnaire {
            self.questionnaire = normalize_questionnaire(&raw)?;
        }
        Ok(())
    }

    /// Reduce the profile to engine input as of `today`
    pub fn risk_input(&self, today: NaiveDate) -> Result<RiskInput, ProfileError> {
        Ok(RiskInput {
            age: age_on(self.date_of_birth, today)?,
            annual_income: self.annual_income,
            dependents: self.dependents,
            time_horizon: self.time_horizon,
            questionnaire: self.questionnaire.clone(),
        })
    }

    pub fn set_classification(&mut self, result: &RiskResult) {
        self.risk_score = result.risk_score;
        self.risk_level = result.risk_level;
    }
}

/// Whole years between `date_of_birth` and `today`
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Result<u32, ProfileError> {
    today
        .years_since(date_of_birth)
        .ok_or(ProfileError::InvalidDateOfBirth(date_of_birth))
}
