use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::risk::{normalize_questionnaire, RiskEngine, RiskInput};

use super::error::ProfileError;
use super::model::{age_on, InvestorProfile, NewProfile, ProfilePatch};
use super::store::ProfileStore;

/// Profile lifecycle with risk classification at creation and on update
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    engine: RiskEngine,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>, engine: RiskEngine) -> Self {
        Self { store, engine }
    }

    pub async fn create(&self, new: NewProfile) -> Result<InvestorProfile, ProfileError> {
        self.create_as_of(new, Utc::now().date_naive()).await
    }

    pub async fn update(&self, id: Uuid, patch: ProfilePatch) -> Result<InvestorProfile, ProfileError> {
        self.update_as_of(id, patch, Utc::now().date_naive()).await
    }

    pub async fn get(&self, id: Uuid) -> Result<InvestorProfile, ProfileError> {
        self.store.get(id).await
    }

    /// Create a profile, computing its initial classification as of `today`
    pub async fn create_as_of(&self, new: NewProfile, today: NaiveDate) -> Result<InvestorProfile, ProfileError> {
        let input = RiskInput {
            age: age_on(new.date_of_birth, today)?,
            annual_income: new.income.annual(),
            dependents: new.dependents,
            time_horizon: new.time_horizon,
            questionnaire: normalize_questionnaire(&new.questionnaire)?,
        };
        let result = self.engine.assess(&input)?;

        let now = Utc::now();
        let profile = InvestorProfile {
            id: Uuid::new_v4(),
            date_of_birth: new.date_of_birth,
            annual_income: input.annual_income,
            dependents: input.dependents,
            time_horizon: input.time_horizon,
            goal_name: new.goal_name,
            questionnaire: input.questionnaire,
            risk_score: result.risk_score,
            risk_level: result.risk_level,
            created_at: now,
            updated_at: now,
        };

        let profile = self.store.insert(profile).await?;
        info!(
            profile_id = %profile.id,
            risk_score = profile.risk_score,
            risk_level = profile.risk_level.value(),
            "Created investor profile"
        );
        Ok(profile)
    }

    /// Apply a patch; the classification is recomputed when a risk input changed
    pub async fn update_as_of(
        &self,
        id: Uuid,
        patch: ProfilePatch,
        today: NaiveDate,
    ) -> Result<InvestorProfile, ProfileError> {
        if patch.is_empty() {
            return Err(ProfileError::EmptyPatch);
        }

        let recompute = patch.touches_risk_inputs();
        let engine = self.engine.clone();

        let profile = self
            .store
            .update_with(
                id,
                Box::new(move |profile: &mut InvestorProfile| -> Result<(), ProfileError> {
                    profile.apply(patch)?;
                    if recompute {
                        let result = engine.assess(&profile.risk_input(today)?)?;
                        profile.set_classification(&result);
                    }
                    profile.updated_at = Utc::now();
                    Ok(())
                }),
            )
            .await?;

        if recompute {
            info!(
                profile_id = %profile.id,
                risk_score = profile.risk_score,
                risk_level = profile.risk_level.value(),
                "Recomputed risk classification"
            );
        }
        Ok(profile)
    }
}
