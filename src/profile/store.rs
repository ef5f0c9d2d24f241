use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::ProfileError;
use super::model::InvestorProfile;

/// Mutation run by [`ProfileStore::update_with`] while the record is held
pub type ProfileUpdate = Box<dyn FnOnce(&mut InvestorProfile) -> Result<(), ProfileError> + Send>;

/// Persistence seam for investor profiles.
///
/// `update_with` must run the closure and the write-back as one critical
/// section so a concurrent risk recomputation is never lost.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert(&self, profile: InvestorProfile) -> Result<InvestorProfile, ProfileError>;

    async fn get(&self, id: Uuid) -> Result<InvestorProfile, ProfileError>;

    /// Apply `update` to the stored profile. Nothing is written if it fails.
    async fn update_with(&self, id: Uuid, update: ProfileUpdate) -> Result<InvestorProfile, ProfileError>;
}

/// In-process store backed by a `RwLock<HashMap>`
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, InvestorProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn insert(&self, profile: InvestorProfile) -> Result<InvestorProfile, ProfileError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(ProfileError::AlreadyExists(profile.id));
        }
        profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn get(&self, id: Uuid) -> Result<InvestorProfile, ProfileError> {
        self.profiles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ProfileError::NotFound(id))
    }

    async fn update_with(&self, id: Uuid, update: ProfileUpdate) -> Result<InvestorProfile, ProfileError> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles.get_mut(&id).ok_or(ProfileError::NotFound(id))?;

        // Work on a copy so a failed update leaves the record untouched
        let mut working = stored.clone();
        update(&mut working)?;
        *stored = working.clone();
        Ok(working)
    }
}
