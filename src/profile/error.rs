use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::risk::RiskError;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(Uuid),

    #[error("Profile already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("Date of birth is in the future: {0}")]
    InvalidDateOfBirth(NaiveDate),

    #[error("Update contains no fields")]
    EmptyPatch,

    #[error(transparent)]
    Risk(#[from] RiskError),
}
