//! Investor profiles: the caller side of the risk engine.
//!
//! A profile is classified when it is created and reclassified whenever an
//! update touches income, dependents, horizon, date of birth or answers.

pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::ProfileError;
pub use model::{age_on, InvestorProfile, NewProfile, ProfilePatch};
pub use service::ProfileService;
pub use store::{MemoryProfileStore, ProfileStore, ProfileUpdate};
