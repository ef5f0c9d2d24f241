// handlers/profiles.rs - investor profile endpoints
//
// Creation and risk-relevant updates both run the risk engine; the stored
// profile always carries the classification of its current inputs.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::profile::{InvestorProfile, NewProfile, ProfilePatch};

/// POST /api/profiles - Create a profile and its initial classification
pub async fn profile_post(
    State(state): State<AppState>,
    payload: Result<Json<NewProfile>, JsonRejection>,
) -> ApiResult<InvestorProfile> {
    let Json(new) = payload?;
    let profile = state.profiles.create(new).await?;
    Ok(ApiResponse::created(profile))
}

/// GET /api/profiles/:id
pub async fn profile_get(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<InvestorProfile> {
    let id = profile_id(id)?;
    Ok(ApiResponse::success(state.profiles.get(id).await?))
}

/// PATCH /api/profiles/:id - Partial update, reclassifying when risk inputs change
pub async fn profile_patch(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProfilePatch>, JsonRejection>,
) -> ApiResult<InvestorProfile> {
    let id = profile_id(id)?;
    let Json(patch) = payload?;
    Ok(ApiResponse::success(state.profiles.update(id, patch).await?))
}

fn profile_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Profile id must be a UUID"))
}
