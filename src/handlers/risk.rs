// handlers/risk.rs - stateless risk scoring endpoints

use std::collections::BTreeMap;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::risk::{IncomeBasis, RawQuestionnaire, RiskLevel, RiskLevelInfo, RiskResult};

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub age: u32,
    pub income: IncomeBasis,
    #[serde(default)]
    pub dependents: u32,
    pub time_horizon: u32,
    pub questionnaire: RawQuestionnaire,
}

#[derive(Debug, Serialize)]
pub struct AssessResponse {
    #[serde(flatten)]
    pub result: RiskResult,
    pub risk_label: &'static str,
    /// Weighted contribution of each factor, before clamping
    pub contributions: BTreeMap<&'static str, f64>,
}

impl From<RiskResult> for AssessResponse {
    fn from(result: RiskResult) -> Self {
        Self {
            risk_label: result.risk_level.label(),
            contributions: result.factors.contributions().into_iter().collect(),
            result,
        }
    }
}

/**
 * POST /api/risk/assess - Score a questionnaire without storing anything
 *
 * Expected Input:
 * ```json
 * {
 *   "age": 30,
 *   "income": { "basis": "annual", "amount": 85000 },
 *   "dependents": 1,
 *   "time_horizon": 15,
 *   "questionnaire": [3, 4, 3, 5, 2, 4, 3, 3]   // or {"1": 3, "2": 4, ...}
 * }
 * ```
 */
pub async fn assess_post(
    State(state): State<AppState>,
    payload: Result<Json<AssessRequest>, JsonRejection>,
) -> ApiResult<AssessResponse> {
    let Json(req) = payload?;

    let result = state.engine.assess_raw(
        req.age,
        req.income.annual(),
        req.dependents,
        req.time_horizon,
        &req.questionnaire,
    )?;

    Ok(ApiResponse::success(result.into()))
}

/// GET /api/risk/levels - The five risk bands with their score ranges
pub async fn levels_get() -> ApiResult<Vec<RiskLevelInfo>> {
    Ok(ApiResponse::success(
        RiskLevel::ALL.iter().map(|level| level.info()).collect(),
    ))
}
