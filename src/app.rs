use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::profile::{MemoryProfileStore, ProfileService};
use crate::risk::{RiskEngine, RiskError};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: RiskEngine,
    pub profiles: ProfileService,
}

impl AppState {
    /// Build state from configuration with the in-memory profile store
    pub fn from_config(config: &AppConfig) -> Result<Self, RiskError> {
        let engine = RiskEngine::new(config.risk.scale()?);
        let profiles = ProfileService::new(Arc::new(MemoryProfileStore::new()), engine.clone());
        Ok(Self { engine, profiles })
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(risk_routes())
        .merge(profile_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn risk_routes() -> Router<AppState> {
    use handlers::risk;

    Router::new()
        .route("/api/risk/assess", post(risk::assess_post))
        .route("/api/risk/levels", get(risk::levels_get))
}

fn profile_routes() -> Router<AppState> {
    use handlers::profiles;

    Router::new()
        .route("/api/profiles", post(profiles::profile_post))
        .route(
            "/api/profiles/:id",
            get(profiles::profile_get).patch(profiles::profile_patch),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE])
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Risk Profile API",
            "version": version,
            "description": "Investor risk scoring and profile classification",
            "endpoints": {
                "health": "/health",
                "assess": "POST /api/risk/assess",
                "levels": "GET /api/risk/levels",
                "profiles": "POST /api/profiles, GET|PATCH /api/profiles/:id",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
