use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::risk::{QuestionnaireScale, RiskError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub risk: RiskConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Questionnaire contract the engine is built with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    pub questionnaire_low: i64,
    pub questionnaire_high: i64,
    /// `None` accepts any non-empty questionnaire length
    pub questionnaire_length: Option<usize>,
}

impl RiskConfig {
    pub fn scale(&self) -> Result<QuestionnaireScale, RiskError> {
        QuestionnaireScale::new(
            self.questionnaire_low,
            self.questionnaire_high,
            self.questionnaire_length,
        )
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        let scale = QuestionnaireScale::default();
        Self {
            questionnaire_low: scale.low(),
            questionnaire_high: scale.high(),
            questionnaire_length: scale.expected_len(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides; PORT is honoured for container platforms
        if let Some(v) = env::var("RISK_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Risk overrides
        if let Ok(v) = env::var("RISK_QUESTIONNAIRE_LOW") {
            self.risk.questionnaire_low = v.parse().unwrap_or(self.risk.questionnaire_low);
        }
        if let Ok(v) = env::var("RISK_QUESTIONNAIRE_HIGH") {
            self.risk.questionnaire_high = v.parse().unwrap_or(self.risk.questionnaire_high);
        }
        if let Ok(v) = env::var("RISK_QUESTIONNAIRE_LENGTH") {
            // "any" lifts the fixed-length requirement
            self.risk.questionnaire_length = match v.as_str() {
                "any" | "" => None,
                n => n.parse().ok().or(self.risk.questionnaire_length),
            };
        }

        self
    }

    pub(crate) fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            risk: RiskConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            risk: RiskConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 8080,
                enable_request_logging: false,
                max_request_size_bytes: 64 * 1024,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            risk: RiskConfig::default(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.port, 3000);
        assert!(config.api.enable_request_logging);
        assert_eq!(config.risk.questionnaire_length, Some(8));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.security.cors_origins, vec!["https://app.example.com".to_string()]);
    }

    #[test]
    fn test_risk_config_builds_default_scale() {
        let scale = RiskConfig::default().scale().unwrap();
        assert_eq!(scale, QuestionnaireScale::default());
    }

    #[test]
    fn test_inverted_risk_scale_is_rejected() {
        let config = RiskConfig {
            questionnaire_low: 5,
            questionnaire_high: 1,
            questionnaire_length: None,
        };
        assert!(config.scale().is_err());
    }
}
