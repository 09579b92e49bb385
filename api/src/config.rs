use std::time::Duration;

use rocket::figment::Figment;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::StartupError;

/// Service settings, read from `Rocket.toml` and `ROCKET_*` variables
/// alongside Rocket's own configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub redis_url: Option<String>,
    pub request_timeout_secs: u64,
    pub cors_allowed_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: "http://localhost:3000/api".to_string(),
            session_secret: String::new(),
            session_ttl_secs: 24 * 60 * 60,
            redis_url: None,
            request_timeout_secs: 15,
            cors_allowed_origin: "*".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, StartupError> {
        let mut config: AppConfig = figment.extract().map_err(Box::new)?;
        if config.session_secret.is_empty() {
            warn!("no session_secret configured, sessions will not survive a restart");
            config.session_secret = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use rocket::figment::providers::Serialized;

    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let figment = Figment::from(Serialized::defaults(serde_json::json!({
            "api_base_url": "https://api.rentify.test",
            "port": 8000
        })));

        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.api_base_url, "https://api.rentify.test");
        assert_eq!(config.session_ttl_secs, 86400);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.session_secret.len(), 64);
    }
}
