use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config as ConfigLib, ConfigBuilder, ConfigError, Environment, builder::DefaultState};
use serde::{Deserialize, Serialize};

/// Provider-conventional variable holding the webhook secret
pub const SECRET_ENV_VAR: &str = "GH_WEBHOOK_SECRET";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared HMAC secret. Empty disables signature checks (local testing only).
    pub secret: String,
    /// Directory receiving one JSON file per accepted delivery
    pub log_dir: PathBuf,
    /// Number of deliveries kept in memory for `GET /deliveries`
    pub recent_capacity: usize,
    /// Largest accepted request body; bigger requests get `413`
    pub max_body_bytes: usize,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = if self.secret.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("WebhookConfig")
            .field("secret", &secret)
            .field("log_dir", &self.log_dir)
            .field("recent_capacity", &self.recent_capacity)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None, std::env::var(SECRET_ENV_VAR).ok())
    }

    fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
        provider_secret: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Self::set_defaults()?;
        // If env_vars is provided, we use it instead of system environment
        // This is to avoid systems variables pollution across tests
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // Should be in the format APP_SERVER__HOST or APP_WEBHOOK__SECRET
            builder = builder.add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        // GH_WEBHOOK_SECRET wins over webhook.secret, but an empty value
        // must never switch verification off
        if let Some(secret) = provider_secret.filter(|s| !s.is_empty()) {
            builder = builder.set_override("webhook.secret", secret)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Set default values for the configuration.
    /// This is used when no environment variables or config file are provided
    fn set_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLib::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("webhook.secret", "")?
            .set_default("webhook.log_dir", "webhook_logs")?
            .set_default("webhook.recent_capacity", 10)?
            // The provider caps payloads at 25 MiB
            .set_default("webhook.max_body_bytes", 25 * 1024 * 1024)
    }
}
