use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for moddesk
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModdeskConfig {
    /// Backend API settings
    pub backend: BackendConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Session/token settings
    pub session: SessionConfig,
    /// Moderation list defaults
    pub moderation: ModerationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the platform API
    pub base_url: String,
    /// Bearer token (can be set via env var)
    pub token: Option<String>,
    /// Refresh token paired with the bearer token
    pub refresh_token: Option<String>,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per minute limit
    pub requests_per_minute: u32,
    /// Burst capacity
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable structured tracing output
    pub tracing_enabled: bool,
    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Periodic token refresh interval in seconds
    pub refresh_interval_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationConfig {
    /// Default page size for moderation lists
    pub page_size: u32,
}

impl Default for ModdeskConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:5000".to_string(),
                token: None, // Read from env var or moddesk.toml
                refresh_token: None,
                rate_limit: RateLimitConfig {
                    requests_per_minute: 300,
                    burst_capacity: 20,
                },
            },
            observability: ObservabilityConfig {
                tracing_enabled: true,
                log_level: "info".to_string(),
            },
            session: SessionConfig {
                refresh_interval_seconds: 600, // 10 minutes
            },
            moderation: ModerationConfig { page_size: 20 },
        }
    }
}

impl ModdeskConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (moddesk.toml, .moddesk-rc)
    /// 3. Environment variables (prefixed with MODDESK_)
    pub fn load() -> Result<Self> {
        let defaults = ModdeskConfig::default();
        let mut builder = Config::builder()
            .add_source(Config::try_from(&defaults)?);

        if Path::new("moddesk.toml").exists() {
            builder = builder.add_source(File::with_name("moddesk"));
        }

        if Path::new(".moddesk-rc").exists() {
            builder = builder.add_source(File::with_name(".moddesk-rc"));
        }

        builder = builder.add_source(
            Environment::with_prefix("MODDESK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut moddesk_config: ModdeskConfig = config.try_deserialize()?;

        // Token fallbacks outside the structured config
        if moddesk_config.backend.token.is_none() {
            if let Ok(token) = std::env::var("MODDESK_API_TOKEN") {
                moddesk_config.backend.token = Some(token);
            }
        }
        if moddesk_config.backend.refresh_token.is_none() {
            if let Ok(token) = std::env::var("MODDESK_REFRESH_TOKEN") {
                moddesk_config.backend.refresh_token = Some(token);
            }
        }

        Ok(moddesk_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<ModdeskConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = ModdeskConfig::load_env_file();
        ModdeskConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static ModdeskConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = ModdeskConfig::default();
        assert!(cfg.backend.base_url.starts_with("http"));
        assert!(cfg.backend.rate_limit.requests_per_minute > 0);
        assert!(cfg.session.refresh_interval_seconds > 0);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = ModdeskConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moddesk.toml");
        cfg.save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: ModdeskConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.backend.base_url, cfg.backend.base_url);
        assert_eq!(parsed.moderation.page_size, cfg.moderation.page_size);
    }
}
