//! Layered configuration for the inventory desk client.
//!
//! Configuration is loaded in layers with increasing priority:
//! 1. Compiled-in defaults (local API server, conservative timeouts)
//! 2. TOML configuration file (if provided)
//! 3. Environment variable overrides (prefix `INVENTORY_`, nested with `__`)
//! 4. `INVENTORY_API_TOKEN` for the bearer token
//!
//! The bearer token is only ever read from the environment, never from a
//! configuration file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Environment variable holding the bearer token.
pub const TOKEN_ENV_VAR: &str = "INVENTORY_API_TOKEN";

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_buffer_size() -> usize {
    64
}

fn default_clear_after_ms() -> u64 {
    3_000
}

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Remote API connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Loaded from [`TOKEN_ENV_VAR`] only.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// API gateway actor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

/// Transient notice settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_clear_after_ms")]
    pub clear_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: default_clear_after_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }
}

impl ClientConfig {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder()
            // ── Layer 1: compiled-in defaults ───────────────────────
            .set_default("api.base_url", default_base_url())?
            .set_default("api.timeout_ms", default_timeout_ms() as i64)?
            .set_default("gateway.buffer_size", default_buffer_size() as i64)?
            .set_default("notifications.clear_after_ms", default_clear_after_ms() as i64)?;

        // ── Layer 2: TOML file ─────────────────────────────────────
        if let Some(path) = config_path {
            let path_str = path.to_str().context("config path is not valid UTF-8")?;
            builder = builder.add_source(File::with_name(path_str).required(true));
        }

        // ── Layer 3: env var overrides (INVENTORY_ prefix) ────────
        builder = builder.add_source(
            Environment::with_prefix("INVENTORY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut cfg: ClientConfig = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        // ── Layer 4: bearer token ──────────────────────────────────
        cfg.api.token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
        cfg.api.base_url = cfg.api.base_url.trim_end_matches('/').to_string();

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api.base_url, "http://localhost:4000");
        assert_eq!(cfg.api.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.gateway.buffer_size, 64);
        assert_eq!(cfg.notifications.clear_after(), Duration::from_secs(3));
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("inventory-desk-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("desk.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nbase_url = \"https://inventory.example.com/\"\n\n[notifications]\nclear_after_ms = 500").unwrap();

        let cfg = ClientConfig::load(Some(path)).unwrap();
        assert_eq!(cfg.api.base_url, "https://inventory.example.com");
        assert_eq!(cfg.api.timeout_ms, 10_000);
        assert_eq!(cfg.notifications.clear_after_ms, 500);

        std::fs::remove_dir_all(dir).ok();
    }
}
