//! Server configuration from environment variables.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `PERSONA_QUIZ_HOST` — bind address (default: `0.0.0.0`)
//! - `PERSONA_QUIZ_REGISTRY_DIR` — directory with `questions.yaml`,
//!   `personas.yaml`, `candidates.yaml` and `share.yaml` overrides
//! - `PERSONA_QUIZ_PUBLIC_URL` — base URL result links point at
//!   (default: `http://localhost:8080`)
//! - `RUST_LOG` — tracing filter (default: `info,persona_quiz=debug`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::share::ShareConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILTER: &str = "info,persona_quiz=debug";
pub const SHARE_FILE: &str = "share.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_public_url() -> String {
    DEFAULT_PUBLIC_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub registry_dir: Option<PathBuf>,
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default)]
    pub share: ShareConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            registry_dir: None,
            public_url: default_public_url(),
            share: ShareConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = var("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(host) = var("PERSONA_QUIZ_HOST") {
            config.host = host;
        }
        if let Some(url) = var("PERSONA_QUIZ_PUBLIC_URL") {
            config.public_url = url;
        }
        if let Some(dir) = var("PERSONA_QUIZ_REGISTRY_DIR") {
            let dir = PathBuf::from(dir);
            config.share = load_share_config(&dir)?;
            config.registry_dir = Some(dir);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `share.yaml` from `dir`, or the default wording when there is none.
pub fn load_share_config(dir: &Path) -> Result<ShareConfig, ConfigError> {
    let path = dir.join(SHARE_FILE);
    if !path.is_file() {
        return Ok(ShareConfig::default());
    }
    let yaml = std::fs::read_to_string(&path)?;
    let config = serde_yaml::from_str(&yaml)?;
    log::debug!("Loaded share config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("PERSONA_QUIZ_HOST", "127.0.0.1"),
            ("PERSONA_QUIZ_PUBLIC_URL", "https://quiz.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.public_url, "https://quiz.example.com");
        assert!(config.registry_dir.is_none());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", ""), ("PERSONA_QUIZ_HOST", " ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "eighty"));
    }

    #[test]
    fn test_share_config_from_registry_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SHARE_FILE), "hashtags: [DevQuiz, Rust]\n").unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();

        let config =
            ServerConfig::from_lookup(lookup(&[("PERSONA_QUIZ_REGISTRY_DIR", dir_str.as_str())]))
                .unwrap();
        assert_eq!(config.registry_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.share.hashtags, vec!["DevQuiz", "Rust"]);
    }

    #[test]
    fn test_missing_share_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_share_config(dir.path()).unwrap(), ShareConfig::default());
    }
}
