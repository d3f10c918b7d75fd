// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development. Cloud Run injects the
//! same variables directly.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TTS_TIMEOUT_SECS: u64 = 30;

/// Which document store implementation backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or its emulator).
    Firestore,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    pub store_backend: StoreBackend,
    /// Service-account key file for Text-to-Speech. Unset disables TTS.
    pub tts_credentials_path: Option<PathBuf>,
    /// Upper bound on a single document store call
    pub store_timeout: Duration,
    /// Upper bound on a single speech synthesis call
    pub tts_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            tts_credentials_path: None,
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            tts_timeout: Duration::from_secs(DEFAULT_TTS_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Config used by tests: in-memory store, TTS unconfigured.
    pub fn test_default() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend: StoreBackend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "firestore".to_string())
            .parse()?;

        let gcp_project_id = match (env::var("GCP_PROJECT_ID"), store_backend) {
            (Ok(id), _) => id,
            (Err(_), StoreBackend::Memory) => "local-dev".to_string(),
            (Err(_), StoreBackend::Firestore) => {
                return Err(ConfigError::Missing("GCP_PROJECT_ID"))
            }
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_backend,
            tts_credentials_path: env::var("TTS_CREDENTIALS_PATH")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            store_timeout: Duration::from_secs(secs_from_env(
                "STORE_TIMEOUT_SECS",
                DEFAULT_STORE_TIMEOUT_SECS,
            )?),
            tts_timeout: Duration::from_secs(secs_from_env(
                "TTS_TIMEOUT_SECS",
                DEFAULT_TTS_TIMEOUT_SECS,
            )?),
        })
    }
}

fn secs_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::Invalid(name, raw)),
        },
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(
            "Memory".parse::<StoreBackend>().unwrap(),
            StoreBackend::Memory
        );
        assert_eq!(
            " firestore ".parse::<StoreBackend>().unwrap(),
            StoreBackend::Firestore
        );
        assert!(matches!(
            "postgres".parse::<StoreBackend>(),
            Err(ConfigError::Invalid("STORE_BACKEND", _))
        ));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::set_var("STORE_BACKEND", "memory");
        env::remove_var("GCP_PROJECT_ID");
        env::set_var("STORE_TIMEOUT_SECS", "3");
        env::remove_var("TTS_TIMEOUT_SECS");
        env::set_var("TTS_CREDENTIALS_PATH", "  ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.gcp_project_id, "local-dev");
        assert_eq!(config.store_timeout, Duration::from_secs(3));
        assert_eq!(
            config.tts_timeout,
            Duration::from_secs(DEFAULT_TTS_TIMEOUT_SECS)
        );
        assert!(config.tts_credentials_path.is_none());

        env::set_var("STORE_TIMEOUT_SECS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("STORE_TIMEOUT_SECS", _))
        ));

        env::set_var("STORE_TIMEOUT_SECS", "3");
        env::set_var("STORE_BACKEND", "firestore");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("GCP_PROJECT_ID"))
        ));

        env::remove_var("STORE_BACKEND");
        env::remove_var("STORE_TIMEOUT_SECS");
        env::remove_var("TTS_CREDENTIALS_PATH");
    }
}
