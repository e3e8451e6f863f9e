//! Application configuration loaded from environment variables.
//!
//! The data mode is chosen once at startup: `live` talks to the hosted
//! backend, `demo` serves the built-in fixture data with demo accounts.

use std::env;
use std::str::FromStr;

/// Which backend the process is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Hosted auth + REST tables.
    Live,
    /// In-memory fixture store and hardcoded demo accounts.
    Demo,
}

impl FromStr for DataMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(DataMode::Live),
            "demo" => Ok(DataMode::Demo),
            other => Err(ConfigError::Invalid("APP_MODE", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Live backend or demo fixtures
    pub mode: DataMode,
    /// Base URL of the hosted backend (live mode)
    pub supabase_url: Option<String>,
    /// Public anon key sent as `apikey` (live mode)
    pub supabase_anon_key: Option<String>,
    /// Signing key for demo-mode session tokens (raw bytes)
    pub demo_signing_key: Vec<u8>,
    /// Public URL the dashboard is served from
    pub public_url: String,
    /// Server port
    pub port: u16,
}

const DEFAULT_DEMO_SIGNING_KEY: &str = "gym-dashboard-demo-signing-key!!";

impl Config {
    /// Config for tests: demo mode on localhost.
    pub fn test_default() -> Self {
        Self {
            mode: DataMode::Demo,
            supabase_url: None,
            supabase_anon_key: None,
            demo_signing_key: b"test_demo_key_32_bytes_minimum!!".to_vec(),
            public_url: "http://localhost:8080".to_string(),
            port: 8080,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mode = env::var("APP_MODE")
            .map(|v| v.parse())
            .unwrap_or(Ok(DataMode::Demo))?;

        let supabase_url = env::var("SUPABASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string());
        let supabase_anon_key = env::var("SUPABASE_ANON_KEY")
            .ok()
            .map(|v| v.trim().to_string());

        if mode == DataMode::Live {
            if supabase_url.is_none() {
                return Err(ConfigError::Missing("SUPABASE_URL"));
            }
            if supabase_anon_key.is_none() {
                return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
            }
        }

        Ok(Self {
            mode,
            supabase_url,
            supabase_anon_key,
            demo_signing_key: env::var("DEMO_SIGNING_KEY")
                .unwrap_or_else(|_| DEFAULT_DEMO_SIGNING_KEY.to_string())
                .into_bytes(),
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Session cookies are `Secure` unless served from plain-HTTP localhost.
    pub fn secure_cookies(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
