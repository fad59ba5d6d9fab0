use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "eMedic";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prediction service endpoint. Fixed: the predictor screen always talks to
/// the service running next to it.
pub const PREDICT_URL: &str = "http://localhost:5000/predict";

/// Where the screen API listens unless `EMEDIC_API_ADDR` says otherwise.
pub const DEFAULT_API_ADDR: &str = "127.0.0.1:8100";

/// Environment variable overriding the screen API bind address.
pub const API_ADDR_ENV: &str = "EMEDIC_API_ADDR";

/// A predictor session untouched for this long is dropped when a new one opens.
pub const DOCTOR_SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on open predictor sessions; the least recently used goes first.
pub const MAX_DOCTOR_SESSIONS: usize = 64;

/// Log filter used when `RUST_LOG` is unset or invalid.
pub fn default_log_filter() -> &'static str {
    "emedic_lib=info,emedic=info,tower_http=warn"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var} value {value:?}: {reason}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, resolved once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(API_ADDR_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDR.to_string());

        let api_addr = raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidAddr {
            var: API_ADDR_ENV,
            value: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { api_addr })
    }
}
