use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use greenhouse_core::monitoring::recorder::{DEFAULT_CAPACITY, DEFAULT_SUPPRESSION_SECS};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the controller board. Commands are only logged when unset.
    pub controller_url: Option<String>,
    /// Maximum number of entries in the alert log (default: `50`).
    pub alert_log_capacity: usize,
    /// Repeat alerts for the same metric and severity are suppressed for
    /// this many seconds (default: `300`).
    pub alert_suppression_secs: i64,
    /// Directory of the dashboard's static files, served as the fallback.
    pub static_dir: Option<PathBuf>,
    /// How often the retention job purges old readings (default: `3600`).
    pub retention_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            controller_url: None,
            alert_log_capacity: DEFAULT_CAPACITY,
            alert_suppression_secs: DEFAULT_SUPPRESSION_SECS,
            static_dir: None,
            retention_interval_secs: 3600,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `CONTROLLER_URL`          | unset                   |
    /// | `ALERT_LOG_CAPACITY`      | `50`                    |
    /// | `ALERT_SUPPRESSION_SECS`  | `300`                   |
    /// | `STATIC_DIR`              | unset                   |
    /// | `RETENTION_INTERVAL_SECS` | `3600`                  |
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let cors_origins = match optional_var("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let alert_log_capacity: usize = parse_var("ALERT_LOG_CAPACITY", defaults.alert_log_capacity)?;
        let alert_suppression_secs: i64 =
            parse_var("ALERT_SUPPRESSION_SECS", defaults.alert_suppression_secs)?;

        let config = Self {
            host: optional_var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            controller_url: optional_var("CONTROLLER_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            alert_log_capacity,
            alert_suppression_secs,
            static_dir: optional_var("STATIC_DIR").map(PathBuf::from),
            retention_interval_secs: parse_var(
                "RETENTION_INTERVAL_SECS",
                defaults.retention_interval_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.alert_log_capacity == 0 {
            anyhow::bail!("ALERT_LOG_CAPACITY must be at least 1");
        }
        if self.alert_suppression_secs < 0 {
            anyhow::bail!("ALERT_SUPPRESSION_SECS must not be negative");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        // tokio::time::interval panics on a zero period.
        if self.retention_interval_secs == 0 {
            anyhow::bail!("RETENTION_INTERVAL_SECS must be at least 1");
        }
        Ok(())
    }
}

/// Read a non-empty environment variable.
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
