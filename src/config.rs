//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! (or the CLI) processes anything.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SERPAPI_KEY` - Search provider credential; required for auto-fetch runs
//! - `SERPAPI_ENDPOINT` - Search endpoint (default: `https://serpapi.com/search.json`)
//! - `PROVIDER_TIMEOUT_SECS` - Per-request provider timeout (default: 20, max: 120)
//! - `REFERENCE_BASELINE` - Nominal reference list size for the shared rate (default: 10)
//! - `FETCH_CONCURRENCY` - Parallel provider requests per run (default: 1, max: 16)
//! - `MAX_REQUEST_BYTES` - Request body limit for the API (default: 1 MiB)
//!
//! ```bash
//! export SERPAPI_KEY="..."
//! export FETCH_CONCURRENCY=4
//! ```

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::domain::overlap::DEFAULT_BASELINE;

pub const DEFAULT_SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Search provider API key. `None` disables auto-fetch runs.
    pub serpapi_key: Option<String>,
    pub serpapi_endpoint: String,
    /// Timeout applied to each provider request, in seconds.
    pub provider_timeout_secs: u64,
    /// Divisor for the shared rate ("top N").
    pub reference_baseline: usize,
    /// Maximum provider requests in flight during one run.
    pub fetch_concurrency: usize,
    pub max_request_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            serpapi_key: None,
            serpapi_endpoint: DEFAULT_SERPAPI_ENDPOINT.to_string(),
            provider_timeout_secs: 20,
            reference_baseline: DEFAULT_BASELINE,
            fetch_concurrency: 1,
            max_request_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        // An empty key is the same as no key
        let serpapi_key = env::var("SERPAPI_KEY").ok().filter(|k| !k.trim().is_empty());
        let serpapi_endpoint = env::var("SERPAPI_ENDPOINT").unwrap_or(defaults.serpapi_endpoint);

        let provider_timeout_secs =
            parse_var("PROVIDER_TIMEOUT_SECS")?.unwrap_or(defaults.provider_timeout_secs);
        let reference_baseline =
            parse_var("REFERENCE_BASELINE")?.unwrap_or(defaults.reference_baseline);
        let fetch_concurrency =
            parse_var("FETCH_CONCURRENCY")?.unwrap_or(defaults.fetch_concurrency);
        let max_request_bytes =
            parse_var("MAX_REQUEST_BYTES")?.unwrap_or(defaults.max_request_bytes);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            serpapi_key,
            serpapi_endpoint,
            provider_timeout_secs,
            reference_baseline,
            fetch_concurrency,
            max_request_bytes,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `serpapi_endpoint` is not an http(s) URL
    /// - a numeric setting is outside its range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let endpoint = url::Url::parse(&self.serpapi_endpoint)
            .with_context(|| {
                format!(
                    "SERPAPI_ENDPOINT is not a valid URL: '{}'",
                    self.serpapi_endpoint
                )
            })?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            anyhow::bail!(
                "SERPAPI_ENDPOINT must use http or https, got '{}'",
                self.serpapi_endpoint
            );
        }

        if self.provider_timeout_secs == 0 || self.provider_timeout_secs > 120 {
            anyhow::bail!(
                "PROVIDER_TIMEOUT_SECS must be between 1 and 120, got {}",
                self.provider_timeout_secs
            );
        }

        if self.reference_baseline == 0 || self.reference_baseline > 100 {
            anyhow::bail!(
                "REFERENCE_BASELINE must be between 1 and 100, got {}",
                self.reference_baseline
            );
        }

        if self.fetch_concurrency == 0 || self.fetch_concurrency > 16 {
            anyhow::bail!(
                "FETCH_CONCURRENCY must be between 1 and 16, got {}",
                self.fetch_concurrency
            );
        }

        if self.max_request_bytes < 1024 {
            anyhow::bail!(
                "MAX_REQUEST_BYTES must be at least 1024, got {}",
                self.max_request_bytes
            );
        }

        Ok(())
    }

    /// Returns whether auto-fetch runs are possible.
    pub fn is_auto_fetch_enabled(&self) -> bool {
        self.serpapi_key.is_some()
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if let Some(ref key) = self.serpapi_key {
            tracing::info!(
                "  Search provider: {} (key {})",
                self.serpapi_endpoint,
                mask_secret(key)
            );
        } else {
            tracing::info!("  Search provider: disabled (SERPAPI_KEY not set)");
        }

        tracing::info!("  Provider timeout: {}s", self.provider_timeout_secs);
        tracing::info!("  Reference baseline: {}", self.reference_baseline);
        tracing::info!("  Fetch concurrency: {}", self.fetch_concurrency);
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}

/// Masks a secret for logging, keeping only the last four characters.
///
/// - `abcdef123456` → `***3456`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{tail}")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
