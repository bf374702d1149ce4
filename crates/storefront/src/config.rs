//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SHOUTOUT_API_URL` - Base URL of the shoutout REST API (e.g. `https://api.example.com/api`)
//! - `STRIPE_PUBLISHABLE_KEY` - Publishable key for the hosted payment element
//!   (only in `payment` checkout mode)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHOUTOUT_API_TIMEOUT_SECS` - Outbound request timeout (default: 15)
//! - `SHOUTOUT_CHECKOUT_MODE` - `payment` (default) or `direct`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How an order form submission is turned into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutMode {
    /// Create a payment intent and confirm it with the hosted payment element.
    #[default]
    Payment,
    /// Place the order directly, without payment.
    Direct,
}

impl FromStr for CheckoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payment" => Ok(Self::Payment),
            "direct" => Ok(Self::Direct),
            other => Err(format!("expected 'payment' or 'direct', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the Sentry DSN.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Shoutout REST API configuration
    pub api: ApiConfig,
    /// Order placement mode
    pub checkout_mode: CheckoutMode,
    /// Hosted payment element configuration (payment mode only)
    pub stripe: Option<StripeConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Shoutout REST API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Client-wide request timeout
    pub timeout: Duration,
}

/// Hosted payment element configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Publishable key (safe to expose in the browser)
    pub publishable_key: String,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("api", &self.api)
            .field("checkout_mode", &self.checkout_mode)
            .field("stripe", &self.stripe)
            .field(
                "sentry_dsn",
                &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_env(env, "STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env(env, "STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env(env, "STOREFRONT_BASE_URL")?;

        let api = ApiConfig::from_lookup(env)?;
        let checkout_mode = parse_env(env, "SHOUTOUT_CHECKOUT_MODE", "payment")?;
        let stripe = match checkout_mode {
            CheckoutMode::Payment => Some(StripeConfig::from_lookup(env)?),
            CheckoutMode::Direct => None,
        };

        let sentry_dsn = get_optional_env(env, "SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get_optional_env(env, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_sample_rate(env, "SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_sample_rate(env, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            base_url,
            api,
            checkout_mode,
            stripe,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ApiConfig {
    fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = get_required_env(env, "SHOUTOUT_API_URL")?;
        let mut base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("SHOUTOUT_API_URL".to_string(), e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOUTOUT_API_URL".to_string(),
                "must be an absolute http(s) URL".to_string(),
            ));
        }
        // Endpoint paths are appended as segments; drop the trailing slash
        if base_url.path().ends_with('/') {
            let trimmed = base_url.path().trim_end_matches('/').to_string();
            base_url.set_path(&trimmed);
        }

        let timeout_secs: u64 = parse_env(env, "SHOUTOUT_API_TIMEOUT_SECS", "15")?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOUTOUT_API_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl StripeConfig {
    fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let publishable_key = get_required_env(env, "STRIPE_PUBLISHABLE_KEY")?;
        if !publishable_key.starts_with("pk_") {
            return Err(ConfigError::InvalidEnvVar(
                "STRIPE_PUBLISHABLE_KEY".to_string(),
                "must be a publishable key (pk_...)".to_string(),
            ));
        }
        Ok(Self { publishable_key })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    get_optional_env(env, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(env, key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(env: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(env, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a Sentry sample rate, which must lie in `0.0..=1.0`.
fn parse_sample_rate(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env(env, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
