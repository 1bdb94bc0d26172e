//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `JWT_SECRET`.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub collaborators: CollaboratorsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP boundary binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

/// Quote creation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    /// Minutes until a new quote expires. A configuration constant, never
    /// chosen per call.
    #[serde(default = "default_quote_ttl_minutes")]
    pub ttl_minutes: i64,
    /// Refresh line unit prices from the catalog collaborator at quote
    /// creation. Off by default: the line price captured at add-to-cart time
    /// is authoritative.
    #[serde(default)]
    pub reprice_on_create: bool,
}

const fn default_quote_ttl_minutes() -> i64 {
    30
}

/// Endpoints and call timeout for the external collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorsConfig {
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(default = "default_tax_url")]
    pub tax_url: String,
    #[serde(default = "default_shipping_url")]
    pub shipping_url: String,
    #[serde(default = "default_payment_url")]
    pub payment_url: String,
    /// Upper bound for any single collaborator call, in milliseconds. A
    /// timed-out capture is treated as provider-unavailable, never as
    /// success.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_catalog_url() -> String {
    "http://localhost:3001".into()
}

fn default_tax_url() -> String {
    "http://localhost:3006".into()
}

fn default_shipping_url() -> String {
    "http://localhost:3007".into()
}

fn default_payment_url() -> String {
    "http://localhost:3005".into()
}

const fn default_request_timeout_ms() -> u64 {
    3000
}

/// Bearer-token verification settings.
/// The signing secret is loaded from the `JWT_SECRET` env var at runtime
/// (never from the config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Secret loaded from `JWT_SECRET` env var at runtime.
    #[serde(skip)]
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_quote_ttl_minutes(),
            reprice_on_create: false,
        }
    }
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            tax_url: default_tax_url(),
            shipping_url: default_shipping_url(),
            payment_url: default_payment_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            quote: QuoteConfig::default(),
            collaborators: CollaboratorsConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // Secret comes from the environment only, for the same reason wallets
        // never live in config files.
        config.auth.jwt_secret = std::env::var("JWT_SECRET").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind_addr",
                reason: format!("not a socket address: {}", self.server.bind_addr),
            });
        }
        if self.quote.ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "quote.ttl_minutes",
                reason: "must be positive".into(),
            });
        }
        if self.collaborators.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collaborators.request_timeout_ms",
                reason: "must be positive".into(),
            });
        }
        for (field, value) in [
            ("collaborators.catalog_url", &self.collaborators.catalog_url),
            ("collaborators.tax_url", &self.collaborators.tax_url),
            (
                "collaborators.shipping_url",
                &self.collaborators.shipping_url,
            ),
            ("collaborators.payment_url", &self.collaborators.payment_url),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("not a URL: {value}"),
                });
            }
        }
        Ok(())
    }

    /// Collaborator call timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborators.request_timeout_ms)
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quote.ttl_minutes, 30);
        assert!(!config.quote.reprice_on_create);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.collaborators.request_timeout_ms, 3000);
    }

    #[test]
    fn ttl_must_be_positive() {
        let config: Config = toml::from_str("[quote]\nttl_minutes = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "quote.ttl_minutes",
                ..
            })
        ));
    }

    #[test]
    fn bind_addr_must_parse() {
        let config: Config = toml::from_str("[server]\nbind_addr = \"nonsense\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn collaborator_urls_must_parse() {
        let config: Config =
            toml::from_str("[collaborators]\npayment_url = \"not a url\"\n").unwrap();
        assert!(config.validate().is_err());
    }
}
