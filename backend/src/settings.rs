//! Runtime configuration loaded via OrthoConfig.
//!
//! Both binaries read CLI flags, `PREFIX_FIELD` environment variables and an
//! optional config file. Fields stay optional; accessors apply defaults and
//! validate so start-up fails with a descriptive error instead of at the
//! first checkout.

use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::RetryPolicy;

const DEFAULT_CHECKOUT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FULFILMENT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GROCERY_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_GROCERY_TIMEOUT_MS: u64 = 10_000;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// The grocery base URL does not parse.
    #[error("invalid grocery base URL {value:?}: {message}")]
    InvalidBaseUrl { value: String, message: String },
    /// A zero timeout would fail every request.
    #[error("grocery timeout must be greater than zero")]
    ZeroTimeout,
    /// At least one submission attempt is required.
    #[error("grocery max attempts must be at least 1")]
    ZeroAttempts,
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, SettingsError> {
    value
        .parse()
        .map_err(|error: std::net::AddrParseError| SettingsError::InvalidBindAddr {
            value: value.to_owned(),
            message: error.to_string(),
        })
}

/// Settings for the checkout backend binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHECKOUT")]
pub struct CheckoutSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the grocery fulfilment service.
    pub grocery_base_url: Option<String>,
    /// Per-request timeout for order submission, in milliseconds.
    pub grocery_timeout_ms: Option<u64>,
    /// Total submission attempts; 1 disables retries.
    pub grocery_max_attempts: Option<u32>,
    /// Backoff before the second attempt, in milliseconds.
    pub grocery_initial_backoff_ms: Option<u64>,
    /// Upper bound for the retry backoff, in milliseconds.
    pub grocery_max_backoff_ms: Option<u64>,
    /// JSON fixture seeding the in-memory cart store.
    pub cart_fixture: Option<PathBuf>,
}

impl CheckoutSettings {
    /// Resolve the bind address, falling back to `0.0.0.0:8000`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref().unwrap_or(DEFAULT_CHECKOUT_BIND_ADDR))
    }

    /// Resolve the grocery base URL, falling back to `http://localhost:8080/`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBaseUrl`] for unparsable values.
    pub fn grocery_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .grocery_base_url
            .as_deref()
            .unwrap_or(DEFAULT_GROCERY_BASE_URL);
        Url::parse(value).map_err(|error| SettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            message: error.to_string(),
        })
    }

    /// Resolve the request timeout, falling back to ten seconds.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroTimeout`] when configured as zero.
    pub fn grocery_timeout(&self) -> Result<Duration, SettingsError> {
        match self.grocery_timeout_ms.unwrap_or(DEFAULT_GROCERY_TIMEOUT_MS) {
            0 => Err(SettingsError::ZeroTimeout),
            ms => Ok(Duration::from_millis(ms)),
        }
    }

    /// Build the retry policy for order submission.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroAttempts`] when attempts are set to zero.
    pub fn retry_policy(&self) -> Result<RetryPolicy, SettingsError> {
        let defaults = RetryPolicy::default();
        let max_attempts = self.grocery_max_attempts.unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(SettingsError::ZeroAttempts);
        }
        Ok(RetryPolicy {
            max_attempts,
            initial_backoff: self
                .grocery_initial_backoff_ms
                .map_or(defaults.initial_backoff, Duration::from_millis),
            max_backoff: self
                .grocery_max_backoff_ms
                .map_or(defaults.max_backoff, Duration::from_millis),
        })
    }

    /// Optional cart fixture location.
    pub fn cart_fixture(&self) -> Option<&Path> {
        self.cart_fixture.as_deref()
    }
}

/// Settings for the fulfilment mock binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FULFILMENT")]
pub struct FulfilmentSettings {
    /// Socket address the mock binds to.
    pub bind_addr: Option<String>,
}

impl FulfilmentSettings {
    /// Resolve the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(
            self.bind_addr
                .as_deref()
                .unwrap_or(DEFAULT_FULFILMENT_BIND_ADDR),
        )
    }
}
