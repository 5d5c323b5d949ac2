//! Provider configuration: API key and endpoints

use regex::Regex;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

use crate::api::common::{DEFAULT_ENDPOINT, DEFAULT_V2_ENDPOINT};
use crate::api::RetryConfig;

pub const API_KEY_ENV: &str = "KOMODOR_API_KEY";
pub const TOKEN_ENV: &str = "KOMODOR_TOKEN";
pub const ENDPOINT_ENV: &str = "KOMODOR_ENDPOINT";
pub const V2_ENDPOINT_ENV: &str = "KOMODOR_V2_ENDPOINT";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = [API_KEY_ENV, TOKEN_ENV];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api_key must be set (in provider config or the KOMODOR_API_KEY / KOMODOR_TOKEN env vars)")]
    MissingApiKey,

    #[error("API key must be 36 characters long and only contain characters 0-9, a-f and '-' (all lowercase)")]
    InvalidApiKey,

    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub v2_endpoint: String,
    pub retry: RetryConfig,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            v2_endpoint: DEFAULT_V2_ENDPOINT.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Build the configuration from the environment.
    ///
    /// Unset endpoints keep the public defaults. A missing key is reported
    /// by [`ProviderConfig::validate`], not here.
    pub fn from_env() -> Self {
        Self::from_values(None, None, None)
    }

    /// Explicit values win over environment variables.
    pub fn from_values(
        api_key: Option<String>,
        endpoint: Option<String>,
        v2_endpoint: Option<String>,
    ) -> Self {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
            })
            .unwrap_or_default();

        let endpoint = endpoint
            .or_else(|| env::var(ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let v2_endpoint = v2_endpoint
            .or_else(|| env::var(V2_ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_V2_ENDPOINT.to_string());

        Self {
            api_key,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            v2_endpoint: v2_endpoint.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if !api_key_pattern().is_match(&self.api_key) {
            return Err(ConfigError::InvalidApiKey);
        }

        for endpoint in [&self.endpoint, &self.v2_endpoint] {
            url::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}

const API_KEY_PATTERN: &str = "^[0-9a-f-]{36}$";

// The pattern is a literal, so compiling it cannot fail at runtime.
fn api_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(API_KEY_PATTERN).unwrap())
}
