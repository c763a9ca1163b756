//! `xAI` Configuration
//!
//! Credentials and transport settings for the xAI chat-completions endpoint.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::AtomError;

/// Default xAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "XAI_API_KEY";

/// Optional environment override for the base URL.
pub const BASE_URL_ENV: &str = "XAI_BASE_URL";

/// HTTP transport settings.
///
/// No timeout is set by default; deadlines belong to the caller or to this
/// configuration, never to the ask pipeline.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// Proxy settings
    pub proxy: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
}

/// `xAI` provider configuration.
///
/// # Example
/// ```rust,ignore
/// use brains_xai::config::XaiConfig;
///
/// let config = XaiConfig::new("your-api-key").with_base_url("https://api.x.ai/v1");
/// ```
#[derive(Debug, Clone)]
pub struct XaiConfig {
    /// `xAI` API key (securely stored)
    pub api_key: SecretString,

    /// Base URL for the `xAI` API
    pub base_url: String,

    /// HTTP configuration
    pub http_config: HttpConfig,
}

impl XaiConfig {
    /// Create a new `xAI` configuration with the given API key.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_config: HttpConfig::default(),
        }
    }

    /// Read `XAI_API_KEY` (and optionally `XAI_BASE_URL`) from the process
    /// environment.
    ///
    /// A missing or empty key fails here, before any network attempt.
    pub fn from_env() -> Result<Self, AtomError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AtomError::ConfigurationError(format!(
                    "{API_KEY_ENV} is required but not set"
                ))
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV)
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the base URL for the `xAI` API.
    pub fn with_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set HTTP configuration
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set the request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Get the authorization header value.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// `{base_url}/chat/completions`, tolerating a trailing slash.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), AtomError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(AtomError::ConfigurationError(
                "API key cannot be empty".to_string(),
            ));
        }

        if self.base_url.is_empty() {
            return Err(AtomError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AtomError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
