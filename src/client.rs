//! Chat-completion transport.
//!
//! [`ChatTransport`] is the seam between the ask pipeline and the network:
//! the pipeline hands over one fully-formed request and gets back one decoded
//! response. [`XaiHttpClient`] is the reqwest-backed implementation; tests
//! and hosts with their own networking can supply any other.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;

use crate::config::{HttpConfig, XaiConfig};
use crate::error::AtomError;
use crate::standards::chat::{ChatCompletionRequest, ChatCompletionResponse};

/// One synchronous request/response round trip.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AtomError>;
}

/// Build HTTP headers for `xAI` API requests
pub fn build_headers(
    api_key: &str,
    additional_headers: &HashMap<String, String>,
) -> Result<HeaderMap, AtomError> {
    let mut headers = HeaderMap::new();
    let auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| AtomError::ConfigurationError(format!("Invalid API key: {e}")))?;
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (k, v) in additional_headers {
        let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
            AtomError::ConfigurationError(format!("Invalid header name '{k}': {e}"))
        })?;
        let value = HeaderValue::from_str(v).map_err(|e| {
            AtomError::ConfigurationError(format!("Invalid header value for '{k}': {e}"))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Build a reqwest client from [`HttpConfig`].
pub fn build_http_client_from_config(config: &HttpConfig) -> Result<reqwest::Client, AtomError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| AtomError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder
        .build()
        .map_err(|e| AtomError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
}

/// reqwest-backed transport for `https://api.x.ai/v1/chat/completions`.
#[derive(Clone)]
pub struct XaiHttpClient {
    config: XaiConfig,
    http_client: reqwest::Client,
    headers: HeaderMap,
}

impl XaiHttpClient {
    /// Validate `config` and build a fresh reqwest client for it.
    pub fn new(config: XaiConfig) -> Result<Self, AtomError> {
        let http_client = build_http_client_from_config(&config.http_config)?;
        Self::with_http_client(config, http_client)
    }

    /// Reuse an existing reqwest client (connection pool shared across atoms).
    pub fn with_http_client(
        config: XaiConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, AtomError> {
        config.validate()?;
        let headers = build_headers(
            config.api_key.expose_secret(),
            &config.http_config.headers,
        )?;
        Ok(Self {
            config,
            http_client,
            headers,
        })
    }

    /// Credentials from `XAI_API_KEY`; fails before any request if unset.
    pub fn from_env() -> Result<Self, AtomError> {
        Self::new(XaiConfig::from_env()?)
    }

    pub fn config(&self) -> &XaiConfig {
        &self.config
    }
}

impl std::fmt::Debug for XaiHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XaiHttpClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatTransport for XaiHttpClient {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AtomError> {
        let url = self.config.chat_completions_url();
        tracing::debug!(target: "brains_xai::http", url = %url, model = %request.model, "sending request");

        let resp = self
            .http_client
            .post(&url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(target: "brains_xai::http", url = %url, err = %e, "request error");
                AtomError::HttpError(e.to_string())
            })?;

        let status = resp.status();
        tracing::debug!(target: "brains_xai::http", url = %url, status = %status.as_u16(), "response received");

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let details = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(AtomError::ApiError {
                code: status.as_u16(),
                message: text,
                details,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| AtomError::HttpError(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| AtomError::ApiError {
            code: status.as_u16(),
            message: format!("Failed to decode chat completion envelope: {e}"),
            details: None,
        })
    }
}
