//! Error Handling Module
//!
//! A single error type, [`AtomError`], covers every way an ask can fail:
//! configuration problems caught before any network attempt, transport
//! failures during the one remote call, and responses that do not satisfy
//! the caller's output schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use brains_xai::error::{AtomError, ErrorCategory};
//!
//! let error = AtomError::api_error(404, "model not found");
//! assert_eq!(error.category(), ErrorCategory::Transport);
//! assert!(error.is_transport());
//! ```

use thiserror::Error;

/// Coarse error classes, used by callers to decide whether to re-prompt,
/// fix their setup, or give up on the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unknown slug, missing credential, invalid base URL.
    Configuration,
    /// The request itself was rejected locally (e.g. empty prompt).
    Client,
    /// Network or endpoint failure during the remote call.
    Transport,
    /// The endpoint answered, but the answer is not valid for the schema.
    MalformedResponse,
    /// The caller cancelled the in-flight request.
    Cancelled,
}

/// Errors surfaced by the brain atom.
///
/// Nothing here is retried internally; every variant reaches the immediate
/// caller as-is.
#[derive(Error, Debug)]
pub enum AtomError {
    /// Unknown slug, missing `XAI_API_KEY`, or otherwise unusable configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request rejected before dispatch.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Connection, TLS, timeout or body-read failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success status returned by the endpoint, or an unreadable envelope.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Response content was not JSON, or failed schema validation.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The ask was cancelled before the endpoint answered.
    #[error("Request cancelled")]
    Cancelled,
}

impl AtomError {
    /// Build an [`AtomError::ApiError`] without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Classify the error.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InvalidParameter(_) => ErrorCategory::Client,
            Self::HttpError(_) | Self::ApiError { .. } => ErrorCategory::Transport,
            Self::MalformedResponse(_) => ErrorCategory::MalformedResponse,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// True for failures of the remote call itself.
    pub const fn is_transport(&self) -> bool {
        matches!(self.category(), ErrorCategory::Transport)
    }

    /// True when the endpoint answered with content the schema rejects.
    pub const fn is_malformed_response(&self) -> bool {
        matches!(self.category(), ErrorCategory::MalformedResponse)
    }

    /// True for unknown slugs and missing credentials.
    pub const fn is_configuration(&self) -> bool {
        matches!(self.category(), ErrorCategory::Configuration)
    }

    /// HTTP status code, when the endpoint returned one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AtomError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::api_error(status.as_u16(), err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AtomError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}
