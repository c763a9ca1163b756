//! Briefs: documents folded into the system prompt to ground an answer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AtomError;

/// A named document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brief {
    /// Where the content came from (file path, URL, artifact id).
    pub uri: String,
    pub content: String,
}

impl Brief {
    pub fn new(uri: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            content: content.into(),
        }
    }

    /// Load a brief from a file on disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AtomError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AtomError::ConfigurationError(format!(
                "Failed to read brief {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self::new(path.display().to_string(), content))
    }

    /// Load several briefs, preserving order.
    pub async fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Self>, AtomError> {
        let mut briefs = Vec::with_capacity(paths.len());
        for path in paths {
            briefs.push(Self::from_path(path).await?);
        }
        Ok(briefs)
    }
}
