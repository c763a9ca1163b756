//! Model registry.
//!
//! An immutable slug → [`ModelConfig`] mapping. The builtin xAI table is
//! constructed once per process; custom tables (synthetic pricing for tests,
//! private deployments) go through [`ModelRegistry::from_entries`]. Either
//! way the registry is handed to the atom rather than consulted as a global.

mod xai;

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::AtomError;
use crate::types::BrainSpec;

/// Invocation parameters for one model variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Stable external identifier, e.g. `xai/grok/code-fast-1`.
    pub slug: String,
    /// Model name sent to the endpoint, e.g. `grok-code-fast-1`.
    pub model: String,
    pub description: String,
    pub spec: BrainSpec,
}

impl ModelConfig {
    pub fn context_window_tokens(&self) -> u64 {
        self.spec.gain.context_tokens
    }
}

/// Immutable model table.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    by_slug: BTreeMap<String, ModelConfig>,
}

lazy_static! {
    static ref BUILTIN: ModelRegistry = ModelRegistry::xai();
}

impl ModelRegistry {
    /// The builtin xAI table.
    pub fn xai() -> Self {
        let by_slug = xai::entries()
            .into_iter()
            .map(|entry| (entry.slug.clone(), entry))
            .collect();
        Self { by_slug }
    }

    /// Shared instance of the builtin table.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a registry from arbitrary entries. Duplicate slugs are rejected.
    pub fn from_entries(entries: impl IntoIterator<Item = ModelConfig>) -> Result<Self, AtomError> {
        let mut by_slug = BTreeMap::new();
        for entry in entries {
            if entry.slug.is_empty() {
                return Err(AtomError::ConfigurationError(
                    "Model slug cannot be empty".to_string(),
                ));
            }
            if by_slug.contains_key(&entry.slug) {
                return Err(AtomError::ConfigurationError(format!(
                    "Duplicate model slug: {}",
                    entry.slug
                )));
            }
            by_slug.insert(entry.slug.clone(), entry);
        }
        Ok(Self { by_slug })
    }

    /// Find the entry for `slug`. Never substitutes a default model.
    pub fn lookup(&self, slug: &str) -> Result<&ModelConfig, AtomError> {
        self.by_slug.get(slug).ok_or_else(|| {
            AtomError::ConfigurationError(format!("Unknown model slug: {slug}"))
        })
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Slugs in sorted order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.by_slug.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ModelConfig> {
        self.by_slug.values()
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_builtin_has_all_slugs() {
        let registry = ModelRegistry::builtin();
        assert_eq!(registry.len(), 8);
        for slug in [
            "xai/grok/code-fast-1",
            "xai/grok/3",
            "xai/grok/3-mini",
            "xai/grok/4",
            "xai/grok/4-fast-wout-reason",
            "xai/grok/4-fast-with-reason",
            "xai/grok/4.1-fast-wout-reason",
            "xai/grok/4.1-fast-with-reason",
        ] {
            assert!(registry.contains(slug), "missing {slug}");
        }
    }

    #[test]
    fn test_lookup_unknown_slug() {
        let err = ModelRegistry::builtin().lookup("unknown/slug").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_pricing_and_context_are_sane() {
        for entry in ModelRegistry::builtin().entries() {
            let cash = &entry.spec.cost.cash;
            for price in [cash.input, cash.output, cash.cache.get, cash.cache.set] {
                assert!(!price.amount().is_sign_negative(), "{}", entry.slug);
            }
            assert!(entry.context_window_tokens() > 0, "{}", entry.slug);
            assert_ne!(entry.spec.gain.cutoff, chrono::NaiveDate::MIN, "{}", entry.slug);
            assert!(entry.spec.gain.cutoff.year() >= 2024, "{}", entry.slug);
            assert!(!entry.model.is_empty());
            assert!(!entry.description.is_empty());
        }
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let entry = ModelRegistry::builtin()
            .lookup("xai/grok/3")
            .unwrap()
            .clone();
        let err = ModelRegistry::from_entries([entry.clone(), entry]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_slug_to_remote_model() {
        let registry = ModelRegistry::xai();
        assert_eq!(
            registry.lookup("xai/grok/code-fast-1").unwrap().model,
            "grok-code-fast-1"
        );
        assert_eq!(registry.lookup("xai/grok/4").unwrap().model, "grok-4-07-09");
        assert_eq!(
            registry.lookup("xai/grok/4.1-fast-with-reason").unwrap().model,
            "grok-4-1-fast-reasoning"
        );
    }
}
