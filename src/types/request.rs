//! Ask requests and results.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::brief::Brief;
use super::episode::{Episode, Series};
use super::metrics::AskMetrics;

/// One logical question.
///
/// The output schema is passed alongside the request to
/// [`BrainAtom::ask`](crate::atom::BrainAtom::ask), since it also fixes the
/// result's output type.
#[derive(Debug, Clone, Default, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
    /// Woven, in order, into a single system message.
    pub briefs: Vec<Brief>,
    /// Prior exchanges of the same conversation, replayed on every call.
    pub prior_episode: Option<Episode>,
}

impl AskRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_briefs(mut self, briefs: Vec<Brief>) -> Self {
        self.briefs = briefs;
        self
    }

    pub fn with_brief(mut self, brief: Brief) -> Self {
        self.briefs.push(brief);
        self
    }

    /// Continue an earlier conversation.
    pub fn on_episode(mut self, episode: Episode) -> Self {
        self.prior_episode = Some(episode);
        self
    }
}

/// A completed, metered, schema-validated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResult<T> {
    pub output: T,
    pub metrics: AskMetrics,
    /// Prior exchanges plus this one.
    pub episode: Episode,
    /// Always `None`: atoms continue episodes, never series.
    pub series: Option<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exchange;

    #[test]
    fn test_empty_prompt_fails_validation() {
        assert!(AskRequest::new("").validate().is_err());
        assert!(AskRequest::new("say hello").validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let episode = Episode::single(Exchange::new("a", "b"));
        let request = AskRequest::new("q")
            .with_brief(Brief::new("one.md", "1"))
            .with_brief(Brief::new("two.md", "2"))
            .on_episode(episode.clone());

        assert_eq!(request.briefs.len(), 2);
        assert_eq!(request.briefs[1].uri, "two.md");
        assert_eq!(request.prior_episode, Some(episode));
    }
}
