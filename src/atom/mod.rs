//! Brain atoms.
//!
//! A [`BrainAtom`] is closed over one registry entry and answers one ask per
//! call: compose messages, make exactly one chat-completion request with a
//! strict output schema, validate the answer, meter it, and extend the
//! caller's episode. No state is kept between calls.

pub mod compose;
pub mod metrics;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::client::{ChatTransport, XaiHttpClient};
use crate::config::XaiConfig;
use crate::error::AtomError;
use crate::registry::{ModelConfig, ModelRegistry};
use crate::standards::chat::{ChatCompletionRequest, ResponseFormat};
use crate::types::{
    AskRequest, AskResult, BrainSpec, Exchange, OutputSchema, continue_episode,
};

/// Repository identifier reported to the host framework.
pub const REPO: &str = "xai";

#[derive(Clone)]
enum TransportSource {
    /// Caller-supplied client, reused across asks.
    Shared(Arc<dyn ChatTransport>),
    /// Fresh client per ask, credentials read from `XAI_API_KEY`.
    Env,
}

/// One invokable xAI model behind the uniform ask contract.
#[derive(Clone)]
pub struct BrainAtom {
    pub repo: &'static str,
    pub slug: String,
    pub description: String,
    /// Cost and capability data for host-side scheduling.
    pub spec: BrainSpec,
    model: String,
    transport: TransportSource,
}

static_assertions::assert_impl_all!(BrainAtom: Send, Sync, Clone);

impl BrainAtom {
    /// Atom for a builtin slug, e.g. `xai/grok/code-fast-1`.
    ///
    /// Credentials are not read until the first ask.
    pub fn from_slug(slug: &str) -> Result<Self, AtomError> {
        Self::from_registry(ModelRegistry::builtin(), slug)
    }

    /// Atom for a slug in a caller-supplied registry.
    pub fn from_registry(registry: &ModelRegistry, slug: &str) -> Result<Self, AtomError> {
        Ok(Self::from_config(registry.lookup(slug)?.clone()))
    }

    pub fn from_config(config: ModelConfig) -> Self {
        Self {
            repo: REPO,
            slug: config.slug,
            description: config.description,
            spec: config.spec,
            model: config.model,
            transport: TransportSource::Env,
        }
    }

    /// Use `transport` for every ask instead of building a client per call.
    pub fn with_transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = TransportSource::Shared(transport);
        self
    }

    /// Use an explicit xAI configuration instead of the environment.
    pub fn with_xai_config(self, config: XaiConfig) -> Result<Self, AtomError> {
        let client = XaiHttpClient::new(config)?;
        Ok(self.with_transport(Arc::new(client)))
    }

    /// Model name sent to the endpoint.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn resolve_transport(&self) -> Result<Arc<dyn ChatTransport>, AtomError> {
        match &self.transport {
            TransportSource::Shared(transport) => Ok(Arc::clone(transport)),
            TransportSource::Env => Ok(Arc::new(XaiHttpClient::from_env()?)),
        }
    }

    /// Ask one question and get a schema-validated, metered answer.
    ///
    /// Makes exactly one remote call. Transport failures come back as
    /// [`AtomError::HttpError`] / [`AtomError::ApiError`]; content that is not
    /// JSON or fails `schema` comes back as [`AtomError::MalformedResponse`].
    pub async fn ask<T>(
        &self,
        request: AskRequest,
        schema: &dyn OutputSchema<T>,
    ) -> Result<AskResult<T>, AtomError> {
        request.validate()?;
        let transport = self.resolve_transport()?;

        let system_prompt = compose::cast_briefs_to_prompt(&request.briefs);
        let messages = compose::compose_messages(
            system_prompt,
            request.prior_episode.as_ref(),
            &request.prompt,
        );
        let chat_request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            response_format: ResponseFormat::strict_json_schema(schema.name(), schema.describe()),
            stream: false,
        };

        tracing::debug!(
            target: "brains_xai::atom",
            slug = %self.slug,
            model = %self.model,
            messages = chat_request.messages.len(),
            briefs = request.briefs.len(),
            "dispatching ask"
        );

        let dispatched_at = Instant::now();
        let response = transport.complete(&chat_request).await?;
        let elapsed = dispatched_at.elapsed();

        let content = response.content();
        let parsed: Value = serde_json::from_str(content).map_err(|e| {
            AtomError::MalformedResponse(format!("Response content is not valid JSON: {e}"))
        })?;
        let output = schema.validate(parsed)?;

        let metrics = metrics::derive_metrics(
            &chat_request.messages,
            content,
            response.usage.as_ref(),
            &self.spec.cost.cash,
            elapsed,
        );

        tracing::debug!(
            target: "brains_xai::atom",
            slug = %self.slug,
            tokens_in = metrics.size.tokens.input,
            tokens_out = metrics.size.tokens.output,
            cash = %metrics.cost.cash.total,
            ms = metrics.cost.time.milliseconds,
            "ask completed"
        );

        let exchange = Exchange {
            input: request.prompt,
            output: content.to_string(),
            exid: response.id.clone(),
        };
        let episode = continue_episode(request.prior_episode.as_ref(), exchange);

        Ok(AskResult {
            output,
            metrics,
            episode,
            series: None,
        })
    }

    /// [`ask`](Self::ask), abandoning the in-flight request when `cancel` fires.
    pub async fn ask_with_cancel<T>(
        &self,
        request: AskRequest,
        schema: &dyn OutputSchema<T>,
        cancel: &CancellationToken,
    ) -> Result<AskResult<T>, AtomError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(target: "brains_xai::atom", slug = %self.slug, "ask cancelled");
                Err(AtomError::Cancelled)
            }
            result = self.ask(request, schema) => result,
        }
    }
}

impl std::fmt::Debug for BrainAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrainAtom")
            .field("repo", &self.repo)
            .field("slug", &self.slug)
            .field("model", &self.model)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
