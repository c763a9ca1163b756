//! # brains-xai
//!
//! xAI (Grok) models behind the uniform brain-atom ask contract.
//!
//! A host picks a slug, gets a [`BrainAtom`], and asks it questions. Each ask
//! makes one chat-completion call with a strict JSON-schema response format,
//! validates the answer against the caller's schema, and returns it together
//! with token, cash and time metrics and the extended conversation episode.
//!
//! ```rust,ignore
//! use brains_xai::{AskRequest, BrainAtom, JsonSchemaOutput, content_schema};
//!
//! let atom = BrainAtom::from_slug("xai/grok/code-fast-1")?;
//! let schema = JsonSchemaOutput::new(content_schema())?;
//!
//! let first = atom.ask(AskRequest::new("remember PAPAYA99"), &schema).await?;
//! let second = atom
//!     .ask(AskRequest::new("what was the code?").on_episode(first.episode), &schema)
//!     .await?;
//! println!("{} ({})", second.output["content"], second.metrics.cost.cash.total);
//! ```
//!
//! Credentials come from `XAI_API_KEY` unless an explicit [`XaiConfig`] or
//! [`ChatTransport`] is supplied.

#![deny(unsafe_code)]

pub mod atom;
pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod sdk;
pub mod standards;
pub mod telemetry;
pub mod types;

pub use atom::BrainAtom;
pub use client::{ChatTransport, XaiHttpClient};
pub use config::{HttpConfig, XaiConfig};
pub use error::{AtomError, ErrorCategory};
pub use registry::{ModelConfig, ModelRegistry};
pub use sdk::{brain_atoms_by_xai, gen_brain_atom};
pub use types::{
    AskMetrics, AskRequest, AskResult, BrainSpec, Brief, Episode, Exchange, JsonSchemaOutput,
    OutputSchema, Price, Series, TypedOutput, content_schema,
};
pub use tokio_util::sync::CancellationToken;
