//! Conversation continuation handles.
//!
//! An [`Episode`] is the only state that survives between asks, and the atom
//! never stores it: the caller threads it from one result into the next
//! request. Appending produces a new value; the prior episode is untouched.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One prompt/response pair, recorded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// The prompt as the caller wrote it (briefs are not included).
    pub input: String,
    /// Raw response text, before JSON parsing.
    pub output: String,
    /// Remote response id, when the endpoint returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exid: Option<String>,
}

impl Exchange {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            exid: None,
        }
    }

    pub fn with_exid(mut self, exid: impl Into<String>) -> Self {
        self.exid = Some(exid.into());
        self
    }
}

/// Ordered, immutable record of prior exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// SHA-256 over the exchanges; equal histories hash equally.
    pub hash: String,
    /// External correlation id of the most recent exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exid: Option<String>,
    pub exchanges: Vec<Exchange>,
}

impl Episode {
    /// Build an episode from exchanges in chronological order.
    pub fn new(exchanges: Vec<Exchange>) -> Self {
        let hash = hash_exchanges(&exchanges);
        let exid = exchanges.last().and_then(|e| e.exid.clone());
        Self {
            hash,
            exid,
            exchanges,
        }
    }

    /// An episode holding exactly one exchange.
    pub fn single(exchange: Exchange) -> Self {
        Self::new(vec![exchange])
    }

    /// A new episode with `exchange` appended after the existing ones.
    pub fn append(&self, exchange: Exchange) -> Self {
        let mut exchanges = self.exchanges.clone();
        exchanges.push(exchange);
        Self::new(exchanges)
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

/// Append to an optional prior episode, starting a fresh one when absent.
pub fn continue_episode(prior: Option<&Episode>, exchange: Exchange) -> Episode {
    match prior {
        Some(episode) => episode.append(exchange),
        None => Episode::single(exchange),
    }
}

/// Grouping above episodes. This atom never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub hash: String,
    pub episodes: Vec<Episode>,
}

fn hash_exchanges(exchanges: &[Exchange]) -> String {
    let mut hasher = Sha256::new();
    for exchange in exchanges {
        // length-prefixed so ("ab","c") and ("a","bc") differ
        for part in [&exchange.input, &exchange.output] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part.as_bytes());
        }
        match &exchange.exid {
            Some(exid) => {
                hasher.update([1u8]);
                hasher.update((exid.len() as u64).to_be_bytes());
                hasher.update(exid.as_bytes());
            }
            None => hasher.update([0u8]),
        }
    }
    hex::encode(hasher.finalize())
}
