//! Metric derivation: token counts, cash cost, elapsed time.
//!
//! Everything here is a pure function of the response and the model's rates.

use std::time::Duration;

use crate::standards::chat::{ChatMessage, ChatUsage};
use crate::types::{
    AskMetrics, CacheCash, CacheTokens, CashCost, CashDeets, CashRates, CharCounts, CostMetrics,
    SizeMetrics, TimeCost, TokenCounts,
};

use super::compose::count_chars;

/// Token counts from the usage block. Missing fields count as zero.
///
/// `cache.set` is always zero: the adapter never asks the endpoint to write
/// a cache entry.
pub fn token_counts(usage: Option<&ChatUsage>) -> TokenCounts {
    let Some(usage) = usage else {
        return TokenCounts::default();
    };
    TokenCounts {
        input: usage.prompt_tokens.unwrap_or(0),
        output: usage.completion_tokens.unwrap_or(0),
        cache: CacheTokens {
            get: usage
                .prompt_tokens_details
                .as_ref()
                .and_then(|details| details.cached_tokens)
                .unwrap_or(0),
            set: 0,
        },
    }
}

/// Price token counts against per-token rates.
///
/// `input` counts every prompt token, cached or not; cached tokens are billed
/// at the cache rate, so only the uncached remainder is billed at the input
/// rate.
pub fn calc_cash_cost(tokens: &TokenCounts, rates: &CashRates) -> CashCost {
    let uncached_input = tokens.input.saturating_sub(tokens.cache.get);
    let deets = CashDeets {
        input: rates.input.times(uncached_input),
        output: rates.output.times(tokens.output),
        cache: CacheCash {
            get: rates.cache.get.times(tokens.cache.get),
            set: rates.cache.set.times(tokens.cache.set),
        },
    };
    let total = deets.input + deets.output + deets.cache.get + deets.cache.set;
    CashCost { total, deets }
}

/// Assemble the full metrics for one completed ask.
pub fn derive_metrics(
    messages: &[ChatMessage],
    output_text: &str,
    usage: Option<&ChatUsage>,
    rates: &CashRates,
    elapsed: Duration,
) -> AskMetrics {
    let tokens = token_counts(usage);
    let chars = CharCounts {
        input: count_chars(messages),
        output: output_text.chars().count() as u64,
    };

    AskMetrics {
        size: SizeMetrics { tokens, chars },
        cost: CostMetrics {
            cash: calc_cash_cost(&tokens, rates),
            time: TimeCost {
                milliseconds: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            },
        },
    }
}
