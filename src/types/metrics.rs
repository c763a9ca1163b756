//! Per-ask metrics. Fully derived from the response and the model's rates;
//! nothing here is persisted.

use serde::{Deserialize, Serialize};

use super::price::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheTokens {
    /// Tokens served from the provider's prompt cache.
    pub get: u64,
    /// Tokens written to the provider's prompt cache.
    pub set: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenCounts {
    pub input: u64,
    pub output: u64,
    pub cache: CacheTokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CharCounts {
    pub input: u64,
    pub output: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SizeMetrics {
    pub tokens: TokenCounts,
    pub chars: CharCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheCash {
    pub get: Price,
    pub set: Price,
}

/// Cash cost broken out by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CashDeets {
    pub input: Price,
    pub output: Price,
    pub cache: CacheCash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CashCost {
    pub total: Price,
    pub deets: CashDeets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimeCost {
    pub milliseconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CostMetrics {
    pub cash: CashCost,
    pub time: TimeCost,
}

/// Size and cost of one ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AskMetrics {
    pub size: SizeMetrics,
    pub cost: CostMetrics,
}
