//! Core types shared by the registry and the ask pipeline.

pub mod brief;
pub mod episode;
pub mod metrics;
pub mod price;
pub mod request;
pub mod schema;
pub mod spec;

pub use brief::Brief;
pub use episode::{Episode, Exchange, Series, continue_episode};
pub use metrics::{
    AskMetrics, CacheCash, CacheTokens, CashCost, CashDeets, CharCounts, CostMetrics,
    SizeMetrics, TimeCost, TokenCounts,
};
pub use price::Price;
pub use request::{AskRequest, AskResult};
pub use schema::{JsonSchemaOutput, OutputSchema, TypedOutput, ValidationError, content_schema};
pub use spec::{
    BrainSpec, CacheRates, CashRates, CostSpec, Domain, GainSpec, RateUnit, Skills, TimeEstimate,
};
