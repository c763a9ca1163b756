//! Builtin xAI model table.
//!
//! Rates: https://docs.x.ai/docs/models, quoted per million tokens.
//! Benchmarks and cutoffs: x.ai release notes for each model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ModelConfig;
use crate::types::{
    BrainSpec, CacheRates, CashRates, CostSpec, Domain, GainSpec, Price, RateUnit, Skills,
    TimeEstimate,
};

struct Row {
    slug: &'static str,
    model: &'static str,
    description: &'static str,
    speed: u32,
    latency: f64,
    input: Decimal,
    output: Decimal,
    cached: Decimal,
    context: u64,
    grades: &'static [(&'static str, f64)],
    cutoff: (i32, u32),
    domain: Domain,
}

const ROWS: &[Row] = &[
    Row {
        slug: "xai/grok/code-fast-1",
        model: "grok-code-fast-1",
        description: "grok-code-fast-1 - optimized for agentic code (256K)",
        speed: 200,
        latency: 0.5,
        input: dec!(0.20),
        output: dec!(1.50),
        cached: dec!(0.02),
        context: 256_000,
        grades: &[("swe", 70.8)],
        cutoff: (2025, 3),
        domain: Domain::Software,
    },
    Row {
        slug: "xai/grok/3",
        model: "grok-3-beta",
        description: "grok-3 - balanced (131K)",
        speed: 100,
        latency: 1.0,
        input: dec!(3),
        output: dec!(15),
        cached: dec!(0.75),
        context: 131_000,
        grades: &[],
        cutoff: (2024, 11),
        domain: Domain::All,
    },
    Row {
        slug: "xai/grok/3-mini",
        model: "grok-3-mini-beta",
        description: "grok-3-mini - fast and cost-effective (131K)",
        speed: 150,
        latency: 0.5,
        input: dec!(0.30),
        output: dec!(0.50),
        cached: dec!(0.075),
        context: 131_000,
        grades: &[],
        cutoff: (2024, 11),
        domain: Domain::All,
    },
    Row {
        slug: "xai/grok/4",
        model: "grok-4-07-09",
        description: "grok-4 - advanced (256K)",
        speed: 80,
        latency: 1.5,
        input: dec!(3),
        output: dec!(15),
        cached: dec!(0.75),
        context: 256_000,
        grades: &[("swe", 75.0), ("mmlu", 86.6), ("gpqa", 88.0), ("aime", 94.0)],
        cutoff: (2025, 7),
        domain: Domain::All,
    },
    Row {
        slug: "xai/grok/4-fast-wout-reason",
        model: "grok-4-fast-non-reasoning",
        description: "grok-4-fast non-reasoning - fast responses (2M)",
        speed: 300,
        latency: 0.3,
        input: dec!(0.20),
        output: dec!(0.50),
        cached: dec!(0.05),
        context: 2_000_000,
        grades: &[],
        cutoff: (2025, 7),
        domain: Domain::All,
    },
    Row {
        slug: "xai/grok/4-fast-with-reason",
        model: "grok-4-fast-reasoning",
        description: "grok-4-fast reasoning - chain-of-thought (2M)",
        speed: 150,
        latency: 0.5,
        input: dec!(0.20),
        output: dec!(0.50),
        cached: dec!(0.05),
        context: 2_000_000,
        grades: &[],
        cutoff: (2025, 7),
        domain: Domain::All,
    },
    Row {
        slug: "xai/grok/4.1-fast-wout-reason",
        model: "grok-4-1-fast-non-reasoning",
        description: "grok-4.1-fast non-reasoning - best tool call (2M)",
        speed: 300,
        latency: 0.3,
        input: dec!(0.20),
        output: dec!(0.50),
        cached: dec!(0.05),
        context: 2_000_000,
        grades: &[],
        cutoff: (2025, 11),
        domain: Domain::All,
    },
    Row {
        slug: "xai/grok/4.1-fast-with-reason",
        model: "grok-4-1-fast-reasoning",
        description: "grok-4.1-fast reasoning - near grok-4 capability (2M)",
        speed: 150,
        latency: 0.5,
        input: dec!(0.20),
        output: dec!(0.50),
        cached: dec!(0.05),
        context: 2_000_000,
        grades: &[("swe", 79.0)],
        cutoff: (2025, 11),
        domain: Domain::All,
    },
];

pub(super) fn entries() -> Vec<ModelConfig> {
    ROWS.iter().map(to_config).collect()
}

fn to_config(row: &Row) -> ModelConfig {
    let (year, month) = row.cutoff;
    let cutoff = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let grades: BTreeMap<String, f64> = row
        .grades
        .iter()
        .map(|(name, score)| ((*name).to_string(), *score))
        .collect();

    ModelConfig {
        slug: row.slug.to_string(),
        model: row.model.to_string(),
        description: row.description.to_string(),
        spec: BrainSpec {
            cost: CostSpec {
                time: TimeEstimate {
                    speed_tokens_per_second: row.speed,
                    latency_seconds: row.latency,
                },
                cash: CashRates {
                    per: RateUnit::Token,
                    input: Price::per_million(row.input),
                    output: Price::per_million(row.output),
                    cache: CacheRates {
                        get: Price::per_million(row.cached),
                        set: Price::ZERO,
                    },
                },
            },
            gain: GainSpec {
                context_tokens: row.context,
                grades,
                cutoff,
                domain: row.domain,
                skills: Skills { tooluse: true },
            },
        },
    }
}
