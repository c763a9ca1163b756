//! Brain specs: what a model costs and what it offers.
//!
//! A spec is static data copied from vendor documentation. Hosts read it for
//! cost-aware scheduling; the ask pipeline reads the cash rates to price each
//! call.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// Unit that cash rates are quoted per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    #[default]
    Token,
}

/// Rates for tokens served from and written to the provider's prompt cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheRates {
    pub get: Price,
    pub set: Price,
}

/// Cash cost rates, one `Price` per token for each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CashRates {
    pub per: RateUnit,
    pub input: Price,
    pub output: Price,
    pub cache: CacheRates,
}

/// Throughput estimate. Informational only; nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    /// Generated tokens per second.
    pub speed_tokens_per_second: u32,
    /// Fixed latency before the first token, in seconds.
    pub latency_seconds: f64,
}

impl TimeEstimate {
    /// Rough wall-clock estimate for producing `output_tokens`.
    pub fn estimate_seconds(&self, output_tokens: u64) -> f64 {
        if self.speed_tokens_per_second == 0 {
            return self.latency_seconds;
        }
        self.latency_seconds + output_tokens as f64 / f64::from(self.speed_tokens_per_second)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSpec {
    pub time: TimeEstimate,
    pub cash: CashRates,
}

/// What the model is best at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    All,
    Software,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Skills {
    pub tooluse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainSpec {
    /// Upper bound on combined input size.
    pub context_tokens: u64,
    /// Sparse benchmark scores, e.g. `swe` → 70.8.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub grades: BTreeMap<String, f64>,
    /// Knowledge cutoff.
    pub cutoff: NaiveDate,
    pub domain: Domain,
    pub skills: Skills,
}

impl GainSpec {
    pub fn grade(&self, benchmark: &str) -> Option<f64> {
        self.grades.get(benchmark).copied()
    }
}

/// Cost and capability data for one model variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainSpec {
    pub cost: CostSpec,
    pub gain: GainSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_seconds() {
        let time = TimeEstimate {
            speed_tokens_per_second: 200,
            latency_seconds: 0.5,
        };
        assert!((time.estimate_seconds(400) - 2.5).abs() < f64::EPSILON);

        let stalled = TimeEstimate {
            speed_tokens_per_second: 0,
            latency_seconds: 1.0,
        };
        assert!((stalled.estimate_seconds(10_000) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_domain_serialization() {
        assert_eq!(serde_json::to_string(&Domain::Software).unwrap(), "\"SOFTWARE\"");
        assert_eq!(serde_json::to_string(&Domain::All).unwrap(), "\"ALL\"");
    }
}
