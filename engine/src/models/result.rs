//! Matching result structures
//!
//! The result is serialized (JSON) and independently hashed by an external
//! collaborator, so field order and entry order must be stable: struct fields
//! serialize in declaration order, matches in first-seen order, leftovers in
//! input order, strategy results in execution order.

use serde::{Deserialize, Serialize};

use super::entity::{Consumption, Generation};
use super::matches::Match;

/// Matches independently contributed by one strategy (observability output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    /// Strategy display name, e.g. `"site"` or `"energy-priority(2, same-region)"`
    pub strategy_name: String,

    /// Same-pair-summed matches this strategy produced on its own
    pub matches: Vec<Match>,
}

/// Complete output of one matching invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    /// All matches across all strategies, summed per (consumption, generation) pair
    pub matches: Vec<Match>,

    /// Consumptions with positive volume left after the last strategy
    pub leftover_consumptions: Vec<Consumption>,

    /// Generations with positive volume left after the last strategy
    pub leftover_generations: Vec<Generation>,

    /// Per-strategy contribution, in strategy execution order
    pub strategy_results: Vec<StrategyResult>,
}

impl MatchingResult {
    /// Total matched volume across all pairs
    pub fn total_matched_volume(&self) -> u64 {
        self.matches.iter().map(|m| m.volume).sum()
    }
}
