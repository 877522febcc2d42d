//! Proportional matcher - the orchestrating state machine
//!
//! One invocation walks a fixed sequence:
//!
//! ```text
//! 1. Validate input (all volumes non-negative integers, or fail listing ids)
//! 2. Clone validated entities into a private working arena
//! 3. Build the ordered strategy list (most specific first)
//! 4. Per strategy: repeat rounds against the shrinking pools until a round
//!    yields zero matches, decrementing matched volume as it goes
//! 5. Sum all matches per pair; positive-volume remnants become leftovers
//! ```
//!
//! The per-strategy loop is bounded by an iteration ceiling. Hitting it means
//! a strategy or distributor stopped reducing leftover volume, which is a
//! logic defect, not legitimate convergence, so it surfaces as a fatal error
//! rather than looping forever.
//!
//! # Critical Invariants
//!
//! - Caller-owned input is never mutated; the arena is invocation-private
//! - Matched + leftover volume equals original volume for every entity
//! - Same input produces byte-identical serialized output

use thiserror::Error;

use crate::matching::{execute_round, sum_matches};
use crate::models::{
    Consumption, ConsumptionRecord, Generation, GenerationRecord, Match, MatchingPools,
    MatchingResult, StrategyResult,
};
use crate::paths::{default_strategies, PathStrategy};

/// Ceiling on rounds a single strategy may run before the loop is declared
/// defective. Legitimate convergence stays far below this.
pub const STRATEGY_ITERATION_LIMIT: usize = 50_000;

/// Errors that can abort a matching invocation
#[derive(Debug, Error, PartialEq)]
pub enum MatchingError {
    /// One or more input volumes are not non-negative integers.
    /// Raised before any matching work begins; no partial output exists.
    #[error("input volumes must be non-negative integers; offending entities: {}", .ids.join(", "))]
    InvalidInput {
        /// Offending entity ids in input order, consumptions first
        ids: Vec<String>,
    },

    /// A strategy's repeat-until-exhausted loop hit the iteration ceiling
    #[error("strategy '{strategy}' exceeded the iteration ceiling of {limit} rounds")]
    IterationLimitExceeded { strategy: String, limit: usize },
}

/// Why a strategy's round loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyTermination {
    /// A round produced zero matches: the strategy is exhausted
    Exhausted {
        /// Number of productive rounds that ran before exhaustion
        rounds: usize,
    },

    /// The loop ran `limit` productive rounds without exhausting
    LimitExceeded,
}

/// Run one strategy's rounds until exhaustion or the iteration ceiling
///
/// `round` is called once per iteration and must return the matches of that
/// round (already applied to whatever state it closes over). An empty round
/// terminates the loop. The accumulated matches are returned together with a
/// typed termination reason; the caller decides whether `LimitExceeded` is
/// fatal.
pub fn run_rounds<F>(limit: usize, mut round: F) -> (Vec<Match>, StrategyTermination)
where
    F: FnMut(usize) -> Vec<Match>,
{
    let mut all_matches = Vec::new();
    for round_index in 0..limit {
        let round_matches = round(round_index);
        if round_matches.is_empty() {
            return (
                all_matches,
                StrategyTermination::Exhausted {
                    rounds: round_index,
                },
            );
        }
        all_matches.extend(round_matches);
    }
    (all_matches, StrategyTermination::LimitExceeded)
}

/// Validate boundary records into engine entities
///
/// Every volume must be a finite, non-negative whole number. Offending
/// entity ids are aggregated into a single error, consumptions first, each
/// list in input order, and nothing is processed when any id offends.
pub fn validate_records(
    consumption_records: &[ConsumptionRecord],
    generation_records: &[GenerationRecord],
) -> Result<(Vec<Consumption>, Vec<Generation>), MatchingError> {
    let mut offending = Vec::new();

    let mut consumptions = Vec::with_capacity(consumption_records.len());
    for record in consumption_records {
        match Consumption::from_record(record) {
            Some(consumption) => consumptions.push(consumption),
            None => offending.push(record.id.clone()),
        }
    }

    let mut generations = Vec::with_capacity(generation_records.len());
    for record in generation_records {
        match Generation::from_record(record) {
            Some(generation) => generations.push(generation),
            None => offending.push(record.id.clone()),
        }
    }

    if offending.is_empty() {
        Ok((consumptions, generations))
    } else {
        Err(MatchingError::InvalidInput { ids: offending })
    }
}

/// The proportional volume-matching engine
///
/// Stateless across invocations: every call to [`match_volumes`] validates,
/// clones and matches independently. Construction only fixes the iteration
/// ceiling and, optionally, an explicit strategy list (the default list is
/// derived per input from the priorities its consumptions reference).
///
/// # Example
///
/// ```
/// use energy_matching_core_rs::{ConsumptionRecord, GenerationRecord, ProportionalMatcher};
///
/// let consumptions = vec![ConsumptionRecord::new("c1", 24.0, "s1", "r1", "pl")];
/// let generations = vec![GenerationRecord::new("g1", 10.0, "s1", "r1", "pl", "solar")];
///
/// let result = ProportionalMatcher::new()
///     .match_volumes(&consumptions, &generations)
///     .unwrap();
///
/// assert_eq!(result.matches.len(), 1);
/// assert_eq!(result.matches[0].volume, 10);
/// assert_eq!(result.leftover_consumptions[0].volume, 14);
/// assert!(result.leftover_generations.is_empty());
/// ```
///
/// [`match_volumes`]: ProportionalMatcher::match_volumes
pub struct ProportionalMatcher {
    iteration_limit: usize,
    strategies: Option<Vec<Box<dyn PathStrategy>>>,
}

impl ProportionalMatcher {
    /// Matcher with the default strategy order and iteration ceiling
    pub fn new() -> Self {
        Self {
            iteration_limit: STRATEGY_ITERATION_LIMIT,
            strategies: None,
        }
    }

    /// Replace the default strategy list with an explicit ordered one
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn PathStrategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Override the iteration ceiling (tests only in practice)
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Match consumption demand against generation supply
    ///
    /// Pure with respect to the caller: input records are read once during
    /// validation and never mutated. All empty-candidate conditions are
    /// normal `Ok` outcomes with empty collections; only invalid volumes and
    /// the iteration ceiling produce errors.
    pub fn match_volumes(
        &self,
        consumption_records: &[ConsumptionRecord],
        generation_records: &[GenerationRecord],
    ) -> Result<MatchingResult, MatchingError> {
        let (consumptions, generations) =
            validate_records(consumption_records, generation_records)?;

        let default_list;
        let strategies: &[Box<dyn PathStrategy>] = match &self.strategies {
            Some(list) => list,
            None => {
                default_list = default_strategies(&consumptions);
                &default_list
            }
        };

        let mut pools = MatchingPools::new(consumptions, generations);
        let mut all_matches: Vec<Match> = Vec::new();
        let mut strategy_results: Vec<StrategyResult> = Vec::new();

        for strategy in strategies {
            let (strategy_matches, termination) =
                run_rounds(self.iteration_limit, |_round| {
                    let active_consumptions = pools.active_consumptions();
                    let active_generations = pools.active_generations();
                    if active_consumptions.is_empty() || active_generations.is_empty() {
                        return Vec::new();
                    }

                    let paths = strategy.execute(&active_consumptions, &active_generations);
                    let round_matches = sum_matches(&execute_round(
                        &active_consumptions,
                        &active_generations,
                        &paths,
                    ));
                    for matched in &round_matches {
                        pools.apply_match(matched);
                    }
                    round_matches
                });

            if termination == StrategyTermination::LimitExceeded {
                return Err(MatchingError::IterationLimitExceeded {
                    strategy: strategy.name(),
                    limit: self.iteration_limit,
                });
            }

            all_matches.extend(strategy_matches.iter().cloned());
            strategy_results.push(StrategyResult {
                strategy_name: strategy.name(),
                matches: sum_matches(&strategy_matches),
            });
        }

        let matches = sum_matches(&all_matches);
        let (leftover_consumptions, leftover_generations) = pools.leftovers();

        Ok(MatchingResult {
            matches,
            leftover_consumptions,
            leftover_generations,
            strategy_results,
        })
    }
}

impl Default for ProportionalMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Match with a default [`ProportionalMatcher`]
pub fn match_volumes(
    consumptions: &[ConsumptionRecord],
    generations: &[GenerationRecord],
) -> Result<MatchingResult, MatchingError> {
    ProportionalMatcher::new().match_volumes(consumptions, generations)
}
