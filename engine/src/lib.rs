//! Energy Matching Core - Rust Engine
//!
//! Proportional volume-matching between energy consumption demands and
//! generation supplies, with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Consumption, Generation, Path, Match, Result)
//! - **distribution**: Largest-remainder integer volume distribution
//! - **paths**: Pairing predicates and path strategies
//! - **matching**: One match round and result aggregation
//! - **orchestrator**: The proportional matcher state machine
//!
//! # Critical Invariants
//!
//! 1. All volumes are non-negative integers (u64) at every stage; fractional
//!    input volumes are rejected at the boundary, never truncated
//! 2. Matched volume plus leftover volume equals original volume exactly
//! 3. Identical input produces byte-identical serialized output (results are
//!    hashed downstream for consensus)
//! 4. The engine is a pure function: no I/O, no caller-visible mutation

// Module declarations
pub mod distribution;
pub mod matching;
pub mod models;
pub mod orchestrator;
pub mod paths;

// Re-exports for convenience
pub use distribution::distribute;
pub use matching::{compute_asks, execute_round, sum_matches};
pub use models::{
    integral_volume, Ask, Consumption, ConsumptionRecord, EnergyPriority, Generation,
    GenerationRecord, Match, MatchingPools, MatchingResult, Path, StrategyResult,
};
pub use orchestrator::{
    match_volumes, run_rounds, validate_records, MatchingError, ProportionalMatcher,
    StrategyTermination, STRATEGY_ITERATION_LIMIT,
};
pub use paths::{
    default_strategies, CartesianMatching, EnergyPriorityMatching, PathPredicate, PathStrategy,
    RegionMatching, SiteMatching,
};
