//! Matching orchestration

pub mod engine;

pub use engine::{
    match_volumes, run_rounds, validate_records, MatchingError, ProportionalMatcher,
    StrategyTermination, STRATEGY_ITERATION_LIMIT,
};
