//! Domain models for the matching engine

pub mod entity;
pub mod matches;
pub mod pool;
pub mod result;

// Re-exports
pub use entity::{
    integral_volume, Consumption, ConsumptionRecord, EnergyPriority, Generation, GenerationRecord,
};
pub use matches::{Ask, Match, Path};
pub use pool::MatchingPools;
pub use result::{MatchingResult, StrategyResult};
