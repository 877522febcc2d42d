//! Path generation: predicates and strategies
//!
//! Strategies produce candidate (consumption, generation) pairings for one
//! round; predicates filter those pairings by regional policy. Both are pure
//! functions of the entities they are handed and never touch volumes.

pub mod predicates;
pub mod strategies;

pub use predicates::PathPredicate;
pub use strategies::{
    default_strategies, referenced_priorities, CartesianMatching, EnergyPriorityMatching,
    PathStrategy, RegionMatching, SiteMatching,
};
