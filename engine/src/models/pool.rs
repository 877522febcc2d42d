//! Private working pools for one matching invocation
//!
//! The orchestrator clones validated entities into a `MatchingPools` arena
//! once per invocation and mutates nothing but the `volume` fields, by the
//! exact amount matched in each round. The arena is owned exclusively by the
//! invocation that built it and never aliased outside it, which is what keeps
//! caller-owned input untouched.
//!
//! # Critical Invariants
//!
//! - Entities are keyed by id and never duplicated or re-created mid-run
//! - A decrement never exceeds the entity's remaining volume (conservation)
//! - Input order is preserved, so leftover order is deterministic

use std::collections::HashMap;

use super::entity::{Consumption, Generation};
use super::matches::Match;

/// Working state arena: live entity volumes keyed by id, input order preserved
#[derive(Debug, Clone)]
pub struct MatchingPools {
    consumptions: Vec<Consumption>,
    generations: Vec<Generation>,
    consumption_index: HashMap<String, usize>,
    generation_index: HashMap<String, usize>,
}

impl MatchingPools {
    pub fn new(consumptions: Vec<Consumption>, generations: Vec<Generation>) -> Self {
        let consumption_index = consumptions
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let generation_index = generations
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.clone(), i))
            .collect();
        Self {
            consumptions,
            generations,
            consumption_index,
            generation_index,
        }
    }

    /// Clones of all consumptions that still have volume to match
    pub fn active_consumptions(&self) -> Vec<Consumption> {
        self.consumptions
            .iter()
            .filter(|c| c.volume > 0)
            .cloned()
            .collect()
    }

    /// Clones of all generations that still have volume to match
    pub fn active_generations(&self) -> Vec<Generation> {
        self.generations
            .iter()
            .filter(|g| g.volume > 0)
            .cloned()
            .collect()
    }

    /// Subtract a match's volume from both of its entities
    ///
    /// Matches always originate from a round computed against this arena, so
    /// the decrement can never exceed the remaining volume; the debug assert
    /// pins that invariant and release builds saturate rather than wrap.
    pub fn apply_match(&mut self, matched: &Match) {
        if let Some(&i) = self.consumption_index.get(&matched.consumption_id) {
            let consumption = &mut self.consumptions[i];
            debug_assert!(consumption.volume >= matched.volume);
            consumption.volume = consumption.volume.saturating_sub(matched.volume);
        }
        if let Some(&i) = self.generation_index.get(&matched.generation_id) {
            let generation = &mut self.generations[i];
            debug_assert!(generation.volume >= matched.volume);
            generation.volume = generation.volume.saturating_sub(matched.volume);
        }
    }

    /// Remaining positive-volume entities, in input order
    pub fn leftovers(self) -> (Vec<Consumption>, Vec<Generation>) {
        let consumptions = self
            .consumptions
            .into_iter()
            .filter(|c| c.volume > 0)
            .collect();
        let generations = self
            .generations
            .into_iter()
            .filter(|g| g.volume > 0)
            .collect();
        (consumptions, generations)
    }
}
