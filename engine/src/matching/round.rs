//! One round of proportional matching over a fixed path set
//!
//! A round runs the volume distributor twice:
//!
//! 1. **Ask pass** (consumer side): each consumer splits its remaining volume
//!    proportionally across the generators its paths reach, producing asks.
//! 2. **Match pass** (generator side): each generator splits its remaining
//!    volume proportionally across the asks it received, capped so no
//!    consumer is ever given more than it asked for.
//!
//! Both passes sort their weights descending before distributing, which is
//! where the distributor's tie-break fairness comes from. Zero-volume asks
//! and zero-volume grants are discarded, never emitted.
//!
//! # Critical Invariants
//!
//! - A consumer's asks sum to exactly its volume (uncapped distribution)
//! - A generator's grants sum to at most its volume and each grant is at most
//!   the corresponding ask (capped distribution)
//! - A consumer with no paths produces no asks; a generator with no asks
//!   produces no matches; neither is an error

use std::collections::{HashMap, HashSet};

use crate::distribution::distribute;
use crate::models::{Ask, Consumption, Generation, Match, Path};

/// Compute each consumer's proportional asks towards its reachable generators
///
/// Asks are returned consumer by consumer in input order; within one consumer
/// they follow the descending-volume generator order used for distribution.
/// Duplicate paths are ignored. Asks of volume zero are discarded.
pub fn compute_asks(
    consumptions: &[Consumption],
    generations: &[Generation],
    paths: &[Path],
) -> Vec<Ask> {
    let generations_by_id: HashMap<&str, &Generation> =
        generations.iter().map(|g| (g.id.as_str(), g)).collect();

    let mut asks = Vec::new();
    for consumption in consumptions {
        // Reachable generators in path order, first occurrence wins
        let mut seen: HashSet<&str> = HashSet::new();
        let mut reachable: Vec<&Generation> = Vec::new();
        for path in paths {
            if path.consumption_id != consumption.id {
                continue;
            }
            if let Some(&generation) = generations_by_id.get(path.generation_id.as_str()) {
                if seen.insert(generation.id.as_str()) {
                    reachable.push(generation);
                }
            }
        }
        if reachable.is_empty() {
            continue;
        }

        // Descending volume, stable for ties (keeps path order)
        reachable.sort_by(|a, b| b.volume.cmp(&a.volume));

        let weights: Vec<u64> = reachable.iter().map(|g| g.volume).collect();
        let shares = distribute(consumption.volume, &weights, false);
        for (generation, share) in reachable.iter().zip(shares) {
            if share > 0 {
                asks.push(Ask::new(&consumption.id, &generation.id, share));
            }
        }
    }
    asks
}

/// Execute one full round: asks, then capped generator-side matching
///
/// Matches are returned generator by generator in input order; within one
/// generator they follow the descending-ask order used for distribution.
/// Zero-volume grants are omitted.
pub fn execute_round(
    consumptions: &[Consumption],
    generations: &[Generation],
    paths: &[Path],
) -> Vec<Match> {
    let asks = compute_asks(consumptions, generations, paths);

    // Group asks per generator, preserving consumer order
    let mut asks_by_generation: HashMap<&str, Vec<&Ask>> = HashMap::new();
    for ask in &asks {
        asks_by_generation
            .entry(ask.generation_id.as_str())
            .or_default()
            .push(ask);
    }

    let mut matches = Vec::new();
    for generation in generations {
        let Some(mut received) = asks_by_generation.remove(generation.id.as_str()) else {
            continue;
        };

        // Descending ask volume, stable for ties (keeps consumer order)
        received.sort_by(|a, b| b.volume.cmp(&a.volume));

        let weights: Vec<u64> = received.iter().map(|a| a.volume).collect();
        let grants = distribute(generation.volume, &weights, true);
        for (ask, grant) in received.iter().zip(grants) {
            if grant > 0 {
                matches.push(Match::new(&ask.consumption_id, &generation.id, grant));
            }
        }
    }
    matches
}
