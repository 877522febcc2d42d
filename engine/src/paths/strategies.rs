//! Path strategies
//!
//! A strategy generates the candidate pairings ("paths") one round is allowed
//! to match over. All strategies implement the `PathStrategy` trait and are
//! pure functions of the pools they are handed: they read grouping keys,
//! energy types and priority levels only, never volumes, and hold no state.
//!
//! Pair order is deterministic: consumptions in input order on the outside,
//! generations in input order on the inside.
//!
//! The default strategy order (see [`default_strategies`]) encodes the
//! business rule that co-located demand is satisfied first, then same-region,
//! then same-country, then cross-country, within each group in descending
//! priority order.

use crate::models::{Consumption, Generation, Path};

use super::predicates::PathPredicate;

/// A named rule that generates candidate paths for one round
///
/// The set of implementations is fixed and enumerable: [`SiteMatching`],
/// [`RegionMatching`], [`EnergyPriorityMatching`] and [`CartesianMatching`].
/// The trait exists so the orchestrator can hold an ordered, declarative
/// strategy list and so tests can substitute defective strategies when
/// exercising the iteration ceiling.
pub trait PathStrategy {
    /// Display name, recorded per strategy in the result
    fn name(&self) -> String;

    /// Candidate pairings over the current positive-volume pools
    fn execute(&self, consumptions: &[Consumption], generations: &[Generation]) -> Vec<Path>;
}

/// Pair every consumption with every generation sharing its `site_id`
pub struct SiteMatching;

impl PathStrategy for SiteMatching {
    fn name(&self) -> String {
        "site".to_string()
    }

    fn execute(&self, consumptions: &[Consumption], generations: &[Generation]) -> Vec<Path> {
        let mut paths = Vec::new();
        for consumption in consumptions {
            for generation in generations {
                if consumption.site_id == generation.site_id {
                    paths.push(Path::new(&consumption.id, &generation.id));
                }
            }
        }
        paths
    }
}

/// Pair every region-opted-in consumption with every generation sharing its `region_id`
pub struct RegionMatching;

impl PathStrategy for RegionMatching {
    fn name(&self) -> String {
        "region".to_string()
    }

    fn execute(&self, consumptions: &[Consumption], generations: &[Generation]) -> Vec<Path> {
        let mut paths = Vec::new();
        for consumption in consumptions {
            if !consumption.should_match_by_region {
                continue;
            }
            for generation in generations {
                if consumption.region_id == generation.region_id {
                    paths.push(Path::new(&consumption.id, &generation.id));
                }
            }
        }
        paths
    }
}

/// Pair consumptions with generations whose energy type they accept at one
/// priority level, optionally filtered through a predicate
///
/// A consumption with no entry at this priority level simply contributes no
/// pairs; missing energy types are not an error.
pub struct EnergyPriorityMatching {
    pub priority: u32,
    pub predicate: Option<PathPredicate>,
}

impl EnergyPriorityMatching {
    pub fn new(priority: u32) -> Self {
        Self {
            priority,
            predicate: None,
        }
    }

    pub fn with_predicate(priority: u32, predicate: PathPredicate) -> Self {
        Self {
            priority,
            predicate: Some(predicate),
        }
    }
}

impl PathStrategy for EnergyPriorityMatching {
    fn name(&self) -> String {
        match &self.predicate {
            Some(predicate) => {
                format!("energy-priority({}, {})", self.priority, predicate.name())
            }
            None => format!("energy-priority({})", self.priority),
        }
    }

    fn execute(&self, consumptions: &[Consumption], generations: &[Generation]) -> Vec<Path> {
        let mut paths = Vec::new();
        for consumption in consumptions {
            let accepted = consumption.energy_types_at_priority(self.priority);
            if accepted.is_empty() {
                continue;
            }
            for generation in generations {
                if !accepted.contains(&generation.energy_type.as_str()) {
                    continue;
                }
                if let Some(predicate) = &self.predicate {
                    if !predicate.evaluate(consumption, generation) {
                        continue;
                    }
                }
                paths.push(Path::new(&consumption.id, &generation.id));
            }
        }
        paths
    }
}

/// Pair every consumption with every generation, unconditionally
///
/// Fallback strategy with the lowest specificity.
pub struct CartesianMatching;

impl PathStrategy for CartesianMatching {
    fn name(&self) -> String {
        "cartesian".to_string()
    }

    fn execute(&self, consumptions: &[Consumption], generations: &[Generation]) -> Vec<Path> {
        let mut paths = Vec::new();
        for consumption in consumptions {
            for generation in generations {
                paths.push(Path::new(&consumption.id, &generation.id));
            }
        }
        paths
    }
}

/// Every distinct priority level referenced across all consumptions,
/// sorted descending (highest priority first)
pub fn referenced_priorities(consumptions: &[Consumption]) -> Vec<u32> {
    let mut priorities: Vec<u32> = consumptions
        .iter()
        .flat_map(|c| c.energy_priorities.iter().map(|entry| entry.priority))
        .collect();
    priorities.sort_unstable_by(|a, b| b.cmp(a));
    priorities.dedup();
    priorities
}

/// The default ordered strategy list for a given set of consumptions
///
/// Most specific first: site, then every referenced priority level in
/// descending order with the same-region predicate, then the same list with
/// same-country, then with other-country.
pub fn default_strategies(consumptions: &[Consumption]) -> Vec<Box<dyn PathStrategy>> {
    let priorities = referenced_priorities(consumptions);

    let mut strategies: Vec<Box<dyn PathStrategy>> = vec![Box::new(SiteMatching)];
    for predicate in [
        PathPredicate::SameRegion,
        PathPredicate::SameCountry,
        PathPredicate::OtherCountry,
    ] {
        for &priority in &priorities {
            strategies.push(Box::new(EnergyPriorityMatching::with_predicate(
                priority,
                predicate.clone(),
            )));
        }
    }
    strategies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(paths: &[Path]) -> Vec<(String, String)> {
        paths
            .iter()
            .map(|p| (p.consumption_id.clone(), p.generation_id.clone()))
            .collect()
    }

    #[test]
    fn test_site_matching_pairs_shared_sites_only() {
        let consumptions = vec![
            Consumption::new("c1", 10, "s1", "r1", "pl"),
            Consumption::new("c2", 10, "s2", "r1", "pl"),
        ];
        let generations = vec![
            Generation::new("g1", 10, "s1", "r1", "pl", "solar"),
            Generation::new("g2", 10, "s3", "r1", "pl", "wind"),
        ];

        let paths = SiteMatching.execute(&consumptions, &generations);
        assert_eq!(ids(&paths), vec![("c1".to_string(), "g1".to_string())]);
    }

    #[test]
    fn test_region_matching_requires_opt_in() {
        let consumptions = vec![
            Consumption::new("c1", 10, "s1", "r1", "pl").match_by_region(),
            Consumption::new("c2", 10, "s2", "r1", "pl"),
        ];
        let generations = vec![Generation::new("g1", 10, "s9", "r1", "pl", "solar")];

        let paths = RegionMatching.execute(&consumptions, &generations);
        assert_eq!(ids(&paths), vec![("c1".to_string(), "g1".to_string())]);
    }

    #[test]
    fn test_energy_priority_matching_selects_level() {
        let consumptions = vec![Consumption::new("c1", 10, "s1", "r1", "pl")
            .with_energy_priority("solar", 2)
            .with_energy_priority("wind", 1)];
        let generations = vec![
            Generation::new("g1", 10, "s9", "r9", "de", "solar"),
            Generation::new("g2", 10, "s9", "r9", "de", "wind"),
        ];

        let paths = EnergyPriorityMatching::new(2).execute(&consumptions, &generations);
        assert_eq!(ids(&paths), vec![("c1".to_string(), "g1".to_string())]);
    }

    #[test]
    fn test_energy_priority_missing_types_yield_no_pairs() {
        let consumptions = vec![
            Consumption::new("c1", 10, "s1", "r1", "pl").with_energy_priority("hydro", 3)
        ];
        let generations = vec![Generation::new("g1", 10, "s1", "r1", "pl", "solar")];

        let paths = EnergyPriorityMatching::new(3).execute(&consumptions, &generations);
        assert!(paths.is_empty());
    }

    #[test]
    fn test_energy_priority_with_predicate_filters_pairs() {
        let consumptions = vec![Consumption::new("c1", 10, "s1", "r1", "pl")
            .with_energy_priority("solar", 1)
            .match_by_region()];
        let generations = vec![
            Generation::new("g1", 10, "s9", "r1", "pl", "solar"),
            Generation::new("g2", 10, "s9", "r2", "pl", "solar"),
        ];

        let strategy =
            EnergyPriorityMatching::with_predicate(1, PathPredicate::SameRegion);
        let paths = strategy.execute(&consumptions, &generations);
        assert_eq!(ids(&paths), vec![("c1".to_string(), "g1".to_string())]);
    }

    #[test]
    fn test_cartesian_pairs_everything() {
        let consumptions = vec![
            Consumption::new("c1", 10, "s1", "r1", "pl"),
            Consumption::new("c2", 10, "s2", "r2", "de"),
        ];
        let generations = vec![
            Generation::new("g1", 10, "s3", "r3", "fr", "solar"),
            Generation::new("g2", 10, "s4", "r4", "es", "wind"),
        ];

        let paths = CartesianMatching.execute(&consumptions, &generations);
        assert_eq!(paths.len(), 4);
        assert_eq!(
            ids(&paths)[0],
            ("c1".to_string(), "g1".to_string())
        );
    }

    #[test]
    fn test_referenced_priorities_descending_distinct() {
        let consumptions = vec![
            Consumption::new("c1", 10, "s1", "r1", "pl")
                .with_energy_priority("solar", 1)
                .with_energy_priority("wind", 3),
            Consumption::new("c2", 10, "s1", "r1", "pl").with_energy_priority("hydro", 3),
        ];

        assert_eq!(referenced_priorities(&consumptions), vec![3, 1]);
    }

    #[test]
    fn test_default_strategies_order() {
        let consumptions = vec![Consumption::new("c1", 10, "s1", "r1", "pl")
            .with_energy_priority("solar", 2)
            .with_energy_priority("wind", 1)];

        let names: Vec<String> = default_strategies(&consumptions)
            .iter()
            .map(|s| s.name())
            .collect();

        assert_eq!(
            names,
            vec![
                "site",
                "energy-priority(2, same-region)",
                "energy-priority(1, same-region)",
                "energy-priority(2, same-country)",
                "energy-priority(1, same-country)",
                "energy-priority(2, other-country)",
                "energy-priority(1, other-country)",
            ]
        );
    }

    #[test]
    fn test_default_strategies_without_priorities_is_site_only() {
        let consumptions = vec![Consumption::new("c1", 10, "s1", "r1", "pl")];
        let names: Vec<String> = default_strategies(&consumptions)
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["site"]);
    }
}
