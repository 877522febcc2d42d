//! Pairing predicates
//!
//! A predicate decides whether a (consumption, generation) pair is eligible
//! under a regional policy. The base predicates combine the consumer's opt-in
//! flag with a grouping-key comparison; `And` / `Or` compose them. Predicates
//! are pure and stateless and never read volumes.

use serde::{Deserialize, Serialize};

use crate::models::{Consumption, Generation};

/// Composable boolean predicate over a (consumption, generation) pair
///
/// # Example
///
/// ```
/// use energy_matching_core_rs::paths::PathPredicate;
/// use energy_matching_core_rs::{Consumption, Generation};
///
/// let consumption = Consumption::new("c1", 10, "s1", "r1", "pl").match_by_region();
/// let generation = Generation::new("g1", 10, "s2", "r1", "pl", "solar");
///
/// assert!(PathPredicate::SameRegion.evaluate(&consumption, &generation));
/// assert!(!PathPredicate::OtherCountry.evaluate(&consumption, &generation));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathPredicate {
    /// Consumer opted into region matching and shares `region_id`
    SameRegion,

    /// Consumer opted into country matching and shares `country_id`
    SameCountry,

    /// Consumer opted into cross-country matching and `country_id` differs
    OtherCountry,

    /// True iff all component predicates are true
    And(Vec<PathPredicate>),

    /// True iff any component predicate is true
    Or(Vec<PathPredicate>),
}

impl PathPredicate {
    pub fn evaluate(&self, consumption: &Consumption, generation: &Generation) -> bool {
        match self {
            PathPredicate::SameRegion => {
                consumption.should_match_by_region && consumption.region_id == generation.region_id
            }
            PathPredicate::SameCountry => {
                consumption.should_match_by_country
                    && consumption.country_id == generation.country_id
            }
            PathPredicate::OtherCountry => {
                consumption.should_match_by_other_countries
                    && consumption.country_id != generation.country_id
            }
            PathPredicate::And(parts) => parts.iter().all(|p| p.evaluate(consumption, generation)),
            PathPredicate::Or(parts) => parts.iter().any(|p| p.evaluate(consumption, generation)),
        }
    }

    /// Short display name used inside strategy names
    pub fn name(&self) -> String {
        match self {
            PathPredicate::SameRegion => "same-region".to_string(),
            PathPredicate::SameCountry => "same-country".to_string(),
            PathPredicate::OtherCountry => "other-country".to_string(),
            PathPredicate::And(parts) => {
                let names: Vec<String> = parts.iter().map(|p| p.name()).collect();
                format!("and({})", names.join(", "))
            }
            PathPredicate::Or(parts) => {
                let names: Vec<String> = parts.iter().map(|p| p.name()).collect();
                format!("or({})", names.join(", "))
            }
        }
    }
}
