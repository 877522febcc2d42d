//! Match aggregation
//!
//! Rounds and strategies can each match the same (consumption, generation)
//! pair; the final result must carry exactly one summed entry per pair.

use std::collections::HashMap;

use crate::models::Match;

/// Sum same-pair matches into single entries, first-seen order preserved
///
/// Idempotent: running it on already-summed output returns the same entries.
///
/// # Example
///
/// ```
/// use energy_matching_core_rs::matching::sum_matches;
/// use energy_matching_core_rs::Match;
///
/// let summed = sum_matches(&[
///     Match::new("c1", "g1", 5),
///     Match::new("c1", "g2", 3),
///     Match::new("c1", "g1", 2),
/// ]);
///
/// assert_eq!(summed, vec![Match::new("c1", "g1", 7), Match::new("c1", "g2", 3)]);
/// ```
pub fn sum_matches(matches: &[Match]) -> Vec<Match> {
    let mut summed: Vec<Match> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for matched in matches {
        let key = (matched.consumption_id.clone(), matched.generation_id.clone());
        match index.get(&key) {
            Some(&i) => summed[i].volume += matched.volume,
            None => {
                index.insert(key, summed.len());
                summed.push(matched.clone());
            }
        }
    }
    summed
}
