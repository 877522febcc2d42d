//! End-to-end tests for the proportional matcher

use energy_matching_core_rs::{
    match_volumes, run_rounds, CartesianMatching, ConsumptionRecord, GenerationRecord, Match,
    MatchingError, ProportionalMatcher, StrategyTermination, STRATEGY_ITERATION_LIMIT,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_consumption(id: &str, volume: f64, site: &str) -> ConsumptionRecord {
    ConsumptionRecord::new(id, volume, site, "r1", "pl")
}

fn create_generation(id: &str, volume: f64, site: &str) -> GenerationRecord {
    GenerationRecord::new(id, volume, site, "r1", "pl", "solar")
}

fn matched_volume(matches: &[Match], consumption_id: &str, generation_id: &str) -> u64 {
    matches
        .iter()
        .filter(|m| m.consumption_id == consumption_id && m.generation_id == generation_id)
        .map(|m| m.volume)
        .sum()
}

// ============================================================================
// Site Matching (Scenario A)
// ============================================================================

#[test]
fn test_single_pair_same_site() {
    let consumptions = vec![create_consumption("c1", 24.0, "s1")];
    let generations = vec![create_generation("g1", 10.0, "s1")];

    let result = match_volumes(&consumptions, &generations).unwrap();

    assert_eq!(result.matches, vec![Match::new("c1", "g1", 10)]);
    assert_eq!(result.leftover_consumptions.len(), 1);
    assert_eq!(result.leftover_consumptions[0].id, "c1");
    assert_eq!(result.leftover_consumptions[0].volume, 14);
    assert!(result.leftover_generations.is_empty());

    assert_eq!(result.strategy_results.len(), 1);
    assert_eq!(result.strategy_results[0].strategy_name, "site");
    assert_eq!(
        result.strategy_results[0].matches,
        vec![Match::new("c1", "g1", 10)]
    );
}

// ============================================================================
// Cartesian Proportional Matching (Scenario B)
// ============================================================================

#[test]
fn test_cartesian_proportional_matching() {
    // Sites are disjoint so only the explicit cartesian strategy pairs them.
    // Expected values derived from the distributor:
    //   asks    c1 -> [g2: 16, g1: 8], c2 -> [g2: 8, g1: 4]
    //   grants  g1 (10) over [8, 4] -> [7, 3]; g2 (20) over [16, 8] -> [14, 6]
    // Round 2 has no generator volume left, so the run converges there.
    let consumptions = vec![
        create_consumption("c1", 24.0, "sa"),
        create_consumption("c2", 12.0, "sb"),
    ];
    let generations = vec![
        create_generation("g1", 10.0, "sc"),
        create_generation("g2", 20.0, "sd"),
    ];

    let result = ProportionalMatcher::new()
        .with_strategies(vec![Box::new(CartesianMatching)])
        .match_volumes(&consumptions, &generations)
        .unwrap();

    assert_eq!(matched_volume(&result.matches, "c1", "g1"), 7);
    assert_eq!(matched_volume(&result.matches, "c2", "g1"), 3);
    assert_eq!(matched_volume(&result.matches, "c1", "g2"), 14);
    assert_eq!(matched_volume(&result.matches, "c2", "g2"), 6);

    // Supply is fully allocated, demand surplus remains
    assert!(result.leftover_generations.is_empty());
    let leftovers: Vec<(&str, u64)> = result
        .leftover_consumptions
        .iter()
        .map(|c| (c.id.as_str(), c.volume))
        .collect();
    assert_eq!(leftovers, vec![("c1", 3), ("c2", 3)]);
}

// ============================================================================
// Input Validation (Scenario C)
// ============================================================================

#[test]
fn test_fractional_volume_rejected_before_matching() {
    let consumptions = vec![create_consumption("c1", 10.5, "s1")];
    let generations = vec![create_generation("g1", 10.0, "s1")];

    let err = match_volumes(&consumptions, &generations).unwrap_err();
    assert_eq!(
        err,
        MatchingError::InvalidInput {
            ids: vec!["c1".to_string()]
        }
    );
    assert!(err.to_string().contains("c1"));
}

#[test]
fn test_validation_aggregates_all_offenders() {
    let consumptions = vec![
        create_consumption("c1", 10.5, "s1"),
        create_consumption("c2", 12.0, "s1"),
    ];
    let generations = vec![
        create_generation("g1", f64::NAN, "s1"),
        create_generation("g2", -2.0, "s1"),
    ];

    let err = match_volumes(&consumptions, &generations).unwrap_err();
    assert_eq!(
        err,
        MatchingError::InvalidInput {
            ids: vec!["c1".to_string(), "g1".to_string(), "g2".to_string()]
        }
    );
}

// ============================================================================
// No Candidates (Scenario D)
// ============================================================================

#[test]
fn test_no_overlap_everything_leftover() {
    let consumptions = vec![create_consumption("c1", 24.0, "s1")];
    let generations = vec![create_generation("g1", 10.0, "s2")];

    let result = match_volumes(&consumptions, &generations).unwrap();

    assert!(result.matches.is_empty());
    assert_eq!(result.leftover_consumptions[0].volume, 24);
    assert_eq!(result.leftover_generations[0].volume, 10);
}

#[test]
fn test_empty_input_is_a_normal_outcome() {
    let result = match_volumes(&[], &[]).unwrap();
    assert!(result.matches.is_empty());
    assert!(result.leftover_consumptions.is_empty());
    assert!(result.leftover_generations.is_empty());
}

// ============================================================================
// Iteration Ceiling (Scenario E)
// ============================================================================

#[test]
fn test_non_reducing_round_hits_ceiling() {
    // A defective strategy that keeps producing matches without reducing the
    // pools must terminate with LimitExceeded before 50 001 iterations.
    let mut iterations = 0usize;
    let (_, termination) = run_rounds(STRATEGY_ITERATION_LIMIT, |_| {
        iterations += 1;
        vec![Match::new("c1", "g1", 1)]
    });

    assert_eq!(termination, StrategyTermination::LimitExceeded);
    assert_eq!(iterations, 50_000);
}

#[test]
fn test_matcher_reports_offending_strategy_on_ceiling() {
    // This input needs two productive site rounds (rounding shortfall leaves
    // g1 one unit in round one), so a ceiling of one round trips the guard.
    let consumptions = vec![
        create_consumption("c1", 9.0, "s1"),
        create_consumption("c2", 9.0, "s1"),
        create_consumption("c3", 9.0, "s1"),
    ];
    let generations = vec![
        create_generation("g1", 10.0, "s1"),
        create_generation("g2", 17.0, "s1"),
    ];

    let err = ProportionalMatcher::new()
        .with_iteration_limit(1)
        .match_volumes(&consumptions, &generations)
        .unwrap_err();

    assert_eq!(
        err,
        MatchingError::IterationLimitExceeded {
            strategy: "site".to_string(),
            limit: 1,
        }
    );
}

// ============================================================================
// Multi-Round Convergence
// ============================================================================

#[test]
fn test_cap_shortfall_converges_over_two_rounds() {
    // Round one: g1 (10) can only hand out 9 against asks [3, 3, 3], and c3
    // ends one unit short. Round two matches that last unit c3 -> g1.
    let consumptions = vec![
        create_consumption("c1", 9.0, "s1"),
        create_consumption("c2", 9.0, "s1"),
        create_consumption("c3", 9.0, "s1"),
    ];
    let generations = vec![
        create_generation("g1", 10.0, "s1"),
        create_generation("g2", 17.0, "s1"),
    ];

    let result = match_volumes(&consumptions, &generations).unwrap();

    // Cross-round same-pair matches are summed into one entry
    assert_eq!(matched_volume(&result.matches, "c3", "g1"), 4);
    assert_eq!(result.matches.len(), 6);

    // Everything clears: total demand 27 == total supply 27
    assert!(result.leftover_consumptions.is_empty());
    assert!(result.leftover_generations.is_empty());
    assert_eq!(result.total_matched_volume(), 27);
}

// ============================================================================
// Strategy Ordering
// ============================================================================

#[test]
fn test_site_strategy_takes_precedence_over_priorities() {
    // g1 shares c1's site, g2 only its energy preference. The site strategy
    // runs first and drains c1 before the energy-priority strategies run.
    let consumptions = vec![ConsumptionRecord::new("c1", 10.0, "s1", "r1", "pl")
        .with_energy_priority("wind", 5)
        .match_by_region()];
    let generations = vec![
        GenerationRecord::new("g1", 10.0, "s1", "r1", "pl", "solar"),
        GenerationRecord::new("g2", 10.0, "s9", "r1", "pl", "wind"),
    ];

    let result = match_volumes(&consumptions, &generations).unwrap();

    assert_eq!(result.matches, vec![Match::new("c1", "g1", 10)]);
    assert_eq!(result.strategy_results.len(), 4);
    assert_eq!(result.strategy_results[0].strategy_name, "site");
    assert_eq!(
        result.strategy_results[1].strategy_name,
        "energy-priority(5, same-region)"
    );
    assert!(result.strategy_results[1].matches.is_empty());
}

#[test]
fn test_higher_priority_level_matched_first() {
    // Both generators sit in c1's region; wind carries the higher priority
    // and is drained first, solar absorbs the rest.
    let consumptions = vec![ConsumptionRecord::new("c1", 15.0, "sx", "r1", "pl")
        .with_energy_priority("wind", 2)
        .with_energy_priority("solar", 1)
        .match_by_region()];
    let generations = vec![
        GenerationRecord::new("g-solar", 10.0, "sa", "r1", "pl", "solar"),
        GenerationRecord::new("g-wind", 10.0, "sb", "r1", "pl", "wind"),
    ];

    let result = match_volumes(&consumptions, &generations).unwrap();

    assert_eq!(matched_volume(&result.matches, "c1", "g-wind"), 10);
    assert_eq!(matched_volume(&result.matches, "c1", "g-solar"), 5);
    assert_eq!(result.leftover_generations.len(), 1);
    assert_eq!(result.leftover_generations[0].id, "g-solar");
    assert_eq!(result.leftover_generations[0].volume, 5);
}

#[test]
fn test_predicate_opt_outs_block_matching() {
    // Same region and energy type, but the consumer never opted into region,
    // country or cross-country matching, and the sites differ.
    let consumptions = vec![
        ConsumptionRecord::new("c1", 10.0, "s1", "r1", "pl").with_energy_priority("solar", 1)
    ];
    let generations = vec![GenerationRecord::new("g1", 10.0, "s2", "r1", "pl", "solar")];

    let result = match_volumes(&consumptions, &generations).unwrap();
    assert!(result.matches.is_empty());
}

#[test]
fn test_cross_country_matching_when_opted_in() {
    let consumptions = vec![ConsumptionRecord::new("c1", 10.0, "s1", "r1", "pl")
        .with_energy_priority("solar", 1)
        .match_by_other_countries()];
    let generations = vec![GenerationRecord::new("g1", 10.0, "s2", "r9", "de", "solar")];

    let result = match_volumes(&consumptions, &generations).unwrap();
    assert_eq!(result.matches, vec![Match::new("c1", "g1", 10)]);
}

// ============================================================================
// Caller Data Integrity
// ============================================================================

#[test]
fn test_caller_records_are_never_mutated() {
    let consumptions = vec![create_consumption("c1", 24.0, "s1")];
    let generations = vec![create_generation("g1", 10.0, "s1")];
    let consumptions_before = consumptions.clone();
    let generations_before = generations.clone();

    match_volumes(&consumptions, &generations).unwrap();

    assert_eq!(consumptions, consumptions_before);
    assert_eq!(generations, generations_before);
}
