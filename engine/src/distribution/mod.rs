//! Largest-remainder volume distribution
//!
//! Splits an integer total across weighted receivers without ever producing a
//! fractional volume:
//!
//! 1. Floor each proportional share `total * w_i / sum(weights)`
//! 2. Hand out the under-allocated remainder one unit at a time, in input
//!    order, wrapping around
//! 3. With `cap`, clip every entry to its own weight afterwards
//!
//! The remainder index wraps with modulus `weights.len()`. The system this
//! engine was modeled on advanced it modulo `len - 1`; that never produced a
//! different assignment (the remainder is always `< len`, so the wrap is
//! never reached) but divides by zero for single-entry input, so the modulus
//! is corrected here and pinned by tests.
//!
//! Tie-break fairness is best when callers pass weights sorted descending;
//! the match round does exactly that. The function itself only guarantees
//! determinism: identical ordered input always yields identical output.

/// Proportionally split `total` across `weights`, largest-remainder style
///
/// Returns a vector of the same length as `weights`.
///
/// - `cap == false`: the result sums to exactly `total`
/// - `cap == true`: each entry is additionally clipped to its weight, so the
///   result sums to at most `total`; the shortfall is intentional and
///   surfaces as leftover volume at the caller
/// - `sum(weights) == 0`: all zeros
///
/// All arithmetic is u128-widened integer math; no floats, no overflow for
/// any `u64` inputs.
///
/// # Example
///
/// ```
/// use energy_matching_core_rs::distribution::distribute;
///
/// // 24 split proportionally over weights 20 and 10
/// assert_eq!(distribute(24, &[20, 10], false), vec![16, 8]);
///
/// // capped: each entry clipped to its weight, shortfall allowed
/// assert_eq!(distribute(10, &[8, 4], true), vec![7, 3]);
/// ```
pub fn distribute(total: u64, weights: &[u64], cap: bool) -> Vec<u64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let weight_sum: u128 = weights.iter().map(|&w| w as u128).sum();
    if weight_sum == 0 {
        return vec![0; weights.len()];
    }

    let mut shares: Vec<u64> = weights
        .iter()
        .map(|&w| ((total as u128 * w as u128) / weight_sum) as u64)
        .collect();

    // Flooring under-allocates by strictly less than weights.len() units;
    // assign them one at a time in input order, wrapping.
    let allocated: u128 = shares.iter().map(|&s| s as u128).sum();
    let mut remainder = (total as u128 - allocated) as u64;
    let mut i = 0;
    while remainder > 0 {
        shares[i] += 1;
        remainder -= 1;
        i = (i + 1) % weights.len();
    }

    if cap {
        for (share, &weight) in shares.iter_mut().zip(weights) {
            *share = (*share).min(weight);
        }
    }

    shares
}
