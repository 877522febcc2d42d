//! One matching round and result aggregation

pub mod aggregate;
pub mod round;

pub use aggregate::sum_matches;
pub use round::{compute_asks, execute_round};
