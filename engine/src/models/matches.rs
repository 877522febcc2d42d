//! Path, Ask and Match types
//!
//! - `Path`: an eligibility edge produced by a strategy. Existence means "this
//!   pair may exchange volume in this round"; it carries no volume.
//! - `Ask`: round-scoped proportional demand from one consumer towards one
//!   generator. Never persisted past the round that computed it.
//! - `Match`: the durable output unit. Same-pair matches are always summed in
//!   the final result, never left as duplicates.

use serde::{Deserialize, Serialize};

/// Candidate pairing between a consumption and a generation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub consumption_id: String,
    pub generation_id: String,
}

impl Path {
    pub fn new(consumption_id: impl Into<String>, generation_id: impl Into<String>) -> Self {
        Self {
            consumption_id: consumption_id.into(),
            generation_id: generation_id.into(),
        }
    }
}

/// A consumer's proportional volume request towards one generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ask {
    pub consumption_id: String,
    pub generation_id: String,
    pub volume: u64,
}

impl Ask {
    pub fn new(
        consumption_id: impl Into<String>,
        generation_id: impl Into<String>,
        volume: u64,
    ) -> Self {
        Self {
            consumption_id: consumption_id.into(),
            generation_id: generation_id.into(),
            volume,
        }
    }
}

/// Matched volume between one consumption and one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub consumption_id: String,
    pub generation_id: String,
    pub volume: u64,
}

impl Match {
    pub fn new(
        consumption_id: impl Into<String>,
        generation_id: impl Into<String>,
        volume: u64,
    ) -> Self {
        Self {
            consumption_id: consumption_id.into(),
            generation_id: generation_id.into(),
            volume,
        }
    }
}
