//! Consumption and Generation models
//!
//! Two layers, one shape:
//! - `ConsumptionRecord` / `GenerationRecord`: boundary records as delivered by
//!   the data-acquisition collaborator. Volumes arrive as JSON numbers and may
//!   be fractional, so the records carry `f64` and are validated before any
//!   matching work happens.
//! - `Consumption` / `Generation`: validated engine-side entities with `u64`
//!   volumes. Everything past input validation (strategies, predicates,
//!   rounds, results) operates on these.
//!
//! CRITICAL: All volumes inside the engine are u64 (whole units)

use serde::{Deserialize, Serialize};

/// One entry of a consumption's ordered energy preference list
///
/// Higher `priority` means matched first. Several entries may share the same
/// priority level; the strategy for that level then accepts any of their
/// energy types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPriority {
    /// Energy type tag (e.g. "solar", "wind")
    pub energy_type: String,

    /// Numeric rank, higher = matched first
    pub priority: u32,
}

impl EnergyPriority {
    pub fn new(energy_type: impl Into<String>, priority: u32) -> Self {
        Self {
            energy_type: energy_type.into(),
            priority,
        }
    }
}

/// Boundary record for a consumption demand (unvalidated volume)
///
/// # Example
///
/// ```
/// use energy_matching_core_rs::ConsumptionRecord;
///
/// let record = ConsumptionRecord::new("c1", 24.0, "s1", "r1", "pl")
///     .with_energy_priority("solar", 2)
///     .match_by_region();
///
/// assert_eq!(record.id, "c1");
/// assert!(record.should_match_by_region);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRecord {
    /// Unique opaque identifier
    pub id: String,

    /// Demanded volume; must be a non-negative integer value or the
    /// whole input is rejected
    pub volume: f64,

    /// Grouping keys, immutable for the duration of one match invocation
    pub site_id: String,
    pub region_id: String,
    pub country_id: String,

    /// Ordered energy preferences, highest priority matched first
    #[serde(default)]
    pub energy_priorities: Vec<EnergyPriority>,

    /// Opt-in flags gating the predicate strategies
    #[serde(default)]
    pub should_match_by_region: bool,
    #[serde(default)]
    pub should_match_by_country: bool,
    #[serde(default)]
    pub should_match_by_other_countries: bool,
}

impl ConsumptionRecord {
    pub fn new(
        id: impl Into<String>,
        volume: f64,
        site_id: impl Into<String>,
        region_id: impl Into<String>,
        country_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            volume,
            site_id: site_id.into(),
            region_id: region_id.into(),
            country_id: country_id.into(),
            energy_priorities: Vec::new(),
            should_match_by_region: false,
            should_match_by_country: false,
            should_match_by_other_countries: false,
        }
    }

    /// Append one energy preference entry (builder style)
    pub fn with_energy_priority(mut self, energy_type: impl Into<String>, priority: u32) -> Self {
        self.energy_priorities
            .push(EnergyPriority::new(energy_type, priority));
        self
    }

    /// Opt into same-region matching
    pub fn match_by_region(mut self) -> Self {
        self.should_match_by_region = true;
        self
    }

    /// Opt into same-country matching
    pub fn match_by_country(mut self) -> Self {
        self.should_match_by_country = true;
        self
    }

    /// Opt into cross-country matching
    pub fn match_by_other_countries(mut self) -> Self {
        self.should_match_by_other_countries = true;
        self
    }
}

/// Boundary record for a generation supply (unvalidated volume)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    /// Unique opaque identifier
    pub id: String,

    /// Supplied volume; must be a non-negative integer value or the
    /// whole input is rejected
    pub volume: f64,

    /// Grouping keys
    pub site_id: String,
    pub region_id: String,
    pub country_id: String,

    /// Single energy type tag of this generator
    pub energy_type: String,
}

impl GenerationRecord {
    pub fn new(
        id: impl Into<String>,
        volume: f64,
        site_id: impl Into<String>,
        region_id: impl Into<String>,
        country_id: impl Into<String>,
        energy_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            volume,
            site_id: site_id.into(),
            region_id: region_id.into(),
            country_id: country_id.into(),
            energy_type: energy_type.into(),
        }
    }
}

/// Validated consumption demand with an integer volume
///
/// Produced from a `ConsumptionRecord` during input validation. The `volume`
/// field is progressively decremented by the orchestrator as rounds consume
/// it; all other fields stay immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub id: String,
    pub volume: u64,
    pub site_id: String,
    pub region_id: String,
    pub country_id: String,
    pub energy_priorities: Vec<EnergyPriority>,
    pub should_match_by_region: bool,
    pub should_match_by_country: bool,
    pub should_match_by_other_countries: bool,
}

impl Consumption {
    /// Build directly from already-integral parts (mainly for tests and
    /// component-level callers that bypass the record boundary)
    pub fn new(
        id: impl Into<String>,
        volume: u64,
        site_id: impl Into<String>,
        region_id: impl Into<String>,
        country_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            volume,
            site_id: site_id.into(),
            region_id: region_id.into(),
            country_id: country_id.into(),
            energy_priorities: Vec::new(),
            should_match_by_region: false,
            should_match_by_country: false,
            should_match_by_other_countries: false,
        }
    }

    pub fn with_energy_priority(mut self, energy_type: impl Into<String>, priority: u32) -> Self {
        self.energy_priorities
            .push(EnergyPriority::new(energy_type, priority));
        self
    }

    pub fn match_by_region(mut self) -> Self {
        self.should_match_by_region = true;
        self
    }

    pub fn match_by_country(mut self) -> Self {
        self.should_match_by_country = true;
        self
    }

    pub fn match_by_other_countries(mut self) -> Self {
        self.should_match_by_other_countries = true;
        self
    }

    /// Validate one record; `None` if its volume is not a non-negative integer
    pub fn from_record(record: &ConsumptionRecord) -> Option<Self> {
        Some(Self {
            id: record.id.clone(),
            volume: integral_volume(record.volume)?,
            site_id: record.site_id.clone(),
            region_id: record.region_id.clone(),
            country_id: record.country_id.clone(),
            energy_priorities: record.energy_priorities.clone(),
            should_match_by_region: record.should_match_by_region,
            should_match_by_country: record.should_match_by_country,
            should_match_by_other_countries: record.should_match_by_other_countries,
        })
    }

    /// Energy types this consumption accepts at exactly priority level `priority`
    pub fn energy_types_at_priority(&self, priority: u32) -> Vec<&str> {
        self.energy_priorities
            .iter()
            .filter(|entry| entry.priority == priority)
            .map(|entry| entry.energy_type.as_str())
            .collect()
    }
}

/// Validated generation supply with an integer volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: String,
    pub volume: u64,
    pub site_id: String,
    pub region_id: String,
    pub country_id: String,
    pub energy_type: String,
}

impl Generation {
    pub fn new(
        id: impl Into<String>,
        volume: u64,
        site_id: impl Into<String>,
        region_id: impl Into<String>,
        country_id: impl Into<String>,
        energy_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            volume,
            site_id: site_id.into(),
            region_id: region_id.into(),
            country_id: country_id.into(),
            energy_type: energy_type.into(),
        }
    }

    /// Validate one record; `None` if its volume is not a non-negative integer
    pub fn from_record(record: &GenerationRecord) -> Option<Self> {
        Some(Self {
            id: record.id.clone(),
            volume: integral_volume(record.volume)?,
            site_id: record.site_id.clone(),
            region_id: record.region_id.clone(),
            country_id: record.country_id.clone(),
            energy_type: record.energy_type.clone(),
        })
    }
}

/// Accept a boundary volume only if it is a finite, non-negative whole number
///
/// Fractional volumes are rejected here rather than truncated; silent
/// truncation would break the conservation invariant.
///
/// # Example
///
/// ```
/// use energy_matching_core_rs::integral_volume;
///
/// assert_eq!(integral_volume(24.0), Some(24));
/// assert_eq!(integral_volume(10.5), None);
/// assert_eq!(integral_volume(-1.0), None);
/// assert_eq!(integral_volume(f64::NAN), None);
/// ```
pub fn integral_volume(volume: f64) -> Option<u64> {
    if volume.is_finite() && volume >= 0.0 && volume.fract() == 0.0 && volume <= u64::MAX as f64 {
        Some(volume as u64)
    } else {
        None
    }
}
