//! Availability resolution.
//!
//! Filters a season roster down to the participants explicitly marked
//! available for one occurrence. Absent entries and explicit "no" entries
//! are both excluded, each with a distinguishable reason for diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{AvailabilitySource, AvailabilityStatus, Participant};

/// Why a roster member was excluded from an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// No availability entry was recorded. Absence is never availability.
    NoData,
    /// Explicitly marked unavailable.
    MarkedUnavailable,
}

/// A roster member excluded during resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exclusion {
    pub participant_id: String,
    pub participant_name: String,
    pub reason: ExclusionReason,
}

/// Result of resolving a roster against one occurrence's availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedRoster {
    /// Participants explicitly marked available, in first-seen roster order.
    pub available: Vec<Participant>,
    /// Everyone else, with the reason they were skipped.
    pub excluded: Vec<Exclusion>,
}

impl ResolvedRoster {
    /// Number of available participants.
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Whether nobody is available.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// Resolves a roster against an availability record.
///
/// Pure function of its inputs: unchanged inputs produce an identical
/// ordered result. Only an explicit `true` entry admits a participant.
/// Duplicate roster ids keep the first occurrence.
///
/// # Example
/// ```
/// use foursomes::engine::resolve;
/// use foursomes::models::{AvailabilityRecord, Participant};
///
/// let roster = vec![
///     Participant::new("p1", "s1"),
///     Participant::new("p2", "s1"),
/// ];
/// let record = AvailabilityRecord::new("week-1").with_entry("p1", true);
///
/// let resolved = resolve(&roster, &record);
/// assert_eq!(resolved.len(), 1);
/// assert_eq!(resolved.excluded.len(), 1);
/// ```
pub fn resolve(roster: &[Participant], availability: &impl AvailabilitySource) -> ResolvedRoster {
    let mut resolved = ResolvedRoster::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for participant in roster {
        if !seen.insert(participant.id.as_str()) {
            continue; // roster should arrive deduplicated; keep the first
        }
        match availability.status_of(&participant.id) {
            AvailabilityStatus::Available => resolved.available.push(participant.clone()),
            AvailabilityStatus::Unavailable => resolved.excluded.push(Exclusion {
                participant_id: participant.id.clone(),
                participant_name: participant.name.clone(),
                reason: ExclusionReason::MarkedUnavailable,
            }),
            AvailabilityStatus::NoData => resolved.excluded.push(Exclusion {
                participant_id: participant.id.clone(),
                participant_name: participant.name.clone(),
                reason: ExclusionReason::NoData,
            }),
        }
    }

    log::debug!(
        "resolved {} of {} roster members",
        resolved.available.len(),
        roster.len()
    );
    resolved
}
