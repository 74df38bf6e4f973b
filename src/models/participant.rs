//! Participant model.
//!
//! A participant is a roster member eligible for scheduling. The roster
//! itself is owned by an external collaborator; the engine reads
//! participants and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stated time-slot preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePreference {
    /// Wants the early slot.
    Early,
    /// Wants the late slot.
    Late,
    /// No stated preference; used to balance slot sizes.
    Either,
}

/// Handedness attribute.
///
/// Informational only: it feeds distribution reporting and never drives
/// grouping or slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Laterality {
    Left,
    Right,
}

/// A roster member eligible for scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// External identity, assigned by the roster collaborator.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Handedness.
    pub laterality: Laterality,
    /// Stated time preference.
    pub preference: TimePreference,
    /// Season this participant is registered for.
    pub season_id: String,
    /// When the roster entry was created.
    pub created_at: DateTime<Utc>,
}

impl Participant {
    /// Creates a participant with the given id and season.
    ///
    /// Defaults: empty name, right-handed, no time preference.
    pub fn new(id: impl Into<String>, season_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            laterality: Laterality::Right,
            preference: TimePreference::Either,
            season_id: season_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the time preference.
    pub fn with_preference(mut self, preference: TimePreference) -> Self {
        self.preference = preference;
        self
    }

    /// Sets the handedness.
    pub fn with_laterality(mut self, laterality: Laterality) -> Self {
        self.laterality = laterality;
        self
    }
}
