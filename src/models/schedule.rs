//! Occurrence schedule model.
//!
//! A schedule is the complete grouping for one occurrence of the recurring
//! event: two ordered sequences of groups, one per time slot. Structural
//! invariants (slot-tag homogeneity, contiguous ordinals, each participant
//! scheduled at most once) are enforced on insertion, so a schedule handed
//! to the caller is structurally sound by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Group, TimeSlot};
use crate::error::{EngineError, EngineResult};

/// The complete grouping for one occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceSchedule {
    /// Engine-minted identity.
    pub id: Uuid,
    /// Calendar occurrence this schedule covers.
    pub occurrence_id: String,
    /// Groups in the early slot, in ordinal order.
    pub early: Vec<Group>,
    /// Groups in the late slot, in ordinal order.
    pub late: Vec<Group>,
    /// When the schedule was created.
    pub created_at: DateTime<Utc>,
    /// When a group was last added.
    pub updated_at: DateTime<Utc>,
}

impl OccurrenceSchedule {
    /// Creates an empty schedule for the given occurrence.
    pub fn new(occurrence_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            occurrence_id: occurrence_id.into(),
            early: Vec::new(),
            late: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a group to the sequence matching its slot tag.
    ///
    /// Enforces the structural invariants: the group's ordinal must be the
    /// next position in its slot sequence, and none of its members may
    /// already be scheduled anywhere in this schedule. Violations are
    /// internal consistency failures, not user errors.
    pub fn push_group(&mut self, group: Group) -> EngineResult<()> {
        if let Some(member) = group.members.iter().find(|m| self.contains_participant(&m.id)) {
            return Err(EngineError::Internal {
                step: "assembly",
                detail: format!("participant '{}' is already scheduled", member.id),
            });
        }

        let sequence = match group.slot {
            TimeSlot::Early => &mut self.early,
            TimeSlot::Late => &mut self.late,
        };
        let expected = sequence.len() as u32;
        if group.position != expected {
            return Err(EngineError::Internal {
                step: "assembly",
                detail: format!(
                    "group at ordinal {} appended to the {} slot where {} was expected",
                    group.position,
                    group.slot.label(),
                    expected
                ),
            });
        }

        sequence.push(group);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Groups in the given slot, in ordinal order.
    pub fn groups_for(&self, slot: TimeSlot) -> &[Group] {
        match slot {
            TimeSlot::Early => &self.early,
            TimeSlot::Late => &self.late,
        }
    }

    /// All groups, early slot first.
    pub fn all_groups(&self) -> impl Iterator<Item = &Group> {
        self.early.iter().chain(self.late.iter())
    }

    /// Total number of groups across both slots.
    pub fn group_count(&self) -> usize {
        self.early.len() + self.late.len()
    }

    /// Total number of scheduled participants.
    pub fn participant_count(&self) -> usize {
        self.all_groups().map(|g| g.members.len()).sum()
    }

    /// Scheduled participant ids, in group order.
    pub fn participant_ids(&self) -> Vec<&str> {
        self.all_groups()
            .flat_map(|g| g.members.iter().map(|m| m.id.as_str()))
            .collect()
    }

    /// Whether the given participant is scheduled anywhere.
    pub fn contains_participant(&self, participant_id: &str) -> bool {
        self.all_groups().any(|g| g.contains(participant_id))
    }

    /// Whether the schedule has no groups in either slot.
    pub fn is_empty(&self) -> bool {
        self.early.is_empty() && self.late.is_empty()
    }
}
