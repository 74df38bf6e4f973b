//! Schedule assembly.
//!
//! Collects formed groups into a single occurrence schedule. Each group is
//! routed into the sequence matching its slot tag and appended at the next
//! ordinal; the final completeness gate catches any count drift between
//! the balanced input and the assembled schedule.

use crate::error::{EngineError, EngineResult};
use crate::models::{Group, OccurrenceSchedule, TimeSlot};

/// Builds an [`OccurrenceSchedule`] one group at a time.
#[derive(Debug)]
pub struct ScheduleAssembler {
    schedule: OccurrenceSchedule,
}

impl ScheduleAssembler {
    /// Starts an empty schedule for the occurrence.
    pub fn new(occurrence_id: impl Into<String>) -> EngineResult<Self> {
        let occurrence_id = occurrence_id.into();
        if occurrence_id.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "occurrence id must not be empty".into(),
            ));
        }
        Ok(Self {
            schedule: OccurrenceSchedule::new(occurrence_id),
        })
    }

    /// Appends a group to the sequence for `slot`.
    ///
    /// The group's own tag must match the stated slot; a mismatch is an
    /// input error, not a consistency failure. Ordinal continuity and
    /// participant uniqueness are enforced by the schedule itself.
    pub fn add_group(&mut self, slot: TimeSlot, group: Group) -> EngineResult<()> {
        if group.slot != slot {
            return Err(EngineError::InvalidInput(format!(
                "group {} is tagged {} but was submitted to the {} sequence",
                group.id,
                group.slot.label(),
                slot.label()
            )));
        }
        self.schedule.push_group(group)
    }

    /// Groups added so far.
    pub fn group_count(&self) -> usize {
        self.schedule.group_count()
    }

    /// Completeness gate: the assembled schedule must cover exactly the
    /// expected number of participants (each of them once, which insertion
    /// already guarantees). Consumes the assembler and yields the schedule.
    pub fn finish(self, expected_participants: usize) -> EngineResult<OccurrenceSchedule> {
        let actual = self.schedule.participant_count();
        if actual != expected_participants {
            return Err(EngineError::Internal {
                step: "assembly",
                detail: format!(
                    "schedule covers {actual} participants, expected {expected_participants}"
                ),
            });
        }
        Ok(self.schedule)
    }
}
