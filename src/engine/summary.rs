//! Schedule summary reporting.
//!
//! Aggregates a finished schedule into the counts an organizer surfaces:
//! groups and participants per slot, full vs partial groups, and the
//! left/right laterality distribution. All of it is informational; none
//! of these figures feed back into generation.

use crate::models::{Laterality, OccurrenceSchedule, TimeSlot};

/// Headline figures for one occurrence schedule.
#[derive(Debug, Clone)]
pub struct ScheduleSummary {
    /// Groups in the early slot.
    pub early_group_count: usize,
    /// Groups in the late slot.
    pub late_group_count: usize,
    /// Participants in the early slot.
    pub early_participant_count: usize,
    /// Participants in the late slot.
    pub late_participant_count: usize,
    /// Groups at full size.
    pub full_group_count: usize,
    /// Groups below full size.
    pub partial_group_count: usize,
    /// Left-handed participants scheduled.
    pub left_handed: usize,
    /// Right-handed participants scheduled.
    pub right_handed: usize,
}

impl ScheduleSummary {
    /// Computes summary figures from a schedule.
    pub fn calculate(schedule: &OccurrenceSchedule) -> Self {
        let mut summary = Self {
            early_group_count: schedule.groups_for(TimeSlot::Early).len(),
            late_group_count: schedule.groups_for(TimeSlot::Late).len(),
            early_participant_count: 0,
            late_participant_count: 0,
            full_group_count: 0,
            partial_group_count: 0,
            left_handed: 0,
            right_handed: 0,
        };

        for group in schedule.all_groups() {
            if group.is_full() {
                summary.full_group_count += 1;
            } else {
                summary.partial_group_count += 1;
            }
            match group.slot {
                TimeSlot::Early => summary.early_participant_count += group.len(),
                TimeSlot::Late => summary.late_participant_count += group.len(),
            }
            for member in &group.members {
                match member.laterality {
                    Laterality::Left => summary.left_handed += 1,
                    Laterality::Right => summary.right_handed += 1,
                }
            }
        }

        summary
    }

    /// Total scheduled participants.
    pub fn participant_count(&self) -> usize {
        self.early_participant_count + self.late_participant_count
    }
}
