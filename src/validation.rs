//! Schedule validation.
//!
//! Checks a completed schedule against the available participant set, the
//! members' stated preferences, and (optionally) the occurrence's
//! availability record. Findings are data, not errors: the report never
//! aborts the pipeline, but finalization refuses to proceed while
//! availability violations are present
//! (see [`ScheduleEngine::finalize`](crate::engine::ScheduleEngine::finalize)).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{
    AvailabilitySource, AvailabilityStatus, OccurrenceSchedule, Participant, TimePreference,
    TimeSlot,
};

/// Categories of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Scheduled but absent from the available participant set.
    NotInAvailableSet,
    /// Scheduled more than once across the schedule.
    DuplicateAssignment,
    /// Placed in the slot opposite the stated preference.
    PreferenceMismatch,
    /// The availability record does not mark the participant explicitly
    /// available; carries the observed status.
    NotExplicitlyAvailable(AvailabilityStatus),
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Offending participant's id.
    pub participant_id: String,
    /// Offending participant's display name.
    pub participant_name: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, participant: &Participant, message: impl Into<String>) -> Self {
        Self {
            kind,
            participant_id: participant.id.clone(),
            participant_name: participant.name.clone(),
            message: message.into(),
        }
    }
}

/// Validation outcome: a validity flag plus itemized findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether no violations were found.
    pub valid: bool,
    /// All findings, in schedule order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether any finding is of the availability class, the one that
    /// unconditionally blocks finalization.
    pub fn has_availability_violations(&self) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v.kind, ViolationKind::NotExplicitlyAvailable(_)))
    }
}

/// Validates a completed schedule.
///
/// Checks, per scheduled participant:
/// 1. membership in the available set,
/// 2. uniqueness across the whole schedule,
/// 3. slot compatibility with the stated preference ("either" never
///    conflicts),
/// 4. explicit availability, when a record is supplied.
///
/// Returns all findings; never panics or aborts.
pub fn validate(
    schedule: &OccurrenceSchedule,
    available: &[Participant],
    availability: Option<&dyn AvailabilitySource>,
) -> ValidationReport {
    let mut violations = Vec::new();
    let available_ids: HashSet<&str> = available.iter().map(|p| p.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for slot in [TimeSlot::Early, TimeSlot::Late] {
        for group in schedule.groups_for(slot) {
            for member in &group.members {
                if !available_ids.contains(member.id.as_str()) {
                    violations.push(Violation::new(
                        ViolationKind::NotInAvailableSet,
                        member,
                        format!("'{}' is not in the available participant set", member.id),
                    ));
                }

                if !seen.insert(member.id.as_str()) {
                    violations.push(Violation::new(
                        ViolationKind::DuplicateAssignment,
                        member,
                        format!("'{}' is scheduled more than once", member.id),
                    ));
                }

                let conflicts = matches!(
                    (member.preference, slot),
                    (TimePreference::Early, TimeSlot::Late)
                        | (TimePreference::Late, TimeSlot::Early)
                );
                if conflicts {
                    violations.push(Violation::new(
                        ViolationKind::PreferenceMismatch,
                        member,
                        format!(
                            "'{}' prefers {} but is scheduled in the {} slot",
                            member.id,
                            slot.opposite().label(),
                            slot.label()
                        ),
                    ));
                }

                if let Some(source) = availability {
                    let status = source.status_of(&member.id);
                    if status != AvailabilityStatus::Available {
                        violations.push(Violation::new(
                            ViolationKind::NotExplicitlyAvailable(status),
                            member,
                            format!(
                                "'{}' ({}) has availability status {:?}, not explicitly available",
                                member.id, member.name, status
                            ),
                        ));
                    }
                }
            }
        }
    }

    ValidationReport {
        valid: violations.is_empty(),
        violations,
    }
}
