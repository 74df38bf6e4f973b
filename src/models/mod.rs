//! Scheduling domain models.
//!
//! Core data types for occurrence scheduling. Participants, availability
//! records, and pairing history are owned by external collaborators and
//! read-only to this crate; [`Group`] and [`OccurrenceSchedule`] are the
//! entities the engine produces.

mod availability;
mod group;
mod participant;
mod schedule;

pub use availability::{AvailabilityRecord, AvailabilitySource, AvailabilityStatus};
pub use group::{Group, TimeSlot, GROUP_SIZE};
pub use participant::{Laterality, Participant, TimePreference};
pub use schedule::OccurrenceSchedule;
