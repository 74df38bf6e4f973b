//! Foursome scheduling engine.
//!
//! Assigns a roster of available participants into groups of up to four
//! across two time slots for a recurring event, honoring stated time
//! preferences and minimizing how often any two participants are regrouped
//! over a season.
//!
//! # Pipeline
//!
//! 1. [`engine::resolve`]: filter the roster by explicit availability
//! 2. [`engine::balance`]: split the available set into early/late slots
//! 3. [`engine::FoursomeOptimizer`]: form foursomes against the pairing
//!    history ledger
//! 4. [`engine::ScheduleAssembler`]: assemble the occurrence schedule
//! 5. [`validation::validate`]: itemize violations and gate finalization
//!
//! [`engine::ScheduleEngine::generate`] runs steps 2 to 4 and returns the
//! schedule together with ordered trace records;
//! [`engine::ScheduleEngine::finalize`] commits a validated schedule to
//! the [`ledger::PairingLedger`].
//!
//! # Modules
//!
//! - **`models`**: domain types (Participant, Group, OccurrenceSchedule,
//!   tri-state availability)
//! - **`engine`**: resolution, balancing, optimization, assembly, summary
//! - **`ledger`**: pairing history interface and the in-memory adapter
//! - **`providers`**: roster and availability collaborator interfaces
//! - **`validation`**: completeness, uniqueness, preference, and
//!   availability checks
//! - **`error`**: the engine error taxonomy

pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
pub mod providers;
pub mod validation;
