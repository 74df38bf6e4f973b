//! Schedule generation pipeline.
//!
//! Wires the balancer, optimizer, and assembler into a single `generate`
//! entry point, then gates ledger commits behind `finalize`. Generation is
//! all-or-nothing: the caller receives a fully assembled schedule together
//! with ordered trace records, or an error, and the pairing ledger is only
//! written by an explicit `finalize` or `track_pairings`.
//!
//! # Pipeline
//!
//! 1. [`resolve`]: roster to available participants (caller-invoked)
//! 2. [`balance`]: available participants to early/late slots
//! 3. [`FoursomeOptimizer`]: slot pools to foursomes
//! 4. [`ScheduleAssembler`]: foursomes to an [`OccurrenceSchedule`]
//!
//! Validation ([`crate::validation::validate`]) runs on the finished
//! schedule; its findings are data, and only the availability class blocks
//! [`ScheduleEngine::finalize`].

mod assembler;
mod balancer;
mod optimizer;
mod resolver;
mod summary;

pub use assembler::ScheduleAssembler;
pub use balancer::{balance, SlotSplit};
pub use optimizer::{FoursomeOptimizer, OptimizerConfig};
pub use resolver::{resolve, Exclusion, ExclusionReason, ResolvedRoster};
pub use summary::ScheduleSummary;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::ledger::PairingLedger;
use crate::models::{
    AvailabilitySource, AvailabilityStatus, Group, OccurrenceSchedule, Participant, TimeSlot,
};
use crate::providers::{AvailabilityProvider, RosterProvider};

/// One recorded pipeline step.
///
/// Trace records replace interleaved step logging: `generate` returns them
/// in execution order and the caller decides whether and how to surface
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    /// Pipeline stage that produced the record.
    pub stage: String,
    /// Human-readable description of what happened.
    pub message: String,
}

impl TraceStep {
    fn new(stage: &str, message: impl Into<String>) -> Self {
        Self {
            stage: stage.to_string(),
            message: message.into(),
        }
    }
}

/// Everything a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The assembled schedule.
    pub schedule: OccurrenceSchedule,
    /// How participants were split across slots.
    pub split: SlotSplit,
    /// Ordered pipeline step records.
    pub trace: Vec<TraceStep>,
}

/// Receipt for a finalized schedule.
#[derive(Debug, Clone)]
pub struct FinalizeReceipt {
    /// Schedule that was committed.
    pub schedule_id: Uuid,
    /// Season whose ledger was updated.
    pub season_id: String,
    /// Number of intra-group pairs incremented.
    pub pairs_tracked: usize,
}

/// Schedule generation and finalization engine.
///
/// Owns the pairing ledger collaborator and the optimizer configuration.
/// All computation is synchronous; only ledger calls suspend, and they are
/// awaited strictly in sequence within one run.
pub struct ScheduleEngine<L: PairingLedger> {
    ledger: L,
    optimizer: FoursomeOptimizer,
}

impl<L: PairingLedger> ScheduleEngine<L> {
    /// Creates an engine with default optimizer configuration.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            optimizer: FoursomeOptimizer::new(),
        }
    }

    /// Sets the optimizer configuration.
    pub fn with_optimizer_config(mut self, config: OptimizerConfig) -> Self {
        self.optimizer = FoursomeOptimizer::new().with_config(config);
        self
    }

    /// The ledger collaborator.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Fetches the season roster and the occurrence's availability record
    /// from the collaborators, then resolves who can play.
    ///
    /// Convenience front door for [`resolve`]; provider calls are awaited
    /// in sequence, and a failure propagates before any resolution work.
    pub async fn resolve_occurrence<P>(
        &self,
        provider: &P,
        season_id: &str,
        occurrence_id: &str,
    ) -> EngineResult<ResolvedRoster>
    where
        P: RosterProvider + AvailabilityProvider,
    {
        let roster = provider.all_participants(season_id).await?;
        let record = provider.availability(occurrence_id).await?;
        Ok(resolve(&roster, &record))
    }

    /// Generates a schedule for one occurrence from already-resolved
    /// participants.
    ///
    /// Input contract errors (empty occurrence or season id, participants
    /// spanning multiple seasons) fail before any work starts. Nothing is
    /// written to the ledger under any outcome of this call.
    pub async fn generate(
        &self,
        occurrence_id: &str,
        resolved: &[Participant],
        season_id: &str,
    ) -> EngineResult<GenerationOutcome> {
        if occurrence_id.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "occurrence id must not be empty".into(),
            ));
        }
        if season_id.trim().is_empty() {
            return Err(EngineError::InvalidInput("season id must not be empty".into()));
        }
        if let Some(stray) = resolved.iter().find(|p| p.season_id != season_id) {
            return Err(EngineError::SeasonMismatch {
                expected: season_id.to_string(),
                found: stray.season_id.clone(),
                participant_id: stray.id.clone(),
            });
        }

        let mut trace = vec![TraceStep::new(
            "input",
            format!(
                "{} resolved participants for occurrence '{occurrence_id}'",
                resolved.len()
            ),
        )];

        let split = balance(resolved);
        trace.push(TraceStep::new(
            "balance",
            format!("early {} / late {}", split.early.len(), split.late.len()),
        ));

        let mut assembler = ScheduleAssembler::new(occurrence_id)?;
        for slot in [TimeSlot::Early, TimeSlot::Late] {
            let pool = split.participants_for(slot);
            let groups = if self.optimizer.config().optimize {
                self.optimizer.optimize(pool, season_id, &self.ledger).await?
            } else {
                self.optimizer.partition_in_order(pool)
            };
            trace.push(TraceStep::new(
                "optimize",
                format!(
                    "{} slot: {} groups from {} participants",
                    slot.label(),
                    groups.len(),
                    pool.len()
                ),
            ));

            for (position, members) in groups.into_iter().enumerate() {
                let group = Group::new(slot, position as u32, members)?;
                assembler.add_group(slot, group)?;
            }
        }

        let schedule = assembler.finish(split.total())?;
        trace.push(TraceStep::new(
            "assemble",
            format!(
                "{} groups covering {} participants",
                schedule.group_count(),
                schedule.participant_count()
            ),
        ));
        log::debug!(
            "generated schedule {} for occurrence '{}'",
            schedule.id,
            occurrence_id
        );

        Ok(GenerationOutcome {
            schedule,
            split,
            trace,
        })
    }

    /// Increments the ledger once for every intra-group pair.
    ///
    /// Calling this twice for the same schedule adds exactly two to every
    /// involved pair: doubling by design, not accidental double counting.
    /// Returns the number of pairs incremented.
    pub async fn track_pairings(
        &self,
        schedule: &OccurrenceSchedule,
        season_id: &str,
    ) -> EngineResult<usize> {
        let mut tracked = 0;
        for group in schedule.all_groups() {
            for a in 0..group.members.len() {
                for b in (a + 1)..group.members.len() {
                    self.ledger
                        .increment(season_id, &group.members[a].id, &group.members[b].id)
                        .await?;
                    tracked += 1;
                }
            }
        }
        Ok(tracked)
    }

    /// Commits a schedule: availability gate first, then pairing tracking.
    ///
    /// Refuses while any scheduled participant's status is not explicitly
    /// available, naming the offender. Nothing is written to the ledger on
    /// refusal.
    pub async fn finalize(
        &self,
        schedule: &OccurrenceSchedule,
        season_id: &str,
        availability: &dyn AvailabilitySource,
    ) -> EngineResult<FinalizeReceipt> {
        for group in schedule.all_groups() {
            for member in &group.members {
                let status = availability.status_of(&member.id);
                if status != AvailabilityStatus::Available {
                    return Err(EngineError::FinalizationRefused {
                        participant_id: member.id.clone(),
                        participant_name: member.name.clone(),
                        status,
                    });
                }
            }
        }

        let pairs_tracked = self.track_pairings(schedule, season_id).await?;
        log::debug!(
            "finalized schedule {} for season '{}' ({} pairs tracked)",
            schedule.id,
            season_id,
            pairs_tracked
        );
        Ok(FinalizeReceipt {
            schedule_id: schedule.id,
            season_id: season_id.to_string(),
            pairs_tracked,
        })
    }
}
