//! Engine error taxonomy.
//!
//! Three failure classes, each with a distinct propagation policy:
//!
//! - **Input contract errors**: raised before any work starts; generation
//!   never begins.
//! - **Internal consistency errors**: fatal, abort generation and name the
//!   offending pipeline step.
//! - **Ledger failures**: collaborator errors, propagated unchanged.
//!
//! Availability findings are NOT errors. They are structured data returned
//! by [`validate`](crate::validation::validate) so the orchestrator can
//! inspect them and decide on remediation. The single exception is
//! [`EngineError::FinalizationRefused`]: finalization is an explicit commit
//! and must not proceed past an availability violation.

use crate::ledger::LedgerError;
use crate::models::AvailabilityStatus;
use crate::providers::ProviderError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by schedule generation and finalization.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An input contract was violated; generation never started.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A participant belongs to a different season than the run targets.
    #[error("participant '{participant_id}' belongs to season '{found}', expected '{expected}'")]
    SeasonMismatch {
        expected: String,
        found: String,
        participant_id: String,
    },

    /// A group invariant was violated (size bounds, duplicate member).
    #[error("group contract violated: {0}")]
    GroupContract(String),

    /// An internal consistency check failed mid-pipeline.
    #[error("internal consistency failure at {step}: {detail}")]
    Internal {
        /// Pipeline step where the failure was detected.
        step: &'static str,
        /// Diagnostic payload describing the inconsistency.
        detail: String,
    },

    /// Finalization refused: a scheduled participant is not explicitly
    /// available for the occurrence.
    #[error(
        "finalization refused: '{participant_name}' ({participant_id}) has availability status {status:?}"
    )]
    FinalizationRefused {
        participant_id: String,
        participant_name: String,
        status: AvailabilityStatus,
    },

    /// The pairing ledger collaborator failed.
    #[error("pairing ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// A roster or availability collaborator failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}
