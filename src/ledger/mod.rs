//! Pairing history ledger interface.
//!
//! The ledger is an external, season-scoped collaborator persisting how
//! many times any two participants have shared a group. The engine reads
//! counts during optimization and increments them at finalization;
//! persistence mechanics live entirely behind [`PairingLedger`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod memory;
pub use memory::InMemoryLedger;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised by ledger implementations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Normalized unordered pair key.
///
/// `count(a, b)` and `count(b, a)` must resolve to the same record, so the
/// key orders its two ids lexicographically.
///
/// # Example
/// ```
/// use foursomes::ledger::PairKey;
///
/// assert_eq!(PairKey::new("beth", "adam"), PairKey::new("adam", "beth"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    /// Creates a normalized key for the two participant ids.
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }

    /// Lexicographically smaller id.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger id.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Whether the given participant is part of this pair.
    pub fn involves(&self, participant_id: &str) -> bool {
        self.first == participant_id || self.second == participant_id
    }
}

/// One persisted pairing counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingRecord {
    /// Normalized participant pair.
    pub pair: PairKey,
    /// Season the counter is scoped to.
    pub season_id: String,
    /// Number of prior co-groupings.
    pub count: u32,
}

/// Season-scoped pairing history store.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so the engine can be shared across
/// async tasks.
///
/// # Consistency
/// `increment` is a read-modify-write. The engine issues ledger calls
/// strictly in sequence within one generation run, but deployments that run
/// concurrent generations for the same season must serialize per-season
/// updates themselves; this trait does not make that race impossible.
#[async_trait]
pub trait PairingLedger: Send + Sync {
    /// Number of times `a` and `b` have shared a group this season.
    /// Symmetric in `a` and `b`.
    async fn count(&self, season_id: &str, a: &str, b: &str) -> LedgerResult<u32>;

    /// Records one more shared grouping for the pair.
    async fn increment(&self, season_id: &str, a: &str, b: &str) -> LedgerResult<()>;

    /// Clears every pairing counter for the season.
    async fn reset(&self, season_id: &str) -> LedgerResult<()>;

    /// All pairings involving the given participant this season.
    async fn pairings_for(
        &self,
        season_id: &str,
        participant_id: &str,
    ) -> LedgerResult<Vec<PairingRecord>>;
}
