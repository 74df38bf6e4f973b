//! Consumed collaborator interfaces.
//!
//! The roster and the per-occurrence availability records are owned by
//! external collaborators; the engine reads them through these narrow
//! traits and never writes back. [`InMemoryRoster`] is the bundled
//! implementation for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::models::{AvailabilityRecord, Participant};

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by collaborator implementations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Read access to the season roster.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Every participant registered for the season, in registration order.
    async fn all_participants(&self, season_id: &str) -> ProviderResult<Vec<Participant>>;
}

/// Read access to per-occurrence availability records.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// The tri-state availability record for one occurrence. An occurrence
    /// nobody has responded to yet yields an empty record, not an error.
    async fn availability(&self, occurrence_id: &str) -> ProviderResult<AvailabilityRecord>;
}

#[derive(Debug, Default)]
struct RosterData {
    participants: HashMap<String, Vec<Participant>>,
    availability: HashMap<String, AvailabilityRecord>,
}

/// In-memory roster and availability store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    data: Arc<RwLock<RosterData>>,
}

impl InMemoryRoster {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a participant under their season. Fixture setup helper.
    pub fn add_participant(&self, participant: Participant) {
        if let Ok(mut data) = self.data.write() {
            data.participants
                .entry(participant.season_id.clone())
                .or_default()
                .push(participant);
        }
    }

    /// Stores an occurrence's availability record, replacing any previous
    /// one.
    pub fn set_availability(&self, record: AvailabilityRecord) {
        if let Ok(mut data) = self.data.write() {
            data.availability
                .insert(record.occurrence_id().to_string(), record);
        }
    }
}

#[async_trait]
impl RosterProvider for InMemoryRoster {
    async fn all_participants(&self, season_id: &str) -> ProviderResult<Vec<Participant>> {
        let data = self
            .data
            .read()
            .map_err(|_| ProviderError::Internal("roster lock poisoned".into()))?;
        Ok(data.participants.get(season_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl AvailabilityProvider for InMemoryRoster {
    async fn availability(&self, occurrence_id: &str) -> ProviderResult<AvailabilityRecord> {
        let data = self
            .data
            .read()
            .map_err(|_| ProviderError::Internal("roster lock poisoned".into()))?;
        Ok(data
            .availability
            .get(occurrence_id)
            .cloned()
            .unwrap_or_else(|| AvailabilityRecord::new(occurrence_id)))
    }
}
