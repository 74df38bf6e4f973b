//! In-memory pairing ledger.
//!
//! Stores all counters in one `RwLock`-guarded map, which makes each
//! read-modify-write atomic within this process. Suitable for tests and
//! local development; deployments with concurrent generation runs per
//! season need an implementation with per-season locking (see the trait
//! docs in [`super`]).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{LedgerError, LedgerResult, PairKey, PairingLedger, PairingRecord};

type SeasonCounters = HashMap<String, HashMap<PairKey, u32>>;

/// In-memory [`PairingLedger`] implementation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    data: Arc<RwLock<SeasonCounters>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a counter directly. Test and fixture setup helper.
    pub fn seed(&self, season_id: &str, a: &str, b: &str, count: u32) {
        if let Ok(mut data) = self.data.write() {
            data.entry(season_id.to_string())
                .or_default()
                .insert(PairKey::new(a, b), count);
        }
    }

    /// Sum of all counters for a season. Useful for asserting that nothing
    /// was written.
    pub fn season_total(&self, season_id: &str) -> u32 {
        self.data
            .read()
            .map(|data| {
                data.get(season_id)
                    .map(|pairs| pairs.values().sum())
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, SeasonCounters>> {
        self.data
            .read()
            .map_err(|_| LedgerError::Internal("ledger lock poisoned".into()))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, SeasonCounters>> {
        self.data
            .write()
            .map_err(|_| LedgerError::Internal("ledger lock poisoned".into()))
    }
}

#[async_trait]
impl PairingLedger for InMemoryLedger {
    async fn count(&self, season_id: &str, a: &str, b: &str) -> LedgerResult<u32> {
        let data = self.read()?;
        Ok(data
            .get(season_id)
            .and_then(|pairs| pairs.get(&PairKey::new(a, b)))
            .copied()
            .unwrap_or(0))
    }

    async fn increment(&self, season_id: &str, a: &str, b: &str) -> LedgerResult<()> {
        let mut data = self.write()?;
        let counter = data
            .entry(season_id.to_string())
            .or_default()
            .entry(PairKey::new(a, b))
            .or_insert(0);
        *counter += 1;
        Ok(())
    }

    async fn reset(&self, season_id: &str) -> LedgerResult<()> {
        let mut data = self.write()?;
        data.remove(season_id);
        Ok(())
    }

    async fn pairings_for(
        &self,
        season_id: &str,
        participant_id: &str,
    ) -> LedgerResult<Vec<PairingRecord>> {
        let data = self.read()?;
        Ok(data
            .get(season_id)
            .map(|pairs| {
                pairs
                    .iter()
                    .filter(|(key, _)| key.involves(participant_id))
                    .map(|(key, &count)| PairingRecord {
                        pair: key.clone(),
                        season_id: season_id.to_string(),
                        count,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_count_defaults_to_zero() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.count("s1", "p1", "p2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_increment_is_symmetric() {
        let ledger = InMemoryLedger::new();
        ledger.increment("s1", "p1", "p2").await.unwrap();
        ledger.increment("s1", "p2", "p1").await.unwrap();

        assert_eq!(ledger.count("s1", "p1", "p2").await.unwrap(), 2);
        assert_eq!(ledger.count("s1", "p2", "p1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seasons_are_isolated() {
        let ledger = InMemoryLedger::new();
        ledger.increment("s1", "p1", "p2").await.unwrap();

        assert_eq!(ledger.count("s1", "p1", "p2").await.unwrap(), 1);
        assert_eq!(ledger.count("s2", "p1", "p2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reset_clears_one_season() {
        let ledger = InMemoryLedger::new();
        ledger.seed("s1", "p1", "p2", 3);
        ledger.seed("s2", "p1", "p2", 5);

        ledger.reset("s1").await.unwrap();

        assert_eq!(ledger.count("s1", "p1", "p2").await.unwrap(), 0);
        assert_eq!(ledger.count("s2", "p1", "p2").await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_pairings_for_filters_by_participant() {
        let ledger = InMemoryLedger::new();
        ledger.seed("s1", "p1", "p2", 1);
        ledger.seed("s1", "p1", "p3", 2);
        ledger.seed("s1", "p2", "p3", 4);

        let mut records = ledger.pairings_for("s1", "p1").await.unwrap();
        records.sort_by(|a, b| a.count.cmp(&b.count));

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.pair.involves("p1")));
        assert_eq!(records[1].count, 2);
    }

    #[tokio::test]
    async fn test_season_total() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.season_total("s1"), 0);
        ledger.seed("s1", "p1", "p2", 3);
        ledger.seed("s1", "p3", "p4", 2);
        assert_eq!(ledger.season_total("s1"), 5);
    }
}
