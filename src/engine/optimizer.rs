//! Foursome formation.
//!
//! Builds groups of up to four from one slot's pool. In unoptimized mode
//! the pool is chunked in original order. In optimized mode every remaining
//! 4-combination is scored against the pairing ledger (sum of the six
//! internal pair counts) and the first minimum in enumeration order wins,
//! so results are fully deterministic for a fixed input order and ledger
//! snapshot.
//!
//! # Complexity
//!
//! Optimized mode enumerates `C(n, 4)` candidates per extraction round.
//! That is exact and fine for league-sized slot pools, but it grows
//! quartically: a pool of 40 already means 91,390 candidates per round.
//! Pools above [`OptimizerConfig::warn_pool_size`] log a warning rather
//! than silently approximating; callers with very large pools should
//! disable optimization instead.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::ledger::{PairKey, PairingLedger};
use crate::models::{Participant, GROUP_SIZE};

/// Optimizer knobs.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Whether pairing-history optimization is enabled.
    pub optimize: bool,
    /// Pool size above which the combinatorial cost warning fires.
    pub warn_pool_size: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            optimize: true,
            warn_pool_size: 32,
        }
    }
}

/// Forms foursomes from a slot pool.
#[derive(Debug, Clone, Default)]
pub struct FoursomeOptimizer {
    config: OptimizerConfig,
}

impl FoursomeOptimizer {
    /// Creates an optimizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Partitions the pool in original order into consecutive chunks of
    /// four; any remainder forms one final partial group.
    pub fn partition_in_order(&self, pool: &[Participant]) -> Vec<Vec<Participant>> {
        pool.chunks(GROUP_SIZE).map(|chunk| chunk.to_vec()).collect()
    }

    /// Forms groups minimizing cumulative historical pairing weight.
    ///
    /// Pair counts for the whole pool are fetched up front, one sequential
    /// await per pair; extraction afterwards is pure computation. While at
    /// least four participants remain, the best-scoring 4-combination is
    /// extracted; a final remainder smaller than four forms one partial
    /// group. Every participant appears in exactly one returned group.
    pub async fn optimize<L: PairingLedger + ?Sized>(
        &self,
        pool: &[Participant],
        season_id: &str,
        ledger: &L,
    ) -> EngineResult<Vec<Vec<Participant>>> {
        if pool.len() > self.config.warn_pool_size {
            log::warn!(
                "optimizing a pool of {} evaluates {} candidate groups per round",
                pool.len(),
                combination_count(pool.len())
            );
        }

        let weights = fetch_pair_counts(pool, season_id, ledger).await?;

        let mut remaining: Vec<Participant> = pool.to_vec();
        let mut groups = Vec::new();
        while remaining.len() >= GROUP_SIZE {
            let indices = best_combination(&remaining, &weights)?;
            check_candidate(&indices, remaining.len())?;

            // Remove from the back so earlier indices stay valid, then
            // restore formation order.
            let mut members = Vec::with_capacity(GROUP_SIZE);
            for &index in indices.iter().rev() {
                members.push(remaining.remove(index));
            }
            members.reverse();
            groups.push(members);
        }

        if !remaining.is_empty() {
            groups.push(remaining);
        }
        Ok(groups)
    }
}

/// Fetches the ledger count for every pair in the pool, sequentially.
async fn fetch_pair_counts<L: PairingLedger + ?Sized>(
    pool: &[Participant],
    season_id: &str,
    ledger: &L,
) -> EngineResult<HashMap<PairKey, u32>> {
    let mut weights = HashMap::new();
    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            let key = PairKey::new(&pool[i].id, &pool[j].id);
            if weights.contains_key(&key) {
                continue;
            }
            let count = ledger.count(season_id, &pool[i].id, &pool[j].id).await?;
            weights.insert(key, count);
        }
    }
    Ok(weights)
}

/// Returns the first 4-combination (in enumeration order) with minimal
/// pairing score.
fn best_combination(
    remaining: &[Participant],
    weights: &HashMap<PairKey, u32>,
) -> EngineResult<[usize; GROUP_SIZE]> {
    let mut combinations = Combinations::new(remaining.len());
    let mut best: Option<([usize; GROUP_SIZE], u32)> = None;

    while let Some(indices) = combinations.next() {
        let score = combination_score(remaining, indices, weights);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((*indices, score)),
        }
    }

    best.map(|(indices, _)| indices).ok_or_else(|| EngineError::Internal {
        step: "optimizer",
        detail: format!(
            "no 4-combination available in a remaining pool of {}",
            remaining.len()
        ),
    })
}

/// Sum of the six internal pair counts for a candidate group.
fn combination_score(
    pool: &[Participant],
    indices: &[usize; GROUP_SIZE],
    weights: &HashMap<PairKey, u32>,
) -> u32 {
    let mut score = 0;
    for a in 0..GROUP_SIZE {
        for b in (a + 1)..GROUP_SIZE {
            let key = PairKey::new(&pool[indices[a]].id, &pool[indices[b]].id);
            score += weights.get(&key).copied().unwrap_or(0);
        }
    }
    score
}

/// Contract check: a candidate must be drawn from the current remaining
/// pool, with four distinct members. A violation is a programming error,
/// not a user error, and aborts generation.
fn check_candidate(indices: &[usize; GROUP_SIZE], remaining: usize) -> EngineResult<()> {
    let in_range = indices.iter().all(|&i| i < remaining);
    let strictly_increasing = indices.windows(2).all(|w| w[0] < w[1]);
    if !in_range || !strictly_increasing {
        return Err(EngineError::Internal {
            step: "optimizer",
            detail: format!(
                "candidate {indices:?} not drawn from the remaining pool of {remaining}"
            ),
        });
    }
    Ok(())
}

/// `C(n, 4)` without overflow for realistic pool sizes.
fn combination_count(n: usize) -> usize {
    if n < GROUP_SIZE {
        0
    } else {
        n * (n - 1) * (n - 2) * (n - 3) / 24
    }
}

/// Iterative fixed-size combination enumerator.
///
/// Advances one index array in place (no recursion, no per-candidate
/// allocation), yielding index quadruples in lexicographic order.
struct Combinations {
    indices: [usize; GROUP_SIZE],
    n: usize,
    started: bool,
}

impl Combinations {
    fn new(n: usize) -> Self {
        Self {
            indices: [0, 1, 2, 3],
            n,
            started: false,
        }
    }

    fn next(&mut self) -> Option<&[usize; GROUP_SIZE]> {
        if self.n < GROUP_SIZE {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        // Rightmost index that can still advance.
        let mut i = GROUP_SIZE;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - (GROUP_SIZE - i) {
                break;
            }
        }

        self.indices[i] += 1;
        for j in (i + 1)..GROUP_SIZE {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    fn make_pool(ids: &[&str]) -> Vec<Participant> {
        ids.iter().map(|id| Participant::new(*id, "s1")).collect()
    }

    fn group_ids(groups: &[Vec<Participant>]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.iter().map(|p| p.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_combinations_lexicographic() {
        let mut combos = Combinations::new(5);
        let mut all = Vec::new();
        while let Some(indices) = combos.next() {
            all.push(*indices);
        }
        assert_eq!(
            all,
            vec![
                [0, 1, 2, 3],
                [0, 1, 2, 4],
                [0, 1, 3, 4],
                [0, 2, 3, 4],
                [1, 2, 3, 4],
            ]
        );
    }

    #[test]
    fn test_combinations_exact_size() {
        let mut combos = Combinations::new(4);
        assert_eq!(combos.next(), Some(&[0, 1, 2, 3]));
        assert_eq!(combos.next(), None);
    }

    #[test]
    fn test_combinations_undersized_pool() {
        let mut combos = Combinations::new(3);
        assert_eq!(combos.next(), None);
    }

    #[test]
    fn test_combinations_count_matches_formula() {
        for n in 4..=9 {
            let mut combos = Combinations::new(n);
            let mut count = 0;
            while combos.next().is_some() {
                count += 1;
            }
            assert_eq!(count, combination_count(n));
        }
    }

    #[test]
    fn test_partition_in_order_chunks_of_four() {
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d", "e", "f", "g", "h", "i"]);

        let groups = optimizer.partition_in_order(&pool);

        assert_eq!(
            group_ids(&groups),
            vec![vec!["a", "b", "c", "d"], vec!["e", "f", "g", "h"], vec!["i"]]
        );
    }

    #[test]
    fn test_partition_empty_pool() {
        let optimizer = FoursomeOptimizer::new();
        assert!(optimizer.partition_in_order(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_forced_group_when_pool_equals_group_size() {
        // Pool of exactly four: the only combination wins regardless of
        // its score.
        let ledger = InMemoryLedger::new();
        ledger.seed("s1", "a", "b", 2);
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d"]);

        let groups = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();

        assert_eq!(group_ids(&groups), vec![vec!["a", "b", "c", "d"]]);
    }

    #[tokio::test]
    async fn test_remainder_forms_partial_group() {
        let ledger = InMemoryLedger::new();
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d", "e"]);

        let groups = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 1);
    }

    #[tokio::test]
    async fn test_heavily_paired_participants_are_separated() {
        // a and b have played together five times; everyone else never.
        // The first zero-score combination in enumeration order avoids
        // having both, so they land in different groups.
        let ledger = InMemoryLedger::new();
        ledger.seed("s1", "a", "b", 5);
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d", "e", "f", "g", "h"]);

        let groups = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();

        assert_eq!(groups.len(), 2);
        let first: Vec<_> = groups[0].iter().map(|p| p.id.as_str()).collect();
        let second: Vec<_> = groups[1].iter().map(|p| p.id.as_str()).collect();
        assert!(first.contains(&"a") != first.contains(&"b"));
        assert!(second.contains(&"a") != second.contains(&"b"));
    }

    #[tokio::test]
    async fn test_chosen_group_score_is_minimal() {
        let ledger = InMemoryLedger::new();
        ledger.seed("s1", "a", "b", 3);
        ledger.seed("s1", "a", "c", 1);
        ledger.seed("s1", "b", "d", 2);
        ledger.seed("s1", "e", "f", 4);
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d", "e", "f"]);

        let groups = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();
        let weights = fetch_pair_counts(&pool, "s1", &ledger).await.unwrap();

        let score_of = |ids: &[&str]| -> u32 {
            let mut score = 0;
            for i in 0..ids.len() {
                for j in (i + 1)..ids.len() {
                    score += weights
                        .get(&PairKey::new(ids[i], ids[j]))
                        .copied()
                        .unwrap_or(0);
                }
            }
            score
        };

        let chosen: Vec<_> = groups[0].iter().map(|p| p.id.as_str()).collect();
        let chosen_score = score_of(&chosen);

        // Compare against every other 4-combination of the full pool.
        let all_ids: Vec<_> = pool.iter().map(|p| p.id.as_str()).collect();
        let mut combos = Combinations::new(all_ids.len());
        while let Some(indices) = combos.next() {
            let candidate: Vec<_> = indices.iter().map(|&i| all_ids[i]).collect();
            assert!(chosen_score <= score_of(&candidate));
        }
    }

    #[tokio::test]
    async fn test_optimize_is_deterministic() {
        let ledger = InMemoryLedger::new();
        ledger.seed("s1", "a", "d", 2);
        ledger.seed("s1", "b", "e", 1);
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d", "e", "f", "g"]);

        let first = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();
        let second = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();

        assert_eq!(group_ids(&first), group_ids(&second));
    }

    #[tokio::test]
    async fn test_optimize_covers_everyone_exactly_once() {
        let ledger = InMemoryLedger::new();
        let optimizer = FoursomeOptimizer::new();
        let pool = make_pool(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);

        let groups = optimizer.optimize(&pool, "s1", &ledger).await.unwrap();

        let mut all: Vec<_> = groups
            .iter()
            .flat_map(|g| g.iter().map(|p| p.id.clone()))
            .collect();
        all.sort();
        let mut expected: Vec<_> = pool.iter().map(|p| p.id.clone()).collect();
        expected.sort();
        assert_eq!(all, expected);
        assert!(groups.iter().all(|g| g.len() <= GROUP_SIZE && !g.is_empty()));
    }

    #[tokio::test]
    async fn test_optimize_empty_pool() {
        let ledger = InMemoryLedger::new();
        let optimizer = FoursomeOptimizer::new();

        let groups = optimizer.optimize(&[], "s1", &ledger).await.unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_check_candidate_rejects_out_of_pool_indices() {
        assert!(check_candidate(&[0, 1, 2, 3], 4).is_ok());
        assert!(check_candidate(&[0, 1, 2, 5], 4).is_err());
        assert!(check_candidate(&[0, 1, 1, 2], 4).is_err());
    }
}
