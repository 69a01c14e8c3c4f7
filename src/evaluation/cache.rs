use super::evaluation::Evaluation;
use std::collections::BTreeMap;

/// memo store of solved positions keyed by canonical state key. one
/// cache serves one search instance at a time; a missed entry only
/// costs redundant recomputation, never a wrong answer. the map is
/// ordered so exports are deterministic.
#[derive(Debug, Default)]
pub struct EvaluationCache {
    store: BTreeMap<String, Evaluation>,
    hits: u64,
    misses: u64,
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.store.len()
    }
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
    pub fn hits(&self) -> u64 {
        self.hits
    }
    pub fn misses(&self) -> u64 {
        self.misses
    }
    /// counted lookup
    pub fn get(&mut self, key: &str) -> Option<&Evaluation> {
        match self.store.get(key) {
            Some(hit) => {
                self.hits += 1;
                Some(hit)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }
    pub fn set(&mut self, key: String, evaluation: Evaluation) {
        self.store.insert(key, evaluation);
    }
    /// fold imported entries into this cache, keeping our counters
    pub fn absorb(&mut self, other: EvaluationCache) {
        self.store.extend(other.store);
    }
    pub fn clear(&mut self) {
        self.store.clear();
        self.hits = 0;
        self.misses = 0;
    }
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Evaluation)> {
        self.store.iter()
    }
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.len(),
        }
    }
}

/// driver-facing counters reported with every step response
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}
