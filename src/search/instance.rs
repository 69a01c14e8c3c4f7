use super::evaluator::Evaluator;
use super::state::UnrolledState;
use crate::Probability;
use crate::evaluation::cache::CacheStats;
use crate::evaluation::cache::EvaluationCache;
use crate::evaluation::evaluation::Evaluation;
use crate::save::Encoding;
use anyhow::Result;

/// one driven evaluation session: an evaluator for the position under
/// study plus the memo cache shared across every position this
/// instance is pointed at. the driving layer time-slices work through
/// `step` and reads progress, snapshots, and cache stats between
/// slices.
#[derive(Debug)]
pub struct Instance {
    evaluator: Evaluator,
    cache: EvaluationCache,
}

impl From<UnrolledState> for Instance {
    fn from(state: UnrolledState) -> Self {
        Self {
            evaluator: Evaluator::from(state),
            cache: EvaluationCache::new(),
        }
    }
}

impl Instance {
    /// point this instance at a new position, keeping the cache warm
    pub fn set_state(&mut self, state: UnrolledState) {
        log::info!("{:<32}{:<32}", "pointing instance at", state);
        self.evaluator = Evaluator::from(state);
    }
    /// perform one unit of work; returns whether work remains
    pub fn step(&mut self) -> bool {
        self.evaluator.process_one(Some(&mut self.cache))
    }
    /// drain the evaluation to completion
    pub fn run(&mut self) {
        self.evaluator.process_all(Some(&mut self.cache));
        let stats = self.cache.stats();
        log::debug!(
            "{:<32}{:<32}",
            "cache traffic",
            format!("{} hits {} misses {} entries", stats.hits, stats.misses, stats.entries)
        );
    }
    pub fn finished(&self) -> bool {
        self.evaluator.finished()
    }
    pub fn progress(&self) -> Probability {
        self.evaluator.progress()
    }
    /// best current value, partial or final
    pub fn snapshot(&self) -> Evaluation {
        self.evaluator.compile_partial_evaluation()
    }
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
    pub fn clear_cache(&mut self) {
        log::info!("{:<32}{:<32}", "clearing cache", self.cache.len());
        self.cache.clear();
    }
    /// export the cache as an opaque text payload
    pub fn download_cache(&self, encoding: Encoding) -> String {
        log::info!("{:<32}{:<32}", "downloading cache", self.cache.len());
        crate::save::cache::encode(&self.cache, encoding)
    }
    /// import a previously downloaded payload, merging its entries
    /// over ours. a malformed payload fails the load and leaves the
    /// cache untouched.
    pub fn load_cache(&mut self, payload: &str, encoding: Encoding) -> Result<()> {
        let staged = crate::save::cache::decode(payload, encoding)?;
        log::info!("{:<32}{:<32}", "loading cache", staged.len());
        self.cache.absorb(staged);
        Ok(())
    }
}
