use super::evaluator::Evaluator;
use crate::Probability;
use crate::evaluation::cache::EvaluationCache;
use crate::evaluation::evaluation::Evaluation;

/// one edge of an expanded node: the successor state, its chance
/// multiplicity, and the lazily grown subtree that solves it. the
/// subtree is only materialized when the edge is first worked on, and
/// is dropped again once its value has been harvested when the parent
/// runs in reclaiming mode.
#[derive(Debug)]
pub struct Child<S> {
    state: S,
    weight: u64,
    spawn: Option<Box<Evaluator>>,
    value: Option<Evaluation>,
}

impl<S> From<(S, u64)> for Child<S> {
    fn from((state, weight): (S, u64)) -> Self {
        Self {
            state,
            weight,
            spawn: None,
            value: None,
        }
    }
}

impl<S> Child<S>
where
    S: Copy + Into<Evaluator>,
{
    pub fn weight(&self) -> u64 {
        self.weight
    }
    pub fn resolved(&self) -> bool {
        self.value.is_some()
    }
    pub fn value(&self) -> Option<&Evaluation> {
        self.value.as_ref()
    }

    /// perform one unit of work on this edge: materialize the subtree
    /// on first touch, otherwise push its evaluation one step forward.
    /// a subtree that reports itself finished surrenders its value.
    pub fn advance(&mut self, cache: &mut Option<&mut EvaluationCache>, reclaim: bool) -> bool {
        match self.spawn.as_mut() {
            None => {
                let mut spawn: Evaluator = self.state.into();
                spawn.set_reclaim(reclaim);
                self.spawn = Some(Box::new(spawn));
                true
            }
            Some(spawn) => {
                if spawn.process_one(cache.as_deref_mut()) {
                    true
                } else {
                    self.value = Some(spawn.compile_evaluation());
                    if reclaim {
                        self.spawn = None;
                    }
                    false
                }
            }
        }
    }

    /// best current estimate of this edge's value: the settled answer
    /// if resolved, otherwise the subtree's partial compilation, or
    /// nothing at all before first touch
    pub fn partial(&self) -> Option<Evaluation> {
        match (&self.value, &self.spawn) {
            (Some(value), _) => Some(value.clone()),
            (None, Some(spawn)) => Some(spawn.compile_partial_evaluation()),
            (None, None) => None,
        }
    }

    /// fraction of this edge's work completed, in [0, 1]
    pub fn progress(&self) -> Probability {
        match (&self.value, &self.spawn) {
            (Some(_), _) => 1.0,
            (None, Some(spawn)) => spawn.progress(),
            (None, None) => 0.0,
        }
    }
}
