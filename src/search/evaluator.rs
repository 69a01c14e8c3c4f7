use super::rolled::RolledStateEvaluator;
use super::state::RolledState;
use super::state::UnrolledState;
use super::unrolled::UnrolledStateEvaluator;
use crate::Probability;
use crate::evaluation::cache::EvaluationCache;
use crate::evaluation::evaluation::Evaluation;

/// either phase of the alternating search tree. children of one phase
/// are always evaluators of the other, so the tree is built from this
/// sum type rather than from either evaluator directly.
#[derive(Debug)]
pub enum Evaluator {
    Unrolled(UnrolledStateEvaluator),
    Rolled(RolledStateEvaluator),
}

impl From<UnrolledState> for Evaluator {
    fn from(state: UnrolledState) -> Self {
        Self::Unrolled(UnrolledStateEvaluator::from(state))
    }
}

impl From<RolledState> for Evaluator {
    fn from(state: RolledState) -> Self {
        Self::Rolled(RolledStateEvaluator::from(state))
    }
}

impl Evaluator {
    pub fn set_reclaim(&mut self, reclaim: bool) {
        match self {
            Self::Unrolled(evaluator) => evaluator.set_reclaim(reclaim),
            Self::Rolled(evaluator) => evaluator.set_reclaim(reclaim),
        }
    }
    pub fn finished(&self) -> bool {
        match self {
            Self::Unrolled(evaluator) => evaluator.finished(),
            Self::Rolled(evaluator) => evaluator.finished(),
        }
    }
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Self::Unrolled(evaluator) => evaluator.evaluation(),
            Self::Rolled(evaluator) => evaluator.evaluation(),
        }
    }
    pub fn process_one(&mut self, cache: Option<&mut EvaluationCache>) -> bool {
        match self {
            Self::Unrolled(evaluator) => evaluator.process_one(cache),
            Self::Rolled(evaluator) => evaluator.process_one(cache),
        }
    }
    pub fn process_all(&mut self, cache: Option<&mut EvaluationCache>) {
        match self {
            Self::Unrolled(evaluator) => evaluator.process_all(cache),
            Self::Rolled(evaluator) => evaluator.process_all(cache),
        }
    }
    pub fn compile_evaluation(&self) -> Evaluation {
        match self {
            Self::Unrolled(evaluator) => evaluator.compile_evaluation(),
            Self::Rolled(evaluator) => evaluator.compile_evaluation(),
        }
    }
    pub fn compile_partial_evaluation(&self) -> Evaluation {
        match self {
            Self::Unrolled(evaluator) => evaluator.compile_partial_evaluation(),
            Self::Rolled(evaluator) => evaluator.compile_partial_evaluation(),
        }
    }
    pub fn progress(&self) -> Probability {
        match self {
            Self::Unrolled(evaluator) => evaluator.progress(),
            Self::Rolled(evaluator) => evaluator.progress(),
        }
    }
}
