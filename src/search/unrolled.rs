use super::child::Child;
use super::state::Canonical;
use super::state::RolledState;
use super::state::UnrolledState;
use crate::Probability;
use crate::evaluation::cache::EvaluationCache;
use crate::evaluation::evaluation::Evaluation;

/// resumable solver for a chance node. children are the distinct
/// throws of the remaining dice; their values mix linearly by
/// multinomial multiplicity. the tree below is grown one unit of work
/// per call, never recursively in one shot.
#[derive(Debug)]
pub struct UnrolledStateEvaluator {
    state: UnrolledState,
    children: Option<Vec<Child<RolledState>>>,
    evaluation: Option<Evaluation>,
    reclaim: bool,
}

impl From<UnrolledState> for UnrolledStateEvaluator {
    fn from(state: UnrolledState) -> Self {
        Self {
            state,
            children: None,
            evaluation: None,
            reclaim: false,
        }
    }
}

impl UnrolledStateEvaluator {
    pub fn state(&self) -> UnrolledState {
        self.state
    }
    pub fn finished(&self) -> bool {
        self.evaluation.is_some()
    }
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }
    /// drop child subtrees once their values are harvested
    pub fn set_reclaim(&mut self, reclaim: bool) {
        self.reclaim = reclaim;
    }

    /// one unit of work. returns whether work remains. the first call
    /// consults the cache under this state's canonical key; a hit
    /// finishes immediately without touching the tree.
    pub fn process_one(&mut self, mut cache: Option<&mut EvaluationCache>) -> bool {
        if self.finished() {
            return false;
        }
        match self.children.as_mut() {
            None => {
                if let Some(cache) = cache.as_deref_mut() {
                    if let Some(hit) = cache.get(&self.state.key()) {
                        self.evaluation = Some(hit.clone());
                        return false;
                    }
                }
                if self.state.terminal() {
                    self.resolve(Evaluation::from(self.state.total()), cache);
                    false
                } else {
                    self.children =
                        Some(self.state.successors().into_iter().map(Child::from).collect());
                    true
                }
            }
            Some(children) => match children.iter_mut().find(|child| !child.resolved()) {
                Some(child) => {
                    child.advance(&mut cache, self.reclaim);
                    true
                }
                None => {
                    let evaluation = Evaluation::combine_probabilities(
                        children
                            .iter()
                            .map(|child| (child.weight(), child.value().expect("child resolved"))),
                    );
                    self.resolve(evaluation, cache);
                    false
                }
            },
        }
    }

    pub fn process_all(&mut self, mut cache: Option<&mut EvaluationCache>) {
        while self.process_one(cache.as_deref_mut()) {}
    }

    /// strict compilation. calling this before the tree is finished is
    /// a programming error.
    pub fn compile_evaluation(&self) -> Evaluation {
        self.evaluation
            .clone()
            .expect("compiling an unfinished evaluation")
    }

    /// best-effort value from whatever has resolved so far. stopping
    /// at the current total is always available, so its exact mass is
    /// anchored even while the tree is mid-flight.
    pub fn compile_partial_evaluation(&self) -> Evaluation {
        if let Some(evaluation) = &self.evaluation {
            return evaluation.clone();
        }
        let partials = self
            .children
            .iter()
            .flatten()
            .filter_map(|child| child.partial().map(|partial| (child.weight(), partial)))
            .collect::<Vec<_>>();
        let mut evaluation =
            Evaluation::combine_probabilities(partials.iter().map(|(w, p)| (*w, p)));
        evaluation.anchor(self.state.total());
        evaluation
    }

    /// fraction of the tree solved, in [0, 1]; exactly 1 iff finished.
    /// the final combination step counts as one extra unit.
    pub fn progress(&self) -> Probability {
        if self.finished() {
            return 1.0;
        }
        match &self.children {
            None => 0.0,
            Some(children) => {
                children.iter().map(Child::progress).sum::<Probability>()
                    / (children.len() + 1) as Probability
            }
        }
    }

    fn resolve(&mut self, evaluation: Evaluation, cache: Option<&mut EvaluationCache>) {
        if let Some(cache) = cache {
            cache.set(self.state.key(), evaluation.clone());
        }
        self.evaluation = Some(evaluation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::chest::Chest;
    use crate::dice::face::Face;

    fn solve(state: UnrolledState) -> Evaluation {
        let mut evaluator = UnrolledStateEvaluator::from(state);
        evaluator.process_all(None);
        evaluator.compile_evaluation()
    }

    #[test]
    fn wormless_terminal_is_worth_nothing() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Two, 2), 0));
        let evaluation = solve(state);
        assert_eq!(evaluation.exact().mass(0), 1.0);
        assert_eq!(evaluation.expectation(), 0.0);
    }

    #[test]
    fn worm_terminal_is_worth_its_pips() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 1), 0));
        let evaluation = solve(state);
        assert_eq!(evaluation.exact().mass(5), 1.0);
        for t in 1..=5 {
            assert_eq!(evaluation.minimum().mass(t), 1.0);
        }
        assert_eq!(evaluation.expectation(), 5.0);
    }

    #[test]
    fn single_die_without_a_worm_scores_nothing() {
        let evaluation = solve(UnrolledState::from((Chest::empty(), 1)));
        assert_eq!(evaluation.exact().mass(0), 1.0);
        assert!((evaluation.exact().mass(5) - 1.0 / 6.0).abs() < 1e-12);
        assert!((evaluation.expectation() - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn worm_and_one_die() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 1), 1));
        let evaluation = solve(state);
        // five live faces extend the total, a second Worm ends at 5
        assert_eq!(evaluation.exact().mass(5), 1.0);
        assert!((evaluation.expectation() - 7.5).abs() < 1e-12);
        assert_eq!(evaluation.minimum().mass(1), 1.0);
        for (t, reach) in [(6, 5.0), (7, 4.0), (8, 3.0), (9, 2.0), (10, 1.0)] {
            assert!((evaluation.minimum().mass(t) - reach / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn progress_is_monotone_and_terminal() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 6), 2));
        let mut evaluator = UnrolledStateEvaluator::from(state);
        let mut last = evaluator.progress();
        assert_eq!(last, 0.0);
        while evaluator.process_one(None) {
            let progress = evaluator.progress();
            assert!(progress >= last);
            assert!(progress < 1.0);
            last = progress;
        }
        assert!(evaluator.finished());
        assert_eq!(evaluator.progress(), 1.0);
    }

    #[test]
    fn partial_compilations_never_fail() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 6), 2));
        let mut evaluator = UnrolledStateEvaluator::from(state);
        loop {
            let partial = evaluator.compile_partial_evaluation();
            assert_eq!(partial.exact().mass(state.total()), 1.0);
            if !evaluator.process_one(None) {
                break;
            }
        }
        assert_eq!(
            evaluator.compile_partial_evaluation(),
            evaluator.compile_evaluation()
        );
    }

    #[test]
    fn resolutions_land_in_the_cache() {
        let mut cache = EvaluationCache::new();
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 7), 1));
        let mut evaluator = UnrolledStateEvaluator::from(state);
        evaluator.process_all(Some(&mut cache));
        assert_eq!(
            cache.get(&state.key()),
            Some(&evaluator.compile_evaluation())
        );
    }

    #[test]
    fn sampling_agrees_with_the_exact_expectation() {
        use crate::Arbitrary;
        // with {W} banked and one die in hand every face is forced:
        // bank anything bankable, stop. the policy-free average must
        // match the solved expectation.
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 1), 1));
        let expectation = solve(state).expectation();
        let n = 20_000;
        let mean = (0..n)
            .map(|_| match Face::random() {
                Face::Worm => 5.0,
                face => 5.0 + face.value() as f64,
            })
            .sum::<f64>()
            / n as f64;
        assert!((mean - expectation).abs() < 0.2);
    }
}
