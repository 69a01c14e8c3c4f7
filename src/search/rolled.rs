use super::child::Child;
use super::state::Canonical;
use super::state::RolledState;
use super::state::UnrolledState;
use crate::Probability;
use crate::evaluation::cache::EvaluationCache;
use crate::evaluation::evaluation::Evaluation;

/// resumable solver for a choice node. children are the bankable
/// faces of the roll; rational play takes the pointwise best of them,
/// with stopping at the current total always on the table.
#[derive(Debug)]
pub struct RolledStateEvaluator {
    state: RolledState,
    children: Option<Vec<Child<UnrolledState>>>,
    evaluation: Option<Evaluation>,
    reclaim: bool,
}

impl From<RolledState> for RolledStateEvaluator {
    fn from(state: RolledState) -> Self {
        Self {
            state,
            children: None,
            evaluation: None,
            reclaim: false,
        }
    }
}

impl RolledStateEvaluator {
    pub fn state(&self) -> RolledState {
        self.state
    }
    pub fn finished(&self) -> bool {
        self.evaluation.is_some()
    }
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }
    pub fn set_reclaim(&mut self, reclaim: bool) {
        self.reclaim = reclaim;
    }

    /// one unit of work. returns whether work remains. a roll offering
    /// nothing bankable ends the turn at the chest's standing total.
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
                    self.children = Some(
                        self.state
                            .successors()
                            .into_iter()
                            .map(|successor| Child::from((successor, 1)))
                            .collect(),
                    );
                    true
                }
            }
            Some(children) => match children.iter_mut().find(|child| !child.resolved()) {
                Some(child) => {
                    child.advance(&mut cache, self.reclaim);
                    true
                }
                None => {
                    let evaluation = Evaluation::combine_options(
                        self.state.total(),
                        children
                            .iter()
                            .map(|child| child.value().expect("child resolved")),
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

    /// best-effort value over the options explored so far. the
    /// combination anchors the standing total itself.
    pub fn compile_partial_evaluation(&self) -> Evaluation {
        if let Some(evaluation) = &self.evaluation {
            return evaluation.clone();
        }
        let partials = self
            .children
            .iter()
            .flatten()
            .filter_map(Child::partial)
            .collect::<Vec<_>>();
        Evaluation::combine_options(self.state.total(), partials.iter())
    }

    /// fraction of the tree solved, in [0, 1]; exactly 1 iff finished
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
    use crate::dice::multiset::DiceMultiset;

    fn solve(state: RolledState) -> Evaluation {
        let mut evaluator = RolledStateEvaluator::from(state);
        evaluator.process_all(None);
        evaluator.compile_evaluation()
    }

    #[test]
    fn dead_rolls_end_at_the_standing_total() {
        let chest = Chest::empty().bank(Face::Worm, 1).bank(Face::Two, 1);
        let roll = DiceMultiset::from_iter([Face::Two, Face::Worm]);
        let evaluation = solve(RolledState::from((UnrolledState::from((chest, 2)), roll)));
        assert_eq!(evaluation.exact().mass(7), 1.0);
        assert_eq!(evaluation.expectation(), 7.0);
    }

    #[test]
    fn forced_banking_cashes_the_roll() {
        // {W} banked, roll is a lone Three: bank it and stop at 8
        let chest = Chest::empty().bank(Face::Worm, 1);
        let roll = DiceMultiset::from_iter([Face::Three]);
        let evaluation = solve(RolledState::from((UnrolledState::from((chest, 1)), roll)));
        assert_eq!(evaluation.exact().mass(8), 1.0);
        assert_eq!(evaluation.expectation(), 8.0);
    }

    #[test]
    fn choice_takes_the_better_face() {
        // six Worms banked, roll {1, 5}. banking the 5 leads to one
        // last die worth (36+37+38+39+35+35)/6; banking the 1 only
        // (33+34+35+36+31+31)/6. rational play takes the 5.
        let chest = Chest::empty().bank(Face::Worm, 6);
        let roll = DiceMultiset::from_iter([Face::One, Face::Five]);
        let evaluation = solve(RolledState::from((UnrolledState::from((chest, 2)), roll)));
        assert!((evaluation.expectation() - 220.0 / 6.0).abs() < 1e-12);
        assert_eq!(evaluation.exact().mass(35), 1.0);
    }

    #[test]
    fn anchors_the_standing_total() {
        let chest = Chest::empty().bank(Face::Worm, 6);
        let roll = DiceMultiset::from_iter([Face::One, Face::Five]);
        let evaluation = solve(RolledState::from((UnrolledState::from((chest, 2)), roll)));
        assert_eq!(evaluation.exact().mass(30), 1.0);
    }

    #[test]
    fn progress_counts_each_option() {
        let chest = Chest::empty().bank(Face::Worm, 6);
        let roll = DiceMultiset::from_iter([Face::One, Face::Five]);
        let state = RolledState::from((UnrolledState::from((chest, 2)), roll));
        let mut evaluator = RolledStateEvaluator::from(state);
        let mut last = evaluator.progress();
        while evaluator.process_one(None) {
            let progress = evaluator.progress();
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(evaluator.progress(), 1.0);
    }
}
