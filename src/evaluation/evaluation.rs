use super::results::Results;
use crate::Probability;
use crate::Total;
use crate::Utility;
use std::collections::BTreeSet;

/// the solved value of a position: for every achievable final total X,
/// P(total == X), P(total >= X), and E[total | total >= X], plus the
/// unconditional expectation. the three views share one key space.
///
/// invariants: `minimum` is non-increasing in X, and `conditional(X)`
/// is at least X wherever mass exists.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Evaluation {
    exact: Results,
    minimum: Results,
    conditional: Results,
    expectation: Utility,
}

impl Evaluation {
    pub fn empty() -> Self {
        Self::default()
    }
    /// P(final total == X)
    pub fn exact(&self) -> &Results {
        &self.exact
    }
    /// P(final total >= X)
    pub fn minimum(&self) -> &Results {
        &self.minimum
    }
    /// E[final total | final total >= X]
    pub fn conditional(&self) -> &Results {
        &self.conditional
    }
    pub fn expectation(&self) -> Utility {
        self.expectation
    }

    /// stopping at the current total is always available, so landing
    /// exactly on it is certain when chosen.
    pub fn anchor(&mut self, total: Total) {
        self.exact.set(total, 1.0);
    }

    /// combination under choice: the player picks the best branch, so
    /// every view is the pointwise maximum across options, and the
    /// stop outcome at the current achievable total is anchored.
    pub fn combine_options<'a, I>(total: Total, options: I) -> Self
    where
        I: IntoIterator<Item = &'a Evaluation>,
    {
        let mut combined = Self::empty();
        for option in options {
            combined.exact.maximize(&option.exact);
            combined.minimum.maximize(&option.minimum);
            combined.conditional.maximize(&option.conditional);
            combined.expectation = combined.expectation.max(option.expectation);
        }
        combined.anchor(total);
        combined
    }

    /// combination under chance: nature rolls the dice, so the mass
    /// views and the scalar mix linearly by relative multiplicity.
    /// the conditional view additionally weights each branch by its
    /// reach P(>= X); branches that cannot reach X carry no opinion
    /// about E[total | total >= X], and folding them in at zero would
    /// break the conditional(X) >= X invariant.
    pub fn combine_probabilities<'a, I>(branches: I) -> Self
    where
        I: IntoIterator<Item = (u64, &'a Evaluation)>,
    {
        let branches = branches.into_iter().collect::<Vec<_>>();
        let weight = branches.iter().map(|(w, _)| w).sum::<u64>();
        let mut combined = Self::empty();
        if weight == 0 {
            return combined;
        }
        for (w, branch) in &branches {
            let ratio = *w as Probability / weight as Probability;
            combined.exact.absorb(&branch.exact, ratio);
            combined.minimum.absorb(&branch.minimum, ratio);
            combined.expectation += ratio * branch.expectation;
        }
        let totals = branches
            .iter()
            .flat_map(|(_, branch)| branch.conditional.totals())
            .collect::<BTreeSet<_>>();
        for total in totals {
            let reach = branches
                .iter()
                .map(|(w, branch)| *w as Probability * branch.minimum.mass(total))
                .sum::<Probability>();
            let value = branches
                .iter()
                .map(|(w, branch)| {
                    *w as Probability * branch.minimum.mass(total) * branch.conditional.mass(total)
                })
                .sum::<Utility>();
            if reach > 0.0 {
                combined.conditional.set(total, value / reach);
            }
        }
        combined
    }
}

/// the certain outcome: the turn ends exactly at this total
impl From<Total> for Evaluation {
    fn from(total: Total) -> Self {
        let mut exact = Results::empty();
        let mut minimum = Results::empty();
        let mut conditional = Results::empty();
        exact.set(total, 1.0);
        for t in 1..=total {
            minimum.set(t, 1.0);
            conditional.set(t, total as Utility);
        }
        Self {
            exact,
            minimum,
            conditional,
            expectation: total as Utility,
        }
    }
}

/// reconstruction from the two wire views. the wire carries only the
/// minimum and exact maps; the conditional view and the scalar are
/// re-derived from the exact view.
impl From<(Results, Results)> for Evaluation {
    fn from((minimum, exact): (Results, Results)) -> Self {
        let mass = exact.support().map(|(_, m)| m).sum::<Probability>();
        let mean = exact.support().map(|(t, m)| t as Utility * m).sum::<Utility>();
        let mut conditional = Results::empty();
        // the "at least" views start at 1; total 0 is always reached
        for total in minimum
            .totals()
            .chain(exact.totals())
            .filter(|&t| t > 0)
            .collect::<BTreeSet<_>>()
        {
            let above = exact.support().filter(move |(t, _)| *t >= total);
            let den = above.clone().map(|(_, m)| m).sum::<Probability>();
            let num = above.map(|(t, m)| t as Utility * m).sum::<Utility>();
            if den > 0.0 {
                conditional.set(total, num / den);
            }
        }
        Self {
            exact,
            minimum,
            conditional,
            expectation: if mass > 0.0 { mean / mass } else { 0.0 },
        }
    }
}
