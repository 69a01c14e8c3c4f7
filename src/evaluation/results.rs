use crate::Probability;
use crate::Total;
use std::collections::BTreeMap;

/// sparse mapping from final total to a nonnegative weight. absent
/// totals carry zero. context decides whether entries are probability
/// mass or conditional expectations; the operations below are the
/// same either way.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Results(BTreeMap<Total, Probability>);

impl Results {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn mass(&self, total: Total) -> Probability {
        self.0.get(&total).copied().unwrap_or_default()
    }
    pub fn set(&mut self, total: Total, mass: Probability) {
        self.0.insert(total, mass);
    }
    /// merge-by-addition of a single entry
    pub fn add(&mut self, total: Total, mass: Probability) {
        *self.0.entry(total).or_default() += mass;
    }
    /// merge another map scaled by a branch ratio
    pub fn absorb(&mut self, other: &Results, ratio: Probability) {
        for (total, mass) in other.support() {
            self.add(total, mass * ratio);
        }
    }
    /// pointwise maximum against another map
    pub fn maximize(&mut self, other: &Results) {
        for (total, mass) in other.support() {
            let best = self.mass(total).max(mass);
            self.set(total, best);
        }
    }
    /// entries ascending by total
    pub fn support(&self) -> impl Iterator<Item = (Total, Probability)> + Clone + '_ {
        self.0.iter().map(|(&total, &mass)| (total, mass))
    }
    pub fn totals(&self) -> impl Iterator<Item = Total> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(Total, Probability)> for Results {
    fn from_iter<I: IntoIterator<Item = (Total, Probability)>>(entries: I) -> Self {
        let mut results = Self::empty();
        for (total, mass) in entries {
            results.add(total, mass);
        }
        results
    }
}

impl std::fmt::Display for Results {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (total, mass) in self.support() {
            write!(f, "{}:{:.3} ", total, mass)?;
        }
        Ok(())
    }
}
