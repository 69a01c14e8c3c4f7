use super::face::Face;
use super::multiset::DiceMultiset;
use std::collections::BTreeMap;

/// RollIterator walks every ordered throw of n dice exactly once, as a
/// base-6 odometer over face codes. there are 6^n sequences; grouping
/// them by canonical multiset is what produces the multinomial
/// multiplicities. this is deliberately the exhaustive enumeration:
/// the tree stays small through state canonicalization in the search
/// layer, not here.
pub struct RollIterator {
    next: u32,
    over: u32,
    dice: usize,
}

impl From<usize> for RollIterator {
    fn from(dice: usize) -> Self {
        assert!(dice <= crate::N_DICE, "roll of {} dice exceeds the pool", dice);
        Self {
            next: 0,
            over: (crate::N_FACES as u32).pow(dice as u32),
            dice,
        }
    }
}

impl Iterator for RollIterator {
    type Item = DiceMultiset;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.over {
            None
        } else {
            let mut code = self.next;
            self.next += 1;
            Some(
                (0..self.dice)
                    .map(|_| {
                        let face = Face::from((code % crate::N_FACES as u32) as u8);
                        code /= crate::N_FACES as u32;
                        face
                    })
                    .collect(),
            )
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.over - self.next) as usize;
        (n, Some(n))
    }
}

impl DiceMultiset {
    /// every distinct outcome of throwing n dice, paired with the
    /// number of ordered sequences producing it, i.e. the multinomial
    /// coefficient n! / prod(counts!). multiplicities sum to 6^n.
    pub fn outcomes(dice: usize) -> Vec<(Self, u64)> {
        let mut groups = BTreeMap::new();
        for roll in RollIterator::from(dice) {
            *groups.entry(roll).or_insert(0u64) += 1;
        }
        groups.into_iter().collect()
    }
}
