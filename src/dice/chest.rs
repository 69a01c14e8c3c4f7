use super::face::Face;
use super::multiset::DiceMultiset;
use crate::Total;

/// the dice a player has committed to keep this turn. each face may be
/// banked at most once per turn; one banking takes every rolled die of
/// that face, so per-face counts can exceed one. a chest holding no
/// Worm scores nothing no matter how many pips it carries.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Chest {
    dice: DiceMultiset,
    worm: bool,
}

impl Chest {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn dice(&self) -> DiceMultiset {
        self.dice
    }
    pub fn has(&self, face: Face) -> bool {
        self.dice.contains(face)
    }
    pub fn worm(&self) -> bool {
        self.worm
    }
    pub fn size(&self) -> usize {
        self.dice.size()
    }
    /// raw pip sum of the banked dice
    pub fn score(&self) -> Total {
        self.dice.score()
    }
    /// scoring total: a chest without a Worm is worth nothing
    pub fn total(&self) -> Total {
        if self.worm { self.score() } else { 0 }
    }
    /// commit n rolled dice of one face. banking a face twice in one
    /// turn is illegal and a hard error.
    pub fn bank(self, face: Face, n: usize) -> Self {
        assert!(!self.has(face), "face already banked: {}", face);
        assert!(n > 0, "banking zero dice of face {}", face);
        Self {
            dice: self.dice.add(face, n),
            worm: self.worm || face == Face::Worm,
        }
    }
}

impl std::fmt::Display for Chest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}]", self.dice)
    }
}

impl crate::Arbitrary for Chest {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let mut chest = Chest::empty();
        let mut room = crate::N_DICE;
        for face in Face::ALL {
            if room > 0 && rng.random_bool(0.4) {
                let n = rng.random_range(1..=room.min(3));
                chest = chest.bank(face, n);
                room -= n;
            }
        }
        chest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scores_nothing() {
        assert_eq!(Chest::empty().score(), 0);
        assert_eq!(Chest::empty().total(), 0);
        assert!(!Chest::empty().worm());
    }

    #[test]
    fn wormless_total_is_zero() {
        let chest = Chest::empty().bank(Face::Four, 2).bank(Face::Five, 1);
        assert_eq!(chest.score(), 13);
        assert_eq!(chest.total(), 0);
    }

    #[test]
    fn worm_activates_total() {
        let chest = Chest::empty().bank(Face::Four, 2).bank(Face::Worm, 1);
        assert!(chest.worm());
        assert_eq!(chest.total(), 13);
    }

    #[test]
    fn banking_accumulates() {
        let chest = Chest::empty().bank(Face::Two, 3);
        assert_eq!(chest.size(), 3);
        assert!(chest.has(Face::Two));
        assert!(!chest.has(Face::Worm));
    }

    #[test]
    #[should_panic]
    fn rebanking_a_face_is_fatal() {
        Chest::empty().bank(Face::Two, 1).bank(Face::Two, 2);
    }

    #[test]
    #[should_panic]
    fn banking_nothing_is_fatal() {
        Chest::empty().bank(Face::Two, 0);
    }
}
