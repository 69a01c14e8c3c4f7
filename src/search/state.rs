use crate::Total;
use crate::dice::chest::Chest;
use crate::dice::face::Face;
use crate::dice::multiset::DiceMultiset;

/// states that collapse to a canonical cache key. two positions with
/// the same key have identical futures, so evaluations transfer
/// between them freely.
pub trait Canonical {
    fn key(&self) -> String;
}

/// a position between rolls: some dice banked, some still in hand,
/// about to be thrown. this is the phase where chance acts.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct UnrolledState {
    chest: Chest,
    remaining: usize,
}

impl UnrolledState {
    /// the start of a turn: nothing banked, the full pool in hand
    pub fn root() -> Self {
        Self {
            chest: Chest::empty(),
            remaining: crate::N_DICE,
        }
    }
    pub fn chest(&self) -> Chest {
        self.chest
    }
    pub fn remaining(&self) -> usize {
        self.remaining
    }
    /// no dice left to throw; the turn is over
    pub fn terminal(&self) -> bool {
        self.remaining == 0
    }
    /// the total this position is worth if the turn ended here
    pub fn total(&self) -> Total {
        self.chest.total()
    }
    /// every distinct throw of the remaining dice with its multinomial
    /// multiplicity
    pub fn successors(&self) -> Vec<(RolledState, u64)> {
        DiceMultiset::outcomes(self.remaining)
            .into_iter()
            .map(|(roll, weight)| (RolledState::from((*self, roll)), weight))
            .collect()
    }
}

impl From<(Chest, usize)> for UnrolledState {
    fn from((chest, remaining): (Chest, usize)) -> Self {
        assert!(
            chest.size() + remaining <= crate::N_DICE,
            "{} banked + {} in hand exceeds the pool",
            chest.size(),
            remaining
        );
        Self { chest, remaining }
    }
}

/// "{score}|{faceSet}|{remaining}". the raw pip score, not the gated
/// total, so positions whose futures differ never share a key. the
/// middle fragment is the set of banked faces, not per-face counts:
/// chests differing only in how often a face repeats play out
/// identically once score and remaining count agree.
impl Canonical for UnrolledState {
    fn key(&self) -> String {
        let faces = self
            .chest
            .dice()
            .faces()
            .map(|face| face.to_string())
            .collect::<String>();
        format!(
            "{}|{}|{}",
            self.chest.score(),
            if faces.is_empty() { "-" } else { faces.as_str() },
            self.remaining
        )
    }
}

impl std::fmt::Display for UnrolledState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} +{}d", self.chest, self.remaining)
    }
}

impl crate::Arbitrary for UnrolledState {
    fn random() -> Self {
        use crate::Arbitrary;
        use rand::Rng;
        let chest = Chest::random();
        let room = crate::N_DICE - chest.size();
        Self {
            chest,
            remaining: rand::rng().random_range(0..=room),
        }
    }
}

/// a position just after the throw: the player must pick a face not
/// yet banked and take every die showing it, or bust. this is the
/// phase where choice acts.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct RolledState {
    unrolled: UnrolledState,
    roll: DiceMultiset,
}

impl RolledState {
    pub fn unrolled(&self) -> UnrolledState {
        self.unrolled
    }
    pub fn roll(&self) -> DiceMultiset {
        self.roll
    }
    /// faces the player may legally bank from this roll
    pub fn options(&self) -> Vec<Face> {
        self.roll
            .faces()
            .filter(|face| !self.unrolled.chest.has(*face))
            .collect()
    }
    /// every rolled face is already banked; the turn busts
    pub fn terminal(&self) -> bool {
        self.options().is_empty()
    }
    /// the total this position is worth if the turn ended here
    pub fn total(&self) -> Total {
        self.unrolled.total()
    }
    /// commit every rolled die of the chosen face
    pub fn bank(&self, face: Face) -> UnrolledState {
        let n = self.roll.count(face);
        UnrolledState {
            chest: self.unrolled.chest.bank(face, n),
            remaining: self.unrolled.remaining - n,
        }
    }
    pub fn successors(&self) -> Vec<UnrolledState> {
        self.options()
            .into_iter()
            .map(|face| self.bank(face))
            .collect()
    }
}

impl From<(UnrolledState, DiceMultiset)> for RolledState {
    fn from((unrolled, roll): (UnrolledState, DiceMultiset)) -> Self {
        assert!(
            roll.size() == unrolled.remaining,
            "rolled {} dice but {} were in hand",
            roll.size(),
            unrolled.remaining
        );
        Self { unrolled, roll }
    }
}

/// the parent key extended with the canonical roll, "…|{roll}"
impl Canonical for RolledState {
    fn key(&self) -> String {
        format!("{}|{}", self.unrolled.key(), self.roll)
    }
}

impl std::fmt::Display for RolledState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ~{}", self.unrolled, self.roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_shape() {
        let root = UnrolledState::root();
        assert_eq!(root.remaining(), crate::N_DICE);
        assert_eq!(root.total(), 0);
        assert!(!root.terminal());
        assert_eq!(root.key(), "0|-|8");
    }

    #[test]
    fn keys_ignore_banking_order() {
        let a = Chest::empty().bank(Face::Worm, 1).bank(Face::Five, 2);
        let b = Chest::empty().bank(Face::Five, 2).bank(Face::Worm, 1);
        let a = UnrolledState::from((a, 2));
        let b = UnrolledState::from((b, 2));
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key(), "15|5W|2");
    }

    #[test]
    fn keys_collapse_equal_score_and_face_set() {
        // {5,5,W} and {5,W,W} score 15 from the same face set
        let a = Chest::empty().bank(Face::Five, 2).bank(Face::Worm, 1);
        let b = Chest::empty().bank(Face::Five, 1).bank(Face::Worm, 2);
        assert_eq!(
            UnrolledState::from((a, 2)).key(),
            UnrolledState::from((b, 2)).key(),
        );
    }

    #[test]
    fn keys_separate_wormless_twins() {
        // equal raw score but only one chest can still cash it in
        let with = Chest::empty().bank(Face::Worm, 1);
        let without = Chest::empty().bank(Face::Five, 1);
        let with = UnrolledState::from((with, 3));
        let without = UnrolledState::from((without, 3));
        assert_ne!(with.key(), without.key());
    }

    #[test]
    fn successors_cover_all_throws() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 6), 2));
        let successors = state.successors();
        assert_eq!(successors.len(), 21);
        assert_eq!(successors.iter().map(|(_, w)| w).sum::<u64>(), 36);
    }

    #[test]
    fn options_exclude_banked_faces() {
        let chest = Chest::empty().bank(Face::Two, 1).bank(Face::Worm, 1);
        let roll = DiceMultiset::from_iter([Face::Two, Face::Three, Face::Worm]);
        let rolled = RolledState::from((UnrolledState::from((chest, 3)), roll));
        assert_eq!(rolled.options(), vec![Face::Three]);
        assert!(!rolled.terminal());
    }

    #[test]
    fn dead_rolls_keep_the_chest_total() {
        let chest = Chest::empty().bank(Face::Two, 1).bank(Face::Worm, 1);
        let roll = DiceMultiset::from_iter([Face::Two, Face::Worm, Face::Worm]);
        let rolled = RolledState::from((UnrolledState::from((chest, 3)), roll));
        assert!(rolled.terminal());
        assert_eq!(rolled.total(), 7);
    }

    #[test]
    fn banking_takes_every_die_of_the_face() {
        let roll = DiceMultiset::from_iter([Face::Four, Face::Four, Face::One]);
        let rolled = RolledState::from((UnrolledState::from((Chest::empty(), 3)), roll));
        let banked = rolled.bank(Face::Four);
        assert_eq!(banked.chest().size(), 2);
        assert_eq!(banked.remaining(), 1);
        assert_eq!(banked.chest().score(), 8);
    }

    #[test]
    fn rolled_keys_extend_parent_keys() {
        let state = UnrolledState::from((Chest::empty().bank(Face::Worm, 1), 2));
        let roll = DiceMultiset::from_iter([Face::One, Face::Five]);
        let rolled = RolledState::from((state, roll));
        assert_eq!(rolled.key(), "5|W|2|15");
    }

    #[test]
    #[should_panic]
    fn overfull_states_are_fatal() {
        UnrolledState::from((Chest::empty().bank(Face::One, 4), 5));
    }
}
