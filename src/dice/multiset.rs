use super::face::Face;
use crate::Total;

/// an unordered pile of dice stored as counts per face. identity,
/// ordering, and hashing derive from the counts, so two piles compare
/// equal regardless of the order the dice were thrown in. immutable:
/// every mutator returns a new pile.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct DiceMultiset([u8; crate::N_FACES]);

impl DiceMultiset {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn size(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }
    pub fn count(&self, face: Face) -> usize {
        self.0[u8::from(face) as usize] as usize
    }
    pub fn contains(&self, face: Face) -> bool {
        self.count(face) > 0
    }
    /// sum of pip values across all dice
    pub fn score(&self) -> Total {
        Face::ALL
            .iter()
            .map(|face| face.value() * self.count(*face) as Total)
            .sum()
    }
    pub fn add(mut self, face: Face, n: usize) -> Self {
        let slot = &mut self.0[u8::from(face) as usize];
        let count = *slot as usize + n;
        *slot = u8::try_from(count).expect("face count overflows its counter");
        self
    }
    /// distinct faces present, ascending by value
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        Face::ALL.into_iter().filter(|face| self.contains(*face))
    }
    /// every individual die, ascending by value, for display
    pub fn dice(&self) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .flat_map(|face| std::iter::repeat_n(face, self.count(face)))
            .collect()
    }
}

impl FromIterator<Face> for DiceMultiset {
    fn from_iter<I: IntoIterator<Item = Face>>(faces: I) -> Self {
        faces
            .into_iter()
            .fold(Self::empty(), |pile, face| pile.add(face, 1))
    }
}

/// canonical ordering-independent form, e.g. "1145W". doubles as the
/// multiset fragment of state cache keys.
impl std::fmt::Display for DiceMultiset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.size() == 0 {
            write!(f, "-")
        } else {
            self.dice().iter().try_for_each(|face| write!(f, "{}", face))
        }
    }
}

impl crate::Arbitrary for DiceMultiset {
    fn random() -> Self {
        use crate::Arbitrary;
        use rand::Rng;
        let n = rand::rng().random_range(0..=crate::N_DICE);
        (0..n).map(|_| Face::random()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let pile = DiceMultiset::empty().add(Face::Two, 3).add(Face::Worm, 1);
        assert_eq!(pile.size(), 4);
        assert_eq!(pile.count(Face::Two), 3);
        assert_eq!(pile.count(Face::Five), 0);
        assert!(pile.contains(Face::Worm));
    }

    #[test]
    fn scores() {
        let pile = DiceMultiset::empty().add(Face::Two, 3).add(Face::Worm, 2);
        assert_eq!(pile.score(), 2 * 3 + 5 * 2);
    }

    #[test]
    fn order_independent() {
        let a = DiceMultiset::from_iter([Face::Worm, Face::One, Face::Four]);
        let b = DiceMultiset::from_iter([Face::Four, Face::Worm, Face::One]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn displays_ascending() {
        let pile = DiceMultiset::from_iter([Face::Worm, Face::One, Face::One, Face::Four]);
        assert_eq!(pile.to_string(), "114W");
        assert_eq!(DiceMultiset::empty().to_string(), "-");
    }

    #[test]
    #[should_panic]
    fn overflowing_counts_are_fatal() {
        DiceMultiset::empty().add(Face::Worm, 256);
    }

    #[test]
    fn mutators_copy() {
        let pile = DiceMultiset::empty();
        let bigger = pile.add(Face::One, 1);
        assert_eq!(pile.size(), 0);
        assert_eq!(bigger.size(), 1);
    }
}
