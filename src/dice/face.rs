use crate::Total;

/// one face of a Pickomino die. five numbered faces plus the wild
/// Worm. the Worm scores 5 like the Five but is tracked as its own
/// face because only Worm-holding chests score at all.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Face {
    #[default]
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Worm = 5,
}

impl Face {
    pub const ALL: [Face; crate::N_FACES] = [
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Worm,
    ];
    pub fn value(&self) -> Total {
        match self {
            Face::Worm => crate::WORM_VALUE,
            numbered => *numbered as Total + 1,
        }
    }
}

/// u8 isomorphism
/// each face maps to its slot in the counts array
impl From<u8> for Face {
    fn from(n: u8) -> Face {
        match n {
            0 => Face::One,
            1 => Face::Two,
            2 => Face::Three,
            3 => Face::Four,
            4 => Face::Five,
            5 => Face::Worm,
            _ => panic!("Invalid face u8: {}", n),
        }
    }
}
impl From<Face> for u8 {
    fn from(f: Face) -> u8 {
        f as u8
    }
}

/// str isomorphism, fallible for wire decoding
impl TryFrom<&str> for Face {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "1" => Ok(Face::One),
            "2" => Ok(Face::Two),
            "3" => Ok(Face::Three),
            "4" => Ok(Face::Four),
            "5" => Ok(Face::Five),
            "W" => Ok(Face::Worm),
            _ => Err(format!("Invalid face str: {}", s)),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Face::One => "1",
                Face::Two => "2",
                Face::Three => "3",
                Face::Four => "4",
                Face::Five => "5",
                Face::Worm => "W",
            }
        )
    }
}

impl crate::Arbitrary for Face {
    fn random() -> Self {
        use rand::Rng;
        Self::from(rand::rng().random_range(0..crate::N_FACES) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(Face::One.value(), 1);
        assert_eq!(Face::Three.value(), 3);
        assert_eq!(Face::Five.value(), 5);
        assert_eq!(Face::Worm.value(), 5);
    }

    #[test]
    fn bijective_u8() {
        for face in Face::ALL {
            assert_eq!(face, Face::from(u8::from(face)));
        }
    }

    #[test]
    fn bijective_str() {
        for face in Face::ALL {
            assert_eq!(face, Face::try_from(face.to_string().as_str()).unwrap());
        }
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert!(Face::try_from("6").is_err());
        assert!(Face::try_from("worm").is_err());
    }
}
