use crate::Probability;

/// wire-format flag set. payloads are not self-describing; the reader
/// must be told which writer produced them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    /// fixed-point masses at scale 1000 instead of raw floats
    pub rounded: bool,
    /// run-length triples over runs of equal consecutive weights
    pub compressed: bool,
}

impl Encoding {
    /// full-precision literal pairs
    pub const RAW: Self = Self {
        rounded: false,
        compressed: false,
    };
    /// the shipped-asset flavor
    pub const COMPACT: Self = Self {
        rounded: true,
        compressed: true,
    };

    /// fixed-point mass at scale 1000. a full 1.0 would collide with
    /// the scale itself, so it escapes to the sentinel.
    pub fn quantize(mass: Probability) -> i64 {
        let q = (mass * crate::WIRE_SCALE as Probability).round() as i64;
        if q >= crate::WIRE_SCALE { crate::WIRE_ONE } else { q }
    }
    pub fn dequantize(wire: i64) -> Probability {
        if wire == crate::WIRE_ONE {
            1.0
        } else {
            wire as Probability / crate::WIRE_SCALE as Probability
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_to_thousandths() {
        assert_eq!(Encoding::quantize(0.0), 0);
        assert_eq!(Encoding::quantize(0.5), 500);
        assert_eq!(Encoding::quantize(0.1667), 167);
    }

    #[test]
    fn full_mass_escapes_to_sentinel() {
        assert_eq!(Encoding::quantize(1.0), crate::WIRE_ONE);
        assert_eq!(Encoding::quantize(0.9996), crate::WIRE_ONE);
        assert_eq!(Encoding::dequantize(crate::WIRE_ONE), 1.0);
    }

    #[test]
    fn round_trips_on_grid() {
        for q in [0, 1, 167, 500, 999] {
            assert_eq!(Encoding::quantize(Encoding::dequantize(q)), q);
        }
    }
}
