use rand::Rng;

/// Range the tab depth and curve factor are drawn from.
pub const TAB_JITTER_RANGE: std::ops::RangeInclusive<f32> = 0.8..=1.2;
/// Range the width variation is drawn from.
pub const WIDTH_VARIATION_RANGE: std::ops::RangeInclusive<f32> = 0.9..=1.1;

/// Which way a piece edge bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Straight edge, only found on the puzzle border.
    Flat,
    /// Tab bulging away from the piece.
    Out,
    /// Blank cut into the piece.
    In,
}

impl Orientation {
    /// -1, 0 or +1 along the outward normal of the edge.
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Flat => 0,
            Orientation::Out => 1,
            Orientation::In => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Flat => Orientation::Flat,
            Orientation::Out => Orientation::In,
            Orientation::In => Orientation::Out,
        }
    }

    pub fn is_flat(self) -> bool {
        self == Orientation::Flat
    }
}

/// One side of a piece.
///
/// `depth` scales the tab bulge; generated edges draw it from 0.8..1.2.
/// `curve_factor` (0.8..1.2) and `width_variation` (0.9..1.1) are generated and
/// carried through seams and inversion, but the outline builder does not read
/// them yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub orientation: Orientation,
    pub depth: f32,
    pub curve_factor: f32,
    pub width_variation: f32,
}

impl Edge {
    /// Straight border edge.
    pub fn flat() -> Self {
        Self {
            orientation: Orientation::Flat,
            depth: 0.0,
            curve_factor: 1.0,
            width_variation: 1.0,
        }
    }

    /// Fresh tab or blank for an internal seam.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let orientation = if rng.random_bool(0.5) {
            Orientation::Out
        } else {
            Orientation::In
        };
        Self {
            orientation,
            depth: rng.random_range(TAB_JITTER_RANGE),
            curve_factor: rng.random_range(TAB_JITTER_RANGE),
            width_variation: rng.random_range(WIDTH_VARIATION_RANGE),
        }
    }

    /// The same edge seen from the neighbouring piece.
    ///
    /// Only the orientation changes; every other field is copied bit for bit so
    /// both faces of a seam trace the same curve.
    pub fn inverted(&self) -> Self {
        Self {
            orientation: self.orientation.flipped(),
            ..*self
        }
    }

    pub fn is_flat(&self) -> bool {
        self.orientation.is_flat()
    }

    /// True if `other` is the exact mirror of this edge.
    pub fn interlocks_with(&self, other: &Edge) -> bool {
        self.orientation.sign() == -other.orientation.sign()
            && self.depth.to_bits() == other.depth.to_bits()
            && self.curve_factor.to_bits() == other.curve_factor.to_bits()
            && self.width_variation.to_bits() == other.width_variation.to_bits()
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_flat_edge() {
        let edge = Edge::flat();
        assert_eq!(edge.orientation, Orientation::Flat);
        assert_eq!(edge.depth, 0.0);
        assert_eq!(edge.curve_factor, 1.0);
        assert_eq!(edge.width_variation, 1.0);
        assert!(edge.is_flat());
    }

    #[test]
    fn test_random_edge_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut saw_out = false;
        let mut saw_in = false;
        for _ in 0..500 {
            let edge = Edge::random(&mut rng);
            assert!(!edge.is_flat());
            assert!(TAB_JITTER_RANGE.contains(&edge.depth));
            assert!(TAB_JITTER_RANGE.contains(&edge.curve_factor));
            assert!(WIDTH_VARIATION_RANGE.contains(&edge.width_variation));
            match edge.orientation {
                Orientation::Out => saw_out = true,
                Orientation::In => saw_in = true,
                Orientation::Flat => unreachable!(),
            }
        }
        assert!(saw_out && saw_in);
    }

    #[test]
    fn test_inversion_only_touches_orientation() {
        let mut rng = StdRng::seed_from_u64(42);
        let edge = Edge::random(&mut rng);
        let inverted = edge.inverted();

        assert_eq!(inverted.orientation.sign(), -edge.orientation.sign());
        assert_eq!(inverted.depth.to_bits(), edge.depth.to_bits());
        assert_eq!(inverted.curve_factor.to_bits(), edge.curve_factor.to_bits());
        assert_eq!(inverted.width_variation.to_bits(), edge.width_variation.to_bits());
        assert!(edge.interlocks_with(&inverted));
        assert_eq!(inverted.inverted(), edge);
    }

    #[test]
    fn test_flat_inverts_to_flat() {
        assert_eq!(Edge::flat().inverted(), Edge::flat());
    }
}
