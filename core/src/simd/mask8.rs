//! 8-lane mask

use std::ops::{BitAnd, BitOr, Not};

/// One bit per lane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mask8(pub u8);

impl Mask8 {
    /// No lane set.
    pub const NONE: Self = Self(0);

    /// Every lane set.
    pub const ALL: Self = Self(0xff);

    /// Create a mask from per-lane booleans.
    ///
    /// * `lanes` - Lane values.
    pub fn from_lanes(lanes: [bool; 8]) -> Self {
        let mut bits = 0u8;
        for (i, &set) in lanes.iter().enumerate() {
            if set {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    /// Returns true if the lane is set.
    ///
    /// * `lane` - Lane index.
    #[inline]
    pub fn get(&self, lane: usize) -> bool {
        self.0 & (1 << lane) != 0
    }

    /// Returns true if any lane is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.0 != 0
    }

    /// Returns true if all lanes are set.
    #[inline]
    pub fn all(&self) -> bool {
        self.0 == 0xff
    }

    /// Number of lanes set.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over the indices of the set lanes.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (0..8).filter(move |i| bits & (1 << i) != 0)
    }
}

impl BitAnd for Mask8 {
    type Output = Self;

    fn bitand(self, other: Self) -> Self::Output {
        Self(self.0 & other.0)
    }
}

impl BitOr for Mask8 {
    type Output = Self;

    fn bitor(self, other: Self) -> Self::Output {
        Self(self.0 | other.0)
    }
}

impl Not for Mask8 {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_and_counts() {
        let m = Mask8::from_lanes([true, false, true, false, false, false, false, true]);
        assert_eq!(m.count(), 3);
        assert!(m.get(0) && m.get(2) && m.get(7) && !m.get(1));
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![0, 2, 7]);
        assert_eq!((m & !m), Mask8::NONE);
        assert!((m | !m).all());
    }
}
