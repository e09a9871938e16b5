/*
    skimsel

    Copyright 2024 The skimsel Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/bc_range.rs

    Bunch-crossing identifiers and inclusive ranges of them.
*/

use std::fmt::{self, Display, Formatter};

use crate::BC_PER_ORBIT;

/// A global bunch-crossing identifier, counting bunch crossings since the start of the fill.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BunchCrossing(pub u64);

impl BunchCrossing {
    /// Build a global id from an orbit number and the bunch crossing within it. Returns None
    /// if `bc` is not a valid slot in an orbit or the id does not fit in 64 bits.
    pub fn from_orbit_bc(orbit: u64, bc: u16) -> Option<Self> {
        if bc as u64 >= BC_PER_ORBIT {
            return None;
        }
        orbit
            .checked_mul(BC_PER_ORBIT)
            .and_then(|base| base.checked_add(bc as u64))
            .map(BunchCrossing)
    }

    pub fn orbit(&self) -> u64 {
        self.0 / BC_PER_ORBIT
    }

    pub fn bc(&self) -> u16 {
        (self.0 % BC_PER_ORBIT) as u16
    }

    pub fn global_id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for BunchCrossing {
    fn from(id: u64) -> Self {
        BunchCrossing(id)
    }
}

impl From<BunchCrossing> for u64 {
    fn from(bc: BunchCrossing) -> Self {
        bc.0
    }
}

impl Display for BunchCrossing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.orbit(), self.bc())
    }
}

/// An inclusive range of global bunch-crossing ids. `min <= max` always holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BcRange {
    min: u64,
    max: u64,
}

impl BcRange {
    /// Build a range from two endpoints given in either order.
    pub fn from_endpoints(a: u64, b: u64) -> Self {
        BcRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The symmetric window `[key - tolerance, key + tolerance]`, clamped to the u64 domain.
    pub fn window(key: u64, tolerance: u64) -> Self {
        BcRange {
            min: key.saturating_sub(tolerance),
            max: key.saturating_add(tolerance),
        }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Returns true if `other` shares no bunch crossing with this range.
    pub fn is_outside(&self, other: &BcRange) -> bool {
        self.max < other.min || self.min > other.max
    }

    /// Returns true if this range lies entirely before `other`.
    pub fn precedes(&self, other: &BcRange) -> bool {
        self.max < other.min
    }

    /// Returns true if this range lies entirely after `other`.
    pub fn follows(&self, other: &BcRange) -> bool {
        self.min > other.max
    }

    pub fn contains(&self, key: u64) -> bool {
        key >= self.min && key <= self.max
    }
}

impl Display for BcRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bunch_crossing_splits_into_orbit_and_bc() {
        let bc = BunchCrossing::from_orbit_bc(2, 17).unwrap();
        assert_eq!(bc.global_id(), 2 * 3564 + 17);
        assert_eq!(bc.orbit(), 2);
        assert_eq!(bc.bc(), 17);
        assert_eq!(bc.to_string(), "2/17");
    }

    #[test]
    fn orbit_bc_out_of_range_is_rejected() {
        assert_eq!(BunchCrossing::from_orbit_bc(u64::MAX, 0), None);
        assert_eq!(BunchCrossing::from_orbit_bc(u64::MAX / 3564, 3563), None);
        assert_eq!(BunchCrossing::from_orbit_bc(0, 3564), None);

        let last = BunchCrossing::from_orbit_bc(u64::MAX / 3564 - 1, 3563).unwrap();
        assert_eq!(last.bc(), 3563);
    }

    #[test]
    fn range_orders_endpoints() {
        let range = BcRange::from_endpoints(210, 200);
        assert_eq!(range.min(), 200);
        assert_eq!(range.max(), 210);
    }

    #[test]
    fn window_saturates_at_domain_edges() {
        let low = BcRange::window(3, 10);
        assert_eq!(low.min(), 0);
        assert_eq!(low.max(), 13);

        let high = BcRange::window(u64::MAX - 1, 10);
        assert_eq!(high.max(), u64::MAX);
    }

    #[test]
    fn outside_is_strict_on_both_sides() {
        let range = BcRange::from_endpoints(100, 110);
        assert!(!range.is_outside(&BcRange::window(110, 0)));
        assert!(!range.is_outside(&BcRange::window(100, 0)));
        assert!(range.is_outside(&BcRange::window(111, 0)));
        assert!(range.is_outside(&BcRange::window(99, 0)));
        assert!(!range.is_outside(&BcRange::window(95, 5)));
        assert!(range.precedes(&BcRange::window(120, 5)));
        assert!(range.follows(&BcRange::window(80, 5)));
    }
}
