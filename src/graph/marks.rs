//! Per-vertex mark flags.
//!
//! Each vertex carries eight flag bits: one general-purpose mark used by
//! the built-in traversals, plus seven distinguishable marks for
//! algorithms that need several simultaneous colors. The "is marked at
//! all" query is distinct from "carries this specific mark".

use serde::{Deserialize, Serialize};

/// A named mark bit.
///
/// Mark values are disjoint powers of two, so a [`MarkSet`] can hold any
/// combination. [`Mark::SEEN`] is the general-purpose mark and aliases
/// [`Mark::M1`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark(u8);

impl Mark {
    /// The general-purpose mark used by the built-in traversals.
    pub const SEEN: Mark = Mark(0b0000_0001);
    /// First of the seven distinguishable marks (aliases [`Mark::SEEN`]).
    pub const M1: Mark = Mark(0b0000_0001);
    /// Second distinguishable mark.
    pub const M2: Mark = Mark(0b0000_0010);
    /// Third distinguishable mark.
    pub const M3: Mark = Mark(0b0000_0100);
    /// Fourth distinguishable mark.
    pub const M4: Mark = Mark(0b0000_1000);
    /// Fifth distinguishable mark.
    pub const M5: Mark = Mark(0b0001_0000);
    /// Sixth distinguishable mark.
    pub const M6: Mark = Mark(0b0010_0000);
    /// Seventh distinguishable mark.
    pub const M7: Mark = Mark(0b0100_0000);

    /// Returns the raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// The set of marks currently on one vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSet(u8);

impl MarkSet {
    /// Sets `mark`.
    pub fn insert(&mut self, mark: Mark) {
        self.0 |= mark.bits();
    }

    /// Clears `mark`, leaving every other mark untouched.
    pub fn remove(&mut self, mark: Mark) {
        self.0 &= !mark.bits();
    }

    /// Clears every mark.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Whether `mark` is set.
    pub fn contains(self, mark: Mark) -> bool {
        self.0 & mark.bits() != 0
    }

    /// Whether any mark at all is set.
    pub fn any(self) -> bool {
        self.0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Mark; 7] = [
        Mark::M1,
        Mark::M2,
        Mark::M3,
        Mark::M4,
        Mark::M5,
        Mark::M6,
        Mark::M7,
    ];

    #[test]
    fn marks_are_disjoint_powers_of_two() {
        for (i, a) in ALL.iter().enumerate() {
            assert!(a.bits().is_power_of_two());
            for b in &ALL[i + 1..] {
                assert_eq!(a.bits() & b.bits(), 0);
            }
        }
        assert_eq!(Mark::SEEN, Mark::M1);
    }

    #[test]
    fn insert_and_contains() {
        let mut set = MarkSet::default();
        assert!(!set.any());
        set.insert(Mark::M2);
        set.insert(Mark::M5);
        assert!(set.contains(Mark::M2));
        assert!(set.contains(Mark::M5));
        assert!(!set.contains(Mark::SEEN));
        assert!(set.any());
    }

    #[test]
    fn remove_leaves_other_marks() {
        let mut set = MarkSet::default();
        set.insert(Mark::M2);
        set.insert(Mark::M3);
        set.remove(Mark::M2);
        assert!(!set.contains(Mark::M2));
        assert!(set.contains(Mark::M3));
        assert!(set.any());
    }

    #[test]
    fn remove_absent_mark_is_a_no_op() {
        let mut set = MarkSet::default();
        set.insert(Mark::M7);
        set.remove(Mark::M4);
        assert!(set.contains(Mark::M7));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set = MarkSet::default();
        for mark in ALL {
            set.insert(mark);
        }
        set.clear();
        assert!(!set.any());
    }
}
