use std::fmt::{Debug, Formatter};
use std::ops::Range;

use fixedbitset::FixedBitSet;

/// A set of small ordinals, e.g. factor indices or field ordinals.
///
/// Capacity is given up front, but inserting past it grows the set instead of panicking, so a
/// bad ordinal surfaces as a lookup error rather than a crash.
#[derive(Clone, Default)]
pub struct Bitmap {
    bits: FixedBitSet,
}

impl Bitmap {
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(bits),
        }
    }

    pub fn insert(&mut self, bit: usize) {
        if bit >= self.bits.len() {
            self.bits.grow(bit + 1);
        }
        self.bits.insert(bit);
    }

    pub fn insert_range(&mut self, range: Range<usize>) {
        if range.end > self.bits.len() {
            self.bits.grow(range.end);
        }
        self.bits.insert_range(range);
    }

    pub fn remove(&mut self, bit: usize) {
        if bit < self.bits.len() {
            self.bits.set(bit, false);
        }
    }

    pub fn contains(&self, bit: usize) -> bool {
        self.bits.contains(bit)
    }

    /// Tests whether every bit of `other` is also set in `self`.
    pub fn contains_all(&self, other: &Bitmap) -> bool {
        other.bits.is_subset(&self.bits)
    }

    pub fn union_with(&mut self, other: &Bitmap) {
        self.bits.union_with(&other.bits);
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Bitmap {}

impl Debug for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for Bitmap {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut bitmap = Bitmap::default();
        bitmap.extend(iter);
        bitmap
    }
}

impl Extend<usize> for Bitmap {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for bit in iter {
            self.insert(bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_grows() {
        let mut bitmap = Bitmap::with_capacity(2);
        bitmap.insert(1);
        bitmap.insert(9);
        assert_eq!(vec![1, 9], bitmap.iter().collect::<Vec<_>>());
        assert_eq!(2, bitmap.len());
    }

    #[test]
    fn test_eq_ignores_capacity() {
        let mut small = Bitmap::with_capacity(4);
        small.insert(3);
        let mut large = Bitmap::with_capacity(128);
        large.insert(3);
        assert_eq!(small, large);
        assert_ne!(small, Bitmap::with_capacity(4));
    }

    #[test]
    fn test_contains_all() {
        let tree: Bitmap = [0, 1, 3].into_iter().collect();
        assert!(tree.contains_all(&[0, 1].into_iter().collect()));
        assert!(tree.contains_all(&Bitmap::default()));
        assert!(!tree.contains_all(&[0, 2].into_iter().collect()));
        assert!(!tree.contains_all(&[70].into_iter().collect()));
    }

    #[test]
    fn test_insert_range_and_remove() {
        let mut bitmap = Bitmap::with_capacity(3);
        bitmap.insert_range(2..5);
        bitmap.remove(3);
        bitmap.remove(100);
        assert_eq!(vec![2, 4], bitmap.iter().collect::<Vec<_>>());
        assert!(!bitmap.contains(100));
    }

    #[test]
    fn test_union_with() {
        let mut left: Bitmap = [0, 2].into_iter().collect();
        let right: Bitmap = [2, 65].into_iter().collect();
        left.union_with(&right);
        assert_eq!(vec![0, 2, 65], left.iter().collect::<Vec<_>>());
    }
}
