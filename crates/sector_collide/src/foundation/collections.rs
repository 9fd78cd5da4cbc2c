//! Specialized collection types
//!
//! [`Bitset`] is a fixed-width, `Copy` bitset stored as an array of `u64`
//! words. The arena tracks slot allocation with one, and every spatial hash
//! bucket is one.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Number of 64-bit words in a [`ColliderSet`]
pub const COLLIDER_SET_WORDS: usize = 16;

/// Largest slot count a [`ColliderSet`] can address
pub const MAX_COLLIDERS: usize = COLLIDER_SET_WORDS * 64;

/// Bitset over collider arena slots
pub type ColliderSet = Bitset<COLLIDER_SET_WORDS>;

/// Fixed-width bitset of `WORDS * 64` bits
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitset<const WORDS: usize> {
    words: [u64; WORDS],
}

impl<const WORDS: usize> Bitset<WORDS> {
    /// Number of addressable bits
    pub const BITS: usize = WORDS * 64;

    /// Create an empty bitset
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Set bit `idx`. Out-of-range indices are ignored.
    #[inline]
    pub fn mark(&mut self, idx: usize) {
        let word = idx >> 6;
        if word < WORDS {
            self.words[word] |= 1u64 << (idx & 63);
        }
    }

    /// Clear bit `idx`. Out-of-range indices are ignored.
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        let word = idx >> 6;
        if word < WORDS {
            self.words[word] &= !(1u64 << (idx & 63));
        }
    }

    /// Test bit `idx`
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        let word = idx >> 6;
        word < WORDS && (self.words[word] & (1u64 << (idx & 63))) != 0
    }

    /// Clear every bit
    pub fn reset(&mut self) {
        self.words = [0; WORDS];
    }

    /// True when no bit is set
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Lowest set bit, if any
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|&(_, &w)| w != 0)
            .map(|(i, &w)| (i << 6) | w.trailing_zeros() as usize)
    }

    /// Lowest clear bit below `limit`, if any
    pub fn first_clear_below(&self, limit: usize) -> Option<usize> {
        (!*self).first().filter(|&idx| idx < limit.min(Self::BITS))
    }

    /// Remove and return the lowest set bit
    pub fn pop_first(&mut self) -> Option<usize> {
        let idx = self.first()?;
        self.clear(idx);
        Some(idx)
    }

    /// Iterate set bits in ascending order
    pub fn iter(&self) -> BitsetIter<WORDS> {
        BitsetIter {
            words: self.words,
            word: 0,
        }
    }
}

impl<const WORDS: usize> Default for Bitset<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WORDS: usize> std::fmt::Debug for Bitset<WORDS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<const WORDS: usize> BitOrAssign for Bitset<WORDS> {
    fn bitor_assign(&mut self, rhs: Self) {
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a |= *b;
        }
    }
}

impl<const WORDS: usize> BitOr for Bitset<WORDS> {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        self |= rhs;
        self
    }
}

impl<const WORDS: usize> BitAnd for Bitset<WORDS> {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self {
        for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
            *a &= *b;
        }
        self
    }
}

impl<const WORDS: usize> Not for Bitset<WORDS> {
    type Output = Self;

    fn not(mut self) -> Self {
        for w in &mut self.words {
            *w = !*w;
        }
        self
    }
}

impl<const WORDS: usize> FromIterator<usize> for Bitset<WORDS> {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for idx in iter {
            set.mark(idx);
        }
        set
    }
}

impl<'a, const WORDS: usize> IntoIterator for &'a Bitset<WORDS> {
    type Item = usize;
    type IntoIter = BitsetIter<WORDS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the set bits of a [`Bitset`] snapshot
#[derive(Debug, Clone)]
pub struct BitsetIter<const WORDS: usize> {
    words: [u64; WORDS],
    word: usize,
}

impl<const WORDS: usize> Iterator for BitsetIter<WORDS> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.word < WORDS {
            let w = self.words[self.word];
            if w != 0 {
                let bit = w.trailing_zeros() as usize;
                // drop the lowest set bit
                self.words[self.word] = w & (w - 1);
                return Some((self.word << 6) | bit);
            }
            self.word += 1;
        }
        None
    }
}
