//! Implicit bit vector: the raw words and nothing else.
//!
//! An "implicit" structure for a class $C_n$ uses $\log |C_n| + O(1)$ bits.
//! With no index at all, every query is a linear scan. That makes it the
//! zero-overhead baseline for the indexed structures in this crate, and an
//! easy oracle to test them against.

use crate::broadword::{low_mask, popcount, select_in_word, WORD_BITS};
use crate::traits::{Rank, Select, SelectZero};

/// A borrowed bit vector with linear-time rank and select.
#[derive(Clone, Copy, Debug)]
pub struct ImplicitBitVector<'a> {
    words: &'a [u64],
    len: usize,
}

impl<'a> ImplicitBitVector<'a> {
    /// Wrap the first `len` bits of `words`.
    pub fn new(words: &'a [u64], len: usize) -> Self {
        debug_assert!(words.len() * WORD_BITS >= len);
        Self { words, len }
    }

    /// Length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the bit vector has length 0.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return true if bit at `i` is set. O(1).
    pub fn get(&self, i: usize) -> bool {
        if i >= self.len {
            return false;
        }
        (self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS))) != 0
    }

    /// Word `i` with bits past `len` cleared.
    fn word(&self, i: usize) -> u64 {
        let w = self.words[i];
        let end = (i + 1) * WORD_BITS;
        if end > self.len {
            w & low_mask(self.len - i * WORD_BITS)
        } else {
            w
        }
    }

    fn num_words(&self) -> usize {
        self.len.div_ceil(WORD_BITS)
    }

    /// Linear-time rank: O(N).
    pub fn rank(&self, i: usize) -> usize {
        let i = i.min(self.len);
        let full_words = i / WORD_BITS;
        let mut count: usize = self.words[..full_words]
            .iter()
            .map(|&w| popcount(w) as usize)
            .sum();
        let bit_offset = i % WORD_BITS;
        if bit_offset > 0 {
            count += popcount(self.words[full_words] & low_mask(bit_offset)) as usize;
        }
        count
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.rank(self.len)
    }

    /// Linear-time select: O(N).
    pub fn select(&self, k: usize) -> Option<usize> {
        self.scan(k, |w| w)
    }

    /// Linear-time select on clear bits: O(N).
    pub fn select_zero(&self, k: usize) -> Option<usize> {
        // complement first, then mask off the padding
        self.scan(k, |w| !w).filter(|&p| p < self.len)
    }

    fn scan(&self, mut k: usize, view: impl Fn(u64) -> u64) -> Option<usize> {
        for i in 0..self.num_words() {
            let word = view(self.word(i));
            let ones = popcount(word) as usize;
            if k < ones {
                return Some(i * WORD_BITS + select_in_word(word, k as u32) as usize);
            }
            k -= ones;
        }
        None
    }
}

impl Rank for ImplicitBitVector<'_> {
    fn rank(&self, pos: usize) -> usize {
        ImplicitBitVector::rank(self, pos)
    }
}

impl Select for ImplicitBitVector<'_> {
    fn select(&self, rank: usize) -> Option<usize> {
        ImplicitBitVector::select(self, rank)
    }
}

impl SelectZero for ImplicitBitVector<'_> {
    fn select_zero(&self, rank: usize) -> Option<usize> {
        ImplicitBitVector::select_zero(self, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_basic() {
        let words = [0b1011u64, 0b1101];
        let bv = ImplicitBitVector::new(&words, 128);
        assert_eq!(bv.rank(0), 0);
        assert_eq!(bv.rank(4), 3);
        assert_eq!(bv.rank(128), 6);
        assert!(bv.get(0));
        assert!(!bv.get(2));
        assert_eq!(bv.select(2), Some(3));
        assert_eq!(bv.select(3), Some(64));
        assert_eq!(bv.select(6), None);
        assert_eq!(bv.select_zero(0), Some(2));
        assert_eq!(bv.select_zero(1), Some(4));
    }

    #[test]
    fn test_implicit_ignores_padding() {
        let words = [u64::MAX];
        let bv = ImplicitBitVector::new(&words, 5);
        assert_eq!(bv.count_ones(), 5);
        assert_eq!(bv.select(5), None);
        assert_eq!(bv.select_zero(0), None);
        assert!(!bv.get(6));
    }
}
