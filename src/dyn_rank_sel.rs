//! Dynamic rank/select over a borrowed word array.
//!
//! # Intuition
//!
//! Cut the bit vector into 64-bit chunks and remember only one number per chunk:
//! its population count. Rank is then "ones in all earlier chunks" plus a masked
//! popcount, and select is "which chunk holds the $k$-th one" plus an in-word
//! select. Keep the per-chunk counts in a searchable prefix-sum aggregate and
//! flipping a bit costs one point update instead of a rebuild.
//!
//! # Complexity (with the default [`FenwickTree`])
//!
//! | Operation | Time |
//! |-----------|------|
//! | `new` | O(n / 64) |
//! | `rank`, `select`, `select_zero` | O(log(n / 64)) |
//! | `set`, `clear`, `toggle`, `update` | O(log(n / 64)) |
//!
//! # Ownership
//!
//! The engine borrows the caller's words mutably for `'a`: the storage outlives
//! the engine, and while the engine lives every mutation goes through it, so the
//! chunk weights can never drift from the words.
//!
//! # Serialized layout
//!
//! - size: u64 (bit length, native endian)
//! - the prefix-sum aggregate, in its own format
//! - `ceil(size / 64)` raw words (native endian)

use std::io::{Read, Write};

use crate::broadword::{low_mask, popcount, select_in_word, WORD_BITS};
use crate::codec::{read_len, read_words, write_u64, write_words};
use crate::error::{Error, Result};
use crate::fenwick::FenwickTree;
use crate::prefix_sum::SearchablePrefixSums;
use crate::traits::{DynamicBitVector, Rank, Select, SelectZero};

/// Rank and select on a mutable bit vector, backed by a searchable prefix-sum
/// aggregate over per-word population counts.
///
/// If a word beyond the logical end is present it is never read, so
/// `rank(size())` is defined whether or not the caller left a spare word.
pub struct WordDynRankSel<'a, S: SearchablePrefixSums = FenwickTree> {
    bits: &'a mut [u64],
    size: usize,
    prefix_sums: S,
}

impl<S: SearchablePrefixSums> std::fmt::Debug for WordDynRankSel<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordDynRankSel")
            .field("size", &self.size)
            .field("ones", &self.count_ones())
            .finish()
    }
}

impl<'a, S: SearchablePrefixSums> WordDynRankSel<'a, S> {
    /// Build over the first `size` bits of `bits`.
    ///
    /// `bits` must hold at least `ceil(size / 64)` words. Only a reference is
    /// kept; the words are read once here to compute the chunk weights.
    pub fn new(bits: &'a mut [u64], size: usize) -> Self {
        debug_assert_eq!(S::BOUND, WORD_BITS as u64);
        let num_words = size.div_ceil(WORD_BITS);
        debug_assert!(
            bits.len() >= num_words,
            "{} words cannot hold {size} bits",
            bits.len()
        );

        let prefix_sums = Self::build_prefix_sums(&bits[..num_words]);
        log::debug!(
            "built dynamic rank/select over {size} bits ({num_words} chunks, {} ones)",
            prefix_sums.total()
        );

        Self {
            bits,
            size,
            prefix_sums,
        }
    }

    fn build_prefix_sums(words: &[u64]) -> S {
        let weights: Vec<u64> = words.iter().map(|&w| u64::from(popcount(w))).collect();
        S::from_weights(&weights)
    }

    /// Read a serialized engine, loading the raw words into `bits`.
    ///
    /// On error the contents of `bits` are unspecified; the storage borrow ends
    /// with the failed call, so no half-read engine is ever observable.
    pub fn decode<R: Read + ?Sized>(reader: &mut R, bits: &'a mut [u64]) -> Result<Self> {
        let size = read_len(reader)?;
        let num_words = size.div_ceil(WORD_BITS);
        let prefix_sums = S::decode(reader)?;
        if prefix_sums.len() != num_words {
            return Err(Error::InvalidEncoding(format!(
                "prefix sums cover {} chunks, bit length {size} needs {num_words}",
                prefix_sums.len()
            )));
        }
        if bits.len() < num_words {
            return Err(Error::InvalidEncoding(format!(
                "storage holds {} words, bit length {size} needs {num_words}",
                bits.len()
            )));
        }
        read_words(reader, &mut bits[..num_words])?;

        let mut ones = 0u64;
        for (i, &word) in bits[..num_words].iter().enumerate() {
            ones += u64::from(popcount(word));
            if prefix_sums.prefix(i + 1) != ones {
                return Err(Error::InvalidEncoding(format!(
                    "chunk {i}: words hold {ones} ones up to here, prefix sums claim {}",
                    prefix_sums.prefix(i + 1)
                )));
            }
        }
        log::debug!("decoded dynamic rank/select over {size} bits");

        Ok(Self {
            bits,
            size,
            prefix_sums,
        })
    }

    /// Write the bit length, the prefix-sum aggregate and the raw words.
    pub fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_u64(writer, self.size as u64)?;
        self.prefix_sums.encode(writer)?;
        write_words(writer, &self.bits[..self.num_words()])
    }

    fn num_words(&self) -> usize {
        self.prefix_sums.len()
    }

    /// The borrowed words.
    pub fn bitvector(&self) -> &[u64] {
        &self.bits[..]
    }

    /// Logical length in bits.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return true if the logical length is 0.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of set bits in `[0, size())`.
    pub fn count_ones(&self) -> usize {
        self.rank(self.size)
    }

    /// Number of clear bits in `[0, size())`.
    pub fn count_zeros(&self) -> usize {
        self.size - self.count_ones()
    }

    /// Total footprint in bits: aggregate, this wrapper, and the word-aligned vector.
    pub fn bit_count(&self) -> usize {
        // `S::bit_count` includes its own struct, which `Self` already counts
        self.prefix_sums
            .bit_count()
            .saturating_sub(std::mem::size_of::<S>() * 8)
            + std::mem::size_of::<Self>() * 8
            + self.size.div_ceil(WORD_BITS) * WORD_BITS
    }

    /// Return true if the bit at `index` is set.
    pub fn get(&self, index: usize) -> bool {
        self.bits[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Number of set bits in `[0, pos)`, for `pos <= size()`.
    pub fn rank(&self, pos: usize) -> usize {
        debug_assert!(pos <= self.size, "rank({pos}) past size {}", self.size);
        let idx = pos / WORD_BITS;
        let offset = pos % WORD_BITS;
        let partial = if offset == 0 {
            0
        } else {
            popcount(self.bits[idx] & low_mask(offset))
        };
        self.prefix_sums.prefix(idx) as usize + partial as usize
    }

    /// Position of the `rank`-th set bit, or `None` past the last one.
    pub fn select(&self, rank: usize) -> Option<usize> {
        let (idx, residual) = self.prefix_sums.find(rank as u64);
        if idx >= self.num_words() {
            return None;
        }
        let pos = idx * WORD_BITS + select_in_word(self.bits[idx], residual as u32) as usize;
        (pos < self.size).then_some(pos)
    }

    /// Position of the `rank`-th clear bit, or `None` past the last one.
    ///
    /// Padding bits after `size()` in the last word are not counted.
    pub fn select_zero(&self, rank: usize) -> Option<usize> {
        let (idx, residual) = self.prefix_sums.comp_find(rank as u64);
        if idx >= self.num_words() {
            return None;
        }
        let pos = idx * WORD_BITS + select_in_word(!self.bits[idx], residual as u32) as usize;
        (pos < self.size).then_some(pos)
    }

    /// Panics before any write if word `w` has no weight in the aggregate.
    fn check_chunk(&self, w: usize) {
        assert!(
            w < self.num_words(),
            "word {w} past the {} indexed words",
            self.num_words()
        );
    }

    /// Replace word `index` with `word`, returning the previous word.
    pub fn update(&mut self, index: usize, word: u64) -> u64 {
        self.check_chunk(index);
        let old = std::mem::replace(&mut self.bits[index], word);
        let delta = i64::from(popcount(word)) - i64::from(popcount(old));
        if delta != 0 {
            self.prefix_sums.add(index, delta);
        }
        log::trace!("update word {index}: {old:#018x} -> {word:#018x} (delta {delta})");
        old
    }

    /// Set the bit at `index`; returns true if it was already set.
    pub fn set(&mut self, index: usize) -> bool {
        let (w, mask) = (index / WORD_BITS, 1u64 << (index % WORD_BITS));
        self.check_chunk(w);
        if self.bits[w] & mask != 0 {
            return true;
        }
        self.bits[w] |= mask;
        self.prefix_sums.add(w, 1);
        false
    }

    /// Clear the bit at `index`; returns true if it was already clear.
    pub fn clear(&mut self, index: usize) -> bool {
        let (w, mask) = (index / WORD_BITS, 1u64 << (index % WORD_BITS));
        self.check_chunk(w);
        if self.bits[w] & mask == 0 {
            return true;
        }
        self.bits[w] &= !mask;
        self.prefix_sums.add(w, -1);
        false
    }

    /// Flip the bit at `index`; returns true if it was set before the call.
    pub fn toggle(&mut self, index: usize) -> bool {
        let (w, mask) = (index / WORD_BITS, 1u64 << (index % WORD_BITS));
        self.check_chunk(w);
        let was_set = self.bits[w] & mask != 0;
        self.bits[w] ^= mask;
        self.prefix_sums.add(w, if was_set { -1 } else { 1 });
        was_set
    }
}

impl<S: SearchablePrefixSums> Rank for WordDynRankSel<'_, S> {
    fn rank(&self, pos: usize) -> usize {
        WordDynRankSel::rank(self, pos)
    }
}

impl<S: SearchablePrefixSums> Select for WordDynRankSel<'_, S> {
    fn select(&self, rank: usize) -> Option<usize> {
        WordDynRankSel::select(self, rank)
    }
}

impl<S: SearchablePrefixSums> SelectZero for WordDynRankSel<'_, S> {
    fn select_zero(&self, rank: usize) -> Option<usize> {
        WordDynRankSel::select_zero(self, rank)
    }
}

impl<S: SearchablePrefixSums> DynamicBitVector for WordDynRankSel<'_, S> {
    fn set(&mut self, index: usize) -> bool {
        WordDynRankSel::set(self, index)
    }

    fn clear(&mut self, index: usize) -> bool {
        WordDynRankSel::clear(self, index)
    }

    fn toggle(&mut self, index: usize) -> bool {
        WordDynRankSel::toggle(self, index)
    }
}
