//! Searchable prefix sums over chunk weights.
//!
//! The dynamic rank/select engine keeps one weight per 64-bit chunk (its
//! population count) and needs four things from the aggregate on top:
//! - `prefix(i)`: the sum of the weights of chunks `[0, i)`.
//! - `find(rank)`: the chunk holding global rank `rank` plus the residual inside it.
//! - `comp_find(rank)`: the same over complement weights `BOUND - weight`.
//! - `add(i, delta)`: a point update that is visible to the very next query.
//!
//! Any aggregate satisfying [`SearchablePrefixSums`] can back the engine.
//! [`FenwickTree`](crate::fenwick::FenwickTree) is the default; [`PrefixArray`]
//! is the $O(1)$-prefix / $O(n)$-update extreme of the same contract.

use std::io::{Read, Write};

use crate::codec::{read_len, read_u64, write_u64};
use crate::error::{Error, Result};

/// A searchable prefix-sum aggregate over a fixed number of bounded weights.
///
/// Weights are in `0..=BOUND`. Both search operations return the *largest*
/// index `i` in `0..=len()` whose prefix does not exceed `rank`, paired with
/// `rank - prefix(i)`. When `rank` is below the total, chunk `i` contains it;
/// otherwise `i == len()`.
pub trait SearchablePrefixSums: Sized {
    /// Maximum weight of a single element.
    const BOUND: u64;

    /// Build the aggregate over `weights`.
    fn from_weights(weights: &[u64]) -> Self;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Return true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the weights of elements `[0, i)`, for `i <= len()`.
    fn prefix(&self, i: usize) -> u64;

    /// Sum of all weights.
    fn total(&self) -> u64 {
        self.prefix(self.len())
    }

    /// Locate `rank` among the weights: `(index, rank - prefix(index))`.
    fn find(&self, rank: u64) -> (usize, u64);

    /// Locate `rank` among the complement weights `BOUND - weight`.
    fn comp_find(&self, rank: u64) -> (usize, u64);

    /// Add `delta` to the weight of element `i`.
    fn add(&mut self, i: usize, delta: i64);

    /// Memory footprint in bits, including `size_of::<Self>()`.
    fn bit_count(&self) -> usize;

    /// Write the aggregate in native byte order.
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()>;

    /// Read an aggregate written by [`encode`](Self::encode).
    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self>;
}

/// Explicit cumulative array: `cum[i] = prefix(i)`.
///
/// `prefix` is a single load and both searches are binary searches, but `add`
/// rewrites every later entry. Useful for read-mostly vectors and as a
/// reference aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixArray<const BOUND: u64 = 64> {
    cum: Vec<u64>,
}

impl<const BOUND: u64> PrefixArray<BOUND> {
    /// Largest `i` in `0..=len` with `key(i) <= rank`; `key` must be non-decreasing.
    fn locate(&self, rank: u64, key: impl Fn(usize) -> u64) -> (usize, u64) {
        let mut lo = 0usize;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if key(mid) <= rank {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        (lo, rank - key(lo))
    }
}

impl<const BOUND: u64> SearchablePrefixSums for PrefixArray<BOUND> {
    const BOUND: u64 = BOUND;

    fn from_weights(weights: &[u64]) -> Self {
        let mut cum = Vec::with_capacity(weights.len() + 1);
        let mut acc = 0u64;
        cum.push(0);
        for &w in weights {
            debug_assert!(w <= BOUND);
            acc += w;
            cum.push(acc);
        }
        Self { cum }
    }

    fn len(&self) -> usize {
        self.cum.len() - 1
    }

    fn prefix(&self, i: usize) -> u64 {
        self.cum[i]
    }

    fn find(&self, rank: u64) -> (usize, u64) {
        self.locate(rank, |i| self.cum[i])
    }

    fn comp_find(&self, rank: u64) -> (usize, u64) {
        self.locate(rank, |i| BOUND * i as u64 - self.cum[i])
    }

    fn add(&mut self, i: usize, delta: i64) {
        for c in &mut self.cum[i + 1..] {
            *c = c.wrapping_add(delta as u64);
        }
    }

    fn bit_count(&self) -> usize {
        std::mem::size_of::<Self>() * 8 + self.cum.len() * 64
    }

    /// Format: `len: u64`, then `len + 1` cumulative sums.
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_u64(writer, self.len() as u64)?;
        for &c in &self.cum {
            write_u64(writer, c)?;
        }
        Ok(())
    }

    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let len = read_len(reader)?;
        let mut cum = Vec::with_capacity(len.saturating_add(1).min(1 << 20));
        for _ in 0..=len {
            cum.push(read_u64(reader)?);
        }
        if cum[0] != 0 || cum.windows(2).any(|w| w[1] < w[0] || w[1] - w[0] > BOUND) {
            return Err(Error::InvalidEncoding(
                "prefix array is not a cumulative sum of bounded weights".to_string(),
            ));
        }
        Ok(Self { cum })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_find() {
        let ps = PrefixArray::<64>::from_weights(&[3, 0, 5, 64]);
        assert_eq!(ps.len(), 4);
        assert_eq!(ps.prefix(0), 0);
        assert_eq!(ps.prefix(2), 3);
        assert_eq!(ps.total(), 72);

        assert_eq!(ps.find(0), (0, 0));
        assert_eq!(ps.find(2), (0, 2));
        // zero-weight chunk 1 is skipped over
        assert_eq!(ps.find(3), (2, 0));
        assert_eq!(ps.find(7), (2, 4));
        assert_eq!(ps.find(8), (3, 0));
        assert_eq!(ps.find(72), (4, 0));
    }

    #[test]
    fn test_comp_find() {
        // complement weights: 61, 64, 59, 0
        let ps = PrefixArray::<64>::from_weights(&[3, 0, 5, 64]);
        assert_eq!(ps.comp_find(0), (0, 0));
        assert_eq!(ps.comp_find(61), (1, 0));
        assert_eq!(ps.comp_find(125), (2, 0));
        assert_eq!(ps.comp_find(183), (2, 58));
        assert_eq!(ps.comp_find(184), (4, 0));
    }

    #[test]
    fn test_add_is_immediately_visible() {
        let mut ps = PrefixArray::<64>::from_weights(&[1, 1, 1]);
        ps.add(1, 2);
        assert_eq!(ps.prefix(2), 4);
        assert_eq!(ps.find(3), (1, 2));
        ps.add(0, -1);
        assert_eq!(ps.prefix(1), 0);
        assert_eq!(ps.find(0), (1, 0));
    }

    #[test]
    fn test_encode_decode() {
        let ps = PrefixArray::<64>::from_weights(&[10, 20, 30]);
        let mut out = Vec::new();
        ps.encode(&mut out).unwrap();
        assert_eq!(out.len(), 8 * 5);
        let back = PrefixArray::<64>::decode(&mut out.as_slice()).unwrap();
        assert_eq!(back, ps);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let mut out = Vec::new();
        write_u64(&mut out, 1).unwrap();
        write_u64(&mut out, 0).unwrap();
        write_u64(&mut out, 65).unwrap();
        assert!(matches!(
            PrefixArray::<64>::decode(&mut out.as_slice()),
            Err(Error::InvalidEncoding(_))
        ));
    }
}
