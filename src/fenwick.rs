//! Fenwick tree (binary indexed tree) over bounded chunk weights.
//!
//! # Layout
//!
//! The tree is stored 1-indexed in a contiguous `Vec<u64>` of length `n + 1`
//! (index 0 unused). Node `j` holds the sum of the `lowbit(j)` weights ending at
//! element `j - 1`, so the complement aggregate of the same node is
//! `BOUND * lowbit(j) - tree[j]` and needs no second tree.
//!
//! # Operations
//!
//! | Operation | Time |
//! |-----------|------|
//! | `from_weights` | O(n) |
//! | `prefix(i)` | O(log n) |
//! | `add(i, delta)` | O(log n) |
//! | `find(rank)` / `comp_find(rank)` | O(log n) |
//!
//! Both searches descend by binary lifting, producing the chunk index and the
//! residual rank in one pass.

use std::io::{Read, Write};

use crate::codec::{read_len, read_u64, write_u64};
use crate::error::{Error, Result};
use crate::prefix_sum::SearchablePrefixSums;

/// Fenwick tree over `n` weights, each at most `BOUND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenwickTree<const BOUND: u64 = 64> {
    /// 1-indexed tree storage. `tree[0]` is unused.
    tree: Vec<u64>,
    /// Number of elements (not including index 0).
    n: usize,
}

#[inline(always)]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl<const BOUND: u64> FenwickTree<BOUND> {
    /// Largest power of two not above `n`, or 0 for an empty tree.
    fn top_step(&self) -> usize {
        if self.n == 0 {
            0
        } else {
            1 << (usize::BITS - 1 - self.n.leading_zeros())
        }
    }

    /// Binary-lifting descent; `node(j)` is the aggregate stored at node `j`.
    #[inline]
    fn descend(&self, rank: u64, node: impl Fn(usize) -> u64) -> (usize, u64) {
        let mut pos = 0usize;
        let mut rem = rank;
        let mut step = self.top_step();
        while step > 0 {
            let next = pos + step;
            if next <= self.n {
                let w = node(next);
                if w <= rem {
                    pos = next;
                    rem -= w;
                }
            }
            step >>= 1;
        }
        (pos, rem)
    }
}

impl<const BOUND: u64> SearchablePrefixSums for FenwickTree<BOUND> {
    const BOUND: u64 = BOUND;

    fn from_weights(weights: &[u64]) -> Self {
        let n = weights.len();
        let mut tree = vec![0u64; n + 1];
        for (i, &w) in weights.iter().enumerate() {
            debug_assert!(w <= BOUND);
            tree[i + 1] = w;
        }
        // Parent propagation in O(n).
        for i in 1..=n {
            let parent = i + lowbit(i);
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        Self { tree, n }
    }

    #[inline]
    fn len(&self) -> usize {
        self.n
    }

    fn prefix(&self, i: usize) -> u64 {
        debug_assert!(i <= self.n, "index {i} out of bounds (n={})", self.n);
        let mut sum = 0u64;
        let mut idx = i;
        while idx > 0 {
            sum += self.tree[idx];
            idx -= lowbit(idx);
        }
        sum
    }

    fn find(&self, rank: u64) -> (usize, u64) {
        self.descend(rank, |j| self.tree[j])
    }

    fn comp_find(&self, rank: u64) -> (usize, u64) {
        self.descend(rank, |j| BOUND * lowbit(j) as u64 - self.tree[j])
    }

    fn add(&mut self, i: usize, delta: i64) {
        assert!(i < self.n, "index {i} out of bounds (n={})", self.n);
        // Two's complement makes wrapping_add correct for negative deltas.
        let delta = delta as u64;
        let mut idx = i + 1;
        while idx <= self.n {
            self.tree[idx] = self.tree[idx].wrapping_add(delta);
            idx += lowbit(idx);
        }
    }

    fn bit_count(&self) -> usize {
        std::mem::size_of::<Self>() * 8 + self.tree.len() * 64
    }

    /// Format: `n: u64`, then nodes `1..=n`.
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_u64(writer, self.n as u64)?;
        for &node in &self.tree[1..] {
            write_u64(writer, node)?;
        }
        Ok(())
    }

    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let n = read_len(reader)?;
        let mut tree = Vec::with_capacity(n.saturating_add(1).min(1 << 20));
        tree.push(0);
        for j in 1..=n {
            let node = read_u64(reader)?;
            if node > BOUND * lowbit(j) as u64 {
                return Err(Error::InvalidEncoding(format!(
                    "fenwick node {j} holds {node}, above its capacity"
                )));
            }
            tree.push(node);
        }
        Ok(Self { tree, n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix_sum::PrefixArray;

    fn naive_prefix(weights: &[u64], i: usize) -> u64 {
        weights[..i].iter().sum()
    }

    #[test]
    fn test_from_weights_matches_naive() {
        let weights: Vec<u64> = (0..37).map(|i| (i * 7 % 65) as u64).collect();
        let ft = FenwickTree::<64>::from_weights(&weights);
        assert_eq!(ft.len(), 37);
        for i in 0..=weights.len() {
            assert_eq!(ft.prefix(i), naive_prefix(&weights, i), "i={i}");
        }
    }

    #[test]
    fn test_empty() {
        let ft = FenwickTree::<64>::from_weights(&[]);
        assert!(ft.is_empty());
        assert_eq!(ft.total(), 0);
        assert_eq!(ft.find(0), (0, 0));
        assert_eq!(ft.comp_find(5), (0, 5));
    }

    #[test]
    fn test_find_agrees_with_prefix_array() {
        let weights: Vec<u64> = (0..50).map(|i| [0, 64, 3, 17, 0, 1][i % 6]).collect();
        let ft = FenwickTree::<64>::from_weights(&weights);
        let pa = PrefixArray::<64>::from_weights(&weights);
        let total = ft.total();
        let comp_total = 64 * weights.len() as u64 - total;
        for r in 0..=total {
            assert_eq!(ft.find(r), pa.find(r), "find({r})");
        }
        for r in 0..=comp_total {
            assert_eq!(ft.comp_find(r), pa.comp_find(r), "comp_find({r})");
        }
    }

    #[test]
    fn test_add_then_search() {
        let mut ft = FenwickTree::<64>::from_weights(&[64, 64, 64, 64, 64]);
        ft.add(2, -64);
        assert_eq!(ft.prefix(3), 128);
        assert_eq!(ft.total(), 256);
        // rank 128 skips the emptied chunk
        assert_eq!(ft.find(128), (3, 0));
        assert_eq!(ft.comp_find(0), (2, 0));
        assert_eq!(ft.comp_find(63), (2, 63));
        assert_eq!(ft.comp_find(64), (5, 0));
        ft.add(2, 1);
        assert_eq!(ft.find(128), (2, 0));
    }

    #[test]
    fn test_small_bound() {
        let ft = FenwickTree::<8>::from_weights(&[8, 2, 8]);
        // complement weights 0, 6, 0
        assert_eq!(ft.comp_find(0), (1, 0));
        assert_eq!(ft.comp_find(5), (1, 5));
        assert_eq!(ft.comp_find(6), (3, 0));
    }

    #[test]
    fn test_encode_decode() {
        let ft = FenwickTree::<64>::from_weights(&[1, 2, 3, 4, 5, 6, 7]);
        let mut out = Vec::new();
        ft.encode(&mut out).unwrap();
        assert_eq!(out.len(), 8 * 8);
        let back = FenwickTree::<64>::decode(&mut out.as_slice()).unwrap();
        assert_eq!(back, ft);
    }

    #[test]
    fn test_decode_truncated() {
        let ft = FenwickTree::<64>::from_weights(&[1, 2, 3]);
        let mut out = Vec::new();
        ft.encode(&mut out).unwrap();
        out.truncate(out.len() - 3);
        assert!(matches!(
            FenwickTree::<64>::decode(&mut out.as_slice()),
            Err(Error::Io(_))
        ));
    }
}
