//! Query and mutation surfaces shared by the rank/select structures.
//!
//! Positions and ranks are 0-indexed. A "not found" answer is `None`.

/// Ranking over a bit sequence.
pub trait Rank {
    /// Number of set bits in `[0, pos)`.
    fn rank(&self, pos: usize) -> usize;

    /// Number of clear bits in `[0, pos)`.
    fn rank_zero(&self, pos: usize) -> usize {
        pos - self.rank(pos)
    }

    /// Number of set bits in `[from, to)`.
    fn rank_range(&self, from: usize, to: usize) -> usize {
        debug_assert!(from <= to);
        self.rank(to) - self.rank(from)
    }
}

/// Selection of set bits.
pub trait Select {
    /// Position of the `rank`-th set bit, or `None` if there are not enough set bits.
    fn select(&self, rank: usize) -> Option<usize>;
}

/// Selection of clear bits.
pub trait SelectZero {
    /// Position of the `rank`-th clear bit, or `None` if there are not enough clear bits.
    fn select_zero(&self, rank: usize) -> Option<usize>;
}

/// A bit vector whose bits can be flipped in place.
pub trait DynamicBitVector {
    /// Set the bit at `index`; returns true if it was already set.
    fn set(&mut self, index: usize) -> bool;

    /// Clear the bit at `index`; returns true if it was already clear.
    fn clear(&mut self, index: usize) -> bool;

    /// Flip the bit at `index`; returns true if it was set before the call.
    fn toggle(&mut self, index: usize) -> bool;
}
