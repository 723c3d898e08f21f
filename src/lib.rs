//! # Dynamic Rank/Select
//!
//! *Rank and select over a bit vector you can still write to.*
//!
//! ## Intuition First
//!
//! Think of a long row of light switches. `rank(i)` asks "how many switches
//! before `i` are on?", and `select(k)` asks "where is the `k`-th switch that is
//! on?". Counting by walking the row works, but takes time proportional to its
//! length.
//!
//! Group the switches into panels of 64 and write the number of "on" switches
//! on each panel. Now a question only needs the panel totals plus one panel's
//! worth of counting. If the totals live in a tree of running sums, flipping a
//! switch only touches $O(\log n)$ of them, so queries stay fast while the row
//! keeps changing.
//!
//! ## The Problem
//!
//! Most succinct bit vectors are static: their auxiliary tables are built once
//! and a single flipped bit invalidates them. Rebuilding costs $O(n)$.
//! Classic dynamic bit vectors (balanced trees of leaves) support insertion but
//! pay pointers and cache misses for it.
//!
//! When the length is fixed and only bit *values* change, a much lighter design
//! works: keep the raw words where they are and maintain one searchable
//! prefix-sum aggregate over the per-word population counts.
//!
//! ## Historical Context
//!
//! ```text
//! 1989  Jacobson    Rank/select on bit vectors; the succinct paradigm
//! 1994  Fenwick     Binary indexed trees for cumulative frequency tables
//! 2008  Vigna       Broadword rank/select (rank9, select9, simple select)
//! 2019  Marchini    Searchable prefix sums as the engine for dynamic rank/select
//! ```
//!
//! ## Mathematical Formulation
//!
//! For a bit vector $B[0, n)$ split into words $W_0, \dots, W_{m-1}$ with
//! $m = \lceil n / 64 \rceil$ and weights $w_j = \mathrm{popcount}(W_j)$:
//!
//! - $\mathrm{rank}(p) = \sum_{j < \lfloor p/64 \rfloor} w_j
//!   + \mathrm{popcount}(W_{\lfloor p/64 \rfloor} \bmod 2^{p \bmod 64})$
//! - $\mathrm{select}(k)$: find $j$ with $\sum_{i<j} w_i \le k < \sum_{i \le j} w_i$,
//!   then select the $(k - \sum_{i<j} w_i)$-th one inside $W_j$.
//! - $\mathrm{select_0}$ is the same over $64 - w_j$ and $\lnot W_j$.
//!
//! ## Complexity Analysis
//!
//! | Structure | Query | Update | Extra space |
//! |-----------|-------|--------|-------------|
//! | [`WordDynRankSel`] + [`FenwickTree`] | $O(\log m)$ | $O(\log m)$ | $64m$ bits |
//! | [`WordDynRankSel`] + [`PrefixArray`] | $O(1)$ rank, $O(\log m)$ select | $O(m)$ | $64(m+1)$ bits |
//! | [`SimpleSelectZeroHalf`] | $O(1)$ + short scan | static | ~5 words per 1024 zeros |
//!
//! ## What Could Go Wrong
//!
//! 1. **Aliasing**: the structures *borrow* the caller's words. The engine holds
//!    a mutable borrow so every write goes through it; the inventory holds a
//!    shared borrow so nothing can write at all while it lives.
//! 2. **Padding bits**: bits past the logical length in the last word are never
//!    reported by `select`/`select_zero`.
//! 3. **Out-of-range ranks**: the engine answers `None`; the static inventory
//!    requires `rank < num_zeros()` and only checks it in debug builds.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **[`WordDynRankSel`]**: mutable rank/select over any [`SearchablePrefixSums`].
//! - **[`FenwickTree`]** / **[`PrefixArray`]**: two interchangeable aggregates.
//! - **[`SimpleSelectZeroHalf`]**: static select-zero via a sampled inventory.
//! - **[`ImplicitBitVector`]**: the linear-scan baseline.
//!
//! ## References
//!
//! - Jacobson, G. (1989). "Space-efficient Static Trees and Graphs."
//! - Fenwick, P. M. (1994). "A New Data Structure for Cumulative Frequency Tables."
//! - Vigna, S. (2008). "Broadword Implementation of Rank/Select Queries."
//! - Marchini, S., & Vigna, S. (2020). "Compact Fenwick trees for dynamic ranking and selection."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod broadword;
mod codec;
pub mod dyn_rank_sel;
pub mod error;
pub mod fenwick;
pub mod implicit;
pub mod prefix_sum;
pub mod select_zero_half;
pub mod traits;

pub use dyn_rank_sel::WordDynRankSel;
pub use error::Error;
pub use fenwick::FenwickTree;
pub use implicit::ImplicitBitVector;
pub use prefix_sum::{PrefixArray, SearchablePrefixSums};
pub use select_zero_half::{InventoryCounts, SimpleSelectZeroHalf};
pub use traits::{DynamicBitVector, Rank, Select, SelectZero};
