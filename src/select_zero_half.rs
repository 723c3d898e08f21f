//! Static selection of zeros through a two-level inventory.
//!
//! # Layout
//!
//! Every 1024th zero is sampled. Each sample owns one inventory entry of five
//! words:
//! - Word 0: absolute position of the sampled zero (bit 63 flags a wide span)
//! - Words 1-4: the subinventory for the next 1024 zeros
//!
//! If the zeros of an entry span fewer than $2^{16}$ bits, the subinventory packs
//! sixteen 16-bit offsets (relative to word 0), one every 64 zeros. Otherwise it
//! holds four absolute positions, one every 256 zeros. A final sentinel word
//! stores the bit length.
//!
//! A query jumps straight to its entry, picks the nearest subinventory hint at or
//! below the requested rank, and finishes with a word-by-word scan of at most 64
//! zeros (256 in wide spans) using popcount and in-word select on complements.
//!
//! Space: five words per 1024 zeros, i.e. well under 1% of a balanced vector.

use crate::broadword::{low_mask, popcount, select_in_word, WORD_BITS};

const LOG2_ZEROS_PER_INVENTORY: usize = 10;
const ZEROS_PER_INVENTORY: usize = 1 << LOG2_ZEROS_PER_INVENTORY;
const ZEROS_PER_INVENTORY_MASK: usize = ZEROS_PER_INVENTORY - 1;
const LOG2_U64_PER_SUBINVENTORY: usize = 2;
const U64_PER_SUBINVENTORY: usize = 1 << LOG2_U64_PER_SUBINVENTORY;
const U64_PER_INVENTORY: usize = U64_PER_SUBINVENTORY + 1;
const LOG2_ZEROS_PER_SUB64: usize = LOG2_ZEROS_PER_INVENTORY - LOG2_U64_PER_SUBINVENTORY;
const ZEROS_PER_SUB64_MASK: usize = (1 << LOG2_ZEROS_PER_SUB64) - 1;
const LOG2_ZEROS_PER_SUB16: usize = LOG2_ZEROS_PER_SUB64 - 2;
const ZEROS_PER_SUB16_MASK: usize = (1 << LOG2_ZEROS_PER_SUB16) - 1;
const WIDE_SPAN: u64 = 1 << 63;

/// Select-zero over an immutable borrowed bit vector.
#[derive(Debug, Clone)]
pub struct SimpleSelectZeroHalf<'a> {
    bits: &'a [u64],
    num_bits: usize,
    num_words: usize,
    num_zeros: usize,
    inventory_size: usize,
    inventory: Vec<u64>,
}

/// Diagnostic breakdown of an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCounts {
    /// Length of the indexed vector in bits.
    pub num_bits: usize,
    /// Number of zeros in the vector.
    pub num_zeros: usize,
    /// Number of inventory entries (one per 1024 zeros).
    pub entries: usize,
    /// Entries whose span needed absolute 64-bit subinventory samples.
    pub wide_entries: usize,
    /// Words used by the inventory, sentinel included.
    pub inventory_words: usize,
}

impl std::fmt::Display for InventoryCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits_per_bit = if self.num_bits == 0 {
            0.0
        } else {
            (self.inventory_words * 64) as f64 / self.num_bits as f64
        };
        write!(
            f,
            "bits: {}, zeros: {}, entries: {} ({} wide), inventory: {} words ({:.4} bits/bit)",
            self.num_bits,
            self.num_zeros,
            self.entries,
            self.wide_entries,
            self.inventory_words,
            bits_per_bit
        )
    }
}

impl<'a> SimpleSelectZeroHalf<'a> {
    /// Build the inventory over the first `num_bits` bits of `bits`.
    ///
    /// `bits` must hold at least `ceil(num_bits / 64)` words and must not change
    /// while the inventory is alive, which the shared borrow enforces.
    pub fn new(bits: &'a [u64], num_bits: usize) -> Self {
        let num_words = num_bits.div_ceil(WORD_BITS);
        debug_assert!(bits.len() >= num_words);

        let mut sel = Self {
            bits,
            num_bits,
            num_words,
            num_zeros: 0,
            inventory_size: 0,
            inventory: Vec::new(),
        };

        // First phase: one entry for each ZEROS_PER_INVENTORY zeros.
        let mut curr_num_zeros = 0usize;
        let mut next_quantum = 0usize;
        for i in 0..num_words {
            let word = sel.zero_word(i);
            let zeros_in_word = popcount(word) as usize;
            while curr_num_zeros + zeros_in_word > next_quantum {
                let in_word = select_in_word(word, (next_quantum - curr_num_zeros) as u32);
                sel.inventory.push((i * WORD_BITS) as u64 + u64::from(in_word));
                sel.inventory
                    .resize(sel.inventory.len() + U64_PER_SUBINVENTORY, 0);
                next_quantum += ZEROS_PER_INVENTORY;
            }
            curr_num_zeros += zeros_in_word;
        }
        sel.num_zeros = curr_num_zeros;
        sel.inventory_size = curr_num_zeros.div_ceil(ZEROS_PER_INVENTORY);
        sel.inventory.push(num_bits as u64);
        debug_assert_eq!(
            sel.inventory.len(),
            sel.inventory_size * U64_PER_INVENTORY + 1
        );

        // Second phase: fill the subinventories.
        for entry in 0..sel.inventory_size {
            sel.fill_subinventory(entry);
        }

        log::debug!("built select-zero inventory: {}", sel.counts());
        sel
    }

    fn fill_subinventory(&mut self, entry: usize) {
        let base = entry * U64_PER_INVENTORY;
        let start = self.inventory[base] as usize;
        let end = self.inventory[base + U64_PER_INVENTORY] as usize;
        let wide = end - start > u16::MAX as usize;

        let (quantum, slots) = if wide {
            self.inventory[base] |= WIDE_SPAN;
            (1usize << LOG2_ZEROS_PER_SUB64, U64_PER_SUBINVENTORY)
        } else {
            (1usize << LOG2_ZEROS_PER_SUB16, U64_PER_SUBINVENTORY * 4)
        };

        let mut word_idx = start / WORD_BITS;
        let mut word = self.zero_word(word_idx) & !low_mask(start % WORD_BITS);
        let mut seen = 0usize;
        let mut slot = 0usize;
        loop {
            let zeros = popcount(word) as usize;
            while slot < slots && seen + zeros > slot * quantum {
                let in_word = select_in_word(word, (slot * quantum - seen) as u32) as usize;
                let pos = word_idx * WORD_BITS + in_word;
                if wide {
                    self.inventory[base + 1 + slot] = pos as u64;
                } else {
                    let offset = (pos - start) as u64;
                    self.inventory[base + 1 + slot / 4] |= offset << ((slot % 4) * 16);
                }
                slot += 1;
            }
            seen += zeros;
            word_idx += 1;
            if slot == slots || word_idx >= self.num_words {
                break;
            }
            word = self.zero_word(word_idx);
        }
    }

    /// Complement of word `i`, with padding past `num_bits` cleared.
    #[inline]
    fn zero_word(&self, i: usize) -> u64 {
        let word = !self.bits[i];
        let remaining = self.num_bits - i * WORD_BITS;
        if remaining < WORD_BITS {
            word & low_mask(remaining)
        } else {
            word
        }
    }

    /// Length of the indexed vector in bits.
    pub fn len(&self) -> usize {
        self.num_bits
    }

    /// Return true if the indexed vector has length 0.
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Number of zeros; valid ranks are `0..num_zeros()`.
    pub fn num_zeros(&self) -> usize {
        self.num_zeros
    }

    /// Position of the `rank`-th zero.
    ///
    /// `rank` must be below [`num_zeros`](Self::num_zeros); this is only
    /// checked in debug builds, otherwise the result is meaningless or the call
    /// panics.
    pub fn select_zero(&self, rank: usize) -> usize {
        let (word_idx, _, bit) = self.locate(rank);
        word_idx * WORD_BITS + bit
    }

    /// Positions of the `rank`-th zero and of the one after it.
    ///
    /// When `rank` is the last zero, the second position is `len()`.
    pub fn select_zero_next(&self, rank: usize) -> (usize, usize) {
        let (mut word_idx, word, bit) = self.locate(rank);
        let pos = word_idx * WORD_BITS + bit;

        let mut rest = if bit == WORD_BITS - 1 {
            0
        } else {
            word & (u64::MAX << (bit + 1))
        };
        while rest == 0 {
            word_idx += 1;
            if word_idx >= self.num_words {
                return (pos, self.num_bits);
            }
            rest = self.zero_word(word_idx);
        }
        (pos, word_idx * WORD_BITS + rest.trailing_zeros() as usize)
    }

    /// Returns the word index, the (masked) complemented word and the bit offset
    /// of the `rank`-th zero.
    fn locate(&self, rank: usize) -> (usize, u64, usize) {
        debug_assert!(
            rank < self.num_zeros,
            "rank {rank} out of range ({} zeros)",
            self.num_zeros
        );
        let base = (rank >> LOG2_ZEROS_PER_INVENTORY) * U64_PER_INVENTORY;
        let entry = self.inventory[base];
        let subrank = rank & ZEROS_PER_INVENTORY_MASK;

        let (hint, mut residual) = if entry & WIDE_SPAN != 0 {
            let sample = self.inventory[base + 1 + (subrank >> LOG2_ZEROS_PER_SUB64)];
            (sample as usize, subrank & ZEROS_PER_SUB64_MASK)
        } else {
            let slot = subrank >> LOG2_ZEROS_PER_SUB16;
            let packed = self.inventory[base + 1 + slot / 4];
            let offset = (packed >> ((slot % 4) * 16)) & 0xFFFF;
            (
                entry as usize + offset as usize,
                subrank & ZEROS_PER_SUB16_MASK,
            )
        };

        let mut word_idx = hint / WORD_BITS;
        let mut word = self.zero_word(word_idx) & !low_mask(hint % WORD_BITS);
        loop {
            let zeros = popcount(word) as usize;
            if residual < zeros {
                let bit = select_in_word(word, residual as u32) as usize;
                return (word_idx, word, bit);
            }
            residual -= zeros;
            word_idx += 1;
            word = self.zero_word(word_idx);
        }
    }

    /// Inventory statistics.
    pub fn counts(&self) -> InventoryCounts {
        let wide_entries = (0..self.inventory_size)
            .filter(|&e| self.inventory[e * U64_PER_INVENTORY] & WIDE_SPAN != 0)
            .count();
        InventoryCounts {
            num_bits: self.num_bits,
            num_zeros: self.num_zeros,
            entries: self.inventory_size,
            wide_entries,
            inventory_words: self.inventory.len(),
        }
    }

    /// Log the inventory statistics at info level.
    pub fn print_counts(&self) {
        log::info!("select-zero inventory: {}", self.counts());
    }

    /// Footprint in bits, excluding the borrowed vector.
    pub fn bit_count(&self) -> usize {
        std::mem::size_of::<Self>() * 8 + self.inventory.len() * 64
    }
}
