//! Broadword primitives on a single 64-bit word.
//!
//! Everything above this module treats these two operations as $O(1)$ black boxes:
//! - [`popcount`]: number of set bits in a word.
//! - [`select_in_word`]: position of the $k$-th set bit in a word.

/// Number of bits in a word (the size of one chunk).
pub const WORD_BITS: usize = 64;

/// Population count of `word`.
#[inline(always)]
pub fn popcount(word: u64) -> u32 {
    word.count_ones()
}

/// Position (0..64) of the `rank`-th set bit (0-indexed) of `word`.
///
/// Undefined if `rank >= popcount(word)`: the portable path returns 64,
/// the BMI2 path returns 64 as well since `pdep` deposits nothing.
#[inline]
pub fn select_in_word(word: u64, rank: u32) -> u32 {
    debug_assert!(rank < 64);

    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: the bmi2 target feature is statically enabled.
        unsafe {
            let res = core::arch::x86_64::_pdep_u64(1u64 << rank, word);
            res.trailing_zeros()
        }
    }

    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        let mut val = word;
        let mut remaining = rank;
        loop {
            if val == 0 {
                return 64;
            }
            if remaining == 0 {
                return val.trailing_zeros();
            }
            remaining -= 1;
            val &= val - 1;
        }
    }
}

/// Mask keeping the low `bits` bits of a word (`bits` in 0..64).
#[inline(always)]
pub(crate) fn low_mask(bits: usize) -> u64 {
    debug_assert!(bits < WORD_BITS);
    (1u64 << bits).wrapping_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popcount() {
        assert_eq!(popcount(0), 0);
        assert_eq!(popcount(u64::MAX), 64);
        assert_eq!(popcount(0b1011), 3);
    }

    #[test]
    fn test_select_in_word_multiple() {
        let word = 0b1010_1010u64;
        assert_eq!(select_in_word(word, 0), 1);
        assert_eq!(select_in_word(word, 1), 3);
        assert_eq!(select_in_word(word, 2), 5);
        assert_eq!(select_in_word(word, 3), 7);
    }

    #[test]
    fn test_select_in_word_all_ones() {
        for k in 0..64 {
            assert_eq!(select_in_word(u64::MAX, k), k);
        }
        assert_eq!(select_in_word(1 << 63, 0), 63);
    }

    #[test]
    fn test_select_in_word_complement() {
        // zeros of 0b0111 live at 3, 4, 5, ...
        let word = !0b0111u64;
        assert_eq!(select_in_word(word, 0), 3);
        assert_eq!(select_in_word(word, 60), 63);
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(3), 0b111);
        assert_eq!(low_mask(63), u64::MAX >> 1);
    }
}
