#![no_main]
use dynsel::{ImplicitBitVector, SimpleSelectZeroHalf};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u64>, usize, usize)| {
    let (bits, len_raw, rank_raw) = data;
    if bits.is_empty() {
        return;
    }

    let len = len_raw % (bits.len() * 64) + 1;
    let sel = SimpleSelectZeroHalf::new(&bits, len);
    let truth = ImplicitBitVector::new(&bits, len);

    let zeros = len - truth.count_ones();
    assert_eq!(sel.num_zeros(), zeros);
    if zeros == 0 {
        return;
    }

    let k = rank_raw % zeros;
    let (pos, next) = sel.select_zero_next(k);
    assert_eq!(Some(pos), truth.select_zero(k));
    assert_eq!(next, truth.select_zero(k + 1).unwrap_or(len));
});
