#![no_main]
use dynsel::{ImplicitBitVector, WordDynRankSel};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u64>, usize, Vec<(u8, usize, u64)>)| {
    let (bits, len_raw, ops) = data;
    if bits.is_empty() || bits.len() > 1024 {
        return;
    }

    let len = len_raw % (bits.len() * 64) + 1;
    let mut shadow = bits.clone();
    let mut words = bits;
    let mut rs: WordDynRankSel = WordDynRankSel::new(&mut words, len);

    for (kind, idx, word) in ops {
        let i = idx % len;
        let mask = 1u64 << (i % 64);
        match kind % 4 {
            0 => {
                let was = shadow[i / 64] & mask != 0;
                shadow[i / 64] |= mask;
                assert_eq!(rs.set(i), was);
            }
            1 => {
                let was = shadow[i / 64] & mask != 0;
                shadow[i / 64] &= !mask;
                assert_eq!(rs.clear(i), !was);
            }
            2 => {
                let was = shadow[i / 64] & mask != 0;
                shadow[i / 64] ^= mask;
                assert_eq!(rs.toggle(i), was);
            }
            _ => {
                let w = i / 64;
                assert_eq!(rs.update(w, word), shadow[w]);
                shadow[w] = word;
            }
        }
    }

    let truth = ImplicitBitVector::new(&shadow, len);
    let ones = truth.count_ones();
    assert_eq!(rs.rank(len), ones);

    let k = len_raw % (ones + 1);
    match rs.select(k) {
        Some(pos) => {
            assert!(pos < len);
            assert_eq!(rs.rank(pos), k);
            assert_eq!(rs.rank(pos + 1), k + 1);
        }
        None => assert_eq!(k, ones),
    }

    let zeros = len - ones;
    let k = len_raw % (zeros + 1);
    assert_eq!(rs.select_zero(k), truth.select_zero(k));
});
