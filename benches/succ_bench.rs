use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dynsel::{ImplicitBitVector, PrefixArray, SimpleSelectZeroHalf, WordDynRankSel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const NUM_WORDS: usize = 1 << 14;
const NUM_BITS: usize = NUM_WORDS * 64;

fn random_words(seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..NUM_WORDS).map(|_| rng.gen()).collect()
}

fn random_positions(seed: u64, bound: usize, n: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..bound)).collect()
}

fn bench_dyn_rank_sel(c: &mut Criterion) {
    let mut group = c.benchmark_group("dyn_rank_sel");
    let mut words = random_words(1);
    let mut rs: WordDynRankSel = WordDynRankSel::new(&mut words, NUM_BITS);
    let ones = rs.count_ones();
    let zeros = rs.count_zeros();
    let positions = random_positions(2, NUM_BITS, 4096);
    let one_ranks = random_positions(3, ones, 4096);
    let zero_ranks = random_positions(4, zeros, 4096);

    group.bench_function("rank", |b| {
        b.iter(|| {
            for &p in &positions {
                black_box(rs.rank(p));
            }
        })
    });

    group.bench_function("select", |b| {
        b.iter(|| {
            for &k in &one_ranks {
                black_box(rs.select(k));
            }
        })
    });

    group.bench_function("select_zero", |b| {
        b.iter(|| {
            for &k in &zero_ranks {
                black_box(rs.select_zero(k));
            }
        })
    });

    group.bench_function("toggle", |b| {
        b.iter(|| {
            for &p in &positions {
                black_box(rs.toggle(p));
            }
        })
    });

    group.finish();
}

fn bench_prefix_array_backend(c: &mut Criterion) {
    let mut group = c.benchmark_group("dyn_rank_sel_prefix_array");
    let mut words = random_words(1);
    let rs = WordDynRankSel::<PrefixArray>::new(&mut words, NUM_BITS);
    let positions = random_positions(2, NUM_BITS, 4096);
    let one_ranks = random_positions(3, rs.count_ones(), 4096);

    group.bench_function("rank", |b| {
        b.iter(|| {
            for &p in &positions {
                black_box(rs.rank(p));
            }
        })
    });

    group.bench_function("select", |b| {
        b.iter(|| {
            for &k in &one_ranks {
                black_box(rs.select(k));
            }
        })
    });

    group.finish();
}

fn bench_select_zero_half(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_zero_half");
    let words = random_words(5);
    let sel = SimpleSelectZeroHalf::new(&words, NUM_BITS);
    let implicit = ImplicitBitVector::new(&words, NUM_BITS);
    let ranks = random_positions(6, sel.num_zeros() - 1, 4096);

    group.bench_function("build", |b| {
        b.iter(|| black_box(SimpleSelectZeroHalf::new(&words, NUM_BITS)))
    });

    group.bench_function("select_zero", |b| {
        b.iter(|| {
            for &k in &ranks {
                black_box(sel.select_zero(k));
            }
        })
    });

    group.bench_function("select_zero_next", |b| {
        b.iter(|| {
            for &k in &ranks {
                black_box(sel.select_zero_next(k));
            }
        })
    });

    group.bench_function("implicit_select_zero", |b| {
        b.iter(|| {
            for &k in &ranks[..64] {
                black_box(implicit.select_zero(k));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dyn_rank_sel,
    bench_prefix_array_backend,
    bench_select_zero_half
);
criterion_main!(benches);
