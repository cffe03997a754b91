use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rehash_dict::{Dict, Lcg32};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u32> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some((s >> 32) as u32)
    })
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert_fresh_100k");
    g.bench_function("dict", |b| {
        b.iter_batched(
            Dict::<u64>::new,
            |mut m| {
                for (i, k) in lcg(1).take(100_000).enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("dict_lcg", |b| {
        b.iter_batched(
            || Dict::<u64, Lcg32>::with_mixer(Lcg32),
            |mut m| {
                for (i, k) in lcg(1).take(100_000).enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("hashbrown", |b| {
        b.iter_batched(
            hashbrown::HashMap::<u32, u64>::new,
            |mut m| {
                for (i, k) in lcg(1).take(100_000).enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let keys: Vec<u32> = lcg(7).take(20_000).collect();
    let mut g = c.benchmark_group("get_hit");

    let d: Dict<u64> = keys.iter().enumerate().map(|(i, &k)| (k, i as u64)).collect();
    let mut it = keys.iter().cycle();
    g.bench_function("dict", |b| {
        b.iter(|| black_box(d.get(*it.next().unwrap())))
    });

    let h: hashbrown::HashMap<u32, u64> =
        keys.iter().enumerate().map(|(i, &k)| (k, i as u64)).collect();
    let mut it = keys.iter().cycle();
    g.bench_function("hashbrown", |b| {
        b.iter(|| black_box(h.get(it.next().unwrap())))
    });
    g.finish();
}

fn bench_get_miss(c: &mut Criterion) {
    let mut g = c.benchmark_group("get_miss");

    let d: Dict<u64> = lcg(11).take(10_000).map(|k| (k, 0)).collect();
    let mut miss = lcg(0xdead_beef);
    g.bench_function("dict", |b| {
        b.iter(|| black_box(d.contains_key(miss.next().unwrap())))
    });

    let h: hashbrown::HashMap<u32, u64> = lcg(11).take(10_000).map(|k| (k, 0)).collect();
    let mut miss = lcg(0xdead_beef);
    g.bench_function("hashbrown", |b| {
        b.iter(|| black_box(h.contains_key(&miss.next().unwrap())))
    });
    g.finish();
}

fn bench_iterate_10k(c: &mut Criterion) {
    let d: Dict<u64> = lcg(13).take(10_000).map(|k| (k, u64::from(k))).collect();
    c.bench_function("iterate_10k", |b| {
        b.iter(|| black_box(d.values().sum::<u64>()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_get_hit, bench_get_miss, bench_iterate_10k
}
criterion_main!(benches);
