use chained_hash_table::{Cursor, HashMap as ChainMap, HashMultiMap};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// 10k pseudo-random indices into 0..n.
fn picks(n: usize) -> Vec<usize> {
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..10_000)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            (s as usize) % n
        })
        .collect()
}

fn bench_insert_100k(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert_fresh_100k");
    g.bench_function("chained", |b| {
        b.iter_batched(
            ChainMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("std", |b| {
        b.iter_batched(
            std::collections::HashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("hashbrown", |b| {
        b.iter_batched(
            hashbrown::HashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

fn bench_insert_reserved_100k(c: &mut Criterion) {
    c.bench_function("chained::insert_reserved_100k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainMap::<String, u64>::new();
                m.reserve(100_000);
                m
            },
            |mut m| {
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_multi_insert_duplicates(c: &mut Criterion) {
    c.bench_function("chained::multi_insert_100k_over_1k_keys", |b| {
        b.iter_batched(
            HashMultiMap::<u64, u64>::new,
            |mut m| {
                for (i, x) in lcg(4).take(100_000).enumerate() {
                    m.insert(x % 1_000, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(7).take(100_000).map(key).collect();
    let queries: Vec<String> = picks(keys.len()).into_iter().map(|i| keys[i].clone()).collect();

    let mut g = c.benchmark_group("find_hit_10k_on_100k");
    let chained: ChainMap<String, u64> = keys.iter().cloned().zip(0..).collect();
    g.bench_function("chained", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(chained.find(k.as_str()));
            }
        })
    });
    let std_map: std::collections::HashMap<String, u64> = keys.iter().cloned().zip(0..).collect();
    g.bench_function("std", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(std_map.get(k.as_str()));
            }
        })
    });
    let brown: hashbrown::HashMap<String, u64> = keys.iter().cloned().zip(0..).collect();
    g.bench_function("hashbrown", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(brown.get(k.as_str()));
            }
        })
    });
    g.finish();
}

fn bench_find_miss_10k(c: &mut Criterion) {
    let chained: ChainMap<String, u64> = lcg(11).take(100_000).map(key).zip(0..).collect();
    let misses: Vec<String> = lcg(0xdead_beef).take(10_000).map(key).collect();
    c.bench_function("chained::find_miss_10k_on_100k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(chained.find(k.as_str()));
            }
        })
    });
}

fn bench_erase_random_10k(c: &mut Criterion) {
    c.bench_function("chained::erase_cursor_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainMap::new();
                let cursors: Vec<Cursor> = lcg(5)
                    .take(110_000)
                    .enumerate()
                    .map(|(i, x)| m.insert(key(x), i as u64))
                    .collect();
                // Duplicated picks just erase nothing the second time.
                let doomed: Vec<Cursor> = picks(cursors.len()).into_iter().map(|i| cursors[i]).collect();
                (m, doomed)
            },
            |(mut m, doomed)| {
                for c in doomed {
                    m.erase(c);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate_100k(c: &mut Criterion) {
    let chained: ChainMap<String, u64> = lcg(999).take(100_000).map(key).zip(0..).collect();
    let mut g = c.benchmark_group("iter_all_100k");
    g.bench_function("chained_iter", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in chained.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
    g.bench_function("chained_cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut c = chained.begin();
            while let Some(v) = chained.value(c) {
                sum = sum.wrapping_add(*v);
                c.move_next(&chained);
            }
            black_box(sum)
        })
    });
    let std_map: std::collections::HashMap<String, u64> =
        lcg(999).take(100_000).map(key).zip(0..).collect();
    g.bench_function("std", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for v in std_map.values() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
    g.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_100k, bench_insert_reserved_100k, bench_multi_insert_duplicates
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_find_hit_10k,
              bench_find_miss_10k,
              bench_erase_random_10k,
              bench_iterate_100k
}
criterion_main!(benches_insert, benches_ops);
