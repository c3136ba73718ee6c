use core::hint::black_box;

use criterion::BatchSize;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use fks_set::FixedSet;
use hashbrown::HashSet as HashbrownSet;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

fn unique_keys(rng: &mut SmallRng, count: usize) -> Vec<i64> {
    let mut keys = HashbrownSet::with_capacity(count);
    while keys.len() < count {
        keys.insert(rng.random::<i64>());
    }
    keys.into_iter().collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &size in SIZES {
        let mut rng = SmallRng::seed_from_u64(0xF5);
        let keys = unique_keys(&mut rng, size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("fks_set/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| FixedSet::from_keys(keys),
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| keys.into_iter().collect::<HashbrownSet<i64>>(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for &size in SIZES {
        let mut rng = SmallRng::seed_from_u64(0xF5);
        let keys = unique_keys(&mut rng, size);

        let fks: FixedSet<i64> = FixedSet::from_keys(keys.iter().copied());
        let hashbrown: HashbrownSet<i64> = keys.iter().copied().collect();

        let mut hits = keys.clone();
        hits.shuffle(&mut rng);
        let misses: Vec<i64> = {
            let mut out = Vec::with_capacity(size);
            while out.len() < size {
                let key = rng.random::<i64>();
                if !hashbrown.contains(&key) {
                    out.push(key);
                }
            }
            out
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("fks_set/hit/{size}"), |b| {
            b.iter(|| {
                for &key in &hits {
                    black_box(fks.contains(black_box(key)));
                }
            })
        });
        group.bench_function(format!("hashbrown/hit/{size}"), |b| {
            b.iter(|| {
                for &key in &hits {
                    black_box(hashbrown.contains(black_box(&key)));
                }
            })
        });
        group.bench_function(format!("fks_set/miss/{size}"), |b| {
            b.iter(|| {
                for &key in &misses {
                    black_box(fks.contains(black_box(key)));
                }
            })
        });
        group.bench_function(format!("hashbrown/miss/{size}"), |b| {
            b.iter(|| {
                for &key in &misses {
                    black_box(hashbrown.contains(black_box(&key)));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
