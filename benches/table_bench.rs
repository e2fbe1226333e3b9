use byte_table::Table;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> Vec<u8> {
    format!("k{:016x}", n).into_bytes()
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("table_insert_10k", |b| {
        b.iter_batched(
            Table::<u64>::new,
            |t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.insert(key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_read_hit(c: &mut Criterion) {
    c.bench_function("table_read_hit", |b| {
        let t: Table<u64> = Table::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.read(k).unwrap());
        })
    });
}

fn bench_read_miss(c: &mut Criterion) {
    c.bench_function("table_read_miss", |b| {
        let t: Table<u64> = Table::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.insert(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the table
            let k = key(miss.next().unwrap());
            black_box(t.read(&k));
        })
    });
}

fn bench_extract_reinsert(c: &mut Criterion) {
    c.bench_function("table_extract_reinsert", |b| {
        let t: Table<u64> = Table::new();
        let keys: Vec<_> = lcg(23).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.extract(k).unwrap();
            t.insert(k.clone(), v);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    c.bench_function("table_snapshot_1k", |b| {
        let t: Table<u64> = Table::new();
        for (i, x) in lcg(31).take(1_000).enumerate() {
            t.insert(key(x), i as u64);
        }
        b.iter(|| black_box(t.snapshot()))
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
    targets = bench_insert, bench_read_hit, bench_read_miss, bench_extract_reinsert, bench_snapshot
}
criterion_main!(benches);
