//! Benchmarks for tarkv store operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tarkv::Store;
use tempfile::TempDir;

fn store_benchmarks(c: &mut Criterion) {
    let value = vec![0xABu8; 1024];

    c.bench_function("write_1kb", |b| {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("bench.tar")).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            store.write(&format!("key{}", i), &value).unwrap();
            i += 1;
        });
    });

    c.bench_function("read_1kb", |b| {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("bench.tar")).unwrap();
        for i in 0..1000 {
            store.write(&format!("key{}", i), &value).unwrap();
        }
        let mut i = 0u64;
        b.iter(|| {
            store.read(&format!("key{}", i % 1000)).unwrap();
            i += 1;
        });
    });

    c.bench_function("open_1000_records", |b| {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bench.tar");
        let store = Store::open(&path).unwrap();
        for i in 0..1000 {
            store.write(&format!("key{}", i), &value).unwrap();
        }
        store.close().unwrap();

        b.iter_batched(
            || path.clone(),
            |path| Store::open(path).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
