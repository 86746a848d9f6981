//! Tree Heap Benchmarks
//!
//! Measures the three phases of the heap separately and end to end, against
//! `std::collections::BinaryHeap` wrapped in `Reverse` as an array-backed
//! baseline.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench tree_heap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tree_heap::TreeHeap;

// ============================================================================
// Simple PRNG for reproducible benchmarks
// ============================================================================

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }
}

fn random_values(n: usize) -> Vec<u64> {
    let mut rng = Lcg::new(42);
    (0..n).map(|_| rng.next() >> 16).collect()
}

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        let values = random_values(n);
        group.bench_with_input(BenchmarkId::new("TreeHeap", n), &values, |b, values| {
            b.iter(|| {
                let mut heap = TreeHeap::new();
                for &v in values {
                    heap.insert(v).unwrap();
                }
                black_box(heap.size())
            })
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in SIZES {
        let values = random_values(n);
        group.bench_with_input(BenchmarkId::new("TreeHeap", n), &values, |b, values| {
            b.iter_batched(
                || values.iter().copied().collect::<TreeHeap<u64>>(),
                |mut heap| {
                    heap.build().unwrap();
                    heap
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("BinaryHeap", n), &values, |b, values| {
            b.iter_batched(
                || values.iter().copied().map(Reverse).collect::<Vec<_>>(),
                |vec| BinaryHeap::from(vec),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    for n in SIZES {
        let values = random_values(n);
        group.bench_with_input(BenchmarkId::new("TreeHeap", n), &values, |b, values| {
            b.iter_batched(
                || TreeHeap::from_values(values.iter().copied()),
                |mut heap| {
                    let mut sum = 0u64;
                    while let Ok(v) = heap.extract() {
                        sum = sum.wrapping_add(v);
                    }
                    black_box(sum)
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("BinaryHeap", n), &values, |b, values| {
            b.iter_batched(
                || values.iter().copied().map(Reverse).collect::<BinaryHeap<_>>(),
                |mut heap| {
                    let mut sum = 0u64;
                    while let Some(Reverse(v)) = heap.pop() {
                        sum = sum.wrapping_add(v);
                    }
                    black_box(sum)
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_build, bench_drain);
criterion_main!(benches);
