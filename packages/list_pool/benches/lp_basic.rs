//! Basic benchmarks for the `list_pool` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use criterion::{Criterion, criterion_group, criterion_main};
use list_pool::{Handle, ListPool};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;
const LIST_LENGTH: usize = 64;

fn filled(length: usize) -> (ListPool<TestItem>, Handle) {
    let mut pool = ListPool::new();
    let mut head = pool.new_list();

    for _ in 0..length {
        head = pool.push_front(TEST_VALUE, head).unwrap();
    }

    (pool, head)
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("lp_basic");

    group.bench_function("build_empty", |b| {
        b.iter(|| drop(black_box(ListPool::<TestItem>::new())));
    });

    group.bench_function("push_front_first", |b| {
        b.iter_custom(|iters| {
            let mut pools = iter::repeat_with(ListPool::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for pool in &mut pools {
                _ = black_box(pool.push_front(black_box(TEST_VALUE), Handle::SENTINEL));
            }

            start.elapsed()
        });
    });

    group.bench_function("push_front_recycled", |b| {
        let (mut pool, mut head) = filled(1);

        b.iter(|| {
            head = pool.free(head).unwrap();
            head = pool
                .push_front(black_box(TEST_VALUE), black_box(head))
                .unwrap();
        });
    });

    group.bench_function("push_back_64", |b| {
        let (mut pool, mut head) = filled(LIST_LENGTH);

        b.iter(|| {
            head = pool.push_back(black_box(TEST_VALUE), head).unwrap();
            // Removing the head keeps the length stable and frees a node for the next append.
            head = pool.free(head).unwrap();
        });
    });

    group.bench_function("free_list_64", |b| {
        b.iter_custom(|iters| {
            let mut lists = iter::repeat_with(|| filled(LIST_LENGTH))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for (pool, head) in &mut lists {
                _ = black_box(pool.free_list(*head));
            }

            start.elapsed()
        });
    });

    group.bench_function("iterate_64", |b| {
        let (pool, head) = filled(LIST_LENGTH);

        b.iter(|| black_box(pool.cursor(black_box(head)).sum::<TestItem>()));
    });

    group.finish();
}
