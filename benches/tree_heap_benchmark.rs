use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tripod_heap::{BrandedTreeHeap, GhostToken};

fn bench_tree_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_heap");

    for size in [100u32, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("std_binary_heap_push", size), &size, |b, &n| {
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                for i in 0..n {
                    heap.push(Reverse(black_box(i.wrapping_mul(2_654_435_761))));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("branded_tree_heap_push", size), &size, |b, &n| {
            b.iter(|| {
                GhostToken::new(|mut token| {
                    let mut heap = BrandedTreeHeap::with_capacity(n as usize);
                    for i in 0..n {
                        heap.push(&mut token, black_box(i.wrapping_mul(2_654_435_761)))
                            .unwrap();
                    }
                });
            });
        });

        // Push and pop together: the token scope has to live inside the timed loop.
        group.bench_with_input(BenchmarkId::new("std_binary_heap_push_pop", size), &size, |b, &n| {
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                for i in 0..n {
                    heap.push(Reverse(i.wrapping_mul(2_654_435_761)));
                }
                while let Some(x) = heap.pop() {
                    black_box(x);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("branded_tree_heap_push_pop", size), &size, |b, &n| {
            b.iter(|| {
                GhostToken::new(|mut token| {
                    let mut heap = BrandedTreeHeap::with_capacity(n as usize);
                    for i in 0..n {
                        heap.push(&mut token, i.wrapping_mul(2_654_435_761)).unwrap();
                    }
                    while let Some(x) = heap.pop(&mut token).unwrap() {
                        black_box(x);
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_heap);
criterion_main!(benches);
