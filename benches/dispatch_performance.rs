//! Performance benchmarks for hotswap-handler.
//!
//! Measures the cost the cell adds in front of a handler:
//! - Snapshot latency
//! - Dispatch overhead compared to calling the handler directly
//! - Snapshot throughput with concurrent readers
//! - Replacement latency while readers are running

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hotswap_handler::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

struct Router {
    routes: Vec<(String, u16)>,
}

impl Router {
    fn with_routes(n: usize) -> Self {
        Self {
            routes: (0..n).map(|i| (format!("/route/{}", i), 200)).collect(),
        }
    }
}

#[async_trait]
impl Handler<&'static str> for Router {
    type Response = u16;

    async fn handle(&self, path: &'static str) -> u16 {
        self.routes
            .iter()
            .find(|(route, _)| route == path)
            .map(|(_, status)| *status)
            .unwrap_or(404)
    }
}

/// Benchmark taking a snapshot of the current handler
fn benchmark_snapshot(c: &mut Criterion) {
    let cell = HandlerCell::new(Router::with_routes(8));

    let mut group = c.benchmark_group("snapshot");
    group.bench_function("current", |b| {
        b.iter(|| {
            let handler = cell.current();
            black_box(&handler.routes);
        });
    });
    group.finish();
}

/// Benchmark dispatch through the cell against calling the handler directly
fn benchmark_dispatch_overhead(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let direct = Router::with_routes(8);
    let cell = HandlerCell::new(Router::with_routes(8));

    let mut group = c.benchmark_group("dispatch_overhead");
    group.bench_function("direct", |b| {
        b.iter(|| black_box(runtime.block_on(direct.handle("/route/3"))));
    });
    group.bench_function("through_cell", |b| {
        b.iter(|| black_box(runtime.block_on(cell.dispatch("/route/3"))));
    });
    group.finish();
}

/// Benchmark concurrent snapshots with varying thread counts
fn benchmark_concurrent_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_snapshots");

    for num_threads in [1, 2, 4, 8, 16] {
        group.throughput(Throughput::Elements(num_threads as u64 * 1000));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_threads", num_threads)),
            &num_threads,
            |b, &num_threads| {
                let cell = HandlerCell::new(Router::with_routes(8));
                let barrier = Arc::new(Barrier::new(num_threads + 1));

                b.iter_custom(|iters| {
                    let mut handles = vec![];

                    for _ in 0..num_threads {
                        let cell = cell.clone();
                        let barrier = Arc::clone(&barrier);

                        handles.push(thread::spawn(move || {
                            barrier.wait();

                            let start = Instant::now();
                            for _ in 0..iters {
                                let handler = cell.current();
                                black_box(&handler.routes);
                            }
                            start.elapsed()
                        }));
                    }

                    barrier.wait();

                    let total: Duration = handles.into_iter().map(|h| h.join().unwrap()).sum();
                    total / num_threads as u32
                });
            },
        );
    }

    group.finish();
}

/// Benchmark replacement while 8 reader threads keep taking snapshots
fn benchmark_replace_under_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_under_load");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("replace_with_8_readers", |b| {
        b.iter_custom(|iters| {
            let cell = HandlerCell::new(Router::with_routes(8));
            let running = Arc::new(AtomicBool::new(true));

            let readers: Vec<_> = (0..8)
                .map(|_| {
                    let cell = cell.clone();
                    let running = Arc::clone(&running);
                    thread::spawn(move || {
                        while running.load(Ordering::Relaxed) {
                            black_box(cell.current());
                        }
                    })
                })
                .collect();

            let start = Instant::now();
            for i in 0..iters {
                cell.replace(Router::with_routes((i % 16) as usize + 1));
            }
            let duration = start.elapsed();

            running.store(false, Ordering::Relaxed);
            for reader in readers {
                reader.join().unwrap();
            }

            duration
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_snapshot,
    benchmark_dispatch_overhead,
    benchmark_concurrent_snapshots,
    benchmark_replace_under_load,
);

criterion_main!(benches);
