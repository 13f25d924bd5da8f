use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use futures::future::join_all;
use snowgen::{Generator, IdGenStatus, MonotonicClock, TimeSource, TokioSleep, hash_label};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};
use tokio::runtime::Builder;

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Hot path: one fresh millisecond, every poll is `Ready`.
fn benchmark_mock_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("mock/sequential");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = Generator::from_components(0, 1, 2, 0, FixedMockTime { millis: 1 });
                for _ in 0..TOTAL_IDS {
                    match generator.poll_id() {
                        IdGenStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdGenStatus::Pending { .. } => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Shared generator across threads on a fixed clock; measures lock contention
/// alone.
fn benchmark_mock_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("mock/contended");

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator =
                            Generator::from_components(0, 1, 2, 0, FixedMockTime { millis: 1 });
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = &generator;
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        match generator.poll_id() {
                                            IdGenStatus::Ready { id } => {
                                                black_box(id);
                                            }
                                            IdGenStatus::Pending { .. } => unreachable!(),
                                        }
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

/// Blocking `next_id` on the monotonic clock, including waits on exhaustion.
fn benchmark_mono_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("mono/sequential");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = Generator::with_clock("dc1", "server1", MonotonicClock::default());
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id());
            }
        });
    });

    group.finish();
}

fn benchmark_mono_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("mono/threaded");

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;
        let generator = Generator::with_clock("dc1", "server1", MonotonicClock::default());

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter(|| {
                    scope(|s| {
                        for _ in 0..thread_count {
                            let generator = &generator;
                            s.spawn(move || {
                                for _ in 0..ids_per_thread {
                                    black_box(generator.next_id());
                                }
                            });
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

/// Many tokio tasks sharing one generator, yielding on exhaustion.
fn benchmark_mono_tokio(c: &mut Criterion) {
    let mut group = c.benchmark_group("mono/tokio");
    group.sample_size(10);
    group.sampling_mode(criterion::SamplingMode::Flat);

    let total_ids = TOTAL_IDS * 256;

    for num_tasks in [1, 2, 4, 8, 16, 32, 64] {
        let ids_per_task = total_ids / num_tasks;

        group.throughput(Throughput::Elements(total_ids as u64));
        group.bench_function(format!("elems/{total_ids}/tasks/{num_tasks}"), |b| {
            let rt = Builder::new_multi_thread().enable_all().build().unwrap();

            b.to_async(&rt).iter_custom(move |iters| async move {
                let generator = Generator::with_clock("dc1", "server1", MonotonicClock::default());
                let start = Instant::now();

                for _ in 0..iters {
                    let tasks: Vec<_> = (0..num_tasks)
                        .map(|_| {
                            let generator = generator.clone();
                            tokio::spawn(async move {
                                for _ in 0..ids_per_task {
                                    black_box(generator.next_id_async::<TokioSleep>().await);
                                }
                            })
                        })
                        .collect();

                    for result in join_all(tasks).await {
                        result.unwrap();
                    }
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

fn benchmark_hash_label(c: &mut Criterion) {
    c.bench_function("label/hash", |b| {
        b.iter(|| hash_label(black_box("eu-west-1.api-7.internal")));
    });
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential,
    benchmark_mock_contended,
    // Monotonic clock (waits on exhaustion)
    benchmark_mono_sequential,
    benchmark_mono_threaded,
    // Async
    benchmark_mono_tokio,
    // Labels
    benchmark_hash_label,
);
criterion_main!(benches);
