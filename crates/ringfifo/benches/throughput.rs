use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ringfifo_rs::{Fifo, LocalFifo};
use std::thread;

const MESSAGES: u64 = 1_000_000;

fn bench_spsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc");
    group.throughput(Throughput::Elements(MESSAGES));

    for capacity in [64usize, 1024, 65536] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let (mut producer, mut consumer) =
                        Fifo::<u64>::new(capacity).unwrap().split();

                    // Producer thread
                    let producer_handle = thread::spawn(move || {
                        for i in 0..MESSAGES {
                            while !producer.try_push(i) {
                                std::hint::spin_loop();
                            }
                        }
                    });

                    // Consumer on the bench thread
                    let mut count = 0u64;
                    while count < MESSAGES {
                        match consumer.pop() {
                            Some(v) => {
                                black_box(v);
                                count += 1;
                            }
                            None => std::hint::spin_loop(),
                        }
                    }

                    producer_handle.join().unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Push one, pop one on a single thread: the atomic queue against the
/// plain-cursor baseline.
fn bench_ping_pong(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread_ping_pong");
    group.throughput(Throughput::Elements(MESSAGES));

    group.bench_function("fifo", |b| {
        let mut fifo = Fifo::<u64>::new(1024).unwrap();
        b.iter(|| {
            for i in 0..MESSAGES {
                fifo.try_push(i);
                black_box(fifo.pop());
            }
        });
    });

    group.bench_function("local_fifo", |b| {
        let mut fifo = LocalFifo::<u64>::new(1024).unwrap();
        b.iter(|| {
            for i in 0..MESSAGES {
                fifo.try_push(i);
                black_box(fifo.pop());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_spsc, bench_ping_pong);
criterion_main!(benches);
