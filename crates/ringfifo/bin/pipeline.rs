//! Three-stage thread pipeline over two SPSC queues.
//!
//! reader ──▶ handler ──▶ writer
//!
//! The reader stands in for a socket-reading thread, the handler turns each
//! request into a response, and the writer stands in for the thread writing
//! responses back out. Afterwards a single-thread push/pop loop measures raw
//! per-operation cost of `Fifo` against the plain-cursor `LocalFifo`.
//!
//! Run with: `cargo run --release --features demo --bin pipeline`
//! Set `RUST_LOG=ringfifo_rs=trace` to see queue allocation/drop events.

use ringfifo_rs::{retry_forever, Consumer, Fifo, LocalFifo, Producer, LOW_LATENCY_CONFIG};
use std::thread;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const REQUESTS: u64 = 1_000_000;
const PING_PONG_OPS: u64 = 1_000_000;

enum Request {
    Data { id: u64, payload: [u8; 16] },
    Shutdown,
}

enum Response {
    Ack { id: u64, checksum: u32 },
    Shutdown,
}

/// Push with the caller-side wait policy: spin, then yield, forever.
fn send<T>(tx: &mut Producer<T>, value: T) {
    let mut pending = Some(value);
    retry_forever(|| match tx.push(pending.take()?) {
        Ok(()) => Some(()),
        Err(err) => {
            pending = Some(err.into_inner());
            None
        }
    });
}

fn recv<T>(rx: &mut Consumer<T>) -> T {
    retry_forever(|| rx.pop())
}

fn run_pipeline() {
    let (mut requests_tx, mut requests_rx) = Fifo::<Request>::with_config(LOW_LATENCY_CONFIG)
        .expect("request queue")
        .split();
    let (mut responses_tx, mut responses_rx) = Fifo::<Response>::with_config(LOW_LATENCY_CONFIG)
        .expect("response queue")
        .split();

    println!("Pipeline");
    println!("  Queue capacity: {} slots", requests_tx.capacity());
    println!("  Requests: {}\n", REQUESTS);

    let start = Instant::now();

    let reader = thread::spawn(move || {
        for id in 0..REQUESTS {
            let mut payload = [0u8; 16];
            payload[..8].copy_from_slice(&id.to_le_bytes());
            send(&mut requests_tx, Request::Data { id, payload });
        }
        send(&mut requests_tx, Request::Shutdown);
    });

    let handler = thread::spawn(move || loop {
        match recv(&mut requests_rx) {
            Request::Data { id, payload } => {
                let checksum = payload.iter().map(|&b| u32::from(b)).sum();
                send(&mut responses_tx, Response::Ack { id, checksum });
            }
            Request::Shutdown => {
                send(&mut responses_tx, Response::Shutdown);
                break;
            }
        }
    });

    let writer = thread::spawn(move || {
        let mut acked = 0u64;
        let mut total_checksum = 0u64;
        loop {
            match recv(&mut responses_rx) {
                Response::Ack { id, checksum } => {
                    assert_eq!(id, acked, "response out of order");
                    acked += 1;
                    total_checksum += u64::from(checksum);
                }
                Response::Shutdown => break,
            }
        }
        (acked, total_checksum)
    });

    reader.join().expect("reader thread panicked");
    handler.join().expect("handler thread panicked");
    let (acked, total_checksum) = writer.join().expect("writer thread panicked");

    let elapsed = start.elapsed();
    tracing::info!(acked, total_checksum, "pipeline drained");

    println!("  Acknowledged: {}", acked);
    println!("  Time: {:.3}s", elapsed.as_secs_f64());
    println!(
        "  Throughput: {:.2} M requests/sec\n",
        acked as f64 / elapsed.as_secs_f64() / 1e6
    );
}

fn run_ping_pong() {
    println!("Single-thread push/pop (capacity 1024, N = {})", PING_PONG_OPS);

    let mut fifo = Fifo::<u64>::new(1024).expect("fifo");
    let start = Instant::now();
    let mut value = 0u64;
    for i in 0..PING_PONG_OPS {
        while fifo.is_full() {}
        fifo.try_push(i);
        while fifo.is_empty() {}
        fifo.try_pop(&mut value);
    }
    let atomic = start.elapsed();
    assert_eq!(value, PING_PONG_OPS - 1);

    let mut local = LocalFifo::<u64>::new(1024).expect("local fifo");
    let start = Instant::now();
    for i in 0..PING_PONG_OPS {
        local.try_push(i);
        local.try_pop(&mut value);
    }
    let plain = start.elapsed();

    println!("{:<12} {:>10} {:>16}", "Queue", "Time (s)", "Ops/sec");
    for (name, elapsed) in [("Fifo", atomic), ("LocalFifo", plain)] {
        println!(
            "{:<12} {:>10.4} {:>16.0}",
            name,
            elapsed.as_secs_f64(),
            PING_PONG_OPS as f64 / elapsed.as_secs_f64()
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ringfifo_rs=debug,pipeline=info")),
        )
        .with_thread_names(true)
        .init();

    println!("RingFIFO Pipeline Demo");
    println!("======================\n");

    run_pipeline();
    run_ping_pong();
}
