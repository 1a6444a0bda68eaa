//! RingFIFO - Bounded Lock-Free Single-Producer Single-Consumer Queue
//!
//! A fixed-capacity ring buffer for handing values between exactly two
//! threads, the building block of thread-per-stage pipelines (a socket reader
//! feeding a message handler feeding a response writer).
//!
//! # Key Features
//!
//! - Two monotonic cursors synchronized with Acquire/Release only (no locks, no CAS)
//! - Each side caches the other's cursor and refreshes it only on apparent full/empty
//! - Cursors live on separate cache lines (`crossbeam_utils::CachePadded`)
//! - Power-of-two capacity with masked slot indexing
//! - Injectable allocation strategy for the slot array ([`SlotAllocator`])
//! - Single-producer/single-consumer enforced by the type system via [`Fifo::split`]
//!
//! The queue never blocks. When an operation reports full or empty, the
//! caller chooses how to wait; [`retry`] and [`retry_forever`] wrap an
//! operation in a spin-then-yield [`Backoff`].
//!
//! # Example
//!
//! ```
//! use ringfifo_rs::{retry_forever, Backoff, Fifo};
//! use std::thread;
//!
//! let (mut producer, mut consumer) = Fifo::<u64>::new(1024).unwrap().split();
//!
//! let handle = thread::spawn(move || {
//!     for i in 0..10_000u64 {
//!         let backoff = Backoff::new();
//!         while !producer.try_push(i) {
//!             backoff.snooze();
//!         }
//!     }
//! });
//!
//! let mut expected = 0;
//! while expected < 10_000 {
//!     assert_eq!(retry_forever(|| consumer.pop()), expected);
//!     expected += 1;
//! }
//! handle.join().unwrap();
//! ```

mod alloc;
mod backoff;
mod config;
mod error;
mod fifo;
mod handle;
mod invariants;
mod local;
mod storage;
mod sync;

pub use alloc::{Global, SlotAllocator};
pub use backoff::{retry, retry_forever, Backoff};
pub use config::{Config, HIGH_THROUGHPUT_CONFIG, LOW_LATENCY_CONFIG};
pub use error::{AllocationError, PushError};
pub use fifo::Fifo;
pub use handle::{Consumer, Producer};
pub use local::LocalFifo;
