//! Miri-compatible tests for detecting undefined behavior.
//!
//! Run with: `cargo +nightly miri test --test miri_tests`
//!
//! Small capacities and short loops keep the interpreter fast while still
//! driving every unsafe path: uninitialized slot writes, moves out of slots,
//! wrap-around, drop of leftovers, zero-sized types and custom allocators.

#![cfg(not(feature = "loom"))]

use ringfifo_rs::{Fifo, LocalFifo};
use std::thread;

/// Fill and drain several times so slot addresses wrap.
#[test]
fn miri_fifo_wrap_around() {
    let mut fifo = Fifo::<u32>::new(4).unwrap();

    for round in 0..3 {
        for i in 0..4 {
            assert!(fifo.try_push(round * 10 + i), "push failed at round {} item {}", round, i);
        }
        for i in 0..4 {
            assert_eq!(fifo.pop(), Some(round * 10 + i));
        }
    }
}

/// Heap-owning values moved in and out, with leftovers freed on drop.
#[test]
fn miri_fifo_owned_values() {
    let mut fifo = Fifo::<String>::new(4).unwrap();

    assert!(fifo.try_push("a".repeat(10)));
    assert!(fifo.try_push("b".repeat(20)));
    assert!(fifo.try_push("c".repeat(30)));

    let mut out = String::from("previous value is dropped");
    assert!(fifo.try_pop(&mut out));
    assert_eq!(out.len(), 10);

    // Two strings remain and must be freed by the queue
}

/// Zero-sized elements use a dangling pointer and no allocation.
#[test]
fn miri_zero_sized_elements() {
    let mut fifo = Fifo::<()>::new(8).unwrap();
    for _ in 0..8 {
        assert!(fifo.try_push(()));
    }
    assert!(!fifo.try_push(()));
    assert_eq!(fifo.pop(), Some(()));
    assert_eq!(fifo.len(), 7);
}

/// Both handles used from different threads, dropped on different threads.
#[test]
fn miri_split_across_threads() {
    let (mut producer, mut consumer) = Fifo::<Box<u64>>::new(2).unwrap().split();

    let handle = thread::spawn(move || {
        for i in 0..6 {
            let mut value = Box::new(i);
            loop {
                match producer.push(value) {
                    Ok(()) => break,
                    Err(err) => {
                        value = err.into_inner();
                        thread::yield_now();
                    }
                }
            }
        }
    });

    let mut expected = 0;
    while expected < 4 {
        if let Some(v) = consumer.pop() {
            assert_eq!(*v, expected);
            expected += 1;
        } else {
            thread::yield_now();
        }
    }

    handle.join().unwrap();
    // Two boxes left for the consumer's drop to release
    drop(consumer);
}

#[test]
fn miri_local_fifo() {
    let mut fifo = LocalFifo::<Vec<u8>>::new(2).unwrap();
    for i in 0..5u8 {
        assert!(fifo.try_push(vec![i; 3]));
        if i % 2 == 1 {
            assert!(fifo.pop().is_some());
        }
        if fifo.is_full() {
            assert!(fifo.pop().is_some());
        }
    }
}
