//! Property-based tests for the cursor invariants.
//!
//! Random push/pop sequences are replayed against a `VecDeque` bounded to the
//! same capacity. Every step must agree on acceptance, returned value and
//! occupancy.
//!
//! Coverage:
//! - Fifo<T> (atomic cursors, used through `&mut self`)
//! - Producer/Consumer (after `split()`)
//! - LocalFifo<T> (plain cursors)

#![cfg(not(feature = "loom"))]

use proptest::prelude::*;
use ringfifo_rs::{Config, Fifo, LocalFifo};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
enum Op {
    Push(u32),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u32>().prop_map(Op::Push), Just(Op::Pop)]
}

/// Bounded model with the queue's semantics.
struct Model {
    items: VecDeque<u32>,
    capacity: usize,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    fn push(&mut self, v: u32) -> bool {
        if self.items.len() == self.capacity {
            return false;
        }
        self.items.push_back(v);
        true
    }

    fn pop(&mut self) -> Option<u32> {
        self.items.pop_front()
    }
}

// =============================================================================
// Bounded occupancy, FIFO order, exact size at quiescence
// =============================================================================

proptest! {
    #[test]
    fn prop_fifo_matches_model(
        bits in 0u8..6,
        ops in prop::collection::vec(op_strategy(), 1..400),
    ) {
        let mut fifo = Fifo::<u32>::with_config(Config::new(bits)).unwrap();
        let mut model = Model::new(fifo.capacity());

        for op in ops {
            match op {
                Op::Push(v) => prop_assert_eq!(fifo.try_push(v), model.push(v)),
                Op::Pop => prop_assert_eq!(fifo.pop(), model.pop()),
            }
            prop_assert_eq!(fifo.len(), model.items.len());
            prop_assert!(fifo.len() <= fifo.capacity());
            prop_assert_eq!(fifo.is_full(), model.items.len() == model.capacity);
        }
    }

    #[test]
    fn prop_split_handles_match_model(
        bits in 0u8..6,
        ops in prop::collection::vec(op_strategy(), 1..400),
    ) {
        let (mut tx, mut rx) = Fifo::<u32>::with_config(Config::new(bits)).unwrap().split();
        let mut model = Model::new(tx.capacity());

        for op in ops {
            match op {
                Op::Push(v) => prop_assert_eq!(tx.try_push(v), model.push(v)),
                Op::Pop => prop_assert_eq!(rx.pop(), model.pop()),
            }
            prop_assert_eq!(tx.len(), model.items.len());
            prop_assert_eq!(rx.len(), model.items.len());
        }
    }

    #[test]
    fn prop_local_matches_model(
        bits in 0u8..6,
        ops in prop::collection::vec(op_strategy(), 1..400),
    ) {
        let mut fifo = LocalFifo::<u32>::with_config(Config::new(bits)).unwrap();
        let mut model = Model::new(fifo.capacity());

        for op in ops {
            match op {
                Op::Push(v) => prop_assert_eq!(fifo.try_push(v), model.push(v)),
                Op::Pop => prop_assert_eq!(fifo.pop(), model.pop()),
            }
            prop_assert_eq!(fifo.len(), model.items.len());
        }
    }
}

// =============================================================================
// Rejected pushes have no side effects
// =============================================================================

proptest! {
    #[test]
    fn prop_rejected_push_returns_value(
        bits in 0u8..5,
        extra in prop::collection::vec(any::<String>(), 1..8),
    ) {
        let mut fifo = Fifo::<String>::with_config(Config::new(bits)).unwrap();
        for i in 0..fifo.capacity() {
            prop_assert!(fifo.push(i.to_string()).is_ok());
        }

        for value in extra {
            let err = fifo.push(value.clone()).unwrap_err();
            prop_assert_eq!(err.into_inner(), value);
            prop_assert_eq!(fifo.len(), fifo.capacity());
        }

        // Contents untouched by the rejected pushes
        for i in 0..fifo.capacity() {
            prop_assert_eq!(fifo.pop(), Some(i.to_string()));
        }
    }
}

// =============================================================================
// Capacity policy: only powers of two are accepted
// =============================================================================

proptest! {
    #[test]
    fn prop_capacity_policy(capacity in 0usize..100_000) {
        let accepted = Fifo::<u8>::new(capacity).is_ok();
        prop_assert_eq!(accepted, capacity.is_power_of_two());
    }
}
