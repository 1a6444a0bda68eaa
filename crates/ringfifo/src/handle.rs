//! The two ends of a split [`Fifo`](crate::Fifo).
//!
//! A `Producer` can only push and a `Consumer` can only pop. Neither is
//! `Clone`, and their operations take `&mut self`, so a handle can be moved
//! to another thread but never shared between two. That is what makes the
//! single-producer/single-consumer contract hold without runtime checks.

use crate::alloc::{Global, SlotAllocator};
use crate::fifo::RingCore;
use crate::sync::Arc;
use crate::PushError;
use std::fmt;

/// Pushing end of a split queue.
pub struct Producer<T, A: SlotAllocator = Global> {
    core: Arc<RingCore<T, A>>,
}

impl<T, A: SlotAllocator> Producer<T, A> {
    pub(crate) fn new(core: Arc<RingCore<T, A>>) -> Self {
        Self { core }
    }

    /// Appends `value`, or returns it inside [`PushError::Full`].
    ///
    /// Never blocks. On `Err` the caller picks the wait policy, e.g.
    /// [`retry_forever`](crate::retry_forever).
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), PushError<T>> {
        // SAFETY: This is the only Producer for the core and &mut self
        // rules out concurrent calls through it.
        unsafe { self.core.push(value) }.map_err(PushError::Full)
    }

    /// Appends `value`, returning `false` if the queue is full.
    ///
    /// A rejected value is dropped. Prefer [`push`](Self::push) for values
    /// that are expensive to recreate.
    ///
    /// # Example
    /// ```
    /// use ringfifo_rs::Fifo;
    ///
    /// let (mut tx, _rx) = Fifo::<u64>::new(1).unwrap().split();
    /// assert!(tx.try_push(7));
    /// if !tx.try_push(8) {
    ///     // Queue is full, handle backpressure
    /// }
    /// ```
    #[inline]
    pub fn try_push(&mut self, value: T) -> bool {
        self.push(value).is_ok()
    }

    /// Returns the queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Returns the number of values in the queue.
    ///
    /// The consumer may pop concurrently, so this is an upper bound by the
    /// time it returns.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns true if the queue looks empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the queue looks full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}

impl<T, A: SlotAllocator> fmt::Debug for Producer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Popping end of a split queue.
pub struct Consumer<T, A: SlotAllocator = Global> {
    core: Arc<RingCore<T, A>>,
}

impl<T, A: SlotAllocator> Consumer<T, A> {
    pub(crate) fn new(core: Arc<RingCore<T, A>>) -> Self {
        Self { core }
    }

    /// Removes the oldest value, or returns `None` if the queue is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: This is the only Consumer for the core and &mut self
        // rules out concurrent calls through it.
        unsafe { self.core.pop() }
    }

    /// Moves the oldest value into `out`, returning `false` if empty.
    ///
    /// The previous contents of `out` are dropped. On `false`, `out` is
    /// left untouched.
    #[inline]
    pub fn try_pop(&mut self, out: &mut T) -> bool {
        match self.pop() {
            Some(value) => {
                *out = value;
                true
            }
            None => false,
        }
    }

    /// Returns the queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Returns the number of values in the queue.
    ///
    /// The producer may push concurrently, so this is a lower bound by the
    /// time it returns.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns true if the queue looks empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the queue looks full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}

impl<T, A: SlotAllocator> Iterator for Consumer<T, A> {
    type Item = T;

    /// Pops until the queue looks empty. Does not wait for the producer.
    fn next(&mut self) -> Option<T> {
        self.pop()
    }
}

impl<T, A: SlotAllocator> fmt::Debug for Consumer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
