//! Single-threaded ring with plain cursors.
//!
//! [`LocalFifo`] runs the same storage and masked-index arithmetic as
//! [`Fifo`](crate::Fifo) without any atomics or cache padding. It is the
//! non-concurrent baseline: useful where both ends live on one thread, and as
//! the reference the atomic queue is benchmarked against.

use crate::alloc::{Global, SlotAllocator};
use crate::invariants::{debug_assert_bounded_count, debug_assert_initialized_read};
use crate::storage::Storage;
use crate::{AllocationError, Config, PushError};
use std::fmt;

/// Bounded FIFO for use on a single thread.
pub struct LocalFifo<T, A: SlotAllocator = Global> {
    storage: Storage<T, A>,
    push: usize,
    pop: usize,
}

impl<T> LocalFifo<T> {
    /// Creates a queue holding up to `capacity` values.
    ///
    /// Same capacity rules as [`Fifo::new`](crate::Fifo::new).
    pub fn new(capacity: usize) -> Result<Self, AllocationError> {
        Self::new_in(capacity, Global)
    }

    /// Creates a queue sized by `config`.
    pub fn with_config(config: Config) -> Result<Self, AllocationError> {
        let capacity = config
            .capacity()
            .ok_or(AllocationError::InvalidCapacityBits {
                bits: config.capacity_bits,
            })?;
        Self::new(capacity)
    }
}

impl<T, A: SlotAllocator> LocalFifo<T, A> {
    /// Creates a queue whose slot array comes from `alloc`.
    pub fn new_in(capacity: usize, alloc: A) -> Result<Self, AllocationError> {
        Ok(Self {
            storage: Storage::new_in(capacity, alloc)?,
            push: 0,
            pop: 0,
        })
    }

    /// Returns the queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the number of values in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.push.wrapping_sub(self.pop)
    }

    /// Returns `true` if the queue holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.push == self.pop
    }

    /// Returns `true` if the queue holds `capacity()` values.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Appends `value`, or returns it inside [`PushError::Full`].
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.is_full() {
            return Err(PushError::Full(value));
        }
        debug_assert_bounded_count!(self.len() + 1, self.capacity());

        // SAFETY: Not full, so slot(push) is outside [pop, push) and holds no value.
        unsafe { self.storage.slot(self.push).write(value) };
        self.push = self.push.wrapping_add(1);
        Ok(())
    }

    /// Appends `value`, returning `false` (and dropping it) if full.
    #[inline]
    pub fn try_push(&mut self, value: T) -> bool {
        self.push(value).is_ok()
    }

    /// Removes the oldest value.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        debug_assert_initialized_read!(self.pop, self.pop, self.push);

        // SAFETY: Not empty, so slot(pop) holds a live value; moving it out
        // and advancing pop retires it.
        let value = unsafe { self.storage.slot(self.pop).read() };
        self.pop = self.pop.wrapping_add(1);
        Some(value)
    }

    /// Moves the oldest value into `out`, returning `false` if empty.
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
}

impl<T, A: SlotAllocator> Drop for LocalFifo<T, A> {
    fn drop(&mut self) {
        // SAFETY: [pop, push) holds exactly the live values.
        unsafe { self.storage.drop_range(self.pop, self.push) };
    }
}

impl<T, A: SlotAllocator> fmt::Debug for LocalFifo<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFifo")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
