use crate::alloc::{Global, SlotAllocator};
use crate::handle::{Consumer, Producer};
use crate::invariants::{
    debug_assert_bounded_count, debug_assert_initialized_read, debug_assert_pop_not_past_push,
};
use crate::storage::Storage;
use crate::sync::{Arc, AtomicUsize, Ordering};
use crate::{AllocationError, Config, PushError};
use crossbeam_utils::CachePadded;
use std::cell::Cell;
use std::fmt;

// =============================================================================
// MEMORY ORDERING & SYNCHRONIZATION STRATEGY
// =============================================================================
//
// Two cursors, each written by exactly one thread:
//
// - `producer.cursor` (push cursor): total number of values ever pushed.
// - `consumer.cursor` (pop cursor): total number of values ever popped.
//
// Both are `usize` and wrap on overflow. Occupancy is always computed as
// `push.wrapping_sub(pop)`, which stays exact across the wrap because the
// true occupancy never exceeds capacity. Slot index is `cursor & mask`.
//
// ## Memory Ordering Protocol
//
// **Producer (push):**
// 1. Load push cursor with Relaxed (only the producer writes it)
// 2. Check space against `cached_remote` (producer-local copy of pop)
// 3. If the cache says full: load pop cursor with Acquire, refresh cache
// 4. Write the value into `slot(push)` (slot is producer-owned, see below)
// 5. Store `push + 1` with Release (publishes the slot write)
//
// **Consumer (pop):**
// 1. Load pop cursor with Relaxed (only the consumer writes it)
// 2. Check availability against `cached_remote` (consumer-local copy of push)
// 3. If the cache says empty: load push cursor with Acquire, refresh cache
// 4. Move the value out of `slot(pop)`
// 5. Store `pop + 1` with Release (publishes that the slot is free)
//
// The Release store in step 5 of one side pairs with the Acquire load in
// step 3 of the other, giving a happens-before edge from every slot write to
// the matching read and from every read to the next write of that slot.
//
// ## Slot Ownership
//
// - Slots with cursor in `[pop, push)` hold live values and belong to the consumer.
// - Slots with cursor in `[push, pop + capacity)` are free and belong to the producer.
//
// A cached remote cursor can only lag the real one. A stale pop makes the
// queue look fuller to the producer; a stale push makes it look emptier to
// the consumer. Neither can hand a slot to the wrong side.
//
// ## Layout
//
// Each side's cursor and its cached copy of the other cursor sit together in
// their own `CachePadded` region, so producer writes never invalidate the
// consumer's line and vice versa.
//
// =============================================================================

/// Hot state owned by one side of the queue.
struct Side {
    /// Written only by the owning side, read by the opposite side.
    cursor: AtomicUsize,
    /// Owning side's last observed value of the opposite cursor.
    cached_remote: Cell<usize>,
}

impl Side {
    fn new(start: usize) -> Self {
        Self {
            cursor: AtomicUsize::new(start),
            cached_remote: Cell::new(start),
        }
    }
}

/// Shared queue state behind [`Fifo`], [`Producer`] and [`Consumer`].
///
/// `push`/`pop` are `unsafe` because the protocol assumes exactly one pushing
/// thread and one popping thread. The safe wrappers guarantee that by
/// construction: `Fifo` requires `&mut self`, and `split()` hands out exactly
/// one non-`Clone` handle per side.
pub(crate) struct RingCore<T, A: SlotAllocator = Global> {
    // === PRODUCER HOT ===
    producer: CachePadded<Side>,
    // === CONSUMER HOT ===
    consumer: CachePadded<Side>,
    // === DATA ===
    storage: Storage<T, A>,
}

// Safety: Moving the core moves the elements and the allocator.
unsafe impl<T: Send, A: SlotAllocator + Send> Send for RingCore<T, A> {}
// Safety: The `Cell` caches are each touched by a single side only, and slot
// access is partitioned by the cursor protocol above. Values cross threads,
// hence `T: Send`.
unsafe impl<T: Send, A: SlotAllocator + Sync> Sync for RingCore<T, A> {}

impl<T, A: SlotAllocator> RingCore<T, A> {
    fn new_in(capacity: usize, alloc: A) -> Result<Self, AllocationError> {
        Self::with_start_cursor(capacity, alloc, 0)
    }

    fn with_start_cursor(capacity: usize, alloc: A, start: usize) -> Result<Self, AllocationError> {
        Ok(Self {
            producer: CachePadded::new(Side::new(start)),
            consumer: CachePadded::new(Side::new(start)),
            storage: Storage::new_in(capacity, alloc)?,
        })
    }

    // ---------------------------------------------------------------------
    // STATUS
    // ---------------------------------------------------------------------

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Number of values in the queue.
    ///
    /// Two independent loads, pop first: the push cursor read afterwards is
    /// at least the pop cursor just observed, so the difference never goes
    /// negative. While the other side is active the result is a snapshot
    /// that may already be out of date; it is clamped to `capacity`.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        let pop = self.consumer.cursor.load(Ordering::Acquire);
        let push = self.producer.cursor.load(Ordering::Relaxed);
        push.wrapping_sub(pop).min(self.capacity())
    }

    // ---------------------------------------------------------------------
    // PRODUCER
    // ---------------------------------------------------------------------

    /// Attempts to append `value`; hands it back if the queue is full.
    ///
    /// # Safety
    ///
    /// No other thread may call `push` on this core concurrently.
    #[inline]
    pub(crate) unsafe fn push(&self, value: T) -> Result<(), T> {
        let capacity = self.capacity();
        let push = self.producer.cursor.load(Ordering::Relaxed);

        // Fast path: cached pop cursor
        let mut pop = self.producer.cached_remote.get();
        if push.wrapping_sub(pop) >= capacity {
            // Slow path: refresh once before reporting full
            pop = self.consumer.cursor.load(Ordering::Acquire);
            self.producer.cached_remote.set(pop);
            if push.wrapping_sub(pop) >= capacity {
                return Err(value);
            }
        }

        debug_assert_bounded_count!(push.wrapping_sub(pop) + 1, capacity);

        // SAFETY: slot(push) is in [push, pop + capacity), which the consumer
        // never touches. The Acquire load of pop (now or when the cache was
        // filled) ordered the consumer's last read of this slot before us.
        unsafe { self.storage.slot(push).write(value) };

        self.producer
            .cursor
            .store(push.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // CONSUMER
    // ---------------------------------------------------------------------

    /// Removes the oldest value, or returns `None` if the queue is empty.
    ///
    /// # Safety
    ///
    /// No other thread may call `pop` on this core concurrently.
    #[inline]
    pub(crate) unsafe fn pop(&self) -> Option<T> {
        let pop = self.consumer.cursor.load(Ordering::Relaxed);

        // Fast path: cached push cursor
        let mut push = self.consumer.cached_remote.get();
        if push == pop {
            // Slow path: refresh once before reporting empty
            push = self.producer.cursor.load(Ordering::Acquire);
            self.consumer.cached_remote.set(push);
            if push == pop {
                return None;
            }
        }

        debug_assert_initialized_read!(pop, pop, push);

        // SAFETY: slot(pop) is in [pop, push): the producer initialized it and
        // published it with a Release store we observed via Acquire. Reading
        // moves the value out; the slot is logically uninitialized after this.
        let value = unsafe { self.storage.slot(pop).read() };

        let new_pop = pop.wrapping_add(1);
        debug_assert_pop_not_past_push!(pop, new_pop, push);
        self.consumer.cursor.store(new_pop, Ordering::Release);
        Some(value)
    }
}

impl<T, A: SlotAllocator> Drop for RingCore<T, A> {
    fn drop(&mut self) {
        // &mut self: both sides are gone, so these loads see the final cursors.
        let pop = self.consumer.cursor.load(Ordering::Relaxed);
        let push = self.producer.cursor.load(Ordering::Relaxed);
        let remaining = push.wrapping_sub(pop);

        if remaining > 0 {
            tracing::trace!(remaining, "dropping values left in queue");
            // SAFETY: [pop, push) holds exactly the live values, and no handle
            // remains that could read them.
            unsafe { self.storage.drop_range(pop, push) };
        }
    }
}

/// Bounded lock-free SPSC FIFO.
///
/// Holding a `Fifo` means holding both ends, so every operation takes
/// `&mut self` and it behaves as a plain bounded queue on one thread. Call
/// [`split`](Fifo::split) to hand the two ends to two threads.
///
/// # Example
///
/// ```
/// use ringfifo_rs::Fifo;
///
/// let mut fifo = Fifo::<u32>::new(4).unwrap();
/// assert!(fifo.try_push(1));
/// assert!(fifo.try_push(2));
///
/// let mut out = 0;
/// assert!(fifo.try_pop(&mut out));
/// assert_eq!(out, 1);
/// assert_eq!(fifo.pop(), Some(2));
/// assert_eq!(fifo.pop(), None);
/// ```
pub struct Fifo<T, A: SlotAllocator = Global> {
    core: RingCore<T, A>,
}

impl<T> Fifo<T> {
    /// Creates a queue holding up to `capacity` values on the global heap.
    ///
    /// `capacity` must be a non-zero power of two; anything else is rejected
    /// rather than rounded. Use [`Config::for_min_capacity`] to round up.
    pub fn new(capacity: usize) -> Result<Self, AllocationError> {
        Self::new_in(capacity, Global)
    }

    /// Creates a queue sized by `config`.
    pub fn with_config(config: Config) -> Result<Self, AllocationError> {
        Self::with_config_in(config, Global)
    }
}

impl<T, A: SlotAllocator> Fifo<T, A> {
    /// Creates a queue whose slot array comes from `alloc`.
    pub fn new_in(capacity: usize, alloc: A) -> Result<Self, AllocationError> {
        Ok(Self {
            core: RingCore::new_in(capacity, alloc)?,
        })
    }

    /// Creates a queue sized by `config` whose slot array comes from `alloc`.
    pub fn with_config_in(config: Config, alloc: A) -> Result<Self, AllocationError> {
        let capacity = config
            .capacity()
            .ok_or(AllocationError::InvalidCapacityBits {
                bits: config.capacity_bits,
            })?;
        Self::new_in(capacity, alloc)
    }

    /// Returns the queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Returns the number of values in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Same as [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns true if the queue holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the queue holds `capacity` values.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Appends `value`, or returns it inside [`PushError::Full`].
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), PushError<T>> {
        // SAFETY: &mut self: no other pusher exists.
        unsafe { self.core.push(value) }.map_err(PushError::Full)
    }

    /// Appends `value`, returning `false` if the queue is full.
    ///
    /// A rejected value is dropped; use [`push`](Self::push) to get it back.
    #[inline]
    pub fn try_push(&mut self, value: T) -> bool {
        self.push(value).is_ok()
    }

    /// Removes the oldest value.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: &mut self: no other popper exists.
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

    /// Splits the queue into its producer and consumer ends.
    ///
    /// Each handle is `Send` (for `T: Send`) but not `Clone`, so exactly one
    /// thread can push and one thread can pop. The storage is released when
    /// both handles have been dropped.
    pub fn split(self) -> (Producer<T, A>, Consumer<T, A>) {
        let core = Arc::new(self.core);
        (Producer::new(Arc::clone(&core)), Consumer::new(core))
    }
}

impl<T, A: SlotAllocator> fmt::Debug for Fifo<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fifo")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
