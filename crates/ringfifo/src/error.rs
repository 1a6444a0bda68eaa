//! Error types for queue construction and rejected pushes.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while constructing a queue.
///
/// Full and empty queues are not errors; they are reported through the
/// `bool`/`Option`/[`PushError`] return values of the individual operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// A capacity of zero was requested.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    /// The requested capacity is not a power of two.
    ///
    /// Slot addressing masks the cursor with `capacity - 1`, so only powers
    /// of two are accepted. Use [`Config::for_min_capacity`] to round up.
    ///
    /// [`Config::for_min_capacity`]: crate::Config::for_min_capacity
    #[error("capacity {capacity} is not a power of two")]
    NotPowerOfTwo {
        /// The rejected capacity.
        capacity: usize,
    },

    /// `1 << bits` does not fit in a `usize`.
    #[error("capacity of 2^{bits} slots does not fit in usize")]
    InvalidCapacityBits {
        /// The rejected bit count.
        bits: u8,
    },

    /// The slot array for `capacity` elements exceeds `isize::MAX` bytes.
    #[error("slot array for {capacity} elements exceeds the maximum allocation size")]
    CapacityOverflow {
        /// The rejected capacity.
        capacity: usize,
    },

    /// The allocator could not provide the slot array.
    #[error("allocator failed to provide {bytes} bytes")]
    OutOfMemory {
        /// Size of the failed allocation request.
        bytes: usize,
    },
}

impl AllocationError {
    /// Returns `true` if the requested capacity itself was invalid, as
    /// opposed to the allocator running out of memory.
    #[inline]
    pub fn is_capacity_error(&self) -> bool {
        !matches!(self, Self::OutOfMemory { .. })
    }
}

/// A push was rejected; the value is handed back to the caller.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
pub enum PushError<T> {
    /// The queue held `capacity` elements at the time of the push.
    #[error("queue is full")]
    Full(T),
}

impl<T> PushError<T> {
    /// Recovers the value that could not be pushed.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(value) => value,
        }
    }
}

// Hand-written so that `T` does not need to be `Debug`.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
        }
    }
}
