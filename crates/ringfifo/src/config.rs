/// Capacity configuration for [`Fifo`](crate::Fifo) and [`LocalFifo`](crate::LocalFifo).
///
/// Capacity is expressed as a bit count so that it is a power of two by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Queue capacity as power of 2 (default: 10 = 1024 slots)
    pub capacity_bits: u8,
}

impl Config {
    /// Creates a configuration holding `1 << capacity_bits` slots.
    pub const fn new(capacity_bits: u8) -> Self {
        Self { capacity_bits }
    }

    /// Smallest configuration holding at least `min_capacity` slots.
    ///
    /// This is the explicit round-up path; `Fifo::new` itself rejects
    /// capacities that are not a power of two. Returns `None` for zero or
    /// when the next power of two overflows `usize`.
    pub const fn for_min_capacity(min_capacity: usize) -> Option<Self> {
        if min_capacity == 0 {
            return None;
        }
        match min_capacity.checked_next_power_of_two() {
            Some(capacity) => Some(Self::new(capacity.trailing_zeros() as u8)),
            None => None,
        }
    }

    /// Returns the capacity, or `None` if `1 << capacity_bits` overflows
    /// `usize`.
    #[inline]
    pub const fn capacity(&self) -> Option<usize> {
        1usize.checked_shl(self.capacity_bits as u32)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { capacity_bits: 10 }
    }
}

/// Low latency configuration (256 slots, stays cache resident for small `T`)
pub const LOW_LATENCY_CONFIG: Config = Config::new(8);

/// High throughput configuration (64K slots, absorbs long bursts)
pub const HIGH_THROUGHPUT_CONFIG: Config = Config::new(16);
