//! Debug assertion macros for cursor invariants.
//!
//! Active only with `debug_assertions`; release builds compile them out.
//! Shared by `Fifo<T>` (atomic cursors) and `LocalFifo<T>` (plain cursors).

// =============================================================================
// Bounded occupancy: 0 <= push - pop <= capacity
// =============================================================================

/// Assert that occupancy does not exceed capacity.
///
/// Used in: `push()` before writing a slot.
macro_rules! debug_assert_bounded_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "bounded occupancy violated: count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

/// Assert that the pop cursor does not move past the push cursor.
///
/// Compares wrapping distances from the old pop cursor, so it stays valid
/// across counter overflow.
///
/// Used in: `pop()` before publishing the new pop cursor.
macro_rules! debug_assert_pop_not_past_push {
    ($old_pop:expr, $new_pop:expr, $push:expr) => {
        debug_assert!(
            $new_pop.wrapping_sub($old_pop) <= $push.wrapping_sub($old_pop),
            "pop cursor {} advanced beyond push cursor {}",
            $new_pop,
            $push
        )
    };
}

// =============================================================================
// Initialized range: slot(pos) is live <=> pop <= pos < push
// =============================================================================

/// Assert that we're reading a slot inside `[pop, push)`.
macro_rules! debug_assert_initialized_read {
    ($pos:expr, $pop:expr, $push:expr) => {
        debug_assert!(
            $pos.wrapping_sub($pop) < $push.wrapping_sub($pop),
            "reading slot at cursor {} outside initialized range [{}, {})",
            $pos,
            $pop,
            $push
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_initialized_read;
pub(crate) use debug_assert_pop_not_past_push;
