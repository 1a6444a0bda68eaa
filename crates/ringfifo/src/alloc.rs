//! Pluggable allocation strategy for the slot array.
//!
//! The queue allocates its storage exactly once, at construction, and frees
//! it exactly once, on drop. [`SlotAllocator`] is the seam through which that
//! single allocation goes. The default [`Global`] strategy is a zero-sized
//! type, so a `Fifo<T>` pays nothing in footprint for the ability to swap it.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// An allocation strategy for a queue's slot array.
///
/// # Safety
///
/// Implementors must return memory that is valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and that stays valid
/// until it is passed back to [`deallocate`](SlotAllocator::deallocate) on
/// the same allocator.
pub unsafe trait SlotAllocator {
    /// Allocates a block described by `layout`. `layout.size()` is never zero.
    ///
    /// Returns `None` if the memory cannot be obtained.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Returns a block previously obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `self.allocate(layout)` with the same `layout`
    /// and must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global heap allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl SlotAllocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0, "zero-sized slot arrays are never allocated");
        // SAFETY: The layout has non-zero size (queues of ZSTs never allocate).
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded from the caller's contract.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

unsafe impl<A: SlotAllocator + ?Sized> SlotAllocator for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarded from the caller's contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
