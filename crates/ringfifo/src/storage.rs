//! Fixed-capacity slot array shared by the atomic and local queues.
//!
//! `Storage` owns raw, uninitialized memory for `capacity` elements and maps
//! cursor values to slots. It has no synchronization of its own and does not
//! know which slots are live; the owning queue tracks that with its cursors.

use crate::alloc::{Global, SlotAllocator};
use crate::error::AllocationError;
use std::alloc::Layout;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

pub(crate) struct Storage<T, A: SlotAllocator = Global> {
    ptr: NonNull<T>,
    mask: usize,
    layout: Layout,
    alloc: A,
    _owns: PhantomData<T>,
}

// Safety: Storage is a uniquely owned allocation. Moving it between threads
// moves the elements (T: Send) and the allocator (A: Send) with it.
unsafe impl<T: Send, A: SlotAllocator + Send> Send for Storage<T, A> {}
// Safety: Shared access only hands out raw slot pointers; the queue's cursor
// protocol decides who may dereference them.
unsafe impl<T: Send, A: SlotAllocator + Sync> Sync for Storage<T, A> {}

impl<T, A: SlotAllocator> Storage<T, A> {
    /// Allocates uninitialized room for `capacity` elements.
    pub(crate) fn new_in(capacity: usize, alloc: A) -> Result<Self, AllocationError> {
        if capacity == 0 {
            tracing::warn!("rejected zero-capacity queue");
            return Err(AllocationError::ZeroCapacity);
        }
        if !capacity.is_power_of_two() {
            tracing::warn!(capacity, "rejected non-power-of-two capacity");
            return Err(AllocationError::NotPowerOfTwo { capacity });
        }

        let layout = Layout::array::<T>(capacity)
            .map_err(|_| AllocationError::CapacityOverflow { capacity })?;

        let ptr = if layout.size() == 0 {
            // Zero-sized elements need an aligned address but no memory.
            NonNull::dangling()
        } else {
            alloc
                .allocate(layout)
                .ok_or_else(|| {
                    tracing::warn!(capacity, bytes = layout.size(), "slot allocation failed");
                    AllocationError::OutOfMemory {
                        bytes: layout.size(),
                    }
                })?
                .cast::<T>()
        };

        tracing::debug!(capacity, bytes = layout.size(), "allocated queue storage");

        Ok(Self {
            ptr,
            mask: capacity - 1,
            layout,
            alloc,
            _owns: PhantomData,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Address of the slot a cursor value maps to (`cursor & (capacity - 1)`).
    #[inline]
    pub(crate) fn slot(&self, cursor: usize) -> *mut T {
        // SAFETY: The masked index is < capacity, so the offset stays inside
        // the allocation (or is zero bytes for ZSTs).
        unsafe { self.ptr.as_ptr().add(cursor & self.mask) }
    }

    /// Drops every element whose cursor lies in `[start, end)`.
    ///
    /// # Safety
    ///
    /// Every slot in the range must hold an initialized value that nothing
    /// else will read or drop afterwards, and `end - start` (wrapping) must
    /// not exceed the capacity.
    pub(crate) unsafe fn drop_range(&mut self, start: usize, end: usize) {
        let mut cursor = start;
        while cursor != end {
            // SAFETY: Forwarded from the caller's contract.
            unsafe { ptr::drop_in_place(self.slot(cursor)) };
            cursor = cursor.wrapping_add(1);
        }
    }
}

impl<T, A: SlotAllocator> Drop for Storage<T, A> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: ptr was obtained from self.alloc with this layout in
            // new_in and is released exactly once, here.
            unsafe { self.alloc.deallocate(self.ptr.cast::<u8>(), self.layout) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_capacities() {
        assert_eq!(
            Storage::<u64>::new_in(0, Global).err(),
            Some(AllocationError::ZeroCapacity)
        );
        assert_eq!(
            Storage::<u64>::new_in(12, Global).err(),
            Some(AllocationError::NotPowerOfTwo { capacity: 12 })
        );
    }

    #[test]
    fn test_rejects_layout_overflow() {
        let capacity = 1usize << (usize::BITS - 2);
        assert_eq!(
            Storage::<u64>::new_in(capacity, Global).err(),
            Some(AllocationError::CapacityOverflow { capacity })
        );
    }

    #[test]
    fn test_slot_addressing_wraps() {
        let storage = Storage::<u32>::new_in(8, Global).unwrap();
        assert_eq!(storage.capacity(), 8);
        assert_eq!(storage.slot(0), storage.slot(8));
        assert_eq!(storage.slot(3), storage.slot(usize::MAX - 4));
        assert_ne!(storage.slot(1), storage.slot(2));
    }

    #[test]
    fn test_zero_sized_elements_do_not_allocate() {
        let storage = Storage::<()>::new_in(1 << 20, Global).unwrap();
        assert_eq!(storage.capacity(), 1 << 20);
        assert_eq!(storage.slot(5), storage.slot(6));
    }
}
