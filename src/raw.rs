//! Layout computation and the one primitive that changes the size of an
//! allocation.
//!
//! Element storage is always a single block of `capacity` slots. A missing
//! block (`None`) is the empty marker and always pairs with capacity 0.
//! Zero-sized element types never reach the allocator.

use core::{alloc::Layout, mem, ptr::NonNull};

use allocator_api2::alloc::Allocator;

use crate::error::TryReserveError;

#[inline]
pub(crate) const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

/// Layout of a block holding `capacity` slots of `T`.
#[inline]
pub(crate) fn array_layout<T>(capacity: usize) -> Result<Layout, TryReserveError> {
    Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)
}

/// Layout of a block that is known to exist.
///
/// # Safety
///
/// A block of `capacity` slots of `T` must have been allocated before, so the
/// layout is known to be valid.
#[inline]
unsafe fn existing_layout<T>(capacity: usize) -> Layout {
    // SAFETY: the same layout was validated by `array_layout` at allocation time
    unsafe {
        Layout::from_size_align_unchecked(mem::size_of::<T>() * capacity, mem::align_of::<T>())
    }
}

/// Moves the block at `ptr` (holding `old_capacity` slots) into a block of
/// exactly `new_capacity` slots, preserving the bytes of the first
/// `min(old_capacity, new_capacity)` slots.
///
/// Returns the new block, or `None` when `new_capacity` is 0 and the old block
/// has been released. On error the old block is left untouched.
///
/// # Safety
///
/// * `ptr` must be `None` if `old_capacity` is 0 (and `T` is not zero-sized).
/// * `ptr`, if present, must have been allocated by `alloc` with the layout of
///   `old_capacity` slots of `T`.
/// * Slots at or past `new_capacity` must not hold values that still need to be
///   dropped.
pub(crate) unsafe fn reallocate<T, A: Allocator>(
    alloc: &A,
    ptr: Option<NonNull<T>>,
    old_capacity: usize,
    new_capacity: usize,
) -> Result<Option<NonNull<T>>, TryReserveError> {
    if is_zst::<T>() {
        return Ok((new_capacity > 0).then(NonNull::dangling));
    }

    let Some(ptr) = ptr else {
        if new_capacity == 0 {
            return Ok(None);
        }
        let layout = array_layout::<T>(new_capacity)?;
        let block = alloc
            .allocate(layout)
            .map_err(|_| TryReserveError::AllocError { layout })?;
        return Ok(Some(block.cast()));
    };

    // SAFETY: caller guarantees `ptr` was allocated with this layout
    let old_layout = unsafe { existing_layout::<T>(old_capacity) };
    if new_capacity == 0 {
        // SAFETY: as above
        unsafe { alloc.deallocate(ptr.cast(), old_layout) };
        return Ok(None);
    }
    if new_capacity == old_capacity {
        return Ok(Some(ptr));
    }

    let new_layout = array_layout::<T>(new_capacity)?;
    // SAFETY: `ptr` is live in `alloc` with `old_layout`, and both layouts share
    // the alignment of `T`; grow/shrink direction matches the size comparison
    let block = unsafe {
        if new_capacity > old_capacity {
            alloc.grow(ptr.cast(), old_layout, new_layout)
        } else {
            alloc.shrink(ptr.cast(), old_layout, new_layout)
        }
    };
    block
        .map(|block| Some(block.cast()))
        .map_err(|_| TryReserveError::AllocError { layout: new_layout })
}

/// Releases the block at `ptr`, if any.
///
/// # Safety
///
/// Same requirements as [`reallocate`], with the block no longer holding live
/// values.
pub(crate) unsafe fn deallocate<T, A: Allocator>(
    alloc: &A,
    ptr: Option<NonNull<T>>,
    capacity: usize,
) {
    if is_zst::<T>() {
        return;
    }
    if let Some(ptr) = ptr {
        // SAFETY: caller guarantees `ptr` was allocated with this layout
        unsafe { alloc.deallocate(ptr.cast(), existing_layout::<T>(capacity)) };
    }
}

/// Releases a block when dropped, so the block is freed even while unwinding
/// out of a panicking element destructor.
pub(crate) struct DeallocGuard<'a, T, A: Allocator> {
    alloc: &'a A,
    ptr: Option<NonNull<T>>,
    capacity: usize,
}

impl<'a, T, A: Allocator> DeallocGuard<'a, T, A> {
    /// # Safety
    ///
    /// Same requirements as [`deallocate`]. Nothing else may release the block.
    #[inline]
    pub(crate) unsafe fn new(alloc: &'a A, ptr: Option<NonNull<T>>, capacity: usize) -> Self {
        Self {
            alloc,
            ptr,
            capacity,
        }
    }
}

impl<T, A: Allocator> Drop for DeallocGuard<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: `new` requires the block to be owned by `alloc` with
        // `capacity` slots and released only here
        unsafe { deallocate(self.alloc, self.ptr, self.capacity) }
    }
}
