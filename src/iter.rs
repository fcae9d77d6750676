//! Owning iteration.

use core::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem::ManuallyDrop,
    ptr::{self, NonNull},
    slice,
};

use allocator_api2::alloc::{Allocator, Global};

use crate::{FatVec, raw};

/// An iterator that moves out of a [`FatVec`].
///
/// Created by the [`into_iter`](IntoIterator::into_iter) method on `FatVec`.
/// Elements not yielded are dropped together with the iterator.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: Option<NonNull<T>>,
    cap: usize,
    start: usize,
    end: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the iterator owns the remaining elements like `vec::IntoIter`
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
// SAFETY: shared access only hands out a shared slice
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIter<T, A> {
    #[inline]
    fn base(&self) -> *mut T {
        self.buf.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `start..end` are initialized and not yet yielded
        unsafe { slice::from_raw_parts(self.base().add(self.start), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start < end`, so the slot holds a value not yet yielded
        let value = unsafe { self.base().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: `end` was past `start`, so the slot holds a value not yet yielded
        Some(unsafe { self.base().add(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: `start <= end <= cap`
            unsafe { self.base().add(self.start) },
            self.end - self.start,
        );
        // SAFETY: the block came from `alloc` with `cap` slots and is released
        // only by this guard
        let _block = unsafe { raw::DeallocGuard::new(&self.alloc, self.buf, self.cap) };
        // SAFETY: the remaining slots are initialized and dropped once
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T, P, A: Allocator> IntoIterator for FatVec<T, P, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Consumes the vector, yielding its elements front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let v = fatvec![String::from("a"), String::from("b")];
    /// let mut iter = v.into_iter();
    /// assert_eq!(iter.next().as_deref(), Some("a"));
    /// assert_eq!(iter.len(), 1);
    /// ```
    fn into_iter(self) -> IntoIter<T, A> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again, so the allocator and
        // policy are each moved out exactly once
        let (alloc, policy) = unsafe { (ptr::read(&this.alloc), ptr::read(&this.policy)) };
        drop(policy);
        IntoIter {
            buf: this.ptr,
            cap: this.cap,
            start: 0,
            end: this.len,
            alloc,
            _marker: PhantomData,
        }
    }
}
