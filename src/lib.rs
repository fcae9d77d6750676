//! A growable, contiguous vector whose growth, bounds-check and allocation
//! behavior are fixed when its type is written down.
//!
//! [`FatVec<T, P, A>`] owns one block of `capacity` slots and keeps the first
//! `len` of them initialized. It never allocates until it has to: a vector
//! that owns no memory has a null data pointer, length 0 and capacity 0.
//!
//! The policy `P` picks the growth factor for [`push_back`], what [`at`]
//! reports and returns for a missing index, and what happens when an
//! allocation fails. The allocator `A` serves every allocation.
//!
//! [`push_back`]: FatVec::push_back
//! [`at`]: FatVec::at
//!
//! ## Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use fatvec::FatVec;
//!
//! let mut v = FatVec::with_capacity(0);
//! assert!(!v.is_allocated());
//!
//! v.push_back(5);
//! v.push_back(7);
//! v.push_back(9);
//! assert_eq!(v.len(), 3);
//! assert!(v.capacity() >= 3);
//! assert_eq!(v, [5, 7, 9]);
//!
//! assert_eq!(v.erase(1), Some(7));
//! assert_eq!(v, [5, 9]);
//! ```
//!
//! ### Checked Access
//!
//! [`at`] never reads past the end. A missing index is reported to the
//! policy and answered with a configured value:
//!
//! ```rust
//! use fatvec::{Config, FatVec, LogHook};
//!
//! let config = Config::new("<missing>").with_hook(LogHook);
//! let mut args = FatVec::with_policy(2, config);
//! args.push_back("fatvec");
//! args.push_back("--help");
//!
//! // one past the end: logged at warn level, then answered with the default
//! for i in 0..=args.len() {
//!     println!("{}", args.at(i));
//! }
//! assert_eq!(args.at(2), "<missing>");
//! ```
//!
//! ### Bulk Assignment
//!
//! ```rust
//! use fatvec::FatVec;
//!
//! let mut line = FatVec::new();
//! line.assign_fill(3, '?');
//! line.resize(6, '!');
//! assert_eq!(line, ['?', '?', '?', '!', '!', '!']);
//!
//! line.assign_range(&['o', 'k']);
//! assert_eq!(line, ['o', 'k']);
//! ```
//!
//! ## Invalidation
//!
//! Operations that may reallocate ([`push_back`], [`reserve`], [`grow`],
//! [`shrink_to_fit`], [`assign_fill`], [`assign_range`], [`resize`]) may move
//! the storage; raw pointers obtained before them must not be used after.
//! Operations that only change the length never move it.
//!
//! [`reserve`]: FatVec::reserve
//! [`grow`]: FatVec::grow
//! [`shrink_to_fit`]: FatVec::shrink_to_fit
//! [`assign_fill`]: FatVec::assign_fill
//! [`assign_range`]: FatVec::assign_range
//! [`resize`]: FatVec::resize
#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

mod error;
mod iter;
mod policy;
mod raw;

use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Deref, DerefMut, Range},
    ptr::{self, NonNull},
    slice,
};

pub use allocator_api2::alloc::{Allocator, Global};

pub use error::{ConfigError, TryReserveError};
pub use iter::IntoIter;
pub use policy::{
    BoundsPolicy, Config, DEFAULT_GROWTH_FACTOR, DefaultPolicy, FnHook, GrowthPolicy, LogHook,
    NoHook, OutOfBoundsHook,
};

/// Creates a [`FatVec`] containing the arguments, like [`vec!`].
///
/// ```
/// use fatvec::fatvec;
///
/// let v = fatvec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
///
/// let v = fatvec!['?'; 4];
/// assert_eq!(v, ['?'; 4]);
/// ```
#[macro_export]
macro_rules! fatvec {
    () => {
        $crate::FatVec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = $crate::FatVec::new();
        v.assign_fill($n, $elem);
        v
    }};
    ($($x:expr),+ $(,)?) => {
        $crate::FatVec::from([$($x),+])
    };
}

/// A contiguous growable vector with pluggable policy and allocator.
///
/// The vector is three quantities kept consistent by every operation: the
/// data pointer (or nothing, when no memory is owned), the capacity of the
/// block behind it, and the number of initialized elements at its front.
///
/// Like `Vec`, it is not safe to mutate one vector from several threads at
/// once; the borrow checker already requires callers to serialize access.
///
/// # Examples
///
/// ```
/// use fatvec::FatVec;
///
/// let mut v = FatVec::with_capacity(4);
/// for x in 1..=4 {
///     v.push_back(x);
/// }
/// assert_eq!(v.capacity(), 4);
///
/// // the fifth push grows the block once
/// v.push_back(5);
/// assert!(v.capacity() >= 5);
/// assert_eq!(v, [1, 2, 3, 4, 5]);
/// ```
pub struct FatVec<T, P = DefaultPolicy, A: Allocator = Global> {
    ptr: Option<NonNull<T>>,
    cap: usize,
    len: usize,
    policy: P,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the vector owns its elements like `Vec<T>` does
unsafe impl<T: Send, P: Send, A: Allocator + Send> Send for FatVec<T, P, A> {}
// SAFETY: shared access only hands out shared references to elements
unsafe impl<T: Sync, P: Sync, A: Allocator + Sync> Sync for FatVec<T, P, A> {}

impl<T> FatVec<T> {
    /// Constructs a new, empty `FatVec<T>` that owns no memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let v: FatVec<i32> = FatVec::new();
    /// assert_eq!(v.capacity(), 0);
    /// assert!(v.as_ptr().is_null());
    /// ```
    pub const fn new() -> Self {
        Self::new_in(DefaultPolicy, Global)
    }

    /// Constructs a new, empty `FatVec<T>` with room for exactly `capacity`
    /// elements.
    ///
    /// A capacity of 0 does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let v: FatVec<u64> = FatVec::with_capacity(10);
    /// assert_eq!(v.capacity(), 10);
    /// assert!(v.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, DefaultPolicy, Global)
    }
}

impl<T, P: GrowthPolicy> FatVec<T, P> {
    /// Constructs a new, empty vector with room for exactly `capacity`
    /// elements, governed by `policy`.
    pub fn with_policy(capacity: usize, policy: P) -> Self {
        Self::with_capacity_in(capacity, policy, Global)
    }
}

impl<T, P, A: Allocator> FatVec<T, P, A> {
    /// Constructs a new, empty vector that owns no memory, governed by
    /// `policy` and allocating from `alloc`.
    pub const fn new_in(policy: P, alloc: A) -> Self {
        Self {
            ptr: None,
            cap: 0,
            len: 0,
            policy,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Constructs a new, empty vector with room for exactly `capacity`
    /// elements, governed by `policy` and allocating from `alloc`.
    ///
    /// A failed allocation is passed to [`GrowthPolicy::fatal`].
    pub fn with_capacity_in(capacity: usize, policy: P, alloc: A) -> Self
    where
        P: GrowthPolicy,
    {
        let mut v = Self::new_in(policy, alloc);
        if capacity > 0 {
            v.grow(capacity);
        }
        v
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the vector can hold without
    /// reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the vector owns a block of memory.
    ///
    /// A vector that owns nothing always has capacity 0. Zero-sized element
    /// types never allocate, but report `true` once their capacity is
    /// non-zero.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Returns the policy governing this vector.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns a mutable reference to the policy governing this vector.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Returns a reference to the underlying allocator.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    fn data(&self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Returns a raw pointer to the first element, or null if the vector
    /// owns no memory.
    ///
    /// The pointer is invalidated by any operation that reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let mut v = FatVec::with_capacity(2);
    /// v.push_back(1);
    /// let p = v.as_ptr();
    /// v.push_back(2); // fits, so nothing moves
    /// assert_eq!(p, v.as_ptr());
    /// assert_eq!(unsafe { *p.add(1) }, 2);
    /// ```
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.map_or(ptr::null(), |p| p.as_ptr())
    }

    /// Returns a mutable raw pointer to the first element, or null if the
    /// vector owns no memory.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), |p| p.as_ptr())
    }

    /// Returns the half-open range `[first, first + len)` of raw pointers.
    ///
    /// Both ends are null if the vector owns no memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let empty: FatVec<u8> = FatVec::new();
    /// let range = empty.as_ptr_range();
    /// assert!(range.start.is_null() && range.end.is_null());
    ///
    /// let v = fatvec::fatvec![1u8, 2, 3];
    /// let range = v.as_ptr_range();
    /// assert_eq!(unsafe { range.end.offset_from(range.start) }, 3);
    /// ```
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        let start = self.as_ptr();
        // null stays null: the empty marker always has length 0
        start..start.wrapping_add(self.len)
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized; `data` is dangling
        // only while `len` is 0
        unsafe { slice::from_raw_parts(self.data(), self.len) }
    }

    /// Extracts a mutable slice containing the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness
        unsafe { slice::from_raw_parts_mut(self.data(), self.len) }
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// Use [`at`](FatVec::at) for a checked read.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: caller guarantees `index < len`
        unsafe { &*self.data().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: caller guarantees `index < len`
        unsafe { &mut *self.data().add(index) }
    }

    /// Sets the length of the vector without dropping or initializing
    /// anything.
    ///
    /// # Safety
    ///
    /// * `new_len` must be less than or equal to `capacity()`.
    /// * The elements at `old_len..new_len` must be initialized.
    /// * Elements at `new_len..old_len` are forgotten, not dropped.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.cap);
        self.len = new_len;
    }

    /// Removes the last element and returns it, or [`None`] if the vector is
    /// empty.
    ///
    /// Never reallocates and never moves the other elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let mut v = fatvec![1, 2];
    /// assert_eq!(v.pop_back(), Some(2));
    /// assert_eq!(v.pop_back(), Some(1));
    /// assert_eq!(v.pop_back(), None);
    /// assert_eq!(v.capacity(), 2);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialized and is now logically absent
        Some(unsafe { self.data().add(self.len).read() })
    }

    /// Removes the element at `index`, shifting every later element one
    /// position to the left, and returns it.
    ///
    /// Does nothing and returns [`None`] if `index >= len()`. Never
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let mut v = fatvec![10, 20, 30];
    /// assert_eq!(v.erase(1), Some(20));
    /// assert_eq!(v, [10, 30]);
    /// assert_eq!(v.erase(2), None);
    /// assert_eq!(v, [10, 30]);
    /// ```
    pub fn erase(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: `index < len`, so the slot is initialized and the tail
        // `index + 1..len` lies inside the block
        unsafe {
            let slot = self.data().add(index);
            let removed = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            Some(removed)
        }
    }

    /// Removes the first element, shifting the rest to the left, and returns
    /// it, or [`None`] if the vector is empty.
    ///
    /// This is *O*(n).
    pub fn pop_front(&mut self) -> Option<T> {
        self.erase(0)
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Has no effect if `len` is not less than the current length. Capacity is
    /// unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: `len < self.len`, so this stays inside the block
            unsafe { self.data().add(len) },
            self.len - len,
        );
        // shrink first so a panicking destructor cannot cause a double drop
        self.len = len;
        // SAFETY: the tail was initialized and is no longer reachable
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops every element. Capacity and storage address are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let mut v = fatvec!['a', 'b', 'c'];
    /// let p = v.as_ptr();
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 3);
    /// assert_eq!(v.as_ptr(), p);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every element and releases the storage.
    ///
    /// Equivalent to dropping the vector.
    pub fn free(self) {
        drop(self)
    }
}

impl<T, P: GrowthPolicy, A: Allocator> FatVec<T, P, A> {
    /// Reallocates the storage to hold exactly `capacity` elements, keeping
    /// the current elements.
    ///
    /// This is the only operation that changes the size of the allocation,
    /// and it does so unconditionally. A capacity of 0 releases the storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout overflows or the allocator fails; the
    /// vector is then unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is less than `len()`.
    pub fn try_grow(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        assert!(
            capacity >= self.len,
            "grow: capacity {capacity} is less than the length {}",
            self.len
        );
        let old_capacity = self.cap;
        // SAFETY: `ptr` and `cap` describe the current block, and no slot at
        // or past `capacity >= len` holds a live value
        self.ptr = unsafe { raw::reallocate(&self.alloc, self.ptr, self.cap, capacity)? };
        self.cap = capacity;
        log::trace!("fatvec: reallocated {old_capacity} -> {capacity} slots");
        Ok(())
    }

    /// Reallocates the storage to hold exactly `capacity` elements.
    ///
    /// Like [`try_grow`](FatVec::try_grow), but a failed allocation is passed
    /// to [`GrowthPolicy::fatal`].
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is less than `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let mut v = fatvec![1, 2];
    /// v.grow(10);
    /// assert_eq!(v.capacity(), 10);
    /// v.grow(2);
    /// assert_eq!(v.capacity(), 2);
    /// assert_eq!(v, [1, 2]);
    /// ```
    pub fn grow(&mut self, capacity: usize) {
        if let Err(err) = self.try_grow(capacity) {
            self.policy.fatal(err)
        }
    }

    /// Ensures the vector can hold at least `capacity` elements in total.
    ///
    /// Grows to exactly `capacity` if the current capacity is smaller, and
    /// never shrinks. Unlike the growth of [`push_back`](FatVec::push_back),
    /// no extra room is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let mut v: FatVec<i32> = FatVec::new();
    /// v.reserve(10);
    /// assert_eq!(v.capacity(), 10);
    /// v.reserve(5);
    /// assert_eq!(v.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.cap {
            self.grow(capacity);
        }
    }

    /// Tries to ensure the vector can hold at least `capacity` elements in
    /// total.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout overflows or the allocator fails; the
    /// vector is then unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::{FatVec, TryReserveError};
    ///
    /// let mut v: FatVec<u32> = FatVec::new();
    /// assert_eq!(v.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    /// assert_eq!(v.capacity(), 0);
    /// assert!(v.try_reserve(16).is_ok());
    /// ```
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        if capacity > self.cap {
            self.try_grow(capacity)?;
        }
        Ok(())
    }

    /// Releases unused capacity, reallocating to exactly `len()` slots.
    ///
    /// Does nothing if there is no unused capacity. Shrinking an empty vector
    /// releases its storage entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let mut v = FatVec::with_capacity(10);
    /// v.push_back(1);
    /// v.shrink_to_fit();
    /// assert_eq!(v.capacity(), 1);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.cap > self.len {
            self.grow(self.len);
        }
    }

    /// Makes room for `additional` more elements using the policy's growth.
    ///
    /// If the policy's capacity cannot be allocated, falls back to exactly
    /// the required capacity before giving up.
    fn reserve_amortized(&mut self, additional: usize) {
        let Some(required) = self.len.checked_add(additional) else {
            self.policy.fatal(TryReserveError::CapacityOverflow)
        };
        if required <= self.cap {
            return;
        }
        let target = self.policy.next_capacity(self.cap).max(required);
        if target > required && self.try_grow(target).is_ok() {
            return;
        }
        self.grow(required);
    }

    /// Makes room for `capacity` elements in an empty vector, releasing the
    /// old block first so nothing is copied.
    fn reserve_discarding(&mut self, capacity: usize) {
        debug_assert_eq!(self.len, 0);
        if capacity > self.cap {
            self.grow(0);
            self.grow(capacity);
        }
    }

    /// Appends an element to the back of the vector.
    ///
    /// If the vector is full it first grows to
    /// [`GrowthPolicy::next_capacity`], which gives amortized *O*(1) pushes.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let mut v = FatVec::new();
    /// v.push_back(5);
    /// assert_eq!(v.capacity(), 1);
    /// v.push_back(7);
    /// assert_eq!(v.capacity(), 2);
    /// v.push_back(9);
    /// assert_eq!(v.capacity(), 4);
    /// assert_eq!(v, [5, 7, 9]);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.len == self.cap {
            self.reserve_amortized(1);
        }
        // SAFETY: `len < cap` after the check above
        unsafe { self.data().add(self.len).write(value) };
        self.len += 1;
    }

    /// Resizes the vector to `new_len`, filling new slots with
    /// `T::default()`.
    ///
    /// See [`resize`](FatVec::resize).
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        while self.len < new_len {
            // SAFETY: `len < new_len <= cap`
            unsafe { self.data().add(self.len).write(T::default()) };
            self.len += 1;
        }
    }
}

impl<T: Clone, P: GrowthPolicy, A: Allocator> FatVec<T, P, A> {
    /// Writes `n` copies of `value` after the last element.
    ///
    /// The caller must have made room for `n` more elements.
    fn extend_with(&mut self, n: usize, value: T) {
        debug_assert!(self.cap - self.len >= n);
        if n == 0 {
            return;
        }
        // SAFETY: the caller reserved `n` slots past `len`; `len` is bumped
        // after every write so a panicking `clone` leaves no gap
        unsafe {
            let mut slot = self.data().add(self.len);
            for _ in 1..n {
                slot.write(value.clone());
                slot = slot.add(1);
                self.len += 1;
            }
            slot.write(value);
            self.len += 1;
        }
    }

    /// Clones `other` after the last element. The caller must have made room.
    fn write_cloned(&mut self, other: &[T]) {
        debug_assert!(self.cap - self.len >= other.len());
        for value in other {
            // SAFETY: room was reserved by the caller
            unsafe { self.data().add(self.len).write(value.clone()) };
            self.len += 1;
        }
    }

    /// Clones and appends every element of `other`.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.reserve_amortized(other.len());
        self.write_cloned(other);
    }

    /// Replaces the contents with `count` copies of `value`.
    ///
    /// Reserves exactly `count` slots if the current capacity is smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let mut v = fatvec![1, 2, 3, 4];
    /// v.assign_fill(2, 0);
    /// assert_eq!(v, [0, 0]);
    /// assert_eq!(v.capacity(), 4);
    /// ```
    pub fn assign_fill(&mut self, count: usize, value: T) {
        self.clear();
        self.reserve_discarding(count);
        self.extend_with(count, value);
    }

    /// Replaces the contents with clones of the elements of `range`.
    ///
    /// Reserves exactly `range.len()` slots if the current capacity is
    /// smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let mut v = FatVec::new();
    /// v.assign_range(&[3, 1, 4, 1, 5]);
    /// assert_eq!(v, [3, 1, 4, 1, 5]);
    /// assert_eq!(v.capacity(), 5);
    ///
    /// v.assign_range(&[]);
    /// assert!(v.is_empty());
    /// ```
    pub fn assign_range(&mut self, range: &[T]) {
        self.clear();
        self.reserve_discarding(range.len());
        self.write_cloned(range);
    }

    /// Resizes the vector to `new_len`.
    ///
    /// Growing past the current capacity reserves exactly `new_len` slots.
    /// Every newly exposed slot is set to a clone of `value`. Shrinking drops
    /// the elements past `new_len` and keeps the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::FatVec;
    ///
    /// let mut v = FatVec::new();
    /// v.assign_fill(3, '?');
    /// v.resize(6, '!');
    /// assert_eq!(v, ['?', '?', '?', '!', '!', '!']);
    /// assert_eq!(v.capacity(), 6);
    ///
    /// v.resize(2, '!');
    /// assert_eq!(v, ['?', '?']);
    /// assert_eq!(v.capacity(), 6);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        self.extend_with(new_len - self.len, value);
    }
}

impl<T: Clone, P: BoundsPolicy<T>, A: Allocator> FatVec<T, P, A> {
    /// Returns a clone of the element at `index`, with bounds checking.
    ///
    /// If `index >= len()`, nothing is read: the policy's
    /// [`out_of_bounds`](BoundsPolicy::out_of_bounds) hook is called and its
    /// [`out_of_bounds_value`](BoundsPolicy::out_of_bounds_value) is
    /// returned. This never panics on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatvec::fatvec;
    ///
    /// let v = fatvec![7, 8];
    /// assert_eq!(v.at(1), 8);
    /// assert_eq!(v.at(2), 0);
    /// ```
    pub fn at(&self, index: usize) -> T {
        match self.as_slice().get(index) {
            Some(value) => value.clone(),
            None => {
                self.policy.out_of_bounds("at", self.as_slice(), index);
                self.policy.out_of_bounds_value()
            }
        }
    }
}

impl<T, P, A: Allocator> Drop for FatVec<T, P, A> {
    fn drop(&mut self) {
        let elements = ptr::slice_from_raw_parts_mut(self.data(), self.len);
        // SAFETY: the block was allocated by `alloc` with `cap` slots and is
        // released only by this guard
        let _block = unsafe { raw::DeallocGuard::new(&self.alloc, self.ptr, self.cap) };
        // SAFETY: the first `len` slots are initialized and dropped exactly once
        unsafe { ptr::drop_in_place(elements) };
    }
}

impl<T, P, A: Allocator> Deref for FatVec<T, P, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, P, A: Allocator> DerefMut for FatVec<T, P, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, P, A: Allocator> AsRef<[T]> for FatVec<T, P, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, P, A: Allocator> AsMut<[T]> for FatVec<T, P, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, P, A: Allocator> fmt::Debug for FatVec<T, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T, P: Default, A: Allocator + Default> Default for FatVec<T, P, A> {
    fn default() -> Self {
        Self::new_in(P::default(), A::default())
    }
}

impl<T: Clone, P: GrowthPolicy + Clone, A: Allocator + Clone> Clone for FatVec<T, P, A> {
    fn clone(&self) -> Self {
        let mut v = Self::with_capacity_in(self.len, self.policy.clone(), self.alloc.clone());
        v.write_cloned(self.as_slice());
        v
    }
}

impl<T: Hash, P, A: Allocator> Hash for FatVec<T, P, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<T, U, P1, P2, A1, A2> PartialEq<FatVec<U, P2, A2>> for FatVec<T, P1, A1>
where
    T: PartialEq<U>,
    A1: Allocator,
    A2: Allocator,
{
    fn eq(&self, other: &FatVec<U, P2, A2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, P, A: Allocator> Eq for FatVec<T, P, A> {}

impl<T: PartialEq<U>, U, P, A: Allocator> PartialEq<[U]> for FatVec<T, P, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, P, A: Allocator> PartialEq<&[U]> for FatVec<T, P, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, P, A: Allocator, const N: usize> PartialEq<[U; N]> for FatVec<T, P, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, P: GrowthPolicy, A: Allocator> Extend<T> for FatVec<T, P, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_amortized(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, P: GrowthPolicy, A: Allocator> Extend<&'a T> for FatVec<T, P, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, P: GrowthPolicy + Default, A: Allocator + Default> FromIterator<T> for FatVec<T, P, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::default();
        v.extend(iter);
        v
    }
}

impl<T: Clone> From<&[T]> for FatVec<T> {
    fn from(values: &[T]) -> Self {
        let mut v = Self::with_capacity(values.len());
        v.write_cloned(values);
        v
    }
}

impl<T, const N: usize> From<[T; N]> for FatVec<T> {
    fn from(values: [T; N]) -> Self {
        let mut v = Self::with_capacity(N);
        for value in values {
            v.push_back(value);
        }
        v
    }
}

impl<'a, T, P, A: Allocator> IntoIterator for &'a FatVec<T, P, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, P, A: Allocator> IntoIterator for &'a mut FatVec<T, P, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
