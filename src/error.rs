//! Error types.

use core::alloc::Layout;

use thiserror::Error;

/// The error type for fallible reallocation, returned by
/// [`FatVec::try_reserve`](crate::FatVec::try_reserve) and
/// [`FatVec::try_grow`](crate::FatVec::try_grow).
///
/// The infallible operations hand the same value to
/// [`GrowthPolicy::fatal`](crate::GrowthPolicy::fatal) instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TryReserveError {
    /// The requested capacity exceeds `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The allocator returned an error.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// The layout of the allocation request that failed.
        layout: Layout,
    },
}

/// The error type for invalid [`Config`](crate::Config) values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Growth factors must be finite and at least 1.
    #[error("growth factor must be a finite number >= 1, got {0}")]
    InvalidGrowthFactor(f64),
}
