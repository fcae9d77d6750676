//! Instantiation-time configuration for [`FatVec`](crate::FatVec).
//!
//! A vector carries one policy value, chosen when its type is written down.
//! [`GrowthPolicy`] decides how capacity grows and what happens when an
//! allocation cannot be satisfied; [`BoundsPolicy`] decides what a checked
//! read past the end reports and returns. [`DefaultPolicy`] is zero-sized and
//! compiles down to nothing; [`Config`] carries its settings as values.

use core::fmt;

use crate::error::{ConfigError, TryReserveError};

/// Growth factor used when none is configured.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

/// Decides the capacity of automatic growth and handles fatal allocation
/// errors.
pub trait GrowthPolicy {
    /// Multiplier applied to the capacity on automatic growth.
    #[inline]
    fn growth_factor(&self) -> f64 {
        DEFAULT_GROWTH_FACTOR
    }

    /// Capacity to grow to when a push finds the vector full.
    ///
    /// The default is `floor(capacity * growth_factor) + 1`, which strictly
    /// increases even from 0. A result that would not make room for one more
    /// element is raised to `len + 1` by the vector.
    #[inline]
    fn next_capacity(&self, capacity: usize) -> usize {
        ((capacity as f64 * self.growth_factor()) as usize).saturating_add(1)
    }

    /// Called when an infallible operation cannot reallocate. Never returns.
    ///
    /// By default a capacity overflow panics and an allocator failure goes to
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error).
    #[cold]
    fn fatal(&self, err: TryReserveError) -> ! {
        match err {
            TryReserveError::CapacityOverflow => panic!("capacity overflow"),
            TryReserveError::AllocError { layout } => alloc::alloc::handle_alloc_error(layout),
        }
    }
}

/// Decides what a checked read of a missing element reports and returns.
pub trait BoundsPolicy<T> {
    /// Called before [`out_of_bounds_value`](BoundsPolicy::out_of_bounds_value)
    /// with the name of the operation, the current contents and the offending
    /// index.
    #[inline]
    fn out_of_bounds(&self, op: &'static str, contents: &[T], index: usize) {
        let _ = (op, contents, index);
    }

    /// Value returned by a checked read of a missing element.
    fn out_of_bounds_value(&self) -> T;
}

/// Zero-sized policy: growth factor 1.5, silent bounds checks returning
/// `T::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultPolicy;

impl GrowthPolicy for DefaultPolicy {}

impl<T: Default> BoundsPolicy<T> for DefaultPolicy {
    #[inline]
    fn out_of_bounds_value(&self) -> T {
        T::default()
    }
}

/// Receives out-of-bounds reports from a [`Config`].
pub trait OutOfBoundsHook<T> {
    /// Reports a checked read of `index` while the vector held `contents`.
    fn report(&self, op: &'static str, contents: &[T], index: usize);
}

/// Hook that ignores every report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoHook;

impl<T> OutOfBoundsHook<T> for NoHook {
    #[inline]
    fn report(&self, _op: &'static str, _contents: &[T], _index: usize) {}
}

/// Hook that logs every report at warn level through the [`log`] facade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LogHook;

impl<T> OutOfBoundsHook<T> for LogHook {
    fn report(&self, op: &'static str, contents: &[T], index: usize) {
        log::warn!(
            "out of bounds in {op} (vec = {:p}, i = {index}, len = {})",
            contents.as_ptr(),
            contents.len()
        );
    }
}

/// Hook that forwards every report to a closure.
#[derive(Clone, Copy, Default)]
pub struct FnHook<F>(pub F);

impl<F> fmt::Debug for FnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").finish_non_exhaustive()
    }
}

impl<T, F> OutOfBoundsHook<T> for FnHook<F>
where
    F: Fn(&'static str, &[T], usize),
{
    #[inline]
    fn report(&self, op: &'static str, contents: &[T], index: usize) {
        (self.0)(op, contents, index)
    }
}

/// A policy that carries its settings as values.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use fatvec::{Config, FatVec};
///
/// let misses = Cell::new(0);
/// let config = Config::new(-1)
///     .with_growth_factor(2.0)
///     .unwrap()
///     .on_out_of_bounds(|_op, _contents, _index| misses.set(misses.get() + 1));
///
/// let mut v = FatVec::with_policy(0, config);
/// v.push_back(10);
/// assert_eq!(v.at(0), 10);
/// assert_eq!(v.at(1), -1);
/// assert_eq!(misses.get(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Config<T, H = NoHook> {
    growth_factor: f64,
    default_value: T,
    hook: H,
}

impl<T> Config<T> {
    /// Creates a config with the default growth factor, no hook, and
    /// `default_value` returned by out-of-bounds reads.
    pub const fn new(default_value: T) -> Self {
        Self {
            growth_factor: DEFAULT_GROWTH_FACTOR,
            default_value,
            hook: NoHook,
        }
    }
}

impl<T: Default> Default for Config<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, H> Config<T, H> {
    /// Sets the multiplier used on automatic growth.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrowthFactor`] unless `factor` is finite
    /// and at least 1.
    pub fn with_growth_factor(mut self, factor: f64) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor < 1.0 {
            return Err(ConfigError::InvalidGrowthFactor(factor));
        }
        self.growth_factor = factor;
        Ok(self)
    }

    /// Replaces the value returned by out-of-bounds reads.
    pub fn with_default_value(mut self, default_value: T) -> Self {
        self.default_value = default_value;
        self
    }

    /// Replaces the out-of-bounds hook.
    pub fn with_hook<H2>(self, hook: H2) -> Config<T, H2> {
        Config {
            growth_factor: self.growth_factor,
            default_value: self.default_value,
            hook,
        }
    }

    /// Replaces the out-of-bounds hook with a closure taking the operation
    /// name, the current contents and the offending index.
    pub fn on_out_of_bounds<F>(self, hook: F) -> Config<T, FnHook<F>>
    where
        F: Fn(&'static str, &[T], usize),
    {
        self.with_hook(FnHook(hook))
    }

    /// Value returned by out-of-bounds reads.
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// The out-of-bounds hook.
    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<T, H> GrowthPolicy for Config<T, H> {
    #[inline]
    fn growth_factor(&self) -> f64 {
        self.growth_factor
    }
}

impl<T: Clone, H: OutOfBoundsHook<T>> BoundsPolicy<T> for Config<T, H> {
    #[inline]
    fn out_of_bounds(&self, op: &'static str, contents: &[T], index: usize) {
        self.hook.report(op, contents, index);
    }

    #[inline]
    fn out_of_bounds_value(&self) -> T {
        self.default_value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_growth_sequence() {
        let caps: Vec<usize> = core::iter::successors(Some(0), |&c| {
            Some(GrowthPolicy::next_capacity(&DefaultPolicy, c))
        })
        .take(8)
        .collect();
        assert_eq!(caps, [0, 1, 2, 4, 7, 11, 17, 26]);
    }

    #[test]
    fn growth_factor_one_is_linear() {
        let config = Config::new(0u8).with_growth_factor(1.0).unwrap();
        assert_eq!(config.next_capacity(0), 1);
        assert_eq!(config.next_capacity(10), 11);
    }

    #[test]
    fn next_capacity_saturates() {
        assert_eq!(DefaultPolicy.next_capacity(usize::MAX), usize::MAX);
    }

    #[test]
    fn rejects_bad_growth_factors() {
        for factor in [0.5, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            let err = Config::new(0u8).with_growth_factor(factor).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidGrowthFactor(_)));
        }
    }

    #[test]
    fn config_error_message() {
        let err = Config::new(0u8).with_growth_factor(0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "growth factor must be a finite number >= 1, got 0.5"
        );
    }

    #[test]
    fn default_policy_returns_default() {
        let value: i32 = BoundsPolicy::out_of_bounds_value(&DefaultPolicy);
        assert_eq!(value, 0);
        let value: Option<&str> = BoundsPolicy::out_of_bounds_value(&DefaultPolicy);
        assert_eq!(value, None);
    }

    #[test]
    fn config_builders_keep_settings() {
        let config = Config::new('?')
            .with_growth_factor(3.0)
            .unwrap()
            .with_hook(LogHook)
            .with_default_value('!');
        assert_eq!(GrowthPolicy::growth_factor(&config), 3.0);
        assert_eq!(*config.default_value(), '!');
        assert_eq!(*config.hook(), LogHook);
    }
}
