//! # rollwin API
//!
//! Ergonomic entry points for rolling-window aggregation.
//!
//! The [`RollingExt`] extension trait hangs rolling constructors off any
//! owned iterable, so a pipeline reads front to back:
//!
//! ```rust
//! use rollwin_api::prelude::*;
//!
//! let sums: Vec<i64> = vec![1i64, 5, 2, 0, 3]
//!     .rolling_sum(3, WindowKind::Fixed)
//!     .unwrap()
//!     .map(|r| r.unwrap())
//!     .collect();
//! assert_eq!(sums, vec![8, 7, 5]);
//! ```
//!
//! Aggregators with extra parameters (ddof, entropy base, hash modulus,
//! match targets, ...) are constructed explicitly and driven through the
//! generic [`RollingExt::rolling`]:
//!
//! ```rust
//! use rollwin_api::prelude::*;
//! use rollwin_core::ops::Var;
//!
//! let sample_var = vec![2.0, 4.0, 6.0, 8.0]
//!     .rolling(Var::with_ddof(1), WindowSpec::fixed(3))
//!     .unwrap();
//! ```

pub use rollwin_core;

use rollwin_core::ops::{
    All, Any, Apply, Max, Mean, Median, Min, MinHeap, Mode, Monotonic, Nunique, Sum,
};
use rollwin_core::{Result, Rolling, WindowAggregator, WindowKind, WindowSpec};

/// Rolling-window constructors for any owned iterable.
///
/// Each method wraps `self` in a [`Rolling`] driver; the result is a lazy
/// iterator of `Result` aggregates.
pub trait RollingExt: IntoIterator + Sized
where
    Self::IntoIter: 'static,
{
    /// Drive an explicitly constructed aggregator over this input.
    fn rolling<A>(self, agg: A, spec: WindowSpec) -> Result<Rolling<A>>
    where
        A: WindowAggregator<Input = Self::Item>,
    {
        Rolling::new(agg, self, spec)
    }

    /// Rolling minimum (monotonic deque).
    fn rolling_min(self, size: usize, kind: WindowKind) -> Result<Rolling<Min<Self::Item>>>
    where
        Self::Item: PartialOrd + Clone,
    {
        self.rolling(Min::new(), WindowSpec::new(size, kind))
    }

    /// Rolling maximum (monotonic deque).
    fn rolling_max(self, size: usize, kind: WindowKind) -> Result<Rolling<Max<Self::Item>>>
    where
        Self::Item: PartialOrd + Clone,
    {
        self.rolling(Max::new(), WindowSpec::new(size, kind))
    }

    /// Rolling minimum (lazy-deletion heap).
    fn rolling_min_heap(
        self,
        size: usize,
        kind: WindowKind,
    ) -> Result<Rolling<MinHeap<Self::Item>>>
    where
        Self::Item: Ord + Clone,
    {
        self.rolling(MinHeap::new(), WindowSpec::new(size, kind))
    }

    /// Rolling sum.
    fn rolling_sum(self, size: usize, kind: WindowKind) -> Result<Rolling<Sum<Self::Item>>>
    where
        Self::Item: Copy
            + rollwin_core::num_traits::Zero
            + std::ops::Add<Output = Self::Item>
            + std::ops::Sub<Output = Self::Item>,
    {
        self.rolling(Sum::new(), WindowSpec::new(size, kind))
    }

    /// Rolling count of distinct values.
    fn rolling_nunique(
        self,
        size: usize,
        kind: WindowKind,
    ) -> Result<Rolling<Nunique<Self::Item>>>
    where
        Self::Item: std::hash::Hash + Eq + Clone,
    {
        self.rolling(Nunique::new(), WindowSpec::new(size, kind))
    }

    /// Rolling arithmetic mean.
    fn rolling_mean(self, size: usize, kind: WindowKind) -> Result<Rolling<Mean>>
    where
        Self: IntoIterator<Item = f64>,
    {
        self.rolling(Mean::new(), WindowSpec::new(size, kind))
    }

    /// Rolling median.
    fn rolling_median(self, size: usize, kind: WindowKind) -> Result<Rolling<Median>>
    where
        Self: IntoIterator<Item = f64>,
    {
        self.rolling(Median::new(size), WindowSpec::new(size, kind))
    }

    /// Rolling mode: the set of most common values.
    fn rolling_mode(self, size: usize, kind: WindowKind) -> Result<Rolling<Mode<Self::Item>>>
    where
        Self::Item: std::hash::Hash + Eq + Clone,
    {
        self.rolling(Mode::new(), WindowSpec::new(size, kind))
    }

    /// Rolling "any value is true".
    fn rolling_any(self, size: usize, kind: WindowKind) -> Result<Rolling<Any>>
    where
        Self: IntoIterator<Item = bool>,
    {
        self.rolling(Any::new(), WindowSpec::new(size, kind))
    }

    /// Rolling "all values are true".
    fn rolling_all(self, size: usize, kind: WindowKind) -> Result<Rolling<All>>
    where
        Self: IntoIterator<Item = bool>,
    {
        self.rolling(All::new(), WindowSpec::new(size, kind))
    }

    /// Rolling monotonicity test.
    fn rolling_monotonic(
        self,
        size: usize,
        kind: WindowKind,
    ) -> Result<Rolling<Monotonic<Self::Item>>>
    where
        Self::Item: PartialOrd + Clone,
    {
        self.rolling(Monotonic::new(), WindowSpec::new(size, kind))
    }

    /// Apply a function to each materialised window.
    fn rolling_apply<F, OUT>(
        self,
        size: usize,
        kind: WindowKind,
        operation: F,
    ) -> Result<Rolling<Apply<Self::Item, F, OUT>>>
    where
        Self::Item: Clone,
        F: Fn(&[Self::Item]) -> OUT,
    {
        self.rolling(Apply::new(operation), WindowSpec::new(size, kind))
    }
}

impl<I> RollingExt for I
where
    I: IntoIterator + Sized,
    I::IntoIter: 'static,
{
}

/// One-stop imports for typical use.
pub mod prelude {
    pub use crate::RollingExt;
    pub use rollwin_core::{
        Error, Phase, Result, Rolling, RollingIndexed, RollingPairwise, WindowAggregator,
        WindowKind, WindowSpec,
    };
}
