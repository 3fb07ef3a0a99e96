//! # rollwin core
//!
//! Incremental rolling-window aggregators over lazy input streams.
//!
//! Every aggregator keeps auxiliary state so that advancing the window by
//! one element costs O(1) or O(log k) instead of O(k), where k is the
//! window size. The crate provides:
//!
//! - [`aggregator`] — the uniform contract:
//!   [`WindowAggregator`](aggregator::WindowAggregator) with
//!   `add_new` / `remove_old` / `current_value` / `len`.
//! - [`window`] — the window-position drivers:
//!   [`Rolling`](window::Rolling) (fixed and variable windows),
//!   [`RollingIndexed`](window::RollingIndexed) (time-gap eviction over
//!   `(index, value)` streams), [`RollingPairwise`](window::RollingPairwise)
//!   (two parallel streams).
//! - [`ops`] — the aggregator collection: [`Min`](ops::Min),
//!   [`Max`](ops::Max), [`MinHeap`](ops::MinHeap), [`Sum`](ops::Sum),
//!   [`Product`](ops::Product), [`Nunique`](ops::Nunique),
//!   [`Mean`](ops::Mean), [`Var`](ops::Var), [`Std`](ops::Std),
//!   [`Skew`](ops::Skew), [`Kurtosis`](ops::Kurtosis),
//!   [`Median`](ops::Median), [`Mode`](ops::Mode),
//!   [`Entropy`](ops::Entropy), [`Any`](ops::Any), [`All`](ops::All),
//!   [`Monotonic`](ops::Monotonic), [`Match`](ops::Match),
//!   [`PolynomialHash`](ops::PolynomialHash),
//!   [`JaccardIndex`](ops::JaccardIndex), [`Apply`](ops::Apply),
//!   [`ApplyPairwise`](ops::ApplyPairwise).
//! - [`structures`] — the auxiliary data structures:
//!   [`IndexableSkiplist`](structures::IndexableSkiplist),
//!   [`BiCounter`](structures::BiCounter),
//!   [`Welford`](structures::Welford).
//! - [`feed`] — [`Feed`](feed::Feed): the pull-based input cursor with
//!   end-of-stream signalling and late extension.
//!
//! Everything is single-threaded cooperative pull: the consumer drives
//! progress by requesting the next output, and the only suspension point
//! is the pull of the next upstream input.

// Re-exported for downstream crates that spell out the numeric bounds.
pub use num_traits;

pub mod aggregator;
pub mod error;
pub mod feed;
pub mod ops;
pub mod structures;
pub mod types;
pub mod window;

pub use aggregator::WindowAggregator;
pub use error::{Error, Result};
pub use feed::Feed;
pub use types::{Phase, WindowKind, WindowSpec};
pub use window::{Rolling, RollingIndexed, RollingPairwise};
