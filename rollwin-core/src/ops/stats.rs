use std::collections::VecDeque;
use std::hash::Hash;

use ahash::AHashSet;

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};
use crate::structures::{BiCounter, IndexableSkiplist, Welford};

// Variance below this is treated as zero when normalising the higher
// moments; matches the pandas rolling guard.
const DEGENERATE_VAR: f64 = 1e-14;

// ── Mean ──────────────────────────────────────────────────────────────────

/// Rolling arithmetic mean over the shared moment accumulator.
#[derive(Debug, Clone, Default)]
pub struct Mean {
    buffer: VecDeque<f64>,
    moments: Welford,
}

impl Mean {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowAggregator for Mean {
    type Input = f64;
    type Output = f64;

    fn add_new(&mut self, value: f64) -> Result<()> {
        self.moments.push(value);
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        self.moments.evict(old);
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        if self.buffer.is_empty() {
            return Err(Error::InsufficientData {
                operation: "Mean",
                required: 1,
                len: 0,
            });
        }
        Ok(self.moments.mean())
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

// ── Var / Std ─────────────────────────────────────────────────────────────

/// Rolling variance with Welford updates.
///
/// The divisor is `len - ddof`; reading with `len <= ddof` is an
/// insufficient-data error. A squared-sum driven negative by cancellation
/// is clamped to zero.
#[derive(Debug, Clone)]
pub struct Var {
    buffer: VecDeque<f64>,
    moments: Welford,
    ddof: usize,
}

impl Var {
    /// Population variance (`ddof = 0`).
    pub fn new() -> Self {
        Self::with_ddof(0)
    }

    /// Variance with the given delta degrees of freedom.
    pub fn with_ddof(ddof: usize) -> Self {
        Self {
            buffer: VecDeque::new(),
            moments: Welford::new(),
            ddof,
        }
    }

    fn variance(&self, operation: &'static str) -> Result<f64> {
        let n = self.buffer.len();
        if n <= self.ddof {
            return Err(Error::InsufficientData {
                operation,
                required: self.ddof + 1,
                len: n,
            });
        }
        Ok(self.moments.m2().max(0.0) / (n - self.ddof) as f64)
    }
}

impl Default for Var {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowAggregator for Var {
    type Input = f64;
    type Output = f64;

    fn add_new(&mut self, value: f64) -> Result<()> {
        self.moments.push(value);
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        self.moments.evict(old);
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        self.variance("Var")
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

/// Rolling standard deviation: the square root of [`Var`].
#[derive(Debug, Clone, Default)]
pub struct Std {
    inner: Var,
}

impl Std {
    pub fn new() -> Self {
        Self::with_ddof(0)
    }

    pub fn with_ddof(ddof: usize) -> Self {
        Self {
            inner: Var::with_ddof(ddof),
        }
    }
}

impl WindowAggregator for Std {
    type Input = f64;
    type Output = f64;

    fn add_new(&mut self, value: f64) -> Result<()> {
        self.inner.add_new(value)
    }

    fn remove_old(&mut self) -> Result<()> {
        self.inner.remove_old()
    }

    fn current_value(&self) -> Result<f64> {
        Ok(self.inner.variance("Std")?.sqrt())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

// ── Skew / Kurtosis ───────────────────────────────────────────────────────

/// Rolling sample skewness from the third central moment.
///
/// Needs at least three values; a near-constant window yields NaN.
#[derive(Debug, Clone, Default)]
pub struct Skew {
    buffer: VecDeque<f64>,
    moments: Welford,
}

impl Skew {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowAggregator for Skew {
    type Input = f64;
    type Output = f64;

    fn add_new(&mut self, value: f64) -> Result<()> {
        self.moments.push(value);
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        self.moments.evict(old);
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        let n = self.buffer.len();
        if n < 3 {
            return Err(Error::InsufficientData {
                operation: "Skew",
                required: 3,
                len: n,
            });
        }
        let nf = n as f64;
        let b = self.moments.m2() / nf;
        if b <= DEGENERATE_VAR {
            return Ok(f64::NAN);
        }
        let c = self.moments.m3() / nf;
        Ok((nf * (nf - 1.0)).sqrt() * c / ((nf - 2.0) * b * b.sqrt()))
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

/// Rolling sample excess kurtosis from the fourth central moment.
///
/// Needs at least four values; a near-constant window yields NaN.
#[derive(Debug, Clone, Default)]
pub struct Kurtosis {
    buffer: VecDeque<f64>,
    moments: Welford,
}

impl Kurtosis {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowAggregator for Kurtosis {
    type Input = f64;
    type Output = f64;

    fn add_new(&mut self, value: f64) -> Result<()> {
        self.moments.push(value);
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        self.moments.evict(old);
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        let n = self.buffer.len();
        if n < 4 {
            return Err(Error::InsufficientData {
                operation: "Kurtosis",
                required: 4,
                len: n,
            });
        }
        let nf = n as f64;
        let b = self.moments.m2() / nf;
        if b <= DEGENERATE_VAR {
            return Ok(f64::NAN);
        }
        let d = self.moments.m4() / nf;
        let k = (nf * nf - 1.0) * d / (b * b) - 3.0 * (nf - 1.0) * (nf - 1.0);
        Ok(k / ((nf - 2.0) * (nf - 3.0)))
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

// ── Median ────────────────────────────────────────────────────────────────

/// Rolling median via an indexable skiplist.
///
/// O(log k) expected insert/remove, O(log k) middle lookup. An even-sized
/// window yields the mean of the two middle ranks.
#[derive(Debug)]
pub struct Median {
    buffer: VecDeque<f64>,
    skiplist: IndexableSkiplist,
}

impl Median {
    /// `expected_size` sizes the skiplist level count; the window may
    /// exceed it without breaking correctness.
    pub fn new(expected_size: usize) -> Self {
        Self {
            buffer: VecDeque::new(),
            skiplist: IndexableSkiplist::new(expected_size),
        }
    }
}

impl WindowAggregator for Median {
    type Input = f64;
    type Output = f64;

    fn add_new(&mut self, value: f64) -> Result<()> {
        self.skiplist.insert(value);
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        let removed = self.skiplist.remove(old);
        debug_assert!(removed, "skiplist out of sync with window buffer");
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        let n = self.buffer.len();
        if n == 0 {
            return Err(Error::InsufficientData {
                operation: "Median",
                required: 1,
                len: 0,
            });
        }
        if n % 2 == 1 {
            Ok(self.skiplist.get(n / 2))
        } else {
            Ok((self.skiplist.get(n / 2 - 1) + self.skiplist.get(n / 2)) / 2.0)
        }
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

// ── Mode ──────────────────────────────────────────────────────────────────

/// Rolling mode: the set of values tied for the highest count.
///
/// An empty window yields the empty set rather than an error, so the
/// aggregator stays total while a variable window drains.
#[derive(Debug, Clone, Default)]
pub struct Mode<T>
where
    T: Hash + Eq + Clone,
{
    buffer: VecDeque<T>,
    counter: BiCounter<T>,
}

impl<T> Mode<T>
where
    T: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            counter: BiCounter::new(),
        }
    }

    /// The count shared by the most common values; 0 when empty.
    pub fn largest_count(&self) -> usize {
        self.counter.largest_count()
    }
}

impl<T> WindowAggregator for Mode<T>
where
    T: Hash + Eq + Clone,
{
    type Input = T;
    type Output = AHashSet<T>;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.counter.increment(value.clone());
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        self.counter.decrement(&old);
        Ok(())
    }

    fn current_value(&self) -> Result<AHashSet<T>> {
        Ok(self.counter.most_common())
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

/// [`Mode`] that also reports the winning count alongside the value set.
#[derive(Debug, Clone, Default)]
pub struct ModeCount<T>
where
    T: Hash + Eq + Clone,
{
    inner: Mode<T>,
}

impl<T> ModeCount<T>
where
    T: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self { inner: Mode::new() }
    }
}

impl<T> WindowAggregator for ModeCount<T>
where
    T: Hash + Eq + Clone,
{
    type Input = T;
    type Output = (AHashSet<T>, usize);

    fn add_new(&mut self, value: T) -> Result<()> {
        self.inner.add_new(value)
    }

    fn remove_old(&mut self) -> Result<()> {
        self.inner.remove_old()
    }

    fn current_value(&self) -> Result<(AHashSet<T>, usize)> {
        Ok((self.inner.counter.most_common(), self.inner.largest_count()))
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
