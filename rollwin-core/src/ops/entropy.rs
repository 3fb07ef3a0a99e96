use std::collections::VecDeque;
use std::hash::Hash;

use ahash::AHashMap;

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};
use crate::types::WindowKind;

/// Rolling Shannon entropy over a full fixed window, in an arbitrary base.
///
/// Maintains `S = sum(count * ln(count))` over the value counts so every
/// update is O(1); the entropy of a full window of size k is
/// `(ln k - S/k) / ln base`.
///
/// With a reference distribution the aggregator computes relative entropy
/// (KL divergence) of the window's empirical distribution against the
/// reference instead; observing a value with zero or missing reference
/// probability is a domain error.
///
/// Only fixed windows are supported: the formula divides by the full
/// window size, so partial windows have no meaningful value.
#[derive(Debug, Clone)]
pub struct Entropy<T>
where
    T: Hash + Eq + Clone,
{
    window_size: usize,
    ln_base: f64,
    counts: AHashMap<T, usize>,
    buffer: VecDeque<T>,
    /// `sum(count * ln(count))` over current value counts.
    count_ln_sum: f64,
    reference: Option<AHashMap<T, f64>>,
    /// `sum(ln p(elem))` over window elements, when a reference is set.
    ref_ln_sum: f64,
}

impl<T> Entropy<T>
where
    T: Hash + Eq + Clone,
{
    /// Natural-log entropy over fixed windows of `window_size`.
    pub fn new(window_size: usize) -> Result<Self> {
        Self::with_base(window_size, std::f64::consts::E)
    }

    /// Entropy in the given logarithm base (`base > 0`, `base != 1`).
    pub fn with_base(window_size: usize, base: f64) -> Result<Self> {
        Self::build(window_size, base, None)
    }

    /// Relative entropy against a reference distribution.
    pub fn with_reference(
        window_size: usize,
        base: f64,
        reference: impl IntoIterator<Item = (T, f64)>,
    ) -> Result<Self> {
        Self::build(window_size, base, Some(reference.into_iter().collect()))
    }

    fn build(
        window_size: usize,
        base: f64,
        reference: Option<AHashMap<T, f64>>,
    ) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::Domain("entropy window size must be positive".into()));
        }
        if base <= 0.0 || base == 1.0 {
            return Err(Error::Domain(format!(
                "entropy base must be positive and not 1, got {base}"
            )));
        }
        Ok(Self {
            window_size,
            ln_base: base.ln(),
            counts: AHashMap::new(),
            buffer: VecDeque::new(),
            count_ln_sum: 0.0,
            reference,
            ref_ln_sum: 0.0,
        })
    }
}

impl<T> WindowAggregator for Entropy<T>
where
    T: Hash + Eq + Clone,
{
    type Input = T;
    type Output = f64;

    fn add_new(&mut self, value: T) -> Result<()> {
        if let Some(reference) = &self.reference {
            let p = reference.get(&value).copied().unwrap_or(0.0);
            if p <= 0.0 {
                return Err(Error::Domain(
                    "observed value has zero reference probability".into(),
                ));
            }
            self.ref_ln_sum += p.ln();
        }
        let count = self.counts.entry(value.clone()).or_insert(0);
        if *count > 0 {
            self.count_ln_sum -= (*count as f64) * (*count as f64).ln();
        }
        *count += 1;
        self.count_ln_sum += (*count as f64) * (*count as f64).ln();
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        if let Some(reference) = &self.reference {
            // add_new admitted the value, so the probability is present.
            if let Some(p) = reference.get(&old) {
                self.ref_ln_sum -= p.ln();
            }
        }
        if let Some(count) = self.counts.get_mut(&old) {
            self.count_ln_sum -= (*count as f64) * (*count as f64).ln();
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&old);
            } else {
                self.count_ln_sum += (*count as f64) * (*count as f64).ln();
            }
        }
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        let n = self.buffer.len();
        if n < self.window_size {
            return Err(Error::InsufficientData {
                operation: "Entropy",
                required: self.window_size,
                len: n,
            });
        }
        let k = self.window_size as f64;
        let nats = match &self.reference {
            // H = -sum((c/k) ln(c/k)) = ln k - S/k
            None => k.ln() - self.count_ln_sum / k,
            // KL = sum((c/k) ln(c/(k p))) = S/k - ln k - P/k
            Some(_) => self.count_ln_sum / k - k.ln() - self.ref_ln_sum / k,
        };
        Ok(nats / self.ln_base)
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn supports(&self, kind: WindowKind) -> bool {
        matches!(kind, WindowKind::Fixed)
    }
}
