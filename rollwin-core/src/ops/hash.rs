use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};

/// Default polynomial base.
pub const DEFAULT_BASE: u64 = 256;
/// Default modulus: the Mersenne prime 2^61 - 1.
pub const DEFAULT_MODULUS: u64 = (1 << 61) - 1;

/// Modular exponentiation over u128 intermediates.
fn pow_mod(mut base: u128, mut exp: u64, modulus: u128) -> u64 {
    let mut acc: u128 = 1 % modulus;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    acc as u64
}

/// Rolling polynomial hash.
///
/// The hash of a window `w_0 .. w_(k-1)` is
/// `sum(w_j * base^(k-1-j)) mod modulus`. Appending multiplies the running
/// hash by the base and adds the new value; evicting subtracts the oldest
/// value's `base^(k-1)` contribution, so both directions are O(log k) at
/// worst (the power is recomputed because variable windows change `k`).
///
/// Inputs must coerce to an integer in `[0, modulus)`; values outside the
/// range are rejected.
#[derive(Debug, Clone)]
pub struct PolynomialHash<T> {
    base: u64,
    modulus: u64,
    hash: u64,
    buffer: VecDeque<u64>,
    _input: PhantomData<T>,
}

impl<T: Into<u64>> PolynomialHash<T> {
    /// Hash with the default base and modulus.
    pub fn new() -> Self {
        // The defaults always satisfy with_params' checks.
        Self {
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
            hash: 0,
            buffer: VecDeque::new(),
            _input: PhantomData,
        }
    }

    /// Hash with an explicit base and modulus (`modulus >= 2`).
    pub fn with_params(base: u64, modulus: u64) -> Result<Self> {
        if modulus < 2 {
            return Err(Error::Domain(format!(
                "polynomial hash modulus must be at least 2, got {modulus}"
            )));
        }
        Ok(Self {
            base,
            modulus,
            hash: 0,
            buffer: VecDeque::new(),
            _input: PhantomData,
        })
    }
}

impl<T: Into<u64>> Default for PolynomialHash<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Into<u64>> WindowAggregator for PolynomialHash<T> {
    type Input = T;
    type Output = u64;

    fn add_new(&mut self, value: T) -> Result<()> {
        let x: u64 = value.into();
        if x >= self.modulus {
            return Err(Error::Type(format!(
                "hash input {x} is outside [0, {})",
                self.modulus
            )));
        }
        let m = self.modulus as u128;
        self.hash = ((self.hash as u128 * self.base as u128 + x as u128) % m) as u64;
        self.buffer.push_back(x);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        let m = self.modulus as u128;
        // The evicted value contributed old * base^len, where len is the
        // element count it used to sit above.
        let power = pow_mod(self.base as u128, self.buffer.len() as u64, m);
        let contribution = (old as u128 * power as u128 % m) as u64;
        self.hash = ((self.hash as u128 + m - contribution as u128) % m) as u64;
        Ok(())
    }

    fn current_value(&self) -> Result<u64> {
        Ok(self.hash)
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}
