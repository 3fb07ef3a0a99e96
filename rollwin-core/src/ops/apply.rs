use std::collections::VecDeque;

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};

/// Apply a user function to the materialised window.
///
/// The window buffer is the only state; the update cost is the cost of the
/// function plus the O(k) materialisation.
pub struct Apply<T, F, OUT>
where
    F: Fn(&[T]) -> OUT,
{
    buffer: VecDeque<T>,
    operation: F,
}

impl<T, F, OUT> Apply<T, F, OUT>
where
    T: Clone,
    F: Fn(&[T]) -> OUT,
{
    pub fn new(operation: F) -> Self {
        Self {
            buffer: VecDeque::new(),
            operation,
        }
    }
}

impl<T, F, OUT> WindowAggregator for Apply<T, F, OUT>
where
    T: Clone,
    F: Fn(&[T]) -> OUT,
{
    type Input = T;
    type Output = OUT;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        Ok(())
    }

    fn current_value(&self) -> Result<OUT> {
        let window: Vec<T> = self.buffer.iter().cloned().collect();
        Ok((self.operation)(&window))
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

/// Apply a binary function to synchronised windows over two parallel
/// streams.
///
/// Driven by [`RollingPairwise`](crate::window::RollingPairwise), which
/// pairs the two feeds and reports a length mismatch as an error.
pub struct ApplyPairwise<L, R, F, OUT>
where
    F: Fn(&[L], &[R]) -> OUT,
{
    left: VecDeque<L>,
    right: VecDeque<R>,
    operation: F,
}

impl<L, R, F, OUT> ApplyPairwise<L, R, F, OUT>
where
    L: Clone,
    R: Clone,
    F: Fn(&[L], &[R]) -> OUT,
{
    pub fn new(operation: F) -> Self {
        Self {
            left: VecDeque::new(),
            right: VecDeque::new(),
            operation,
        }
    }
}

impl<L, R, F, OUT> WindowAggregator for ApplyPairwise<L, R, F, OUT>
where
    L: Clone,
    R: Clone,
    F: Fn(&[L], &[R]) -> OUT,
{
    type Input = (L, R);
    type Output = OUT;

    fn add_new(&mut self, value: (L, R)) -> Result<()> {
        self.left.push_back(value.0);
        self.right.push_back(value.1);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        if self.left.pop_front().is_none() {
            return Err(Error::EmptyWindow);
        }
        self.right.pop_front();
        Ok(())
    }

    fn current_value(&self) -> Result<OUT> {
        let left: Vec<L> = self.left.iter().cloned().collect();
        let right: Vec<R> = self.right.iter().cloned().collect();
        Ok((self.operation)(&left, &right))
    }

    fn len(&self) -> usize {
        self.left.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_materialises_window_in_order() {
        let mut agg = Apply::new(|w: &[i32]| w.to_vec());
        for v in [8, 1, 1, 3] {
            agg.add_new(v).unwrap();
        }
        agg.remove_old().unwrap();
        assert_eq!(agg.current_value().unwrap(), vec![1, 1, 3]);
    }

    #[test]
    fn test_apply_pairwise_keeps_buffers_synchronised() {
        let mut agg = ApplyPairwise::new(|a: &[i32], b: &[i32]| {
            a.iter().zip(b).map(|(x, y)| x * y).sum::<i32>()
        });
        for pair in [(1, 4), (2, 5), (3, 6)] {
            agg.add_new(pair).unwrap();
        }
        assert_eq!(agg.current_value().unwrap(), 4 + 10 + 18);
        agg.remove_old().unwrap();
        assert_eq!(agg.current_value().unwrap(), 10 + 18);
        assert_eq!(agg.len(), 2);
    }
}
