use std::collections::VecDeque;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};

/// Rolling Jaccard index between the window and a fixed target set.
///
/// `|window ∩ target| / |window ∪ target|` over *distinct* values, updated
/// in O(1) per step by tracking how many distinct window values fall
/// inside and outside the target. An empty union yields 0.
#[derive(Debug, Clone)]
pub struct JaccardIndex<T>
where
    T: Hash + Eq + Clone,
{
    target: AHashSet<T>,
    counts: AHashMap<T, usize>,
    buffer: VecDeque<T>,
    /// Distinct window values that are in the target set.
    in_target: usize,
    /// Distinct window values that are not.
    outside_target: usize,
}

impl<T> JaccardIndex<T>
where
    T: Hash + Eq + Clone,
{
    pub fn new(target: impl IntoIterator<Item = T>) -> Self {
        Self {
            target: target.into_iter().collect(),
            counts: AHashMap::new(),
            buffer: VecDeque::new(),
            in_target: 0,
            outside_target: 0,
        }
    }
}

impl<T> WindowAggregator for JaccardIndex<T>
where
    T: Hash + Eq + Clone,
{
    type Input = T;
    type Output = f64;

    fn add_new(&mut self, value: T) -> Result<()> {
        let count = self.counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            if self.target.contains(&value) {
                self.in_target += 1;
            } else {
                self.outside_target += 1;
            }
        }
        *count += 1;
        self.buffer.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.buffer.pop_front().ok_or(Error::EmptyWindow)?;
        if let Some(count) = self.counts.get_mut(&old) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&old);
                if self.target.contains(&old) {
                    self.in_target -= 1;
                } else {
                    self.outside_target -= 1;
                }
            }
        }
        Ok(())
    }

    fn current_value(&self) -> Result<f64> {
        let union = self.target.len() + self.outside_target;
        if union == 0 {
            return Ok(0.0);
        }
        Ok(self.in_target as f64 / union as f64)
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaccard_against_primes() {
        let mut agg = JaccardIndex::new([2, 3, 5, 7, 11]);
        let mut out = Vec::new();
        for v in 1..=9 {
            agg.add_new(v).unwrap();
            if agg.len() > 4 {
                agg.remove_old().unwrap();
            }
            if agg.len() == 4 {
                out.push(agg.current_value().unwrap());
            }
        }
        let expected = [
            2.0 / 7.0, // {1,2,3,4}
            3.0 / 6.0, // {2,3,4,5}
            2.0 / 7.0, // {3,4,5,6}
            2.0 / 7.0, // {4,5,6,7}
            2.0 / 7.0, // {5,6,7,8}
            1.0 / 8.0, // {6,7,8,9}
        ];
        assert_eq!(out.len(), expected.len());
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn test_jaccard_duplicates_count_once() {
        let mut agg = JaccardIndex::new(["a"]);
        agg.add_new("a").unwrap();
        agg.add_new("a").unwrap();
        assert_eq!(agg.current_value().unwrap(), 1.0);
        agg.remove_old().unwrap();
        // One "a" remains; still fully overlapping.
        assert_eq!(agg.current_value().unwrap(), 1.0);
    }

    #[test]
    fn test_jaccard_empty_union_is_zero() {
        let agg: JaccardIndex<i32> = JaccardIndex::new([]);
        assert_eq!(agg.current_value().unwrap(), 0.0);
    }
}
