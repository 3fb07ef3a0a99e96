use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};

// ── Min / Max ─────────────────────────────────────────────────────────────

// Shared deque body for the ascending-minima / descending-maxima algorithm.
// The deque holds (value, birth) pairs for every window element not
// dominated by a later-arriving, equal-or-better element; the front is the
// current extremum. `obs` counts all ingested values, `len` the window
// occupancy, so the oldest surviving birth is always `obs - len`.
#[derive(Debug, Clone)]
struct MonotonicDeque<T> {
    deque: VecDeque<(T, u64)>,
    obs: u64,
    len: usize,
}

impl<T: PartialOrd + Clone> MonotonicDeque<T> {
    fn new() -> Self {
        Self {
            deque: VecDeque::new(),
            obs: 0,
            len: 0,
        }
    }

    fn add<F>(&mut self, value: T, dominated: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        while let Some((back, _)) = self.deque.back() {
            if dominated(back, &value) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((value, self.obs));
        self.obs += 1;
        self.len += 1;
    }

    fn evict(&mut self) -> Result<()> {
        if self.len == 0 {
            return Err(Error::EmptyWindow);
        }
        let oldest_birth = self.obs - self.len as u64;
        if let Some((_, birth)) = self.deque.front() {
            // Anything older was already superseded and is not in the deque.
            if *birth == oldest_birth {
                self.deque.pop_front();
            }
        }
        self.len -= 1;
        Ok(())
    }

    fn front(&self, operation: &'static str) -> Result<T> {
        match self.deque.front() {
            Some((value, _)) => Ok(value.clone()),
            None => Err(Error::InsufficientData {
                operation,
                required: 1,
                len: 0,
            }),
        }
    }
}

/// Rolling minimum via the ascending-minima monotonic deque.
///
/// O(1) amortised updates, O(k) memory.
#[derive(Debug, Clone)]
pub struct Min<T> {
    inner: MonotonicDeque<T>,
}

impl<T: PartialOrd + Clone> Min<T> {
    pub fn new() -> Self {
        Self {
            inner: MonotonicDeque::new(),
        }
    }
}

impl<T: PartialOrd + Clone> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialOrd + Clone> WindowAggregator for Min<T> {
    type Input = T;
    type Output = T;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.inner.add(value, |back, new| back >= new);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        self.inner.evict()
    }

    fn current_value(&self) -> Result<T> {
        self.inner.front("Min")
    }

    fn len(&self) -> usize {
        self.inner.len
    }
}

/// Rolling maximum via the descending-maxima monotonic deque.
#[derive(Debug, Clone)]
pub struct Max<T> {
    inner: MonotonicDeque<T>,
}

impl<T: PartialOrd + Clone> Max<T> {
    pub fn new() -> Self {
        Self {
            inner: MonotonicDeque::new(),
        }
    }
}

impl<T: PartialOrd + Clone> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialOrd + Clone> WindowAggregator for Max<T> {
    type Input = T;
    type Output = T;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.inner.add(value, |back, new| back <= new);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        self.inner.evict()
    }

    fn current_value(&self) -> Result<T> {
        self.inner.front("Max")
    }

    fn len(&self) -> usize {
        self.inner.len
    }
}

// ── MinHeap ───────────────────────────────────────────────────────────────

/// Rolling minimum backed by a lazy-deletion binary heap.
///
/// Evicted values are not searched for; they are discarded once they
/// surface at the top. The heap can therefore grow past the window size on
/// ordered data, which is the trade this variant makes against the deque
/// [`Min`].
#[derive(Debug, Clone)]
pub struct MinHeap<T: Ord> {
    heap: BinaryHeap<Reverse<(T, u64)>>,
    obs: u64,
    len: usize,
}

impl<T: Ord + Clone> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            obs: 0,
            len: 0,
        }
    }

    // Drop expired entries off the top. Validity depends only on
    // `obs - len`, which add_new leaves unchanged, so running this at the
    // tail of remove_old keeps the top alive for every later read.
    fn purge(&mut self) {
        let oldest_birth = self.obs - self.len as u64;
        while let Some(Reverse((_, birth))) = self.heap.peek() {
            if *birth < oldest_birth {
                self.heap.pop();
            } else {
                break;
            }
        }
    }
}

impl<T: Ord + Clone> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> WindowAggregator for MinHeap<T> {
    type Input = T;
    type Output = T;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.heap.push(Reverse((value, self.obs)));
        self.obs += 1;
        self.len += 1;
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        if self.len == 0 {
            return Err(Error::EmptyWindow);
        }
        self.len -= 1;
        self.purge();
        Ok(())
    }

    fn current_value(&self) -> Result<T> {
        match self.heap.peek() {
            Some(Reverse((value, _))) => Ok(value.clone()),
            None => Err(Error::InsufficientData {
                operation: "MinHeap",
                required: 1,
                len: 0,
            }),
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}
