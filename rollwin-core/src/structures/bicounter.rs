use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

/// Bidirectional counter: `value -> count` and `count -> {values}`.
///
/// Both directions are kept in sync on every increment/decrement, together
/// with the current largest count, so the set of most-common values is
/// available in O(1) at all times. This is the structure behind the rolling
/// mode.
#[derive(Debug, Clone, Default)]
pub struct BiCounter<T>
where
    T: Hash + Eq + Clone,
{
    item_to_count: AHashMap<T, usize>,
    count_to_items: AHashMap<usize, AHashSet<T>>,
    largest: usize,
}

impl<T> BiCounter<T>
where
    T: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            item_to_count: AHashMap::new(),
            count_to_items: AHashMap::new(),
            largest: 0,
        }
    }

    /// Number of distinct items currently counted.
    pub fn distinct(&self) -> usize {
        self.item_to_count.len()
    }

    /// The current largest count; 0 when the counter is empty.
    pub fn largest_count(&self) -> usize {
        self.largest
    }

    /// Count of `item`, 0 if absent.
    pub fn count(&self, item: &T) -> usize {
        self.item_to_count.get(item).copied().unwrap_or(0)
    }

    /// The set of items tied for the largest count. Empty when the counter
    /// is empty.
    pub fn most_common(&self) -> AHashSet<T> {
        self.count_to_items
            .get(&self.largest)
            .cloned()
            .unwrap_or_default()
    }

    pub fn increment(&mut self, item: T) {
        let count = self.count(&item);
        if count > 0 {
            self.take_from_bucket(count, &item);
        }
        self.count_to_items
            .entry(count + 1)
            .or_default()
            .insert(item.clone());
        *self.item_to_count.entry(item).or_insert(0) += 1;
        // An item promoted out of the top bucket raises the bar.
        if count == self.largest {
            self.largest += 1;
        }
    }

    /// Decrement `item`; a no-op if it is not counted.
    pub fn decrement(&mut self, item: &T) {
        let Some(&count) = self.item_to_count.get(item) else {
            return;
        };
        self.take_from_bucket(count, item);
        if count > 1 {
            self.count_to_items
                .entry(count - 1)
                .or_default()
                .insert(item.clone());
            if let Some(current) = self.item_to_count.get_mut(item) {
                *current -= 1;
            }
        } else {
            self.item_to_count.remove(item);
        }
        // The top bucket emptied: the next-lower bucket takes over.
        if count == self.largest && !self.count_to_items.contains_key(&self.largest) {
            self.largest -= 1;
        }
    }

    fn take_from_bucket(&mut self, count: usize, item: &T) {
        if let Some(bucket) = self.count_to_items.get_mut(&count) {
            bucket.remove(item);
            if bucket.is_empty() {
                self.count_to_items.remove(&count);
            }
        }
    }
}
