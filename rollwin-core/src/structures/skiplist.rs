use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Link index meaning "no node"; behaves like a value of positive infinity.
const NIL: u32 = u32::MAX;

struct SkipNode {
    value: f64,
    /// Forward pointer per level (arena indices).
    next: Vec<u32>,
    /// Ranks skipped by following `next` at the same level.
    width: Vec<usize>,
}

/// Sorted collection with O(log k) expected insert, remove and lookup by
/// rank.
///
/// Each forward pointer carries the span of ranks it skips, so the element
/// at any rank is reachable by walking down the levels — the property that
/// makes a rolling median O(log k) per step. Values are ordered by
/// `f64::total_cmp`; duplicates are kept (inserted after their equals).
///
/// Nodes live in an arena indexed by `u32`, with a freelist for removed
/// slots; node 0 is the head sentinel.
pub struct IndexableSkiplist {
    nodes: Vec<SkipNode>,
    free: Vec<u32>,
    max_levels: usize,
    len: usize,
    rng: SmallRng,
}

impl IndexableSkiplist {
    /// Create a skiplist sized for roughly `expected_size` elements.
    pub fn new(expected_size: usize) -> Self {
        // 1 + floor(log2(size)) levels, minimum 1.
        let max_levels = (usize::BITS - expected_size.max(1).leading_zeros()) as usize;
        let head = SkipNode {
            value: f64::NEG_INFINITY,
            next: vec![NIL; max_levels],
            width: vec![1; max_levels],
        };
        Self {
            nodes: vec![head],
            free: Vec::new(),
            max_levels,
            len: 0,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at `rank` (0-based, ascending order).
    ///
    /// # Panics
    ///
    /// Panics if `rank >= len()`.
    pub fn get(&self, rank: usize) -> f64 {
        assert!(rank < self.len, "rank {rank} out of bounds (len {})", self.len);
        let mut remaining = rank + 1;
        let mut node = 0u32;
        for level in (0..self.max_levels).rev() {
            loop {
                let width = self.nodes[node as usize].width[level];
                if width > remaining {
                    break;
                }
                remaining -= width;
                node = self.nodes[node as usize].next[level];
            }
        }
        self.nodes[node as usize].value
    }

    /// Insert `value`, keeping sorted order. Duplicates are allowed.
    pub fn insert(&mut self, value: f64) {
        // For each level, find the last node whose successor is > value,
        // recording how many ranks were skipped to get there.
        let mut chain = vec![0u32; self.max_levels];
        let mut steps_at_level = vec![0usize; self.max_levels];
        let mut node = 0u32;
        for level in (0..self.max_levels).rev() {
            loop {
                let nxt = self.nodes[node as usize].next[level];
                if nxt == NIL || self.nodes[nxt as usize].value.total_cmp(&value).is_gt() {
                    break;
                }
                steps_at_level[level] += self.nodes[node as usize].width[level];
                node = nxt;
            }
            chain[level] = node;
        }

        let levels = self.random_levels();
        let new = self.alloc(value, levels);

        // Splice a link in at each of the new node's levels.
        let mut steps = 0usize;
        for level in 0..levels {
            let prev = chain[level] as usize;
            let prev_next = self.nodes[prev].next[level];
            let prev_width = self.nodes[prev].width[level];
            self.nodes[new as usize].next[level] = prev_next;
            self.nodes[new as usize].width[level] = prev_width - steps;
            self.nodes[prev].next[level] = new;
            self.nodes[prev].width[level] = steps + 1;
            steps += steps_at_level[level];
        }
        // Levels above the new node just got one rank wider.
        for level in levels..self.max_levels {
            self.nodes[chain[level] as usize].width[level] += 1;
        }
        self.len += 1;
    }

    /// Remove one occurrence of `value`. Returns false if absent.
    pub fn remove(&mut self, value: f64) -> bool {
        // For each level, find the last node whose successor is >= value.
        let mut chain = vec![0u32; self.max_levels];
        let mut node = 0u32;
        for level in (0..self.max_levels).rev() {
            loop {
                let nxt = self.nodes[node as usize].next[level];
                if nxt == NIL || !self.nodes[nxt as usize].value.total_cmp(&value).is_lt() {
                    break;
                }
                node = nxt;
            }
            chain[level] = node;
        }

        let target = self.nodes[chain[0] as usize].next[0];
        if target == NIL || self.nodes[target as usize].value.total_cmp(&value).is_ne() {
            return false;
        }

        let levels = self.nodes[target as usize].next.len();
        for level in 0..levels {
            let prev = chain[level] as usize;
            let target_next = self.nodes[target as usize].next[level];
            let target_width = self.nodes[target as usize].width[level];
            self.nodes[prev].width[level] += target_width - 1;
            self.nodes[prev].next[level] = target_next;
        }
        for level in levels..self.max_levels {
            self.nodes[chain[level] as usize].width[level] -= 1;
        }

        self.free.push(target);
        self.len -= 1;
        true
    }

    /// Geometric level draw: each extra level with probability 1/2.
    fn random_levels(&mut self) -> usize {
        let mut levels = 1;
        while levels < self.max_levels && self.rng.gen::<bool>() {
            levels += 1;
        }
        levels
    }

    fn alloc(&mut self, value: f64, levels: usize) -> u32 {
        if let Some(slot) = self.free.pop() {
            let node = &mut self.nodes[slot as usize];
            node.value = value;
            node.next.clear();
            node.next.resize(levels, NIL);
            node.width.clear();
            node.width.resize(levels, 0);
            slot
        } else {
            self.nodes.push(SkipNode {
                value,
                next: vec![NIL; levels],
                width: vec![0; levels],
            });
            (self.nodes.len() - 1) as u32
        }
    }
}

impl std::fmt::Debug for IndexableSkiplist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IndexableSkiplist(len={})", self.len)
    }
}
