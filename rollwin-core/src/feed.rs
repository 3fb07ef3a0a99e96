use std::collections::VecDeque;

/// Pull-based input cursor with end-of-stream signalling and late extension.
///
/// A `Feed` owns a queue of iterator segments. [`pull`](Self::pull) consumes
/// strictly forward, dropping each segment as it runs dry. Returning `None`
/// is not terminal: [`extend`](Self::extend) may append another segment at
/// any time, after which `pull` yields again. This is what lets a drained
/// rolling computation resume.
pub struct Feed<T> {
    segments: VecDeque<Box<dyn Iterator<Item = T>>>,
}

impl<T> Feed<T> {
    /// Create a feed over a single input segment.
    pub fn new<I>(input: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let mut segments: VecDeque<Box<dyn Iterator<Item = T>>> = VecDeque::new();
        segments.push_back(Box::new(input.into_iter()));
        Self { segments }
    }

    /// An empty feed. Useful when all input arrives via `extend`.
    pub fn empty() -> Self {
        Self {
            segments: VecDeque::new(),
        }
    }

    /// Append a further input segment behind any pending input.
    pub fn extend<I>(&mut self, input: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        self.segments.push_back(Box::new(input.into_iter()));
    }

    /// Take the next element, skipping exhausted segments.
    pub fn pull(&mut self) -> Option<T> {
        while let Some(segment) = self.segments.front_mut() {
            if let Some(value) = segment.next() {
                return Some(value);
            }
            self.segments.pop_front();
        }
        None
    }
}

impl<T> std::fmt::Debug for Feed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Feed({} pending segments)", self.segments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_crosses_segment_boundaries() {
        let mut feed = Feed::new(vec![1, 2]);
        feed.extend(vec![3]);
        assert_eq!(feed.pull(), Some(1));
        assert_eq!(feed.pull(), Some(2));
        assert_eq!(feed.pull(), Some(3));
        assert_eq!(feed.pull(), None);
    }

    #[test]
    fn test_extend_after_exhaustion_resumes() {
        let mut feed = Feed::new(Vec::<i32>::new());
        assert_eq!(feed.pull(), None);
        feed.extend(vec![7]);
        assert_eq!(feed.pull(), Some(7));
        assert_eq!(feed.pull(), None);
    }
}
