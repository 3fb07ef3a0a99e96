use super::*;

// ── RollingIndexed ────────────────────────────────────────────────────────

/// Driver for indexed windows: the stream yields `(index, value)` pairs
/// with non-decreasing indices, and the window retains every value whose
/// index lies within `(newest - span, newest]`.
///
/// Both the window length and the eviction count per step are
/// data-dependent, so the driver owns the deque of retained indices and
/// calls `remove_old` as many times as the span invariant requires; the
/// aggregator stays index-agnostic. One aggregate is emitted per input,
/// starting with the first.
///
/// A decreasing index yields [`Error::IndexOrder`].
pub struct RollingIndexed<A, X>
where
    A: WindowAggregator,
    X: Copy + PartialOrd + Sub<Output = X>,
{
    agg: A,
    feed: Feed<(X, A::Input)>,
    span: X,
    indices: VecDeque<X>,
    last_index: Option<X>,
    phase: Phase,
}

impl<A, X> RollingIndexed<A, X>
where
    A: WindowAggregator,
    X: Copy + PartialOrd + Sub<Output = X>,
{
    /// Create an indexed driver with the given window span.
    ///
    /// Fails with [`Error::WindowType`] when the aggregator does not
    /// support indexed windows.
    pub fn new<I>(agg: A, input: I, span: X) -> Result<Self>
    where
        I: IntoIterator<Item = (X, A::Input)>,
        I::IntoIter: 'static,
    {
        if !agg.supports(WindowKind::Indexed) {
            return Err(Error::WindowType {
                operation: std::any::type_name::<A>(),
                kind: WindowKind::Indexed,
            });
        }
        Ok(Self {
            agg,
            feed: Feed::new(input),
            span,
            indices: VecDeque::new(),
            last_index: None,
            phase: Phase::Priming,
        })
    }

    /// Append further `(index, value)` input; indices must continue to be
    /// non-decreasing across the splice.
    pub fn extend<I>(&mut self, input: I)
    where
        I: IntoIterator<Item = (X, A::Input)>,
        I::IntoIter: 'static,
    {
        self.feed.extend(input);
        if self.phase == Phase::Drained {
            tracing::trace!("extend re-entering drained indexed window");
            self.phase = Phase::Active;
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The driven aggregator.
    pub fn aggregator(&self) -> &A {
        &self.agg
    }
}

impl<A, X> Iterator for RollingIndexed<A, X>
where
    A: WindowAggregator,
    X: Copy + PartialOrd + Sub<Output = X>,
{
    type Item = Result<A::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((index, value)) = self.feed.pull() else {
            if self.phase != Phase::Drained {
                tracing::trace!("indexed input exhausted");
                self.phase = Phase::Drained;
            }
            return None;
        };
        if let Some(last) = self.last_index {
            if index < last {
                return Some(Err(Error::IndexOrder));
            }
        }
        self.last_index = Some(index);

        if let Err(err) = self.agg.add_new(value) {
            return Some(Err(err));
        }
        self.indices.push_back(index);

        // Restore the span invariant: newest - oldest < span.
        while let Some(&front) = self.indices.front() {
            if index - front >= self.span {
                if let Err(err) = self.agg.remove_old() {
                    return Some(Err(err));
                }
                self.indices.pop_front();
            } else {
                break;
            }
        }

        self.phase = Phase::Active;
        Some(self.agg.current_value())
    }
}

impl<A, X> std::fmt::Debug for RollingIndexed<A, X>
where
    A: WindowAggregator,
    X: Copy + PartialOrd + Sub<Output = X>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RollingIndexed({}, len={}, phase={})",
            std::any::type_name::<A>(),
            self.indices.len(),
            self.phase
        )
    }
}
