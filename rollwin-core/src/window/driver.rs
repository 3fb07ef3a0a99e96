use super::*;

// ── Rolling ───────────────────────────────────────────────────────────────

/// Driver for fixed and variable windows over a single input stream.
///
/// Implements `Iterator<Item = Result<A::Output>>`:
///
/// - **fixed** — inputs are pulled and folded in until the window is full;
///   from then on every input slides the window by one and emits. Nothing
///   is emitted while priming or after the input ends.
/// - **variable** — every input emits: the window grows to `size` during
///   priming, slides in steady state, and once the input ends it shrinks
///   by one per pull, emitting each partial window down to a single
///   element.
///
/// The driver never observes end-of-stream as terminal:
/// [`extend`](Self::extend) can append further input at any point, even
/// mid-drain or after drain, and iteration resumes from the retained
/// window state.
pub struct Rolling<A: WindowAggregator> {
    agg: A,
    feed: Feed<A::Input>,
    spec: WindowSpec,
    phase: Phase,
    filled: bool,
}

impl<A: WindowAggregator> Rolling<A> {
    /// Create a driver over `input` with the given window specification.
    ///
    /// Fails with [`Error::Domain`] for a zero window size and with
    /// [`Error::WindowType`] when the aggregator does not support the
    /// requested kind (or the kind is `Indexed`, which has its own driver,
    /// [`RollingIndexed`]).
    pub fn new<I>(agg: A, input: I, spec: WindowSpec) -> Result<Self>
    where
        I: IntoIterator<Item = A::Input>,
        I::IntoIter: 'static,
    {
        if spec.size == 0 {
            return Err(Error::Domain("window size must be positive".into()));
        }
        if spec.kind == WindowKind::Indexed || !agg.supports(spec.kind) {
            return Err(Error::WindowType {
                operation: std::any::type_name::<A>(),
                kind: spec.kind,
            });
        }
        Ok(Self {
            agg,
            feed: Feed::new(input),
            spec,
            phase: Phase::Priming,
            filled: false,
        })
    }

    /// Fixed-window driver of the given size.
    pub fn fixed<I>(agg: A, input: I, size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = A::Input>,
        I::IntoIter: 'static,
    {
        Self::new(agg, input, WindowSpec::fixed(size))
    }

    /// Variable-window driver of the given maximum size.
    pub fn variable<I>(agg: A, input: I, size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = A::Input>,
        I::IntoIter: 'static,
    {
        Self::new(agg, input, WindowSpec::variable(size))
    }

    /// Append further input, resuming from the current window state.
    ///
    /// Equivalent to chaining the input before construction, as long as
    /// the driver has not yet observed end-of-stream; afterwards the
    /// retained window seeds the resumed computation.
    pub fn extend<I>(&mut self, input: I)
    where
        I: IntoIterator<Item = A::Input>,
        I::IntoIter: 'static,
    {
        self.feed.extend(input);
        if self.phase == Phase::Drained {
            tracing::trace!(spec = %self.spec, "extend re-entering drained window");
            self.phase = if self.filled {
                Phase::Active
            } else {
                Phase::Priming
            };
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The window specification this driver runs.
    pub fn spec(&self) -> WindowSpec {
        self.spec
    }

    /// The driven aggregator.
    pub fn aggregator(&self) -> &A {
        &self.agg
    }

    fn next_fixed(&mut self) -> Option<Result<A::Output>> {
        loop {
            let Some(value) = self.feed.pull() else {
                if self.phase != Phase::Drained {
                    tracing::trace!(spec = %self.spec, "input exhausted");
                    self.phase = Phase::Drained;
                }
                return None;
            };
            if let Err(err) = self.agg.add_new(value) {
                return Some(Err(err));
            }
            if self.agg.len() > self.spec.size {
                if let Err(err) = self.agg.remove_old() {
                    return Some(Err(err));
                }
            }
            if self.agg.len() == self.spec.size {
                self.filled = true;
                self.phase = Phase::Active;
                return Some(self.agg.current_value());
            }
            self.phase = Phase::Priming;
        }
    }

    fn next_variable(&mut self) -> Option<Result<A::Output>> {
        match self.feed.pull() {
            Some(value) => {
                if let Err(err) = self.agg.add_new(value) {
                    return Some(Err(err));
                }
                if self.agg.len() > self.spec.size {
                    if let Err(err) = self.agg.remove_old() {
                        return Some(Err(err));
                    }
                }
                if self.agg.len() == self.spec.size {
                    self.filled = true;
                }
                self.phase = if self.filled {
                    Phase::Active
                } else {
                    Phase::Priming
                };
                Some(self.agg.current_value())
            }
            None => {
                // Drain: shrink by one per pull. The final element stays in
                // the window so a later extend resumes from it.
                if self.agg.len() > 1 {
                    if let Err(err) = self.agg.remove_old() {
                        return Some(Err(err));
                    }
                    Some(self.agg.current_value())
                } else {
                    if self.phase != Phase::Drained {
                        tracing::trace!(spec = %self.spec, "window drained");
                        self.phase = Phase::Drained;
                    }
                    None
                }
            }
        }
    }
}

impl<A: WindowAggregator> Iterator for Rolling<A> {
    type Item = Result<A::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.spec.kind {
            WindowKind::Fixed => self.next_fixed(),
            WindowKind::Variable => self.next_variable(),
            // Rejected at construction.
            WindowKind::Indexed => None,
        }
    }
}

impl<A: WindowAggregator> std::fmt::Debug for Rolling<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rolling({}, {}, phase={})",
            std::any::type_name::<A>(),
            self.spec,
            self.phase
        )
    }
}
