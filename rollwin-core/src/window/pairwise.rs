use super::*;

// ── RollingPairwise ───────────────────────────────────────────────────────

/// Driver for aggregations over two parallel streams of equal length,
/// such as [`ApplyPairwise`](crate::ops::ApplyPairwise).
///
/// Follows the same fixed/variable schedule as [`Rolling`], pulling one
/// element from each feed per step. If one feed ends while the other still
/// yields, the step that needed the pair fails with
/// [`Error::StreamMismatch`] — a mismatch beyond the last window the
/// consumer asks for is never observed, matching the lazy model.
pub struct RollingPairwise<A, L, R>
where
    A: WindowAggregator<Input = (L, R)>,
{
    agg: A,
    left: Feed<L>,
    right: Feed<R>,
    spec: WindowSpec,
    phase: Phase,
    filled: bool,
}

impl<A, L, R> RollingPairwise<A, L, R>
where
    A: WindowAggregator<Input = (L, R)>,
{
    /// Create a pairwise driver over the two input streams.
    pub fn new<IL, IR>(agg: A, left: IL, right: IR, spec: WindowSpec) -> Result<Self>
    where
        IL: IntoIterator<Item = L>,
        IL::IntoIter: 'static,
        IR: IntoIterator<Item = R>,
        IR::IntoIter: 'static,
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
            left: Feed::new(left),
            right: Feed::new(right),
            spec,
            phase: Phase::Priming,
            filled: false,
        })
    }

    /// Append further input to both streams.
    pub fn extend<IL, IR>(&mut self, left: IL, right: IR)
    where
        IL: IntoIterator<Item = L>,
        IL::IntoIter: 'static,
        IR: IntoIterator<Item = R>,
        IR::IntoIter: 'static,
    {
        self.left.extend(left);
        self.right.extend(right);
        if self.phase == Phase::Drained {
            tracing::trace!(spec = %self.spec, "extend re-entering drained pairwise window");
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

    fn pull_pair(&mut self) -> Result<Option<(L, R)>> {
        match (self.left.pull(), self.right.pull()) {
            (Some(l), Some(r)) => Ok(Some((l, r))),
            (None, None) => Ok(None),
            _ => Err(Error::StreamMismatch),
        }
    }

    fn step(&mut self) -> Option<Result<A::Output>> {
        loop {
            let pair = match self.pull_pair() {
                Ok(pair) => pair,
                Err(err) => return Some(Err(err)),
            };
            match pair {
                Some(pair) => {
                    if let Err(err) = self.agg.add_new(pair) {
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
                    match self.spec.kind {
                        WindowKind::Variable => {
                            self.phase = if self.filled {
                                Phase::Active
                            } else {
                                Phase::Priming
                            };
                            return Some(self.agg.current_value());
                        }
                        _ => {
                            if self.agg.len() == self.spec.size {
                                self.phase = Phase::Active;
                                return Some(self.agg.current_value());
                            }
                            self.phase = Phase::Priming;
                        }
                    }
                }
                None => {
                    if self.spec.kind == WindowKind::Variable && self.agg.len() > 1 {
                        if let Err(err) = self.agg.remove_old() {
                            return Some(Err(err));
                        }
                        return Some(self.agg.current_value());
                    }
                    if self.phase != Phase::Drained {
                        tracing::trace!(spec = %self.spec, "pairwise input exhausted");
                        self.phase = Phase::Drained;
                    }
                    return None;
                }
            }
        }
    }
}

impl<A, L, R> Iterator for RollingPairwise<A, L, R>
where
    A: WindowAggregator<Input = (L, R)>,
{
    type Item = Result<A::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl<A, L, R> std::fmt::Debug for RollingPairwise<A, L, R>
where
    A: WindowAggregator<Input = (L, R)>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RollingPairwise({}, {}, phase={})",
            std::any::type_name::<A>(),
            self.spec,
            self.phase
        )
    }
}
