use crate::error::Result;
use crate::types::WindowKind;

/// Uniform capability set of a rolling-window aggregator.
///
/// An aggregator encapsulates the auxiliary state for one reduction
/// (monotonic deque, skiplist, running moments, ...) and exposes exactly
/// three mutations plus two reads. The window-position drivers in
/// [`crate::window`] sequence these calls; aggregators never touch the
/// input stream themselves.
///
/// Implementations must keep their internal state consistent with the
/// multiset of values currently in the window after every call:
///
/// - [`add_new`](Self::add_new) incorporates a newly arrived value;
/// - [`remove_old`](Self::remove_old) evicts the oldest value still in the
///   window (values leave in arrival order);
/// - [`current_value`](Self::current_value) reads the reduction of the
///   current window without mutating it.
pub trait WindowAggregator {
    type Input;
    type Output;

    /// Incorporate a newly arrived value.
    fn add_new(&mut self, value: Self::Input) -> Result<()>;

    /// Evict the oldest value currently in the window.
    ///
    /// Returns [`Error::EmptyWindow`](crate::Error::EmptyWindow) if no
    /// value is present.
    fn remove_old(&mut self) -> Result<()>;

    /// The reduction of the current window.
    ///
    /// Returns [`Error::InsufficientData`](crate::Error::InsufficientData)
    /// when fewer values are present than the operation requires.
    fn current_value(&self) -> Result<Self::Output>;

    /// Number of elements currently in the window.
    fn len(&self) -> usize;

    /// Whether the window is currently empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this aggregator supports the given window kind.
    ///
    /// Most aggregators support all kinds; operations with a structural
    /// dependency on the window size (for example entropy) override this.
    fn supports(&self, kind: WindowKind) -> bool {
        let _ = kind;
        true
    }
}
