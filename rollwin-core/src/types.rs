use serde::{Deserialize, Serialize};

/// The windowing discipline a rolling computation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Emit only full windows; the first output appears after `size` inputs.
    Fixed,
    /// Emit growing windows while priming, full windows in steady state,
    /// and shrinking windows once the input ends.
    Variable,
    /// The window holds every element whose index lies within
    /// `(current_index - span, current_index]`.
    Indexed,
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowKind::Fixed => f.write_str("fixed"),
            WindowKind::Variable => f.write_str("variable"),
            WindowKind::Indexed => f.write_str("indexed"),
        }
    }
}

/// An immutable window specification for the sequential (non-indexed)
/// drivers: a positive element count and a window kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSpec {
    pub size: usize,
    pub kind: WindowKind,
}

impl WindowSpec {
    pub fn new(size: usize, kind: WindowKind) -> Self {
        Self { size, kind }
    }

    /// A fixed window of `size` elements.
    pub fn fixed(size: usize) -> Self {
        Self::new(size, WindowKind::Fixed)
    }

    /// A variable window growing to at most `size` elements.
    pub fn variable(size: usize) -> Self {
        Self::new(size, WindowKind::Variable)
    }
}

impl std::fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowSpec({}, size={})", self.kind, self.size)
    }
}

/// Lifecycle phase of a windowed computation.
///
/// Every driver moves `Priming -> Active -> Drained`; `extend` re-enters
/// `Active` from `Drained`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The window has not yet reached full size.
    Priming,
    /// Steady state: the window moves over the stream.
    Active,
    /// The input is exhausted and all pending emissions are done.
    Drained,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Priming => f.write_str("priming"),
            Phase::Active => f.write_str("active"),
            Phase::Drained => f.write_str("drained"),
        }
    }
}
