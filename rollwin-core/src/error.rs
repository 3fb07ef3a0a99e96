use thiserror::Error;

use crate::types::WindowKind;

/// Errors surfaced by window drivers and aggregators.
///
/// Errors are reported through the `Result` items of the driver iterators
/// and are never swallowed or retried. `EmptyWindow` and `IndexOrder`
/// indicate either upstream misuse or an internal invariant violation.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// An input value is incompatible with the operation (for example a
    /// hash input outside `[0, modulus)`). Most type constraints are
    /// enforced at compile time through trait bounds; this variant covers
    /// the checks the type system cannot express.
    #[error("input value incompatible with operation: {0}")]
    Type(String),

    /// The operation does not support the requested window kind.
    #[error("{operation} does not support {kind} windows")]
    WindowType {
        operation: &'static str,
        kind: WindowKind,
    },

    /// `current_value` was requested before enough elements arrived.
    #[error("{operation} needs at least {required} elements, window holds {len}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        len: usize,
    },

    /// `remove_old` was called on an empty window.
    #[error("cannot evict from an empty window")]
    EmptyWindow,

    /// A numerically invalid input or parameter (for example an entropy
    /// reference probability of zero for an observed value, or a
    /// non-positive window size).
    #[error("domain error: {0}")]
    Domain(String),

    /// An indexed stream produced a decreasing index.
    #[error("indexed stream produced a non-monotone index")]
    IndexOrder,

    /// The two streams of a pairwise aggregation terminated at different
    /// points.
    #[error("pairwise streams terminated at different points")]
    StreamMismatch,
}

pub type Result<T> = std::result::Result<T, Error>;
