//! Window-position drivers.
//!
//! A driver owns an aggregator and an input [`Feed`], sequences the
//! `add_new` / `remove_old` / `current_value` calls according to the window
//! discipline, and yields the emitted aggregates as a lazy iterator of
//! `Result` items. Drivers consume strictly forward and never peek.

use std::collections::VecDeque;
use std::ops::Sub;

use crate::aggregator::WindowAggregator;
use crate::error::{Error, Result};
use crate::feed::Feed;
use crate::types::{Phase, WindowKind, WindowSpec};

mod driver;
mod indexed;
mod pairwise;

pub use driver::*;
pub use indexed::*;
pub use pairwise::*;

#[cfg(test)]
#[path = "tests/window_tests.rs"]
mod tests;
