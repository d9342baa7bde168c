//! Formatted terminal output for curve runs.

mod format;

pub use format::*;
