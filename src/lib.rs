//! `ks2-curves` library crate.
//!
//! The binary (`ks2`) is a thin wrapper around this library so that:
//!
//! - the curve math is testable without spawning processes
//! - modules are reusable (e.g., future GUI/service front-ends)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod decay;
pub mod domain;
pub mod error;
pub mod io;
pub mod model;
pub mod plot;
pub mod report;
pub mod tui;
