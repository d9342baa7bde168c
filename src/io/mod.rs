//! Curve artifact IO: JSON curve files and CSV sample exports.

pub mod curve;
pub mod export;
