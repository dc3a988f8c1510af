//! Compute module - Physical models and the genetic optimization core.

pub mod evolution;
pub mod model;

pub use evolution::*;
pub use model::*;
