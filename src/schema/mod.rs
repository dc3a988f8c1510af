//! Schema module - Configuration types for problems and the optimizer.

mod config;
mod problem;

pub use config::*;
pub use problem::*;
