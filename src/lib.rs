//! Constrained genetic-algorithm optimizer for heat-transfer design.
//!
//! This crate applies a generational genetic algorithm to two classic
//! heat-transfer design problems: sizing cylindrical insulation under a
//! heat-flow ceiling, and characterizing the thermal boundary layer of
//! laminar flow over a flat plate.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types for problems and the engine
//! - `compute`: Physical models and the genetic optimization core
//!
//! # Example
//!
//! ```rust,no_run
//! use thermo_opt::{
//!     compute::evolution::OptimizerEngine,
//!     schema::{CylinderConfig, GaConfig, OptimizerConfig, ProblemConfig},
//! };
//!
//! // Configure the cylinder insulation problem
//! let config = OptimizerConfig {
//!     problem: ProblemConfig::Cylinder(CylinderConfig::default()),
//!     ga: GaConfig::default(),
//!     random_seed: Some(42),
//! };
//!
//! // Build and run the engine
//! let mut engine = OptimizerEngine::new(&config).expect("valid config");
//! let result = engine.run();
//!
//! println!(
//!     "best after {} generations: fitness {:.6}, feasible {}",
//!     result.records.len(),
//!     result.best.fitness,
//!     result.best.feasible
//! );
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{GenerationRecord, OptimizerEngine, RunResult, StopReason};
pub use compute::model::{PhysicalModel, Quantities};
pub use schema::{GaConfig, OptimizerConfig, ProblemConfig};
