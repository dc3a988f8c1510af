//! Genetic optimization engine.
//!
//! # Overview
//!
//! The engine optimizes a bounded parameter vector against a pluggable
//! physical model:
//!
//! - **Genome Operations** (`genome`): random generation, arithmetic
//!   crossover, and gaussian mutation, all driven by one owned RNG
//! - **Fitness** (`fitness`): penalized, never-failing evaluation on top
//!   of a [`crate::compute::model::PhysicalModel`]
//! - **Search** (`search`): the generational loop with tournament
//!   selection, elitism, and stagnation-based early stopping
//!
//! # Example
//!
//! ```rust,no_run
//! use thermo_opt::compute::evolution::OptimizerEngine;
//! use thermo_opt::schema::{CylinderConfig, GaConfig, OptimizerConfig, ProblemConfig};
//!
//! let config = OptimizerConfig {
//!     problem: ProblemConfig::Cylinder(CylinderConfig::default()),
//!     ga: GaConfig::default(),
//!     random_seed: Some(42),
//! };
//!
//! let mut engine = OptimizerEngine::new(&config).expect("valid config");
//! let result = engine.run_with_callback(|record| {
//!     println!(
//!         "generation {}: best fitness = {:.6}",
//!         record.generation, record.best_fitness
//!     );
//! });
//!
//! println!("best fitness: {:.6}", result.best.fitness);
//! println!("feasible: {}", result.best.feasible);
//! ```

mod fitness;
mod genome;
mod search;

pub use fitness::{Evaluation, FitnessEvaluator, SENTINEL_FITNESS};
pub use genome::{Chromosome, SearchRng};
pub use search::{
    GenerationRecord, Individual, OptimizerEngine, Population, PopulationStats, RunResult,
    StopReason,
};
