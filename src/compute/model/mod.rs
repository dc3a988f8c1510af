//! Physical models - closed-form heat-transfer relations for the two
//! supported problem instances.
//!
//! Models are pure and stateless: the same chromosome always produces the
//! same quantities. A chromosome outside the model's valid regime yields
//! `None` rather than an error; the fitness layer turns that into a
//! dominating sentinel fitness so the generational loop never fails on a
//! degenerate individual.

mod cylinder;
mod flat_plate;

pub use cylinder::CylinderModel;
pub use flat_plate::FlatPlateModel;

use serde::{Deserialize, Serialize};

use crate::schema::{GeneSpec, ProblemConfig};

/// Physical quantities derived from one chromosome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Quantities {
    Cylinder {
        /// Radial heat flow through the insulation [W].
        heat_flow: f64,
    },
    FlatPlate {
        /// Velocity boundary-layer thickness [m].
        delta: f64,
        /// Thermal boundary-layer thickness [m].
        delta_thermal: f64,
        /// Local film coefficient [W/(m²·K)].
        h_local: f64,
        /// Local surface heat flux [W/m²].
        heat_flux: f64,
    },
}

/// A heat-transfer problem instance seen by the optimizer.
///
/// `quantities` and `violations` are split so callers can report derived
/// quantities independently of constraint handling.
pub trait PhysicalModel {
    /// Parameter descriptors, in chromosome order. Fixed for the lifetime
    /// of the model.
    fn gene_specs(&self) -> Vec<GeneSpec>;

    /// Derive physical quantities from a chromosome, or `None` when the
    /// chromosome falls outside the model's valid regime (e.g. `Re_x <= 0`).
    fn quantities(&self, genes: &[f64]) -> Option<Quantities>;

    /// Primary objective, minimized.
    fn objective(&self, genes: &[f64], quantities: &Quantities) -> f64;

    /// One non-negative violation magnitude per constraint; zero when the
    /// constraint is satisfied.
    fn violations(&self, genes: &[f64], quantities: &Quantities) -> Vec<f64>;

    /// Constraint names, aligned with the `violations` order.
    fn constraint_names(&self) -> &'static [&'static str];

    /// Weight applied to each squared violation in the penalized fitness.
    fn penalty_weight(&self) -> f64;
}

/// Build the model selected by the problem configuration. The engine never
/// branches on the problem kind after this point.
pub fn build_model(config: &ProblemConfig) -> Box<dyn PhysicalModel> {
    match config {
        ProblemConfig::Cylinder(c) => Box::new(CylinderModel::new(c.clone())),
        ProblemConfig::FlatPlate(c) => Box::new(FlatPlateModel::new(c.clone())),
    }
}
