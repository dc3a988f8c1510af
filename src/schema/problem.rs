//! Problem-instance configuration: physical constants and search bounds.
//!
//! Each problem instance fixes the identity and order of the optimized
//! parameters; the engine itself never branches on the problem kind.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Descriptor of one optimized parameter: display name, unit, and the
/// inclusive search range shared by initialization, crossover, and mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub bounds: (f64, f64),
}

/// Problem selection. Serialized with an explicit tag:
/// `{"type": "Cylinder", ...}` or `{"type": "FlatPlate", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProblemConfig {
    /// Insulation sizing on a cylinder under a heat-flow ceiling.
    Cylinder(CylinderConfig),
    /// Thermal boundary-layer characterization for laminar flow over a
    /// flat plate.
    FlatPlate(FlatPlateConfig),
}

impl ProblemConfig {
    /// Parameter descriptors, in chromosome order.
    pub fn gene_specs(&self) -> Vec<GeneSpec> {
        match self {
            ProblemConfig::Cylinder(c) => c.gene_specs(),
            ProblemConfig::FlatPlate(c) => c.gene_specs(),
        }
    }

    /// Validate physical constants and search bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ProblemConfig::Cylinder(c) => c.validate(),
            ProblemConfig::FlatPlate(c) => c.validate(),
        }
    }
}

/// Radial heat flow through cylindrical insulation:
/// `Q = 2π k L ΔT / ln(r2/r1)` with `r2 = r1 + t`.
///
/// Chromosome: `[k, t]` (conductivity, insulation thickness).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderConfig {
    /// Inner (pipe) radius [m].
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,
    /// Cylinder length [m].
    #[serde(default = "default_length")]
    pub length: f64,
    /// Temperature difference across the insulation [K].
    #[serde(default = "default_delta_t")]
    pub delta_t: f64,
    /// Heat-flow ceiling [W].
    #[serde(default = "default_q_max_cylinder")]
    pub q_max: f64,
    /// Conductivity ceiling [W/(m·K)].
    #[serde(default = "default_k_max")]
    pub k_max: f64,
    /// Weight applied to each squared constraint violation.
    #[serde(default = "default_penalty_cylinder")]
    pub penalty_weight: f64,
    /// Search range for conductivity `k` [W/(m·K)].
    #[serde(default = "default_conductivity_bounds")]
    pub conductivity_bounds: (f64, f64),
    /// Search range for insulation thickness `t` [m].
    #[serde(default = "default_thickness_bounds")]
    pub thickness_bounds: (f64, f64),
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            inner_radius: default_inner_radius(),
            length: default_length(),
            delta_t: default_delta_t(),
            q_max: default_q_max_cylinder(),
            k_max: default_k_max(),
            penalty_weight: default_penalty_cylinder(),
            conductivity_bounds: default_conductivity_bounds(),
            thickness_bounds: default_thickness_bounds(),
        }
    }
}

fn default_inner_radius() -> f64 {
    0.5
}
fn default_length() -> f64 {
    2.0
}
fn default_delta_t() -> f64 {
    180.0
}
fn default_q_max_cylinder() -> f64 {
    120.0
}
fn default_k_max() -> f64 {
    0.084
}
fn default_penalty_cylinder() -> f64 {
    1e4
}
fn default_conductivity_bounds() -> (f64, f64) {
    (0.02, 0.084)
}
fn default_thickness_bounds() -> (f64, f64) {
    (0.005, 0.08)
}

impl CylinderConfig {
    pub fn gene_specs(&self) -> Vec<GeneSpec> {
        vec![
            GeneSpec {
                name: "k",
                unit: "W/(m·K)",
                bounds: self.conductivity_bounds,
            },
            GeneSpec {
                name: "t",
                unit: "m",
                bounds: self.thickness_bounds,
            },
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("inner_radius", self.inner_radius)?;
        check_positive("length", self.length)?;
        check_positive("delta_t", self.delta_t)?;
        check_positive("q_max", self.q_max)?;
        check_positive("k_max", self.k_max)?;
        check_positive("penalty_weight", self.penalty_weight)?;
        check_bounds("conductivity", self.conductivity_bounds)?;
        check_bounds("thickness", self.thickness_bounds)?;
        Ok(())
    }
}

/// Laminar thermal boundary layer on a flat plate:
/// `δ = 5 x / √Re_x`, `δ_t = δ / Pr^(1/3)`, with the local film
/// coefficient `h_x = 0.332 (k_f / x) √Re_x Pr^(1/3)` and surface flux
/// `q'' = h_x (T_w - T_∞)`.
///
/// Chromosome: `[x, re_x, t_w]` (position, local Reynolds number, wall
/// temperature).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatPlateConfig {
    /// Prandtl number of the fluid.
    #[serde(default = "default_prandtl")]
    pub prandtl: f64,
    /// Fluid thermal conductivity [W/(m·K)].
    #[serde(default = "default_fluid_conductivity")]
    pub fluid_conductivity: f64,
    /// Free-stream temperature [°C].
    #[serde(default = "default_t_inf")]
    pub t_inf: f64,
    /// Transition Reynolds number; the flow must stay laminar below it.
    #[serde(default = "default_re_crit")]
    pub re_crit: f64,
    /// Local surface heat-flux ceiling [W/m²].
    #[serde(default = "default_q_max_plate")]
    pub q_max: f64,
    /// Weight applied to each squared constraint violation.
    #[serde(default = "default_penalty_plate")]
    pub penalty_weight: f64,
    /// Search range for position along the plate `x` [m].
    #[serde(default = "default_position_bounds")]
    pub position_bounds: (f64, f64),
    /// Search range for the local Reynolds number `Re_x`.
    #[serde(default = "default_reynolds_bounds")]
    pub reynolds_bounds: (f64, f64),
    /// Search range for wall temperature `T_w` [°C].
    #[serde(default = "default_wall_temp_bounds")]
    pub wall_temp_bounds: (f64, f64),
}

impl Default for FlatPlateConfig {
    fn default() -> Self {
        Self {
            prandtl: default_prandtl(),
            fluid_conductivity: default_fluid_conductivity(),
            t_inf: default_t_inf(),
            re_crit: default_re_crit(),
            q_max: default_q_max_plate(),
            penalty_weight: default_penalty_plate(),
            position_bounds: default_position_bounds(),
            reynolds_bounds: default_reynolds_bounds(),
            wall_temp_bounds: default_wall_temp_bounds(),
        }
    }
}

fn default_prandtl() -> f64 {
    0.707
}
fn default_fluid_conductivity() -> f64 {
    0.0263
}
fn default_t_inf() -> f64 {
    25.0
}
fn default_re_crit() -> f64 {
    5.0e5
}
fn default_q_max_plate() -> f64 {
    500.0
}
fn default_penalty_plate() -> f64 {
    1e6
}
fn default_position_bounds() -> (f64, f64) {
    (0.01, 1.0)
}
fn default_reynolds_bounds() -> (f64, f64) {
    (1.0e3, 8.0e5)
}
fn default_wall_temp_bounds() -> (f64, f64) {
    (30.0, 150.0)
}

impl FlatPlateConfig {
    pub fn gene_specs(&self) -> Vec<GeneSpec> {
        vec![
            GeneSpec {
                name: "x",
                unit: "m",
                bounds: self.position_bounds,
            },
            GeneSpec {
                name: "Re_x",
                unit: "",
                bounds: self.reynolds_bounds,
            },
            GeneSpec {
                name: "T_w",
                unit: "°C",
                bounds: self.wall_temp_bounds,
            },
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("prandtl", self.prandtl)?;
        check_positive("fluid_conductivity", self.fluid_conductivity)?;
        check_positive("re_crit", self.re_crit)?;
        check_positive("q_max", self.q_max)?;
        check_positive("penalty_weight", self.penalty_weight)?;
        check_bounds("position", self.position_bounds)?;
        check_bounds("reynolds", self.reynolds_bounds)?;
        check_bounds("wall_temp", self.wall_temp_bounds)?;
        if !self.t_inf.is_finite() {
            return Err(ConfigError::NonFiniteConstant {
                name: "t_inf",
                value: self.t_inf,
            });
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteConstant { name, value });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositiveConstant { name, value });
    }
    Ok(())
}

fn check_bounds(name: &'static str, bounds: (f64, f64)) -> Result<(), ConfigError> {
    if !bounds.0.is_finite() || !bounds.1.is_finite() || bounds.0 >= bounds.1 {
        return Err(ConfigError::InvalidBounds {
            name,
            min: bounds.0,
            max: bounds.1,
        });
    }
    Ok(())
}
