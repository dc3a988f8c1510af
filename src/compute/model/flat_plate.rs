//! Thermal boundary layer on a flat plate in laminar flow.
//!
//! Blasius velocity boundary layer `δ = 5 x / √Re_x`, thermal thickness
//! `δ_t = δ / Pr^(1/3)` (Pohlhausen), local film coefficient
//! `h_x = 0.332 (k_f / x) √Re_x Pr^(1/3)` and surface flux
//! `q'' = h_x (T_w - T_∞)`.
//!
//! The objective is `δ_t`; constraints keep the flow laminar
//! (`Re_x <= Re_crit`) and the surface flux under `q_max`. The correlations
//! are undefined for `x <= 0` or `Re_x <= 0`.

use crate::schema::{FlatPlateConfig, GeneSpec};

use super::{PhysicalModel, Quantities};

pub struct FlatPlateModel {
    config: FlatPlateConfig,
}

impl FlatPlateModel {
    pub fn new(config: FlatPlateConfig) -> Self {
        Self { config }
    }
}

impl PhysicalModel for FlatPlateModel {
    fn gene_specs(&self) -> Vec<GeneSpec> {
        self.config.gene_specs()
    }

    fn quantities(&self, genes: &[f64]) -> Option<Quantities> {
        let &[x, re_x, t_w] = genes else {
            return None;
        };
        if !x.is_finite() || !re_x.is_finite() || !t_w.is_finite() {
            return None;
        }
        if x <= 0.0 || re_x <= 0.0 {
            return None;
        }

        let pr_cbrt = self.config.prandtl.cbrt();
        let delta = 5.0 * x / re_x.sqrt();
        let delta_thermal = delta / pr_cbrt;
        let h_local = 0.332 * self.config.fluid_conductivity / x * re_x.sqrt() * pr_cbrt;
        let heat_flux = h_local * (t_w - self.config.t_inf);

        if !delta_thermal.is_finite() || !heat_flux.is_finite() {
            return None;
        }

        Some(Quantities::FlatPlate {
            delta,
            delta_thermal,
            h_local,
            heat_flux,
        })
    }

    fn objective(&self, _genes: &[f64], quantities: &Quantities) -> f64 {
        match quantities {
            Quantities::FlatPlate { delta_thermal, .. } => *delta_thermal,
            _ => f64::INFINITY,
        }
    }

    fn violations(&self, genes: &[f64], quantities: &Quantities) -> Vec<f64> {
        match quantities {
            Quantities::FlatPlate { heat_flux, .. } => vec![
                (genes[1] - self.config.re_crit).max(0.0),
                (heat_flux - self.config.q_max).max(0.0),
            ],
            _ => vec![f64::INFINITY],
        }
    }

    fn constraint_names(&self) -> &'static [&'static str] {
        &["Re_x <= Re_crit", "q'' <= q_max"]
    }

    fn penalty_weight(&self) -> f64 {
        self.config.penalty_weight
    }
}
