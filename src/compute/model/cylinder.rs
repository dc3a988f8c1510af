//! Insulation sizing on a cylinder.
//!
//! Radial heat flow through cylindrical insulation:
//! `Q = 2π k L ΔT / ln(r2/r1)` with `r2 = r1 + t`.
//!
//! The objective is the insulation thickness `t`; constraints cap the heat
//! flow at `Q_max` and the conductivity at `k_max`.

use std::f64::consts::PI;

use crate::schema::{CylinderConfig, GeneSpec};

use super::{PhysicalModel, Quantities};

pub struct CylinderModel {
    config: CylinderConfig,
}

impl CylinderModel {
    pub fn new(config: CylinderConfig) -> Self {
        Self { config }
    }

    /// `Q = 2π k L ΔT / ln(r2/r1)`. Undefined for `t <= 0` (the log
    /// denominator vanishes) or non-positive `k`.
    fn heat_flow(&self, k: f64, t: f64) -> Option<f64> {
        if !k.is_finite() || !t.is_finite() || k <= 0.0 || t <= 0.0 {
            return None;
        }
        let r_outer = self.config.inner_radius + t;
        let log_ratio = (r_outer / self.config.inner_radius).ln();
        if log_ratio <= 0.0 {
            return None;
        }
        let q = 2.0 * PI * k * self.config.length * self.config.delta_t / log_ratio;
        q.is_finite().then_some(q)
    }
}

impl PhysicalModel for CylinderModel {
    fn gene_specs(&self) -> Vec<GeneSpec> {
        self.config.gene_specs()
    }

    fn quantities(&self, genes: &[f64]) -> Option<Quantities> {
        let &[k, t] = genes else {
            return None;
        };
        let heat_flow = self.heat_flow(k, t)?;
        Some(Quantities::Cylinder { heat_flow })
    }

    fn objective(&self, genes: &[f64], _quantities: &Quantities) -> f64 {
        // Minimize the insulation thickness.
        genes[1]
    }

    fn violations(&self, genes: &[f64], quantities: &Quantities) -> Vec<f64> {
        match quantities {
            Quantities::Cylinder { heat_flow } => vec![
                (heat_flow - self.config.q_max).max(0.0),
                (genes[0] - self.config.k_max).max(0.0),
            ],
            _ => vec![f64::INFINITY],
        }
    }

    fn constraint_names(&self) -> &'static [&'static str] {
        &["Q <= Q_max", "k <= k_max"]
    }

    fn penalty_weight(&self) -> f64 {
        self.config.penalty_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CylinderModel {
        CylinderModel::new(CylinderConfig::default())
    }

    #[test]
    fn test_heat_flow_formula() {
        // r1 = 0.5, L = 2, dT = 180, k = 0.05, t = 0.05:
        // Q = 2*pi*0.05*2*180 / ln(1.1) = 113.0973 / 0.0953102 = 1186.62 W
        let q = model().heat_flow(0.05, 0.05).unwrap();
        assert!((q - 1186.62).abs() < 0.5);
    }

    #[test]
    fn test_thicker_insulation_reduces_heat_flow() {
        let m = model();
        let thin = m.heat_flow(0.05, 0.01).unwrap();
        let thick = m.heat_flow(0.05, 0.08).unwrap();
        assert!(thick < thin);
    }

    #[test]
    fn test_zero_thickness_is_degenerate() {
        assert!(model().quantities(&[0.05, 0.0]).is_none());
        assert!(model().quantities(&[0.0, 0.05]).is_none());
        assert!(model().quantities(&[0.05, f64::NAN]).is_none());
    }

    #[test]
    fn test_violations_zero_when_within_limits() {
        // A small pipe with a 50 W ceiling: Q(0.03, 0.06) = 43.0 W.
        let m = CylinderModel::new(CylinderConfig {
            inner_radius: 0.05,
            length: 1.0,
            q_max: 50.0,
            ..Default::default()
        });
        let genes = [0.03, 0.06];
        let q = m.quantities(&genes).unwrap();
        let v = m.violations(&genes, &q);
        assert_eq!(v.len(), 2);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_heat_flow_ceiling_violation() {
        let m = model();
        // Thin insulation pushes Q far above the ceiling.
        let genes = [0.084, 0.005];
        let Quantities::Cylinder { heat_flow } = m.quantities(&genes).unwrap() else {
            panic!("wrong variant");
        };
        assert!(heat_flow > m.config.q_max);

        let v = m.violations(&genes, &Quantities::Cylinder { heat_flow });
        assert!(v[0] > 0.0);
        assert!((v[0] - (heat_flow - m.config.q_max)).abs() < 1e-9);
    }

    #[test]
    fn test_conductivity_ceiling_violation() {
        let m = model();
        let genes = [0.1, 0.08];
        let q = m.quantities(&genes).unwrap();
        let v = m.violations(&genes, &q);
        assert!((v[1] - (0.1 - m.config.k_max)).abs() < 1e-12);
    }
}
