//! Penalized fitness evaluation on top of a physical model.

use crate::compute::model::{PhysicalModel, Quantities};

use super::genome::Chromosome;

/// Fitness assigned when the model cannot produce a finite result. Large
/// enough to rank a degenerate individual behind every physical one, so
/// selection pressure removes it without ever aborting a generation.
pub const SENTINEL_FITNESS: f64 = 1e30;

/// Outcome of evaluating one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Penalized objective; lower is better.
    pub fitness: f64,
    /// True when every constraint is satisfied at zero violation.
    pub feasible: bool,
    /// Derived physical quantities; `None` when the model regime is
    /// undefined for this chromosome.
    pub quantities: Option<Quantities>,
}

/// Combines the model objective with quadratic constraint penalties:
/// `fitness = objective + w · Σ vᵢ²`. Small violations stay cheap; large
/// violations dominate and rank last.
pub struct FitnessEvaluator {
    model: Box<dyn PhysicalModel>,
}

impl FitnessEvaluator {
    pub fn new(model: Box<dyn PhysicalModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn PhysicalModel {
        self.model.as_ref()
    }

    /// Evaluate one chromosome. Deterministic for identical inputs and
    /// never fails: a degenerate regime or non-finite accumulation
    /// collapses to [`SENTINEL_FITNESS`] with `feasible = false`.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Evaluation {
        let Some(quantities) = self.model.quantities(&chromosome.genes) else {
            return Evaluation {
                fitness: SENTINEL_FITNESS,
                feasible: false,
                quantities: None,
            };
        };

        let violations = self.model.violations(&chromosome.genes, &quantities);
        let feasible = violations.iter().all(|&v| v == 0.0);

        let weight = self.model.penalty_weight();
        let mut fitness = self.model.objective(&chromosome.genes, &quantities);
        for v in &violations {
            fitness += weight * v * v;
        }

        if !fitness.is_finite() {
            return Evaluation {
                fitness: SENTINEL_FITNESS,
                feasible: false,
                quantities: Some(quantities),
            };
        }

        Evaluation {
            fitness,
            feasible,
            quantities: Some(quantities),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compute::model::{CylinderModel, FlatPlateModel};
    use crate::schema::{CylinderConfig, FlatPlateConfig, GeneSpec};

    use super::*;

    /// Small cylinder with a reachable flux ceiling: Q <= 50 W is
    /// satisfiable for t above roughly 0.049 m at k = 0.03.
    fn feasible_cylinder() -> FitnessEvaluator {
        FitnessEvaluator::new(Box::new(CylinderModel::new(CylinderConfig {
            inner_radius: 0.05,
            length: 1.0,
            delta_t: 180.0,
            q_max: 50.0,
            k_max: 0.084,
            penalty_weight: 1e4,
            conductivity_bounds: (0.03, 0.05),
            thickness_bounds: (0.001, 0.1),
        })))
    }

    fn plate() -> FitnessEvaluator {
        FitnessEvaluator::new(Box::new(FlatPlateModel::new(FlatPlateConfig::default())))
    }

    #[test]
    fn test_feasible_fitness_is_objective() {
        let eval = feasible_cylinder().evaluate(&Chromosome::new(vec![0.03, 0.06]));
        assert!(eval.feasible);
        assert_eq!(eval.fitness, 0.06);
    }

    #[test]
    fn test_penalty_separates_feasible_from_violated() {
        let evaluator = feasible_cylinder();
        // t = 0.0486 keeps Q just under the ceiling; t = 0.0484 breaks it.
        let feasible = evaluator.evaluate(&Chromosome::new(vec![0.03, 0.0486]));
        let violated = evaluator.evaluate(&Chromosome::new(vec![0.03, 0.0484]));

        assert!(feasible.feasible);
        assert!(!violated.feasible);
        // The violated candidate has the smaller objective but the larger
        // penalized fitness.
        assert!(violated.fitness > feasible.fitness);
    }

    #[test]
    fn test_degenerate_regime_gets_sentinel() {
        let eval = plate().evaluate(&Chromosome::new(vec![0.5, 0.0, 100.0]));
        assert_eq!(eval.fitness, SENTINEL_FITNESS);
        assert!(!eval.feasible);
        assert!(eval.quantities.is_none());
    }

    #[test]
    fn test_sentinel_ranks_behind_any_physical_candidate() {
        let evaluator = plate();
        let degenerate = evaluator.evaluate(&Chromosome::new(vec![0.5, 0.0, 100.0]));
        let physical = evaluator.evaluate(&Chromosome::new(vec![0.5, 1.0e5, 40.0]));
        assert!(degenerate.fitness > physical.fitness);
    }

    #[test]
    fn test_non_finite_objective_gets_sentinel() {
        struct ExplodingModel;

        impl PhysicalModel for ExplodingModel {
            fn gene_specs(&self) -> Vec<GeneSpec> {
                vec![GeneSpec {
                    name: "x",
                    unit: "",
                    bounds: (0.0, 1.0),
                }]
            }
            fn quantities(&self, _genes: &[f64]) -> Option<Quantities> {
                Some(Quantities::Cylinder { heat_flow: 0.0 })
            }
            fn objective(&self, _genes: &[f64], _q: &Quantities) -> f64 {
                f64::INFINITY
            }
            fn violations(&self, _genes: &[f64], _q: &Quantities) -> Vec<f64> {
                vec![0.0]
            }
            fn constraint_names(&self) -> &'static [&'static str] {
                &["noop"]
            }
            fn penalty_weight(&self) -> f64 {
                1.0
            }
        }

        let evaluator = FitnessEvaluator::new(Box::new(ExplodingModel));
        let eval = evaluator.evaluate(&Chromosome::new(vec![0.5]));
        assert_eq!(eval.fitness, SENTINEL_FITNESS);
        assert!(!eval.feasible);
    }
}
