//! Generational loop of the genetic optimizer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::compute::model::{Quantities, build_model};
use crate::schema::{ConfigError, GaConfig, GeneSpec, OptimizerConfig};

use super::fitness::FitnessEvaluator;
use super::genome::{Chromosome, SearchRng};

/// One candidate solution with its cached evaluation.
///
/// The cache is always consistent with the chromosome: individuals are
/// only constructed through evaluation, and genetic operators produce new
/// chromosomes rather than mutating existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub chromosome: Chromosome,
    /// Penalized fitness; lower is better.
    pub fitness: f64,
    /// True when every constraint is satisfied at zero violation.
    pub feasible: bool,
}

/// Ordered, fixed-size collection of individuals for one generation.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    pub fn new(members: Vec<Individual>) -> Self {
        Self { members }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// Member indices ranked best-first. Equal fitness keeps the earlier
    /// index first (stable sort), which pins down elitism and tie-breaks
    /// under a fixed seed.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.members.len()).collect();
        indices.sort_by(|&a, &b| self.members[a].fitness.total_cmp(&self.members[b].fitness));
        indices
    }

    /// Best member; ties resolve to the earliest index.
    ///
    /// Panics if the population is empty.
    pub fn best(&self) -> &Individual {
        let mut best = 0;
        for (i, member) in self.members.iter().enumerate().skip(1) {
            if member.fitness < self.members[best].fitness {
                best = i;
            }
        }
        &self.members[best]
    }

    /// Best/mean/worst fitness of the generation.
    ///
    /// Panics if the population is empty.
    pub fn statistics(&self) -> PopulationStats {
        let mut best = f64::INFINITY;
        let mut worst = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for member in &self.members {
            best = best.min(member.fitness);
            worst = worst.max(member.fitness);
            sum += member.fitness;
        }
        PopulationStats {
            best,
            mean: sum / self.members.len() as f64,
            worst,
        }
    }
}

/// Fitness statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
}

/// Statistics recorded after evaluating one generation; one entry per
/// completed generation, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub worst_fitness: f64,
    pub best_feasible: bool,
    pub best_chromosome: Chromosome,
    /// Physical quantities of the generation best, so reporters can plot
    /// parameter and quantity trajectories without re-deriving them.
    pub best_quantities: Option<Quantities>,
}

/// Reason the generational loop stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Reached the configured generation count.
    MaxGenerations,
    /// Best fitness stopped improving over the stagnation window.
    Stagnation,
    /// The external stop flag was raised.
    Cancelled,
}

/// Final result of an optimization run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Best individual seen across all generations.
    pub best: Individual,
    /// Physical quantities of the best individual; `None` only if the
    /// entire run never produced a physical candidate.
    pub best_quantities: Option<Quantities>,
    /// Full generation trace for the reporter.
    pub records: Vec<GenerationRecord>,
    /// Seed actually used, for reproducing the run.
    pub seed: u64,
    pub stop_reason: StopReason,
}

/// Genetic-algorithm engine: owns the population, the RNG, and the
/// generational loop.
///
/// The loop never fails mid-run: configuration errors are rejected at
/// construction, and degenerate fitness evaluations collapse to a sentinel
/// ranking instead of propagating.
pub struct OptimizerEngine {
    ga: GaConfig,
    specs: Vec<GeneSpec>,
    evaluator: FitnessEvaluator,
    rng: SearchRng,
    population: Population,
    records: Vec<GenerationRecord>,
    best_ever: Option<Individual>,
    seed: u64,
    cancelled: Arc<AtomicBool>,
}

impl OptimizerEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: &OptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let model = build_model(&config.problem);
        let specs = model.gene_specs();
        let seed = config.random_seed.unwrap_or_else(rand::random);

        Ok(Self {
            ga: config.ga.clone(),
            specs,
            evaluator: FitnessEvaluator::new(model),
            rng: SearchRng::new(seed),
            population: Population::default(),
            records: Vec::new(),
            best_ever: None,
            seed,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle for requesting a stop; checked between generations.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Seed in use (explicit or entropy-drawn).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the optimization (blocking).
    pub fn run(&mut self) -> RunResult {
        self.run_with_callback(|_| {})
    }

    /// Run the optimization, invoking the callback once per recorded
    /// generation.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> RunResult
    where
        F: FnMut(&GenerationRecord),
    {
        log::debug!(
            "starting optimization: population {}, max {} generations, seed {}",
            self.ga.population_size,
            self.ga.max_generations,
            self.seed
        );

        self.initialize();

        let stop_reason = loop {
            let record = self.record_generation();
            callback(&record);

            if let Some(reason) = self.should_stop() {
                break reason;
            }

            self.advance_generation();
        };

        let best = match &self.best_ever {
            Some(best) => best.clone(),
            None => self.population.best().clone(),
        };
        let best_quantities = self.evaluator.model().quantities(&best.chromosome.genes);

        log::info!(
            "stopped after {} generations ({:?}): best fitness {:.6e}, feasible {}",
            self.records.len(),
            stop_reason,
            best.fitness,
            best.feasible
        );

        RunResult {
            best,
            best_quantities,
            records: std::mem::take(&mut self.records),
            seed: self.seed,
            stop_reason,
        }
    }

    /// Build and evaluate the initial population.
    fn initialize(&mut self) {
        let mut members = Vec::with_capacity(self.ga.population_size);
        for _ in 0..self.ga.population_size {
            let chromosome = self.rng.random_chromosome(&self.specs);
            members.push(self.make_individual(chromosome));
        }
        self.population = Population::new(members);
        self.records.clear();
        self.best_ever = None;
    }

    fn make_individual(&self, chromosome: Chromosome) -> Individual {
        let eval = self.evaluator.evaluate(&chromosome);
        Individual {
            chromosome,
            fitness: eval.fitness,
            feasible: eval.feasible,
        }
    }

    /// Compute generation statistics, append the record, and refresh the
    /// best-ever individual.
    fn record_generation(&mut self) -> GenerationRecord {
        let stats = self.population.statistics();
        let best = self.population.best();

        if self
            .best_ever
            .as_ref()
            .is_none_or(|b| best.fitness < b.fitness)
        {
            self.best_ever = Some(best.clone());
        }

        let record = GenerationRecord {
            generation: self.records.len(),
            best_fitness: stats.best,
            mean_fitness: stats.mean,
            worst_fitness: stats.worst,
            best_feasible: best.feasible,
            best_chromosome: best.chromosome.clone(),
            best_quantities: self.evaluator.model().quantities(&best.chromosome.genes),
        };

        log::debug!(
            "generation {}: best {:.6e}, mean {:.6e}, worst {:.6e}",
            record.generation,
            record.best_fitness,
            record.mean_fitness,
            record.worst_fitness
        );

        self.records.push(record.clone());
        record
    }

    /// Check termination; runs between generations.
    fn should_stop(&self) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if self.records.len() >= self.ga.max_generations {
            return Some(StopReason::MaxGenerations);
        }

        if let Some(window) = self.ga.stagnation_window
            && self.records.len() > window
        {
            let newest = self.records[self.records.len() - 1].best_fitness;
            let oldest = self.records[self.records.len() - 1 - window].best_fitness;
            if oldest - newest < self.ga.epsilon {
                return Some(StopReason::Stagnation);
            }
        }

        None
    }

    /// Produce the next generation: elites unchanged, the rest by
    /// tournament selection, crossover, mutation, and evaluation.
    fn advance_generation(&mut self) {
        let ranked = self.population.ranked_indices();
        let mut next: Vec<Individual> = ranked
            .iter()
            .take(self.ga.elite_count)
            .map(|&i| self.population.members()[i].clone())
            .collect();

        while next.len() < self.ga.population_size {
            let a = self.select_parent();
            let b = self.select_parent();
            let parent_a = self.population.members()[a].chromosome.clone();
            let parent_b = self.population.members()[b].chromosome.clone();

            let (child_a, child_b) =
                self.rng
                    .crossover(&parent_a, &parent_b, self.ga.crossover_rate, &self.specs);

            for child in [child_a, child_b] {
                let mutated = self.rng.mutate(
                    &child,
                    self.ga.mutation_rate,
                    self.ga.mutation_scale,
                    &self.specs,
                );
                next.push(self.make_individual(mutated));
                if next.len() == self.ga.population_size {
                    break;
                }
            }
        }

        self.population = Population::new(next);
    }

    /// Tournament selection: sample `tournament_size` indices with
    /// replacement and keep the best. Exact fitness ties prefer the
    /// earlier population index, for determinism under a fixed seed.
    fn select_parent(&mut self) -> usize {
        let members = self.population.members();
        let mut best = self.rng.index(members.len());
        for _ in 1..self.ga.tournament_size {
            let candidate = self.rng.index(members.len());
            let better = members[candidate].fitness < members[best].fitness
                || (members[candidate].fitness == members[best].fitness && candidate < best);
            if better {
                best = candidate;
            }
        }
        best
    }
}
