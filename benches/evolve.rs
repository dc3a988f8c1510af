//! Benchmarks for the genetic optimizer loop.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use thermo_opt::{
    compute::evolution::OptimizerEngine,
    schema::{CylinderConfig, FlatPlateConfig, GaConfig, OptimizerConfig, ProblemConfig},
};

fn bench_cylinder_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("cylinder_run");

    for population in [16, 50, 100] {
        let config = OptimizerConfig {
            problem: ProblemConfig::Cylinder(CylinderConfig::default()),
            ga: GaConfig {
                population_size: population,
                max_generations: 20,
                ..Default::default()
            },
            random_seed: Some(42),
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("pop_{}", population)),
            &population,
            |b, _| {
                b.iter(|| {
                    let mut engine = OptimizerEngine::new(black_box(&config)).unwrap();
                    engine.run()
                });
            },
        );
    }

    group.finish();
}

fn bench_flat_plate_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_plate_run");

    for population in [16, 50] {
        let config = OptimizerConfig {
            problem: ProblemConfig::FlatPlate(FlatPlateConfig::default()),
            ga: GaConfig {
                population_size: population,
                max_generations: 20,
                ..Default::default()
            },
            random_seed: Some(42),
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("pop_{}", population)),
            &population,
            |b, _| {
                b.iter(|| {
                    let mut engine = OptimizerEngine::new(black_box(&config)).unwrap();
                    engine.run()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cylinder_run, bench_flat_plate_run);
criterion_main!(benches);
