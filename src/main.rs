//! thermo-opt CLI - Run a constrained GA optimization from JSON configuration.

use std::path::PathBuf;
use std::time::Instant;

use thermo_opt::{
    OptimizerEngine,
    compute::model::{Quantities, build_model},
    schema::{self, CylinderConfig, FlatPlateConfig, GaConfig, OptimizerConfig, ProblemConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Run a constrained genetic-algorithm optimization from a JSON");
        eprintln!("configuration file.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to optimizer configuration file");
        eprintln!("  generations  Override for the configured generation count");
        eprintln!();
        eprintln!("Example configurations are printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_configs();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let mut config = schema::load_config(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    if let Some(generations) = args.get(2) {
        match generations.parse() {
            Ok(n) => config.ga.max_generations = n,
            Err(_) => {
                eprintln!("Invalid generation count: {}", generations);
                std::process::exit(1);
            }
        }
    }

    let problem_name = match &config.problem {
        ProblemConfig::Cylinder(_) => "cylinder insulation",
        ProblemConfig::FlatPlate(_) => "flat-plate boundary layer",
    };

    let mut engine = OptimizerEngine::new(&config).unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });

    println!("thermo-opt");
    println!("==========");
    println!("Problem: {}", problem_name);
    println!(
        "Population: {} ({} elite, tournament {})",
        config.ga.population_size, config.ga.elite_count, config.ga.tournament_size
    );
    println!("Generations: {}", config.ga.max_generations);
    println!("Seed: {}", engine.seed());
    println!();

    println!("Running optimization...");
    let start = Instant::now();

    let interval = (config.ga.max_generations / 10).max(1);
    let result = engine.run_with_callback(|record| {
        if (record.generation + 1) % interval == 0 || record.generation == 0 {
            println!(
                "  Gen {:>4}: best={:.6e}  mean={:.6e}  worst={:.6e}  feasible={}",
                record.generation,
                record.best_fitness,
                record.mean_fitness,
                record.worst_fitness,
                record.best_feasible
            );
        }
    });

    let elapsed = start.elapsed();

    println!();
    println!("Result ({:?}):", result.stop_reason);
    let specs = config.problem.gene_specs();
    for (spec, &value) in specs.iter().zip(&result.best.chromosome.genes) {
        if spec.unit.is_empty() {
            println!("  {:<6} = {:.6}", spec.name, value);
        } else {
            println!("  {:<6} = {:.6} {}", spec.name, value, spec.unit);
        }
    }
    println!("  Fitness  : {:.6e}", result.best.fitness);
    println!("  Feasible : {}", result.best.feasible);

    if let Some(quantities) = &result.best_quantities {
        println!();
        print_quantities(quantities);

        let model = build_model(&config.problem);
        let violations = model.violations(&result.best.chromosome.genes, quantities);
        println!();
        println!("Constraints:");
        for (name, &v) in model.constraint_names().iter().zip(&violations) {
            if v == 0.0 {
                println!("  {:<16} OK", name);
            } else {
                println!("  {:<16} VIOLATED (by {:.4e})", name, v);
            }
        }
    } else {
        println!("  (no physically valid candidate found)");
    }

    println!();
    println!(
        "Time: {:.2}s ({} generations, {:.1} generations/s)",
        elapsed.as_secs_f32(),
        result.records.len(),
        result.records.len() as f32 / elapsed.as_secs_f32()
    );
}

fn print_quantities(quantities: &Quantities) {
    match quantities {
        Quantities::Cylinder { heat_flow } => {
            println!("Quantities:");
            println!("  Q        = {:.3} W", heat_flow);
        }
        Quantities::FlatPlate {
            delta,
            delta_thermal,
            h_local,
            heat_flux,
        } => {
            println!("Quantities:");
            println!("  delta    = {:.6} m", delta);
            println!("  delta_t  = {:.6} m", delta_thermal);
            println!("  h_x      = {:.3} W/(m^2.K)", h_local);
            println!("  q''      = {:.3} W/m^2", heat_flux);
        }
    }
}

fn print_example_configs() {
    let cylinder = OptimizerConfig {
        problem: ProblemConfig::Cylinder(CylinderConfig::default()),
        ga: GaConfig::default(),
        random_seed: Some(42),
    };
    let plate = OptimizerConfig {
        problem: ProblemConfig::FlatPlate(FlatPlateConfig::default()),
        ga: GaConfig::default(),
        random_seed: Some(42),
    };

    println!("Example cylinder configuration (cylinder.json):");
    println!("{}", serde_json::to_string_pretty(&cylinder).unwrap());
    println!();
    println!("Example flat-plate configuration (plate.json):");
    println!("{}", serde_json::to_string_pretty(&plate).unwrap());
}
