//! Genetic Text CLI - Evolve a phrase from a JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io::IsTerminal;
use std::path::PathBuf;

use genetic_text::{EvolutionConfig, EvolutionEngine, RunOutcome, display};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        return;
    }

    if args.iter().any(|a| a == "--example") {
        print_example_config();
        return;
    }

    let json = args.iter().any(|a| a == "--json");
    let config_path = args.iter().skip(1).find(|a| !a.starts_with("--"));

    // Load configuration
    let config = match config_path {
        Some(path) => EvolutionConfig::load(PathBuf::from(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path, e);
            std::process::exit(1);
        }),
        None => EvolutionConfig::default(),
    };

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let color = !json && std::io::stdout().is_terminal();

    if !json {
        let config = engine.config();
        println!("Genetic Text");
        println!("============");
        println!("Target: {:?} ({} symbols)", config.target, config.cell_length());
        println!("Population: {}", config.population_size);
        println!("Generation limit: {}", config.generation_limit);
        println!("Mutation rate: {}", config.mutation_rate);
        println!("Seed: {}", engine.random_seed());
        println!();
    }

    let result = engine
        .run_with_callback(|report| {
            if !json {
                println!("{}", display::summary_line(report, color));
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!();
        match &result.outcome {
            RunOutcome::Success {
                candidate,
                generations,
            } => {
                println!("Found {:?} after {} generations", candidate.symbols, generations);
            }
            RunOutcome::ExhaustedGenerationLimit { best, best_score } => {
                println!(
                    "No solution within {} generations; best {:?} scored {}/{}",
                    result.stats.generations,
                    best.symbols,
                    best_score,
                    engine.config().cell_length()
                );
            }
        }
        println!(
            "Evaluations: {} ({} mutation-only generations), time: {:.2}s",
            result.stats.total_evaluations,
            result.stats.mutation_only_generations,
            result.stats.elapsed_seconds
        );
    }

    if !result.is_success() {
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json] [--json]", program);
    eprintln!();
    eprintln!("Evolve a population of random strings toward a target phrase.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to run configuration (default: built-in)");
    eprintln!("  --json       Print the final result as JSON");
    eprintln!("  --example    Print an example configuration");
}

fn print_example_config() {
    let config = EvolutionConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
