//! Genetic Text - Evolve random strings into a target phrase.
//!
//! This crate provides a generational genetic algorithm over fixed-length
//! printable ASCII strings. Candidates are scored by how many positions
//! match the target, parents are drawn in proportion to that score, and
//! offspring are produced by uniform crossover followed by per-symbol
//! mutation.
//!
//! # Architecture
//!
//! - `schema`: Configuration, progress and result types
//! - `compute`: The evolutionary core (candidates, mating pool, engine)
//! - `display`: Colourised terminal rendering of progress reports
//!
//! # Example
//!
//! ```rust,no_run
//! use genetic_text::{EvolutionConfig, EvolutionEngine, RunOutcome};
//!
//! let config = EvolutionConfig {
//!     target: "Hello, World!".to_string(),
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config)?;
//! let result = engine.run_with_callback(|report| {
//!     println!("Generation {}: best score = {}", report.generation, report.score);
//! })?;
//!
//! if let RunOutcome::Success { generations, .. } = result.outcome {
//!     println!("Converged after {} generations", generations);
//! }
//! # Ok::<(), genetic_text::EvolutionError>(())
//! ```

pub mod compute;
pub mod display;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, EvolutionError};
pub use schema::{EvolutionConfig, EvolutionResult, ProgressReport, RunOutcome};
