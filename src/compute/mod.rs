//! Compute module - The evolutionary core.
//!
//! # Overview
//!
//! - **Random source** (`rng`): seedable generator for every stochastic step
//! - **Candidates** (`cell`): randomize, point-mutate, and uniform crossover
//! - **Arenas** (`population`): contiguous storage for one generation
//! - **Mating pool** (`pool`): fitness-proportional selection by repeated insertion
//! - **Fitness** (`fitness`): positional match count against the target
//! - **Engine** (`engine`): the generational loop

mod cell;
mod engine;
pub mod fitness;
mod pool;
mod population;
mod rng;

pub use cell::{Cell, CellError, CellView, MutationRate};
pub use engine::{EvolutionEngine, EvolutionError};
pub use pool::{MatingPool, PoolError};
pub use population::Population;
pub use rng::{
    MUTATION_GRANULARITY, PRINTABLE_COUNT, PRINTABLE_MAX, PRINTABLE_MIN, SymbolRng, is_printable,
};
