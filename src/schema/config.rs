//! Run configuration for the phrase search.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::is_printable;

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Phrase the population evolves toward. Printable ASCII only.
    #[serde(default = "default_target")]
    pub target: String,
    /// Number of candidates per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Maximum number of generations evaluated before giving up.
    #[serde(default = "default_generation_limit")]
    pub generation_limit: usize,
    /// Per-symbol mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            population_size: default_population_size(),
            generation_limit: default_generation_limit(),
            mutation_rate: default_mutation_rate(),
            random_seed: None,
        }
    }
}

fn default_target() -> String {
    "This is CS50 on twitch!".to_string()
}
fn default_population_size() -> usize {
    500
}
fn default_generation_limit() -> usize {
    1000
}
fn default_mutation_rate() -> f32 {
    0.01
}

impl EvolutionConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EvolutionConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Length of every candidate in this run.
    #[inline]
    pub fn cell_length(&self) -> usize {
        self.target.len()
    }

    /// Mating pool capacity: an upper bound on the total fitness of a
    /// generation, since no candidate scores above the target length.
    pub fn pool_capacity(&self) -> Option<usize> {
        self.population_size.checked_mul(self.cell_length())
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        if self.target.is_empty() {
            return Err(EvolutionConfigError::EmptyTarget);
        }
        if let Some((position, symbol)) = self.target.char_indices().find(|(_, c)| {
            !c.is_ascii() || !is_printable(*c as u8)
        }) {
            return Err(EvolutionConfigError::NonPrintableTarget { position, symbol });
        }
        if self.population_size == 0 {
            return Err(EvolutionConfigError::PopulationTooSmall);
        }
        if self.generation_limit == 0 {
            return Err(EvolutionConfigError::InvalidGenerationLimit);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.pool_capacity().is_none() {
            return Err(EvolutionConfigError::CapacityOverflow {
                population_size: self.population_size,
                cell_length: self.cell_length(),
            });
        }
        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionConfigError {
    #[error("Target phrase must not be empty")]
    EmptyTarget,
    #[error("Target symbol {symbol:?} at byte {position} is not printable ASCII")]
    NonPrintableTarget { position: usize, symbol: char },
    #[error("Population size must be at least 1")]
    PopulationTooSmall,
    #[error("Generation limit must be positive")]
    InvalidGenerationLimit,
    #[error("Mutation rate {0} is outside [0, 1]")]
    InvalidMutationRate(f32),
    #[error("Population of {population_size} x {cell_length} symbols overflows")]
    CapacityOverflow {
        population_size: usize,
        cell_length: usize,
    },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
