//! Progress and result types produced by an evolution run.

use serde::{Deserialize, Serialize};

use crate::compute::CellView;

/// Snapshot of a candidate, detached from the population arenas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    /// The candidate's symbols.
    pub symbols: String,
    /// Lineage generation tag of the candidate.
    pub generation: u32,
}

impl CandidateSnapshot {
    pub fn from_view(view: CellView<'_>) -> Self {
        Self {
            symbols: String::from_utf8_lossy(view.symbols()).into_owned(),
            generation: view.generation(),
        }
    }
}

/// Emitted whenever the running best score improves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Generation of the evaluation pass (1-based).
    pub generation: usize,
    /// Score of `candidate`.
    pub score: usize,
    /// Score of a perfect match.
    pub target_length: usize,
    /// The improving candidate.
    pub candidate: CandidateSnapshot,
    /// The target phrase.
    pub target: String,
    /// Per-position match flags of `candidate` against `target`.
    pub matches: Vec<bool>,
}

impl ProgressReport {
    pub fn is_perfect(&self) -> bool {
        self.score == self.target_length
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunOutcome {
    /// A candidate matched the target exactly.
    Success {
        candidate: CandidateSnapshot,
        generations: usize,
    },
    /// The generation limit was reached without a perfect match.
    ExhaustedGenerationLimit {
        best: CandidateSnapshot,
        best_score: usize,
    },
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations evaluated.
    pub generations: usize,
    /// Total candidate evaluations performed.
    pub total_evaluations: u64,
    /// Generations with an empty mating pool.
    pub mutation_only_generations: usize,
    /// Best score achieved.
    pub best_score: usize,
    /// Seed the run used; replaying it reproduces the run.
    pub random_seed: u64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
}

/// Per-generation history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Running best score after each generation's evaluation.
    pub best_score: Vec<usize>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f32>,
    /// Mating pool occupancy per generation.
    pub pool_size: Vec<usize>,
}

/// Current phase of the generational loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Arenas allocated, population not yet evaluated.
    #[default]
    Initializing,
    /// Scoring candidates.
    Evaluating,
    /// Breeding the next generation from the mating pool.
    Reproducing,
    /// Mating pool was empty; candidates drift by mutation alone.
    MutatingOnly,
    /// A perfect match was found.
    Converged,
    /// Generation limit reached without a perfect match.
    GenerationLimitReached,
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    pub outcome: RunOutcome,
    pub stats: EvolutionStats,
    pub history: EvolutionHistory,
}

impl EvolutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Success { .. })
    }
}
