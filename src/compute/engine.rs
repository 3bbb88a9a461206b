//! Generational driver: evaluate, select, reproduce, repeat.

use log::{debug, info};

use crate::schema::{
    CandidateSnapshot, EvolutionConfig, EvolutionConfigError, EvolutionHistory, EvolutionPhase,
    EvolutionResult, EvolutionStats, ProgressReport, RunOutcome,
};

use super::cell::{CellError, MutationRate};
use super::fitness;
use super::pool::{MatingPool, PoolError};
use super::population::Population;
use super::rng::SymbolRng;

/// Evolution engine that runs the search.
///
/// All storage (both population arenas, the fitness table and the mating
/// pool) is allocated in [`EvolutionEngine::new`] and reused for every
/// generation.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    random_seed: u64,
    rng: SymbolRng,
    current: Population,
    next: Population,
    fitness: Vec<usize>,
    pool: MatingPool,
    best_symbols: Vec<u8>,
    best_generation: u32,
    best_score: usize,
    best_seen: bool,
    history: EvolutionHistory,
    generation: usize,
    total_evaluations: u64,
    mutation_only_generations: usize,
    phase: EvolutionPhase,
}

impl EvolutionEngine {
    /// Validate the configuration and allocate all run storage.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        config.validate()?;

        let mutation_rate = MutationRate::new(config.mutation_rate)?;
        let size = config.population_size;
        let cell_length = config.cell_length();
        let allocation = || EvolutionError::Allocation { size, cell_length };

        // Initial candidates are generation 1; their children will be 2.
        let current =
            Population::new(size, cell_length, 1, mutation_rate).ok_or_else(allocation)?;
        let next = Population::new(size, cell_length, 2, mutation_rate).ok_or_else(allocation)?;

        let capacity = config
            .pool_capacity()
            .ok_or(EvolutionConfigError::CapacityOverflow {
                population_size: size,
                cell_length,
            })?;
        let pool = MatingPool::with_capacity(capacity)?;

        let random_seed = config.random_seed.unwrap_or_else(rand::random);

        Ok(Self {
            random_seed,
            rng: SymbolRng::new(random_seed),
            current,
            next,
            fitness: vec![0; size],
            pool,
            best_symbols: vec![b' '; cell_length],
            best_generation: 0,
            best_score: 0,
            best_seen: false,
            history: EvolutionHistory::default(),
            generation: 0,
            total_evaluations: 0,
            mutation_only_generations: 0,
            phase: EvolutionPhase::Initializing,
            config,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Seed of the random source; fixed per engine.
    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Generation currently (or last) processed, 1-based.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best score seen so far in the run.
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// The current population.
    pub fn population(&self) -> &Population {
        &self.current
    }

    pub fn pool(&self) -> &MatingPool {
        &self.pool
    }

    /// Reset run state and randomize the population.
    ///
    /// The random source is reseeded, so every run of the same engine
    /// replays identically.
    pub fn initialize(&mut self) {
        self.rng = SymbolRng::new(self.random_seed);
        self.current.reset(1, &mut self.rng);
        self.fitness.fill(0);
        self.pool.clear();
        self.best_score = 0;
        self.best_seen = false;
        self.best_generation = 0;
        self.history = EvolutionHistory::default();
        self.generation = 0;
        self.total_evaluations = 0;
        self.mutation_only_generations = 0;
        self.phase = EvolutionPhase::Initializing;
    }

    /// Score every candidate, reporting each improvement of the running best.
    ///
    /// Returns the index of a perfect match as soon as one is scored; the
    /// remaining candidates of the generation are left unevaluated.
    fn evaluate<F>(&mut self, callback: &mut F) -> Option<usize>
    where
        F: FnMut(&ProgressReport),
    {
        let target = self.config.target.as_bytes();

        for index in 0..self.current.len() {
            let candidate = self.current.view(index);
            let score = fitness::score(candidate.symbols(), target);
            self.fitness[index] = score;
            self.total_evaluations += 1;

            let improved = score > self.best_score;
            if !improved && self.best_seen {
                continue;
            }

            self.best_symbols.copy_from_slice(candidate.symbols());
            self.best_generation = candidate.generation();
            self.best_score = score;
            self.best_seen = true;

            if improved {
                callback(&ProgressReport {
                    generation: self.generation,
                    score,
                    target_length: target.len(),
                    candidate: CandidateSnapshot::from_view(candidate),
                    target: self.config.target.clone(),
                    matches: fitness::match_mask(candidate.symbols(), target),
                });

                if score == target.len() {
                    return Some(index);
                }
            }
        }

        None
    }

    /// Insert each candidate's index once per fitness point.
    fn populate_pool(&mut self) -> Result<(), PoolError> {
        for (index, &weight) in self.fitness.iter().enumerate() {
            self.pool.insert_weighted(index, weight)?;
        }
        Ok(())
    }

    /// Fill the next arena with mutated offspring and make it current.
    fn reproduce(&mut self) -> Result<(), CellError> {
        for slot in 0..self.next.len() {
            // Checked non-empty by the caller.
            let a = self.pool.draw_unchecked(&mut self.rng);
            let b = self.pool.draw_unchecked(&mut self.rng);

            let mut child = self.next.cell_mut(slot);
            child.crossover(self.current.view(a), self.current.view(b), &mut self.rng)?;
            child.mutate(&mut self.rng);
        }

        std::mem::swap(&mut self.current, &mut self.next);
        Ok(())
    }

    fn record_history(&mut self, evaluated: usize) {
        self.history.best_score.push(self.best_score);
        self.history
            .avg_fitness
            .push(fitness::average(&self.fitness[..evaluated]));
        self.history.pool_size.push(self.pool.len());
    }

    fn best_snapshot(&self) -> CandidateSnapshot {
        CandidateSnapshot {
            symbols: String::from_utf8_lossy(&self.best_symbols).into_owned(),
            generation: self.best_generation,
        }
    }

    fn finish(&self, outcome: RunOutcome, elapsed_seconds: f64) -> EvolutionResult {
        EvolutionResult {
            outcome,
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.total_evaluations,
                mutation_only_generations: self.mutation_only_generations,
                best_score: self.best_score,
                random_seed: self.random_seed,
                elapsed_seconds,
            },
            history: self.history.clone(),
        }
    }

    /// Run evolution with progress callback.
    ///
    /// The callback receives a report every time the running best score
    /// strictly improves.
    pub fn run_with_callback<F>(
        &mut self,
        mut callback: F,
    ) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&ProgressReport),
    {
        let start_time = std::time::Instant::now();

        self.initialize();
        info!(
            "Evolving {} candidates toward {:?} (limit {} generations, mutation rate {}, seed {})",
            self.current.len(),
            self.config.target,
            self.config.generation_limit,
            self.config.mutation_rate,
            self.random_seed
        );

        for generation in 1..=self.config.generation_limit {
            self.generation = generation;
            self.phase = EvolutionPhase::Evaluating;

            if let Some(index) = self.evaluate(&mut callback) {
                self.phase = EvolutionPhase::Converged;
                self.record_history(index + 1);

                let candidate = CandidateSnapshot::from_view(self.current.view(index));
                info!("Target reached at generation {}", generation);

                return Ok(self.finish(
                    RunOutcome::Success {
                        candidate,
                        generations: generation,
                    },
                    start_time.elapsed().as_secs_f64(),
                ));
            }

            self.populate_pool()?;
            self.record_history(self.current.len());
            debug!(
                "Generation {}: best={} avg={:.3} pool={}",
                generation,
                self.best_score,
                self.history.avg_fitness.last().copied().unwrap_or_default(),
                self.pool.len()
            );

            if self.pool.is_empty() {
                self.phase = EvolutionPhase::MutatingOnly;
                self.mutation_only_generations += 1;
                debug!("Generation {}: no candidate scored, mutating in place", generation);
                self.current.mutate_all(&mut self.rng);
            } else {
                self.phase = EvolutionPhase::Reproducing;
                self.reproduce()?;
            }

            self.pool.clear();
        }

        self.phase = EvolutionPhase::GenerationLimitReached;
        info!(
            "Generation limit {} reached, best score {}/{}",
            self.config.generation_limit,
            self.best_score,
            self.config.cell_length()
        );

        Ok(self.finish(
            RunOutcome::ExhaustedGenerationLimit {
                best: self.best_snapshot(),
                best_score: self.best_score,
            },
            start_time.elapsed().as_secs_f64(),
        ))
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_| {})
    }
}

/// Engine-level failures. Each one is a configuration or programming
/// defect rather than an outcome of the search.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] EvolutionConfigError),
    #[error(transparent)]
    Cell(#[from] CellError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("Failed to allocate population of {size} x {cell_length} symbols")]
    Allocation { size: usize, cell_length: usize },
}
