//! Generational loop execution.
//!
//! [`EvolutionEngine`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! re-evaluation → wholesale replacement, repeated for a fixed number of
//! generations.
//!
//! The loop is strictly sequential: offspring of generation `g` are the
//! exclusive input to generation `g + 1`. Fitness evaluation is the only
//! step that may run in parallel (behind the `parallel` feature); it never
//! touches the RNG, so a fixed seed reproduces the run regardless of
//! evaluation parallelism.

use crate::config::EvolveConfig;
use crate::error::EvolveError;
use crate::individual::{Individual, Population};
use crate::operators::{polynomial_mutation, sbx_crossover};
use crate::random::create_rng;
use crate::selection::tournament;
use crate::stats::{population_stats, GenerationStats};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
pub struct EvolveResult {
    /// The highest-scoring individual of the final population.
    pub best: Individual,

    /// Its score (same as `best.score()`).
    pub best_score: f64,

    /// Number of generations actually completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped because the wall-clock limit elapsed.
    pub timed_out: bool,

    /// Fitness statistics for the initial population and every completed
    /// generation, in order; `history.len() == generations + 1`.
    pub history: Vec<GenerationStats>,
}

/// Executes the evolutionary loop over a user-supplied fitness function.
///
/// The fitness function maps a gene slice to a score; higher is better.
/// It must be deterministic and return finite values.
///
/// # Usage
///
/// ```
/// use realga::{EvolveConfig, EvolutionEngine};
///
/// let config = EvolveConfig::new(3)
///     .with_population_size(100)
///     .with_max_generations(20)
///     .with_seed(42);
/// let fitness = |genes: &[f64]| -genes.iter().map(|x| x * x).sum::<f64>();
/// let result = EvolutionEngine::run(&fitness, &config).unwrap();
/// assert_eq!(result.generations, 20);
/// ```
pub struct EvolutionEngine;

impl EvolutionEngine {
    /// Runs the evolutionary loop to completion.
    pub fn run<F>(fitness: &F, config: &EvolveConfig) -> Result<EvolveResult, EvolveError>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        Self::run_with_cancel(fitness, config, None)
    }

    /// Runs the loop with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, the run stops at
    /// the next generation boundary and returns the best found so far.
    pub fn run_with_cancel<F>(
        fitness: &F,
        config: &EvolveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolveResult, EvolveError>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        Self::run_observed(fitness, config, cancel, |_, _| {})
    }

    /// Runs the loop, invoking `observer` with the generation index and its
    /// fitness statistics after every evaluation phase (index 0 is the
    /// initial population).
    pub fn run_observed<F, O>(
        fitness: &F,
        config: &EvolveConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: O,
    ) -> Result<EvolveResult, EvolveError>
    where
        F: Fn(&[f64]) -> f64 + Sync,
        O: FnMut(usize, &GenerationStats),
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let bounds = config.bounds;

        let mut population: Population = (0..config.population_size)
            .map(|_| Individual::random(config.vector_length, bounds, &mut rng))
            .collect();

        evaluate_stale(fitness, &mut population, 0, config.parallel)?;

        let mut history = Vec::with_capacity(config.max_generations + 1);
        let initial = population_stats(&population)?;
        observer(0, &initial);
        history.push(initial);

        let started = Instant::now();
        let mut cancelled = false;
        let mut timed_out = false;
        let mut completed = 0;

        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit_ms) = config.time_limit_ms {
                if started.elapsed().as_millis() as u64 >= limit_ms {
                    timed_out = true;
                    break;
                }
            }

            // Selection clones winners, so variation below never aliases
            // the parent population's vectors.
            let mut offspring = tournament(&population, config.tournament_size, gen, &mut rng)?;

            // Pair-level Bernoulli gate over even/odd non-overlapping pairs.
            for pair in offspring.chunks_exact_mut(2) {
                if rng.random::<f64>() < config.crossover_prob {
                    if let [c1, c2] = pair {
                        sbx_crossover(c1, c2, bounds, config.crossover_eta, &mut rng);
                    }
                }
            }

            for ind in offspring.iter_mut() {
                if rng.random::<f64>() < config.mutation_prob {
                    polynomial_mutation(
                        ind,
                        bounds,
                        config.mutation_eta,
                        config.mutation_indpb,
                        &mut rng,
                    );
                }
            }

            evaluate_stale(fitness, &mut offspring, gen, config.parallel)?;

            // Wholesale replacement; the old generation is discarded.
            population = offspring;
            completed = gen;

            let stats = population_stats(&population)?;
            observer(gen, &stats);
            history.push(stats);
        }

        let (best_index, best_score) = find_best(&population, completed)?;
        Ok(EvolveResult {
            best: population[best_index].clone(),
            best_score,
            generations: completed,
            cancelled,
            timed_out,
            history,
        })
    }
}

/// Evaluates every individual whose fitness is stale; already-valid scores
/// are kept, so evaluation cost scales with the number of stale individuals.
///
/// After evaluation every score must be finite; a NaN or infinite score
/// aborts the run with full context.
fn evaluate_stale<F>(
    fitness: &F,
    population: &mut [Individual],
    generation: usize,
    parallel: bool,
) -> Result<(), EvolveError>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            population
                .par_iter_mut()
                .filter(|ind| ind.is_stale())
                .for_each(|ind| {
                    let score = fitness(ind.genes());
                    ind.set_score(score);
                });
        } else {
            evaluate_sequential(fitness, population);
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = parallel;
        evaluate_sequential(fitness, population);
    }

    for (index, ind) in population.iter().enumerate() {
        match ind.score() {
            Some(score) if score.is_finite() => {}
            Some(score) => {
                return Err(EvolveError::ExternalEvaluationFailure {
                    generation,
                    index,
                    value: score,
                })
            }
            None => return Err(EvolveError::StaleFitnessAccessed { generation, index }),
        }
    }
    Ok(())
}

fn evaluate_sequential<F>(fitness: &F, population: &mut [Individual])
where
    F: Fn(&[f64]) -> f64,
{
    for ind in population.iter_mut().filter(|ind| ind.is_stale()) {
        let score = fitness(ind.genes());
        ind.set_score(score);
    }
}

/// Index and score of the highest-scoring individual.
fn find_best(
    population: &[Individual],
    generation: usize,
) -> Result<(usize, f64), EvolveError> {
    let mut best: Option<(usize, f64)> = None;
    for (index, ind) in population.iter().enumerate() {
        let score = ind
            .score()
            .ok_or(EvolveError::StaleFitnessAccessed { generation, index })?;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }
    best.ok_or(EvolveError::EmptyPopulation)
}
