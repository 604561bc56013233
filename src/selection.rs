//! Tournament selection.
//!
//! Selection chooses the parents that seed the next generation. Higher
//! scores are better (maximization), and selection requires a fully
//! evaluated population: it only copies existing `Valid` individuals, so it
//! never marks anything stale.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::EvolveError;
use crate::individual::{Individual, Population};
use rand::Rng;

/// Selects a full offspring population of `population.len()` clones by
/// repeated tournaments of size `k`.
///
/// Each tournament draws `k` individuals uniformly at random with
/// replacement and keeps the one with the highest score; ties are broken in
/// favor of the first-drawn contestant.
///
/// # Errors
///
/// - [`EvolveError::InvalidConfig`] if `k == 0` or `k` exceeds the
///   population size.
/// - [`EvolveError::StaleFitnessAccessed`] if any individual is still
///   `Unevaluated`; `generation` is only used for that error's context.
pub fn tournament<R: Rng>(
    population: &[Individual],
    k: usize,
    generation: usize,
    rng: &mut R,
) -> Result<Population, EvolveError> {
    let n = population.len();
    if n == 0 {
        return Err(EvolveError::InvalidConfig(
            "cannot select from an empty population".into(),
        ));
    }
    if k == 0 || k > n {
        return Err(EvolveError::InvalidConfig(format!(
            "tournament size {k} must be in 1..={n}"
        )));
    }

    // Precondition: every parent carries a valid score.
    let mut scores = Vec::with_capacity(n);
    for (index, ind) in population.iter().enumerate() {
        match ind.score() {
            Some(score) => scores.push(score),
            None => return Err(EvolveError::StaleFitnessAccessed { generation, index }),
        }
    }

    let mut offspring = Vec::with_capacity(n);
    for _ in 0..n {
        let mut winner = rng.random_range(0..n);
        for _ in 1..k {
            let challenger = rng.random_range(0..n);
            if scores[challenger] > scores[winner] {
                winner = challenger;
            }
        }
        offspring.push(population[winner].clone());
    }
    Ok(offspring)
}
