//! Per-generation fitness statistics.

use crate::error::EvolveError;
use crate::individual::Individual;

/// Immutable fitness summary of one population at one point in time.
///
/// Computed over `Valid` scores only. The standard deviation uses the
/// population formula `sqrt(|E[x²] − E[x]²|)`; the absolute value guards
/// against negative epsilon from floating-point cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Lowest score in the population.
    pub min: f64,
    /// Highest score in the population.
    pub max: f64,
    /// Arithmetic mean of the scores.
    pub mean: f64,
    /// Population standard deviation of the scores.
    pub std_dev: f64,
}

/// Summarizes the `Valid` fitness scores of a population.
///
/// # Errors
///
/// [`EvolveError::EmptyPopulation`] if no individual carries a valid score,
/// i.e. when invoked before any evaluation.
pub fn population_stats(population: &[Individual]) -> Result<GenerationStats, EvolveError> {
    let scores: Vec<f64> = population.iter().filter_map(|ind| ind.score()).collect();
    if scores.is_empty() {
        return Err(EvolveError::EmptyPopulation);
    }

    let n = scores.len() as f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &s in &scores {
        min = min.min(s);
        max = max.max(s);
        sum += s;
        sum_sq += s * s;
    }
    let mean = sum / n;
    let std_dev = (sum_sq / n - mean * mean).abs().sqrt();

    Ok(GenerationStats {
        min,
        max,
        mean,
        std_dev,
    })
}
