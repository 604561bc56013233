//! Genetic representation: bounded real vectors with tracked fitness state.
//!
//! An [`Individual`] owns a fixed-length vector of `f64` genes, each
//! constrained to a shared `[low, up]` range, plus a [`FitnessState`] that
//! records whether its score can be trusted. Whenever an operator rewrites
//! genes, the state drops back to `Unevaluated`; only an explicit evaluation
//! promotes it to `Valid` again. Staleness is always this tagged state,
//! never a sentinel score.

use rand::Rng;

/// Inclusive per-dimension gene range.
///
/// The reference configuration uses one shared range for all dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub up: f64,
}

impl Bounds {
    /// Creates a new bounds pair. Validity (`low < up`, both finite) is
    /// checked by [`EvolveConfig::validate`](crate::EvolveConfig::validate).
    pub fn new(low: f64, up: f64) -> Self {
        Self { low, up }
    }

    /// Width of the range.
    pub fn range(&self) -> f64 {
        self.up - self.low
    }

    /// Whether `x` lies within the range (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.up
    }

    /// Forces `x` into the range.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.low, self.up)
    }
}

/// Whether an individual's fitness can be trusted.
///
/// Transitions:
/// - gene change (crossover, mutation) → `Unevaluated`
/// - evaluation → `Valid(score)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitnessState {
    /// No trusted score: never evaluated, or stale after a gene change.
    Unevaluated,
    /// Score from the most recent evaluation of the current genes.
    Valid(f64),
}

impl FitnessState {
    /// Returns the score if one is valid.
    pub fn value(&self) -> Option<f64> {
        match *self {
            FitnessState::Valid(score) => Some(score),
            FitnessState::Unevaluated => None,
        }
    }

    /// Whether the fitness needs (re)computation.
    pub fn is_stale(&self) -> bool {
        matches!(self, FitnessState::Unevaluated)
    }
}

/// One candidate solution: a bounded gene vector plus its fitness state.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<f64>,
    fitness: FitnessState,
}

/// An ordered generation of individuals. Constructed wholesale and replaced
/// wholesale; never resized mid-generation.
pub type Population = Vec<Individual>;

impl Individual {
    /// Wraps an existing gene vector. Starts `Unevaluated`.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: FitnessState::Unevaluated,
        }
    }

    /// Creates an individual with `length` genes drawn uniformly from
    /// `bounds`. Starts `Unevaluated`.
    pub fn random<R: Rng>(length: usize, bounds: Bounds, rng: &mut R) -> Self {
        let genes = (0..length)
            .map(|_| rng.random_range(bounds.low..=bounds.up))
            .collect();
        Self::new(genes)
    }

    /// The gene vector.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Mutable gene access for the genetic operators. Callers are
    /// responsible for invalidating the fitness afterwards.
    pub(crate) fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Number of genes. Fixed for the lifetime of the individual.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the gene vector is empty.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The current fitness state.
    pub fn fitness(&self) -> FitnessState {
        self.fitness
    }

    /// The score, if a valid one exists.
    pub fn score(&self) -> Option<f64> {
        self.fitness.value()
    }

    /// Whether the fitness needs (re)computation.
    pub fn is_stale(&self) -> bool {
        self.fitness.is_stale()
    }

    /// Stores an evaluation result, marking the fitness `Valid`.
    pub fn set_score(&mut self, score: f64) {
        self.fitness = FitnessState::Valid(score);
    }

    /// Drops the fitness back to `Unevaluated`.
    pub fn invalidate(&mut self) {
        self.fitness = FitnessState::Unevaluated;
    }

    /// Forces every gene into `bounds`.
    pub fn clamp(&mut self, bounds: Bounds) {
        for gene in &mut self.genes {
            *gene = bounds.clamp(*gene);
        }
    }
}
