//! Engine configuration.
//!
//! [`EvolveConfig`] holds every parameter of the evolutionary loop. Values
//! are stored exactly as given and checked by [`validate`](EvolveConfig::validate);
//! nothing is silently clamped, so an out-of-range probability is rejected
//! instead of adjusted.

use crate::error::EvolveError;
use crate::individual::Bounds;

/// Configuration for one evolutionary run.
///
/// # Defaults
///
/// [`EvolveConfig::new`] mirrors the reference setup: population 200,
/// bounds `[-3, 3]`, tournament size 3, crossover probability 0.9 with
/// eta 20, mutation probability 0.2 with eta 20 and per-gene probability
/// `1 / vector_length`, 100 generations.
///
/// # Builder Pattern
///
/// ```
/// use realga::EvolveConfig;
///
/// let config = EvolveConfig::new(3)
///     .with_population_size(500)
///     .with_bounds(-3.0, 3.0)
///     .with_max_generations(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolveConfig {
    /// Number of individuals in the population. Fixed for the whole run.
    pub population_size: usize,

    /// Number of genes per individual. Fixed for the whole run.
    pub vector_length: usize,

    /// Inclusive gene range shared by all dimensions.
    pub bounds: Bounds,

    /// Tournament size for parent selection. Must not exceed the
    /// population size.
    pub tournament_size: usize,

    /// Probability of applying crossover to an offspring pair (0.0–1.0).
    pub crossover_prob: f64,

    /// Probability of applying mutation to an offspring (0.0–1.0).
    pub mutation_prob: f64,

    /// SBX distribution index. Larger values keep children closer to
    /// their parents. Must be positive.
    pub crossover_eta: f64,

    /// Polynomial mutation distribution index. Larger values produce
    /// smaller perturbations. Must be positive.
    pub mutation_eta: f64,

    /// Per-gene mutation probability (0.0–1.0). The reference value
    /// `1 / vector_length` mutates one gene per individual in expectation.
    pub mutation_indpb: f64,

    /// Number of generations to run. There is no convergence-based early
    /// stop.
    pub max_generations: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Whether to evaluate stale individuals in parallel using rayon.
    /// Only effective with the `parallel` feature; selection and variation
    /// stay sequential either way, so the seed fully determines the run.
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds, checked at generation
    /// granularity. The run returns the best found so far when exceeded.
    /// `None` disables time-based termination.
    pub time_limit_ms: Option<u64>,
}

impl EvolveConfig {
    /// Creates a configuration for vectors of `vector_length` genes with
    /// the reference defaults.
    pub fn new(vector_length: usize) -> Self {
        Self {
            population_size: 200,
            vector_length,
            bounds: Bounds::new(-3.0, 3.0),
            tournament_size: 3,
            crossover_prob: 0.9,
            mutation_prob: 0.2,
            crossover_eta: 20.0,
            mutation_eta: 20.0,
            mutation_indpb: if vector_length > 0 {
                1.0 / vector_length as f64
            } else {
                0.0
            },
            max_generations: 100,
            seed: None,
            parallel: false,
            time_limit_ms: None,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the shared gene range.
    pub fn with_bounds(mut self, low: f64, up: f64) -> Self {
        self.bounds = Bounds::new(low, up);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the pair-level crossover probability.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p;
        self
    }

    /// Sets the per-individual mutation probability.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = p;
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_indpb(mut self, p: f64) -> Self {
        self.mutation_indpb = p;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`EvolveError::InvalidConfig`] describing the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), EvolveError> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.vector_length == 0 {
            return Err(invalid("vector_length must be at least 1"));
        }
        if !self.bounds.low.is_finite() || !self.bounds.up.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if self.bounds.range() <= 0.0 {
            return Err(invalid("bounds must satisfy low < up"));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(invalid(
                "tournament_size must be in 1..=population_size",
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_prob) {
            return Err(invalid("crossover_prob must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(invalid("mutation_prob must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_indpb) {
            return Err(invalid("mutation_indpb must be in [0, 1]"));
        }
        if !self.crossover_eta.is_finite() || self.crossover_eta <= 0.0 {
            return Err(invalid("crossover_eta must be positive"));
        }
        if !self.mutation_eta.is_finite() || self.mutation_eta <= 0.0 {
            return Err(invalid("mutation_eta must be positive"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> EvolveError {
    EvolveError::InvalidConfig(msg.into())
}
