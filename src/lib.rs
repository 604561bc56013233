//! Real-coded genetic algorithm engine.
//!
//! Evolves a population of fixed-length, bounded real vectors toward
//! maximizing a user-supplied fitness function, using tournament selection,
//! bounded simulated binary crossover (SBX), and bounded polynomial
//! mutation over a fixed number of generations.
//!
//! # Core Types
//!
//! - [`EvolveConfig`]: Algorithm parameters (population size, bounds,
//!   operator probabilities, distribution indices, seed)
//! - [`EvolutionEngine`]: Executes the generational loop
//! - [`EvolveResult`]: Best individual plus per-generation statistics
//! - [`Individual`]: One bounded vector with its tracked [`FitnessState`]
//!
//! # Submodules
//!
//! - [`selection`]: Tournament selection
//! - [`operators`]: SBX crossover and polynomial mutation
//! - [`stats`]: Min/max/mean/std fitness summaries
//!
//! # Example
//!
//! ```
//! use realga::{EvolveConfig, EvolutionEngine};
//!
//! // Peak of 1.0 at (2, -1, 1).
//! let fitness = |g: &[f64]| {
//!     1.0 / (1.0 + (g[0] - 2.0).powi(2) + (g[1] + 1.0).powi(2) + (g[2] - 1.0).powi(2))
//! };
//!
//! let config = EvolveConfig::new(3)
//!     .with_population_size(200)
//!     .with_bounds(-3.0, 3.0)
//!     .with_max_generations(50)
//!     .with_seed(7);
//!
//! let result = EvolutionEngine::run(&fitness, &config).unwrap();
//! assert_eq!(result.generations, 50);
//! assert!(result.best_score > 0.5);
//! ```
//!
//! # Determinism
//!
//! The engine owns a single explicit RNG seeded from the configuration and
//! threads it through every operator call in a fixed order. Fitness
//! evaluation never touches the RNG, so runs are reproducible under a fixed
//! seed even with the `parallel` feature enabled.
//!
//! # Features
//!
//! - `parallel`: evaluate stale individuals in parallel using rayon
//! - `serde`: serialize configurations and statistics

mod config;
mod engine;
mod error;
mod individual;
mod random;
pub mod operators;
pub mod selection;
pub mod stats;

pub use config::EvolveConfig;
pub use engine::{EvolutionEngine, EvolveResult};
pub use error::EvolveError;
pub use individual::{Bounds, FitnessState, Individual, Population};
pub use random::create_rng;
pub use stats::{population_stats, GenerationStats};
