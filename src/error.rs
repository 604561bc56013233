//! Error types for the evolution engine.
//!
//! Configuration problems are rejected before a run starts; everything else
//! aborts the run with the generation and individual index attached.

use thiserror::Error;

/// Errors produced by configuration validation or a running engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolveError {
    /// A configuration parameter is out of range. Raised by
    /// [`EvolveConfig::validate`](crate::EvolveConfig::validate) before any
    /// evolutionary work happens.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An individual without a valid fitness was observed where an evaluated
    /// one is required (e.g. as a selection parent). This indicates an engine
    /// bug, not a user error.
    #[error("individual {index} in generation {generation} has no valid fitness")]
    StaleFitnessAccessed { generation: usize, index: usize },

    /// The fitness function returned NaN or an infinite value. The engine
    /// never substitutes a default score, since silently treating a failed
    /// evaluation as zero fitness would bias selection.
    #[error(
        "fitness function returned non-finite value {value} \
         for individual {index} in generation {generation}"
    )]
    ExternalEvaluationFailure {
        generation: usize,
        index: usize,
        value: f64,
    },

    /// Statistics were requested over a population with no evaluated
    /// individuals.
    #[error("statistics requested over a population with no evaluated individuals")]
    EmptyPopulation,
}
