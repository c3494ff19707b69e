//! Error types for evoforge
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for chromosome encoding operations
///
/// Raised by chromosome implementations when evolutionary operators are
/// applied across incompatible encodings. The engine propagates these
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChromosomeError {
    /// Two fixed-length chromosomes with different lengths were recombined
    #[error("encoding mismatch: expected length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Encodings are incompatible for a reason other than length
    #[error("incompatible encodings: {0}")]
    Incompatible(String),
}

/// Error type for selection failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    /// Total fitness of the pool is zero or negative, so a
    /// fitness-proportional wheel cannot be built
    #[error("degenerate fitness: total fitness {total} is not positive")]
    DegenerateFitness { total: f64 },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Invalid configuration (rate, epsilon, or size out of range)
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Chromosome encoding error
    #[error("chromosome error: {0}")]
    Chromosome(#[from] ChromosomeError),

    /// Selection error
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
