//! # evoforge
//!
//! A generational evolutionary-optimization engine for Rust.
//!
//! A population of candidate solutions ("chromosomes") is iteratively
//! improved through fitness evaluation, selection, crossover, and
//! mutation, converging toward high-fitness solutions for a
//! caller-supplied objective. Tree-shaped chromosomes support genetic
//! programming through a gene abstraction.
//!
//! ## Core Concepts
//!
//! - **Chromosome**: capability trait for one candidate solution:
//!   clone, crossover, mutate, spawn offspring, evaluate, compare by
//!   fitness. Built-in encodings: bit string, real vector, permutation,
//!   and GP expression tree.
//! - **Selection strategies**: interchangeable policies that trim an
//!   oversized pool back to the population size, weighted by fitness.
//!   Variants: roulette wheel, rank, and elite, each with optional
//!   random injection.
//! - **Population**: owns the working set and drives one evolutionary
//!   epoch (crossover, mutation, selection) per
//!   [`run_epoch`](population::Population::run_epoch) call, tracking
//!   aggregate fitness statistics.
//!
//! Higher fitness is better. Randomness is injected per instance, so
//! seeded runs are reproducible.
//!
//! ## Quick Start
//!
//! ```
//! use evoforge::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // Maximize the number of set bits in a 16-bit string
//! let mut seed_rng = StdRng::seed_from_u64(1);
//! let ancestor = BinaryChromosome::random(16, &mut seed_rng);
//! let fitness = FnFitness::new(|c: &BinaryChromosome| c.count_ones() as f64 + 1.0);
//!
//! let mut population = Population::new(
//!     20,
//!     ancestor,
//!     fitness,
//!     EliteSelection::new(),
//!     StdRng::seed_from_u64(42),
//! )?;
//!
//! for _ in 0..25 {
//!     population.run_epoch()?;
//! }
//! assert!(population.fitness_max() > 1.0);
//! # Ok::<(), evoforge::error::EvolutionError>(())
//! ```

pub mod chromosome;
pub mod error;
pub mod fitness;
pub mod gp;
pub mod population;
pub mod selection;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chromosome::{
        BinaryChromosome, Bounds, Chromosome, PermutationChromosome, VectorChromosome,
    };
    pub use crate::error::{ChromosomeError, EvoResult, EvolutionError, SelectionError};
    pub use crate::fitness::{FitnessFunction, FnFitness};
    pub use crate::gp::{ArithmeticGene, ArithmeticOp, Gene, GeneKind, GeneNode, TreeChromosome};
    pub use crate::population::{Population, DEFAULT_CROSSOVER_RATE, DEFAULT_MUTATION_RATE};
    pub use crate::selection::{
        EliteSelection, RankSelection, RouletteWheelSelection, SelectionMethod,
    };
}
