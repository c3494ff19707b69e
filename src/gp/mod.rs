//! Genetic programming
//!
//! Tree-shaped chromosomes built from [`Gene`] nodes: function genes
//! drawn from a closed operator set and argument genes referencing input
//! variables.

pub mod gene;
pub mod tree;

pub use gene::{ArithmeticGene, ArithmeticOp, Gene, GeneKind, DEFAULT_FUNCTION_BIAS};
pub use tree::{GeneNode, TreeChromosome, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INITIAL_DEPTH};
