//! Chromosome encodings
//!
//! The [`Chromosome`] trait defines the capability set of a candidate
//! solution; the submodules provide the built-in encodings (bit string,
//! real vector, permutation). Tree-shaped chromosomes for genetic
//! programming live in [`crate::gp`].

pub mod binary;
pub mod bounds;
pub mod permutation;
pub mod traits;
pub mod vector;

pub use binary::BinaryChromosome;
pub use bounds::Bounds;
pub use permutation::PermutationChromosome;
pub use traits::Chromosome;
pub use vector::VectorChromosome;
