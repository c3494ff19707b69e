//! Binary chromosome
//!
//! Fixed-length bit-string encoding with single-point crossover and
//! single-bit flip mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::traits::Chromosome;
use crate::error::ChromosomeError;

/// A fixed-length bit-string chromosome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryChromosome {
    bits: Vec<bool>,
    fitness: f64,
}

impl BinaryChromosome {
    /// Create a chromosome from explicit bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits, fitness: 0.0 }
    }

    /// Create a random chromosome of the given length
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        let bits = (0..length).map(|_| rng.gen()).collect();
        Self { bits, fitness: 0.0 }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the chromosome has no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get the bits as a slice
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Count the number of true bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl Chromosome for BinaryChromosome {
    fn generate<R: Rng>(&mut self, rng: &mut R) {
        for bit in &mut self.bits {
            *bit = rng.gen();
        }
    }

    fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self {
        Self::random(self.bits.len(), rng)
    }

    /// Single-point crossover: tails beyond a random split point are
    /// exchanged between the two chromosomes.
    fn crossover<R: Rng>(&mut self, peer: &mut Self, rng: &mut R) -> Result<(), ChromosomeError> {
        if self.bits.len() != peer.bits.len() {
            return Err(ChromosomeError::LengthMismatch {
                expected: self.bits.len(),
                actual: peer.bits.len(),
            });
        }

        let n = self.bits.len();
        if n < 2 {
            return Ok(());
        }

        let point = rng.gen_range(1..n);
        for i in point..n {
            std::mem::swap(&mut self.bits[i], &mut peer.bits[i]);
        }
        Ok(())
    }

    /// Flip one randomly chosen bit.
    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        if self.bits.is_empty() {
            return;
        }
        let idx = rng.gen_range(0..self.bits.len());
        self.bits[idx] = !self.bits[idx];
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
