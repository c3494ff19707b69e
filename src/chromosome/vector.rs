//! Real-valued vector chromosome
//!
//! Fixed-length f64 encoding over a value range, with single-point
//! crossover and Gaussian single-gene mutation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::chromosome::bounds::Bounds;
use crate::chromosome::traits::Chromosome;
use crate::error::ChromosomeError;

/// Fraction of the bounds range used as the mutation standard deviation
const MUTATION_SIGMA_FRACTION: f64 = 0.1;

/// A fixed-length real-valued chromosome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorChromosome {
    genes: Vec<f64>,
    bounds: Bounds,
    fitness: f64,
}

impl VectorChromosome {
    /// Create a chromosome from explicit genes
    ///
    /// Genes are clamped into the given bounds.
    pub fn new(genes: Vec<f64>, bounds: Bounds) -> Self {
        let genes = genes.into_iter().map(|g| bounds.clamp(g)).collect();
        Self {
            genes,
            bounds,
            fitness: 0.0,
        }
    }

    /// Create a random chromosome of the given length
    pub fn random<R: Rng>(length: usize, bounds: Bounds, rng: &mut R) -> Self {
        let genes = (0..length)
            .map(|_| rng.gen_range(bounds.min..=bounds.max))
            .collect();
        Self {
            genes,
            bounds,
            fitness: 0.0,
        }
    }

    /// Get the number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Check if the chromosome has no genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Get the genes as a slice
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Get the value bounds
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl Chromosome for VectorChromosome {
    fn generate<R: Rng>(&mut self, rng: &mut R) {
        for gene in &mut self.genes {
            *gene = rng.gen_range(self.bounds.min..=self.bounds.max);
        }
    }

    fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self {
        Self::random(self.genes.len(), self.bounds, rng)
    }

    /// Single-point crossover: tails beyond a random split point are
    /// exchanged between the two chromosomes.
    fn crossover<R: Rng>(&mut self, peer: &mut Self, rng: &mut R) -> Result<(), ChromosomeError> {
        if self.genes.len() != peer.genes.len() {
            return Err(ChromosomeError::LengthMismatch {
                expected: self.genes.len(),
                actual: peer.genes.len(),
            });
        }

        let n = self.genes.len();
        if n < 2 {
            return Ok(());
        }

        let point = rng.gen_range(1..n);
        for i in point..n {
            std::mem::swap(&mut self.genes[i], &mut peer.genes[i]);
        }
        Ok(())
    }

    /// Gaussian perturbation of one randomly chosen gene, clamped back
    /// into bounds. Sigma is a fixed fraction of the bounds range.
    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        if self.genes.is_empty() {
            return;
        }
        let sigma = self.bounds.range() * MUTATION_SIGMA_FRACTION;
        let normal = Normal::new(0.0, sigma).expect("sigma is finite and non-negative");
        let idx = rng.gen_range(0..self.genes.len());
        self.genes[idx] = self.bounds.clamp(self.genes[idx] + normal.sample(rng));
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
