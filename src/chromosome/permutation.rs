//! Permutation chromosome
//!
//! Fixed-length permutation encoding with order crossover (OX) and swap
//! mutation. Both operators preserve permutation validity.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::traits::Chromosome;
use crate::error::ChromosomeError;

/// A permutation of `0..n`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermutationChromosome {
    perm: Vec<usize>,
    fitness: f64,
}

impl PermutationChromosome {
    /// Create a chromosome from an explicit permutation
    ///
    /// # Errors
    /// Returns [`ChromosomeError::Incompatible`] if `perm` is not a valid
    /// permutation of `0..perm.len()`.
    pub fn new(perm: Vec<usize>) -> Result<Self, ChromosomeError> {
        if !is_valid_permutation(&perm) {
            return Err(ChromosomeError::Incompatible(
                "sequence is not a permutation of 0..n".to_string(),
            ));
        }
        Ok(Self { perm, fitness: 0.0 })
    }

    /// Create a random permutation of `0..n`
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(rng);
        Self { perm, fitness: 0.0 }
    }

    /// Get the permutation length
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Check if the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Get the permutation as a slice
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Check if the genome represents a valid permutation
    pub fn is_valid(&self) -> bool {
        is_valid_permutation(&self.perm)
    }
}

fn is_valid_permutation(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &idx in perm {
        if idx >= n || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Build one OX child: copy a segment from `template`, fill the rest from
/// `donor` in order, wrapping around past the segment end.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

impl Chromosome for PermutationChromosome {
    fn generate<R: Rng>(&mut self, rng: &mut R) {
        self.perm.shuffle(rng);
    }

    fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self {
        Self::random(self.perm.len(), rng)
    }

    /// Order crossover (OX): each child keeps a random segment of one
    /// parent and takes the remaining elements in the order they appear
    /// in the other parent.
    fn crossover<R: Rng>(&mut self, peer: &mut Self, rng: &mut R) -> Result<(), ChromosomeError> {
        if self.perm.len() != peer.perm.len() {
            return Err(ChromosomeError::LengthMismatch {
                expected: self.perm.len(),
                actual: peer.perm.len(),
            });
        }

        let n = self.perm.len();
        if n < 2 {
            return Ok(());
        }

        let mut start = rng.gen_range(0..n);
        let mut end = rng.gen_range(0..n);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let child1 = ox_build_child(&self.perm, &peer.perm, start, end);
        let child2 = ox_build_child(&peer.perm, &self.perm, start, end);
        self.perm = child1;
        peer.perm = child2;
        Ok(())
    }

    /// Exchange two randomly chosen positions.
    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        let n = self.perm.len();
        if n < 2 {
            return;
        }
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        self.perm.swap(i, j);
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
