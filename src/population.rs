//! Population engine
//!
//! [`Population`] owns the working set of chromosomes and drives one
//! evolutionary epoch: crossover grows the set with recombined children,
//! mutation grows it further with perturbed clones, and selection trims
//! it back to the configured size while refreshing fitness statistics.

use rand::rngs::StdRng;
use rand::Rng;

use crate::chromosome::traits::Chromosome;
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::FitnessFunction;
use crate::selection::traits::SelectionMethod;

/// Default probability that a chromosome pair is recombined per epoch
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.75;

/// Default probability that a chromosome spawns a mutant per epoch
pub const DEFAULT_MUTATION_RATE: f64 = 0.10;

fn validate_rate(rate: f64, name: &str) -> EvoResult<f64> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(EvolutionError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            name, rate
        )));
    }
    Ok(rate)
}

/// A population of chromosomes evolving against one fitness function
/// under one selection strategy
///
/// The population holds exactly `size` chromosomes after every completed
/// epoch; it is transiently larger between crossover/mutation and
/// selection. Fitness values and the recorded statistics are meaningful
/// only after the current epoch's evaluate pass inside
/// [`selection`](Population::selection).
///
/// Randomness comes from a per-instance generator injected at
/// construction, so separate populations never share hidden state and a
/// seeded generator makes a run reproducible.
pub struct Population<C, F, S>
where
    C: Chromosome,
    F: FitnessFunction<Chromosome = C>,
    S: SelectionMethod<C>,
{
    chromosomes: Vec<C>,
    size: usize,
    fitness: F,
    selection: S,
    rng: StdRng,
    crossover_rate: f64,
    mutation_rate: f64,
    fitness_max: f64,
    fitness_sum: f64,
    fitness_avg: f64,
    best: Option<C>,
    generation: usize,
}

impl<C, F, S> Population<C, F, S>
where
    C: Chromosome,
    F: FitnessFunction<Chromosome = C>,
    S: SelectionMethod<C>,
{
    /// Create a population seeded from one ancestor plus `size - 1`
    /// randomly generated offspring of the same shape
    ///
    /// # Errors
    /// Returns [`EvolutionError::Configuration`] if `size` is zero.
    pub fn new(
        size: usize,
        ancestor: C,
        fitness: F,
        selection: S,
        mut rng: StdRng,
    ) -> EvoResult<Self> {
        if size < 1 {
            return Err(EvolutionError::Configuration(format!(
                "population size must be at least 1, got {}",
                size
            )));
        }

        let mut offspring: Vec<C> = (1..size)
            .map(|_| ancestor.create_offspring(&mut rng))
            .collect();
        let mut chromosomes = Vec::with_capacity(size);
        chromosomes.push(ancestor);
        chromosomes.append(&mut offspring);

        Ok(Self {
            chromosomes,
            size,
            fitness,
            selection,
            rng,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            fitness_max: 0.0,
            fitness_sum: 0.0,
            fitness_avg: 0.0,
            best: None,
            generation: 0,
        })
    }

    /// Configured population size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current working-set length (`size` after every completed epoch,
    /// transiently larger inside one)
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Check if the working set is empty (never true for a constructed
    /// population)
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Get a chromosome by index
    pub fn get(&self, index: usize) -> Option<&C> {
        self.chromosomes.get(index)
    }

    /// Get the working set as a slice
    pub fn chromosomes(&self) -> &[C] {
        &self.chromosomes
    }

    /// Get an iterator over the working set
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.chromosomes.iter()
    }

    /// Number of completed epochs
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The crossover probability
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// The mutation probability
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Set the crossover probability
    ///
    /// # Errors
    /// Returns [`EvolutionError::Configuration`] if `rate` is outside
    /// `[0, 1]`.
    pub fn set_crossover_rate(&mut self, rate: f64) -> EvoResult<()> {
        self.crossover_rate = validate_rate(rate, "crossover rate")?;
        Ok(())
    }

    /// Set the mutation probability
    ///
    /// # Errors
    /// Returns [`EvolutionError::Configuration`] if `rate` is outside
    /// `[0, 1]`.
    pub fn set_mutation_rate(&mut self, rate: f64) -> EvoResult<()> {
        self.mutation_rate = validate_rate(rate, "mutation rate")?;
        Ok(())
    }

    /// Highest fitness recorded by the last selection pass
    pub fn fitness_max(&self) -> f64 {
        self.fitness_max
    }

    /// Total fitness recorded by the last selection pass
    pub fn fitness_sum(&self) -> f64 {
        self.fitness_sum
    }

    /// Mean fitness recorded by the last selection pass
    pub fn fitness_avg(&self) -> f64 {
        self.fitness_avg
    }

    /// Best chromosome of the current generation (earliest maximum),
    /// replaced at every selection pass
    pub fn best_chromosome(&self) -> Option<&C> {
        self.best.as_ref()
    }

    /// The external fitness function
    pub fn fitness_function(&self) -> &F {
        &self.fitness
    }

    /// The selection strategy
    pub fn selection_method(&self) -> &S {
        &self.selection
    }

    /// Refill the whole population with fresh offspring of the
    /// chromosome-0 template, discarding the rest. Statistics are reset
    /// until the next selection pass.
    pub fn regenerate(&mut self) {
        let template = self.chromosomes[0].clone();
        self.chromosomes.clear();
        for _ in 0..self.size {
            self.chromosomes
                .push(template.create_offspring(&mut self.rng));
        }
        self.fitness_max = 0.0;
        self.fitness_sum = 0.0;
        self.fitness_avg = 0.0;
        self.best = None;
    }

    /// Recombine adjacent pairs (0,1), (2,3), ... with probability
    /// `crossover_rate`, appending both children to the working set
    ///
    /// # Errors
    /// Propagates encoding mismatches raised by the chromosomes.
    pub fn crossover(&mut self) -> EvoResult<()> {
        let mut i = 1;
        while i < self.size {
            if self.rng.gen::<f64>() < self.crossover_rate {
                let mut first = self.chromosomes[i - 1].clone();
                let mut second = self.chromosomes[i].clone();
                first.crossover(&mut second, &mut self.rng)?;
                self.chromosomes.push(first);
                self.chromosomes.push(second);
            }
            i += 2;
        }
        Ok(())
    }

    /// For each of the original `size` chromosomes, with probability
    /// `mutation_rate`, append a mutated clone to the working set
    pub fn mutate(&mut self) {
        for i in 0..self.size {
            if self.rng.gen::<f64>() < self.mutation_rate {
                let mut mutant = self.chromosomes[i].clone();
                mutant.mutate(&mut self.rng);
                self.chromosomes.push(mutant);
            }
        }
    }

    /// Evaluate every member of the working set, trim it back to `size`
    /// with the selection strategy, and refresh the fitness statistics
    ///
    /// # Errors
    /// Propagates the selection strategy's degenerate-fitness policy.
    pub fn selection(&mut self) -> EvoResult<()> {
        for chromosome in &mut self.chromosomes {
            chromosome.evaluate(&self.fitness);
        }

        self.selection
            .apply_selection(&mut self.chromosomes, self.size, &mut self.rng)?;

        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut best_index = 0;
        for (i, chromosome) in self.chromosomes.iter().enumerate() {
            let fitness = chromosome.fitness();
            sum += fitness;
            if fitness > max {
                max = fitness;
                best_index = i;
            }
        }
        self.fitness_max = max;
        self.fitness_sum = sum;
        self.fitness_avg = sum / self.chromosomes.len() as f64;
        self.best = Some(self.chromosomes[best_index].clone());
        Ok(())
    }

    /// Run one full epoch: crossover, mutation, selection
    ///
    /// The epoch is all-or-nothing: on any error the pre-epoch working
    /// set is restored and the generation counter is left untouched.
    pub fn run_epoch(&mut self) -> EvoResult<()> {
        let snapshot = self.chromosomes.clone();

        let outcome = self
            .crossover()
            .and_then(|_| {
                self.mutate();
                self.selection()
            });

        match outcome {
            Ok(()) => {
                self.generation += 1;
                Ok(())
            }
            Err(err) => {
                self.chromosomes = snapshot;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::chromosome::binary::BinaryChromosome;
    use crate::chromosome::bounds::Bounds;
    use crate::chromosome::vector::VectorChromosome;
    use crate::error::ChromosomeError;
    use crate::fitness::FnFitness;
    use crate::selection::elite::EliteSelection;
    use crate::selection::roulette::RouletteWheelSelection;
    use rand::SeedableRng;

    fn ones_fitness() -> FnFitness<BinaryChromosome, fn(&BinaryChromosome) -> f64> {
        FnFitness::new(|c: &BinaryChromosome| c.count_ones() as f64 + 1.0)
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let ancestor = BinaryChromosome::random(8, &mut rng);

        let result = Population::new(
            0,
            ancestor,
            ones_fitness(),
            EliteSelection::new(),
            StdRng::seed_from_u64(42),
        );
        assert!(matches!(result, Err(EvolutionError::Configuration(_))));
    }

    #[test]
    fn test_seeding_keeps_ancestor_first() {
        let ancestor = BinaryChromosome::new(vec![true; 8]);

        let population = Population::new(
            10,
            ancestor.clone(),
            ones_fitness(),
            EliteSelection::new(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();

        assert_eq!(population.len(), 10);
        assert_eq!(population.get(0).unwrap().bits(), ancestor.bits());
        for member in population.iter() {
            assert_eq!(member.len(), 8);
        }
    }

    #[test]
    fn test_rate_setters_validate() {
        let population = || {
            Population::new(
                4,
                BinaryChromosome::new(vec![true; 4]),
                ones_fitness(),
                EliteSelection::new(),
                StdRng::seed_from_u64(42),
            )
            .unwrap()
        };

        let mut p = population();
        assert_eq!(p.crossover_rate(), DEFAULT_CROSSOVER_RATE);
        assert_eq!(p.mutation_rate(), DEFAULT_MUTATION_RATE);

        assert!(p.set_crossover_rate(1.0).is_ok());
        assert!(p.set_mutation_rate(0.0).is_ok());
        assert!(p.set_crossover_rate(1.01).is_err());
        assert!(p.set_mutation_rate(-0.5).is_err());
        // failed setters leave the previous value in place
        assert_eq!(p.crossover_rate(), 1.0);
        assert_eq!(p.mutation_rate(), 0.0);
    }

    #[test]
    fn test_size_invariant_across_epochs() {
        let mut population = Population::new(
            10,
            BinaryChromosome::new(vec![false; 16]),
            ones_fitness(),
            EliteSelection::new(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();

        for epoch in 0..10 {
            population.run_epoch().unwrap();
            assert_eq!(population.len(), 10, "size broken after epoch {}", epoch);
            assert_eq!(population.generation(), epoch + 1);
        }
    }

    #[test]
    fn test_noop_operators_draw_from_seeds() {
        // crossover and mutation disabled: the epoch's result is drawn
        // only from the 10 seeded chromosomes
        let ancestor = VectorChromosome::new(vec![1.0, 2.0], Bounds::symmetric(5.0));
        let fitness = FnFitness::new(|c: &VectorChromosome| {
            c.genes().iter().map(|g| g.abs()).sum::<f64>() + 1.0
        });

        let mut population = Population::new(
            10,
            ancestor,
            fitness,
            RouletteWheelSelection::new(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();
        population.set_crossover_rate(0.0).unwrap();
        population.set_mutation_rate(0.0).unwrap();

        let seed_fitnesses: Vec<f64> = population
            .iter()
            .map(|c| c.genes().iter().map(|g| g.abs()).sum::<f64>() + 1.0)
            .collect();

        population.run_epoch().unwrap();

        assert_eq!(population.len(), 10);
        for member in population.iter() {
            let f = member.fitness();
            assert!(
                seed_fitnesses.iter().any(|s| (s - f).abs() < 1e-12),
                "fitness {} not drawn from the seeds",
                f
            );
        }
    }

    #[test]
    fn test_elitism_monotonic_vs_ancestor() {
        let ancestor = BinaryChromosome::new(vec![true, false, true, false, true, false, true, false]);
        let ancestor_fitness = ancestor.count_ones() as f64 + 1.0;

        let mut population = Population::new(
            12,
            ancestor,
            ones_fitness(),
            EliteSelection::with_epsilon(0.25).unwrap(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();

        for _ in 0..8 {
            population.run_epoch().unwrap();
            assert!(population.fitness_max() >= ancestor_fitness);
            assert_eq!(
                population.best_chromosome().unwrap().fitness(),
                population.fitness_max()
            );
        }
    }

    #[test]
    fn test_statistics_after_selection() {
        let mut population = Population::new(
            5,
            BinaryChromosome::new(vec![true; 4]),
            ones_fitness(),
            EliteSelection::new(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();

        population.run_epoch().unwrap();

        let sum: f64 = population.iter().map(|c| c.fitness()).sum();
        assert_eq!(population.fitness_sum(), sum);
        assert_relative_eq!(population.fitness_avg(), sum / 5.0);
        let max = population
            .iter()
            .map(|c| c.fitness())
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(population.fitness_max(), max);
    }

    #[test]
    fn test_regenerate_refills_and_resets() {
        let mut population = Population::new(
            6,
            BinaryChromosome::new(vec![true; 8]),
            ones_fitness(),
            EliteSelection::new(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();
        population.run_epoch().unwrap();

        population.regenerate();

        assert_eq!(population.len(), 6);
        assert!(population.best_chromosome().is_none());
        assert_eq!(population.fitness_sum(), 0.0);
        for member in population.iter() {
            assert_eq!(member.len(), 8);
        }
    }

    // Chromosome whose crossover always fails, for exercising the
    // all-or-nothing epoch guarantee
    #[derive(Clone, Debug, PartialEq)]
    struct Unbreedable {
        tag: u64,
        fitness: f64,
    }

    impl Chromosome for Unbreedable {
        fn generate<R: Rng>(&mut self, rng: &mut R) {
            self.tag = rng.gen();
        }

        fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self {
            Self {
                tag: rng.gen(),
                fitness: 0.0,
            }
        }

        fn crossover<R: Rng>(
            &mut self,
            _peer: &mut Self,
            _rng: &mut R,
        ) -> Result<(), ChromosomeError> {
            Err(ChromosomeError::Incompatible("unbreedable".to_string()))
        }

        fn mutate<R: Rng>(&mut self, rng: &mut R) {
            self.tag = rng.gen();
        }

        fn fitness(&self) -> f64 {
            self.fitness
        }

        fn set_fitness(&mut self, fitness: f64) {
            self.fitness = fitness;
        }
    }

    #[test]
    fn test_run_epoch_is_all_or_nothing() {
        let fitness = FnFitness::new(|c: &Unbreedable| c.tag as f64);
        let mut population = Population::new(
            6,
            Unbreedable {
                tag: 1,
                fitness: 0.0,
            },
            fitness,
            EliteSelection::new(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();
        population.set_crossover_rate(1.0).unwrap();

        let before: Vec<u64> = population.iter().map(|c| c.tag).collect();

        let result = population.run_epoch();
        assert!(matches!(result, Err(EvolutionError::Chromosome(_))));

        let after: Vec<u64> = population.iter().map(|c| c.tag).collect();
        assert_eq!(before, after);
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn test_reproducible_runs_with_same_seed() {
        let run = |seed: u64| -> f64 {
            let mut population = Population::new(
                10,
                BinaryChromosome::new(vec![false; 16]),
                ones_fitness(),
                EliteSelection::new(),
                StdRng::seed_from_u64(seed),
            )
            .unwrap();
            for _ in 0..5 {
                population.run_epoch().unwrap();
            }
            population.fitness_max()
        };

        assert_eq!(run(123), run(123));
    }
}
