//! The generational optimization loop
//!
//! Each generation keeps the top scorers verbatim (elitism), recycles the
//! rest into a free pool of child buffers, then refills the population by
//! drawing weighted parent pairs, recombining them into recycled buffers,
//! mutating and scoring. The loop ends when the best score reaches the
//! fitness target or the generation budget runs out.
//!
//! The parallel path fans the refill out over a fixed set of worker threads
//! that stream finished children back over a bounded channel; workers are
//! joined every generation and nothing outlives the call.
use crate::allele::Allele;
use crate::code::{Code, ScoredCode};
use crate::errors::Error;
use crate::recombine::RecombineOptions;
use ordered_float::OrderedFloat;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::sync::mpsc;
use std::sync::Arc;

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_PARENTS_PER_GENERATION: usize = 10;
pub const DEFAULT_FITNESS_TARGET: f64 = 0.99;

/// Spare child buffers beyond the population size, so a full refill never
/// has to allocate.
const POOL_SLACK: usize = 10;

/// Scores a candidate; must be safe to call concurrently in parallel mode.
pub type FitnessFunction<T> = Arc<dyn Fn(&Code<T>) -> f64 + Send + Sync>;
/// Mutates a freshly recombined child in place.
pub type MutateFunction<T> = Arc<dyn Fn(&mut Code<T>) + Send + Sync>;
/// Observes the end of each generation: generation index and the population
/// sorted descending by score.
pub type IterationHook<T> = Box<dyn FnMut(usize, &[ScoredCode<T>])>;

/// Everything [optimize] needs, builder style. `initial_population`,
/// `measure_fitness` and `mutate` are required; the rest defaults as
/// documented on the setters.
pub struct OptimizationParams<T: Allele> {
    pub initial_population: Vec<Code<T>>,
    pub measure_fitness: Option<FitnessFunction<T>>,
    pub mutate: Option<MutateFunction<T>>,
    pub max_iterations: usize,
    pub population_size: usize,
    pub parents_per_generation: usize,
    pub fitness_target: f64,
    pub recombination_opts: RecombineOptions,
    pub parallel_count: Option<usize>,
    pub iteration_hook: Option<IterationHook<T>>,
    pub rng_seed: Option<u64>,
}

impl<T: Allele> Default for OptimizationParams<T> {
    fn default() -> Self {
        Self {
            initial_population: Vec::new(),
            measure_fitness: None,
            mutate: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            population_size: DEFAULT_POPULATION_SIZE,
            parents_per_generation: DEFAULT_PARENTS_PER_GENERATION,
            fitness_target: DEFAULT_FITNESS_TARGET,
            recombination_opts: RecombineOptions::default(),
            parallel_count: None,
            iteration_hook: None,
            rng_seed: None,
        }
    }
}

impl<T: Allele> OptimizationParams<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_population(mut self, initial_population: Vec<Code<T>>) -> Self {
        self.initial_population = initial_population;
        self
    }
    pub fn with_measure_fitness(mut self, measure_fitness: FitnessFunction<T>) -> Self {
        self.measure_fitness = Some(measure_fitness);
        self
    }
    pub fn with_mutate(mut self, mutate: MutateFunction<T>) -> Self {
        self.mutate = Some(mutate);
        self
    }
    /// Generation budget, default 1000.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
    /// Default 100, must be at least 3.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }
    /// Elite survivors per generation, default 10, normalized into
    /// `[2, population_size]` during validation.
    pub fn with_parents_per_generation(mut self, parents_per_generation: usize) -> Self {
        self.parents_per_generation = parents_per_generation;
        self
    }
    /// Stop once the best score reaches this, default 0.99.
    pub fn with_fitness_target(mut self, fitness_target: f64) -> Self {
        self.fitness_target = fitness_target;
        self
    }
    pub fn with_recombination_opts(mut self, recombination_opts: RecombineOptions) -> Self {
        self.recombination_opts = recombination_opts;
        self
    }
    /// A count above 1 selects the parallel path with that many workers.
    pub fn with_parallel_count(mut self, parallel_count: usize) -> Self {
        self.parallel_count = Some(parallel_count);
        self
    }
    pub fn with_iteration_hook(mut self, iteration_hook: IterationHook<T>) -> Self {
        self.iteration_hook = Some(iteration_hook);
        self
    }
    /// Seed for the run RNG; seeded runs are reproducible for a given
    /// parallel_count.
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Check numeric preconditions and normalize the derived ones.
    pub fn validate(&mut self) -> Result<(), Error> {
        if self.initial_population.is_empty() {
            return Err(Error::BadParameter("initial_population must not be empty".to_string()));
        }
        if self.initial_population.iter().any(Code::is_empty) {
            return Err(Error::BadParameter(
                "initial_population contains a code with no genetic material".to_string(),
            ));
        }
        if self.population_size < 3 {
            return Err(Error::BadParameter(format!(
                "population_size must be at least 3 (got {})",
                self.population_size
            )));
        }
        if self.parents_per_generation > self.population_size {
            self.parents_per_generation = self.population_size / 10;
        }
        if self.parents_per_generation < 2 {
            self.parents_per_generation = 2;
        }
        if let Some(parallel_count) = self.parallel_count {
            if parallel_count > self.population_size {
                self.parallel_count = Some(self.population_size / 2);
            }
        }
        Ok(())
    }

    pub(crate) fn run_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

/// What a finished run hands back: how many generations ran, the final
/// population sorted descending, and the error that stopped the loop early,
/// if any (parameter and seeding failures are returned as `Err` instead).
pub struct OptimizeOutcome<T: Allele> {
    pub generations: usize,
    pub population: Vec<ScoredCode<T>>,
    pub error: Option<Error>,
}

impl<T: Allele> OptimizeOutcome<T> {
    pub fn best(&self) -> Option<&ScoredCode<T>> {
        self.population.first()
    }
}

/// Run the generational loop to completion.
///
/// Returns `Err` for invalid parameters. Once the loop is running, a
/// recombination failure stops it and comes back inside the outcome next to
/// the population evolved so far.
pub fn optimize<T: Allele>(mut params: OptimizationParams<T>) -> Result<OptimizeOutcome<T>, Error> {
    let measure_fitness =
        params.measure_fitness.clone().ok_or(Error::MissingParameter("measure_fitness"))?;
    let mutate = params.mutate.clone().ok_or(Error::MissingParameter("mutate"))?;
    params.validate()?;

    let population_size = params.population_size;
    let parents_per_generation = params.parents_per_generation;
    let workers = params.parallel_count.filter(|&count| count > 1);
    let mut rng = params.run_rng();

    // Seed: score the whole initial population and pre-allocate the free
    // pool of child buffers.
    let initial_population = std::mem::take(&mut params.initial_population);
    let pool_size = initial_population.len().max(population_size) + POOL_SLACK;
    let mut free_pool: Vec<ScoredCode<T>> =
        (0..pool_size).map(|_| ScoredCode::default()).collect();
    let mut population: Vec<ScoredCode<T>> = match workers {
        Some(_) => initial_population
            .into_par_iter()
            .map(|code| {
                let score = (measure_fitness)(&code);
                ScoredCode::new(code, score)
            })
            .collect(),
        None => initial_population
            .into_iter()
            .map(|code| {
                let score = (measure_fitness)(&code);
                ScoredCode::new(code, score)
            })
            .collect(),
    };
    sort_descending(&mut population);

    if let Some(worker_count) = workers {
        log::debug!("parallel optimization with {} workers", worker_count);
    }

    let mut generations = 0;
    let mut loop_error: Option<Error> = None;
    while generations < params.max_iterations && population[0].score < params.fitness_target {
        // Elitism: the top scorers survive verbatim, the rest become child
        // buffers for this generation.
        let keep = parents_per_generation.min(population.len());
        free_pool.extend(population.drain(keep..));
        let weighted_pool = weighted_parent_pool(population.len());

        let refill = match workers {
            Some(worker_count) => run_generation_parallel(
                &mut population,
                &mut free_pool,
                &weighted_pool,
                population_size,
                worker_count,
                &params.recombination_opts,
                &measure_fitness,
                &mutate,
                &mut rng,
            ),
            None => run_generation_sequential(
                &mut population,
                &mut free_pool,
                &weighted_pool,
                population_size,
                &params.recombination_opts,
                &measure_fitness,
                &mutate,
                &mut rng,
            ),
        };
        sort_descending(&mut population);

        if let Err(error) = refill {
            loop_error = Some(error);
            break;
        }
        if let Some(hook) = params.iteration_hook.as_mut() {
            hook(generations, &population);
        }
        generations += 1;
        log::debug!(
            "generation {}: best score {:.6} over {} codes",
            generations,
            population[0].score,
            population.len()
        );
    }

    Ok(OptimizeOutcome { generations, population, error: loop_error })
}

fn run_generation_sequential<T: Allele>(
    population: &mut Vec<ScoredCode<T>>,
    free_pool: &mut Vec<ScoredCode<T>>,
    weighted_pool: &[usize],
    population_size: usize,
    options: &RecombineOptions,
    measure_fitness: &FitnessFunction<T>,
    mutate: &MutateFunction<T>,
    rng: &mut SmallRng,
) -> Result<(), Error> {
    while population.len() < population_size {
        let (first, second) = weighted_random_parents(weighted_pool, rng);
        let mut child = free_pool.pop().unwrap_or_default();
        population[first].code.recombine(&population[second].code, &mut child.code, options, rng)?;
        (mutate)(&mut child.code);
        child.score = (measure_fitness)(&child.code);
        log::trace!(
            "child of parents {} and {} scored {:.6}",
            first,
            second,
            child.score
        );
        population.push(child);
    }
    Ok(())
}

/// One generation's refill spread over `worker_count` scoped threads. Each
/// worker owns a batch of child buffers and streams finished children back
/// over a bounded channel; the drain on this thread runs until every
/// worker's sender has disconnected, so no child is left behind.
#[allow(clippy::too_many_arguments)]
fn run_generation_parallel<T: Allele>(
    population: &mut Vec<ScoredCode<T>>,
    free_pool: &mut Vec<ScoredCode<T>>,
    weighted_pool: &[usize],
    population_size: usize,
    worker_count: usize,
    options: &RecombineOptions,
    measure_fitness: &FitnessFunction<T>,
    mutate: &MutateFunction<T>,
    rng: &mut SmallRng,
) -> Result<(), Error> {
    let parents = std::mem::take(population);
    let goal = population_size.saturating_sub(parents.len());
    let base = goal / worker_count;
    let extra = goal - base * worker_count;

    let mut batches: Vec<Vec<ScoredCode<T>>> = Vec::with_capacity(worker_count);
    for worker in 0..worker_count {
        let quota = if worker == 0 { base + extra } else { base };
        let mut batch = Vec::with_capacity(quota);
        for _ in 0..quota {
            batch.push(free_pool.pop().unwrap_or_default());
        }
        batches.push(batch);
    }
    let seeds: Vec<u64> = (0..worker_count).map(|_| rng.gen()).collect();

    let (sender, receiver) = mpsc::sync_channel(population_size + POOL_SLACK);
    let mut children: Vec<ScoredCode<T>> = Vec::with_capacity(goal);
    let mut first_error: Option<Error> = None;
    std::thread::scope(|scope| {
        for (batch, seed) in batches.into_iter().zip(seeds) {
            let sender = sender.clone();
            let parents = &parents;
            scope.spawn(move || {
                let mut rng = SmallRng::seed_from_u64(seed);
                for mut child in batch {
                    let (first, second) = weighted_random_parents(weighted_pool, &mut rng);
                    let produced = match parents[first].code.recombine(
                        &parents[second].code,
                        &mut child.code,
                        options,
                        &mut rng,
                    ) {
                        Ok(()) => {
                            (mutate)(&mut child.code);
                            child.score = (measure_fitness)(&child.code);
                            Ok(child)
                        }
                        Err(error) => Err(error),
                    };
                    if sender.send(produced).is_err() {
                        break;
                    }
                }
            });
        }
        drop(sender);
        for produced in receiver.iter() {
            match produced {
                Ok(child) => children.push(child),
                Err(error) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
    });

    *population = parents;
    population.append(&mut children);
    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// The rank-proportional parent pool: the index of the rank-i parent appears
/// `parent_count - i` times, so the pool holds
/// `parent_count * (parent_count + 1) / 2` entries.
pub fn weighted_parent_pool(parent_count: usize) -> Vec<usize> {
    let mut pool = Vec::with_capacity(parent_count * (parent_count + 1) / 2);
    for rank in 0..parent_count {
        for _ in 0..(parent_count - rank) {
            pool.push(rank);
        }
    }
    pool
}

/// Two parent indices drawn uniformly from the weighted pool, re-drawing the
/// second until it differs from the first. When the pool holds a single
/// distinct index both results are that index.
pub fn weighted_random_parents<R: Rng>(pool: &[usize], rng: &mut R) -> (usize, usize) {
    let first = pool[rng.gen_range(0..pool.len())];
    if pool.iter().all(|&parent| parent == first) {
        return (first, first);
    }
    loop {
        let second = pool[rng.gen_range(0..pool.len())];
        if second != first {
            return (first, second);
        }
    }
}

fn sort_descending<T: Allele>(population: &mut [ScoredCode<T>]) {
    population.sort_by_key(|scored| Reverse(OrderedFloat(scored.score)));
}
