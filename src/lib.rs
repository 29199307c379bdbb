//! A hierarchical genetic algorithm implementation for Rust.
//!
//! Candidate solutions are [Codes](crate::code::Code): containers holding
//! any subset of four nested levels of named genetic material, from a single
//! [Gene](crate::gene::Gene) (an ordered sequence of bases of some
//! [Allele](crate::allele::Allele) type) up through
//! [Nucleosome](crate::nucleosome::Nucleosome),
//! [Chromosome](crate::chromosome::Chromosome) and
//! [Genome](crate::genome::Genome). The
//! [optimizer](crate::optimize::optimize) evolves a population of codes
//! toward a caller-defined fitness target with elitist selection, weighted
//! parent pairing and level-aware [recombination](crate::recombine),
//! sequentially or over a worker pool; the [tuner](crate::tune::tune)
//! measures whether the worker pool is worth its overhead.
//!
//! ## Quick Usage
//!
//! ```rust
//! use genetic_code::prelude::*;
//! use rand::rngs::SmallRng;
//! use rand::{Rng, SeedableRng};
//! use std::sync::Arc;
//!
//! // the search space: codes carrying one 5-base integer gene
//! let mut rng = SmallRng::seed_from_u64(42);
//! let options = MakeOptions::<i32>::new()
//!     .with_n_bases(5)
//!     .with_base_factory(Arc::new(|rng| rng.gen_range(0..10)));
//! let initial_population: Vec<Code<i32>> = (0..20)
//!     .map(|_| Code::new().with_gene(Gene::make(&options, &mut rng).unwrap()))
//!     .collect();
//!
//! // the search goal: bases summing to 42
//! let params = OptimizationParams::new()
//!     .with_initial_population(initial_population)
//!     .with_measure_fitness(Arc::new(|code: &Code<i32>| {
//!         let sum: i32 = code.gene.as_ref().map(|gene| gene.bases.iter().sum()).unwrap_or(0);
//!         1.0 / (1.0 + (f64::from(sum) - 42.0).abs())
//!     }))
//!     .with_mutate(Arc::new(|code: &mut Code<i32>| {
//!         let mut rng = rand::thread_rng();
//!         if let Some(gene) = code.gene.as_mut() {
//!             if !gene.bases.is_empty() {
//!                 let index = rng.gen_range(0..gene.bases.len());
//!                 gene.bases[index] += rng.gen_range(-3..=3);
//!             }
//!         }
//!     }))
//!     .with_population_size(20)
//!     .with_max_iterations(100)
//!     .with_rng_seed(42);
//!
//! let outcome = optimize(params).unwrap();
//! assert!(!outcome.population.is_empty());
//! println!("best after {} generations: {}", outcome.generations, outcome.population[0]);
//! ```

pub mod allele;
pub mod chromosome;
pub mod code;
pub mod errors;
pub mod gene;
pub mod genome;
pub mod make;
pub mod nucleosome;
pub mod optimize;
pub mod prelude;
pub mod recombine;
pub(crate) mod sequence;
pub mod tune;
