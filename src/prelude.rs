//! Re-exports for the common use case, mirroring the module layout
pub use crate::allele::Allele;
pub use crate::chromosome::{Chromosome, ChromosomeMap};
pub use crate::code::{Code, ScoredCode};
pub use crate::errors::Error;
pub use crate::gene::{Gene, GeneMap};
pub use crate::genome::{Genome, GenomeMap};
pub use crate::make::{random_name, BaseFactory, MakeOptions};
pub use crate::nucleosome::{Nucleosome, NucleosomeMap};
pub use crate::optimize::{
    optimize, weighted_parent_pool, weighted_random_parents, FitnessFunction, IterationHook,
    MutateFunction, OptimizationParams, OptimizeOutcome,
};
pub use crate::recombine::RecombineOptions;
pub use crate::tune::{benchmark, tune, BenchmarkCosts};
