//! Random construction of hierarchy nodes
//!
//! One [MakeOptions] value describes the dimensions of whatever is being
//! built; each level consumes the fields it needs and hands the rest down.
//! Dimensions are required from the consuming level upward, so a
//! [Chromosome](crate::chromosome::Chromosome) needs `n_nucleosomes`,
//! `n_genes` and `n_bases` but not `n_chromosomes`.
use crate::allele::Allele;
use crate::errors::Error;
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Length of the names given to nodes the caller left anonymous.
pub(crate) const GENERATED_NAME_SIZE: usize = 8;

/// Produces one base value. Receives the RNG threaded through the build so
/// seeded construction stays reproducible.
pub type BaseFactory<T> = Arc<dyn Fn(&mut dyn RngCore) -> T + Send + Sync>;

/// Dimensions and naming for the `make` constructors, builder style.
///
/// `base_factory` is required everywhere; the `n_*` counts are required from
/// the level that consumes them upward. `name` applies to the node being
/// built directly; descendants always get generated names.
#[derive(Clone)]
pub struct MakeOptions<T: Allele> {
    pub n_bases: Option<usize>,
    pub n_genes: Option<usize>,
    pub n_nucleosomes: Option<usize>,
    pub n_chromosomes: Option<usize>,
    pub name: Option<String>,
    pub base_factory: Option<BaseFactory<T>>,
}

impl<T: Allele> Default for MakeOptions<T> {
    fn default() -> Self {
        Self {
            n_bases: None,
            n_genes: None,
            n_nucleosomes: None,
            n_chromosomes: None,
            name: None,
            base_factory: None,
        }
    }
}

impl<T: Allele> MakeOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_bases(mut self, n_bases: usize) -> Self {
        self.n_bases = Some(n_bases);
        self
    }
    pub fn with_n_genes(mut self, n_genes: usize) -> Self {
        self.n_genes = Some(n_genes);
        self
    }
    pub fn with_n_nucleosomes(mut self, n_nucleosomes: usize) -> Self {
        self.n_nucleosomes = Some(n_nucleosomes);
        self
    }
    pub fn with_n_chromosomes(mut self, n_chromosomes: usize) -> Self {
        self.n_chromosomes = Some(n_chromosomes);
        self
    }
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn with_base_factory(mut self, base_factory: BaseFactory<T>) -> Self {
        self.base_factory = Some(base_factory);
        self
    }

    pub(crate) fn base_factory(&self) -> Result<&BaseFactory<T>, Error> {
        self.base_factory.as_ref().ok_or(Error::MissingParameter("base_factory"))
    }

    /// The node's own name, or a generated one.
    pub(crate) fn node_name<R: Rng>(&self, rng: &mut R) -> Result<String, Error> {
        match &self.name {
            Some(name) => Ok(name.clone()),
            None => random_name(GENERATED_NAME_SIZE, rng),
        }
    }

    /// Options for building descendants: same dimensions, anonymous names.
    pub(crate) fn for_children(&self) -> Self {
        let mut child_options = self.clone();
        child_options.name = None;
        child_options
    }
}

impl<T: Allele> std::fmt::Debug for MakeOptions<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MakeOptions")
            .field("n_bases", &self.n_bases)
            .field("n_genes", &self.n_genes)
            .field("n_nucleosomes", &self.n_nucleosomes)
            .field("n_chromosomes", &self.n_chromosomes)
            .field("name", &self.name)
            .field("base_factory", &self.base_factory.as_ref().map(|_| "Fn"))
            .finish()
    }
}

/// A random alphanumeric name of the given size. Zero is a [Error::BadSize].
pub fn random_name<R: Rng>(size: usize, rng: &mut R) -> Result<String, Error> {
    if size == 0 {
        return Err(Error::BadSize { size });
    }
    Ok((0..size).map(|_| char::from(rng.sample(Alphanumeric))).collect())
}
