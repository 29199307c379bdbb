//! A named ordered sequence of chromosomes, the top of the hierarchy
use crate::allele::Allele;
use crate::chromosome::{Chromosome, ChromosomeMap};
use crate::errors::Error;
use crate::make::{random_name, MakeOptions, GENERATED_NAME_SIZE};
use crate::recombine::{recombine_nodes, Recombinant, RecombineOptions};
use crate::sequence::{placeholder_unit, repeated, split_on};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// The `{name: [chromosome maps]}` inspection form of a [Genome].
pub type GenomeMap<T> = HashMap<String, Vec<ChromosomeMap<T>>>;

/// A named ordered sequence of [Chromosomes](Chromosome), exclusively owned.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome<T: Allele> {
    pub name: String,
    pub chromosomes: Vec<Chromosome<T>>,
}

impl<T: Allele> Default for Genome<T> {
    fn default() -> Self {
        Self { name: String::new(), chromosomes: Vec::new() }
    }
}

impl<T: Allele> Genome<T> {
    pub fn new<S: Into<String>>(name: S, chromosomes: Vec<Chromosome<T>>) -> Self {
        Self { name: name.into(), chromosomes }
    }

    /// Build a genome of `n_chromosomes` chromosomes.
    pub fn make<R: Rng>(options: &MakeOptions<T>, rng: &mut R) -> Result<Self, Error> {
        let n_chromosomes =
            options.n_chromosomes.ok_or(Error::MissingParameter("n_chromosomes"))?;
        let name = options.node_name(rng)?;
        let child_options = options.for_children();
        let mut chromosomes = Vec::with_capacity(n_chromosomes);
        for _ in 0..n_chromosomes {
            chromosomes
                .push(Chromosome::make(&child_options, rng).map_err(|error| error.into_child())?);
        }
        Ok(Self { name, chromosomes })
    }

    pub fn insert(&mut self, index: usize, chromosome: Chromosome<T>) -> Result<(), Error> {
        if index > self.chromosomes.len() {
            return Err(Error::OutOfRange { index, size: self.chromosomes.len() });
        }
        self.chromosomes.insert(index, chromosome);
        Ok(())
    }

    pub fn append(&mut self, chromosome: Chromosome<T>) {
        self.chromosomes.push(chromosome);
    }

    /// Insert a deep copy of `chromosomes[index]` immediately before itself.
    pub fn duplicate(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.chromosomes.len() {
            return Err(Error::OutOfRange { index, size: self.chromosomes.len() });
        }
        let chromosome = self.chromosomes[index].clone();
        self.chromosomes.insert(index, chromosome);
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.chromosomes.len() {
            return Err(Error::OutOfRange { index, size: self.chromosomes.len() });
        }
        self.chromosomes.remove(index);
        Ok(())
    }

    pub fn substitute(&mut self, index: usize, chromosome: Chromosome<T>) -> Result<(), Error> {
        if index >= self.chromosomes.len() {
            return Err(Error::OutOfRange { index, size: self.chromosomes.len() });
        }
        self.chromosomes[index] = chromosome;
        Ok(())
    }

    pub fn to_map(&self) -> GenomeMap<T> {
        let mut map = HashMap::with_capacity(1);
        map.insert(
            self.name.clone(),
            self.chromosomes.iter().map(Chromosome::to_map).collect(),
        );
        map
    }

    pub fn from_map(map: &GenomeMap<T>) -> Result<Self, Error> {
        match map.iter().next() {
            Some((name, chromosome_maps)) if map.len() == 1 => {
                let mut chromosomes = Vec::with_capacity(chromosome_maps.len());
                for chromosome_map in chromosome_maps {
                    chromosomes.push(
                        Chromosome::from_map(chromosome_map)
                            .map_err(|error| error.into_child())?,
                    );
                }
                Ok(Self { name: name.clone(), chromosomes })
            }
            _ => Err(Error::BadParameter(format!(
                "genome map must hold exactly one entry (got {})",
                map.len()
            ))),
        }
    }

    /// Serialize to a flat sequence: chromosome sequences joined by the
    /// `separator` three times. An empty genome serializes to nothing.
    pub fn sequence(&self, separator: &[T], placeholder: Option<&[T]>) -> Vec<T> {
        let unit = placeholder_unit(separator, placeholder);
        let wide_separator = repeated(separator, 3);
        let parts: Vec<Vec<T>> = self
            .chromosomes
            .iter()
            .map(|chromosome| chromosome.sequence(separator, Some(&unit)))
            .collect();
        parts.join(&wide_separator[..])
    }

    /// The inverse of [sequence](Genome::sequence), under fresh names.
    pub fn from_sequence<R: Rng>(
        sequence: &[T],
        separator: &[T],
        placeholder: Option<&[T]>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if separator.is_empty() {
            return Err(Error::BadSize { size: 0 });
        }
        let unit = placeholder_unit(separator, placeholder);
        let name = random_name(GENERATED_NAME_SIZE, rng)?;
        if sequence.is_empty() {
            return Ok(Self { name, chromosomes: Vec::new() });
        }
        let wide_separator = repeated(separator, 3);
        let mut chromosomes = Vec::new();
        for chunk in split_on(sequence, &wide_separator) {
            chromosomes.push(
                Chromosome::from_sequence(&chunk, separator, Some(&unit), rng)
                    .map_err(|error| error.into_child())?,
            );
        }
        Ok(Self { name, chromosomes })
    }

    /// Cross this genome with another into a child buffer: swap chromosome
    /// slots at the crossover indices, then recombine inside matched
    /// chromosome pairs unless gated off. Parents are read-only.
    pub fn recombine<R: Rng>(
        &self,
        other: &Self,
        indices: &[usize],
        child: &mut Self,
        options: &RecombineOptions,
        rng: &mut R,
    ) -> Result<(), Error> {
        recombine_nodes(self, other, indices, child, options, rng)
    }
}

impl<T: Allele> Recombinant for Genome<T> {
    type Child = Chromosome<T>;

    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
    fn children(&self) -> &[Chromosome<T>] {
        &self.chromosomes
    }
    fn children_mut(&mut self) -> &mut Vec<Chromosome<T>> {
        &mut self.chromosomes
    }
    fn descend_gate(options: &RecombineOptions) -> Option<bool> {
        Some(options.recombine_chromosomes_enabled())
    }
    fn match_required(options: &RecombineOptions) -> bool {
        options.match_chromosomes_required()
    }
    fn child_name(child: &Chromosome<T>) -> &str {
        &child.name
    }
    fn recombine_children<R: Rng>(
        first: &Chromosome<T>,
        second: &Chromosome<T>,
        child: &mut Chromosome<T>,
        options: &RecombineOptions,
        rng: &mut R,
    ) -> Result<(), Error> {
        first.recombine(second, &[], child, options, rng)
    }
}

impl<T: Allele> fmt::Display for Genome<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({} chromosomes)", self.name, self.chromosomes.len())
    }
}
