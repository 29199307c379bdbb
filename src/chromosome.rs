//! A named ordered sequence of nucleosomes
use crate::allele::Allele;
use crate::errors::Error;
use crate::make::{random_name, MakeOptions, GENERATED_NAME_SIZE};
use crate::nucleosome::{Nucleosome, NucleosomeMap};
use crate::recombine::{recombine_nodes, Recombinant, RecombineOptions};
use crate::sequence::{placeholder_unit, repeated, split_on};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// The `{name: [nucleosome maps]}` inspection form of a [Chromosome].
pub type ChromosomeMap<T> = HashMap<String, Vec<NucleosomeMap<T>>>;

/// A named ordered sequence of [Nucleosomes](Nucleosome), exclusively owned.
#[derive(Clone, Debug, PartialEq)]
pub struct Chromosome<T: Allele> {
    pub name: String,
    pub nucleosomes: Vec<Nucleosome<T>>,
}

impl<T: Allele> Default for Chromosome<T> {
    fn default() -> Self {
        Self { name: String::new(), nucleosomes: Vec::new() }
    }
}

impl<T: Allele> Chromosome<T> {
    pub fn new<S: Into<String>>(name: S, nucleosomes: Vec<Nucleosome<T>>) -> Self {
        Self { name: name.into(), nucleosomes }
    }

    /// Build a chromosome of `n_nucleosomes` nucleosomes.
    pub fn make<R: Rng>(options: &MakeOptions<T>, rng: &mut R) -> Result<Self, Error> {
        let n_nucleosomes =
            options.n_nucleosomes.ok_or(Error::MissingParameter("n_nucleosomes"))?;
        let name = options.node_name(rng)?;
        let child_options = options.for_children();
        let mut nucleosomes = Vec::with_capacity(n_nucleosomes);
        for _ in 0..n_nucleosomes {
            nucleosomes
                .push(Nucleosome::make(&child_options, rng).map_err(|error| error.into_child())?);
        }
        Ok(Self { name, nucleosomes })
    }

    pub fn insert(&mut self, index: usize, nucleosome: Nucleosome<T>) -> Result<(), Error> {
        if index > self.nucleosomes.len() {
            return Err(Error::OutOfRange { index, size: self.nucleosomes.len() });
        }
        self.nucleosomes.insert(index, nucleosome);
        Ok(())
    }

    pub fn append(&mut self, nucleosome: Nucleosome<T>) {
        self.nucleosomes.push(nucleosome);
    }

    /// Insert a deep copy of `nucleosomes[index]` immediately before itself.
    pub fn duplicate(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.nucleosomes.len() {
            return Err(Error::OutOfRange { index, size: self.nucleosomes.len() });
        }
        let nucleosome = self.nucleosomes[index].clone();
        self.nucleosomes.insert(index, nucleosome);
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.nucleosomes.len() {
            return Err(Error::OutOfRange { index, size: self.nucleosomes.len() });
        }
        self.nucleosomes.remove(index);
        Ok(())
    }

    pub fn substitute(&mut self, index: usize, nucleosome: Nucleosome<T>) -> Result<(), Error> {
        if index >= self.nucleosomes.len() {
            return Err(Error::OutOfRange { index, size: self.nucleosomes.len() });
        }
        self.nucleosomes[index] = nucleosome;
        Ok(())
    }

    pub fn to_map(&self) -> ChromosomeMap<T> {
        let mut map = HashMap::with_capacity(1);
        map.insert(
            self.name.clone(),
            self.nucleosomes.iter().map(Nucleosome::to_map).collect(),
        );
        map
    }

    pub fn from_map(map: &ChromosomeMap<T>) -> Result<Self, Error> {
        match map.iter().next() {
            Some((name, nucleosome_maps)) if map.len() == 1 => {
                let mut nucleosomes = Vec::with_capacity(nucleosome_maps.len());
                for nucleosome_map in nucleosome_maps {
                    nucleosomes.push(
                        Nucleosome::from_map(nucleosome_map)
                            .map_err(|error| error.into_child())?,
                    );
                }
                Ok(Self { name: name.clone(), nucleosomes })
            }
            _ => Err(Error::BadParameter(format!(
                "chromosome map must hold exactly one entry (got {})",
                map.len()
            ))),
        }
    }

    /// Serialize to a flat sequence: nucleosome sequences joined by the
    /// `separator` twice; an empty chromosome is the placeholder unit four
    /// times.
    pub fn sequence(&self, separator: &[T], placeholder: Option<&[T]>) -> Vec<T> {
        let unit = placeholder_unit(separator, placeholder);
        if self.nucleosomes.is_empty() {
            return repeated(&unit, 4);
        }
        let wide_separator = repeated(separator, 2);
        let parts: Vec<Vec<T>> = self
            .nucleosomes
            .iter()
            .map(|nucleosome| nucleosome.sequence(separator, Some(&unit)))
            .collect();
        parts.join(&wide_separator[..])
    }

    /// The inverse of [sequence](Chromosome::sequence), under fresh names.
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
        if sequence == repeated(&unit, 4).as_slice() {
            return Ok(Self { name, nucleosomes: Vec::new() });
        }
        let wide_separator = repeated(separator, 2);
        let mut nucleosomes = Vec::new();
        for chunk in split_on(sequence, &wide_separator) {
            nucleosomes.push(
                Nucleosome::from_sequence(&chunk, separator, Some(&unit), rng)
                    .map_err(|error| error.into_child())?,
            );
        }
        Ok(Self { name, nucleosomes })
    }

    /// Cross this chromosome with another into a child buffer: swap
    /// nucleosome slots at the crossover indices, then recombine inside
    /// matched nucleosome pairs unless gated off. Parents are read-only.
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

impl<T: Allele> Recombinant for Chromosome<T> {
    type Child = Nucleosome<T>;

    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
    fn children(&self) -> &[Nucleosome<T>] {
        &self.nucleosomes
    }
    fn children_mut(&mut self) -> &mut Vec<Nucleosome<T>> {
        &mut self.nucleosomes
    }
    fn descend_gate(options: &RecombineOptions) -> Option<bool> {
        Some(options.recombine_nucleosomes_enabled())
    }
    fn match_required(options: &RecombineOptions) -> bool {
        options.match_nucleosomes_required()
    }
    fn child_name(child: &Nucleosome<T>) -> &str {
        &child.name
    }
    fn recombine_children<R: Rng>(
        first: &Nucleosome<T>,
        second: &Nucleosome<T>,
        child: &mut Nucleosome<T>,
        options: &RecombineOptions,
        rng: &mut R,
    ) -> Result<(), Error> {
        first.recombine(second, &[], child, options, rng)
    }
}

impl<T: Allele> fmt::Display for Chromosome<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({} nucleosomes)", self.name, self.nucleosomes.len())
    }
}
