//! A named ordered sequence of genes
use crate::allele::Allele;
use crate::errors::Error;
use crate::gene::{Gene, GeneMap};
use crate::make::{random_name, MakeOptions, GENERATED_NAME_SIZE};
use crate::recombine::{recombine_nodes, Recombinant, RecombineOptions};
use crate::sequence::{placeholder_unit, repeated, split_on};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// The `{name: [gene maps]}` inspection form of a [Nucleosome].
pub type NucleosomeMap<T> = HashMap<String, Vec<GeneMap<T>>>;

/// A named ordered sequence of [Genes](Gene), exclusively owned. Structural
/// operations mirror the gene-level ones over the child vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Nucleosome<T: Allele> {
    pub name: String,
    pub genes: Vec<Gene<T>>,
}

impl<T: Allele> Default for Nucleosome<T> {
    fn default() -> Self {
        Self { name: String::new(), genes: Vec::new() }
    }
}

impl<T: Allele> Nucleosome<T> {
    pub fn new<S: Into<String>>(name: S, genes: Vec<Gene<T>>) -> Self {
        Self { name: name.into(), genes }
    }

    /// Build a nucleosome of `n_genes` genes, each of `n_bases` bases.
    pub fn make<R: Rng>(options: &MakeOptions<T>, rng: &mut R) -> Result<Self, Error> {
        let n_genes = options.n_genes.ok_or(Error::MissingParameter("n_genes"))?;
        let name = options.node_name(rng)?;
        let child_options = options.for_children();
        let mut genes = Vec::with_capacity(n_genes);
        for _ in 0..n_genes {
            genes.push(Gene::make(&child_options, rng).map_err(|error| error.into_child())?);
        }
        Ok(Self { name, genes })
    }

    pub fn insert(&mut self, index: usize, gene: Gene<T>) -> Result<(), Error> {
        if index > self.genes.len() {
            return Err(Error::OutOfRange { index, size: self.genes.len() });
        }
        self.genes.insert(index, gene);
        Ok(())
    }

    pub fn append(&mut self, gene: Gene<T>) {
        self.genes.push(gene);
    }

    /// Insert a deep copy of `genes[index]` immediately before itself.
    pub fn duplicate(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.genes.len() {
            return Err(Error::OutOfRange { index, size: self.genes.len() });
        }
        let gene = self.genes[index].clone();
        self.genes.insert(index, gene);
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.genes.len() {
            return Err(Error::OutOfRange { index, size: self.genes.len() });
        }
        self.genes.remove(index);
        Ok(())
    }

    pub fn substitute(&mut self, index: usize, gene: Gene<T>) -> Result<(), Error> {
        if index >= self.genes.len() {
            return Err(Error::OutOfRange { index, size: self.genes.len() });
        }
        self.genes[index] = gene;
        Ok(())
    }

    pub fn to_map(&self) -> NucleosomeMap<T> {
        let mut map = HashMap::with_capacity(1);
        map.insert(self.name.clone(), self.genes.iter().map(Gene::to_map).collect());
        map
    }

    pub fn from_map(map: &NucleosomeMap<T>) -> Result<Self, Error> {
        match map.iter().next() {
            Some((name, gene_maps)) if map.len() == 1 => {
                let mut genes = Vec::with_capacity(gene_maps.len());
                for gene_map in gene_maps {
                    genes.push(Gene::from_map(gene_map).map_err(|error| error.into_child())?);
                }
                Ok(Self { name: name.clone(), genes })
            }
            _ => Err(Error::BadParameter(format!(
                "nucleosome map must hold exactly one entry (got {})",
                map.len()
            ))),
        }
    }

    /// Serialize to a flat sequence: gene bases joined by one `separator`,
    /// empty genes written as the placeholder unit, an empty nucleosome as
    /// the unit twice. The unit defaults to the separator inverted.
    pub fn sequence(&self, separator: &[T], placeholder: Option<&[T]>) -> Vec<T> {
        let unit = placeholder_unit(separator, placeholder);
        if self.genes.is_empty() {
            return repeated(&unit, 2);
        }
        let parts: Vec<Vec<T>> =
            self.genes.iter().map(|gene| gene.sequence(Some(&unit))).collect();
        parts.join(separator)
    }

    /// The inverse of [sequence](Nucleosome::sequence), under fresh names.
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
        if sequence == repeated(&unit, 2).as_slice() {
            return Ok(Self { name, genes: Vec::new() });
        }
        let mut genes = Vec::new();
        for chunk in split_on(sequence, separator) {
            genes.push(
                Gene::from_sequence(&chunk, Some(&unit), rng).map_err(|error| error.into_child())?,
            );
        }
        Ok(Self { name, genes })
    }

    /// Cross this nucleosome with another into a child buffer: swap gene
    /// slots at the crossover indices, then recombine inside matched gene
    /// pairs unless gated off. Parents are read-only.
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

impl<T: Allele> Recombinant for Nucleosome<T> {
    type Child = Gene<T>;

    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
    fn children(&self) -> &[Gene<T>] {
        &self.genes
    }
    fn children_mut(&mut self) -> &mut Vec<Gene<T>> {
        &mut self.genes
    }
    fn descend_gate(options: &RecombineOptions) -> Option<bool> {
        Some(options.recombine_genes_enabled())
    }
    fn match_required(options: &RecombineOptions) -> bool {
        options.match_genes_required()
    }
    fn child_name(child: &Gene<T>) -> &str {
        &child.name
    }
    fn recombine_children<R: Rng>(
        first: &Gene<T>,
        second: &Gene<T>,
        child: &mut Gene<T>,
        options: &RecombineOptions,
        rng: &mut R,
    ) -> Result<(), Error> {
        first.recombine(second, &[], child, options, rng)
    }
}

impl<T: Allele> fmt::Display for Nucleosome<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({} genes)", self.name, self.genes.len())
    }
}
