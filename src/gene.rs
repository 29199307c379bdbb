//! The smallest unit of genetic material, a named ordered sequence of bases
use crate::allele::Allele;
use crate::errors::Error;
use crate::make::{random_name, MakeOptions, GENERATED_NAME_SIZE};
use crate::recombine::{recombine_nodes, Recombinant, RecombineOptions};
use itertools::Itertools;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// The `{name: bases}` inspection form of a [Gene].
pub type GeneMap<T> = HashMap<String, Vec<T>>;

/// A named ordered sequence of bases. Cloning is a deep copy; structural
/// mutation goes through the index-checked operations below, which report
/// [Error::OutOfRange] outside their contracts.
///
/// An empty name is only valid for transient recombination buffers; `bases`
/// may legitimately be empty (serialized as a placeholder, see
/// [sequence](Gene::sequence)).
#[derive(Clone, Debug, PartialEq)]
pub struct Gene<T: Allele> {
    pub name: String,
    pub bases: Vec<T>,
}

impl<T: Allele> Default for Gene<T> {
    fn default() -> Self {
        Self { name: String::new(), bases: Vec::new() }
    }
}

impl<T: Allele> Gene<T> {
    pub fn new<S: Into<String>>(name: S, bases: Vec<T>) -> Self {
        Self { name: name.into(), bases }
    }

    /// Build a gene of `n_bases` values drawn from the base factory.
    pub fn make<R: Rng>(options: &MakeOptions<T>, rng: &mut R) -> Result<Self, Error> {
        let n_bases = options.n_bases.ok_or(Error::MissingParameter("n_bases"))?;
        let factory = options.base_factory()?;
        let name = options.node_name(rng)?;
        let bases = (0..n_bases).map(|_| factory(rng)).collect();
        Ok(Self { name, bases })
    }

    /// Insert a base at `index`, which may equal the current length (append).
    pub fn insert(&mut self, index: usize, base: T) -> Result<(), Error> {
        if index > self.bases.len() {
            return Err(Error::OutOfRange { index, size: self.bases.len() });
        }
        self.bases.insert(index, base);
        Ok(())
    }

    pub fn append(&mut self, base: T) {
        self.bases.push(base);
    }

    /// Splice a subsequence in at `index`, which may equal the length.
    pub fn insert_sequence(&mut self, index: usize, sequence: &[T]) -> Result<(), Error> {
        if index > self.bases.len() {
            return Err(Error::OutOfRange { index, size: self.bases.len() });
        }
        self.bases.splice(index..index, sequence.iter().cloned());
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.bases.len() {
            return Err(Error::OutOfRange { index, size: self.bases.len() });
        }
        self.bases.remove(index);
        Ok(())
    }

    /// Remove up to `size` bases starting at `index`, clamped at the tail.
    pub fn delete_sequence(&mut self, index: usize, size: usize) -> Result<(), Error> {
        if size == 0 {
            return Err(Error::BadSize { size });
        }
        if index >= self.bases.len() {
            return Err(Error::OutOfRange { index, size: self.bases.len() });
        }
        let end = (index + size).min(self.bases.len());
        self.bases.drain(index..end);
        Ok(())
    }

    /// Insert a copy of `bases[index]` immediately before itself.
    pub fn duplicate(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.bases.len() {
            return Err(Error::OutOfRange { index, size: self.bases.len() });
        }
        let base = self.bases[index].clone();
        self.bases.insert(index, base);
        Ok(())
    }

    pub fn substitute(&mut self, index: usize, base: T) -> Result<(), Error> {
        if index >= self.bases.len() {
            return Err(Error::OutOfRange { index, size: self.bases.len() });
        }
        self.bases[index] = base;
        Ok(())
    }

    pub fn to_map(&self) -> GeneMap<T> {
        let mut map = HashMap::with_capacity(1);
        map.insert(self.name.clone(), self.bases.clone());
        map
    }

    /// The inverse of [to_map](Gene::to_map). The map must hold exactly one
    /// entry.
    pub fn from_map(map: &GeneMap<T>) -> Result<Self, Error> {
        match map.iter().next() {
            Some((name, bases)) if map.len() == 1 => {
                Ok(Self { name: name.clone(), bases: bases.clone() })
            }
            _ => Err(Error::BadParameter(format!(
                "gene map must hold exactly one entry (got {})",
                map.len()
            ))),
        }
    }

    /// The gene's flat form: its bases, or the placeholder when it has none
    /// and one was supplied.
    pub fn sequence(&self, placeholder: Option<&[T]>) -> Vec<T> {
        match placeholder {
            Some(unit) if self.bases.is_empty() => unit.to_vec(),
            _ => self.bases.clone(),
        }
    }

    /// Rebuild a gene from its flat form under a fresh name. A sequence equal
    /// to the placeholder reconstructs an empty gene.
    pub fn from_sequence<R: Rng>(
        sequence: &[T],
        placeholder: Option<&[T]>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let name = random_name(GENERATED_NAME_SIZE, rng)?;
        let bases = match placeholder {
            Some(unit) if sequence == unit => Vec::new(),
            _ => sequence.to_vec(),
        };
        Ok(Self { name, bases })
    }

    /// Cross this gene with another into a child buffer, swapping base
    /// segments at the given indices (or randomly chosen ones when empty).
    /// Parents are read-only; see [RecombineOptions] for gating.
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

impl<T: Allele> Recombinant for Gene<T> {
    type Child = T;

    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
    fn children(&self) -> &[T] {
        &self.bases
    }
    fn children_mut(&mut self) -> &mut Vec<T> {
        &mut self.bases
    }
    fn descend_gate(_options: &RecombineOptions) -> Option<bool> {
        None
    }
}

impl<T: Allele> fmt::Display for Gene<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}[{}]",
            self.name,
            self.bases.iter().map(|base| format!("{:?}", base)).join(", ")
        )
    }
}
