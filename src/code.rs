//! The polymorphic individual the optimizer works on
use crate::allele::Allele;
use crate::chromosome::Chromosome;
use crate::errors::Error;
use crate::gene::Gene;
use crate::genome::Genome;
use crate::nucleosome::Nucleosome;
use crate::recombine::RecombineOptions;
use rand::Rng;
use std::fmt;

/// A candidate solution holding any non-empty subset of the four hierarchy
/// levels in independent slots, so callers can optimize a single gene, a
/// whole genome, or several granularities at once. Each set slot owns its
/// subtree; cloning deep-copies every set slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Code<T: Allele> {
    pub gene: Option<Gene<T>>,
    pub nucleosome: Option<Nucleosome<T>>,
    pub chromosome: Option<Chromosome<T>>,
    pub genome: Option<Genome<T>>,
}

impl<T: Allele> Default for Code<T> {
    fn default() -> Self {
        Self { gene: None, nucleosome: None, chromosome: None, genome: None }
    }
}

impl<T: Allele> Code<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gene(mut self, gene: Gene<T>) -> Self {
        self.gene = Some(gene);
        self
    }
    pub fn with_nucleosome(mut self, nucleosome: Nucleosome<T>) -> Self {
        self.nucleosome = Some(nucleosome);
        self
    }
    pub fn with_chromosome(mut self, chromosome: Chromosome<T>) -> Self {
        self.chromosome = Some(chromosome);
        self
    }
    pub fn with_genome(mut self, genome: Genome<T>) -> Self {
        self.genome = Some(genome);
        self
    }

    /// A code with no genetic material cannot participate in optimization.
    pub fn is_empty(&self) -> bool {
        self.gene.is_none()
            && self.nucleosome.is_none()
            && self.chromosome.is_none()
            && self.genome.is_none()
    }

    /// Recombine with `other` into the `child` buffer, slot by slot. A slot
    /// is recombined when both parents carry it and its level is not gated
    /// off in `options`; the child buffer's slot is allocated on demand.
    /// Slots carried by only one parent are skipped.
    pub fn recombine<R: Rng>(
        &self,
        other: &Self,
        child: &mut Self,
        options: &RecombineOptions,
        rng: &mut R,
    ) -> Result<(), Error> {
        if let (Some(first), Some(second)) = (self.gene.as_ref(), other.gene.as_ref()) {
            if options.recombine_genes_enabled() {
                let slot = child.gene.get_or_insert_with(Gene::default);
                first.recombine(second, &[], slot, options, rng)?;
            }
        }
        if let (Some(first), Some(second)) = (self.nucleosome.as_ref(), other.nucleosome.as_ref())
        {
            if options.recombine_nucleosomes_enabled() {
                let slot = child.nucleosome.get_or_insert_with(Nucleosome::default);
                first.recombine(second, &[], slot, options, rng)?;
            }
        }
        if let (Some(first), Some(second)) = (self.chromosome.as_ref(), other.chromosome.as_ref())
        {
            if options.recombine_chromosomes_enabled() {
                let slot = child.chromosome.get_or_insert_with(Chromosome::default);
                first.recombine(second, &[], slot, options, rng)?;
            }
        }
        if let (Some(first), Some(second)) = (self.genome.as_ref(), other.genome.as_ref()) {
            if options.recombine_genomes_enabled() {
                let slot = child.genome.get_or_insert_with(Genome::default);
                first.recombine(second, &[], slot, options, rng)?;
            }
        }
        Ok(())
    }
}

impl<T: Allele> fmt::Display for Code<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<String> = Vec::with_capacity(4);
        if let Some(gene) = &self.gene {
            slots.push(format!("gene {}", gene));
        }
        if let Some(nucleosome) = &self.nucleosome {
            slots.push(format!("nucleosome {}", nucleosome));
        }
        if let Some(chromosome) = &self.chromosome {
            slots.push(format!("chromosome {}", chromosome));
        }
        if let Some(genome) = &self.genome {
            slots.push(format!("genome {}", genome));
        }
        if slots.is_empty() {
            write!(formatter, "Code(empty)")
        } else {
            write!(formatter, "Code({})", slots.join(", "))
        }
    }
}

/// A [Code] paired with its fitness score. Scores are finite and higher is
/// better.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCode<T: Allele> {
    pub code: Code<T>,
    pub score: f64,
}

impl<T: Allele> Default for ScoredCode<T> {
    fn default() -> Self {
        Self { code: Code::default(), score: 0.0 }
    }
}

impl<T: Allele> ScoredCode<T> {
    pub fn new(code: Code<T>, score: f64) -> Self {
        Self { code, score }
    }
}

impl<T: Allele> fmt::Display for ScoredCode<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.6}: {}", self.score, self.code)
    }
}
