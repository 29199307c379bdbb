//! Crossover of two same-level nodes into a child buffer
//!
//! All four hierarchy levels share one recombination skeleton: pick crossover
//! points over the shorter parent, cross the parents' names, swap child
//! segments between the parents, then descend into matched child pairs. The
//! level-specific parts (children access, descent gating) live behind the
//! [Recombinant] trait, implemented per level.
use crate::errors::Error;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Per-level switches for [recombine](crate::code::Code::recombine).
///
/// Unset gates default to true (recombine at that level), unset match flags
/// default to false (no name check). A `match_*` flag set to true restricts
/// recombination to child pairs whose names are equal, which is useful when
/// names carry semantics and mixing heterologous children would produce
/// nonsense.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecombineOptions {
    pub recombine_genes: Option<bool>,
    pub match_genes: Option<bool>,
    pub recombine_nucleosomes: Option<bool>,
    pub match_nucleosomes: Option<bool>,
    pub recombine_chromosomes: Option<bool>,
    pub match_chromosomes: Option<bool>,
    pub recombine_genomes: Option<bool>,
}

impl RecombineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recombine_genes(mut self, recombine_genes: bool) -> Self {
        self.recombine_genes = Some(recombine_genes);
        self
    }
    pub fn with_match_genes(mut self, match_genes: bool) -> Self {
        self.match_genes = Some(match_genes);
        self
    }
    pub fn with_recombine_nucleosomes(mut self, recombine_nucleosomes: bool) -> Self {
        self.recombine_nucleosomes = Some(recombine_nucleosomes);
        self
    }
    pub fn with_match_nucleosomes(mut self, match_nucleosomes: bool) -> Self {
        self.match_nucleosomes = Some(match_nucleosomes);
        self
    }
    pub fn with_recombine_chromosomes(mut self, recombine_chromosomes: bool) -> Self {
        self.recombine_chromosomes = Some(recombine_chromosomes);
        self
    }
    pub fn with_match_chromosomes(mut self, match_chromosomes: bool) -> Self {
        self.match_chromosomes = Some(match_chromosomes);
        self
    }
    pub fn with_recombine_genomes(mut self, recombine_genomes: bool) -> Self {
        self.recombine_genomes = Some(recombine_genomes);
        self
    }

    pub fn recombine_genes_enabled(&self) -> bool {
        self.recombine_genes.unwrap_or(true)
    }
    pub fn match_genes_required(&self) -> bool {
        self.match_genes.unwrap_or(false)
    }
    pub fn recombine_nucleosomes_enabled(&self) -> bool {
        self.recombine_nucleosomes.unwrap_or(true)
    }
    pub fn match_nucleosomes_required(&self) -> bool {
        self.match_nucleosomes.unwrap_or(false)
    }
    pub fn recombine_chromosomes_enabled(&self) -> bool {
        self.recombine_chromosomes.unwrap_or(true)
    }
    pub fn match_chromosomes_required(&self) -> bool {
        self.match_chromosomes.unwrap_or(false)
    }
    pub fn recombine_genomes_enabled(&self) -> bool {
        self.recombine_genomes.unwrap_or(true)
    }
}

/// Level plumbing for the shared recombination skeleton. `Child` is the base
/// type at the gene level and the next node type everywhere above it.
pub(crate) trait Recombinant {
    type Child: Clone;

    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn children(&self) -> &[Self::Child];
    fn children_mut(&mut self) -> &mut Vec<Self::Child>;

    /// None when children are atomic (gene level), Some(gate) otherwise.
    fn descend_gate(options: &RecombineOptions) -> Option<bool>;
    fn match_required(_options: &RecombineOptions) -> bool {
        false
    }
    fn child_name(_child: &Self::Child) -> &str {
        ""
    }
    fn recombine_children<R: Rng>(
        _first: &Self::Child,
        _second: &Self::Child,
        _child: &mut Self::Child,
        _options: &RecombineOptions,
        _rng: &mut R,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// Recombine `first` and `second` into the `child` buffer.
///
/// The child buffer is treated as pre-allocated scratch space: existing slots
/// are overwritten in place, missing slots appended, excess slots truncated.
/// Neither parent is modified. The first failure from a descendant aborts and
/// is surfaced wrapped in [Error::Child].
pub(crate) fn recombine_nodes<L: Recombinant, R: Rng>(
    first: &L,
    second: &L,
    indices: &[usize],
    child: &mut L,
    options: &RecombineOptions,
    rng: &mut R,
) -> Result<(), Error> {
    let min_size = first.children().len().min(second.children().len());
    let max_size = first.children().len().max(second.children().len());

    let crossovers = if indices.is_empty() {
        draw_crossover_indices(min_size, rng)
    } else {
        let mut deduplicated: Vec<usize> =
            indices.iter().copied().collect::<FxHashSet<usize>>().into_iter().collect();
        deduplicated.sort_unstable();
        deduplicated
    };
    for &index in &crossovers {
        if index >= min_size {
            return Err(Error::OutOfRange { index, size: min_size });
        }
    }

    child.set_name(crossover_name(first.name(), second.name(), rng));

    // Segment swap. A parent's view extends past its own length into the
    // other parent's children, so the child always gets max_size slots.
    {
        let first_children = first.children();
        let second_children = second.children();
        let view_first = |position: usize| {
            if position < first_children.len() {
                &first_children[position]
            } else {
                &second_children[position]
            }
        };
        let view_second = |position: usize| {
            if position < second_children.len() {
                &second_children[position]
            } else {
                &first_children[position]
            }
        };

        let slots = child.children_mut();
        slots.truncate(max_size);
        let mut swapped = false;
        let mut upcoming = 0;
        for position in 0..max_size {
            if upcoming < crossovers.len() && crossovers[upcoming] == position {
                swapped = !swapped;
                upcoming += 1;
            }
            let source = if swapped { view_second(position) } else { view_first(position) };
            if position < slots.len() {
                slots[position].clone_from(source);
            } else {
                slots.push(source.clone());
            }
        }
    }

    // Descend into matched pairs, re-randomizing inside each one. Positions
    // whose names fail a required match keep the shallow swap result.
    if let Some(enabled) = L::descend_gate(options) {
        if enabled {
            let match_required = L::match_required(options);
            for position in 0..min_size {
                let first_child = &first.children()[position];
                let second_child = &second.children()[position];
                if match_required && L::child_name(first_child) != L::child_name(second_child) {
                    continue;
                }
                L::recombine_children(
                    first_child,
                    second_child,
                    &mut child.children_mut()[position],
                    options,
                    rng,
                )
                .map_err(|error| error.into_child())?;
            }
        }
    }
    Ok(())
}

/// Up to ceil(ln(min_size)) distinct crossover points, at least one, drawn
/// uniformly over the shorter parent. No points when min_size <= 1.
fn draw_crossover_indices<R: Rng>(min_size: usize, rng: &mut R) -> Vec<usize> {
    if min_size <= 1 {
        return Vec::new();
    }
    let max_swaps = (min_size as f64).ln().ceil() as usize;
    let swaps = rng.gen_range(0..max_swaps).max(1);
    let mut drawn = FxHashSet::default();
    for _ in 0..swaps {
        drawn.insert(rng.gen_range(0..min_size));
    }
    let mut crossovers: Vec<usize> = drawn.into_iter().collect();
    crossovers.sort_unstable();
    crossovers
}

/// Splice the parents' names at a random pivot when they differ and are long
/// enough to cut, otherwise keep the first parent's name.
fn crossover_name<R: Rng>(first: &str, second: &str, rng: &mut R) -> String {
    let first_characters: Vec<char> = first.chars().collect();
    let second_characters: Vec<char> = second.chars().collect();
    let min_length = first_characters.len().min(second_characters.len());
    if first == second || min_length <= 2 {
        return first.to_string();
    }
    let pivot = rng.gen_range(1..min_length);
    first_characters[..pivot]
        .iter()
        .chain(second_characters[pivot..].iter())
        .collect()
}
