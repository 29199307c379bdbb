//! Flat-sequence serialization support
//!
//! A hierarchy serializes into one flat sequence of bases. Siblings are
//! joined by a caller-chosen separator, repeated once per level above the
//! gene: genes inside a nucleosome get 1x, nucleosomes inside a chromosome
//! 2x, chromosomes inside a genome 3x. Empty nodes are written as a
//! placeholder unit repeated 1x/2x/4x at gene/nucleosome/chromosome level.
//! The default unit is the element-wise [inverse](crate::allele::Allele) of
//! the separator, so it can never collide with the separator itself.
use crate::allele::Allele;

/// The placeholder unit for a separator: the caller's override, or the
/// separator inverted element-wise.
pub(crate) fn placeholder_unit<T: Allele>(separator: &[T], placeholder: Option<&[T]>) -> Vec<T> {
    match placeholder {
        Some(unit) => unit.to_vec(),
        None => separator.iter().map(Allele::inverse).collect(),
    }
}

pub(crate) fn repeated<T: Clone>(unit: &[T], times: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(unit.len() * times);
    for _ in 0..times {
        out.extend_from_slice(unit);
    }
    out
}

/// Split on non-overlapping occurrences of `separator`, scanning left to
/// right. A sequence without any separator yields a single chunk; an empty
/// sequence yields a single empty chunk.
pub(crate) fn split_on<T: PartialEq + Clone>(sequence: &[T], separator: &[T]) -> Vec<Vec<T>> {
    if separator.is_empty() {
        return vec![sequence.to_vec()];
    }
    let mut chunks = Vec::new();
    let mut chunk_start = 0;
    let mut cursor = 0;
    while cursor + separator.len() <= sequence.len() {
        if &sequence[cursor..cursor + separator.len()] == separator {
            chunks.push(sequence[chunk_start..cursor].to_vec());
            cursor += separator.len();
            chunk_start = cursor;
        } else {
            cursor += 1;
        }
    }
    chunks.push(sequence[chunk_start..].to_vec());
    chunks
}
