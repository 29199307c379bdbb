#[cfg(test)]
use crate::support::*;
use genetic_code::chromosome::Chromosome;
use genetic_code::errors::Error;
use genetic_code::genome::Genome;
use genetic_code::nucleosome::Nucleosome;

const SEPARATOR: [i32; 5] = [0, 0, 0, 0, 0];

#[test]
fn nucleosome_sequence_joins_genes_with_one_separator() {
    let nucleosome = build::nucleosome("n0", vec![("a", vec![1, 2, 3]), ("b", vec![4, 5, 6])]);
    assert_eq!(
        nucleosome.sequence(&SEPARATOR, None),
        vec![1, 2, 3, 0, 0, 0, 0, 0, 4, 5, 6]
    );
}

#[test]
fn chromosome_sequence_joins_nucleosomes_with_two_separators() {
    let chromosome = build::chromosome(
        "c0",
        vec![("n0", vec![("a", vec![1])]), ("n1", vec![("b", vec![2])])],
    );
    assert_eq!(
        chromosome.sequence(&SEPARATOR, None),
        vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2]
    );
}

#[test]
fn empty_gene_serializes_as_one_placeholder_unit() {
    let nucleosome = build::nucleosome("n0", vec![("a", vec![1]), ("empty", vec![])]);
    let mut expected = vec![1];
    expected.extend_from_slice(&SEPARATOR);
    expected.extend_from_slice(&[-1; 5]);
    assert_eq!(nucleosome.sequence(&SEPARATOR, None), expected);
}

#[test]
fn empty_nucleosome_serializes_as_two_placeholder_units() {
    let nucleosome = build::nucleosome("n0", vec![]);
    assert_eq!(nucleosome.sequence(&SEPARATOR, None), vec![-1; 10]);
}

#[test]
fn empty_chromosome_serializes_as_four_placeholder_units() {
    let chromosome = build::chromosome("c0", vec![]);
    assert_eq!(chromosome.sequence(&SEPARATOR, None), vec![-1; 20]);
}

#[test]
fn placeholder_unit_can_be_overridden() {
    let nucleosome = build::nucleosome("n0", vec![("empty", vec![])]);
    assert_eq!(nucleosome.sequence(&SEPARATOR, Some(&[7, 7])), vec![7, 7]);
    let mut rng = rng();
    let restored =
        Nucleosome::from_sequence(&[7, 7], &SEPARATOR, Some(&[7, 7]), &mut rng).unwrap();
    assert_eq!(inspect::nucleosome_bases(&restored), vec![Vec::<i32>::new()]);
}

#[test]
fn nucleosome_roundtrip() {
    let mut rng = rng();
    let nucleosome = build::nucleosome("n0", vec![("a", vec![1, 2, 3]), ("b", vec![4, 5, 6])]);
    let flat = nucleosome.sequence(&SEPARATOR, None);
    let restored = Nucleosome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert_eq!(inspect::nucleosome_bases(&restored), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(restored.sequence(&SEPARATOR, None), flat);
}

#[test]
fn chromosome_roundtrip_preserves_the_sequence() {
    let mut rng = rng();
    let chromosome = build::chromosome(
        "c0",
        vec![
            ("n0", vec![("a", vec![1, 2, 3]), ("b", vec![4, 5, 6])]),
            ("n1", vec![("c", vec![1, 2, 3]), ("d", vec![4, 5, 6])]),
        ],
    );
    let flat = chromosome.sequence(&SEPARATOR, None);
    let restored = Chromosome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert_eq!(restored.sequence(&SEPARATOR, None), flat);
    assert_eq!(
        inspect::chromosome_bases(&restored),
        vec![
            vec![vec![1, 2, 3], vec![4, 5, 6]],
            vec![vec![1, 2, 3], vec![4, 5, 6]],
        ]
    );
}

#[test]
fn chromosome_roundtrip_with_empty_nodes() {
    let mut rng = rng();
    let chromosome = build::chromosome(
        "c0",
        vec![
            ("n0", vec![("a", vec![1]), ("empty", vec![])]),
            ("n1", vec![]),
        ],
    );
    let flat = chromosome.sequence(&SEPARATOR, None);
    let restored = Chromosome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert_eq!(
        inspect::chromosome_bases(&restored),
        vec![vec![vec![1], vec![]], vec![]]
    );
    assert_eq!(restored.sequence(&SEPARATOR, None), flat);
}

#[test]
fn genome_roundtrip() {
    let mut rng = rng();
    let genome = build::genome(
        "g0",
        vec![
            ("c0", vec![("n0", vec![("a", vec![1, 2]), ("b", vec![3, 4])])]),
            ("c1", vec![("n1", vec![("c", vec![5, 6])]), ("n2", vec![("d", vec![7, 8])])]),
        ],
    );
    let flat = genome.sequence(&SEPARATOR, None);
    let restored = Genome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert_eq!(restored.sequence(&SEPARATOR, None), flat);
    assert_eq!(inspect::genome_bases(&restored), inspect::genome_bases(&genome));
}

#[test]
fn genome_roundtrip_with_empty_chromosome() {
    let mut rng = rng();
    let genome = build::genome(
        "g0",
        vec![("c0", vec![("n0", vec![("a", vec![1])])]), ("c1", vec![])],
    );
    let flat = genome.sequence(&SEPARATOR, None);
    let restored = Genome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert_eq!(inspect::genome_bases(&restored), vec![vec![vec![vec![1]]], vec![]]);
}

#[test]
fn empty_genome_roundtrip() {
    let mut rng = rng();
    let genome: Genome<i32> = Genome::new("g0", vec![]);
    let flat = genome.sequence(&SEPARATOR, None);
    assert!(flat.is_empty());
    let restored = Genome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert!(restored.chromosomes.is_empty());
}

#[test]
fn restored_nodes_get_fresh_names() {
    let mut rng = rng();
    let nucleosome = build::nucleosome("n0", vec![("a", vec![1])]);
    let flat = nucleosome.sequence(&SEPARATOR, None);
    let restored = Nucleosome::from_sequence(&flat, &SEPARATOR, None, &mut rng).unwrap();
    assert!(!restored.name.is_empty());
    assert!(!restored.genes[0].name.is_empty());
}

#[test]
fn roundtrip_over_float_bases() {
    let mut rng = rng();
    let separator = [0.0f64, 0.0, 0.0];
    let nucleosome = Nucleosome::new(
        "n0",
        vec![
            genetic_code::gene::Gene::new("a", vec![1.5, 2.5]),
            genetic_code::gene::Gene::new("b", vec![-3.25]),
        ],
    );
    let flat = nucleosome.sequence(&separator, None);
    assert_eq!(flat, vec![1.5, 2.5, 0.0, 0.0, 0.0, -3.25]);
    let restored = Nucleosome::from_sequence(&flat, &separator, None, &mut rng).unwrap();
    assert_eq!(restored.genes[0].bases, vec![1.5, 2.5]);
    assert_eq!(restored.genes[1].bases, vec![-3.25]);
}

#[test]
fn float_placeholder_survives_a_roundtrip() {
    let mut rng = rng();
    let separator = [0.0f64, 0.0, 0.0];
    let nucleosome = Nucleosome::new(
        "n0",
        vec![
            genetic_code::gene::Gene::new("a", vec![1.5]),
            genetic_code::gene::Gene::new("empty", vec![]),
        ],
    );
    let flat = nucleosome.sequence(&separator, None);
    let restored = Nucleosome::from_sequence(&flat, &separator, None, &mut rng).unwrap();
    assert_eq!(restored.genes.len(), 2);
    assert_eq!(restored.genes[0].bases, vec![1.5]);
    assert!(restored.genes[1].bases.is_empty());
}

#[test]
fn from_sequence_rejects_an_empty_separator() {
    let mut rng = rng();
    assert_eq!(
        Nucleosome::<i32>::from_sequence(&[1, 2], &[], None, &mut rng),
        Err(Error::BadSize { size: 0 })
    );
}

#[test]
fn roundtrip_with_a_short_separator() {
    let mut rng = rng();
    let separator = [0];
    let chromosome = build::chromosome(
        "c0",
        vec![
            ("n0", vec![("a", vec![1, 2]), ("b", vec![3])]),
            ("n1", vec![("c", vec![4])]),
        ],
    );
    let flat = chromosome.sequence(&separator, None);
    assert_eq!(flat, vec![1, 2, 0, 3, 0, 0, 4]);
    let restored = Chromosome::from_sequence(&flat, &separator, None, &mut rng).unwrap();
    assert_eq!(restored.sequence(&separator, None), flat);
}
