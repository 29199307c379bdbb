#[cfg(test)]
use crate::support::*;
use genetic_code::errors::Error;
use genetic_code::genome::Genome;

fn two_chromosome_genome() -> Genome<i32> {
    build::genome(
        "g0",
        vec![
            ("c0", vec![("n0", vec![("a", vec![1, 2])])]),
            ("c1", vec![("n1", vec![("b", vec![3])]), ("n2", vec![("c", vec![4])])]),
        ],
    )
}

#[test]
fn insert_append_delete_substitute() {
    let mut genome = two_chromosome_genome();
    genome.insert(0, build::chromosome("c2", vec![("n3", vec![("d", vec![5])])])).unwrap();
    genome.append(build::chromosome("c3", vec![("n4", vec![("e", vec![6])])]));
    assert_eq!(genome.chromosomes.len(), 4);
    genome.delete(1).unwrap();
    genome.substitute(0, build::chromosome("c4", vec![("n5", vec![("f", vec![7])])])).unwrap();
    assert_eq!(
        inspect::genome_bases(&genome),
        vec![
            vec![vec![vec![7]]],
            vec![vec![vec![3]], vec![vec![4]]],
            vec![vec![vec![6]]],
        ]
    );
    assert_eq!(
        genome.insert(4, build::chromosome("c5", vec![])),
        Err(Error::OutOfRange { index: 4, size: 3 })
    );
    assert_eq!(genome.substitute(3, build::chromosome("c6", vec![])),
        Err(Error::OutOfRange { index: 3, size: 3 }));
}

#[test]
fn duplicate_doubles_one_chromosome() {
    let mut genome = two_chromosome_genome();
    genome.duplicate(0).unwrap();
    assert_eq!(genome.chromosomes.len(), 3);
    assert_eq!(genome.chromosomes[0], genome.chromosomes[1]);
    genome.chromosomes[0].nucleosomes[0].genes[0].substitute(0, 99).unwrap();
    assert_eq!(genome.chromosomes[1].nucleosomes[0].genes[0].bases, vec![1, 2]);
}

#[test]
fn clone_is_deep() {
    let genome = two_chromosome_genome();
    let mut copy = genome.clone();
    assert_eq!(copy.to_map(), genome.to_map());
    copy.chromosomes[0].nucleosomes[0].genes[0].substitute(0, 99).unwrap();
    assert_eq!(genome.chromosomes[0].nucleosomes[0].genes[0].bases, vec![1, 2]);
}

#[test]
fn map_roundtrip() {
    let genome = two_chromosome_genome();
    let restored = Genome::from_map(&genome.to_map()).unwrap();
    assert_eq!(restored, genome);
}

#[test]
fn make_respects_dimensions() {
    let mut rng = rng();
    let options = build::small_int_options()
        .with_n_genes(2)
        .with_n_nucleosomes(2)
        .with_n_chromosomes(4)
        .with_name("made");
    let genome = Genome::make(&options, &mut rng).unwrap();
    assert_eq!(genome.name, "made");
    assert_eq!(genome.chromosomes.len(), 4);
    assert!(genome.chromosomes.iter().all(|chromosome| chromosome.nucleosomes.len() == 2));
}
