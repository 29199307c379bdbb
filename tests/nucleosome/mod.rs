#[cfg(test)]
use crate::support::*;
use genetic_code::errors::Error;
use genetic_code::nucleosome::Nucleosome;

#[test]
fn insert_within_bounds() {
    let mut nucleosome = build::nucleosome("n0", vec![("a", vec![1]), ("c", vec![3])]);
    nucleosome.insert(1, build::gene("b", vec![2])).unwrap();
    assert_eq!(inspect::nucleosome_bases(&nucleosome), vec![vec![1], vec![2], vec![3]]);
    assert_eq!(
        nucleosome.insert(4, build::gene("d", vec![4])),
        Err(Error::OutOfRange { index: 4, size: 3 })
    );
}

#[test]
fn append_pushes_to_end() {
    let mut nucleosome = build::nucleosome("n0", vec![]);
    nucleosome.append(build::gene("a", vec![1]));
    nucleosome.append(build::gene("b", vec![2]));
    assert_eq!(inspect::nucleosome_bases(&nucleosome), vec![vec![1], vec![2]]);
}

#[test]
fn duplicate_doubles_one_gene() {
    let mut nucleosome = build::nucleosome("n0", vec![("a", vec![1]), ("b", vec![2])]);
    nucleosome.duplicate(0).unwrap();
    assert_eq!(inspect::nucleosome_bases(&nucleosome), vec![vec![1], vec![1], vec![2]]);
    assert_eq!(nucleosome.genes[0].name, "a");
    assert_eq!(nucleosome.genes[1].name, "a");
    assert_eq!(nucleosome.duplicate(3), Err(Error::OutOfRange { index: 3, size: 3 }));
}

#[test]
fn duplicate_is_a_deep_copy() {
    let mut nucleosome = build::nucleosome("n0", vec![("a", vec![1])]);
    nucleosome.duplicate(0).unwrap();
    nucleosome.genes[0].substitute(0, 9).unwrap();
    assert_eq!(nucleosome.genes[1].bases, vec![1]);
}

#[test]
fn delete_and_substitute() {
    let mut nucleosome =
        build::nucleosome("n0", vec![("a", vec![1]), ("b", vec![2]), ("c", vec![3])]);
    nucleosome.delete(1).unwrap();
    assert_eq!(inspect::nucleosome_bases(&nucleosome), vec![vec![1], vec![3]]);
    nucleosome.substitute(1, build::gene("d", vec![4])).unwrap();
    assert_eq!(inspect::nucleosome_bases(&nucleosome), vec![vec![1], vec![4]]);
    assert_eq!(nucleosome.delete(2), Err(Error::OutOfRange { index: 2, size: 2 }));
    assert_eq!(
        nucleosome.substitute(2, build::gene("e", vec![5])),
        Err(Error::OutOfRange { index: 2, size: 2 })
    );
}

#[test]
fn clone_is_deep() {
    let nucleosome = build::nucleosome("n0", vec![("a", vec![1, 2])]);
    let mut copy = nucleosome.clone();
    assert_eq!(copy.to_map(), nucleosome.to_map());
    copy.genes[0].substitute(0, 99).unwrap();
    assert_eq!(nucleosome.genes[0].bases, vec![1, 2]);
}

#[test]
fn map_roundtrip() {
    let nucleosome = build::nucleosome("n0", vec![("a", vec![1]), ("b", vec![2, 3])]);
    let restored = Nucleosome::from_map(&nucleosome.to_map()).unwrap();
    assert_eq!(restored, nucleosome);
}

#[test]
fn make_respects_dimensions() {
    let mut rng = rng();
    let options = build::small_int_options().with_n_genes(3).with_name("n0");
    let nucleosome = Nucleosome::make(&options, &mut rng).unwrap();
    assert_eq!(nucleosome.name, "n0");
    assert_eq!(nucleosome.genes.len(), 3);
    assert!(nucleosome.genes.iter().all(|gene| gene.bases.len() == 5));
    // descendants never share the caller's name
    assert!(nucleosome.genes.iter().all(|gene| gene.name != "n0"));
}
