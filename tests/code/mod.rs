#[cfg(test)]
use crate::support::*;
use genetic_code::code::Code;
use genetic_code::recombine::RecombineOptions;

#[test]
fn empty_code_has_no_slots() {
    let code: Code<i32> = Code::new();
    assert!(code.is_empty());
    let code = build::gene_code("g0", vec![1]);
    assert!(!code.is_empty());
}

#[test]
fn clone_deep_copies_every_set_slot() {
    let code = Code::new()
        .with_gene(build::gene("g0", vec![1, 2]))
        .with_nucleosome(build::nucleosome("n0", vec![("a", vec![3])]));
    let mut copy = code.clone();
    assert_eq!(copy, code);
    assert!(copy.chromosome.is_none());
    assert!(copy.genome.is_none());
    copy.gene.as_mut().unwrap().substitute(0, 99).unwrap();
    copy.nucleosome.as_mut().unwrap().genes[0].substitute(0, 98).unwrap();
    assert_eq!(code.gene.as_ref().unwrap().bases, vec![1, 2]);
    assert_eq!(code.nucleosome.as_ref().unwrap().genes[0].bases, vec![3]);
}

#[test]
fn recombine_fills_slots_set_in_both_parents() {
    let mut rng = rng();
    let father = build::gene_code("dad", vec![1, 1, 1, 1]);
    let mother = build::gene_code("mom", vec![2, 2, 2, 2]);
    let mut child = Code::new();
    father.recombine(&mother, &mut child, &RecombineOptions::new(), &mut rng).unwrap();
    let gene = child.gene.as_ref().unwrap();
    assert_eq!(gene.bases.len(), 4);
    assert!(gene.bases.iter().all(|&base| base == 1 || base == 2));
    assert!(child.nucleosome.is_none());
}

#[test]
fn recombine_skips_slots_set_in_one_parent() {
    let mut rng = rng();
    let father = build::gene_code("dad", vec![1, 1])
        .with_nucleosome(build::nucleosome("n0", vec![("a", vec![5])]));
    let mother = build::gene_code("mom", vec![2, 2]);
    let mut child = Code::new();
    father.recombine(&mother, &mut child, &RecombineOptions::new(), &mut rng).unwrap();
    assert!(child.gene.is_some());
    // the nucleosome slot is only set in one parent
    assert!(child.nucleosome.is_none());
}

#[test]
fn recombine_honors_level_gates() {
    let mut rng = rng();
    let father = build::gene_code("dad", vec![1, 1])
        .with_nucleosome(build::nucleosome("ndad", vec![("a", vec![1, 1])]));
    let mother = build::gene_code("mom", vec![2, 2])
        .with_nucleosome(build::nucleosome("nmom", vec![("a", vec![2, 2])]));
    let options = RecombineOptions::new().with_recombine_genes(false);
    let mut child = Code::new();
    father.recombine(&mother, &mut child, &options, &mut rng).unwrap();
    assert!(child.gene.is_none());
    assert!(child.nucleosome.is_some());
}

#[test]
fn recombine_works_across_all_four_slots() {
    let mut rng = rng();
    let father = Code::new()
        .with_gene(build::gene("dad", vec![1, 1]))
        .with_nucleosome(build::nucleosome("ndad", vec![("a", vec![1])]))
        .with_chromosome(build::chromosome("cdad", vec![("n", vec![("a", vec![1])])]))
        .with_genome(build::genome("gdad", vec![("c", vec![("n", vec![("a", vec![1])])])]));
    let mother = Code::new()
        .with_gene(build::gene("mom", vec![2, 2]))
        .with_nucleosome(build::nucleosome("nmom", vec![("a", vec![2])]))
        .with_chromosome(build::chromosome("cmom", vec![("n", vec![("a", vec![2])])]))
        .with_genome(build::genome("gmom", vec![("c", vec![("n", vec![("a", vec![2])])])]));
    let mut child = Code::new();
    father.recombine(&mother, &mut child, &RecombineOptions::new(), &mut rng).unwrap();
    assert!(child.gene.is_some());
    assert!(child.nucleosome.is_some());
    assert!(child.chromosome.is_some());
    assert!(child.genome.is_some());
}

#[test]
fn recombine_reuses_a_stale_child_buffer() {
    let mut rng = rng();
    let father = build::gene_code("dad", vec![1, 1, 1]);
    let mother = build::gene_code("mom", vec![2, 2, 2]);
    let mut child = build::gene_code("stale", vec![9, 9, 9, 9, 9, 9, 9]);
    father.recombine(&mother, &mut child, &RecombineOptions::new(), &mut rng).unwrap();
    let gene = child.gene.as_ref().unwrap();
    assert_eq!(gene.bases.len(), 3);
    assert!(gene.bases.iter().all(|&base| base == 1 || base == 2));
}
