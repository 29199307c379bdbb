
#[allow(unused_imports)]
pub use genetic_code::prelude::*;
#[allow(unused_imports)]
pub use rand::rngs::SmallRng;
#[allow(unused_imports)]
pub use rand::{Rng, SeedableRng};

#[allow(dead_code)]
pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0)
}

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn rng_from(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gene_roundtrip_through_helpers() {
        let gene = build::gene("g0", vec![1, 2, 3]);
        assert_eq!(inspect::gene(&gene), ("g0".to_string(), vec![1, 2, 3]));
    }

    #[test]
    fn nucleosome_roundtrip_through_helpers() {
        let nucleosome = build::nucleosome("n0", vec![("a", vec![1]), ("b", vec![2, 3])]);
        assert_eq!(
            inspect::nucleosome(&nucleosome),
            ("n0".to_string(), vec![vec![1], vec![2, 3]])
        );
    }
}
