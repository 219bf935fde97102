//! Puzzle generation utilities.
//!
//! Pure helpers for drawing targets and computing candidate sums. All
//! randomness is injected: every generator takes `&mut impl Rng`, so callers
//! can pass a seeded `ChaCha8Rng` for deterministic tests.

use rand::Rng;

/// Smallest playable number.
pub const MIN_NUMBER: u8 = 1;

/// Largest playable number (and largest target sum).
pub const MAX_NUMBER: u8 = 9;

/// Uniform integer in `[min, max]` inclusive.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u8, max: u8) -> u8 {
    rng.gen_range(min..=max)
}

/// Ascending integer sequence `[min..=max]`.
pub fn range(min: u8, max: u8) -> Vec<u8> {
    (min..=max).collect()
}

/// Arithmetic sum of a sequence, 0 for an empty sequence.
pub fn sum(values: &[u8]) -> u32 {
    values.iter().map(|&v| u32::from(v)).sum()
}

/// Sum of a random non-empty subset of `pool`, constrained to `1..=max_value`.
///
/// Enumerates every non-empty subset whose sum fits the bound and picks one
/// uniformly, with multiplicity, so the returned target is always achievable
/// by at least one subset of the current pool.
///
/// `pool` must be non-empty and contain at least one element `<= max_value`;
/// the engine checks pool non-emptiness before drawing a new target.
pub fn random_sum_in<R: Rng + ?Sized>(rng: &mut R, pool: &[u8], max_value: u8) -> u8 {
    debug_assert!(!pool.is_empty(), "random_sum_in called with an empty pool");

    let mut sets: Vec<Vec<u8>> = vec![Vec::new()];
    let mut sums: Vec<u8> = Vec::new();

    for &n in pool {
        for i in 0..sets.len() {
            let mut candidate = sets[i].clone();
            candidate.push(n);
            let candidate_sum = sum(&candidate);
            if candidate_sum <= u32::from(max_value) {
                sums.push(candidate_sum as u8);
                sets.push(candidate);
            }
        }
    }

    debug_assert!(
        !sums.is_empty(),
        "no non-empty subset of the pool fits the bound"
    );
    sums[rng.gen_range(0..sums.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_random_int_bounds() {
        let mut rng = rng();
        for _ in 0..200 {
            let n = random_int(&mut rng, MIN_NUMBER, MAX_NUMBER);
            assert!((MIN_NUMBER..=MAX_NUMBER).contains(&n));
        }
    }

    #[test]
    fn test_random_int_degenerate_range() {
        let mut rng = rng();
        assert_eq!(random_int(&mut rng, 5, 5), 5);
    }

    #[test]
    fn test_range() {
        assert_eq!(range(1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(range(3, 3), vec![3]);
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[7]), 7);
        assert_eq!(sum(&[1, 2, 3, 4, 5, 6, 7, 8, 9]), 45);
    }

    #[test]
    fn test_random_sum_in_bounds() {
        let mut rng = rng();
        let pool = range(MIN_NUMBER, MAX_NUMBER);
        for _ in 0..200 {
            let target = random_sum_in(&mut rng, &pool, MAX_NUMBER);
            assert!((1..=MAX_NUMBER).contains(&target));
        }
    }

    #[test]
    fn test_random_sum_in_achievable() {
        // Every drawn target must be the sum of some non-empty subset.
        let mut rng = rng();
        let pool = [2, 5, 8];
        for _ in 0..100 {
            let target = random_sum_in(&mut rng, &pool, MAX_NUMBER);
            assert!(matches!(target, 2 | 5 | 7 | 8));
        }
    }

    #[test]
    fn test_random_sum_in_single_element() {
        let mut rng = rng();
        assert_eq!(random_sum_in(&mut rng, &[6], MAX_NUMBER), 6);
    }

    #[test]
    #[should_panic(expected = "no non-empty subset of the pool fits the bound")]
    fn test_random_sum_in_unsatisfiable_bound() {
        let mut rng = rng();
        let _ = random_sum_in(&mut rng, &[8, 9], 5);
    }
}
