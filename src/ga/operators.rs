//! Genetic operators on raw gene slices.
//!
//! These are the mechanics behind [`BitString`](super::BitString) and
//! [`Permutation`](super::Permutation); the genotype types decide *when* to
//! apply them (probabilities), the functions here decide *how*.
//!
//! # Bitstring Operators
//!
//! - [`single_point_crossover`]: one cut in `[1, len-1]`, tails exchanged
//! - [`bit_flip_mutation`]: independent Bernoulli flip per position
//!
//! # Permutation Operators
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`swap_mutation`]: exchange two random positions
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use rand::Rng;

// ============================================================================
// Bitstring operators
// ============================================================================

/// Single-point crossover for equal-length gene strings.
///
/// A cut point is drawn uniformly from `[1, len-1]`; child A takes
/// `parent1[..cut] ++ parent2[cut..]`, child B takes
/// `parent2[..cut] ++ parent1[cut..]`. Strings shorter than two genes have no
/// interior cut point and are returned as copies.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<T: Copy, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cut = rng.random_range(1..n);
    single_point_crossover_at(parent1, parent2, cut)
}

/// Single-point crossover at a fixed `cut`.
///
/// # Panics
/// Panics if parents have different lengths or `cut > len`.
pub fn single_point_crossover_at<T: Copy>(
    parent1: &[T],
    parent2: &[T],
    cut: usize,
) -> (Vec<T>, Vec<T>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(cut <= parent1.len(), "cut point out of range");

    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Flips each bit independently with probability `p`.
///
/// Expected number of flips is `bits.len() * p`. Returns the number of bits
/// flipped.
pub fn bit_flip_mutation<R: Rng>(bits: &mut [bool], p: f64, rng: &mut R) -> usize {
    let mut flipped = 0;
    for bit in bits.iter_mut() {
        if rng.random_bool(p) {
            *bit = !*bit;
            flipped += 1;
        }
    }
    flipped
}

// ============================================================================
// Permutation operators
// ============================================================================

/// Order Crossover (OX) for permutations.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Draw two cut indices, reordered so `cut1 <= cut2`
/// 2. Copy `[cut1, cut2]` from each parent into the matching child
/// 3. Fill the remaining positions of each child, starting right after
///    `cut2` and wrapping, with the *other* parent's cities scanned from
///    right after `cut2` (wrapping), skipping cities already present
///
/// Both children are valid permutations whenever both parents are.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (cut1, cut2) = random_cuts(n, rng);
    order_crossover_with_cuts(parent1, parent2, cut1, cut2)
}

/// Order Crossover with fixed cut indices.
///
/// The cuts may be given in either order; the inclusive slice between them
/// is kept from each parent.
///
/// # Panics
/// Panics if parents have different lengths or a cut is out of range.
pub fn order_crossover_with_cuts(
    parent1: &[usize],
    parent2: &[usize],
    cut1: usize,
    cut2: usize,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(cut1 < n && cut2 < n, "cut index out of range");

    let (lo, hi) = if cut1 <= cut2 { (cut1, cut2) } else { (cut2, cut1) };

    let child1 = ox_child(parent1, parent2, lo, hi);
    let child2 = ox_child(parent2, parent1, lo, hi);
    (child1, child2)
}

/// Builds one OX child: the slice comes from `keeper`, the rest from `filler`.
fn ox_child(keeper: &[usize], filler: &[usize], lo: usize, hi: usize) -> Vec<usize> {
    let n = keeper.len();
    let mut child = vec![usize::MAX; n];
    let mut present = vec![false; n];

    for i in lo..=hi {
        child[i] = keeper[i];
        present[keeper[i]] = true;
    }

    let mut write = (hi + 1) % n;
    for offset in 0..n {
        let city = filler[(hi + 1 + offset) % n];
        if !present[city] {
            present[city] = true;
            child[write] = city;
            write = (write + 1) % n;
        }
    }

    child
}

/// Swaps two uniformly drawn positions.
///
/// The positions may coincide, in which case nothing changes. Returns
/// `true` if two distinct positions were exchanged.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
    i != j
}

/// Checks that `perm` is a bijection on `0..n`.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Two uniform indices in `0..n`, reordered so the first is not larger.
fn random_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ---- Single-point crossover ----

    #[test]
    fn test_single_point_at_cut() {
        let p1 = [true, true, true, true];
        let p2 = [false, false, false, false];
        let (c1, c2) = single_point_crossover_at(&p1, &p2, 1);
        assert_eq!(c1, vec![true, false, false, false]);
        assert_eq!(c2, vec![false, true, true, true]);
    }

    #[test]
    fn test_single_point_cut_is_interior() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1 = [true; 6];
        let p2 = [false; 6];
        for _ in 0..200 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
            // An interior cut always takes at least one gene from each parent.
            assert!(c1[0] && !c1[5], "c1 = {c1:?}");
            assert!(!c2[0] && c2[5], "c2 = {c2:?}");
        }
    }

    #[test]
    fn test_single_point_single_gene_copies() {
        let mut rng = StdRng::seed_from_u64(42);
        let (c1, c2) = single_point_crossover(&[true], &[false], &mut rng);
        assert_eq!(c1, vec![true]);
        assert_eq!(c2, vec![false]);
    }

    // ---- Bit flip ----

    #[test]
    fn test_bit_flip_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bits = vec![false; 16];
        assert_eq!(bit_flip_mutation(&mut bits, 0.0, &mut rng), 0);
        assert!(bits.iter().all(|&b| !b));
        assert_eq!(bit_flip_mutation(&mut bits, 1.0, &mut rng), 16);
        assert!(bits.iter().all(|&b| b));
    }

    #[test]
    fn test_bit_flip_rate() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut bits = vec![false; 1000];
        let mut total = 0;
        for _ in 0..20 {
            total += bit_flip_mutation(&mut bits, 0.1, &mut rng);
        }
        // Expected 2000 flips over 20 rounds of 1000 bits.
        assert!((1700..2300).contains(&total), "flipped {total}");
    }

    // ---- OX ----

    #[test]
    fn test_ox_known_cuts() {
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];
        let (c1, c2) = order_crossover_with_cuts(&p1, &p2, 2, 4);
        // Slice [2..=4] kept; fill starts at index 5 scanning the other
        // parent from index 5 and wrapping.
        assert_eq!(c1, vec![6, 5, 2, 3, 4, 1, 0, 7]);
        assert_eq!(c2, vec![1, 2, 5, 4, 3, 6, 7, 0]);
    }

    #[test]
    fn test_ox_reversed_cuts_match() {
        let p1 = vec![3, 0, 4, 1, 2];
        let p2 = vec![1, 2, 3, 4, 0];
        assert_eq!(
            order_crossover_with_cuts(&p1, &p2, 3, 1),
            order_crossover_with_cuts(&p1, &p2, 1, 3)
        );
    }

    #[test]
    fn test_ox_full_slice_copies_parents() {
        let p1 = vec![2, 0, 1, 3];
        let p2 = vec![3, 1, 0, 2];
        let (c1, c2) = order_crossover_with_cuts(&p1, &p2, 0, 3);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = StdRng::seed_from_u64(42);
        let (c1, c2) = order_crossover(&[0], &[0], &mut rng);
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    #[test]
    fn test_ox_random_cuts_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1: Vec<usize> = (0..20).collect();
        let p2: Vec<usize> = (0..20).rev().collect();
        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&c1, 20), "c1 invalid: {c1:?}");
            assert!(is_permutation(&c2, 20), "c2 invalid: {c2:?}");
        }
    }

    // ---- Swap ----

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut perm: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            swap_mutation(&mut perm, &mut rng);
            assert!(is_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_reports_change() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut perm = vec![0, 1, 2, 3];
            let changed = swap_mutation(&mut perm, &mut rng);
            assert_eq!(changed, perm != vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut perm = vec![0];
        assert!(!swap_mutation(&mut perm, &mut rng));
        assert_eq!(perm, vec![0]);
    }

    // ---- Validity check ----

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[2, 0, 0], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }

    // ---- Properties ----

    fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
    }

    fn ox_case() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
        (1usize..40).prop_flat_map(|n| (permutation(n), permutation(n), 0..n, 0..n))
    }

    proptest! {
        #[test]
        fn prop_ox_children_are_permutations((p1, p2, a, b) in ox_case()) {
            let n = p1.len();
            let (c1, c2) = order_crossover_with_cuts(&p1, &p2, a, b);
            prop_assert!(is_permutation(&c1, n));
            prop_assert!(is_permutation(&c2, n));

            let (lo, hi) = (a.min(b), a.max(b));
            prop_assert_eq!(&c1[lo..=hi], &p1[lo..=hi]);
            prop_assert_eq!(&c2[lo..=hi], &p2[lo..=hi]);
        }

        #[test]
        fn prop_single_point_preserves_length(
            (p1, p2, cut) in (1usize..64).prop_flat_map(|n| (
                proptest::collection::vec(any::<bool>(), n),
                proptest::collection::vec(any::<bool>(), n),
                0..=n,
            ))
        ) {
            let (c1, c2) = single_point_crossover_at(&p1, &p2, cut);
            prop_assert_eq!(c1.len(), p1.len());
            prop_assert_eq!(c2.len(), p2.len());
            // Every position keeps one of the two parental alleles.
            for i in 0..p1.len() {
                prop_assert!(c1[i] == p1[i] || c1[i] == p2[i]);
                prop_assert_eq!(c1[i] ^ c2[i], p1[i] ^ p2[i]);
            }
        }
    }
}
