// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combinatorial number system.
//!
//! Maps an integer `p` in `0..nck(n, k)` to the p-th k-combination of a slice
//! without generating the combinations that come before it (see Theorem L pg.
//! 260 Knuth 4a), used to enumerate boards, draws and hole cards subsets.
use crate::{Error, Result};

/// Largest n supported by the binomial table.
pub const MAX_N: usize = 52;

/// Creates table for nck(n, k) for n <= 52 and k <= 52.
const fn make_nck() -> [[u64; MAX_N + 1]; MAX_N + 1] {
    let mut t = [[0u64; MAX_N + 1]; MAX_N + 1];
    let mut n = 0;

    while n <= MAX_N {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

static NCKS: [[u64; MAX_N + 1]; MAX_N + 1] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Fails with [Error::CombinatoricOverflow] if n or k are larger than 52 or if
/// the coefficient doesn't fit in a `u32` combinations counter.
pub fn binomial(n: usize, k: usize) -> Result<u32> {
    if n > MAX_N || k > MAX_N {
        return Err(Error::CombinatoricOverflow { n, k });
    }

    u32::try_from(NCKS[n][k]).map_err(|_| Error::CombinatoricOverflow { n, k })
}

/// Table lookup for the hot loops, n must be at most 52.
#[inline]
pub(crate) fn nck(n: usize, k: usize) -> usize {
    assert!(n <= MAX_N, "n={n} must be 0 <= n <= 52");

    if k > n { 0 } else { NCKS[n][k] as usize }
}

/// Writes the p-th k-combination of `source` into `dest` starting at `offset`.
///
/// For a fixed source enumerating p from 0 to `nck(source.len(), k) - 1`
/// visits every k-combination exactly once, the elements of each combination
/// keep the source order.
///
/// Panics if p is out of range or `dest` has less than `offset + k` slots.
pub fn kth_combination<T: Copy>(
    k: usize,
    mut p: usize,
    source: &[T],
    dest: &mut [T],
    offset: usize,
) {
    assert!(
        p < nck(source.len(), k),
        "p={p} out of range for {} choose {k}",
        source.len()
    );

    // For each digit, starting at the last, find the smallest a such that
    // nck(a, b) > p, then a - 1 is the largest coefficient that fits p.
    for b in (1..=k).rev() {
        let mut a = b;
        while nck(a, b) <= p {
            a += 1;
        }

        p -= nck(a - 1, b);
        dest[offset + b - 1] = source[a - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn test_binomial() {
        // For n < k = 0
        assert_eq!(binomial(2, 3), Ok(0));
        assert_eq!(binomial(0, 0), Ok(1));

        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(52, k), Ok(v)));

        [1, 47, 1081, 16215, 178365, 1533939]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(47, k), Ok(v)));

        [1, 5, 10, 10, 5, 1, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(binomial(5, k), Ok(v)));

        // Symmetry and the largest value that fits.
        assert_eq!(binomial(52, 9), Ok(3679075400));
        assert_eq!(binomial(52, 43), Ok(3679075400));
    }

    #[test]
    fn test_binomial_overflow() {
        assert_eq!(
            binomial(52, 26),
            Err(Error::CombinatoricOverflow { n: 52, k: 26 })
        );
        assert_eq!(
            binomial(53, 1),
            Err(Error::CombinatoricOverflow { n: 53, k: 1 })
        );
        assert!(binomial(1, 60).is_err());
    }

    #[test]
    fn kth_combination_bijection() {
        for (n, k) in [(5, 0), (5, 5), (12, 4), (20, 3), (47, 2)] {
            let source = (0..n).collect::<Vec<usize>>();
            let count = nck(n, k);

            let mut seen = HashSet::default();
            let mut dest = vec![0; k];
            for p in 0..count {
                kth_combination(k, p, &source, &mut dest, 0);

                // Elements are distinct and keep the source order.
                assert!(dest.windows(2).all(|w| w[0] < w[1]));
                seen.insert(dest.clone());
            }

            assert_eq!(seen.len(), count, "{n} choose {k}");
        }
    }

    #[test]
    fn kth_combination_order() {
        let source = ['a', 'b', 'c', 'd'];
        let mut dest = ['-'; 2];

        let combs = (0..nck(4, 2))
            .map(|p| {
                kth_combination(2, p, &source, &mut dest, 0);
                dest.iter().collect::<String>()
            })
            .collect::<Vec<_>>();

        assert_eq!(combs, ["ab", "ac", "bc", "ad", "bd", "cd"]);
    }

    #[test]
    fn kth_combination_offset() {
        let source = [10, 20, 30, 40, 50];
        let mut dest = [1, 2, 3, 0, 0];

        kth_combination(2, nck(5, 2) - 1, &source, &mut dest, 3);
        assert_eq!(dest, [1, 2, 3, 40, 50]);

        // Choosing nothing leaves the destination untouched.
        kth_combination(0, 0, &source, &mut dest, 5);
        assert_eq!(dest, [1, 2, 3, 40, 50]);
    }

    #[test]
    #[should_panic]
    fn kth_combination_out_of_range() {
        let mut dest = [0; 2];
        kth_combination(2, 6, &[1, 2, 3, 4], &mut dest, 0);
    }
}
