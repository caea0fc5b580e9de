// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::common::RandomSource;

/// 2^31 - 1, the Mersenne prime the row hashes reduce by.
pub(super) const MOD: i64 = 2147483647;
pub(super) const HL: u32 = 31;

/// One row's hash function, `((a * x + b) folded mod 2^31 - 1) mod width`.
///
/// The coefficients are drawn once and never change, so a key always lands in
/// the same column of the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PairwiseHash {
    a: i64,
    b: i64,
}

impl PairwiseHash {
    pub(super) fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Draws the multiplicative term first, then the additive term.
    pub(super) fn random<R: RandomSource>(rng: &mut R) -> Self {
        let a = rng.next_i63();
        let b = rng.next_i63();
        Self::new(a, b)
    }

    /// Hashes `x` into `[0, 2^31 - 1]`.
    ///
    /// Both the product and the fold wrap on overflow, and `>>` sign-extends.
    #[inline]
    pub(super) fn hash31(&self, x: i64) -> i64 {
        let t = self.a.wrapping_mul(x).wrapping_add(self.b);
        (t >> HL).wrapping_add(t) & MOD
    }

    #[inline]
    pub(super) fn bucket(&self, x: i64, width: usize) -> usize {
        (self.hash31(x) as u64 % width as u64) as usize
    }
}

/// Draws `depth` independent row hashes.
pub(super) fn hash_family<R: RandomSource>(depth: usize, rng: &mut R) -> Vec<PairwiseHash> {
    (0..depth).map(|_| PairwiseHash::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::XorShift64;

    #[test]
    fn test_hash31_small_values() {
        assert_eq!(PairwiseHash::new(1, 0).hash31(5), 5);
        assert_eq!(PairwiseHash::new(3, 7).hash31(-1), 4);
        assert_eq!(PairwiseHash::new(0, 12345).hash31(999), 12345);
    }

    #[test]
    fn test_hash31_folds_high_bits() {
        // 2^31 >> 31 == 1, and bit 31 itself is masked away.
        assert_eq!(PairwiseHash::new(1, 0).hash31(1 << 31), 1);
        assert_eq!(PairwiseHash::new(1, 0).hash31(MOD), MOD);
    }

    #[test]
    fn test_hash31_sign_extends_negative_products() {
        // -1 >> 31 == -1, so the fold yields -2 before masking.
        assert_eq!(PairwiseHash::new(1, 0).hash31(-1), 2147483646);
    }

    #[test]
    fn test_hash31_wraps_on_overflow() {
        // i64::MAX * 2 wraps to -2.
        let h = PairwiseHash::new(i64::MAX, 0);
        assert_eq!(h.hash31(2), PairwiseHash::new(1, 0).hash31(-2));
        let h = PairwiseHash::new(i64::MAX, i64::MAX);
        assert!((0..=MOD).contains(&h.hash31(i64::MIN)));
    }

    #[test]
    fn test_bucket_in_range() {
        let mut rng = XorShift64::seeded(17);
        let rows = hash_family(8, &mut rng);
        for row in &rows {
            for x in [-1_000_000, -1, 0, 1, 42, i64::MAX, i64::MIN] {
                assert!(row.bucket(x, 13) < 13);
                assert_eq!(row.bucket(x, 1), 0);
            }
        }
    }

    #[test]
    fn test_family_reproducible_from_seed() {
        let a = hash_family(5, &mut XorShift64::seeded(99));
        let b = hash_family(5, &mut XorShift64::seeded(99));
        let c = hash_family(5, &mut XorShift64::seeded(100));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|h| h.a >= 0 && h.b >= 0));
    }
}
