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

//! Random sources used to draw hash coefficients.
//!
//! Sketches never reach for a process-wide generator. Callers pass a
//! [`RandomSource`] in, so a seeded source reproduces the exact same hash
//! family and therefore the exact same counter layout.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

const ZERO_SEED_REPLACEMENT: u64 = 0x9e3779b97f4a7c15;

/// Random number source for sketches.
pub trait RandomSource {
    /// Returns the next random 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniform non-negative value in `[0, 2^63)`.
    fn next_i63(&mut self) -> i64 {
        (self.next_u64() >> 1) as i64
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Xorshift-based random generator for sketch construction.
///
/// # Examples
///
/// ```
/// use countmin_sketch::common::RandomSource;
/// use countmin_sketch::common::XorShift64;
///
/// let mut a = XorShift64::seeded(7);
/// let mut b = XorShift64::seeded(7);
/// assert_eq!(a.next_i63(), b.next_i63());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a new generator using the provided seed.
    ///
    /// A zero seed would lock xorshift at zero forever, so it is replaced by a
    /// fixed non-zero constant.
    pub fn seeded(seed: u64) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::seeded(nanos as u64 ^ (std::process::id() as u64))
    }
}

impl RandomSource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
