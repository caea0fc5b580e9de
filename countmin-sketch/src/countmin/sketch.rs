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

use std::fmt;

use crate::common::RandomSource;
use crate::common::XorShift64;
use crate::countmin::CountMinSketchBuilder;
use crate::countmin::hash_family::PairwiseHash;
use crate::countmin::hash_family::hash_family;
use crate::error::Error;
use crate::error::ErrorKind;

/// A Count-Min sketch over 64-bit signed keys with signed counters.
///
/// The sketch is a `depth x width` matrix of counters plus one pairwise hash
/// per row. Every [`update`](Self::update) adds its delta to exactly one cell
/// per row, and the point queries read the same cells back.
///
/// Mutation requires `&mut self`; sharing a sketch across threads needs an
/// outer lock.
#[derive(Clone, PartialEq)]
pub struct CountMinSketch {
    width: usize,
    depth: usize,
    total_count: i64,
    /// Row-major, `depth * width` cells.
    counters: Vec<i64>,
    hashes: Vec<PairwiseHash>,
}

impl CountMinSketch {
    /// Creates a sketch with `width` columns and `depth` rows, drawing the hash
    /// coefficients from a freshly seeded [`XorShift64`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if `width` or `depth` is zero, or
    /// if the counter matrix cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use countmin_sketch::countmin::CountMinSketch;
    ///
    /// let mut sketch = CountMinSketch::new(2048, 5).unwrap();
    /// sketch.update(42, 5);
    /// sketch.update(42, 3);
    /// assert!(sketch.point_est(42) >= 8);
    /// ```
    pub fn new(width: usize, depth: usize) -> Result<Self, Error> {
        Self::with_rng(width, depth, &mut XorShift64::default())
    }

    /// Creates a sketch drawing the hash coefficients from `rng`.
    ///
    /// Two sketches built from identically seeded sources hash every key to the
    /// same cells.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if `width` or `depth` is zero, or
    /// if the counter matrix cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use countmin_sketch::common::XorShift64;
    /// use countmin_sketch::countmin::CountMinSketch;
    ///
    /// let a = CountMinSketch::with_rng(1024, 4, &mut XorShift64::seeded(7)).unwrap();
    /// let b = CountMinSketch::with_rng(1024, 4, &mut XorShift64::seeded(7)).unwrap();
    /// assert_eq!(a.bucket(2, 99), b.bucket(2, 99));
    /// ```
    pub fn with_rng<R: RandomSource>(
        width: usize,
        depth: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if width == 0 {
            return Err(Error::new(ErrorKind::InvalidArgument, "width must be at least 1")
                .with_context("width", width)
                .with_context("depth", depth));
        }
        if depth == 0 {
            return Err(Error::new(ErrorKind::InvalidArgument, "depth must be at least 1")
                .with_context("width", width)
                .with_context("depth", depth));
        }

        let cells = width.checked_mul(depth).ok_or_else(|| {
            Error::new(ErrorKind::InvalidArgument, "counter matrix size overflows usize")
                .with_context("width", width)
                .with_context("depth", depth)
        })?;
        let mut counters = Vec::new();
        counters.try_reserve_exact(cells).map_err(|err| {
            Error::new(ErrorKind::InvalidArgument, "cannot allocate counter matrix")
                .with_context("width", width)
                .with_context("depth", depth)
                .set_source(err)
        })?;
        counters.resize(cells, 0);

        let hashes = hash_family(depth, rng);
        log::debug!("created count-min sketch: width={width}, depth={depth}");

        Ok(Self {
            width,
            depth,
            total_count: 0,
            counters,
            hashes,
        })
    }

    /// Returns a builder for creating a sketch from explicit dimensions or an
    /// accuracy target.
    ///
    /// # Examples
    ///
    /// ```
    /// use countmin_sketch::countmin::CountMinSketch;
    ///
    /// let sketch = CountMinSketch::builder()
    ///     .with_accuracy(0.001, 0.99)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(sketch.width(), 2719);
    /// assert_eq!(sketch.depth(), 5);
    /// ```
    pub fn builder() -> CountMinSketchBuilder {
        CountMinSketchBuilder::default()
    }

    /// Suggests the number of columns for a target relative error `epsilon`:
    /// `ceil(e / epsilon)`.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` is not in (0.0, 1.0).
    pub fn suggest_width(epsilon: f64) -> usize {
        assert!(
            epsilon > 0.0 && epsilon < 1.0,
            "epsilon must be between 0.0 and 1.0 (exclusive)"
        );
        (std::f64::consts::E / epsilon).ceil() as usize
    }

    /// Suggests the number of rows so that the error bound holds with
    /// probability `confidence`: `ceil(ln(1 / (1 - confidence)))`, at least 1.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in (0.0, 1.0).
    pub fn suggest_depth(confidence: f64) -> usize {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be between 0.0 and 1.0 (exclusive)"
        );
        ((1.0 / (1.0 - confidence)).ln().ceil() as usize).max(1)
    }

    /// Adds `diff` to the item's cell in every row and to the running total.
    ///
    /// `diff` may be negative; after negative updates prefer
    /// [`point_med`](Self::point_med) over [`point_est`](Self::point_est).
    /// Counters wrap on overflow.
    pub fn update(&mut self, item: i64, diff: i64) {
        self.total_count = self.total_count.wrapping_add(diff);
        for (row, hash) in self.hashes.iter().enumerate() {
            let cell = &mut self.counters[row * self.width + hash.bucket(item, self.width)];
            *cell = cell.wrapping_add(diff);
        }
    }

    /// Estimates the summed `diff` of `query` as the minimum over all rows.
    ///
    /// With non-negative updates this never underestimates: collisions only add
    /// mass, so every row reads at least the true count.
    pub fn point_est(&self, query: i64) -> i64 {
        self.readouts(query).min().unwrap_or_default()
    }

    /// Estimates the summed `diff` of `query` as the median over all rows.
    ///
    /// For an even depth the lower of the two middle readouts is returned. With
    /// a single row this equals [`point_est`](Self::point_est).
    pub fn point_med(&self, query: i64) -> i64 {
        let mut values: Vec<i64> = self.readouts(query).collect();
        let mid = (values.len() - 1) / 2;
        let (_, median, _) = values.select_nth_unstable(mid);
        *median
    }

    /// Returns the point estimate as a lower bound for a non-negative stream.
    pub fn lower_bound(&self, query: i64) -> i64 {
        self.point_est(query)
    }

    /// Returns `point_est(query) + ceil(relative_error * total_count)`.
    ///
    /// With probability set by the depth, the true count of a non-negative
    /// stream lies between [`lower_bound`](Self::lower_bound) and this value.
    pub fn upper_bound(&self, query: i64) -> i64 {
        let slack = (self.relative_error() * self.total_count.max(0) as f64).ceil() as i64;
        self.point_est(query).saturating_add(slack)
    }

    /// Returns the relative error epsilon implied by the width, `e / width`.
    pub fn relative_error(&self) -> f64 {
        std::f64::consts::E / self.width as f64
    }

    /// Zeroes every counter and the running total.
    ///
    /// The hash coefficients are kept, so keys map to the same cells as before.
    pub fn reset(&mut self) {
        self.counters.fill(0);
        self.total_count = 0;
        log::debug!(
            "reset count-min sketch: width={}, depth={}",
            self.width,
            self.depth
        );
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the sum of every `diff` applied since creation or the last reset.
    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    /// Returns true if every counter is zero.
    ///
    /// Updates that cancel out leave the sketch empty again.
    pub fn is_empty(&self) -> bool {
        self.counters.iter().all(|&c| c == 0)
    }

    /// Returns the column `item` maps to in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= depth`.
    pub fn bucket(&self, row: usize, item: i64) -> usize {
        self.hashes[row].bucket(item, self.width)
    }

    /// Returns the counters of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= depth`.
    pub fn row(&self, row: usize) -> &[i64] {
        assert!(row < self.depth, "row {row} out of range for depth {}", self.depth);
        let start = row * self.width;
        &self.counters[start..start + self.width]
    }

    fn readouts(&self, query: i64) -> impl Iterator<Item = i64> + '_ {
        self.hashes
            .iter()
            .enumerate()
            .map(move |(row, hash)| self.counters[row * self.width + hash.bucket(query, self.width)])
    }
}

impl fmt::Debug for CountMinSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountMinSketch")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("total_count", &self.total_count)
            .finish_non_exhaustive()
    }
}
