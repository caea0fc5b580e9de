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

//! Count-Min sketch for frequency estimation over 64-bit signed keys.
//!
//! The sketch keeps a `depth x width` matrix of signed counters. Each row owns
//! a pairwise hash `((a * x + b) mod 2^31 - 1) mod width` whose coefficients are
//! drawn once from a [`RandomSource`](crate::common::RandomSource). Error
//! shrinks with the width (epsilon = e / width) and confidence grows with the
//! depth.
//!
//! Two point estimators are offered:
//!
//! - [`CountMinSketch::point_est`] takes the row minimum. It never
//!   underestimates when every update is non-negative.
//! - [`CountMinSketch::point_med`] takes the row median (lower middle for even
//!   depth). Use it when updates may be negative.
//!
//! # Usage
//!
//! ```rust
//! use countmin_sketch::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(2_000_000, 7).unwrap();
//!
//! sketch.update(42, 5);
//! sketch.update(42, 3);
//! sketch.update(7, 1);
//!
//! assert_eq!(sketch.point_est(42), 8);
//! assert_eq!(sketch.point_est(7), 1);
//! assert_eq!(sketch.total_count(), 9);
//! ```
//!
//! # Negative Updates
//!
//! ```rust
//! use countmin_sketch::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(2_000_000, 9).unwrap();
//! sketch.update(1, 10);
//! sketch.update(1, -4);
//! assert_eq!(sketch.point_med(1), 6);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! use countmin_sketch::countmin::CountMinSketch;
//!
//! let width = CountMinSketch::suggest_width(0.01);
//! let depth = CountMinSketch::suggest_depth(0.99);
//!
//! let _sketch = CountMinSketch::new(width, depth).unwrap();
//! ```

mod builder;
mod hash_family;
mod sketch;

pub use self::builder::CountMinSketchBuilder;
pub use self::sketch::CountMinSketch;
