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
use crate::common::XorShift64;
use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Dimensions {
    Size { width: usize, depth: usize },
    Accuracy { epsilon: f64, confidence: f64 },
}

/// Builder for [`CountMinSketch`].
///
/// Provides two construction modes:
/// - [`with_accuracy()`](Self::with_accuracy): specify the relative error and
///   the confidence it should hold with
/// - [`with_size()`](Self::with_size): specify columns and rows directly
///
/// Parameters are validated by [`build()`](Self::build), so misconfiguration
/// surfaces as an [`Error`] rather than a panic.
#[derive(Debug, Clone, Default)]
pub struct CountMinSketchBuilder {
    dimensions: Option<Dimensions>,
}

impl CountMinSketchBuilder {
    /// Sizes the sketch so that, with probability `confidence`, every point
    /// estimate of a non-negative stream exceeds the true count by at most
    /// `epsilon * total_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use countmin_sketch::countmin::CountMinSketch;
    /// let sketch = CountMinSketch::builder()
    ///     .with_accuracy(0.01, 0.99)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(sketch.width(), 272);
    /// assert!(sketch.relative_error() <= 0.01);
    /// ```
    pub fn with_accuracy(mut self, epsilon: f64, confidence: f64) -> Self {
        self.dimensions = Some(Dimensions::Accuracy {
            epsilon,
            confidence,
        });
        self
    }

    /// Sets the number of columns and rows directly.
    ///
    /// # Examples
    ///
    /// ```
    /// # use countmin_sketch::countmin::CountMinSketch;
    /// let sketch = CountMinSketch::builder().with_size(1000, 7).build().unwrap();
    /// assert_eq!((sketch.width(), sketch.depth()), (1000, 7));
    /// ```
    pub fn with_size(mut self, width: usize, depth: usize) -> Self {
        self.dimensions = Some(Dimensions::Size { width, depth });
        self
    }

    /// Builds the sketch with a freshly seeded [`XorShift64`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if no dimensions were configured or
    /// the accuracy target is out of range, and [`ErrorKind::InvalidArgument`]
    /// if the resolved dimensions are rejected by [`CountMinSketch::with_rng`].
    pub fn build(self) -> Result<CountMinSketch, Error> {
        self.build_with_rng(&mut XorShift64::default())
    }

    /// Builds the sketch drawing its hash coefficients from `rng`.
    ///
    /// # Errors
    ///
    /// See [`build()`](Self::build).
    pub fn build_with_rng<R: RandomSource>(self, rng: &mut R) -> Result<CountMinSketch, Error> {
        let (width, depth) = self.resolve()?;
        CountMinSketch::with_rng(width, depth, rng)
    }

    fn resolve(self) -> Result<(usize, usize), Error> {
        match self.dimensions {
            None => Err(Error::new(
                ErrorKind::ConfigInvalid,
                "must call with_accuracy() or with_size() before build()",
            )),
            Some(Dimensions::Size { width, depth }) => Ok((width, depth)),
            Some(Dimensions::Accuracy {
                epsilon,
                confidence,
            }) => {
                if !(epsilon > 0.0 && epsilon < 1.0) {
                    return Err(Error::new(
                        ErrorKind::ConfigInvalid,
                        "epsilon must be between 0.0 and 1.0 (exclusive)",
                    )
                    .with_context("epsilon", epsilon));
                }
                if !(confidence > 0.0 && confidence < 1.0) {
                    return Err(Error::new(
                        ErrorKind::ConfigInvalid,
                        "confidence must be between 0.0 and 1.0 (exclusive)",
                    )
                    .with_context("confidence", confidence));
                }
                Ok((
                    CountMinSketch::suggest_width(epsilon),
                    CountMinSketch::suggest_depth(confidence),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_accuracy() {
        let dims = CountMinSketchBuilder::default()
            .with_accuracy(0.001, 0.999)
            .resolve()
            .unwrap();
        assert_eq!(dims, (2719, 7));
    }

    #[test]
    fn test_last_mode_wins() {
        let dims = CountMinSketchBuilder::default()
            .with_accuracy(0.5, 0.5)
            .with_size(10, 3)
            .resolve()
            .unwrap();
        assert_eq!(dims, (10, 3));
    }

    #[test]
    fn test_nan_epsilon_rejected() {
        let err = CountMinSketchBuilder::default()
            .with_accuracy(f64::NAN, 0.9)
            .resolve()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
