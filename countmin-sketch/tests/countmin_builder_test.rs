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

use std::error::Error as _;

use countmin_sketch::common::XorShift64;
use countmin_sketch::countmin::CountMinSketch;
use countmin_sketch::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::contains_substring;

#[test]
fn test_zero_width_rejected() {
    let err = CountMinSketch::new(0, 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.message(), contains_substring("width"));
    assert_eq!(err.context("width"), Some("0"));
}

#[test]
fn test_zero_depth_rejected() {
    let err = CountMinSketch::with_rng(100, 0, &mut XorShift64::seeded(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.message(), contains_substring("depth"));
}

#[test]
fn test_oversized_matrix_rejected() {
    let err = CountMinSketch::new(usize::MAX, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.message(), contains_substring("overflows"));

    let err = CountMinSketch::new(usize::MAX / 4, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.message(), contains_substring("cannot allocate"));
    assert!(err.source().is_some());
}

#[test]
fn test_builder_requires_dimensions() {
    let err = CountMinSketch::builder().build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_that!(err.message(), contains_substring("with_accuracy() or with_size()"));
}

#[test]
fn test_builder_rejects_out_of_range_accuracy() {
    for (epsilon, confidence, field) in [
        (0.0, 0.9, "epsilon"),
        (1.0, 0.9, "epsilon"),
        (-0.1, 0.9, "epsilon"),
        (0.01, 0.0, "confidence"),
        (0.01, 1.0, "confidence"),
    ] {
        let err = CountMinSketch::builder()
            .with_accuracy(epsilon, confidence)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        let rendered = err.to_string();
        assert_that!(rendered.as_str(), contains_substring(field));
    }
}

#[test]
fn test_builder_propagates_invalid_size() {
    let err = CountMinSketch::builder().with_size(10, 0).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_builder_with_rng_matches_direct_construction() {
    let built = CountMinSketch::builder()
        .with_size(300, 4)
        .build_with_rng(&mut XorShift64::seeded(11))
        .unwrap();
    let direct = CountMinSketch::with_rng(300, 4, &mut XorShift64::seeded(11)).unwrap();
    assert_eq!(built, direct);
}

#[test]
fn test_suggestions() {
    assert_eq!(CountMinSketch::suggest_width(0.01), 272);
    assert_eq!(CountMinSketch::suggest_width(0.5), 6);
    assert_eq!(CountMinSketch::suggest_depth(0.99), 5);
    assert_eq!(CountMinSketch::suggest_depth(0.5), 1);
    assert_eq!(CountMinSketch::suggest_depth(1e-20), 1);
}

#[test]
#[should_panic(expected = "epsilon must be between")]
fn test_suggest_width_panics_out_of_range() {
    CountMinSketch::suggest_width(2.0);
}

#[test]
fn test_accuracy_holds_on_skewed_stream() {
    let epsilon = 0.01;
    let mut sketch = CountMinSketch::builder()
        .with_accuracy(epsilon, 0.99)
        .build_with_rng(&mut XorShift64::seeded(2024))
        .unwrap();

    // item i appears i times
    let mut total = 0;
    for item in 1..=100i64 {
        sketch.update(item, item);
        total += item;
    }

    let slack = (epsilon * total as f64).ceil() as i64;
    let within = (1..=100i64)
        .filter(|item| sketch.point_est(*item) <= item + slack)
        .count();
    assert!(within >= 95, "only {within} estimates within bound");
}
