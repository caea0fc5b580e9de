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

//! Example demonstrating Count-Min sketch usage on a word stream

use std::collections::HashMap;

use countmin_sketch::countmin::CountMinSketch;
use countmin_sketch::error::Error;
use countmin_sketch::hash::item_key;

const TEXT: &str = "the quick brown fox jumps over the lazy dog the dog barks \
    and the fox runs the end of the story is near the fox and the dog";

fn main() -> Result<(), Error> {
    println!("=== Count-Min Sketch Example ===\n");

    // Example 1: Point estimates next to exact counts
    println!("1. Word counts:");
    let mut sketch = CountMinSketch::builder().with_accuracy(0.05, 0.95).build()?;
    let mut exact: HashMap<&str, i64> = HashMap::new();
    for word in TEXT.split_whitespace() {
        sketch.update(item_key(word), 1);
        *exact.entry(word).or_default() += 1;
    }

    let mut words: Vec<_> = exact.iter().collect();
    words.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    println!(
        "   width={} depth={} epsilon={:.4}",
        sketch.width(),
        sketch.depth(),
        sketch.relative_error()
    );
    for (word, count) in words.iter().take(5) {
        let key = item_key(*word);
        println!(
            "   {word:<6} exact={count:<3} point_est={:<3} upper_bound={}",
            sketch.point_est(key),
            sketch.upper_bound(key)
        );
    }
    println!();

    // Example 2: Retractions call for the median estimator
    println!("2. Negative updates:");
    let mut sketch = CountMinSketch::new(2_000_000, 9)?;
    sketch.update(1, 10);
    sketch.update(1, -4);
    println!("   point_med(1) = {}", sketch.point_med(1));
    println!("   total_count  = {}", sketch.total_count());
    println!();

    Ok(())
}
