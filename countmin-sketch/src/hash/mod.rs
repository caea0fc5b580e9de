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

//! Mapping arbitrary items onto the sketch's 64-bit signed key space.
//!
//! [`CountMinSketch`](crate::countmin::CountMinSketch) is keyed by `i64`. Callers
//! with strings, byte slices or structured keys can fold them with [`item_key`]
//! first. The mapping is stable across processes, so keys computed in one place
//! can be queried in another.

use std::hash::Hash;

/// Default seed for hashing items, shared with the Apache DataSketches family.
pub const DEFAULT_UPDATE_SEED: u32 = 9001;

/// Maps a hashable item to a 64-bit signed sketch key using MurmurHash3 x64 128.
///
/// # Examples
///
/// ```
/// use countmin_sketch::hash::item_key;
///
/// assert_eq!(item_key("apple"), item_key("apple"));
/// assert_ne!(item_key("apple"), item_key("banana"));
/// ```
pub fn item_key<T: Hash + ?Sized>(item: &T) -> i64 {
    item_key_with_seed(item, DEFAULT_UPDATE_SEED)
}

/// Same as [`item_key`] with an explicit hash seed.
pub fn item_key_with_seed<T: Hash + ?Sized>(item: &T, seed: u32) -> i64 {
    let mut hasher = mur3::Hasher128::with_seed(seed);
    item.hash(&mut hasher);
    let (lo, _) = hasher.finish128();
    lo as i64
}

/// Folds raw bytes into a sketch key without going through [`Hash`], which
/// would prefix slices with their length.
pub fn bytes_key(bytes: &[u8], seed: u32) -> i64 {
    let (lo, _) = mur3::murmurhash3_x64_128(bytes, seed);
    lo as i64
}
