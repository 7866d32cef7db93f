// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use core::iter::FromIterator;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Formatter;

use crate::value::Value;

/// Order of object keys in the sorted key index: shorter keys first,
/// keys of equal length by their bytes.
#[inline]
pub fn key_cmp(k1: &str, k2: &str) -> Ordering {
    k1.len()
        .cmp(&k2.len())
        .then_with(|| k1.as_bytes().cmp(k2.as_bytes()))
}

/// The entries of a JSON object.
///
/// Entries are kept in insertion order, which is the order used for
/// iteration, equality and emission. A second structure, the key index,
/// holds the entry positions sorted by [`key_cmp`] so that lookups are a
/// binary search. The binary encoding stores the same index next to the
/// entries.
///
/// An `Object` is immutable once built. Duplicate keys are resolved while
/// building: the entry stays at the position of the first occurrence and
/// takes the value of the last one.
#[derive(Clone, Default)]
pub struct Object {
    entries: Vec<(String, Value)>,
    index: Vec<u32>,
}

impl Object {
    pub fn new() -> Object {
        Object::default()
    }

    /// Builds an object from entries in insertion order.
    pub fn from_entries(mut entries: Vec<(String, Value)>) -> Object {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        // stable, so duplicates stay in insertion order
        order.sort_by(|&a, &b| key_cmp(&entries[a].0, &entries[b].0));

        let mut dropped = vec![false; entries.len()];
        let mut has_dup = false;
        let mut i = 0;
        while i < order.len() {
            let mut j = i + 1;
            while j < order.len() && entries[order[j]].0 == entries[order[i]].0 {
                j += 1;
            }
            if j - i > 1 {
                has_dup = true;
                let last = std::mem::take(&mut entries[order[j - 1]].1);
                entries[order[i]].1 = last;
                for &pos in &order[i + 1..j] {
                    dropped[pos] = true;
                }
            }
            i = j;
        }

        if !has_dup {
            let index = order.into_iter().map(|pos| pos as u32).collect();
            return Object { entries, index };
        }

        let mut new_pos = vec![0u32; entries.len()];
        let mut kept = Vec::with_capacity(entries.len());
        for (pos, entry) in entries.into_iter().enumerate() {
            if !dropped[pos] {
                new_pos[pos] = kept.len() as u32;
                kept.push(entry);
            }
        }
        let index = order
            .into_iter()
            .filter(|pos| !dropped[*pos])
            .map(|pos| new_pos[pos])
            .collect();
        Object {
            entries: kept,
            index,
        }
    }

    /// Assembles an object from already validated parts.
    /// `index` must be the sorted key index of `entries`.
    pub(crate) fn from_parts(entries: Vec<(String, Value)>, index: Vec<u32>) -> Object {
        debug_assert_eq!(entries.len(), index.len());
        Object { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a key with a binary search over the key index.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the insertion position of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index
            .binary_search_by(|pos| key_cmp(&self.entries[*pos as usize].0, key))
            .ok()
            .map(|i| self.index[i] as usize)
    }

    /// Returns the entry at insertion position `pos`.
    pub fn get_index(&self, pos: usize) -> Option<(&str, &Value)> {
        self.entries.get(pos).map(|(k, v)| (k.as_str(), v))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Entries in key index order.
    pub fn sorted_iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.index.iter().map(|pos| {
            let (k, v) = &self.entries[*pos as usize];
            (k.as_str(), v)
        })
    }

    pub(crate) fn key_index(&self) -> &[u32] {
        &self.index
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Object {}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Object::from_entries(entries)
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
