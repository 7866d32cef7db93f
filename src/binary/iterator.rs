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

use super::constants::*;
use super::raw::RawJson;
use crate::error::Result;

/// Iterates the elements of an encoded array.
pub struct ArrayIterator<'a> {
    raw: RawJson<'a>,
    entry_offset: usize,
    length: usize,
    index: usize,
}

impl<'a> ArrayIterator<'a> {
    pub(crate) fn new(raw: RawJson<'a>) -> Result<Option<Self>> {
        if raw.type_code() == TYPE_ARRAY {
            let length = raw.read_u32(0)? as usize;
            Ok(Some(Self {
                raw,
                entry_offset: CONTAINER_HEADER_LEN,
                length,
                index: 0,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl<'a> Iterator for ArrayIterator<'a> {
    type Item = Result<RawJson<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.length {
            return None;
        }
        let item = self.raw.child_at(self.entry_offset);
        self.index += 1;
        self.entry_offset += VALUE_ENTRY_LEN;
        Some(item)
    }
}

/// Iterates the entries of an encoded object in insertion order.
pub struct ObjectIterator<'a> {
    raw: RawJson<'a>,
    length: usize,
    index: usize,
}

impl<'a> ObjectIterator<'a> {
    pub(crate) fn new(raw: RawJson<'a>) -> Result<Option<Self>> {
        if raw.type_code() == TYPE_OBJECT {
            let length = raw.read_u32(0)? as usize;
            Ok(Some(Self {
                raw,
                length,
                index: 0,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl<'a> Iterator for ObjectIterator<'a> {
    type Item = Result<(&'a str, RawJson<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.length {
            return None;
        }
        let pos = self.index;
        self.index += 1;
        let key = match self.raw.read_key(pos) {
            Ok(key) => key,
            Err(err) => return Some(Err(err)),
        };
        match self.raw.object_value_at(self.length, pos) {
            Ok(value) => Some(Ok((key, value))),
            Err(err) => Some(Err(err)),
        }
    }
}
