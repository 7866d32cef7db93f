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

use byteorder::BigEndian;
use byteorder::ByteOrder;

use super::constants::*;
use crate::object::Object;
use crate::value::Value;

/// Encodes a `Value` into a new buffer.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    Encoder::new(&mut buf).encode(value);
    buf
}

/// A value entry of an array or object: a type code and a 4-byte word that
/// holds either the value itself or the offset of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValueEntry {
    pub(crate) type_code: u8,
    pub(crate) word: u32,
}

impl ValueEntry {
    pub(crate) fn new(type_code: u8, word: u32) -> ValueEntry {
        ValueEntry { type_code, word }
    }

    pub(crate) fn literal(literal: u8) -> ValueEntry {
        ValueEntry::new(TYPE_LITERAL, (literal as u32) << 24)
    }

    pub(crate) fn inline_int(v: i32) -> ValueEntry {
        ValueEntry::new(TYPE_INLINE_INT64, v as u32)
    }

    pub(crate) fn is_inline(&self) -> bool {
        self.type_code == TYPE_LITERAL || self.type_code & INLINE_FLAG != 0
    }
}

pub(crate) fn type_code(value: &Value) -> u8 {
    match value {
        Value::Null | Value::Bool(_) => TYPE_LITERAL,
        Value::Int(_) => TYPE_INT64,
        Value::Double(_) => TYPE_DOUBLE,
        Value::String(_) => TYPE_STRING,
        Value::Array(_) => TYPE_ARRAY,
        Value::Object(_) => TYPE_OBJECT,
    }
}

// Lengths and offsets are stored as `u32`, so a single string or container
// payload is limited to 4 GiB.
#[inline]
fn len_u32(len: usize) -> u32 {
    debug_assert!(
        len <= u32::MAX as usize,
        "length {len} does not fit in 32 bits"
    );
    len as u32
}

fn literal(value: &Value) -> Option<u8> {
    match value {
        Value::Null => Some(LITERAL_NULL),
        Value::Bool(true) => Some(LITERAL_TRUE),
        Value::Bool(false) => Some(LITERAL_FALSE),
        _ => None,
    }
}

/// Writes the binary encoding of a `Value` to the end of a buffer.
///
/// The encoder works in a single pass. Container headers and entry tables
/// are reserved first and patched once the sizes and offsets of the nested
/// payloads are known.
pub struct Encoder<'a> {
    pub buf: &'a mut Vec<u8>,
}

impl<'a> Encoder<'a> {
    pub fn new(buf: &'a mut Vec<u8>) -> Encoder<'a> {
        Self { buf }
    }

    // Encoded value consists of a type code and the payload of the value
    pub fn encode(&mut self, value: &Value) {
        self.buf.push(type_code(value));
        self.encode_payload(value);
    }

    fn encode_payload(&mut self, value: &Value) {
        match value {
            Value::Null | Value::Bool(_) => {
                if let Some(literal) = literal(value) {
                    self.buf.push(literal);
                }
            }
            Value::Int(v) => {
                let index = self.reserve(NUMBER_LEN);
                BigEndian::write_i64(&mut self.buf[index..index + NUMBER_LEN], *v);
            }
            Value::Double(v) => {
                let index = self.reserve(NUMBER_LEN);
                BigEndian::write_f64(&mut self.buf[index..index + NUMBER_LEN], *v);
            }
            Value::String(s) => {
                self.write_u32(len_u32(s.len()));
                self.buf.extend_from_slice(s.as_bytes());
            }
            Value::Array(values) => self.encode_array(values),
            Value::Object(obj) => self.encode_object(obj),
        }
    }

    // Encoded `Array` consists of a header, N value entries and the payloads
    // of the values that are not inlined
    fn encode_array(&mut self, values: &[Value]) {
        let start = self.buf.len();
        self.write_u32(len_u32(values.len()));
        let size_index = self.reserve(LENGTH_LEN);

        let mut entry_index = self.reserve(values.len() * VALUE_ENTRY_LEN);
        for value in values {
            let entry = self.encode_entry(value, start);
            self.replace_value_entry(entry, &mut entry_index);
        }

        let size = self.buf.len() - start;
        self.replace_u32(len_u32(size), size_index);
    }

    // Encoded `Object` consists of a header, N key entries, N value entries,
    // the sorted key index, the keys and the payloads of the values that are
    // not inlined
    fn encode_object(&mut self, obj: &Object) {
        let start = self.buf.len();
        self.write_u32(len_u32(obj.len()));
        let size_index = self.reserve(LENGTH_LEN);

        let mut key_index = self.reserve(obj.len() * KEY_ENTRY_LEN);
        let mut entry_index = self.reserve(obj.len() * VALUE_ENTRY_LEN);
        for pos in obj.key_index() {
            self.write_u32(*pos);
        }

        // encode all keys first
        for key in obj.keys() {
            let offset = self.buf.len() - start;
            self.buf.extend_from_slice(key.as_bytes());
            self.replace_u32(len_u32(offset), key_index);
            self.replace_u32(len_u32(key.len()), key_index + LENGTH_LEN);
            key_index += KEY_ENTRY_LEN;
        }
        // encode all values
        for value in obj.values() {
            let entry = self.encode_entry(value, start);
            self.replace_value_entry(entry, &mut entry_index);
        }

        let size = self.buf.len() - start;
        self.replace_u32(len_u32(size), size_index);
    }

    // Literals and 32-bit integers are stored in the entry,
    // other values are appended and referenced by offset
    fn encode_entry(&mut self, value: &Value, start: usize) -> ValueEntry {
        if let Some(literal) = literal(value) {
            return ValueEntry::literal(literal);
        }
        if let Value::Int(v) = value {
            if let Ok(v) = i32::try_from(*v) {
                return ValueEntry::inline_int(v);
            }
        }
        let offset = self.buf.len() - start;
        self.encode_payload(value);
        ValueEntry::new(type_code(value), len_u32(offset))
    }

    fn write_u32(&mut self, v: u32) {
        let index = self.reserve(LENGTH_LEN);
        self.replace_u32(v, index);
    }

    // Reserve space for headers and entries and fill them later,
    // as their content is not known until the nested values are encoded
    fn reserve(&mut self, len: usize) -> usize {
        let old_len = self.buf.len();
        self.buf.resize(old_len + len, 0);
        old_len
    }

    fn replace_u32(&mut self, v: u32, index: usize) {
        BigEndian::write_u32(&mut self.buf[index..index + LENGTH_LEN], v);
    }

    fn replace_value_entry(&mut self, entry: ValueEntry, entry_index: &mut usize) {
        self.buf[*entry_index] = entry.type_code;
        self.replace_u32(entry.word, *entry_index + TYPE_CODE_LEN);
        *entry_index += VALUE_ENTRY_LEN;
    }
}
