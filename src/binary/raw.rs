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

use std::cmp::Ordering;

use byteorder::BigEndian;
use byteorder::ByteOrder;

use super::constants::*;
use super::de::Decoder;
use super::iterator::ArrayIterator;
use super::iterator::ObjectIterator;
use super::ser::ValueEntry;
use crate::error::DecodeErrorCode;
use crate::error::Error;
use crate::error::Result;
use crate::object::key_cmp;
use crate::value::Value;
use crate::value::ValueKind;

/// A borrowed view over a binary encoded value.
///
/// It does not own or copy the underlying data. Container views seek
/// straight to a child through the entry tables, so reading one field of
/// a large document only touches the bytes on the path to it.
///
/// A view does not validate the buffer up front. Every accessor checks the
/// bytes it reads and returns `Error::Decode` on malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawJson<'a> {
    type_code: u8,
    /// The payload, or the entry word for an inlined value.
    data: &'a [u8],
    /// Absolute offset of `data` in the original buffer.
    offset: usize,
}

impl<'a> RawJson<'a> {
    /// Creates a view over a buffer that holds one encoded value.
    pub fn new(buf: &'a [u8]) -> Result<RawJson<'a>> {
        match buf.first() {
            Some(type_code) => Ok(RawJson {
                type_code: *type_code,
                data: &buf[TYPE_CODE_LEN..],
                offset: TYPE_CODE_LEN,
            }),
            None => Err(Error::Decode(
                DecodeErrorCode::Truncated {
                    needed: TYPE_CODE_LEN,
                    available: 0,
                },
                0,
            )),
        }
    }

    /// The type code of the viewed value, including the inline flag for
    /// values stored in an entry.
    pub fn type_code(&self) -> u8 {
        self.type_code
    }

    pub fn kind(&self) -> Result<ValueKind> {
        match self.type_code {
            TYPE_LITERAL => match self.read_u8(0)? {
                LITERAL_NULL => Ok(ValueKind::Null),
                LITERAL_TRUE | LITERAL_FALSE => Ok(ValueKind::Bool),
                literal => Err(self.error(DecodeErrorCode::UnknownLiteral(literal), 0)),
            },
            TYPE_INT64 | TYPE_INLINE_INT64 => Ok(ValueKind::Int),
            TYPE_DOUBLE => Ok(ValueKind::Double),
            TYPE_STRING => Ok(ValueKind::String),
            TYPE_ARRAY => Ok(ValueKind::Array),
            TYPE_OBJECT => Ok(ValueKind::Object),
            type_code => Err(self.error(DecodeErrorCode::UnknownTypeCode(type_code), 0)),
        }
    }

    /// Number of elements of an array or entries of an object,
    /// `None` for scalars.
    pub fn container_len(&self) -> Result<Option<usize>> {
        match self.type_code {
            TYPE_ARRAY | TYPE_OBJECT => Ok(Some(self.read_u32(0)? as usize)),
            _ => Ok(None),
        }
    }

    /// Returns the element at `index` of an array. `None` if the value is
    /// not an array or the index is out of bounds.
    pub fn get_by_index(&self, index: usize) -> Result<Option<RawJson<'a>>> {
        if self.type_code != TYPE_ARRAY {
            return Ok(None);
        }
        let count = self.read_u32(0)? as usize;
        if index >= count {
            return Ok(None);
        }
        let entry_pos = CONTAINER_HEADER_LEN + index * VALUE_ENTRY_LEN;
        self.child_at(entry_pos).map(Some)
    }

    /// Looks up a key of an object with a binary search over the sorted
    /// key index. `None` if the value is not an object or has no such key.
    pub fn get_by_key(&self, key: &str) -> Result<Option<RawJson<'a>>> {
        if self.type_code != TYPE_OBJECT {
            return Ok(None);
        }
        let count = self.read_u32(0)? as usize;
        let sort_index_pos = CONTAINER_HEADER_LEN + count * (KEY_ENTRY_LEN + VALUE_ENTRY_LEN);

        let mut low = 0;
        let mut high = count;
        while low < high {
            let mid = low + (high - low) / 2;
            let pos = self.read_u32(sort_index_pos + mid * SORT_INDEX_LEN)? as usize;
            if pos >= count {
                return Err(self.error(
                    DecodeErrorCode::InvalidKeyIndex(pos),
                    sort_index_pos + mid * SORT_INDEX_LEN,
                ));
            }
            match key_cmp(self.read_key(pos)?, key) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return self.object_value_at(count, pos).map(Some),
            }
        }
        Ok(None)
    }

    /// Looks up a key of an object by scanning the keys in stored order.
    pub fn get_by_key_linear(&self, key: &str) -> Result<Option<RawJson<'a>>> {
        if self.type_code != TYPE_OBJECT {
            return Ok(None);
        }
        let count = self.read_u32(0)? as usize;
        for pos in 0..count {
            if self.read_key(pos)? == key {
                return self.object_value_at(count, pos).map(Some);
            }
        }
        Ok(None)
    }

    /// Returns the key at insertion position `index` of an object.
    pub fn key_at(&self, index: usize) -> Result<Option<&'a str>> {
        if self.type_code != TYPE_OBJECT {
            return Ok(None);
        }
        let count = self.read_u32(0)? as usize;
        if index >= count {
            return Ok(None);
        }
        self.read_key(index).map(Some)
    }

    /// Iterates the elements of an array in stored order.
    pub fn array_values(&self) -> Result<Option<ArrayIterator<'a>>> {
        ArrayIterator::new(*self)
    }

    /// Iterates the entries of an object in insertion order.
    pub fn object_entries(&self) -> Result<Option<ObjectIterator<'a>>> {
        ObjectIterator::new(*self)
    }

    pub fn as_null(&self) -> Result<Option<()>> {
        match self.kind()? {
            ValueKind::Null => Ok(Some(())),
            _ => Ok(None),
        }
    }

    pub fn as_bool(&self) -> Result<Option<bool>> {
        match self.kind()? {
            ValueKind::Bool => Ok(Some(self.read_u8(0)? == LITERAL_TRUE)),
            _ => Ok(None),
        }
    }

    pub fn as_i64(&self) -> Result<Option<i64>> {
        match self.type_code {
            TYPE_INLINE_INT64 => Ok(Some(self.read_u32(0)? as i32 as i64)),
            TYPE_INT64 => {
                let data = self.slice(0, NUMBER_LEN)?;
                Ok(Some(BigEndian::read_i64(data)))
            }
            _ => Ok(None),
        }
    }

    /// Returns the numeric value of an integer or a double.
    pub fn as_f64(&self) -> Result<Option<f64>> {
        match self.type_code {
            TYPE_DOUBLE => {
                let data = self.slice(0, NUMBER_LEN)?;
                Ok(Some(BigEndian::read_f64(data)))
            }
            _ => Ok(self.as_i64()?.map(|v| v as f64)),
        }
    }

    pub fn as_str(&self) -> Result<Option<&'a str>> {
        if self.type_code != TYPE_STRING {
            return Ok(None);
        }
        let len = self.read_u32(0)? as usize;
        self.read_str(LENGTH_LEN, len).map(Some)
    }

    /// Decodes the viewed value.
    ///
    /// Only the bytes of the viewed value are read and validated, bytes
    /// that follow it in the buffer are not checked.
    pub fn to_value(&self) -> Result<Value> {
        match self.type_code {
            TYPE_INLINE_INT64 => Ok(Value::Int(self.read_u32(0)? as i32 as i64)),
            type_code => {
                let mut decoder = Decoder::with_base(self.data, self.offset);
                let (value, _) = decoder.decode_payload(type_code, 0, 0)?;
                Ok(value)
            }
        }
    }

    fn error(&self, code: DecodeErrorCode, pos: usize) -> Error {
        Error::Decode(code, self.offset + pos)
    }

    fn slice(&self, pos: usize, len: usize) -> Result<&'a [u8]> {
        match pos.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(&self.data[pos..end]),
            _ => Err(self.error(
                DecodeErrorCode::Truncated {
                    needed: len,
                    available: self.data.len().saturating_sub(pos),
                },
                pos,
            )),
        }
    }

    fn read_u8(&self, pos: usize) -> Result<u8> {
        let data = self.slice(pos, 1)?;
        Ok(data[0])
    }

    pub(crate) fn read_u32(&self, pos: usize) -> Result<u32> {
        let data = self.slice(pos, LENGTH_LEN)?;
        Ok(BigEndian::read_u32(data))
    }

    fn read_str(&self, pos: usize, len: usize) -> Result<&'a str> {
        let data = self.slice(pos, len)?;
        std::str::from_utf8(data).map_err(|_| self.error(DecodeErrorCode::InvalidUtf8, pos))
    }

    // Key of the entry at insertion position `pos` of an object.
    pub(crate) fn read_key(&self, pos: usize) -> Result<&'a str> {
        let key_entry_pos = CONTAINER_HEADER_LEN + pos * KEY_ENTRY_LEN;
        let offset = self.read_u32(key_entry_pos)? as usize;
        let len = self.read_u32(key_entry_pos + LENGTH_LEN)? as usize;
        self.read_str(offset, len)
    }

    pub(crate) fn object_value_at(&self, count: usize, pos: usize) -> Result<RawJson<'a>> {
        let entry_pos = CONTAINER_HEADER_LEN + count * KEY_ENTRY_LEN + pos * VALUE_ENTRY_LEN;
        self.child_at(entry_pos)
    }

    // View of the value described by the entry at `entry_pos`. An inlined
    // value is viewed through its entry word, any other value through its
    // payload, bounded by the declared size of this container.
    pub(crate) fn child_at(&self, entry_pos: usize) -> Result<RawJson<'a>> {
        let bytes = self.slice(entry_pos, VALUE_ENTRY_LEN)?;
        let entry = ValueEntry::new(bytes[0], BigEndian::read_u32(&bytes[TYPE_CODE_LEN..]));
        let type_code = entry.type_code;
        let word_pos = entry_pos + TYPE_CODE_LEN;
        if entry.is_inline() {
            return Ok(RawJson {
                type_code,
                data: &bytes[TYPE_CODE_LEN..],
                offset: self.offset + word_pos,
            });
        }

        let offset = entry.word as usize;
        let size = self.read_u32(LENGTH_LEN)? as usize;
        if size > self.data.len() {
            return Err(self.error(
                DecodeErrorCode::Truncated {
                    needed: size,
                    available: self.data.len(),
                },
                0,
            ));
        }
        if offset >= size {
            return Err(self.error(
                DecodeErrorCode::InvalidContainerSize(size),
                word_pos,
            ));
        }
        Ok(RawJson {
            type_code,
            data: &self.data[offset..size],
            offset: self.offset + offset,
        })
    }
}

impl<'a> TryFrom<&'a [u8]> for RawJson<'a> {
    type Error = Error;

    fn try_from(buf: &'a [u8]) -> Result<Self> {
        RawJson::new(buf)
    }
}
