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
use super::ser::ValueEntry;
use crate::constants::MAX_NESTING_DEPTH;
use crate::error::DecodeErrorCode;
use crate::error::Error;
use crate::error::Result;
use crate::object::key_cmp;
use crate::object::Object;
use crate::value::Value;

/// Decodes a binary encoded buffer into a `Value`.
///
/// The whole buffer must hold exactly one value. Every offset, length and
/// the sorted key index of each object are checked, so a buffer that was
/// not produced by the encoder is rejected instead of being misread.
pub fn from_slice(buf: &[u8]) -> Result<Value> {
    let mut decoder = Decoder::new(buf);
    let type_code = decoder.read_u8(0)?;
    let (value, end) = decoder.decode_payload(type_code, TYPE_CODE_LEN, 0)?;
    if end != buf.len() {
        return Err(Error::Decode(
            DecodeErrorCode::TrailingBytes(buf.len() - end),
            end,
        ));
    }
    Ok(value)
}

/// Same as [`from_slice`].
pub fn decode(buf: &[u8]) -> Result<Value> {
    from_slice(buf)
}

/// Validating decoder over an encoded buffer.
///
/// Positions are absolute in `buf`; `base` is added to every reported
/// offset so that errors from a sub-region still point into the original
/// buffer.
pub(crate) struct Decoder<'a> {
    buf: &'a [u8],
    base: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Decoder<'a> {
        Self::with_base(buf, 0)
    }

    pub(crate) fn with_base(buf: &'a [u8], base: usize) -> Decoder<'a> {
        Self {
            buf,
            base,
            depth: 0,
        }
    }

    fn error(&self, code: DecodeErrorCode, pos: usize) -> Error {
        Error::Decode(code, self.base + pos)
    }

    fn slice(&self, pos: usize, len: usize) -> Result<&'a [u8]> {
        match pos.checked_add(len) {
            Some(end) if end <= self.buf.len() => Ok(&self.buf[pos..end]),
            _ => Err(self.error(
                DecodeErrorCode::Truncated {
                    needed: len,
                    available: self.buf.len().saturating_sub(pos),
                },
                pos,
            )),
        }
    }

    pub(crate) fn read_u8(&self, pos: usize) -> Result<u8> {
        let data = self.slice(pos, 1)?;
        Ok(data[0])
    }

    fn read_u32(&self, pos: usize) -> Result<u32> {
        let data = self.slice(pos, LENGTH_LEN)?;
        Ok(BigEndian::read_u32(data))
    }

    fn read_entry(&self, pos: usize) -> Result<ValueEntry> {
        let data = self.slice(pos, VALUE_ENTRY_LEN)?;
        Ok(ValueEntry::new(data[0], BigEndian::read_u32(&data[1..])))
    }

    /// Decodes the payload of a value of type `type_code` starting at `pos`.
    /// Returns the value and the position right after its payload.
    /// `code_pos` is where the type code was read, for error reporting.
    pub(crate) fn decode_payload(
        &mut self,
        type_code: u8,
        pos: usize,
        code_pos: usize,
    ) -> Result<(Value, usize)> {
        match type_code {
            TYPE_LITERAL => {
                let literal = self.read_u8(pos)?;
                let value = self.decode_literal(literal, pos)?;
                Ok((value, pos + 1))
            }
            TYPE_INT64 => {
                let data = self.slice(pos, NUMBER_LEN)?;
                Ok((Value::Int(BigEndian::read_i64(data)), pos + NUMBER_LEN))
            }
            TYPE_DOUBLE => {
                let data = self.slice(pos, NUMBER_LEN)?;
                Ok((Value::Double(BigEndian::read_f64(data)), pos + NUMBER_LEN))
            }
            TYPE_STRING => {
                let len = self.read_u32(pos)? as usize;
                let start = pos + LENGTH_LEN;
                let s = self.read_str(start, len)?;
                Ok((Value::String(s.to_string()), start + len))
            }
            TYPE_ARRAY => self.decode_array(pos),
            TYPE_OBJECT => self.decode_object(pos),
            _ => Err(self.error(DecodeErrorCode::UnknownTypeCode(type_code), code_pos)),
        }
    }

    fn decode_literal(&self, literal: u8, pos: usize) -> Result<Value> {
        match literal {
            LITERAL_NULL => Ok(Value::Null),
            LITERAL_TRUE => Ok(Value::Bool(true)),
            LITERAL_FALSE => Ok(Value::Bool(false)),
            _ => Err(self.error(DecodeErrorCode::UnknownLiteral(literal), pos)),
        }
    }

    fn read_str(&self, pos: usize, len: usize) -> Result<&'a str> {
        let data = self.slice(pos, len)?;
        std::str::from_utf8(data).map_err(|_| self.error(DecodeErrorCode::InvalidUtf8, pos))
    }

    // Reads `count` and `size` of a container and checks that the entry
    // tables and the declared size fit in the buffer.
    // Returns the count and the end position of the container.
    fn read_container_header(&mut self, pos: usize, entry_len: usize) -> Result<(usize, usize)> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error(DecodeErrorCode::RecursionLimitExceeded, pos));
        }
        let count = self.read_u32(pos)? as usize;
        let size = self.read_u32(pos + LENGTH_LEN)? as usize;

        let header_len = count
            .checked_mul(entry_len)
            .and_then(|len| len.checked_add(CONTAINER_HEADER_LEN));
        match header_len {
            Some(header_len) if header_len <= size => {}
            _ => return Err(self.error(DecodeErrorCode::InvalidContainerSize(size), pos)),
        }
        self.slice(pos, size)?;
        Ok((count, pos + size))
    }

    // Checks that the payloads of a container end exactly at its declared size.
    fn check_container_end(&self, pos: usize, cursor: usize, end: usize) -> Result<()> {
        match cursor.cmp(&end) {
            Ordering::Equal => Ok(()),
            Ordering::Less => Err(self.error(DecodeErrorCode::TrailingBytes(end - cursor), cursor)),
            Ordering::Greater => Err(self.error(
                DecodeErrorCode::InvalidContainerSize(end - pos),
                pos,
            )),
        }
    }

    // Decodes the value of an entry. A value that is not inlined must start
    // at `cursor`, right after the payload of the previous entry.
    fn decode_entry(
        &mut self,
        entry_pos: usize,
        start: usize,
        cursor: &mut usize,
    ) -> Result<Value> {
        let entry = self.read_entry(entry_pos)?;
        match entry.type_code {
            TYPE_LITERAL => self.decode_literal((entry.word >> 24) as u8, entry_pos + 1),
            TYPE_INLINE_INT64 => Ok(Value::Int(entry.word as i32 as i64)),
            TYPE_INT64 | TYPE_DOUBLE | TYPE_STRING | TYPE_ARRAY | TYPE_OBJECT => {
                let expected = *cursor - start;
                let found = entry.word as usize;
                if found != expected {
                    return Err(self.error(
                        DecodeErrorCode::OffsetMismatch { expected, found },
                        entry_pos + 1,
                    ));
                }
                let (value, end) = self.decode_payload(entry.type_code, *cursor, entry_pos)?;
                *cursor = end;
                Ok(value)
            }
            type_code => Err(self.error(DecodeErrorCode::UnknownTypeCode(type_code), entry_pos)),
        }
    }

    fn decode_array(&mut self, pos: usize) -> Result<(Value, usize)> {
        let (count, end) = self.read_container_header(pos, VALUE_ENTRY_LEN)?;

        let entries_pos = pos + CONTAINER_HEADER_LEN;
        let mut cursor = entries_pos + count * VALUE_ENTRY_LEN;
        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            let value = self.decode_entry(entries_pos + i * VALUE_ENTRY_LEN, pos, &mut cursor)?;
            values.push(value);
        }
        self.check_container_end(pos, cursor, end)?;

        self.depth -= 1;
        Ok((Value::Array(values), end))
    }

    fn decode_object(&mut self, pos: usize) -> Result<(Value, usize)> {
        let entry_len = KEY_ENTRY_LEN + VALUE_ENTRY_LEN + SORT_INDEX_LEN;
        let (count, end) = self.read_container_header(pos, entry_len)?;

        let key_entries_pos = pos + CONTAINER_HEADER_LEN;
        let value_entries_pos = key_entries_pos + count * KEY_ENTRY_LEN;
        let sort_index_pos = value_entries_pos + count * VALUE_ENTRY_LEN;
        let mut cursor = sort_index_pos + count * SORT_INDEX_LEN;

        let mut keys = Vec::with_capacity(count);
        for i in 0..count {
            let key_entry_pos = key_entries_pos + i * KEY_ENTRY_LEN;
            let expected = cursor - pos;
            let found = self.read_u32(key_entry_pos)? as usize;
            if found != expected {
                return Err(self.error(
                    DecodeErrorCode::OffsetMismatch { expected, found },
                    key_entry_pos,
                ));
            }
            let len = self.read_u32(key_entry_pos + LENGTH_LEN)? as usize;
            let key = self.read_str(cursor, len)?;
            keys.push(key);
            cursor += len;
        }

        let mut index = Vec::with_capacity(count);
        for i in 0..count {
            let index_pos = sort_index_pos + i * SORT_INDEX_LEN;
            let key_pos = self.read_u32(index_pos)?;
            if key_pos as usize >= count {
                return Err(self.error(
                    DecodeErrorCode::InvalidKeyIndex(key_pos as usize),
                    index_pos,
                ));
            }
            if let Some(prev) = index.last() {
                match key_cmp(keys[*prev as usize], keys[key_pos as usize]) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Err(self.error(DecodeErrorCode::DuplicateKey, index_pos));
                    }
                    Ordering::Greater => {
                        return Err(self.error(DecodeErrorCode::UnsortedKeyIndex, index_pos));
                    }
                }
            }
            index.push(key_pos);
        }

        let mut entries = Vec::with_capacity(count);
        for (i, key) in keys.into_iter().enumerate() {
            let entry_pos = value_entries_pos + i * VALUE_ENTRY_LEN;
            let value = self.decode_entry(entry_pos, pos, &mut cursor)?;
            entries.push((key.to_string(), value));
        }
        self.check_container_end(pos, cursor, end)?;

        self.depth -= 1;
        Ok((Value::Object(Object::from_parts(entries, index)), end))
    }
}
