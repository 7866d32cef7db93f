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

//! `binjson` is a self-describing binary `JSON` value type for database engines. It parses `JSON` text into a value tree, encodes the tree into a compact binary form with structural random access, decodes it back, and defines a total order over `JSON` values for indexing, sorting and predicates.
//!
//! ## Features
//!
//! - Number fidelity: integral numbers that fit in 64 bits are kept as `Int`, every other number as `Double`, and the distinction survives encoding, decoding and text output.
//! - Random access: fields and elements of an encoded value can be read through [`RawJson`] without decoding the whole document. Object keys are found with a binary search over a sorted key index.
//! - Total order: [`compare`] orders any two values, including integers against doubles, exactly.
//! - Safe decoding: every offset and length of an encoded buffer is validated, malformed input is reported as an [`Error`] and never panics.
//!
//! ## Encoding format
//!
//! Every encoded value starts with a one byte type code followed by its payload. All integers are big-endian.
//!
//! - `0x04` literal: one byte, `0x00` null, `0x01` true, `0x02` false.
//! - `0x09` int64: 8 bytes two's complement.
//! - `0x0B` double: 8 bytes IEEE-754.
//! - `0x0C` string: 32-bit length and the UTF-8 bytes.
//! - `0x03` array: 32-bit count, 32-bit size of the whole payload, `count` value entries, then the payloads of the elements.
//! - `0x01` object: 32-bit count, 32-bit size, `count` key entries, `count` value entries, `count` sorted key positions, the keys, then the payloads of the values.
//!
//! A key entry is a 32-bit offset and a 32-bit length. A value entry is a type code and a 32-bit word. Literals store their byte in the first byte of the word, integers in the `i32` range are stored in the word with type code `0x89`, and every other value stores the offset of its payload. Offsets are relative to the start of the container payload. The sorted key positions list the entries ordered by key length, then key bytes.
//!
//! #### An encoding example
//!
//! ```text
//! // JSON value
//! [false, 10, {"k":"v"}]
//!
//! // Encoding
//! 0x03          array type code
//! 0x00000003    count (3 entries)
//! 0x00000036    size (54 bytes)
//! 0x04 0x02000000   false entry (inline literal)
//! 0x89 0x0000000A   10 entry (inline int)
//! 0x01 0x00000017   object entry (payload at offset 23)
//! 0x00000001    object count (1 entry)
//! 0x0000001F    object size (31 bytes)
//! 0x00000019 0x00000001   key entry (offset 25, length 1)
//! 0x0C 0x0000001A         value entry (string payload at offset 26)
//! 0x00000000    sorted key positions
//! 0x6B          key ("k")
//! 0x00000001 0x76         string payload ("v")
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod binary;
mod compare;
mod constants;
mod error;
mod from;
mod functions;
mod object;
mod parser;
mod util;
mod value;

pub use binary::decode;
pub use binary::encode;
pub use binary::from_slice;
pub use binary::ArrayIterator;
pub use binary::ObjectIterator;
pub use binary::RawJson;
pub use compare::compare;
pub use constants::MAX_NESTING_DEPTH;
pub use error::DecodeErrorCode;
pub use error::Error;
pub use error::ParseErrorCode;
pub use error::Result;
#[allow(unused_imports)]
pub use from::*;
pub use functions::*;
pub use object::key_cmp;
pub use object::Object;
pub use parser::parse_value;
pub use value::*;
