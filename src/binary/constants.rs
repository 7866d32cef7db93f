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

// Type codes
pub const TYPE_OBJECT: u8 = 0x01;
pub const TYPE_ARRAY: u8 = 0x03;
pub const TYPE_LITERAL: u8 = 0x04;
pub const TYPE_INT64: u8 = 0x09;
pub const TYPE_DOUBLE: u8 = 0x0B;
pub const TYPE_STRING: u8 = 0x0C;

// Set on the type code of a value entry whose value is stored in the entry word
pub const INLINE_FLAG: u8 = 0x80;
pub(crate) const TYPE_INLINE_INT64: u8 = TYPE_INT64 | INLINE_FLAG;

// Literal payloads
pub const LITERAL_NULL: u8 = 0x00;
pub const LITERAL_TRUE: u8 = 0x01;
pub const LITERAL_FALSE: u8 = 0x02;

// Layout sizes
pub(crate) const TYPE_CODE_LEN: usize = 1;
pub(crate) const LENGTH_LEN: usize = 4;
pub(crate) const NUMBER_LEN: usize = 8;
pub(crate) const CONTAINER_HEADER_LEN: usize = 8;
pub(crate) const VALUE_ENTRY_LEN: usize = 5;
pub(crate) const KEY_ENTRY_LEN: usize = 8;
pub(crate) const SORT_INDEX_LEN: usize = 4;
