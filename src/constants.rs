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

// JSON text constants
pub(crate) const UNICODE_LEN: usize = 4;

// JSON text escape characters constants
pub(crate) const BS: char = '\x5C'; // \\ Backslash
pub(crate) const QU: char = '\x22'; // \" Double quotation mark
pub(crate) const SD: char = '\x2F'; // \/ Slash or divide
pub(crate) const BB: char = '\x08'; // \b Backspace
pub(crate) const FF: char = '\x0C'; // \f Formfeed Page Break
pub(crate) const NN: char = '\x0A'; // \n Newline
pub(crate) const RR: char = '\x0D'; // \r Carriage Return
pub(crate) const TT: char = '\x09'; // \t Horizontal Tab

// Value compare level, lower levels sort first
pub(crate) const NULL_LEVEL: u8 = 0;
pub(crate) const NUMBER_LEVEL: u8 = 1;
pub(crate) const STRING_LEVEL: u8 = 2;
pub(crate) const OBJECT_LEVEL: u8 = 3;
pub(crate) const ARRAY_LEVEL: u8 = 4;
pub(crate) const BOOLEAN_LEVEL: u8 = 5;

// SQL `JSON_TYPE` names
pub(crate) const TYPE_NAME_NULL: &str = "NULL";
pub(crate) const TYPE_NAME_BOOLEAN: &str = "BOOLEAN";
pub(crate) const TYPE_NAME_INTEGER: &str = "INTEGER";
pub(crate) const TYPE_NAME_DOUBLE: &str = "DOUBLE";
pub(crate) const TYPE_NAME_STRING: &str = "STRING";
pub(crate) const TYPE_NAME_OBJECT: &str = "OBJECT";
pub(crate) const TYPE_NAME_ARRAY: &str = "ARRAY";

/// Maximum container nesting accepted by the parser and the decoder.
pub const MAX_NESTING_DEPTH: usize = 256;
