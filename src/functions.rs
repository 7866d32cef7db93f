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

// builtin functions for encoded values, reading only the bytes they need.

use std::cmp::Ordering;

use crate::binary::from_slice;
use crate::binary::RawJson;
use crate::compare::compare;
use crate::constants::*;
use crate::error::Result;
use crate::value::Value;
use crate::value::ValueKind;

fn kind_type_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Null => TYPE_NAME_NULL,
        ValueKind::Bool => TYPE_NAME_BOOLEAN,
        ValueKind::Int => TYPE_NAME_INTEGER,
        ValueKind::Double => TYPE_NAME_DOUBLE,
        ValueKind::String => TYPE_NAME_STRING,
        ValueKind::Object => TYPE_NAME_OBJECT,
        ValueKind::Array => TYPE_NAME_ARRAY,
    }
}

impl Value {
    /// The SQL `JSON_TYPE` name of the value: `NULL`, `BOOLEAN`, `INTEGER`,
    /// `DOUBLE`, `STRING`, `OBJECT` or `ARRAY`.
    pub fn type_name(&self) -> &'static str {
        kind_type_name(self.kind())
    }

    /// The content of a string without quotes and escapes,
    /// the JSON text of any other value.
    pub fn unquote(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            _ => self.to_string(),
        }
    }
}

impl RawJson<'_> {
    pub fn type_name(&self) -> Result<&'static str> {
        let kind = self.kind()?;
        Ok(kind_type_name(kind))
    }
}

/// Get the kind of an encoded value.
pub fn value_kind(value: &[u8]) -> Result<ValueKind> {
    RawJson::new(value)?.kind()
}

/// Get the length of an encoded array, `None` for other values.
pub fn array_length(value: &[u8]) -> Result<Option<usize>> {
    let raw = RawJson::new(value)?;
    match raw.kind()? {
        ValueKind::Array => raw.container_len(),
        _ => Ok(None),
    }
}

/// Get the value of a key from an encoded object.
pub fn get_by_key(value: &[u8], key: &str) -> Result<Option<Value>> {
    let raw = RawJson::new(value)?;
    match raw.get_by_key(key)? {
        Some(v) => v.to_value().map(Some),
        None => Ok(None),
    }
}

/// Get the element at `index` from an encoded array.
pub fn get_by_index(value: &[u8], index: usize) -> Result<Option<Value>> {
    let raw = RawJson::new(value)?;
    match raw.get_by_index(index)? {
        Some(v) => v.to_value().map(Some),
        None => Ok(None),
    }
}

/// Compares two encoded values, see [`compare`].
pub fn compare_slices(left: &[u8], right: &[u8]) -> Result<Ordering> {
    let left = from_slice(left)?;
    let right = from_slice(right)?;
    Ok(compare(&left, &right))
}
