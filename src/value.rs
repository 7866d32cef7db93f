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
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::mem::discriminant;
use std::str::FromStr;

use rand::distr::Alphanumeric;
use rand::distr::SampleString;
use rand::rng;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde::Serialize;
use serde::Serializer;

use crate::binary::Encoder;
use crate::compare::compare;
use crate::error::Error;
use crate::object::Object;
use crate::parser::parse_value;
use crate::util::escape_string;

/// The kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

/// Represents a JSON value.
///
/// Integral numbers and floating numbers are distinct variants: the parser
/// decides which one a number is, and the binary encoding and the text
/// emission keep that decision, so `4` and `4.0` never turn into each other.
#[derive(Clone, Default)]
pub enum Value {
    /// Represents a JSON null value
    #[default]
    Null,
    /// Represents a JSON boolean value (true or false)
    Bool(bool),
    /// Represents a JSON number without fraction or exponent that fits in 64 bits
    Int(i64),
    /// Represents any other JSON number
    Double(f64),
    /// Represents a JSON string value
    String(String),
    /// Represents a JSON array of values
    Array(Vec<Value>),
    /// Represents a JSON object
    Object(Object),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(v1), Value::Bool(v2)) => v1 == v2,
            (Value::Int(v1), Value::Int(v2)) => v1 == v2,
            (Value::Double(v1), Value::Double(v2)) => v1.to_bits() == v2.to_bits(),
            (Value::String(v1), Value::String(v2)) => v1 == v2,
            (Value::Array(arr1), Value::Array(arr2)) => arr1 == arr2,
            (Value::Object(obj1), Value::Object(obj2)) => obj1 == obj2,
            (_, _) => false,
        }
    }
}

impl Eq for Value {}

impl Debug for Value {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match *self {
            Value::Null => formatter.debug_tuple("Null").finish(),
            Value::Bool(v) => formatter.debug_tuple("Bool").field(&v).finish(),
            Value::Int(v) => formatter.debug_tuple("Int").field(&v).finish(),
            Value::Double(v) => formatter.debug_tuple("Double").field(&v).finish(),
            Value::String(ref v) => formatter.debug_tuple("String").field(v).finish(),
            Value::Array(ref v) => {
                formatter.write_str("Array(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
            Value::Object(ref v) => {
                formatter.write_str("Object(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
        }
    }
}

/// Emits compact JSON text in stored order.
///
/// Doubles always carry a decimal point or an exponent. Non-finite doubles
/// have no JSON form and are written as `null`.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => {
                if *v {
                    f.write_str("true")
                } else {
                    f.write_str("false")
                }
            }
            Value::Int(v) => {
                let mut buffer = itoa::Buffer::new();
                f.write_str(buffer.format(*v))
            }
            Value::Double(v) => {
                if v.is_finite() {
                    let mut buffer = ryu::Buffer::new();
                    f.write_str(buffer.format_finite(*v))
                } else {
                    f.write_str("null")
                }
            }
            Value::String(v) => escape_string(v, f),
            Value::Array(vs) => {
                f.write_str("[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(obj) => {
                f.write_str("{")?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    escape_string(k, f)?;
                    f.write_str(":")?;
                    write!(f, "{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s.as_bytes())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Array(vs) => {
                let mut seq = serializer.serialize_seq(Some(vs.len()))?;
                for v in vs {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_array() && !self.is_object()
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_v))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(ref obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_v))
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(ref array) => Some(array),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }

    pub fn is_i64(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value of either number variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_v))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_null(&self) -> Option<()> {
        match self {
            Value::Null => Some(()),
            _ => None,
        }
    }

    /// Serialize the Value into a byte stream.
    pub fn write_to_vec(&self, buf: &mut Vec<u8>) {
        let mut encoder = Encoder::new(buf);
        encoder.encode(self);
    }

    /// Serialize the Value into a byte stream.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        buf
    }

    /// Emits the canonical compact JSON text.
    pub fn to_json_string(&self) -> String {
        format!("{self}")
    }

    /// Total order over JSON values, see [`compare`].
    pub fn compare(&self, other: &Value) -> Ordering {
        compare(self, other)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(name),
            _ => None,
        }
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    pub fn array_length(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.len()),
            _ => None,
        }
    }

    pub fn object_keys(&self) -> Option<Value> {
        match self {
            Value::Object(obj) => {
                let keys = obj.keys().map(|k| Value::String(k.to_string())).collect();
                Some(Value::Array(keys))
            }
            _ => None,
        }
    }

    pub fn eq_variant(&self, other: &Value) -> bool {
        discriminant(self) == discriminant(other)
    }

    /// generate random JSON value
    pub fn rand_value() -> Value {
        Self::rand_value_with(&mut rng())
    }

    /// Generates a random JSON value from a seed, the same seed always
    /// gives the same value.
    pub fn rand_value_from_seed(seed: u64) -> Value {
        Self::rand_value_with(&mut SmallRng::seed_from_u64(seed))
    }

    fn rand_value_with<R: Rng + ?Sized>(rng: &mut R) -> Value {
        match rng.random_range(0..=2) {
            0 => {
                let len = rng.random_range(0..=5);
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(Self::rand_scalar_value(rng));
                }
                Value::Array(values)
            }
            1 => {
                let len = rng.random_range(0..=5);
                let mut entries = Vec::with_capacity(len);
                for _ in 0..len {
                    let k = Alphanumeric.sample_string(rng, 5);
                    let v = Self::rand_scalar_value(rng);
                    entries.push((k, v));
                }
                Value::Object(Object::from_entries(entries))
            }
            _ => Self::rand_scalar_value(rng),
        }
    }

    fn rand_scalar_value<R: Rng + ?Sized>(rng: &mut R) -> Value {
        match rng.random_range(0..=3) {
            0 => Value::Bool(rng.random_bool(0.5)),
            1 => Value::String(Alphanumeric.sample_string(rng, 5)),
            2 => match rng.random_range(0..=20) {
                0..=5 => Value::Int(rng.random_range(-100..=100)),
                6..=10 => Value::Int(rng.random()),
                _ => Value::Double(rng.random_range(-4000.0..1.3e5)),
            },
            _ => Value::Null,
        }
    }
}
