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

use ordered_float::OrderedFloat;

use crate::constants::*;
use crate::object::key_cmp;
use crate::value::Value;

// 2^63 as f64, the first double above the `i64` range.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Compares two JSON values.
///
/// Values of different types are ordered by type rank:
///
/// `null < number < string < object < array < boolean`
///
/// Values of the same type compare as follows:
///
/// - Numbers compare by numeric value, `Int` and `Double` alike. Mixed
///   comparisons are exact, so `Int(9007199254740993)` is greater than
///   `Double(9007199254740992.0)`. NaN sorts above every other number.
/// - Strings compare byte-wise.
/// - Arrays compare element by element; a prefix is less than the longer array.
/// - Objects with fewer entries are less. Objects of the same size compare
///   their entries in key index order, key first and then value.
/// - `false < true`.
///
/// The order is total, so it can be used for sorting and for three-way
/// predicates directly.
pub fn compare(left: &Value, right: &Value) -> Ordering {
    let left_level = compare_level(left);
    let right_level = compare_level(right);
    if left_level != right_level {
        return left_level.cmp(&right_level);
    }

    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(v1), Value::Bool(v2)) => v1.cmp(v2),
        (Value::Int(v1), Value::Int(v2)) => v1.cmp(v2),
        (Value::Double(v1), Value::Double(v2)) => OrderedFloat(*v1).cmp(&OrderedFloat(*v2)),
        (Value::Int(v1), Value::Double(v2)) => compare_i64_f64(*v1, *v2),
        (Value::Double(v1), Value::Int(v2)) => compare_i64_f64(*v2, *v1).reverse(),
        (Value::String(v1), Value::String(v2)) => v1.as_bytes().cmp(v2.as_bytes()),
        (Value::Array(arr1), Value::Array(arr2)) => {
            for (v1, v2) in arr1.iter().zip(arr2.iter()) {
                let ord = compare(v1, v2);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            arr1.len().cmp(&arr2.len())
        }
        (Value::Object(obj1), Value::Object(obj2)) => {
            let ord = obj1.len().cmp(&obj2.len());
            if ord != Ordering::Equal {
                return ord;
            }
            for ((k1, v1), (k2, v2)) in obj1.sorted_iter().zip(obj2.sorted_iter()) {
                let ord = key_cmp(k1, k2);
                if ord != Ordering::Equal {
                    return ord;
                }
                let ord = compare(v1, v2);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        }
        // levels are equal, so only the pairs above are possible
        (_, _) => Ordering::Equal,
    }
}

fn compare_level(value: &Value) -> u8 {
    match value {
        Value::Null => NULL_LEVEL,
        Value::Int(_) | Value::Double(_) => NUMBER_LEVEL,
        Value::String(_) => STRING_LEVEL,
        Value::Object(_) => OBJECT_LEVEL,
        Value::Array(_) => ARRAY_LEVEL,
        Value::Bool(_) => BOOLEAN_LEVEL,
    }
}

/// Exact comparison of an integer with a double, without rounding the
/// integer to the nearest double.
fn compare_i64_f64(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Less;
    }
    if f >= I64_UPPER_BOUND {
        return Ordering::Less;
    }
    if f < -I64_UPPER_BOUND {
        return Ordering::Greater;
    }
    // `trunc` is in the `i64` range here, so the cast is exact
    let trunc = f.trunc();
    match i.cmp(&(trunc as i64)) {
        Ordering::Equal => OrderedFloat(0.0).cmp(&OrderedFloat(f - trunc)),
        ord => ord,
    }
}
