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

use binjson::{encode, parse_value, Object, Value};

#[test]
fn test_encode_null() {
    assert_eq!(&Value::Null.to_vec(), b"\x04\x00");
}

#[test]
fn test_encode_boolean() {
    assert_eq!(&Value::Bool(true).to_vec(), b"\x04\x01");
    assert_eq!(&Value::Bool(false).to_vec(), b"\x04\x02");
}

#[test]
fn test_encode_string() {
    assert_eq!(
        &Value::String("asd".to_string()).to_vec(),
        b"\x0C\x00\x00\x00\x03\x61\x73\x64"
    );
    assert_eq!(
        &Value::String("测试".to_string()).to_vec(),
        b"\x0C\x00\x00\x00\x06\xE6\xB5\x8B\xE8\xAF\x95"
    );
    assert_eq!(&Value::String(String::new()).to_vec(), b"\x0C\x00\x00\x00\x00");
}

#[test]
fn test_encode_int64() {
    assert_eq!(
        &Value::Int(0).to_vec(),
        b"\x09\x00\x00\x00\x00\x00\x00\x00\x00"
    );
    assert_eq!(
        &Value::Int(-100).to_vec(),
        b"\x09\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x9C"
    );
    assert_eq!(
        &Value::Int(i64::MAX).to_vec(),
        b"\x09\x7F\xFF\xFF\xFF\xFF\xFF\xFF\xFF"
    );
}

#[test]
fn test_encode_double() {
    assert_eq!(
        &Value::Double(0.0).to_vec(),
        b"\x0B\x00\x00\x00\x00\x00\x00\x00\x00"
    );
    assert_eq!(
        &Value::Double(-0.0).to_vec(),
        b"\x0B\x80\x00\x00\x00\x00\x00\x00\x00"
    );
    assert_eq!(
        &Value::Double(1.5).to_vec(),
        b"\x0B\x3F\xF8\x00\x00\x00\x00\x00\x00"
    );
    assert_eq!(
        &Value::Double(f64::INFINITY).to_vec(),
        b"\x0B\x7F\xF0\x00\x00\x00\x00\x00\x00"
    );
}

#[test]
fn test_encode_array() {
    assert_eq!(
        &Value::Array(vec![]).to_vec(),
        b"\x03\x00\x00\x00\x00\x00\x00\x00\x08"
    );
    assert_eq!(
        &Value::Array(vec![Value::Bool(false), Value::Int(10)]).to_vec(),
        b"\x03\x00\x00\x00\x02\x00\x00\x00\x12\x04\x02\x00\x00\x00\x89\x00\x00\x00\x0A"
    );
    assert_eq!(
        &Value::Array(vec![Value::Int(1i64 << 40), Value::Double(1.0)]).to_vec(),
        b"\x03\x00\x00\x00\x02\x00\x00\x00\x22\
          \x09\x00\x00\x00\x12\x0B\x00\x00\x00\x1A\
          \x00\x00\x01\x00\x00\x00\x00\x00\
          \x3F\xF0\x00\x00\x00\x00\x00\x00"
    );
}

#[test]
fn test_encode_object() {
    assert_eq!(
        &Value::Object(Object::new()).to_vec(),
        b"\x01\x00\x00\x00\x00\x00\x00\x00\x08"
    );

    let obj: Object = vec![("bb", Value::Bool(true)), ("a", Value::from("v"))]
        .into_iter()
        .collect();
    assert_eq!(
        &Value::Object(obj).to_vec(),
        b"\x01\x00\x00\x00\x02\x00\x00\x00\x32\
          \x00\x00\x00\x2A\x00\x00\x00\x02\
          \x00\x00\x00\x2C\x00\x00\x00\x01\
          \x04\x01\x00\x00\x00\
          \x0C\x00\x00\x00\x2D\
          \x00\x00\x00\x01\x00\x00\x00\x00\
          \x62\x62\x61\
          \x00\x00\x00\x01\x76"
    );
}

#[test]
fn test_encode_document() {
    let text = r#"[false, 10, {"k":"v"}]"#;
    let value = parse_value(text.as_bytes()).unwrap();
    assert_eq!(
        &encode(&value),
        b"\x03\x00\x00\x00\x03\x00\x00\x00\x36\
          \x04\x02\x00\x00\x00\
          \x89\x00\x00\x00\x0A\
          \x01\x00\x00\x00\x17\
          \x00\x00\x00\x01\x00\x00\x00\x1F\
          \x00\x00\x00\x19\x00\x00\x00\x01\
          \x0C\x00\x00\x00\x1A\
          \x00\x00\x00\x00\
          \x6B\
          \x00\x00\x00\x01\x76"
    );
}

#[test]
fn test_write_to_vec_appends() {
    let mut buf = vec![0xAA];
    Value::Null.write_to_vec(&mut buf);
    Value::Int(3).write_to_vec(&mut buf);
    assert_eq!(buf[..3], [0xAA, 0x04, 0x00]);
    assert_eq!(buf.len(), 3 + 9);
}
