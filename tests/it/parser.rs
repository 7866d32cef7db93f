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

use binjson::{parse_value, Error, Object, ParseErrorCode, Value};

fn test_parse_err(errors: &[(&str, &'static str)]) {
    for &(s, err) in errors {
        let res = parse_value(s.as_bytes());
        assert!(res.is_err(), "{s} should fail");
        assert_eq!(res.err().unwrap().to_string(), err, "{s}");
    }
}

fn test_parse_ok(tests: Vec<(&str, Value)>) {
    for (s, val) in tests {
        assert_eq!(parse_value(s.as_bytes()).unwrap(), val, "{s}");
    }
}

#[test]
fn test_parse_null() {
    test_parse_err(&[
        ("", "EOF while parsing a value, pos 0"),
        ("  ", "EOF while parsing a value, pos 2"),
        ("n", "EOF while parsing a value, pos 1"),
        ("nul", "EOF while parsing a value, pos 3"),
        ("nulx", "expected ident, pos 4"),
        ("nulla", "trailing characters, pos 5"),
        ("NULL", "expected value, pos 1"),
    ]);

    test_parse_ok(vec![("null", Value::Null), (" null\n", Value::Null)]);
}

#[test]
fn test_parse_boolean() {
    test_parse_err(&[
        ("t", "EOF while parsing a value, pos 1"),
        ("truz", "expected ident, pos 4"),
        ("f", "EOF while parsing a value, pos 1"),
        ("faz", "expected ident, pos 3"),
        ("truea", "trailing characters, pos 5"),
        ("falsea", "trailing characters, pos 6"),
    ]);

    test_parse_ok(vec![
        ("true", Value::Bool(true)),
        (" true ", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("\tfalse\r\n", Value::Bool(false)),
    ]);
}

#[test]
fn test_parse_number_errors() {
    test_parse_err(&[
        ("+", "expected value, pos 1"),
        (".", "expected value, pos 1"),
        ("-", "invalid number, pos 1"),
        ("00", "invalid number, pos 2"),
        ("0x80", "trailing characters, pos 2"),
        ("\\0", "expected value, pos 1"),
        ("1.", "invalid number, pos 2"),
        ("1.a", "invalid number, pos 2"),
        ("1.e1", "invalid number, pos 2"),
        ("1e", "invalid number, pos 2"),
        ("1e+", "invalid number, pos 3"),
        ("1a", "trailing characters, pos 2"),
        ("-01", "invalid number, pos 3"),
        ("1e400", "number out of range, pos 5"),
        ("-1e400", "number out of range, pos 6"),
    ]);
}

#[test]
fn test_parse_i64() {
    test_parse_ok(vec![
        ("-2", Value::Int(-2)),
        ("-1234", Value::Int(-1234)),
        (" -1234 ", Value::Int(-1234)),
        ("0", Value::Int(0)),
        ("-0", Value::Int(0)),
        ("4", Value::Int(4)),
        ("9223372036854775807", Value::Int(i64::MAX)),
        ("-9223372036854775808", Value::Int(i64::MIN)),
    ]);
}

#[test]
fn test_parse_f64() {
    test_parse_ok(vec![
        ("4.0", Value::Double(4.0)),
        ("3.00", Value::Double(3.0)),
        ("0.4e5", Value::Double(0.4e5)),
        ("0.4e+5", Value::Double(0.4e5)),
        ("0.4e15", Value::Double(0.4e15)),
        ("0.4e-01", Value::Double(0.4e-1)),
        (" 0.4e-01 ", Value::Double(0.4e-1)),
        ("1e2", Value::Double(100.0)),
        ("1E2", Value::Double(100.0)),
        ("-0.0", Value::Double(-0.0)),
        ("3.5E-2147483647", Value::Double(0.0)),
        ("0.1", Value::Double(0.1)),
        ("2.2250738585072014e-308", Value::Double(2.2250738585072014e-308)),
        ("1.7976931348623157e308", Value::Double(f64::MAX)),
        // beyond the i64 range integers become doubles
        ("9223372036854775808", Value::Double(9223372036854775808.0)),
        ("-9223372036854775809", Value::Double(-9223372036854775808.0)),
        (
            "18446744073709551616",
            Value::Double(18446744073709551616.0),
        ),
    ]);
}

#[test]
fn test_parse_string() {
    test_parse_err(&[
        ("\"", "EOF while parsing a value, pos 1"),
        ("\"lol", "EOF while parsing a value, pos 4"),
        ("\"lol\"a", "trailing characters, pos 6"),
        (
            "\"a\u{1}b\"",
            "control character (\\u0000-\\u001F) found while parsing a string, pos 3",
        ),
        ("\"\\x\"", "invalid escaped '78', pos 3"),
        ("\"\\u12\"", "unexpected end of hex escape, pos 3"),
        ("\"\\uZZZZ\"", "invalid hex '5A', pos 7"),
        ("\"\\uD834\\uZZZZ\"", "invalid hex '5A', pos 13"),
    ]);

    test_parse_ok(vec![
        ("\"\"", Value::String("".to_string())),
        ("\"foo\"", Value::String("foo".to_string())),
        (" \"foo\" ", Value::String("foo".to_string())),
        ("\"\\\"\"", Value::String("\"".to_string())),
        ("\"\\b\"", Value::String("\x08".to_string())),
        ("\"\\n\"", Value::String("\n".to_string())),
        ("\"\\r\"", Value::String("\r".to_string())),
        ("\"\\t\"", Value::String("\t".to_string())),
        ("\"\\/\"", Value::String("/".to_string())),
        ("\"\\u12ab\"", Value::String("\u{12ab}".to_string())),
        ("\"\\uAB12\"", Value::String("\u{AB12}".to_string())),
        ("\"\\uD83D\\uDE00\"", Value::String("\u{1F600}".to_string())),
        ("\"hello, 世界\"", Value::String("hello, 世界".to_string())),
        // lone surrogates are kept as their escape text
        ("\"\\uDE00\"", Value::String("\\uDE00".to_string())),
        ("\"a\\uD83Db\"", Value::String("a\\uD83Db".to_string())),
        // the escape after a lone high surrogate is decoded on its own
        (r#""\uD834\u0041""#, Value::String("\\uD834A".to_string())),
        (
            r#""\uD834\uD834\uDD1E""#,
            Value::String("\\uD834\u{1D11E}".to_string()),
        ),
        (r#""\uD834\"x""#, Value::String("\\uD834\"x".to_string())),
    ]);
}

#[test]
fn test_parse_list() {
    test_parse_err(&[
        ("[", "EOF while parsing a value, pos 1"),
        ("[ ", "EOF while parsing a value, pos 2"),
        ("[1", "EOF while parsing a value, pos 2"),
        ("[1,", "EOF while parsing a value, pos 3"),
        ("[1,]", "expected value, pos 4"),
        ("[,1]", "expected value, pos 2"),
        ("[1 2]", "expected `,` or `]`, pos 4"),
        ("[]a", "trailing characters, pos 3"),
    ]);

    test_parse_ok(vec![
        ("[]", Value::Array(vec![])),
        ("[ ]", Value::Array(vec![])),
        ("[null]", Value::Array(vec![Value::Null])),
        (" [ null ] ", Value::Array(vec![Value::Null])),
        (
            "[[], [], [[]]]",
            Value::Array(vec![
                Value::Array(vec![]),
                Value::Array(vec![]),
                Value::Array(vec![Value::Array(vec![])]),
            ]),
        ),
        (
            "[1, 2.5, \"x\", true]",
            Value::Array(vec![
                Value::Int(1),
                Value::Double(2.5),
                Value::String("x".to_string()),
                Value::Bool(true),
            ]),
        ),
    ]);
}

#[test]
fn test_parse_object() {
    test_parse_err(&[
        ("{", "EOF while parsing a value, pos 1"),
        ("{ ", "EOF while parsing a value, pos 2"),
        ("{1", "key must be a string, pos 2"),
        ("{ \"a\"", "EOF while parsing a value, pos 5"),
        ("{\"a\"", "EOF while parsing a value, pos 4"),
        ("{\"a\" ", "EOF while parsing a value, pos 5"),
        ("{\"a\" 1}", "expected `:`, pos 6"),
        ("{\"a\":", "EOF while parsing a value, pos 5"),
        ("{\"a\":1", "EOF while parsing a value, pos 6"),
        ("{\"a\":1 1", "expected `,` or `}`, pos 8"),
        ("{\"a\":1,", "EOF while parsing a value, pos 7"),
        ("{\"a\":1,}", "key must be a string, pos 8"),
        ("{}a", "trailing characters, pos 3"),
    ]);

    let nested = Value::Object(vec![("b", Value::Null)].into_iter().collect());

    test_parse_ok(vec![
        ("{}", Value::Object(Object::new())),
        ("{ }", Value::Object(Object::new())),
        (
            "{\"a\":3}",
            Value::Object(vec![("a", 3)].into_iter().collect()),
        ),
        (
            "{ \"a\" : 3 }",
            Value::Object(vec![("a", 3)].into_iter().collect()),
        ),
        (
            "{\"a\":3,\"b\":4}",
            Value::Object(vec![("a", 3), ("b", 4)].into_iter().collect()),
        ),
        (
            "{\"a\": {\"b\": null}}",
            Value::Object(vec![("a", nested)].into_iter().collect()),
        ),
    ]);
}

#[test]
fn test_parse_duplicate_keys() {
    let value = parse_value(br#"{"a":1,"b":2,"a":3}"#).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj.get("a"), Some(&Value::Int(3)));
    let keys: Vec<&str> = obj.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(value.to_string(), r#"{"a":3,"b":2}"#);
}

#[test]
fn test_parse_document() {
    let text = r#"{"a": [1, "2", {"aa": "bb"}, 4, null], "b": true, "c": null}"#;
    let value = parse_value(text.as_bytes()).unwrap();
    assert_eq!(
        value.to_string(),
        r#"{"a":[1,"2",{"aa":"bb"},4,null],"b":true,"c":null}"#
    );
    let a = value.get_by_name("a").unwrap();
    assert_eq!(a.array_length(), Some(5));
    assert_eq!(
        a.get_by_index(2).unwrap().get_by_name("aa"),
        Some(&Value::String("bb".to_string()))
    );
}

#[test]
fn test_parse_number_kinds_survive_emit() {
    for text in ["4", "4.0", "-0.5", "1e300", "[1,1.0]", "{\"x\":-7}"] {
        let value = parse_value(text.as_bytes()).unwrap();
        let emitted = value.to_string();
        assert_eq!(parse_value(emitted.as_bytes()).unwrap(), value, "{text}");
    }
    assert_eq!(parse_value(b"4").unwrap().to_string(), "4");
    assert_eq!(parse_value(b"4.0").unwrap().to_string(), "4.0");
}

#[test]
fn test_parse_error_kind() {
    let err = parse_value(b"[1,]").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err, Error::Syntax(ParseErrorCode::ExpectedSomeValue, 4));
}

#[test]
fn test_parse_deep_nesting() {
    let deep = "[".repeat(100_000);
    let err = parse_value(deep.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        Error::Syntax(ParseErrorCode::RecursionLimitExceeded, _)
    ));

    let ok = format!("{}{}", "[".repeat(200), "]".repeat(200));
    assert!(parse_value(ok.as_bytes()).is_ok());
}

#[test]
fn test_parse_agrees_with_serde_json() {
    let texts = [
        r#"{"aaaaaaaaaaa": [1, "2", {"aa": "bb"}, 4.0], "bbbbbbbbbb": true, "ccccccccc": "d"}"#,
        r#"[{"a": 1, "b": true}, 3, 3.5, "hello, world", null, true]"#,
        r#"{"k\n": "\u00e9\ud83d\ude00", "n": [-1.25e-3, 12345678901234, 0]}"#,
    ];
    for text in texts {
        let value = parse_value(text.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value.to_string(), json.to_string());
        assert_eq!(Value::from(&json), value);
    }
}
