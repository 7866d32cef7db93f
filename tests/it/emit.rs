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

use std::io::Write;

use binjson::{from_slice, parse_value, Value};
use goldenfile::Mint;

#[test]
fn test_emit() {
    let mut mint = Mint::new("tests/it/testdata");
    let mut file = mint.new_goldenfile("emit.txt").unwrap();
    let cases = &[
        "null",
        " true ",
        "-0",
        "4.0",
        "1E+2",
        "1.5e-7",
        "123456789012345678901234567890",
        r#""a\"\\\/\b\f\n\r\t\u0001é""#,
        r#"[1, 2.5, "x", [], {}]"#,
        r#"{"b": 1, "a": {"c": null}, "b": 2}"#,
        r#"{"a": [1, "2", {"aa": "bb"}, 4, null], "b": true, "c": null}"#,
        r#""😀 \udc00""#,
    ];

    for case in cases {
        let value = parse_value(case.as_bytes()).unwrap();
        let buf = value.to_vec();
        let decoded = from_slice(&buf).unwrap();
        assert_eq!(decoded.to_string(), value.to_string());

        writeln!(file, "---------- Input ----------").unwrap();
        writeln!(file, "{case}").unwrap();
        writeln!(file, "---------- Output ---------").unwrap();
        writeln!(file, "{value}").unwrap();
        writeln!(file, "---------- Type -----------").unwrap();
        writeln!(file, "{}", value.type_name()).unwrap();
        writeln!(file, "---------- Encoded --------").unwrap();
        writeln!(file, "{} bytes", buf.len()).unwrap();
        writeln!(file, "\n").unwrap();
    }
}

#[test]
fn test_emit_constructed_values() {
    assert_eq!(Value::Double(f64::NAN).to_string(), "null");
    assert_eq!(
        Value::Array(vec![Value::Double(f64::NEG_INFINITY), Value::Double(0.5)]).to_string(),
        "[null,0.5]"
    );
    assert_eq!(Value::from(u64::MAX).to_string(), "1.8446744073709552e19");
    assert_eq!(Value::from("\u{7f}\u{1f}").to_json_string(), "\"\u{7f}\\u001F\"");
}
