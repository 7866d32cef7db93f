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

use super::constants::*;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;
use super::object::Object;
use super::util::parse_string;
use super::value::Value;

/// Parse JSON text to a Value.
///
/// The grammar is RFC 8259. A number becomes [`Value::Int`] when it has no
/// fraction and no exponent and fits in an `i64`, and [`Value::Double`]
/// otherwise. Duplicate object keys keep the last value. Whitespace may
/// follow the document, anything else is rejected.
// Inspired by `https://github.com/jorgecarleitao/json-deserializer`
pub fn parse_value(buf: &[u8]) -> Result<Value> {
    let mut parser = Parser::new(buf);
    parser.parse()
}

struct Parser<'a> {
    buf: &'a [u8],
    idx: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(buf: &'a [u8]) -> Parser<'a> {
        Self {
            buf,
            idx: 0,
            depth: 0,
        }
    }

    fn parse(&mut self) -> Result<Value> {
        let val = self.parse_json_value()?;
        self.skip_whitespace();
        if self.idx < self.buf.len() {
            self.step();
            return Err(self.error(ParseErrorCode::UnexpectedTrailingCharacters));
        }
        Ok(val)
    }

    fn parse_json_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        let c = self.next()?;
        match c {
            b'n' => self.parse_json_null(),
            b't' => self.parse_json_true(),
            b'f' => self.parse_json_false(),
            b'0'..=b'9' | b'-' => self.parse_json_number(),
            b'"' => self.parse_json_string(),
            b'[' => self.parse_json_array(),
            b'{' => self.parse_json_object(),
            _ => {
                self.step();
                Err(self.error(ParseErrorCode::ExpectedSomeValue))
            }
        }
    }

    #[inline]
    fn next(&self) -> Result<u8> {
        match self.buf.get(self.idx) {
            Some(c) => Ok(*c),
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    fn must_is(&mut self, c: u8) -> Result<()> {
        match self.buf.get(self.idx) {
            Some(v) => {
                self.step();
                if *v == c {
                    Ok(())
                } else {
                    Err(self.error(ParseErrorCode::ExpectedSomeIdent))
                }
            }
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    fn check_next(&self, c: u8) -> bool {
        self.buf.get(self.idx) == Some(&c)
    }

    #[inline]
    fn check_next_either(&self, c1: u8, c2: u8) -> bool {
        matches!(self.buf.get(self.idx), Some(v) if *v == c1 || *v == c2)
    }

    #[inline]
    fn check_digit(&self) -> bool {
        matches!(self.buf.get(self.idx), Some(v) if v.is_ascii_digit())
    }

    #[inline]
    fn step_digits(&mut self) -> usize {
        let mut len = 0;
        while self.check_digit() {
            len += 1;
            self.step();
        }
        len
    }

    #[inline]
    fn step(&mut self) {
        self.idx += 1;
    }

    fn error(&self, code: ParseErrorCode) -> Error {
        let pos = self.idx;
        Error::Syntax(code, pos)
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.buf.get(self.idx) {
            if !matches!(c, b' ' | b'\t' | b'\n' | b'\r') {
                break;
            }
            self.step();
        }
    }

    fn enter_container(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error(ParseErrorCode::RecursionLimitExceeded));
        }
        Ok(())
    }

    fn leave_container(&mut self) {
        self.depth -= 1;
    }

    fn parse_json_null(&mut self) -> Result<Value> {
        for v in *b"null" {
            self.must_is(v)?;
        }
        Ok(Value::Null)
    }

    fn parse_json_true(&mut self) -> Result<Value> {
        for v in *b"true" {
            self.must_is(v)?;
        }
        Ok(Value::Bool(true))
    }

    fn parse_json_false(&mut self) -> Result<Value> {
        for v in *b"false" {
            self.must_is(v)?;
        }
        Ok(Value::Bool(false))
    }

    /// Parse a JSON number.
    ///
    /// The integer part is validated and, when the literal has neither a
    /// fraction nor an exponent, accumulated into an `i64` with overflow
    /// checks. Everything else, including integers beyond the `i64` range,
    /// is handed to `fast_float2` as a double.
    fn parse_json_number(&mut self) -> Result<Value> {
        let start_idx = self.idx;
        let negative = self.check_next(b'-');
        if negative {
            self.step();
        }

        if self.check_next(b'0') {
            self.step();
            // leading zeros are not allowed
            if self.check_digit() {
                self.step();
                return Err(self.error(ParseErrorCode::InvalidNumberValue));
            }
        } else if self.step_digits() == 0 {
            return Err(self.error(ParseErrorCode::InvalidNumberValue));
        }
        let int_end_idx = self.idx;

        let mut is_double = false;
        if self.check_next(b'.') {
            is_double = true;
            self.step();
            if self.step_digits() == 0 {
                return Err(self.error(ParseErrorCode::InvalidNumberValue));
            }
        }
        if self.check_next_either(b'E', b'e') {
            is_double = true;
            self.step();
            if self.check_next_either(b'+', b'-') {
                self.step();
            }
            if self.step_digits() == 0 {
                return Err(self.error(ParseErrorCode::InvalidNumberValue));
            }
        }

        if !is_double {
            let digits = &self.buf[start_idx + usize::from(negative)..int_end_idx];
            if let Some(v) = parse_i64_digits(digits, negative) {
                return Ok(Value::Int(v));
            }
        }

        let s = &self.buf[start_idx..self.idx];
        match fast_float2::parse::<f64, _>(s) {
            Ok(v) if v.is_finite() => Ok(Value::Double(v)),
            Ok(_) => Err(self.error(ParseErrorCode::NumberOutOfRange)),
            Err(_) => Err(self.error(ParseErrorCode::InvalidNumberValue)),
        }
    }

    fn parse_json_string(&mut self) -> Result<Value> {
        let s = self.parse_string_literal()?;
        Ok(Value::String(s))
    }

    /// Parse a JSON string literal.
    ///
    /// The first pass finds the closing quote, rejects raw control
    /// characters and counts escapes. Strings without escapes are only
    /// validated as UTF-8; the others are decoded by `parse_string`.
    fn parse_string_literal(&mut self) -> Result<String> {
        self.must_is(b'"')?;

        let start_idx = self.idx;
        let mut escapes = 0;
        loop {
            let c = self.next()?;
            match c {
                b'\\' => {
                    // the escaped byte is skipped, `\uXXXX` digits are scanned as plain bytes
                    self.step();
                    escapes += 1;
                    self.next()?;
                }
                b'"' => {
                    self.step();
                    break;
                }
                0x00..=0x1F => {
                    self.step();
                    return Err(self.error(ParseErrorCode::ControlCharacterWhileParsingString));
                }
                _ => {}
            }
            self.step();
        }

        let data = &self.buf[start_idx..self.idx - 1];
        if escapes > 0 {
            let len = data.len() - escapes;
            let mut idx = start_idx;
            parse_string(data, len, &mut idx)
        } else {
            std::str::from_utf8(data)
                .map(|s| s.to_string())
                .map_err(|_| self.error(ParseErrorCode::InvalidStringValue))
        }
    }

    fn parse_json_array(&mut self) -> Result<Value> {
        self.must_is(b'[')?;
        self.enter_container()?;

        let mut values = Vec::new();
        self.skip_whitespace();
        if self.check_next(b']') {
            self.step();
            self.leave_container();
            return Ok(Value::Array(values));
        }

        loop {
            let value = self.parse_json_value()?;
            values.push(value);

            self.skip_whitespace();
            let c = self.next()?;
            self.step();
            match c {
                b',' => continue,
                b']' => break,
                _ => return Err(self.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }
        self.leave_container();
        Ok(Value::Array(values))
    }

    fn parse_json_object(&mut self) -> Result<Value> {
        self.must_is(b'{')?;
        self.enter_container()?;

        let mut entries = Vec::new();
        self.skip_whitespace();
        if self.check_next(b'}') {
            self.step();
            self.leave_container();
            return Ok(Value::Object(Object::new()));
        }

        loop {
            self.skip_whitespace();
            let c = self.next()?;
            if c != b'"' {
                self.step();
                return Err(self.error(ParseErrorCode::KeyMustBeAString));
            }
            let key = self.parse_string_literal()?;

            self.skip_whitespace();
            let c = self.next()?;
            self.step();
            if c != b':' {
                return Err(self.error(ParseErrorCode::ExpectedColon));
            }

            let value = self.parse_json_value()?;
            entries.push((key, value));

            self.skip_whitespace();
            let c = self.next()?;
            self.step();
            match c {
                b',' => continue,
                b'}' => break,
                _ => return Err(self.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
        self.leave_container();
        Ok(Value::Object(Object::from_entries(entries)))
    }
}

// Accumulates towards the sign so that `i64::MIN` is reachable.
#[inline]
fn parse_i64_digits(digits: &[u8], negative: bool) -> Option<i64> {
    let mut value = 0_i64;
    for c in digits {
        let digit = (c - b'0') as i64;
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }
    Some(value)
}
