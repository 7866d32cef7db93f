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

use core::fmt::Display;
use core::fmt::Formatter;

/// Reason a JSON text could not be parsed.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum ParseErrorCode {
    InvalidEOF,
    InvalidNumberValue,
    NumberOutOfRange,
    InvalidStringValue,
    ExpectedSomeIdent,
    ExpectedSomeValue,
    ExpectedColon,
    ExpectedArrayCommaOrEnd,
    ExpectedObjectCommaOrEnd,
    UnexpectedTrailingCharacters,
    KeyMustBeAString,
    ControlCharacterWhileParsingString,
    InvalidEscaped(u8),
    InvalidHex(u8),
    UnexpectedEndOfHexEscape,
    RecursionLimitExceeded,
}

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            ParseErrorCode::InvalidEOF => f.write_str("EOF while parsing a value"),
            ParseErrorCode::InvalidNumberValue => f.write_str("invalid number"),
            ParseErrorCode::NumberOutOfRange => f.write_str("number out of range"),
            ParseErrorCode::InvalidStringValue => f.write_str("invalid string value"),
            ParseErrorCode::ExpectedSomeIdent => f.write_str("expected ident"),
            ParseErrorCode::ExpectedSomeValue => f.write_str("expected value"),
            ParseErrorCode::ExpectedColon => f.write_str("expected `:`"),
            ParseErrorCode::ExpectedArrayCommaOrEnd => f.write_str("expected `,` or `]`"),
            ParseErrorCode::ExpectedObjectCommaOrEnd => f.write_str("expected `,` or `}`"),
            ParseErrorCode::UnexpectedTrailingCharacters => f.write_str("trailing characters"),
            ParseErrorCode::KeyMustBeAString => f.write_str("key must be a string"),
            ParseErrorCode::ControlCharacterWhileParsingString => {
                f.write_str("control character (\\u0000-\\u001F) found while parsing a string")
            }
            ParseErrorCode::InvalidEscaped(n) => write!(f, "invalid escaped '{:X}'", n),
            ParseErrorCode::InvalidHex(n) => write!(f, "invalid hex '{:X}'", n),
            ParseErrorCode::UnexpectedEndOfHexEscape => f.write_str("unexpected end of hex escape"),
            ParseErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

/// Reason an encoded buffer could not be decoded.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum DecodeErrorCode {
    UnknownTypeCode(u8),
    UnknownLiteral(u8),
    Truncated { needed: usize, available: usize },
    OffsetMismatch { expected: usize, found: usize },
    InvalidContainerSize(usize),
    InvalidUtf8,
    InvalidKeyIndex(usize),
    UnsortedKeyIndex,
    DuplicateKey,
    TrailingBytes(usize),
    RecursionLimitExceeded,
}

impl Display for DecodeErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            DecodeErrorCode::UnknownTypeCode(t) => write!(f, "unknown type code 0x{:02X}", t),
            DecodeErrorCode::UnknownLiteral(l) => write!(f, "unknown literal 0x{:02X}", l),
            DecodeErrorCode::Truncated { needed, available } => write!(
                f,
                "unexpected end of buffer, expected {} bytes, found {}",
                needed, available
            ),
            DecodeErrorCode::OffsetMismatch { expected, found } => {
                write!(f, "invalid offset, expected {}, found {}", expected, found)
            }
            DecodeErrorCode::InvalidContainerSize(size) => {
                write!(f, "invalid container size {}", size)
            }
            DecodeErrorCode::InvalidUtf8 => f.write_str("invalid UTF-8 string"),
            DecodeErrorCode::InvalidKeyIndex(pos) => write!(f, "invalid key index {}", pos),
            DecodeErrorCode::UnsortedKeyIndex => f.write_str("key index is not sorted"),
            DecodeErrorCode::DuplicateKey => f.write_str("duplicate object key"),
            DecodeErrorCode::TrailingBytes(n) => write!(f, "{} trailing bytes", n),
            DecodeErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Malformed JSON text, with the byte position where parsing stopped.
    Syntax(ParseErrorCode, usize),
    /// Malformed binary buffer, with the byte offset of the offending region.
    Decode(DecodeErrorCode, usize),
}

impl Error {
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_, _))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_, _))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(code, pos) => write!(f, "{}, pos {}", code, pos),
            Error::Decode(code, offset) => write!(f, "{}, offset {}", code, offset),
        }
    }
}

impl std::error::Error for Error {}
