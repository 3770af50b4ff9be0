// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use std::num;

use thiserror::Error;

/// Errors raised by the geometry model and its codecs
///
/// Every failure in this crate is local and synchronous: a decode or encode
/// call either returns a complete value or one of these, with no partially
/// visible output.
#[derive(Error, Debug, PartialEq)]
pub enum GeowireError {
    /// Malformed input text or bytes (bad hex digit, bad endian tag,
    /// unterminated SRID prefix, bracket mismatch)
    #[error("{0}")]
    Format(String),
    /// The input stream ended before the expected number of bytes
    #[error("Input truncated at byte {offset}: need {needed} more byte(s)")]
    Truncated { offset: usize, needed: usize },
    /// A WKB type code this crate does not understand, or a variant the
    /// encoder cannot serialize
    #[error("Unsupported geometry type {0}")]
    UnsupportedType(String),
    /// A typed collection encountered an element of the wrong concrete variant
    #[error("Expected {expected} element, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// Out-of-range point, ring, or sub-geometry index
    #[error("Index {index} out of range for size {size}")]
    Index { index: usize, size: usize },
    /// A token that should have been numeric was not
    #[error("Invalid numeric token '{0}'")]
    NumberFormat(String),
}

impl From<num::ParseFloatError> for GeowireError {
    fn from(value: num::ParseFloatError) -> Self {
        GeowireError::NumberFormat(value.to_string())
    }
}
