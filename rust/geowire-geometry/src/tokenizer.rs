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
use crate::error::GeowireError;

/// Split `text` on `delimiter` at top level only
///
/// Delimiters inside a balanced `()` or `[]` span are not split points. The
/// trailing segment after the last top-level delimiter is always emitted
/// unless the unconsumed remainder has zero length. An unmatched closing
/// bracket is malformed input.
///
/// Returns a materialized list rather than a lazy iterator: callers index
/// into the tokens and need the count up front.
pub fn tokenize(text: &str, delimiter: char) -> Result<Vec<String>, GeowireError> {
    let mut tokens = Vec::new();
    let mut stack: Vec<char> = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        match c {
            '(' | '[' => {
                stack.push(c);
                current.push(c);
            }
            ')' | ']' => {
                let opener = if c == ')' { '(' } else { '[' };
                if stack.pop() != Some(opener) {
                    return Err(GeowireError::Format(format!(
                        "Unmatched closing bracket '{c}'"
                    )));
                }
                current.push(c);
            }
            _ if c == delimiter && stack.is_empty() => {
                tokens.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_at_top_level_only() {
        let tokens = tokenize("(1,2),(3,4)", ',').unwrap();
        assert_eq!(tokens, vec!["(1,2)", "(3,4)"]);
    }

    #[test]
    fn plain_split() {
        let tokens = tokenize("1 2,3 4", ',').unwrap();
        assert_eq!(tokens, vec!["1 2", "3 4"]);
    }

    #[test]
    fn square_brackets_guard_too() {
        let tokens = tokenize("[a,b],c", ',').unwrap();
        assert_eq!(tokens, vec!["[a,b]", "c"]);
    }

    #[test]
    fn nested_brackets() {
        let tokens = tokenize("((a,b),[c,(d,e)]),f", ',').unwrap();
        assert_eq!(tokens, vec!["((a,b),[c,(d,e)])", "f"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let tokens = tokenize("", ',').unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn trailing_delimiter_drops_empty_remainder() {
        let tokens = tokenize("a,b,", ',').unwrap();
        assert_eq!(tokens, vec!["a", "b"]);
    }

    #[test]
    fn interior_empty_segments_survive() {
        let tokens = tokenize("a,,b", ',').unwrap();
        assert_eq!(tokens, vec!["a", "", "b"]);
    }

    #[test]
    fn unmatched_closer_is_rejected() {
        let err = tokenize("a),b", ',').unwrap_err();
        assert_eq!(err.to_string(), "Unmatched closing bracket ')'");

        let err = tokenize("(a],b", ',').unwrap_err();
        assert_eq!(err.to_string(), "Unmatched closing bracket ']'");
    }

    #[test]
    fn single_token() {
        let tokens = tokenize("lonely", ',').unwrap();
        assert_eq!(tokens, vec!["lonely"]);
    }
}
