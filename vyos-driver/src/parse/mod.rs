//! Parsers for VyOS operational command output.
//!
//! Every parser is a pure function of the text it is given: no parser keeps
//! state between calls, so re-parsing the same output always yields an equal
//! result. A parser either returns a complete record or fails with a
//! [`ParseError`]; partial records are never returned.

pub mod arp;
pub mod bgp;
pub mod counters;
pub mod duration;
pub mod environment;
pub mod interfaces;
pub mod ntp;
pub mod ping;
pub mod users;
pub mod version;

use std::str::FromStr;

use crate::error::{ParseError, Result};

/// Parse a numeric field, reporting the offending text on failure.
pub(crate) fn number<T: FromStr>(context: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ParseError::InvalidNumber {
            context,
            value: value.to_string(),
        }
        .into()
    })
}

/// Lines of a table body, dropping `skip_head` leading lines and
/// `skip_tail` trailing lines (the trailer usually being the empty string
/// after the final newline).
pub(crate) fn table_body(text: &str, skip_head: usize, skip_tail: usize) -> Vec<&str> {
    let lines: Vec<&str> = text.split('\n').collect();
    let end = lines.len().saturating_sub(skip_tail);
    lines.get(skip_head..end).map(<[&str]>::to_vec).unwrap_or_default()
}

/// Split a row into whitespace-separated fields, requiring at least `min`.
pub(crate) fn fields<'a>(context: &'static str, line: &'a str, min: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < min {
        return Err(ParseError::FieldCount {
            context,
            expected: min,
            found: fields.len(),
            line: line.to_string(),
        }
        .into());
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_body_drops_head_and_tail() {
        let body = table_body("header\na\nb\n", 1, 1);
        assert_eq!(body, vec!["a", "b"]);
    }

    #[test]
    fn test_table_body_short_input_is_empty() {
        assert!(table_body("header", 2, 1).is_empty());
        assert!(table_body("", 1, 1).is_empty());
    }

    #[test]
    fn test_number_reports_value() {
        let err = number::<u32>("arp", "x1").unwrap_err();
        assert!(err.to_string().contains("x1"));
    }

    #[test]
    fn test_fields_minimum() {
        assert!(fields("arp", "a b c", 3).is_ok());
        assert!(fields("arp", "a b", 3).is_err());
    }
}
