//! Constrained literal parser
//!
//! Recognizes integers, floats, quoted strings and flat `{key: value}`
//! mappings. Nothing is ever evaluated.

use serde_json::Value;
use std::iter::Peekable;
use std::str::Chars;

/// Mapping literal that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    pub reason: String,
}

impl LiteralError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

fn is_int(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_float(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let (whole, frac) = match mantissa.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (mantissa, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !frac.is_none_or(all_digits) {
        return false;
    }
    if whole.is_empty() && frac.is_none_or(str::is_empty) {
        return false;
    }

    match exponent {
        Some(exp) => is_int(exp),
        None => frac.is_some(),
    }
}

/// Parse an integer or float literal
///
/// Integers too large for i64 are read as floats.
pub fn parse_number(text: &str) -> Option<Value> {
    if is_int(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Value::from(n));
        }
    }
    if is_int(text) || is_float(text) {
        return text
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::from);
    }
    None
}

/// A number when the text is one, the text itself otherwise
pub fn parse_scalar(text: &str) -> Value {
    parse_number(text).unwrap_or_else(|| Value::String(text.to_string()))
}

fn skip_ws(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, LiteralError> {
    let mut out = String::new();
    loop {
        match chars.next() {
            None => return Err(LiteralError::new("unterminated string")),
            Some(c) if c == quote => return Ok(out),
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => return Err(LiteralError::new("unterminated string")),
            },
            Some(c) => out.push(c),
        }
    }
}

fn parse_bare(chars: &mut Peekable<Chars<'_>>) -> Result<Value, LiteralError> {
    let mut text = String::new();
    while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != ',' && *c != '}') {
        text.push(c);
    }
    if text.is_empty() {
        return Err(LiteralError::new("missing value"));
    }
    parse_number(&text).ok_or_else(|| LiteralError::new(format!("not a literal: {}", text)))
}

fn parse_entry_value(chars: &mut Peekable<Chars<'_>>) -> Result<Value, LiteralError> {
    match chars.peek().copied() {
        Some(q @ ('"' | '\'')) => {
            chars.next();
            parse_quoted(chars, q).map(Value::String)
        }
        _ => parse_bare(chars),
    }
}

/// Parse a `{key: value, ...}` mapping
///
/// Keys are quoted strings; values are quoted strings, integers or floats.
/// A trailing comma is allowed, anything after the closing brace is not.
/// Pairs come back in source order.
pub fn parse_dict(text: &str) -> Result<Vec<(String, Value)>, LiteralError> {
    let mut chars = text.trim().chars().peekable();
    if chars.next() != Some('{') {
        return Err(LiteralError::new("expected '{'"));
    }

    let mut pairs = Vec::new();
    loop {
        skip_ws(&mut chars);
        let key = match chars.next() {
            Some('}') => break,
            Some(q @ ('"' | '\'')) => parse_quoted(&mut chars, q)?,
            Some(other) => return Err(LiteralError::new(format!("unexpected '{}'", other))),
            None => return Err(LiteralError::new("unterminated mapping")),
        };

        skip_ws(&mut chars);
        if chars.next() != Some(':') {
            return Err(LiteralError::new(format!("expected ':' after {}", key)));
        }
        skip_ws(&mut chars);
        let value = parse_entry_value(&mut chars)?;
        pairs.push((key, value));

        skip_ws(&mut chars);
        match chars.next() {
            Some(',') => continue,
            Some('}') => break,
            Some(other) => return Err(LiteralError::new(format!("unexpected '{}'", other))),
            None => return Err(LiteralError::new("unterminated mapping")),
        }
    }

    skip_ws(&mut chars);
    match chars.next() {
        None => Ok(pairs),
        Some(other) => Err(LiteralError::new(format!(
            "unexpected '{}' after mapping",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number("4"), Some(json!(4)));
        assert_eq!(parse_number("-12"), Some(json!(-12)));
        assert_eq!(parse_number("37.77"), Some(json!(37.77)));
        assert_eq!(parse_number("1e3"), Some(json!(1000.0)));
        assert_eq!(parse_number(".5"), Some(json!(0.5)));
        assert_eq!(parse_number("5."), Some(json!(5.0)));
    }

    #[test]
    fn test_non_numbers() {
        for text in ["", "abc", "1.2.3", "inf", "nan", "1e", "--1", ".", "0x10", "1_000"] {
            assert_eq!(parse_number(text), None, "{:?} should not parse", text);
        }
    }

    #[test]
    fn test_huge_integer_becomes_float() {
        assert_eq!(
            parse_number("99999999999999999999"),
            Some(json!(99999999999999999999.0))
        );
    }

    #[test]
    fn test_scalar_falls_back_to_string() {
        assert_eq!(parse_scalar("Betty"), json!("Betty"));
        assert_eq!(parse_scalar("89"), json!(89));
    }

    #[test]
    fn test_dict_mixed_quotes_and_types() {
        let pairs = parse_dict(r#"{'first_name': "John", "age": 89, 'ratio': 0.5,}"#).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("first_name".to_string(), json!("John")),
                ("age".to_string(), json!(89)),
                ("ratio".to_string(), json!(0.5)),
            ]
        );
    }

    #[test]
    fn test_dict_empty() {
        assert_eq!(parse_dict("{}").unwrap(), vec![]);
        assert_eq!(parse_dict("  { }  ").unwrap(), vec![]);
    }

    #[test]
    fn test_dict_rejects_expressions() {
        for text in [
            "{'a': __import__('os')}",
            "{a: 1}",
            "{'a' 1}",
            "{'a': 1",
            "{'a': [1, 2]}",
            "{'a': 1} trailing",
            "'a': 1",
        ] {
            assert!(parse_dict(text).is_err(), "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_dict_string_values_keep_braces_and_commas() {
        let pairs = parse_dict(r#"{"text": "great, really {great}"}"#).unwrap();
        assert_eq!(pairs[0].1, json!("great, really {great}"));
    }
}
