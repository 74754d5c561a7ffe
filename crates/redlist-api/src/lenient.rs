//! Tolerant decoding for fields the registry sends with inconsistent types.
//!
//! Counts and years arrive as numbers or strings depending on the endpoint,
//! and sometimes as free text. Integer parsing follows the usual "parse the
//! leading digits" rule: `" 2008"` and `"2008-2"` both yield `2008`, while
//! `"abc"` yields `None` instead of an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse the leading integer of `s`, ignoring leading whitespace.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

/// Deserialize an optional integer from a number or a string.
pub fn int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(int_from_value)
        .and_then(|i| T::try_from(i).ok()))
}

/// Deserialize an optional flag from a bool, `"true"`/`"false"` or `0`/`1`.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => n.as_i64().map(|i| i != 0),
        _ => None,
    })
}

/// Deserialize optional text, stringifying numbers (codes like `1.1` sometimes arrive unquoted).
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("2008"), Some(2008));
        assert_eq!(parse_int("  42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
    }

    #[test]
    fn test_parse_int_stops_at_first_non_digit() {
        assert_eq!(parse_int("2019-1"), Some(2019));
        assert_eq!(parse_int("12.9"), Some(12));
    }

    #[test]
    fn test_parse_int_rejects_non_numeric() {
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "int")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "flag")]
        marine: Option<bool>,
        #[serde(default, deserialize_with = "text")]
        code: Option<String>,
    }

    #[test]
    fn test_int_accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"year": 2008}"#).unwrap();
        assert_eq!(p.year, Some(2008));
        let p: Probe = serde_json::from_str(r#"{"year": "2015"}"#).unwrap();
        assert_eq!(p.year, Some(2015));
    }

    #[test]
    fn test_int_bad_input_is_none() {
        let p: Probe = serde_json::from_str(r#"{"year": "abc"}"#).unwrap();
        assert_eq!(p.year, None);
        let p: Probe = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(p.year, None);
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.year, None);
    }

    #[test]
    fn test_int_out_of_range_is_none() {
        let p: Probe = serde_json::from_str(r#"{"year": 99999999999}"#).unwrap();
        assert_eq!(p.year, None);
    }

    #[test]
    fn test_flag_variants() {
        let p: Probe = serde_json::from_str(r#"{"marine": false}"#).unwrap();
        assert_eq!(p.marine, Some(false));
        let p: Probe = serde_json::from_str(r#"{"marine": "TRUE"}"#).unwrap();
        assert_eq!(p.marine, Some(true));
        let p: Probe = serde_json::from_str(r#"{"marine": 0}"#).unwrap();
        assert_eq!(p.marine, Some(false));
        let p: Probe = serde_json::from_str(r#"{"marine": "maybe"}"#).unwrap();
        assert_eq!(p.marine, None);
    }

    #[test]
    fn test_text_stringifies_numbers() {
        let p: Probe = serde_json::from_str(r#"{"code": 1.1}"#).unwrap();
        assert_eq!(p.code.as_deref(), Some("1.1"));
        let p: Probe = serde_json::from_str(r#"{"code": "2.3.1"}"#).unwrap();
        assert_eq!(p.code.as_deref(), Some("2.3.1"));
    }
}
