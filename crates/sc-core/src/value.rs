//! Response values

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A single answer given by one respondent.
///
/// Numbers order before text. Numbers compare numerically and text compares
/// lexicographically, which gives category sets a stable ascending order even
/// when a column mixes both kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResponseValue {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl ResponseValue {
    /// Interpret a raw cell: anything that parses as a finite number is a
    /// number, so "NaN" or "inf" stay text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => ResponseValue::Number(OrderedFloat(v)),
            _ => ResponseValue::Text(raw.to_string()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, ResponseValue::Number(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResponseValue::Number(v) => Some(v.into_inner()),
            ResponseValue::Text(_) => None,
        }
    }
}

/// Format a number the way survey answers are usually written: `3`, not `3.0`.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Number(v) => f.write_str(&format_number(v.into_inner())),
            ResponseValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ResponseValue {
    fn from(v: f64) -> Self {
        ResponseValue::Number(OrderedFloat(v))
    }
}

impl From<i64> for ResponseValue {
    fn from(v: i64) -> Self {
        ResponseValue::Number(OrderedFloat(v as f64))
    }
}

impl From<i32> for ResponseValue {
    fn from(v: i32) -> Self {
        ResponseValue::Number(OrderedFloat(v as f64))
    }
}

impl From<&str> for ResponseValue {
    fn from(v: &str) -> Self {
        ResponseValue::Text(v.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(v: String) -> Self {
        ResponseValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_sort_before_text() {
        let mut values = vec![
            ResponseValue::from("Yes"),
            ResponseValue::from(10),
            ResponseValue::from("No"),
            ResponseValue::from(2),
        ];
        values.sort();
        let shown: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(shown, vec!["2", "10", "No", "Yes"]);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(ResponseValue::parse("3"), ResponseValue::from(3));
        assert_eq!(ResponseValue::parse("2.5").to_string(), "2.5");
        assert_eq!(ResponseValue::parse("Agree"), ResponseValue::from("Agree"));
        assert_eq!(ResponseValue::parse(" 10 "), ResponseValue::from(10));
        assert_eq!(ResponseValue::parse("inf"), ResponseValue::from("inf"));
        assert_eq!(ResponseValue::from(4.0).to_string(), "4");
    }
}
