//! Lenient field deserializers.
//!
//! Settings arrive from form controls and hand-edited files, so a field that
//! should be a number may be a numeric string ("46", "2.5mm"), an empty
//! string, `null` or something unrelated. These helpers never fail on the
//! value itself: numbers and flags become a [`Field`] that remembers whether
//! the value was missing or malformed, and strings become empty. The choice of
//! default is left to the resolver.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// A leniently read setting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Field<T> {
    /// Absent, `null` or blank.
    #[default]
    Missing,
    /// Present but unusable.
    Malformed,
    Value(T),
}

impl<T> Field<T> {
    /// The value, if one was read.
    pub fn value(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

/// Any scalar a loosely typed source might put in a field.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Null(()),
    Other(IgnoredAny),
}

/// Parses the longest numeric prefix of `text`, the way form inputs are read.
///
/// Returns `None` for empty input, non-numeric input and non-finite values.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let mut end = trimmed.len();
    while end > 0 {
        if trimmed.is_char_boundary(end) {
            if let Ok(value) = trimmed[..end].parse::<f64>() {
                return value.is_finite().then_some(value);
            }
        }
        end -= 1;
    }
    None
}

/// Deserializes a number from a number or numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<Field<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Number(n) if n.is_finite() => Field::Value(n),
        LooseValue::Text(s) if s.trim().is_empty() => Field::Missing,
        LooseValue::Text(s) => parse_number(&s).map_or(Field::Malformed, Field::Value),
        LooseValue::Null(()) => Field::Missing,
        _ => Field::Malformed,
    })
}

/// Deserializes a boolean from a bool, a checkbox-like string or a number.
pub fn flag<'de, D>(deserializer: D) -> Result<Field<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Flag(b) => Field::Value(b),
        LooseValue::Number(n) => Field::Value(n != 0.0),
        LooseValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" | "checked" => Field::Value(true),
            "false" | "off" | "no" | "0" => Field::Value(false),
            "" => Field::Missing,
            _ => Field::Malformed,
        },
        LooseValue::Null(()) => Field::Missing,
        LooseValue::Other(_) => Field::Malformed,
    })
}

/// Deserializes a display string from a string, number or bool.
///
/// Integral numbers print without a fractional part, so a spreadsheet year
/// `1975.0` becomes `"1975"`. `null` becomes an empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_to_string(LooseValue::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`string`], but keeps `null` as `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_to_string(LooseValue::deserialize(deserializer)?))
}

/// Deserializes an optional free-form string, dropping anything that is not
/// text.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Text(s) => Some(s),
        _ => None,
    })
}

fn loose_to_string(value: LooseValue) -> Option<String> {
    match value {
        LooseValue::Text(s) => Some(s),
        LooseValue::Number(n) => Some(format_number(n)),
        LooseValue::Flag(b) => Some(b.to_string()),
        LooseValue::Null(()) | LooseValue::Other(_) => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
