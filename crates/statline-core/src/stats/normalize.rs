// Tolerant parsing of loosely-typed source fields.
//
// Score files are hand-maintained, so numeric columns show up as numbers,
// numeric strings, empty strings, or garbage. Every field goes through the
// helpers in this module exactly once, at ingestion. Anything that is not a
// number becomes 0; nothing here returns an error.

use serde_json::Value;

/// Coerce a loose value to a number.
///
/// - `null` -> 0
/// - `true`/`false` -> 1/0
/// - numbers -> themselves
/// - strings -> trimmed and parsed; the empty string is 0
/// - `[]` -> 0, `[x]` -> coercion of `x`
///
/// Returns `None` when the value is not a number (unparseable strings,
/// objects, multi-element arrays, non-finite results).
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => coerce_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => coerce_number(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

fn coerce_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    // `f64::from_str` also accepts "inf" and "nan"; neither is a count.
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a loose value to an integer count, treating anything that is not a
/// number as 0. Fractional values truncate toward zero.
pub fn parse_number_or_zero(value: &Value) -> i64 {
    coerce_number(value).map(truncate).unwrap_or(0)
}

/// Coerce an optional loose value to an integer, keeping "absent" and "not a
/// number" distinguishable from 0.
pub fn parse_optional_number(value: Option<&Value>) -> Option<i64> {
    value.and_then(coerce_number).map(truncate)
}

/// Like [`parse_number_or_zero`] but for an optional field: a missing field
/// is 0 as well.
pub fn parse_field_or_zero(value: Option<&Value>) -> i64 {
    value.map(parse_number_or_zero).unwrap_or(0)
}

fn truncate(v: f64) -> i64 {
    // `as` saturates at the i64 bounds.
    v.trunc() as i64
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy, everything else
/// is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as text, exactly as written. Empty strings and
/// non-scalars yield `None`.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => (!s.is_empty()).then(|| s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Did-not-play flag
// ---------------------------------------------------------------------------

/// A `did_not_play` marker as it appeared in the source, reduced to the two
/// facts the views care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DidNotPlay {
    /// Numeric coercion of the raw value; `None` when it is not a number.
    pub numeric: Option<f64>,
    /// Loose truthiness of the raw value.
    pub truthy: bool,
}

impl DidNotPlay {
    pub fn from_value(value: &Value) -> Self {
        DidNotPlay {
            numeric: coerce_number(value),
            truthy: is_truthy(value),
        }
    }

    /// The marker coerces to exactly 0.
    pub fn is_numeric_zero(&self) -> bool {
        self.numeric == Some(0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
