//! Field-level deserialisers for the loosely typed source documents.
//!
//! The published datasets store numbers as strings, use the literal text
//! `"None"` for missing values and occasionally leave coordinates blank.
//! These helpers absorb those quirks at decode time so the domain types stay
//! strongly typed.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Value substituted for a latitude or longitude that cannot be parsed.
pub const COORDINATE_SENTINEL: f64 = 0.0;

/// Literal used by the source data to mark an absent optional value.
pub(crate) const NONE_SENTINEL: &str = "None";

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl Scalar {
    fn to_degrees(&self) -> Option<f64> {
        match self {
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Unsigned(value) => Some(*value as f64),
            Self::Signed(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Unsigned(value) => write!(f, "{value}"),
            Self::Signed(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Decode a decimal-degree component given as text or number.
///
/// Blank, unparseable, non-finite and `null` values collapse to
/// [`COORDINATE_SENTINEL`]. Combine with `#[serde(default)]` so a missing key
/// behaves the same way.
pub(crate) fn lenient_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Scalar::to_degrees)
        .filter(|value| value.is_finite())
        .unwrap_or(COORDINATE_SENTINEL))
}

/// Decode a value kept verbatim as text, accepting JSON numbers as well.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(|scalar| scalar.to_string())
}

/// Decode an optional string, mapping the `"None"` literal to `None`.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| value != NONE_SENTINEL))
}
