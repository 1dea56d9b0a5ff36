//! Lenient numeric handling for operator-entered values.
//!
//! Form fields accept free text. Anything that does not parse as a number
//! becomes NaN, which fails every bound comparison. serde_json writes
//! non-finite floats as `null`, so the matching deserializer maps `null`
//! back to NaN to keep such records loadable.

use serde::{Deserialize, Deserializer};

/// Parse operator input, yielding NaN for non-numeric text
pub fn parse_lenient(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Deserialize an `f64` that may have been written as `null`
pub fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Deserialize an optional `f64` where an absent field is `None` and a
/// present `null` is a non-numeric entry.
///
/// Pair with `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub fn present_nan_if_null<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(nan_if_null(deserializer)?))
}
