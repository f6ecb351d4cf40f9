//! Lenient field decoding for artwork payloads.
//!
//! The service is not trusted to send well-typed values. Rather than failing
//! the whole page, text fields render whatever arrives and numeric fields
//! fall back to "unknown".

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

/// Decodes a free-text field.
///
/// - strings are taken verbatim
/// - `null` becomes an empty string
/// - any other value is rendered as compact JSON
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Decodes a year field.
///
/// Integers pass through, floats are truncated and numeric strings are
/// parsed. Everything else is `None`.
pub(crate) fn year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decodes a record id.
///
/// Integers pass through, as do floats with no fractional part and strings
/// holding an integer. Everything else is `None`.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decodes a record count. Anything that is not a non-negative number is 0.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count.and_then(|c| usize::try_from(c).ok()).unwrap_or(0))
}
