//! Lenient numeric deserializers for data that came out of browser storage.
//!
//! Stored catalogs and quotations were written by a UI that happily put
//! strings, nulls or negative numbers where prices and counts belong. Every
//! such value is coerced at the boundary so the engines only ever see
//! finite, non-negative numbers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Clamp anything that is not a finite, non-negative number to zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn deserialize_money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value).map(sanitize).unwrap_or(0.0))
}

pub fn deserialize_optional_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64).map(sanitize))
}

pub fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value)
        .map(sanitize)
        .map(|f| f.floor().min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

pub fn deserialize_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value)
        .map(sanitize)
        .map(|p| p.min(100.0))
        .unwrap_or(0.0))
}
