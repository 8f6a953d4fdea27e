//! Tolerant numeric coercion for backend JSON.
//!
//! Depending on the driver and the endpoint, numeric columns arrive as JSON
//! numbers ("budget": 1000000), as numeric strings ("budget": "1000000.50"),
//! or as null. Identifier columns show the same split. Everything funnels
//! through the helpers here so that a malformed value degrades to
//! zero/absent instead of poisoning a whole response with a parse error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value into a monetary amount.
///
/// Null, non-numeric and non-finite input all coerce to 0.0 so that sums
/// built on top never become NaN.
pub fn parse_amount(value: &Value) -> f64 {
    coerce_f64(value).unwrap_or(0.0)
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Serde helper: number-or-string field into `Option<f64>`.
/// Malformed input becomes `None` rather than a deserialization error.
pub fn flexible_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

/// Serde helper: number-or-string field into `f64`, zero on null/garbage.
pub fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(parse_amount).unwrap_or(0.0))
}

/// Serde helper: number-or-string count into `u64`, zero on null/garbage.
/// Negative and fractional input truncates toward zero.
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let n = value.as_ref().and_then(coerce_f64).unwrap_or(0.0);
    Ok(if n > 0.0 { n as u64 } else { 0 })
}

/// Serde helper: identifier field (number or string) into `Option<String>`.
///
/// The backend emits ids as integers on some endpoints and as strings on
/// others; query parameters are strings either way, so the client keeps a
/// single spelling.
pub fn id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(&json!(1000000)), 1000000.0);
        assert_eq!(parse_amount(&json!("1000000.50")), 1000000.50);
        assert_eq!(parse_amount(&json!(" 250 ")), 250.0);
    }

    #[test]
    fn parse_amount_coerces_garbage_to_zero() {
        assert_eq!(parse_amount(&Value::Null), 0.0);
        assert_eq!(parse_amount(&json!("n/a")), 0.0);
        assert_eq!(parse_amount(&json!("")), 0.0);
        assert_eq!(parse_amount(&json!({"nested": true})), 0.0);
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "flexible_amount", default)]
        budget: Option<f64>,
        #[serde(deserialize_with = "count_or_zero", default)]
        total: u64,
    }

    #[test]
    fn flexible_fields_survive_mixed_payloads() {
        let row: Row = serde_json::from_value(json!({"budget": "12.5", "total": "7"})).unwrap();
        assert_eq!(row.budget, Some(12.5));
        assert_eq!(row.total, 7);

        let row: Row = serde_json::from_value(json!({"budget": null, "total": null})).unwrap();
        assert_eq!(row.budget, None);
        assert_eq!(row.total, 0);

        let row: Row = serde_json::from_value(json!({"budget": "oops", "total": -3})).unwrap();
        assert_eq!(row.budget, None);
        assert_eq!(row.total, 0);
    }

    #[test]
    fn id_string_unifies_spellings() {
        #[derive(Deserialize)]
        struct WithId {
            #[serde(deserialize_with = "id_string", default)]
            id: Option<String>,
        }
        let v: WithId = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(v.id.as_deref(), Some("42"));
        let v: WithId = serde_json::from_value(json!({"id": "42"})).unwrap();
        assert_eq!(v.id.as_deref(), Some("42"));
        let v: WithId = serde_json::from_value(json!({"id": ""})).unwrap();
        assert_eq!(v.id, None);
    }
}
