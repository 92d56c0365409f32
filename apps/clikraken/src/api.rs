use std::io::Write;

use kraken_sdk::{ApiParams, Endpoint};
use serde_json::Value;

use crate::context::Context;
use crate::error::{CliError, CliResult};

/// Perform one call and unwrap its result.
///
/// `None` means there is nothing to display: the result was empty, the call
/// failed (already logged by the client), or raw mode printed the envelope
/// and debug mode is off.
pub async fn query_api(
    ctx: &Context,
    out: &mut dyn Write,
    endpoint: Endpoint,
    params: &ApiParams,
) -> CliResult<Option<Value>> {
    let envelope = ctx.client.call(endpoint, params).await?;

    if ctx.options.raw {
        let pretty = serde_json::to_string_pretty(&envelope)
            .map_err(|e| CliError::Output(e.into()))?;
        writeln!(out, "{}", pretty)?;
        if !ctx.options.debug {
            return Ok(None);
        }
    }

    Ok(envelope.into_result())
}

/// Entry of a result keyed by pair.
///
/// The exchange answers with its canonical pair name, so when `pair` is not
/// a key the single non `last` entry is used.
pub fn pair_entry<'a>(result: &'a Value, pair: &str) -> Option<&'a Value> {
    if let Some(entry) = result.get(pair) {
        return Some(entry);
    }

    let mut entries = result
        .as_object()?
        .iter()
        .filter(|(key, _)| key.as_str() != "last");
    let (_, entry) = entries.next()?;
    match entries.next() {
        Some(_) => None,
        None => Some(entry),
    }
}

pub fn require<'a>(value: &'a Value, key: &str, endpoint: Endpoint) -> CliResult<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| CliError::response(endpoint.method(), format!("missing field '{}'", key)))
}

/// Field as text, numbers are kept in their JSON spelling
pub fn text(value: &Value, key: &str, endpoint: Endpoint) -> CliResult<String> {
    match require(value, key, endpoint)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CliError::response(
            endpoint.method(),
            format!("field '{}' is not a string: {}", key, other),
        )),
    }
}

/// Element `index` of the array field `key`, as text
pub fn nth_text(value: &Value, key: &str, index: usize, endpoint: Endpoint) -> CliResult<String> {
    let element = require(value, key, endpoint)?.get(index).ok_or_else(|| {
        CliError::response(endpoint.method(), format!("field '{}' has no index {}", key, index))
    })?;
    scalar_text(element, endpoint)
}

pub fn scalar_text(value: &Value, endpoint: Endpoint) -> CliResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CliError::response(
            endpoint.method(),
            format!("expected a string or number, got {}", other),
        )),
    }
}

/// Numeric value of a number or numeric string
pub fn as_epoch(value: &Value, endpoint: Endpoint) -> CliResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        CliError::response(endpoint.method(), format!("invalid timestamp {}", value))
    })
}

pub fn epoch(value: &Value, key: &str, endpoint: Endpoint) -> CliResult<f64> {
    as_epoch(require(value, key, endpoint)?, endpoint)
}

pub fn as_object<'a>(
    value: &'a Value,
    endpoint: Endpoint,
) -> CliResult<&'a serde_json::Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CliError::response(endpoint.method(), "expected an object"))
}

pub fn as_array(value: &Value, endpoint: Endpoint) -> CliResult<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| CliError::response(endpoint.method(), "expected an array"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pair_entry_exact_and_canonical() {
        let result = json!({"XETHZEUR": [1, 2], "last": "42"});
        assert_eq!(pair_entry(&result, "XETHZEUR"), Some(&json!([1, 2])));
        // asked with the short name, answered with the canonical one
        assert_eq!(pair_entry(&result, "ETHEUR"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_pair_entry_ambiguous() {
        let result = json!({"XETHZEUR": [], "XXBTZEUR": []});
        assert_eq!(pair_entry(&result, "DASHEUR"), None);
    }

    #[test]
    fn test_field_helpers() {
        let value = json!({"price": "1.50", "count": 3, "a": ["250.1", "1"], "time": 1500000000.5});
        assert_eq!(text(&value, "price", Endpoint::Ticker).unwrap(), "1.50");
        assert_eq!(text(&value, "count", Endpoint::Ticker).unwrap(), "3");
        assert_eq!(nth_text(&value, "a", 0, Endpoint::Ticker).unwrap(), "250.1");
        assert_eq!(epoch(&value, "time", Endpoint::Ticker).unwrap(), 1500000000.5);

        let err = text(&value, "missing", Endpoint::Ticker).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected Ticker response: missing field 'missing'");
    }
}
