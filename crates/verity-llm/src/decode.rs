//! Decode-and-validate for model replies.
//!
//! Each helper returns `Ok(parsed)` or a [`ReplyParseError`]; the degradation
//! policy for a failure belongs to the call site.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use verity_core::errors::ReplyParseError;

static FIRST_INTEGER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[0-9０-９]+").ok());

/// First run of digits in the reply, ASCII or full-width. Values beyond `u64` saturate.
pub fn first_integer(reply: &str) -> Result<u64, ReplyParseError> {
    let found = FIRST_INTEGER
        .as_ref()
        .and_then(|re| re.find(reply))
        .ok_or_else(|| ReplyParseError::NoInteger {
            reply: reply.to_string(),
        })?;
    let mut value: u64 = 0;
    for c in found.as_str().chars() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            _ => c as u32 - '０' as u32,
        };
        value = value.saturating_mul(10).saturating_add(digit as u64);
    }
    Ok(value)
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn strip_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a JSON reply into `T`.
pub fn decode_json<T: DeserializeOwned>(reply: &str) -> Result<T, ReplyParseError> {
    serde_json::from_str(strip_fence(reply)).map_err(|e| ReplyParseError::InvalidJson {
        reason: e.to_string(),
    })
}

/// Read `{"<field>": [..]}` as integers. String entries holding integers are
/// accepted; anything else in the array is skipped.
pub fn decode_index_list(reply: &str, field: &str) -> Result<Vec<i64>, ReplyParseError> {
    let value: Value = decode_json(reply)?;
    let items = value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ReplyParseError::MissingField {
            field: field.to_string(),
        })?;
    Ok(items
        .iter()
        .filter_map(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .collect())
}
