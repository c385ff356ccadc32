//! JSON recovery - best-effort parsing of model output.
//!
//! Models wrap JSON in prose often enough that a strict parse alone loses
//! usable responses. The recovery path is deliberately isolated from the
//! strict path: strict `serde_json` first, then one retry on the substring
//! from the first `{` to the last `}`. Anything else is unparsable, and the
//! caller decides the fallback.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Model output that survived neither the strict parse nor brace recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model response is not JSON-recoverable")]
pub struct UnparsableResponse;

/// Parses model output into a JSON value, recovering prose-wrapped objects.
pub fn parse_json_object(text: &str) -> Result<Value, UnparsableResponse> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let start = text.find('{').ok_or(UnparsableResponse)?;
    let end = text.rfind('}').ok_or(UnparsableResponse)?;
    if end < start {
        return Err(UnparsableResponse);
    }

    serde_json::from_str(&text[start..=end]).map_err(|_| UnparsableResponse)
}

/// Parses model output into a typed value via [`parse_json_object`].
pub fn parse_into<T: DeserializeOwned>(text: &str) -> Result<T, UnparsableResponse> {
    let value = parse_json_object(text)?;
    serde_json::from_value(value).map_err(|_| UnparsableResponse)
}
