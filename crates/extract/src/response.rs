use serde_json::Value;

use crate::error::ExtractError;
use crate::schema::ExtractionResult;

/// The span from the first `{` to the last `}`, inclusive.
pub fn locate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a raw model response, tolerating prose around the JSON object.
///
/// An object carrying a non-null `error` marker is a failed extraction, never
/// a result.
pub fn parse_response(raw: &str) -> Result<ExtractionResult, ExtractError> {
    let span = locate_json_object(raw).ok_or_else(|| ExtractError::Parse {
        message: "no JSON object in response".to_string(),
        raw_response: raw.to_string(),
    })?;

    let value: Value = serde_json::from_str(span).map_err(|e| ExtractError::Parse {
        message: e.to_string(),
        raw_response: raw.to_string(),
    })?;

    if let Some(marker) = value.get("error").filter(|m| !m.is_null()) {
        let message = match marker {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return Err(ExtractError::Parse {
            message: format!("model reported an error: {}", message),
            raw_response: raw.to_string(),
        });
    }

    serde_json::from_value(value).map_err(ExtractError::Schema)
}
