use serde_json::Value;

use super::model::{parse_canonical_date, Anniversary};
use crate::error::{AnniversaryError, Result};

/// Parse raw file text into the generic element list, requiring a JSON array of objects.
pub fn parse_document(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| AnniversaryError::MalformedDocument(e.to_string()))?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(AnniversaryError::MalformedDocument(format!(
                "expected a JSON array, found {}",
                kind_of(&other)
            )))
        }
    };

    if let Some((i, other)) = elements.iter().enumerate().find(|(_, v)| !v.is_object()) {
        return Err(AnniversaryError::MalformedDocument(format!(
            "element #{} is {}, expected an object",
            i + 1,
            kind_of(other)
        )));
    }

    Ok(elements)
}

/// Map validated elements onto records.
pub fn decode_records(elements: &[Value]) -> Result<Vec<Anniversary>> {
    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            // Impossible dates like 2024-02-30 get past a textual pattern
            if let Some(date) = element.get("anniversaryDate").and_then(Value::as_str) {
                parse_canonical_date(date)?;
            }
            serde_json::from_value(element.clone()).map_err(|e| {
                AnniversaryError::MalformedDocument(format!("element #{}: {e}", i + 1))
            })
        })
        .collect()
}

pub fn encode_records(records: &[Anniversary]) -> Result<Vec<Value>> {
    records
        .iter()
        .map(|r| {
            serde_json::to_value(r)
                .map_err(|e| AnniversaryError::MalformedDocument(e.to_string()))
        })
        .collect()
}

/// Compact text form written to disk
pub fn render_document(elements: &[Value]) -> Result<String> {
    serde_json::to_string(elements).map_err(|e| AnniversaryError::MalformedDocument(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
