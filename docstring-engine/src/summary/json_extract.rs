//! Pulls the first JSON object out of a free-text model answer.

use serde_json::Value;

use crate::errors::GenerationError;

/// Returns the first balanced `{ ... }` slice of `text`.
///
/// Braces inside JSON string literals do not count toward depth.
pub fn extract_json_object(text: &str) -> Result<&str, GenerationError> {
    let start = text.find('{').ok_or(GenerationError::NoJsonObject)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    Err(GenerationError::NoJsonObject)
}

/// [`extract_json_object`] followed by parsing.
pub fn extract_json(text: &str) -> Result<Value, GenerationError> {
    let slice = extract_json_object(text)?;
    serde_json::from_str(slice).map_err(|e| GenerationError::MalformedJson(e.to_string()))
}
