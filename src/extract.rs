//! Path-safe navigation of provider response documents.

use serde_json::Value;

use crate::error::ProviderError;

/// Optional-chaining cursor over a JSON document.
///
/// Intermediate lookups on missing or mistyped nodes yield an absent cursor
/// instead of failing. Only the final [`JsonPath::required_str`] turns
/// absence into an error, which keeps "the provider said nothing" (an empty
/// string) apart from "the response was malformed".
#[derive(Debug, Clone, Copy)]
pub struct JsonPath<'a> {
    node: Option<&'a Value>,
}

impl<'a> JsonPath<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { node: Some(value) }
    }

    pub fn key(self, key: &str) -> Self {
        Self {
            node: self.node.and_then(|node| node.get(key)),
        }
    }

    pub fn index(self, index: usize) -> Self {
        Self {
            node: self.node.and_then(|node| node.get(index)),
        }
    }

    pub fn get(self) -> Option<&'a Value> {
        self.node.filter(|node| !node.is_null())
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.get().and_then(Value::as_str)
    }

    pub fn as_array(self) -> &'a [Value] {
        self.get()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn required_str(self, path: &str) -> Result<&'a str, ProviderError> {
        self.as_str().ok_or_else(|| ProviderError::MissingField {
            path: path.to_string(),
        })
    }
}

const GEMINI_TEXT_PATH: &str = "candidates[0].content.parts[0].text";

/// Reads `candidates[0].content.parts[0].text` from a Gemini response body.
pub fn extract_chat_text(raw_json: &str) -> Result<String, ProviderError> {
    let root: Value = serde_json::from_str(raw_json)?;
    let text = JsonPath::new(&root)
        .key("candidates")
        .index(0)
        .key("content")
        .key("parts")
        .index(0)
        .key("text")
        .required_str(GEMINI_TEXT_PATH)?;
    Ok(text.to_string())
}
