//! Wire types for the inference backend (Ollama-compatible HTTP API).
//!
//! Only the non-streaming subset is modelled: model listing via
//! `GET /api/tags` and single-shot generation via `POST /api/generate`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model advertised by the backend.
///
/// The descriptor is kept exactly as the backend sent it, `null` values and
/// unknown fields included, so it reaches clients unchanged. Known fields are
/// read through typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelDescriptor(pub Map<String, Value>);

impl ModelDescriptor {
    /// A descriptor carrying only a name.
    pub fn named(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        Self(fields)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Model name, or `""` when the backend omitted it.
    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    pub fn modified_at(&self) -> Option<&str> {
        self.str_field("modified_at")
    }

    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    pub fn digest(&self) -> Option<&str> {
        self.str_field("digest")
    }

    /// `details` unless absent or `null`.
    pub fn details(&self) -> Option<&Value> {
        self.0.get("details").filter(|v| !v.is_null())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Body of `GET /api/tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always `false`: responses are read in one piece.
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
        }
    }
}

/// Non-streaming reply of `POST /api/generate`.
///
/// `response` is required; a payload without it is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}
