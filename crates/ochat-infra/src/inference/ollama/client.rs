//! OllamaBackend -- concrete [`InferenceBackend`] for an Ollama daemon.
//!
//! Talks to the non-streaming subset of the Ollama HTTP API:
//! `GET /api/tags` for the model list and `POST /api/generate` with
//! `stream: false` for a single completion.

use std::time::Duration;

use ochat_core::inference::backend::InferenceBackend;
use ochat_types::error::InferenceError;
use ochat_types::inference::{GenerateRequest, GenerateResponse, ModelDescriptor, ModelList};

/// Ollama inference backend.
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaBackend {
    /// Create a backend rooted at `base_url` (e.g. `http://127.0.0.1:11434`).
    ///
    /// With `timeout` unset, requests wait for the backend indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::Connection(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, InferenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Inference backend returned an error");
        Err(InferenceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl InferenceBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, InferenceError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| InferenceError::Connection(format!("HTTP request failed: {e}")))?;

        let response = Self::check_status(response).await?;

        let list: ModelList = response.json().await.map_err(|e| {
            InferenceError::Deserialization(format!("failed to parse model list: {e}"))
        })?;

        tracing::debug!(count = list.models.len(), "Fetched model list");
        Ok(list.models)
    }

    #[tracing::instrument(skip_all, fields(model = %request.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(request)
            .send()
            .await
            .map_err(|e| InferenceError::Connection(format!("HTTP request failed: {e}")))?;

        let response = Self::check_status(response).await?;

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            InferenceError::Deserialization(format!("failed to parse generate response: {e}"))
        })?;

        tracing::debug!(chars = generated.response.len(), "Generation complete");
        Ok(generated.response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_list_models_passes_descriptors_through() {
        let router = Router::new().route(
            "/api/tags",
            get(|| async {
                Json(json!({
                    "models": [
                        {"name": "llama2:latest", "size": 3825819519u64, "digest": "abc", "details": {"family": "llama"}},
                        {"name": "mistral:7b", "expires_at": "never"}
                    ]
                }))
            }),
        );
        let base = spawn_stub(router).await;
        let backend = OllamaBackend::new(&format!("{base}/"), None).unwrap();

        let models = backend.list_models().await.unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name(), "llama2:latest");
        assert_eq!(models[0].size(), Some(3825819519));
        assert_eq!(models[0].details(), Some(&json!({"family": "llama"})));
        assert_eq!(models[1].get("expires_at"), Some(&json!("never")));
    }

    #[tokio::test]
    async fn test_generate_sends_non_streaming_request() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::default();
        let captured = seen.clone();
        let router = Router::new().route(
            "/api/generate",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({"model": "llama2", "response": "Hi there", "done": true}))
                }
            }),
        );
        let base = spawn_stub(router).await;
        let backend = OllamaBackend::new(&base, Some(Duration::from_secs(5))).unwrap();

        let text = backend
            .generate(&GenerateRequest::new("llama2", "Hello"))
            .await
            .unwrap();
        assert_eq!(text, "Hi there");
        assert_eq!(
            seen.lock().unwrap().clone().unwrap(),
            json!({"model": "llama2", "prompt": "Hello", "stream": false})
        );
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::NOT_FOUND, "model 'nope' not found") }),
        );
        let base = spawn_stub(router).await;
        let backend = OllamaBackend::new(&base, None).unwrap();

        let err = backend
            .generate(&GenerateRequest::new("nope", "Hello"))
            .await
            .unwrap_err();
        match err {
            InferenceError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_reply_without_response_field() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"done": true})) }),
        );
        let base = spawn_stub(router).await;
        let backend = OllamaBackend::new(&base, None).unwrap();

        let err = backend
            .generate(&GenerateRequest::new("llama2", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_connection_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = OllamaBackend::new(&format!("http://{addr}"), None).unwrap();
        let err = backend.list_models().await.unwrap_err();
        assert!(matches!(err, InferenceError::Connection(_)));
    }
}
