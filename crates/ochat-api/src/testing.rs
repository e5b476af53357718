//! Test harness: a scripted inference backend and a router over a temp database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use ochat_core::conversation::repository::ConversationRepository;
use ochat_core::inference::backend::InferenceBackend;
use ochat_core::inference::box_backend::BoxInferenceBackend;
use ochat_infra::sqlite::pool::DatabasePool;
use ochat_types::error::InferenceError;
use ochat_types::inference::{GenerateRequest, ModelDescriptor};

use crate::http::router::build_router;
use crate::state::AppState;

/// Inference backend that answers every call the same way.
pub enum FakeBackend {
    Reply(String),
    Status(u16),
    Unreachable,
}

impl FakeBackend {
    pub fn replying(text: &str) -> Self {
        FakeBackend::Reply(text.to_string())
    }

    pub fn failing_with_status(status: u16) -> Self {
        FakeBackend::Status(status)
    }

    pub fn unreachable() -> Self {
        FakeBackend::Unreachable
    }

    fn refused() -> InferenceError {
        InferenceError::Connection("connection refused".to_string())
    }
}

impl InferenceBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, InferenceError> {
        if let FakeBackend::Unreachable = self {
            return Err(Self::refused());
        }
        let model = serde_json::json!({
            "name": "llama2:latest",
            "size": 3825819519u64,
            "details": {"family": "llama"},
            "expires_at": null
        });
        serde_json::from_value(model)
            .map(|m| vec![m])
            .map_err(|e| InferenceError::Deserialization(e.to_string()))
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<String, InferenceError> {
        match self {
            FakeBackend::Reply(text) => Ok(text.clone()),
            FakeBackend::Status(status) => Err(InferenceError::Status {
                status: *status,
                body: "internal error".to_string(),
            }),
            FakeBackend::Unreachable => Err(Self::refused()),
        }
    }
}

/// Router wired to a fresh SQLite file and a fake backend.
pub struct TestApp {
    router: Router,
    state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new(backend: FakeBackend) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        let state = AppState::from_parts(pool, BoxInferenceBackend::new(backend));

        Self {
            router: build_router(state.clone(), None),
            state,
            _dir: dir,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_empty("GET", uri).await
    }

    pub async fn send_empty(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Messages stored for a conversation, read straight from the repository.
    pub async fn stored_messages(&self, conversation_id: &str) -> u32 {
        let id = conversation_id.parse().unwrap();
        self.state.chat.repo().count_messages(&id).await.unwrap()
    }
}
