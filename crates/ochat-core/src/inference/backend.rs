//! InferenceBackend trait definition.
//!
//! The capability interface to the text-generation service: list the models
//! it serves and produce a completion for a prompt. Uses RPITIT; see
//! [`super::box_backend::BoxInferenceBackend`] for dynamic dispatch.

use ochat_types::inference::{GenerateRequest, ModelDescriptor};
use ochat_types::error::InferenceError;

/// Trait for inference backends (a local Ollama daemon, test fakes, ...).
///
/// Calls are synchronous request/response from the caller's point of view:
/// `generate` resolves once the full completion is available.
///
/// Implementations live in ochat-infra (e.g., `OllamaBackend`).
pub trait InferenceBackend: Send + Sync {
    /// Human-readable backend name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Models the backend can serve.
    fn list_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ModelDescriptor>, InferenceError>> + Send;

    /// Generate the full completion text for a prompt.
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;
}
