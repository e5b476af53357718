//! Inference backend implementations.
//!
//! Contains the concrete [`InferenceBackend`](ochat_core::inference::backend::InferenceBackend)
//! for an Ollama daemon, plus [`create_backend`] which builds the boxed backend
//! the application runs with from an [`AppConfig`].

pub mod ollama;

use std::time::Duration;

use ochat_core::inference::box_backend::BoxInferenceBackend;
use ochat_types::config::AppConfig;
use ochat_types::error::InferenceError;

use self::ollama::OllamaBackend;

/// Create a [`BoxInferenceBackend`] from the application configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_backend(config: &AppConfig) -> Result<BoxInferenceBackend, InferenceError> {
    let timeout = config.backend_timeout_secs.map(Duration::from_secs);
    let backend = OllamaBackend::new(&config.backend_url, timeout)?;

    tracing::debug!(
        backend = backend.base_url(),
        timeout_secs = ?config.backend_timeout_secs,
        "Inference backend configured"
    );

    Ok(BoxInferenceBackend::new(backend))
}
