//! BoxInferenceBackend -- object-safe dynamic dispatch wrapper for InferenceBackend.
//!
//! 1. Define an object-safe `InferenceBackendDyn` trait with boxed futures
//! 2. Blanket-impl `InferenceBackendDyn` for all `T: InferenceBackend`
//! 3. `BoxInferenceBackend` wraps `Box<dyn InferenceBackendDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use ochat_types::error::InferenceError;
use ochat_types::inference::{GenerateRequest, ModelDescriptor};

use super::backend::InferenceBackend;

/// Object-safe version of [`InferenceBackend`] with boxed futures.
pub trait InferenceBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn list_models_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ModelDescriptor>, InferenceError>> + Send + 'a>>;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>>;
}

impl<T: InferenceBackend> InferenceBackendDyn for T {
    fn name(&self) -> &str {
        InferenceBackend::name(self)
    }

    fn list_models_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ModelDescriptor>, InferenceError>> + Send + 'a>>
    {
        Box::pin(self.list_models())
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }
}

/// Type-erased inference backend.
///
/// Lets the application pick the real HTTP backend at startup and tests
/// substitute a scripted fake, without threading a generic parameter
/// through every service.
pub struct BoxInferenceBackend {
    inner: Box<dyn InferenceBackendDyn + Send + Sync>,
}

impl BoxInferenceBackend {
    /// Wrap a concrete `InferenceBackend` in a type-erased box.
    pub fn new<T: InferenceBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    /// Human-readable backend name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Models the backend can serve.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, InferenceError> {
        self.inner.list_models_boxed().await
    }

    /// Generate the full completion text for a prompt.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        self.inner.generate_boxed(request).await
    }
}
