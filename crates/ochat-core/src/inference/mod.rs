//! Inference backend abstractions.
//!
//! - `InferenceBackend`: RPITIT trait for concrete backend implementations
//! - `BoxInferenceBackend`: object-safe wrapper for dynamic dispatch

pub mod backend;
pub mod box_backend;
