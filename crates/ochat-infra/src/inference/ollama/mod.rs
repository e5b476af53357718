//! Ollama-compatible inference backend over HTTP.

pub mod client;

pub use client::OllamaBackend;
