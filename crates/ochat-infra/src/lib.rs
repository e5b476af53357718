//! Infrastructure layer for ochat.
//!
//! Contains implementations of the port traits defined in `ochat-core`:
//! SQLite conversation storage, the Ollama HTTP inference backend, and the
//! configuration file loader.

pub mod config;
pub mod inference;
pub mod sqlite;
