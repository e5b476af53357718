//! Shared domain types for ochat.
//!
//! This crate contains the types used across the workspace: conversations and
//! their messages, the inference backend wire format, configuration, and the
//! error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod inference;
