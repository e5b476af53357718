//! Business logic and port trait definitions for ochat.
//!
//! This crate defines the "ports" (repository and inference backend traits)
//! that the infrastructure layer implements, plus the services built on them.
//! It depends only on `ochat-types` -- never on `ochat-infra` or any
//! database/IO crate.

pub mod chat;
pub mod conversation;
pub mod inference;

#[cfg(test)]
pub(crate) mod testing;
