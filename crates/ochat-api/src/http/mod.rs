//! HTTP/REST API layer for ochat.
//!
//! Axum-based JSON API under `/api/`, with permissive CORS and optional
//! static front-end hosting.

pub mod error;
pub mod handlers;
pub mod router;
