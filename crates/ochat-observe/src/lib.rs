//! Observability setup for ochat: structured logging and optional trace export.

pub mod tracing_setup;
