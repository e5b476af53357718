//! Chat-turn orchestration.
//!
//! `ChatOrchestrator` sequences one user turn: resolve or create the
//! conversation, persist the user message, call the inference backend, then
//! persist the reply or roll the user message back.

pub mod orchestrator;
