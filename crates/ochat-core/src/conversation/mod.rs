//! Conversation persistence abstractions and CRUD service.
//!
//! `ConversationRepository` is the persistence contract; the infrastructure
//! layer implements it. `ConversationService` adds validation on top.

pub mod repository;
pub mod service;
pub mod title;
