//! Memory layer for a conversational agent host
//!
//! Wires a remote long-term-memory service into the host's turn loop:
//! - Recall: before each turn, search memory for the prompt and prepend
//!   the results (facts, relationships, past events, known workflows,
//!   periodically the user profile) as delimited context
//! - Capture: after each turn, persist the transcript tail, with anything
//!   recall injected stripped back out
//!
//! TURN LOOP:
//! PROMPT → RECALL → inject → agent responds → CAPTURE → store
//!
//! Both hooks are best-effort: a dead or slow memory service degrades to
//! "no memory this turn" and never disturbs the conversation.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod hooks;
pub mod marker;
pub mod models;
pub mod session;

pub use error::Result;

// Re-export the types a host embeds
pub use client::{MemoryClient, MemoryStore};
pub use config::MemoryConfig;
pub use hooks::{CaptureHook, RecallHook, TurnEndEvent, TurnStartEvent};
