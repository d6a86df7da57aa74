//! Host event boundary
//!
//! The agent host fires a pre-turn event (answered with optional context to
//! prepend) and a post-turn event (fire-and-forget). These are the only two
//! entry points into the memory layer; everything the host sends arrives
//! loosely shaped and is validated here, not by the host.

pub mod capture;
pub mod recall;

pub use capture::CaptureHook;
pub use recall::RecallHook;

use serde::Deserialize;

/// Pre-turn event: the user prompt about to be answered.
#[derive(Debug, Clone)]
pub struct TurnStartEvent {
    pub prompt: String,
    pub session_key: String,
}

/// A transcript message as delivered by the host. Hosts routinely omit
/// fields for tool calls and other non-text entries, so both are optional
/// until the capture filter has had its say.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Post-turn event: the finished turn's transcript and outcome.
#[derive(Debug, Clone)]
pub struct TurnEndEvent {
    pub success: bool,
    pub messages: Vec<RawMessage>,
}
