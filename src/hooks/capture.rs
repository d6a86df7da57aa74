//! Post-turn capture
//!
//! Persists the tail of a finished turn's transcript to the memory service.
//! Anything recall injected earlier in the turn is stripped out first, so
//! the store only ever sees what the participants actually said. Failures
//! are swallowed and logged, same as recall.

use crate::client::MemoryStore;
use crate::config::MemoryConfig;
use crate::hooks::TurnEndEvent;
use crate::marker;
use crate::models::{MessageRole, TurnMessage};
use std::sync::Arc;
use tracing::{debug, error};

/// Post-turn hook: filter, strip, persist.
pub struct CaptureHook {
    store: Arc<dyn MemoryStore>,
    config: Arc<MemoryConfig>,
}

impl CaptureHook {
    pub fn new(store: Arc<dyn MemoryStore>, config: Arc<MemoryConfig>) -> Self {
        Self { store, config }
    }

    /// Handle a post-turn event. Fire-and-forget: nothing is returned to
    /// the host and nothing raises past this boundary.
    pub async fn on_turn_end(&self, event: &TurnEndEvent) {
        if !event.success {
            debug!("capture: skipping failed turn");
            return;
        }

        if event.messages.is_empty() {
            debug!("capture: no messages to capture");
            return;
        }

        // Keep only well-formed messages, then the configured tail window,
        // oldest first.
        let recognized: Vec<TurnMessage> = event
            .messages
            .iter()
            .filter_map(|m| {
                let role = MessageRole::parse(m.role.as_deref()?)?;
                let content = m.content.as_deref()?;
                if content.is_empty() {
                    return None;
                }
                Some(TurnMessage {
                    role,
                    content: content.to_string(),
                })
            })
            .collect();

        let window_start = recognized
            .len()
            .saturating_sub(self.config.capture_message_count);

        // Strip injected context so memories never re-ingest themselves;
        // drop messages that were nothing but injection.
        let cleaned: Vec<TurnMessage> = recognized[window_start..]
            .iter()
            .map(|m| TurnMessage {
                role: m.role,
                content: marker::strip(&m.content),
            })
            .filter(|m| !m.content.is_empty())
            .collect();

        if cleaned.is_empty() {
            debug!("capture: nothing left after filtering");
            return;
        }

        debug!("capture: storing {} messages", cleaned.len());

        match self.store.add_messages(&cleaned).await {
            Ok(_) => debug!("capture: stored successfully"),
            Err(e) => error!("capture: {}", e),
        }
    }
}
