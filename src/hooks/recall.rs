//! Pre-turn recall
//!
//! Fetches remembered context for the incoming prompt and returns it wrapped
//! in the injection markers, ready to prepend to the turn. Memory is an
//! enhancement, not a dependency of the conversation: every store failure is
//! swallowed here and becomes "no injection this turn".

use crate::client::MemoryStore;
use crate::config::MemoryConfig;
use crate::format::format_search_results;
use crate::hooks::TurnStartEvent;
use crate::marker;
use crate::session::{is_profile_turn, SessionTracker};
use std::sync::Arc;
use tracing::{debug, error};

/// Profile identity requested during recall. The service resolves the
/// calling account; per-user profile selection stays a client-surface
/// concern.
const PROFILE_USER: &str = "default";

/// Pre-turn hook: search, format, optionally prepend the user profile.
pub struct RecallHook {
    store: Arc<dyn MemoryStore>,
    config: Arc<MemoryConfig>,
    sessions: SessionTracker,
}

impl RecallHook {
    pub fn new(store: Arc<dyn MemoryStore>, config: Arc<MemoryConfig>) -> Self {
        Self {
            store,
            config,
            sessions: SessionTracker::new(),
        }
    }

    /// Handle a pre-turn event. Returns the context to prepend, or `None`
    /// when there is nothing to inject (blank prompt, no results, or a
    /// failed store call).
    pub async fn on_turn_start(&self, event: &TurnStartEvent) -> Option<String> {
        let prompt = event.prompt.trim();
        if prompt.is_empty() {
            debug!("recall: empty prompt, skipping");
            return None;
        }

        let truncated: String = prompt.chars().take(80).collect();
        debug!("recall: searching for \"{}\"", truncated);

        let data = match self
            .store
            .search_all(&event.prompt, self.config.top_k, self.config.graph_depth)
            .await
        {
            Ok(data) => data,
            Err(e) => {
                error!("recall: search failed: {}", e);
                return None;
            }
        };

        let memory_context = format_search_results(&data, &self.config);

        let mut sections = Vec::new();

        if self.config.inject_profile {
            let turn = self.sessions.advance(&event.session_key);
            if is_profile_turn(turn, self.config.profile_frequency) {
                match self.store.get_profile(PROFILE_USER, false).await {
                    Ok(profile) if profile.status == "ok" && !profile.system_prompt.is_empty() => {
                        sections.push(format!("USER PROFILE:\n{}", profile.system_prompt));
                    }
                    Ok(profile) => {
                        debug!("recall: profile status \"{}\", skipping", profile.status);
                    }
                    Err(e) => {
                        debug!("recall: profile fetch failed, skipping: {}", e);
                    }
                }
            }
        }

        if !memory_context.is_empty() {
            sections.push(memory_context);
        }

        if sections.is_empty() {
            debug!("recall: no memories found");
            return None;
        }

        let context = sections.join("\n\n");
        debug!("recall: injecting {} chars of context", context.len());

        Some(marker::wrap(&context))
    }

    /// Drop cadence state for a session the host has closed.
    pub fn end_session(&self, session_key: &str) {
        self.sessions.end_session(session_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemoryError;
    use crate::models::{
        AddResponse, ProfileResponse, SearchResponse, SemanticResult, TurnMessage,
    };
    use crate::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store stub with tunable responses and call counters.
    struct StubStore {
        search_response: SearchResponse,
        fail_search: bool,
        profile: Option<ProfileResponse>,
        search_calls: AtomicUsize,
        profile_calls: AtomicUsize,
    }

    impl StubStore {
        fn with_results(search_response: SearchResponse) -> Self {
            Self {
                search_response,
                fail_search: false,
                profile: None,
                search_calls: AtomicUsize::new(0),
                profile_calls: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::with_results(SearchResponse::default())
        }

        fn with_profile(mut self, profile: ProfileResponse) -> Self {
            self.profile = Some(profile);
            self
        }

        fn failing_search(mut self) -> Self {
            self.fail_search = true;
            self
        }
    }

    #[async_trait::async_trait]
    impl MemoryStore for StubStore {
        async fn search_all(&self, _: &str, _: u32, _: u32) -> Result<SearchResponse> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_search {
                return Err(MemoryError::Api {
                    status: 408,
                    message: "request timed out".to_string(),
                });
            }
            Ok(self.search_response.clone())
        }

        async fn get_profile(&self, user_id: &str, _: bool) -> Result<ProfileResponse> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            self.profile.clone().ok_or(MemoryError::Api {
                status: 404,
                message: format!("no profile for {}", user_id),
            })
        }

        async fn add_messages(&self, _: &[TurnMessage]) -> Result<AddResponse> {
            unreachable!("recall never adds messages")
        }
    }

    fn alice_results() -> SearchResponse {
        SearchResponse {
            semantic: vec![SemanticResult {
                entity: "Alice".to_string(),
                entity_type: "person".to_string(),
                score: 0.9,
                facts: vec!["likes tea".to_string(), "works at Acme".to_string()],
                relations: vec![],
            }],
            ..Default::default()
        }
    }

    fn ok_profile() -> ProfileResponse {
        ProfileResponse {
            user_id: "default".to_string(),
            system_prompt: "Prefers terse answers.".to_string(),
            facts_used: 12,
            last_updated: None,
            status: "ok".to_string(),
            error: None,
        }
    }

    fn hook(store: StubStore, config: MemoryConfig) -> (RecallHook, Arc<StubStore>) {
        let store = Arc::new(store);
        let hook = RecallHook::new(store.clone(), Arc::new(config));
        (hook, store)
    }

    fn turn(prompt: &str) -> TurnStartEvent {
        TurnStartEvent {
            prompt: prompt.to_string(),
            session_key: "session-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_prompt_is_a_no_op() {
        let (hook, store) = hook(StubStore::with_results(alice_results()), MemoryConfig::default());

        assert!(hook.on_turn_start(&turn("")).await.is_none());
        assert!(hook.on_turn_start(&turn("   \n\t")).await.is_none());
        assert_eq!(store.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_are_formatted_and_wrapped() {
        let (hook, _) = hook(StubStore::with_results(alice_results()), MemoryConfig::default());

        let context = hook.on_turn_start(&turn("what does Alice like?")).await.unwrap();
        assert_eq!(
            context,
            marker::wrap("KNOWN FACTS:\n- Alice: likes tea\n- Alice: works at Acme")
        );
    }

    #[tokio::test]
    async fn test_no_results_means_no_injection() {
        let (hook, store) = hook(StubStore::empty(), MemoryConfig::default());

        assert!(hook.on_turn_start(&turn("anything")).await.is_none());
        assert_eq!(store.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_failure_is_swallowed() {
        let (hook, _) = hook(
            StubStore::with_results(alice_results()).failing_search(),
            MemoryConfig::default(),
        );

        // A timed-out search degrades to "no injection", never an error
        assert!(hook.on_turn_start(&turn("anything")).await.is_none());
    }

    #[tokio::test]
    async fn test_profile_cadence_turns_1_25_50() {
        let config = MemoryConfig {
            inject_profile: true,
            profile_frequency: 25,
            ..Default::default()
        };
        let (hook, store) = hook(
            StubStore::with_results(alice_results()).with_profile(ok_profile()),
            config,
        );

        for _ in 0..50 {
            hook.on_turn_start(&turn("hello")).await;
        }

        // turns 1, 25, and 50
        assert_eq!(store.profile_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_profile_section_comes_first() {
        let config = MemoryConfig {
            inject_profile: true,
            ..Default::default()
        };
        let (hook, _) = hook(
            StubStore::with_results(alice_results()).with_profile(ok_profile()),
            config,
        );

        let context = hook.on_turn_start(&turn("hello")).await.unwrap();
        let stripped = marker::strip(&format!("{}\nx", context));
        assert_eq!(stripped, "x");

        let profile_pos = context.find("USER PROFILE:").unwrap();
        let facts_pos = context.find("KNOWN FACTS:").unwrap();
        assert!(profile_pos < facts_pos);
        assert!(context.contains("Prefers terse answers."));
    }

    #[tokio::test]
    async fn test_failed_profile_does_not_block_recall() {
        let config = MemoryConfig {
            inject_profile: true,
            ..Default::default()
        };
        // No profile configured on the stub: the fetch errors on turn 1
        let (hook, _) = hook(StubStore::with_results(alice_results()), config);

        let context = hook.on_turn_start(&turn("hello")).await.unwrap();
        assert!(!context.contains("USER PROFILE:"));
        assert!(context.contains("KNOWN FACTS:"));
    }

    #[tokio::test]
    async fn test_non_ok_profile_is_skipped() {
        let config = MemoryConfig {
            inject_profile: true,
            ..Default::default()
        };
        let profile = ProfileResponse {
            status: "building".to_string(),
            ..ok_profile()
        };
        let (hook, _) = hook(
            StubStore::with_results(alice_results()).with_profile(profile),
            config,
        );

        let context = hook.on_turn_start(&turn("hello")).await.unwrap();
        assert!(!context.contains("USER PROFILE:"));
    }

    #[tokio::test]
    async fn test_profile_alone_still_injects() {
        let config = MemoryConfig {
            inject_profile: true,
            ..Default::default()
        };
        let (hook, _) = hook(StubStore::empty().with_profile(ok_profile()), config);

        let context = hook.on_turn_start(&turn("hello")).await.unwrap();
        assert_eq!(context, marker::wrap("USER PROFILE:\nPrefers terse answers."));
    }
}
