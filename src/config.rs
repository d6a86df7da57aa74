//! Configuration for the memory layer
//!
//! All values are immutable per-process; the host supplies them once at
//! startup, either programmatically or via environment variables.

use std::env;
use std::time::Duration;

/// Tunables for recall, capture, and the remote client
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Bearer token for the memory service
    pub api_key: String,
    /// Service root URL (trailing slash stripped)
    pub base_url: String,
    /// Register the pre-turn recall hook
    pub auto_recall: bool,
    /// Register the post-turn capture hook
    pub auto_capture: bool,
    /// Search result limit per query
    pub top_k: u32,
    /// Graph traversal depth for combined search
    pub graph_depth: u32,
    /// Enable periodic user-profile injection
    pub inject_profile: bool,
    /// Profile refreshes on turn 1, then every Nth turn
    pub profile_frequency: u32,
    /// Facts rendered per entity
    pub max_facts_per_entity: usize,
    /// Relations rendered per entity
    pub max_relations_per_entity: usize,
    /// Episodic items rendered per recall
    pub max_episodes: usize,
    /// Procedures rendered per recall
    pub max_procedures: usize,
    /// Steps rendered per procedure
    pub max_steps_per_procedure: usize,
    /// Tail window of transcript messages persisted per turn
    pub capture_message_count: usize,
    /// Transport timeout for remote calls
    pub request_timeout: Duration,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.memlink.io".to_string(),
            auto_recall: true,
            auto_capture: true,
            top_k: 5,
            graph_depth: 2,
            inject_profile: false,
            profile_frequency: 25,
            max_facts_per_entity: 5,
            max_relations_per_entity: 5,
            max_episodes: 5,
            max_procedures: 3,
            max_steps_per_procedure: 8,
            capture_message_count: 10,
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Parse a positive integer from the environment, falling back on
/// absence, garbage, or non-positive values.
fn env_num<T: std::str::FromStr + PartialOrd + From<u8>>(key: &str, fallback: T) -> T {
    match env::var(key).ok().and_then(|v| v.parse::<T>().ok()) {
        Some(n) if n > T::from(0u8) => n,
        _ => fallback,
    }
}

fn env_flag(key: &str, fallback: bool) -> bool {
    match env::var(key).ok().as_deref() {
        Some("1") | Some("true") => true,
        Some("0") | Some("false") => false,
        _ => fallback,
    }
}

impl MemoryConfig {
    /// Build configuration from `MEMLINK_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("MEMLINK_API_KEY").unwrap_or_default(),
            base_url: env::var("MEMLINK_BASE_URL")
                .unwrap_or(defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            auto_recall: env_flag("MEMLINK_AUTO_RECALL", defaults.auto_recall),
            auto_capture: env_flag("MEMLINK_AUTO_CAPTURE", defaults.auto_capture),
            top_k: env_num("MEMLINK_TOP_K", defaults.top_k),
            graph_depth: env_num("MEMLINK_GRAPH_DEPTH", defaults.graph_depth),
            inject_profile: env_flag("MEMLINK_INJECT_PROFILE", defaults.inject_profile),
            profile_frequency: env_num("MEMLINK_PROFILE_FREQUENCY", defaults.profile_frequency),
            max_facts_per_entity: env_num(
                "MEMLINK_MAX_FACTS_PER_ENTITY",
                defaults.max_facts_per_entity,
            ),
            max_relations_per_entity: env_num(
                "MEMLINK_MAX_RELATIONS_PER_ENTITY",
                defaults.max_relations_per_entity,
            ),
            max_episodes: env_num("MEMLINK_MAX_EPISODES", defaults.max_episodes),
            max_procedures: env_num("MEMLINK_MAX_PROCEDURES", defaults.max_procedures),
            max_steps_per_procedure: env_num(
                "MEMLINK_MAX_STEPS_PER_PROCEDURE",
                defaults.max_steps_per_procedure,
            ),
            capture_message_count: env_num(
                "MEMLINK_CAPTURE_MESSAGE_COUNT",
                defaults.capture_message_count,
            ),
            request_timeout: Duration::from_secs(env_num(
                "MEMLINK_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MemoryConfig::default();
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.profile_frequency, 25);
        assert_eq!(cfg.max_procedures, 3);
        assert_eq!(cfg.capture_message_count, 10);
        assert!(!cfg.inject_profile);
        assert_eq!(cfg.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_env_num_rejects_garbage_and_zero() {
        env::set_var("MEMLINK_TEST_NUM_A", "not-a-number");
        assert_eq!(env_num("MEMLINK_TEST_NUM_A", 7u32), 7);

        env::set_var("MEMLINK_TEST_NUM_B", "0");
        assert_eq!(env_num("MEMLINK_TEST_NUM_B", 7u32), 7);

        env::set_var("MEMLINK_TEST_NUM_C", "12");
        assert_eq!(env_num("MEMLINK_TEST_NUM_C", 7u32), 12);
    }

    #[test]
    fn test_env_flag() {
        env::set_var("MEMLINK_TEST_FLAG_A", "true");
        assert!(env_flag("MEMLINK_TEST_FLAG_A", false));

        env::set_var("MEMLINK_TEST_FLAG_B", "0");
        assert!(!env_flag("MEMLINK_TEST_FLAG_B", true));

        assert!(env_flag("MEMLINK_TEST_FLAG_UNSET", true));
    }
}
