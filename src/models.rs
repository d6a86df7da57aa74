//! Wire data model for the remote memory service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//
// ================= Turn Messages =================
//

/// Role of a transcript message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Parse a host-supplied role string; unrecognized roles are filtered
    /// out of capture rather than guessed at.
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// A single transcript message submitted to the memory service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnMessage {
    pub role: MessageRole,
    pub content: String,
}

//
// ================= Search Results =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelationDirection {
    Incoming,
    Outgoing,
}

/// A graph edge attached to a semantic entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "type")]
    pub relation_type: String,
    pub direction: RelationDirection,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An entity with its facts and relations, relevance-ordered by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticResult {
    pub entity: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub score: f64,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

/// A remembered event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodicResult {
    pub id: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One step of a remembered workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    pub action: String,
}

/// A remembered workflow with its success/failure track record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProceduralResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub steps: Vec<ProcedureStep>,
    pub success_count: u32,
    pub fail_count: u32,
    pub version: u32,
    pub score: f64,
}

/// Combined search response across all three memory kinds.
///
/// Each sequence arrives relevance-descending from the store; that order is
/// preserved end to end and never re-sorted here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub semantic: Vec<SemanticResult>,
    #[serde(default)]
    pub episodic: Vec<EpisodicResult>,
    #[serde(default)]
    pub procedural: Vec<ProceduralResult>,
}

//
// ================= Profile =================
//

/// Snapshot of the service-maintained user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub system_prompt: String,
    pub facts_used: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

//
// ================= Service Receipts =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub entities: u64,
    pub facts: u64,
    pub relations: u64,
    pub embeddings: u64,
    #[serde(default)]
    pub by_type: HashMap<String, u64>,
}
