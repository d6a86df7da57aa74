//! Rendering search results into prompt-ready text
//!
//! Each memory kind gets its own section; empty sections are omitted and the
//! rest are joined with blank lines in a fixed order. Store-supplied ordering
//! is preserved; these functions truncate but never re-sort.

use crate::config::MemoryConfig;
use crate::models::{
    EpisodicResult, ProceduralResult, RelationDirection, SearchResponse, SemanticResult,
};

/// One line per (entity, fact) pair, capped per entity.
fn format_facts(results: &[SemanticResult], cfg: &MemoryConfig) -> String {
    let mut lines = Vec::new();

    for r in results {
        for fact in r.facts.iter().take(cfg.max_facts_per_entity) {
            lines.push(format!("- {}: {}", r.entity, fact));
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("KNOWN FACTS:\n{}", lines.join("\n"))
}

/// One line per (entity, relation) pair, direction rendered as an arrow.
fn format_relations(results: &[SemanticResult], cfg: &MemoryConfig) -> String {
    let mut lines = Vec::new();

    for r in results {
        for rel in r.relations.iter().take(cfg.max_relations_per_entity) {
            let arrow = match rel.direction {
                RelationDirection::Outgoing => "->",
                RelationDirection::Incoming => "<-",
            };
            lines.push(format!(
                "- {} {} {} {} {}",
                r.entity, arrow, rel.relation_type, arrow, rel.target
            ));
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("RELATIONSHIPS:\n{}", lines.join("\n"))
}

/// One line per episode: summary, optional outcome, date of occurrence.
fn format_episodes(results: &[EpisodicResult], cfg: &MemoryConfig) -> String {
    let mut lines = Vec::new();

    for ep in results.iter().take(cfg.max_episodes) {
        let mut line = format!("- {}", ep.summary);
        if let Some(outcome) = &ep.outcome {
            line.push_str(&format!(" -> {}", outcome));
        }
        if let Some(created_at) = &ep.created_at {
            line.push_str(&format!(" ({})", created_at.format("%Y-%m-%d")));
        }
        lines.push(line);
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("PAST EVENTS:\n{}", lines.join("\n"))
}

/// One line per workflow: name, version tag past v1, abbreviated id,
/// arrow-joined steps, and the success/fail track record.
fn format_procedures(results: &[ProceduralResult], cfg: &MemoryConfig) -> String {
    let mut lines = Vec::new();

    for pr in results.iter().take(cfg.max_procedures) {
        let steps = pr
            .steps
            .iter()
            .take(cfg.max_steps_per_procedure)
            .map(|s| s.action.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        let version_tag = if pr.version > 1 {
            format!(" v{}", pr.version)
        } else {
            String::new()
        };
        let short_id: String = pr.id.chars().take(8).collect();

        lines.push(format!(
            "- {}{} [{}]: {} (success: {}, fail: {})",
            pr.name, version_tag, short_id, steps, pr.success_count, pr.fail_count
        ));
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("KNOWN WORKFLOWS:\n{}", lines.join("\n"))
}

/// Compose all sections in fixed order, omitting empty ones.
pub fn format_search_results(data: &SearchResponse, cfg: &MemoryConfig) -> String {
    let mut parts = Vec::new();

    let facts = format_facts(&data.semantic, cfg);
    if !facts.is_empty() {
        parts.push(facts);
    }

    let relations = format_relations(&data.semantic, cfg);
    if !relations.is_empty() {
        parts.push(relations);
    }

    let episodes = format_episodes(&data.episodic, cfg);
    if !episodes.is_empty() {
        parts.push(episodes);
    }

    let procedures = format_procedures(&data.procedural, cfg);
    if !procedures.is_empty() {
        parts.push(procedures);
    }

    parts.join("\n\n")
}
