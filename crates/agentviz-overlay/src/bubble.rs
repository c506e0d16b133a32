#![forbid(unsafe_code)]

//! Conversation events and the immutable thought-bubble entry.

use std::time::Duration;

use agentviz_graph::{AgentId, LayoutEdge};
use web_time::Instant;

/// One conversation event from the upstream stream parser.
///
/// The collaborator has already validated and timestamped the event; this
/// core never parses wire formats. `agents` keeps insertion order — the
/// first two participants define the rendered connecting line.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    pub agents: Vec<AgentId>,
    pub text: Option<String>,
    pub started_at: Instant,
    /// Set when the collaborator reports the conversation ended.
    pub is_final: bool,
}

impl Conversation {
    #[must_use]
    pub fn new(id: impl Into<String>, agents: Vec<AgentId>, started_at: Instant) -> Self {
        Self {
            id: id.into(),
            agents,
            text: None,
            started_at,
            is_final: false,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn finished(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// Normalized form of bubble text used for duplicate suppression:
/// trimmed and case-folded.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One cache entry. Bubbles are replace-or-evict, never edited.
#[derive(Debug, Clone)]
pub struct ThoughtBubble {
    pub conversation_id: String,
    pub agents: Vec<AgentId>,
    pub text: String,
    pub started_at: Instant,
    /// Connecting line between the first two participants, when there are
    /// at least two.
    pub edge: Option<LayoutEdge>,
    normalized: String,
}

impl ThoughtBubble {
    /// Build a bubble from a conversation carrying non-empty text.
    ///
    /// Returns `None` for empty or whitespace-only text. Duplicate agent
    /// mentions collapse to the first occurrence so the derived edge never
    /// connects an agent to itself.
    #[must_use]
    pub fn from_conversation(conversation: &Conversation) -> Option<Self> {
        let text = conversation.text.as_deref().unwrap_or("");
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return None;
        }

        let mut agents: Vec<AgentId> = Vec::with_capacity(conversation.agents.len());
        for agent in &conversation.agents {
            if !agents.contains(agent) {
                agents.push(agent.clone());
            }
        }

        let edge = (agents.len() >= 2).then(|| LayoutEdge {
            source: agents[0].clone(),
            target: agents[1].clone(),
        });

        Some(Self {
            conversation_id: conversation.id.clone(),
            agents,
            text: text.trim().to_string(),
            started_at: conversation.started_at,
            edge,
            normalized,
        })
    }

    /// Normalized text key for duplicate suppression.
    #[must_use]
    pub fn normalized_text(&self) -> &str {
        &self.normalized
    }

    /// Age relative to `now`; zero if `now` precedes `started_at`.
    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Whether the bubble has outlived `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}
