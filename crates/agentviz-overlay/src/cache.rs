#![forbid(unsafe_code)]

//! Bounded, time-expiring collection of active thought bubbles.
//!
//! # Design
//!
//! The cache exclusively owns the bubble collection; the layout engine only
//! reads the derived id-set ([`AnnotationCache::active_agent_ids`]) and the
//! renderer only reads [`AnnotationCache::bubbles`]. Mutation happens
//! through a small set of synchronous operations — `ingest`, `sweep`,
//! `pin`/`unpin`, `remove`, `clear` — assumed to be serialized on one UI
//! event loop.
//!
//! # Invariants
//!
//! 1. `bubbles().len() <= max_active` at the end of every `ingest`.
//! 2. No two live bubbles share a normalized text value.
//! 3. After a `sweep(now)`, no unpinned bubble has age ≥ ttl.
//! 4. A conversation id is ingested at most once until `clear()` resets
//!    the dedup state (eviction does not reset it).
//!
//! Duplicate-text suppression is checked against *live* bubbles only, so
//! an evicted text can legitimately reappear; duplicate-id suppression
//! survives eviction so a re-chunked conversation never flickers back.

use std::time::Duration;

use agentviz_graph::{AgentId, LayoutEdge};
use rustc_hash::FxHashSet;
use web_time::Instant;

use crate::bubble::{Conversation, ThoughtBubble, normalize_text};

/// Cache tuning knobs. The defaults match the production visualization:
/// five concurrent bubbles, ten-second lifetime, one-second sweep cadence.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum number of live bubbles.
    pub max_active: usize,
    /// Age at which an unpinned bubble becomes eligible for eviction.
    pub ttl: Duration,
    /// Cadence for the periodic sweep (consumed by [`crate::SweepDriver`]).
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_active: 5,
            ttl: Duration::from_millis(10_000),
            sweep_interval: Duration::from_millis(1_000),
        }
    }
}

/// The owned collection of active thought bubbles.
#[derive(Debug, Clone, Default)]
pub struct AnnotationCache {
    config: CacheConfig,
    bubbles: Vec<ThoughtBubble>,
    /// Conversation ids ever ingested; reset only by `clear`.
    seen_ids: FxHashSet<String>,
    /// Normalized texts of live bubbles, kept in sync with `bubbles`.
    live_texts: FxHashSet<String>,
    /// Conversation ids currently exempt from TTL eviction.
    pinned: FxHashSet<String>,
}

impl AnnotationCache {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Live bubbles in insertion order.
    #[must_use]
    pub fn bubbles(&self) -> &[ThoughtBubble] {
        &self.bubbles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Derived connecting lines for the render set.
    pub fn edges(&self) -> impl Iterator<Item = &LayoutEdge> {
        self.bubbles.iter().filter_map(|b| b.edge.as_ref())
    }

    /// Agent ids referenced by live bubbles, first-seen order, deduplicated.
    ///
    /// The layout engine injects these so bubble edges never dangle even
    /// when an agent has dropped out of the live connectivity description.
    #[must_use]
    pub fn active_agent_ids(&self) -> Vec<AgentId> {
        let mut ids = Vec::new();
        for bubble in &self.bubbles {
            for agent in &bubble.agents {
                if !ids.contains(agent) {
                    ids.push(agent.clone());
                }
            }
        }
        ids
    }

    /// Ingest one conversation event at `now`.
    ///
    /// A final event removes the conversation's bubble instead of creating
    /// one. No-ops: empty/whitespace text, normalized text colliding with a
    /// live bubble (across conversation ids), or a conversation id seen
    /// before. Otherwise the bubble is appended and capacity is enforced:
    /// expired bubbles drop first (oldest first), then the oldest remaining
    /// by `started_at`.
    pub fn ingest(&mut self, conversation: &Conversation, now: Instant) {
        if conversation.is_final {
            self.remove(&conversation.id);
            return;
        }
        let Some(bubble) = ThoughtBubble::from_conversation(conversation) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(id = %conversation.id, "skipped conversation without text");
            return;
        };

        if self.live_texts.contains(bubble.normalized_text()) {
            #[cfg(feature = "tracing")]
            tracing::trace!(id = %conversation.id, "duplicate bubble text suppressed");
            return;
        }
        if self.seen_ids.contains(&bubble.conversation_id) {
            #[cfg(feature = "tracing")]
            tracing::trace!(id = %conversation.id, "conversation already ingested");
            return;
        }

        self.seen_ids.insert(bubble.conversation_id.clone());
        self.live_texts.insert(bubble.normalized_text().to_string());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            id = %bubble.conversation_id,
            agents = bubble.agents.len(),
            "bubble ingested"
        );
        self.bubbles.push(bubble);

        self.enforce_capacity(now);
    }

    /// Drop bubbles over capacity: expired first (oldest expired first),
    /// then oldest-by-`started_at`. Capacity eviction does not honor pins;
    /// only TTL sweeps do.
    fn enforce_capacity(&mut self, now: Instant) {
        while self.bubbles.len() > self.config.max_active {
            let expired_oldest = self
                .bubbles
                .iter()
                .enumerate()
                .filter(|(_, b)| b.is_expired(now, self.config.ttl))
                .min_by_key(|(_, b)| b.started_at)
                .map(|(i, _)| i);

            let victim = match expired_oldest {
                Some(i) => i,
                None => {
                    // No expired entries left; displace the oldest.
                    match self
                        .bubbles
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, b)| b.started_at)
                        .map(|(i, _)| i)
                    {
                        Some(i) => i,
                        None => return,
                    }
                }
            };
            self.evict_at(victim, "capacity");
        }
    }

    fn evict_at(&mut self, index: usize, _reason: &str) {
        let bubble = self.bubbles.remove(index);
        self.live_texts.remove(bubble.normalized_text());
        self.pinned.remove(&bubble.conversation_id);
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %bubble.conversation_id, reason = _reason, "bubble evicted");
    }

    /// Remove every bubble aged ≥ ttl at `now`, except pinned ones.
    ///
    /// Pinned-but-expired bubbles persist until unpinned; the next sweep
    /// then removes them. Call only while the upstream stream is live
    /// (see [`crate::SweepDriver`]).
    pub fn sweep(&mut self, now: Instant) {
        let ttl = self.config.ttl;
        let mut index = 0;
        while index < self.bubbles.len() {
            let bubble = &self.bubbles[index];
            if bubble.is_expired(now, ttl) && !self.pinned.contains(&bubble.conversation_id) {
                self.evict_at(index, "ttl");
            } else {
                index += 1;
            }
        }
    }

    /// Exempt a live bubble from TTL eviction while the user inspects it.
    /// Unknown ids are ignored.
    pub fn pin(&mut self, conversation_id: &str) {
        if self
            .bubbles
            .iter()
            .any(|b| b.conversation_id == conversation_id)
        {
            self.pinned.insert(conversation_id.to_string());
        }
    }

    /// Lift the eviction exemption; the next sweep may remove the bubble.
    pub fn unpin(&mut self, conversation_id: &str) {
        self.pinned.remove(conversation_id);
    }

    #[must_use]
    pub fn is_pinned(&self, conversation_id: &str) -> bool {
        self.pinned.contains(conversation_id)
    }

    /// Explicitly remove a bubble (conversation ended upstream). The id
    /// stays in the dedup set until `clear`.
    pub fn remove(&mut self, conversation_id: &str) {
        if let Some(index) = self
            .bubbles
            .iter()
            .position(|b| b.conversation_id == conversation_id)
        {
            self.evict_at(index, "ended");
        }
    }

    /// Drop all bubbles, pins, and dedup state. Invoked when streaming ends
    /// or a different network is selected; previously-seen ids and texts
    /// may reappear as fresh bubbles afterwards.
    pub fn clear(&mut self) {
        self.bubbles.clear();
        self.seen_ids.clear();
        self.live_texts.clear();
        self.pinned.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!("annotation cache cleared");
    }
}
