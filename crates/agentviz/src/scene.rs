#![forbid(unsafe_code)]

//! Scene assembly: one render model out of connectivity, layout mode, and
//! the annotation cache.
//!
//! A [`Scene`] is recomputed from scratch on every relevant change —
//! connectivity update, mode switch, cache mutation. Nothing in it is
//! incremental or cached, including the synthetic nodes injected for
//! bubble-only agents: a Linear↔Radial switch recomputes them fresh like
//! everything else.

use agentviz_graph::{
    AgentId, ConnectivityEdge, LayoutEdge, LayoutMode, LayoutNode, LayoutSpacing, layout,
};
use agentviz_overlay::{AnnotationCache, OverlayAnchor, OverlayPositioner, PositionConfig};
use serde::Serialize;

/// One renderable bubble: cache entry plus its current anchor.
#[derive(Debug, Clone, Serialize)]
pub struct SceneBubble {
    pub conversation_id: String,
    pub text: String,
    pub agents: Vec<AgentId>,
    /// Connecting line between the first two participants, when present.
    pub edge: Option<LayoutEdge>,
    /// Attachment point in layout space; `None` hides the bubble.
    pub anchor: Option<OverlayAnchor>,
}

/// Complete render model consumed by the drawing layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub bubbles: Vec<SceneBubble>,
}

/// Builds [`Scene`]s from the current inputs.
#[derive(Debug, Clone, Copy)]
pub struct SceneBuilder {
    mode: LayoutMode,
    spacing: LayoutSpacing,
    positioner: OverlayPositioner,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(LayoutMode::Radial)
    }
}

impl SceneBuilder {
    #[must_use]
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            spacing: LayoutSpacing::default(),
            positioner: OverlayPositioner::default(),
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn spacing(mut self, spacing: LayoutSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn positioning(mut self, config: PositionConfig) -> Self {
        self.positioner = OverlayPositioner::new(config);
        self
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    /// Compute the full render model.
    ///
    /// Bubble-referenced agents are injected into the layout so bubble
    /// edges never dangle; each bubble is anchored against the freshly
    /// computed positions.
    #[must_use]
    pub fn build(&self, connectivity: &[ConnectivityEdge], cache: &AnnotationCache) -> Scene {
        let active = cache.active_agent_ids();
        let layout = layout(self.mode, connectivity, &active, &self.spacing);

        let bubbles = cache
            .bubbles()
            .iter()
            .map(|bubble| SceneBubble {
                conversation_id: bubble.conversation_id.clone(),
                text: bubble.text.clone(),
                agents: bubble.agents.clone(),
                edge: bubble.edge.clone(),
                anchor: self.positioner.anchor_for(bubble, &layout),
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            nodes = layout.nodes.len(),
            edges = layout.edges.len(),
            bubbles = cache.len(),
            "scene rebuilt"
        );

        Scene {
            nodes: layout.nodes,
            edges: layout.edges,
            bubbles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentviz_overlay::Conversation;
    use web_time::Instant;

    fn connectivity() -> Vec<ConnectivityEdge> {
        vec![
            ConnectivityEdge {
                origin: AgentId::from("frontman"),
                tools: vec![AgentId::from("search"), AgentId::from("math")],
            },
            ConnectivityEdge {
                origin: AgentId::from("search"),
                tools: vec![],
            },
            ConnectivityEdge {
                origin: AgentId::from("math"),
                tools: vec![],
            },
        ]
    }

    #[test]
    fn empty_cache_yields_plain_graph_scene() {
        let scene = SceneBuilder::default().build(&connectivity(), &AnnotationCache::default());
        assert_eq!(scene.nodes.len(), 3);
        assert_eq!(scene.edges.len(), 2);
        assert!(scene.bubbles.is_empty());
    }

    #[test]
    fn bubbles_are_anchored_against_fresh_layout() {
        let now = Instant::now();
        let mut cache = AnnotationCache::default();
        cache.ingest(
            &Conversation::new(
                "c1",
                vec![AgentId::from("frontman"), AgentId::from("search")],
                now,
            )
            .with_text("searching"),
            now,
        );
        let scene = SceneBuilder::default().build(&connectivity(), &cache);
        assert_eq!(scene.bubbles.len(), 1);
        assert!(scene.bubbles[0].anchor.is_some());
        assert!(scene.bubbles[0].edge.is_some());
    }

    #[test]
    fn bubble_only_agents_appear_as_nodes() {
        let now = Instant::now();
        let mut cache = AnnotationCache::default();
        cache.ingest(
            &Conversation::new(
                "c1",
                vec![AgentId::from("frontman"), AgentId::from("retired")],
                now,
            )
            .with_text("ghost call"),
            now,
        );
        let scene = SceneBuilder::default().build(&connectivity(), &cache);
        assert_eq!(scene.nodes.len(), 4);
        assert!(scene.nodes.iter().any(|n| n.id.as_str() == "retired"));
    }

    #[test]
    fn mode_switch_recomputes_from_scratch() {
        let cache = AnnotationCache::default();
        let radial = SceneBuilder::new(LayoutMode::Radial).build(&connectivity(), &cache);
        let linear = SceneBuilder::new(LayoutMode::Linear).build(&connectivity(), &cache);
        assert_eq!(radial.nodes.len(), linear.nodes.len());
        assert_eq!(radial.edges, linear.edges);
        assert_ne!(
            radial.nodes.iter().map(|n| (n.x, n.y)).collect::<Vec<_>>(),
            linear.nodes.iter().map(|n| (n.x, n.y)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn scene_serializes_for_the_render_boundary() {
        let scene = SceneBuilder::default().build(&connectivity(), &AnnotationCache::default());
        let json = serde_json::to_value(&scene).unwrap();
        assert!(json["nodes"].as_array().is_some());
        assert!(json["edges"].as_array().is_some());
        assert!(json["bubbles"].as_array().is_some());
    }
}
