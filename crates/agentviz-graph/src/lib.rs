#![forbid(unsafe_code)]

//! Connectivity model and deterministic layout engine for agent networks.
//!
//! An agent network is a directed "who can invoke whom" description. This
//! crate turns an arbitrary, possibly cyclic or disconnected connectivity
//! list into stable 2-D node positions under two layout modes:
//!
//! - [`LayoutMode::Linear`] — nodes on a single baseline, ordered by
//!   (depth, discovery order)
//! - [`LayoutMode::Radial`] — root at a canonical center, children fanned
//!   out on concentric rings, alternating right and left
//!
//! Both modes share one traversal ([`traverse`]): multi-source BFS from the
//! detected roots with cycle-closing edges dropped and transitive (diamond)
//! edges kept.
//!
//! All output is deterministic: identical input produces identical layout.
//! Coordinates are in abstract world units, not screen pixels. Malformed
//! input (cycles, self-loops, zero or multiple roots, disconnected
//! components) never panics; the engine degrades by skipping offending
//! edges and laying out each component independently.

pub mod connectivity;
pub mod linear;
pub mod radial;
pub mod traverse;

use serde::Serialize;

pub use connectivity::{AgentId, ConnectivityEdge, ConnectivityGraph};

/// Layout algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayoutMode {
    /// Single baseline, depth-then-discovery ordering.
    Linear,
    /// Concentric rings around the root(s).
    Radial,
}

/// A positioned node in the layout output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: AgentId,
    /// BFS distance from the nearest root.
    pub depth: usize,
    pub x: f64,
    pub y: f64,
}

/// A directed edge between two positioned nodes.
///
/// Only forward (non-cycle-inducing) edges discovered during traversal
/// appear; back-edges and self-loops never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutEdge {
    pub source: AgentId,
    pub target: AgentId,
}

/// Complete layout result.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl Layout {
    /// Look up a node position by agent id.
    #[must_use]
    pub fn position_of(&self, id: &AgentId) -> Option<(f64, f64)> {
        self.nodes
            .iter()
            .find(|node| &node.id == id)
            .map(|node| (node.x, node.y))
    }
}

/// Layout spacing parameters (world units).
#[derive(Debug, Clone, Copy)]
pub struct LayoutSpacing {
    /// Horizontal gap between consecutive nodes in Linear mode.
    pub node_gap: f64,
    /// Baseline y for Linear mode.
    pub baseline: f64,
    /// Canonical center for the first root.
    pub center_x: f64,
    pub center_y: f64,
    /// Ring radius for depth 1 in Radial mode.
    pub base_radius: f64,
    /// Radius added per additional depth ring.
    pub radial_increment: f64,
    /// Horizontal offset between independent root trees.
    pub tree_gap: f64,
}

impl Default for LayoutSpacing {
    fn default() -> Self {
        Self {
            node_gap: 160.0,
            baseline: 0.0,
            center_x: 0.0,
            center_y: 0.0,
            base_radius: 180.0,
            radial_increment: 120.0,
            tree_gap: 480.0,
        }
    }
}

/// Compute a layout for the given connectivity description.
///
/// `active` lists agent ids referenced only by ephemeral annotations; they
/// are injected as degenerate tool-less nodes so annotation edges never
/// dangle. Pure and deterministic; never panics on malformed input.
#[must_use]
pub fn layout(
    mode: LayoutMode,
    connectivity: &[ConnectivityEdge],
    active: &[AgentId],
    spacing: &LayoutSpacing,
) -> Layout {
    let graph = ConnectivityGraph::build(connectivity, active);
    let traversal = traverse::traverse(&graph);
    match mode {
        LayoutMode::Linear => linear::place(&graph, &traversal, spacing),
        LayoutMode::Radial => radial::place(&graph, &traversal, spacing),
    }
}
