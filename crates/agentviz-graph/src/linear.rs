#![forbid(unsafe_code)]

//! Linear placement: every node on one baseline, ordered by depth and then
//! by discovery order, with equal horizontal spacing.

use crate::connectivity::ConnectivityGraph;
use crate::traverse::Traversal;
use crate::{Layout, LayoutEdge, LayoutNode, LayoutSpacing};

/// Place nodes on a single row.
#[must_use]
pub fn place(graph: &ConnectivityGraph, traversal: &Traversal, spacing: &LayoutSpacing) -> Layout {
    let mut ordered: Vec<usize> = (0..graph.len()).collect();
    ordered.sort_by_key(|&v| (traversal.depth[v], traversal.rank[v]));

    let nodes = ordered
        .iter()
        .enumerate()
        .map(|(slot, &v)| LayoutNode {
            id: graph.id(v).clone(),
            depth: traversal.depth[v],
            x: spacing.center_x + slot as f64 * spacing.node_gap,
            y: spacing.baseline,
        })
        .collect();

    let edges = traversal
        .edges
        .iter()
        .map(|&(u, v)| LayoutEdge {
            source: graph.id(u).clone(),
            target: graph.id(v).clone(),
        })
        .collect();

    Layout { nodes, edges }
}
