#![forbid(unsafe_code)]

//! Radial placement: the root at a canonical center, descendants fanned out
//! on concentric rings.
//!
//! Children of the root alternate sides (first discovered to the right,
//! second to the left, and so on); deeper nodes inherit their parent's
//! side. The ring for depth `d` has radius `base_radius + (d - 1) ·
//! radial_increment`. Within one (depth, side) group, siblings sit on the
//! ring arc at angles spread evenly over the quarter circle below the root,
//! measured from the downward vertical axis — earlier discovery means a
//! smaller angle, i.e. closer to the root's vertical axis. Right-side nodes
//! therefore have strictly greater x than the center, left-side strictly
//! less.
//!
//! Each independent root tree gets its own center, offset on x by
//! `tree_gap` in root discovery order.

use std::f64::consts::FRAC_PI_2;

use rustc_hash::FxHashMap;

use crate::connectivity::ConnectivityGraph;
use crate::traverse::Traversal;
use crate::{Layout, LayoutEdge, LayoutNode, LayoutSpacing};

/// Which half-plane a node occupies relative to its tree's center.
type Side = i8;

/// Place nodes on concentric rings.
#[must_use]
pub fn place(graph: &ConnectivityGraph, traversal: &Traversal, spacing: &LayoutSpacing) -> Layout {
    let n = graph.len();
    let roots = traversal.roots();

    // Ordinal of each tree, keyed by its root node.
    let mut tree_no = vec![0usize; n];
    for (ordinal, &root) in roots.iter().enumerate() {
        tree_no[root] = ordinal;
    }

    // Side assignment: root children alternate, descendants inherit.
    // Discovery order guarantees parents are assigned before children.
    let mut side: Vec<Side> = vec![0; n];
    let mut children_seen = vec![0usize; n];
    for &v in &traversal.order {
        match traversal.parent[v] {
            None => side[v] = 0,
            Some(parent) if traversal.depth[v] == 1 => {
                let root = traversal.root_of[v];
                side[v] = if children_seen[root] % 2 == 0 { 1 } else { -1 };
                children_seen[root] += 1;
                debug_assert_eq!(parent, root);
            }
            Some(parent) => side[v] = side[parent],
        }
    }

    // Arc group sizes per (tree, depth, side), then per-node slot within
    // the group in discovery order.
    let mut group_size: FxHashMap<(usize, usize, Side), usize> = FxHashMap::default();
    for v in 0..n {
        if traversal.depth[v] > 0 {
            *group_size
                .entry((traversal.root_of[v], traversal.depth[v], side[v]))
                .or_insert(0) += 1;
        }
    }
    let mut group_filled: FxHashMap<(usize, usize, Side), usize> = FxHashMap::default();

    let mut nodes = Vec::with_capacity(n);
    for &v in &traversal.order {
        let depth = traversal.depth[v];
        let center_x = spacing.center_x + tree_no[traversal.root_of[v]] as f64 * spacing.tree_gap;

        let (x, y) = if depth == 0 {
            (center_x, spacing.center_y)
        } else {
            let key = (traversal.root_of[v], depth, side[v]);
            let slot = group_filled.entry(key).or_insert(0);
            let arc_count = group_size[&key];
            // Evenly spread over the open quarter circle: earlier siblings
            // get smaller angles, so sin is strictly positive and strictly
            // increasing with discovery order.
            let theta = ((*slot + 1) as f64 / (arc_count + 1) as f64) * FRAC_PI_2;
            *slot += 1;

            let radius = spacing.base_radius + (depth - 1) as f64 * spacing.radial_increment;
            (
                center_x + f64::from(side[v]) * radius * theta.sin(),
                spacing.center_y + radius * theta.cos(),
            )
        };

        nodes.push(LayoutNode {
            id: graph.id(v).clone(),
            depth,
            x,
            y,
        });
    }

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
