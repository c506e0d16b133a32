#![forbid(unsafe_code)]

//! Shared graph traversal: depth assignment, discovery order, and edge
//! acceptance.
//!
//! Multi-source BFS seeded with every detected root at once, so each node's
//! depth is its distance from the *nearest* root. A node is visited exactly
//! once. Edge handling for `u → v`:
//!
//! - self-loop (`v == u`): dropped
//! - `v` unvisited: tree edge, kept
//! - `v` visited and reachable back to `u` through already-accepted edges:
//!   cycle-closing, dropped
//! - `v` visited otherwise: transitive/diamond edge, kept
//!
//! The accepted edge set is therefore always acyclic, which is the exact
//! form of the "skip only edges back toward an ancestor" rule: an ancestor
//! is precisely a node that can reach `u` through kept edges.
//!
//! Degenerate input degrades instead of failing: with no root at all the
//! first node stands in as one, and components left unreached after the
//! seeded pass (detached cycles, annotation-injected ids) are promoted to
//! fresh depth-0 roots in universe order.

use std::collections::VecDeque;

use crate::connectivity::ConnectivityGraph;

/// Result of one traversal over a [`ConnectivityGraph`].
#[derive(Debug, Clone)]
pub struct Traversal {
    /// BFS distance from the nearest root.
    pub depth: Vec<usize>,
    /// BFS tree parent; `None` for roots.
    pub parent: Vec<Option<usize>>,
    /// The root whose tree each node belongs to (roots map to themselves).
    pub root_of: Vec<usize>,
    /// Node indices in discovery order.
    pub order: Vec<usize>,
    /// Inverse of `order`: discovery rank per node.
    pub rank: Vec<usize>,
    /// Accepted edges `(source, target)` in acceptance order.
    pub edges: Vec<(usize, usize)>,
}

impl Traversal {
    /// Roots in discovery order.
    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&v| self.parent[v].is_none())
            .collect()
    }
}

/// Can `from` reach `to` through the accepted edge set?
fn reaches(accepted: &[Vec<usize>], from: usize, to: usize) -> bool {
    if from == to {
        return true;
    }
    let mut seen = vec![false; accepted.len()];
    let mut stack = vec![from];
    seen[from] = true;
    while let Some(u) = stack.pop() {
        for &v in &accepted[u] {
            if v == to {
                return true;
            }
            if !seen[v] {
                seen[v] = true;
                stack.push(v);
            }
        }
    }
    false
}

/// Mutable traversal state, separated out so visits stay one call.
struct Walk {
    depth: Vec<usize>,
    parent: Vec<Option<usize>>,
    root_of: Vec<usize>,
    order: Vec<usize>,
    rank: Vec<usize>,
    visited: Vec<bool>,
}

impl Walk {
    fn new(n: usize) -> Self {
        Self {
            depth: vec![0; n],
            parent: vec![None; n],
            root_of: vec![0; n],
            order: Vec::with_capacity(n),
            rank: vec![0; n],
            visited: vec![false; n],
        }
    }

    fn visit(&mut self, v: usize, d: usize, p: Option<usize>, r: usize) {
        self.visited[v] = true;
        self.depth[v] = d;
        self.parent[v] = p;
        self.root_of[v] = r;
        self.rank[v] = self.order.len();
        self.order.push(v);
    }
}

/// Traverse the graph, assigning depths and accepting edges.
#[must_use]
pub fn traverse(graph: &ConnectivityGraph) -> Traversal {
    let n = graph.len();
    let mut walk = Walk::new(n);
    let mut edges = Vec::new();
    let mut accepted: Vec<Vec<usize>> = vec![Vec::new(); n];

    if n == 0 {
        return Traversal {
            depth: walk.depth,
            parent: walk.parent,
            root_of: walk.root_of,
            order: walk.order,
            rank: walk.rank,
            edges,
        };
    }

    // Seed every detected root at depth 0; a rootless graph falls back to
    // the first node.
    let mut seeds = graph.roots();
    if seeds.is_empty() {
        seeds.push(0);
    }
    let mut queue = VecDeque::new();
    for &r in &seeds {
        walk.visit(r, 0, None, r);
        queue.push_back(r);
    }

    loop {
        while let Some(u) = queue.pop_front() {
            for &v in graph.tools_of(u) {
                if v == u {
                    continue;
                }
                if !walk.visited[v] {
                    walk.visit(v, walk.depth[u] + 1, Some(u), walk.root_of[u]);
                    edges.push((u, v));
                    accepted[u].push(v);
                    queue.push_back(v);
                } else if !reaches(&accepted, v, u) {
                    edges.push((u, v));
                    accepted[u].push(v);
                }
            }
        }

        // Promote the next unreached node (detached cycle or similar) to a
        // fresh root and keep going until the whole universe is covered.
        match (0..n).find(|&v| !walk.visited[v]) {
            Some(next) => {
                walk.visit(next, 0, None, next);
                queue.push_back(next);
            }
            None => break,
        }
    }

    Traversal {
        depth: walk.depth,
        parent: walk.parent,
        root_of: walk.root_of,
        order: walk.order,
        rank: walk.rank,
        edges,
    }
}
