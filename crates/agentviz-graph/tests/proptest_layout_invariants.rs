//! Property-based invariant tests for the agent-network layout engine.
//!
//! These verify structural invariants that must hold for **any**
//! connectivity description, however malformed (cycles, self-loops,
//! duplicate mentions, zero or multiple roots, disconnected components):
//!
//! 1. Determinism — same input always yields identical output
//! 2. Node coverage — one layout node per distinct id, plus injected ids
//! 3. No self-loop ever appears in the output edges
//! 4. No 2-cycle appears with both directions in the output edges
//! 5. Accepted edge set is acyclic
//! 6. Every edge endpoint is a laid-out node
//! 7. Depth 0 exists and depths are bounded by the node count
//! 8. Radial: first-discovered root child right of center, second left
//! 9. Linear: strictly increasing x along the output order, constant y
//! 10. No panic on arbitrary input (exercised by all of the above)

use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use agentviz_graph::{AgentId, ConnectivityEdge, Layout, LayoutMode, LayoutSpacing, layout};

fn agent(i: usize) -> AgentId {
    AgentId::new(format!("agent{i}"))
}

fn make_connectivity(n: usize, edges: &[(usize, usize)]) -> Vec<ConnectivityEdge> {
    let mut tools: FxHashMap<usize, Vec<AgentId>> = FxHashMap::default();
    for &(u, v) in edges {
        tools.entry(u % n.max(1)).or_default().push(agent(v % n.max(1)));
    }
    (0..n)
        .map(|i| ConnectivityEdge {
            origin: agent(i),
            tools: tools.remove(&i).unwrap_or_default(),
        })
        .collect()
}

fn arb_connectivity() -> impl Strategy<Value = Vec<ConnectivityEdge>> {
    (1usize..12, proptest::collection::vec((0usize..12, 0usize..12), 0..30))
        .prop_map(|(n, edges)| make_connectivity(n, &edges))
}

fn distinct_ids(connectivity: &[ConnectivityEdge]) -> FxHashSet<AgentId> {
    let mut ids = FxHashSet::default();
    for entry in connectivity {
        ids.insert(entry.origin.clone());
        ids.extend(entry.tools.iter().cloned());
    }
    ids
}

fn both_modes(connectivity: &[ConnectivityEdge]) -> [Layout; 2] {
    let spacing = LayoutSpacing::default();
    [
        layout(LayoutMode::Linear, connectivity, &[], &spacing),
        layout(LayoutMode::Radial, connectivity, &[], &spacing),
    ]
}

/// True if the directed edge set contains a cycle.
fn has_cycle(edges: &[(AgentId, AgentId)]) -> bool {
    let mut adj: FxHashMap<&AgentId, Vec<&AgentId>> = FxHashMap::default();
    let mut nodes: FxHashSet<&AgentId> = FxHashSet::default();
    for (u, v) in edges {
        adj.entry(u).or_default().push(v);
        nodes.insert(u);
        nodes.insert(v);
    }
    // 0 = unvisited, 1 = on stack, 2 = done
    let mut state: FxHashMap<&AgentId, u8> = FxHashMap::default();
    fn dfs<'a>(
        u: &'a AgentId,
        adj: &FxHashMap<&'a AgentId, Vec<&'a AgentId>>,
        state: &mut FxHashMap<&'a AgentId, u8>,
    ) -> bool {
        state.insert(u, 1);
        for &v in adj.get(u).into_iter().flatten() {
            match state.get(v).copied().unwrap_or(0) {
                1 => return true,
                0 => {
                    if dfs(v, adj, state) {
                        return true;
                    }
                }
                _ => {}
            }
        }
        state.insert(u, 2);
        false
    }
    nodes
        .iter()
        .any(|&u| state.get(u).copied().unwrap_or(0) == 0 && dfs(u, &adj, &mut state))
}

proptest! {
    #[test]
    fn determinism(connectivity in arb_connectivity()) {
        let spacing = LayoutSpacing::default();
        for mode in [LayoutMode::Linear, LayoutMode::Radial] {
            let first = layout(mode, &connectivity, &[], &spacing);
            let second = layout(mode, &connectivity, &[], &spacing);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn node_coverage(connectivity in arb_connectivity()) {
        let ids = distinct_ids(&connectivity);
        for out in both_modes(&connectivity) {
            prop_assert_eq!(out.nodes.len(), ids.len());
            let seen: FxHashSet<AgentId> =
                out.nodes.iter().map(|n| n.id.clone()).collect();
            prop_assert_eq!(seen.len(), out.nodes.len(), "duplicate node emitted");
            prop_assert_eq!(&seen, &ids);
        }
    }

    #[test]
    fn injected_active_ids_are_covered(connectivity in arb_connectivity()) {
        let ids = distinct_ids(&connectivity);
        let active = [AgentId::new("bubble-only-1"), AgentId::new("bubble-only-2")];
        let out = layout(LayoutMode::Radial, &connectivity, &active, &LayoutSpacing::default());
        prop_assert_eq!(out.nodes.len(), ids.len() + active.len());
    }

    #[test]
    fn no_self_loops_or_two_cycles(connectivity in arb_connectivity()) {
        for out in both_modes(&connectivity) {
            let pairs: FxHashSet<(AgentId, AgentId)> = out
                .edges
                .iter()
                .map(|e| (e.source.clone(), e.target.clone()))
                .collect();
            for (u, v) in &pairs {
                prop_assert_ne!(u, v, "self-loop in output");
                prop_assert!(
                    !pairs.contains(&(v.clone(), u.clone())),
                    "both directions of a 2-cycle in output"
                );
            }
        }
    }

    #[test]
    fn output_edges_are_acyclic(connectivity in arb_connectivity()) {
        for out in both_modes(&connectivity) {
            let edges: Vec<(AgentId, AgentId)> = out
                .edges
                .iter()
                .map(|e| (e.source.clone(), e.target.clone()))
                .collect();
            prop_assert!(!has_cycle(&edges));
        }
    }

    #[test]
    fn edge_endpoints_are_nodes(connectivity in arb_connectivity()) {
        for out in both_modes(&connectivity) {
            let ids: FxHashSet<&AgentId> = out.nodes.iter().map(|n| &n.id).collect();
            for edge in &out.edges {
                prop_assert!(ids.contains(&edge.source));
                prop_assert!(ids.contains(&edge.target));
            }
        }
    }

    #[test]
    fn depths_are_coherent(connectivity in arb_connectivity()) {
        for out in both_modes(&connectivity) {
            prop_assert!(out.nodes.iter().any(|n| n.depth == 0));
            // BFS distance can never exceed the node count.
            for node in &out.nodes {
                prop_assert!(node.depth < out.nodes.len());
            }
        }
    }

    #[test]
    fn linear_x_strictly_increases(connectivity in arb_connectivity()) {
        let out = layout(LayoutMode::Linear, &connectivity, &[], &LayoutSpacing::default());
        for pair in out.nodes.windows(2) {
            prop_assert!(pair[1].x > pair[0].x);
            prop_assert_eq!(pair[1].y, pair[0].y);
        }
    }
}

// ── Directed scenarios from observed behavior ───────────────────────────

#[test]
fn radial_symmetry_of_first_two_children() {
    let connectivity = make_connectivity(3, &[(0, 1), (0, 2)]);
    let spacing = LayoutSpacing::default();
    let out = layout(LayoutMode::Radial, &connectivity, &[], &spacing);
    let root_x = out.position_of(&agent(0)).unwrap().0;
    let c1_x = out.position_of(&agent(1)).unwrap().0;
    let c2_x = out.position_of(&agent(2)).unwrap().0;
    assert!(c1_x > root_x, "first child must be right of center");
    assert!(c2_x < root_x, "second child must be left of center");
}

#[test]
fn diamond_scenario_yields_three_edges() {
    // agent0 → {agent1, agent2}, agent1 → agent2: the transitive edge
    // into agent2 is legitimate and must survive.
    let connectivity = make_connectivity(3, &[(0, 1), (0, 2), (1, 2)]);
    let out = layout(LayoutMode::Radial, &connectivity, &[], &LayoutSpacing::default());
    assert_eq!(out.nodes.len(), 3);
    assert_eq!(out.edges.len(), 3);
    let spacing = LayoutSpacing::default();
    assert_eq!(
        out.position_of(&agent(0)).unwrap(),
        (spacing.center_x, spacing.center_y)
    );
}

#[test]
fn cycle_scenario_drops_exactly_the_back_edge() {
    let connectivity = make_connectivity(2, &[(0, 1), (1, 0)]);
    let out = layout(LayoutMode::Linear, &connectivity, &[], &LayoutSpacing::default());
    assert_eq!(out.edges.len(), 1);
}
