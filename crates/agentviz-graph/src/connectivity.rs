#![forbid(unsafe_code)]

//! Connectivity snapshot: agent ids and the indexed adjacency built from a
//! `{origin, tools}` description list.
//!
//! The graph is an immutable snapshot rebuilt whenever the source network
//! changes. Input order is preserved everywhere (id table, adjacency) so
//! downstream traversal and placement are deterministic without sorting.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque agent identifier, unique within one network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AgentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a connectivity description: `origin` may invoke each tool.
///
/// The full description is an ordered list of these. It may contain cycles,
/// self-loops, duplicate mentions, and zero or multiple roots; none of that
/// is rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityEdge {
    pub origin: AgentId,
    pub tools: Vec<AgentId>,
}

/// Indexed, immutable view of one connectivity description.
///
/// Nodes are addressed by dense `usize` indices in first-seen order; the
/// id table maps back to [`AgentId`]s. Adjacency preserves the listed tool
/// order (with duplicates collapsed) and tracks in-degrees for root
/// detection.
#[derive(Debug, Clone)]
pub struct ConnectivityGraph {
    ids: Vec<AgentId>,
    index: FxHashMap<AgentId, usize>,
    /// adj[u] = tool indices of u, in listed order, deduplicated.
    adj: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl ConnectivityGraph {
    /// Build a graph from a connectivity description plus extra ids that
    /// must stay visible (agents referenced only by active annotations).
    ///
    /// Extra ids get degenerate tool-less entries. Self-loops are recorded
    /// in the adjacency (the traversal skips them); duplicate tool mentions
    /// collapse to the first occurrence.
    #[must_use]
    pub fn build(connectivity: &[ConnectivityEdge], active: &[AgentId]) -> Self {
        let mut graph = Self {
            ids: Vec::new(),
            index: FxHashMap::default(),
            adj: Vec::new(),
            in_degree: Vec::new(),
        };

        // Universe in first-seen order: origins and tools, then active ids.
        for entry in connectivity {
            graph.intern(&entry.origin);
            for tool in &entry.tools {
                graph.intern(tool);
            }
        }
        for id in active {
            graph.intern(id);
        }

        for entry in connectivity {
            let u = graph.index[&entry.origin];
            for tool in &entry.tools {
                let v = graph.index[tool];
                if graph.adj[u].contains(&v) {
                    continue;
                }
                graph.adj[u].push(v);
                // Self-loops never make a node its own root.
                if u != v {
                    graph.in_degree[v] += 1;
                }
            }
        }

        graph
    }

    fn intern(&mut self, id: &AgentId) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.clone());
        self.index.insert(id.clone(), idx);
        self.adj.push(Vec::new());
        self.in_degree.push(0);
        idx
    }

    /// Number of distinct agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Agent id for a node index.
    #[must_use]
    pub fn id(&self, idx: usize) -> &AgentId {
        &self.ids[idx]
    }

    /// All agent ids in first-seen order.
    #[must_use]
    pub fn ids(&self) -> &[AgentId] {
        &self.ids
    }

    /// Tool indices of `idx`, in listed order.
    #[must_use]
    pub fn tools_of(&self, idx: usize) -> &[usize] {
        &self.adj[idx]
    }

    /// Root nodes: no incoming edge, in universe order.
    ///
    /// Degenerate inputs are the caller's problem to interpret: a fully
    /// cyclic graph yields no roots here, and annotation-injected ids each
    /// show up as their own root.
    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&v| self.in_degree[v] == 0)
            .collect()
    }
}
