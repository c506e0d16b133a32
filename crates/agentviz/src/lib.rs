#![forbid(unsafe_code)]

//! Agent-network visualization core.
//!
//! Re-exports the two halves of the pipeline and adds what sits between
//! them:
//!
//! - [`agentviz_graph`] — connectivity model and the Linear/Radial layout
//!   engine (pure, deterministic)
//! - [`agentviz_overlay`] — bounded, time-expiring thought-bubble cache,
//!   sweep scheduling, and anchor math
//! - [`scene`] — assembles both into the render model the drawing layer
//!   consumes: positioned nodes, edges, and anchored bubbles
//! - [`watch`] — minimal change-notification wrapper so connectivity or
//!   mode changes trigger explicit recomputation instead of being wired
//!   into a framework lifecycle
//!
//! The upstream collaborators (chat transport, stream parsing, network
//! selection) and the downstream renderer are out of scope; they meet this
//! crate at [`scene::Scene`].

pub mod scene;
pub mod watch;

pub use agentviz_graph::{
    AgentId, ConnectivityEdge, Layout, LayoutEdge, LayoutMode, LayoutNode, LayoutSpacing, layout,
};
pub use agentviz_overlay::{
    AnnotationCache, CacheConfig, Conversation, OverlayAnchor, OverlayPositioner, PositionConfig,
    SweepDriver, ThoughtBubble,
};
pub use scene::{Scene, SceneBubble, SceneBuilder};
pub use watch::{Watched, WatchGuard};
