#![forbid(unsafe_code)]

//! Anchor math mapping thought bubbles to layout coordinates.
//!
//! The rendering layer measures and draws; this module only answers "where
//! does this bubble attach". A bubble with a derived edge anchors at the
//! midpoint of its endpoints; otherwise it anchors at its first agent that
//! has a layout position. Bubbles whose agents all fell out of the layout
//! get no anchor and the renderer hides them.

use agentviz_graph::Layout;
use serde::Serialize;

use crate::bubble::ThoughtBubble;

/// Screen-space attachment point for one bubble (world units, same space
/// as the layout output).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayAnchor {
    pub x: f64,
    pub y: f64,
}

/// Anchor tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct PositionConfig {
    /// Vertical lift applied to every anchor so bubbles float above their
    /// node or connecting line.
    pub lift: f64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self { lift: -40.0 }
    }
}

/// Maps cache entries to layout-space anchors.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayPositioner {
    config: PositionConfig,
}

impl OverlayPositioner {
    #[must_use]
    pub fn new(config: PositionConfig) -> Self {
        Self { config }
    }

    /// Anchor for one bubble against the current layout, if any of its
    /// agents are positioned.
    #[must_use]
    pub fn anchor_for(&self, bubble: &ThoughtBubble, layout: &Layout) -> Option<OverlayAnchor> {
        if let Some(edge) = &bubble.edge
            && let Some((sx, sy)) = layout.position_of(&edge.source)
            && let Some((tx, ty)) = layout.position_of(&edge.target)
        {
            return Some(OverlayAnchor {
                x: (sx + tx) / 2.0,
                y: (sy + ty) / 2.0 + self.config.lift,
            });
        }

        bubble
            .agents
            .iter()
            .find_map(|agent| layout.position_of(agent))
            .map(|(x, y)| OverlayAnchor {
                x,
                y: y + self.config.lift,
            })
    }
}
