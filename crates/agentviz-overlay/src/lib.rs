#![forbid(unsafe_code)]

//! Thought-bubble cache and overlay anchoring for agent-network
//! visualization.
//!
//! While a conversation streams, agents talk to each other; each in-flight
//! communication surfaces as a short-lived "thought bubble" annotation over
//! the network graph. This crate owns that collection:
//!
//! - [`AnnotationCache`] — bounded (default 5 entries), time-expiring
//!   (default 10 s TTL) collection with duplicate suppression by id and by
//!   normalized text, pin-on-hover eviction exemption, and derived edges
//!   for the connecting lines
//! - [`SweepDriver`] — tick-driven expiry scheduling, active only while
//!   the upstream stream is live
//! - [`OverlayPositioner`] — pure anchor math mapping bubbles to layout
//!   coordinates
//!
//! Everything is synchronous and single-threaded; callers on a UI event
//! loop never need a lock. Malformed input (empty text, empty agent sets)
//! degrades to no-ops or edge-less bubbles, never errors.

pub mod bubble;
pub mod cache;
pub mod position;
pub mod sweep;

pub use bubble::{Conversation, ThoughtBubble, normalize_text};
pub use cache::{AnnotationCache, CacheConfig};
pub use position::{OverlayAnchor, OverlayPositioner, PositionConfig};
pub use sweep::SweepDriver;
