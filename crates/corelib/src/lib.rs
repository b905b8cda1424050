//! Core library for drawing the topology of a Chord-style ring.
//!
//! This crate turns recorded ring snapshots into pictures:
//! - Snapshot model and ingestion of emitted records
//! - Per-frame multigraph of successor, predecessor and finger links
//! - Circular layout ordered by node identifier
//! - Curved multi-edge rendering to SVG
//! - Frame sequencing with display and export sinks

pub mod animation;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod layout;
pub mod node;
pub mod render;
pub mod snapshot;

pub use animation::{AnimationController, FrameSink, FrameTag, SinkOutcome};
pub use config::{AnimationConfig, RenderConfig};
pub use error::{Error, Result};
pub use graph::{EdgeKind, GraphStats, RenderGraph};
pub use layout::{CircularLayout, LayoutPosition, Point};
pub use node::{NodeId, NodeRecord};
pub use render::{MultiEdgeRenderer, Scene};
pub use snapshot::Snapshot;
