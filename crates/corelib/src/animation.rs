//! Frame sequencing.
//!
//! The controller walks the snapshots in input order on the calling thread.
//! Each frame clears the shared scene, rebuilds graph and layout from scratch,
//! draws, and hands the finished scene to every sink before the next frame
//! starts. Any failure aborts all sinks so no partial artifact survives.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::graph::RenderGraph;
use crate::layout::CircularLayout;
use crate::render::{MultiEdgeRenderer, Scene};
use crate::snapshot::Snapshot;

/// Position of a frame within the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTag {
    /// 0-based frame index.
    pub index: usize,
    pub total: usize,
}

impl FrameTag {
    /// 1-based frame number as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

impl fmt::Display for FrameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame {} of {}", self.number(), self.total)
    }
}

/// What a sink produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkOutcome {
    /// An artifact holding `frames` frames was written to `path`.
    Written { path: PathBuf, frames: usize },
    /// There were no frames, so nothing was written.
    Empty,
}

impl fmt::Display for SinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkOutcome::Written { path, frames } => {
                write!(f, "wrote {} frame(s) to {}", frames, path.display())
            }
            SinkOutcome::Empty => f.write_str("nothing to export"),
        }
    }
}

/// Consumer of rendered frames.
///
/// The controller calls `begin` once, `accept` once per frame in order, then
/// either `finish` or, after a failure anywhere in the pipeline, `abort`.
pub trait FrameSink {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    fn begin(&mut self, total: usize, width: u32, height: u32) -> Result<()>;

    fn accept(&mut self, tag: FrameTag, scene: &Scene) -> Result<()>;

    fn finish(&mut self) -> Result<SinkOutcome>;

    /// Discards any partially written output.
    fn abort(&mut self);
}

/// Drives graph building, layout and drawing for a snapshot sequence.
#[derive(Debug, Clone)]
pub struct AnimationController {
    renderer: MultiEdgeRenderer,
    layout: CircularLayout,
}

impl AnimationController {
    /// Fails if `config` would produce a degenerate drawing.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let layout = CircularLayout::new(config.radius);
        Ok(Self {
            renderer: MultiEdgeRenderer::new(config)?,
            layout,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    /// A blank canvas sized for this controller.
    pub fn canvas(&self) -> Scene {
        Scene::new(self.config().width, self.config().height)
    }

    /// Clears `scene` and draws `snapshot` into it, tagged with `tag`.
    pub fn render_frame(&self, snapshot: &Snapshot, tag: FrameTag, scene: &mut Scene) -> Result<()> {
        scene.clear();
        let graph = RenderGraph::build(snapshot, self.config().show_fingers);
        let positions = self.layout.layout(&graph);
        self.renderer.draw(&graph, &positions, scene)?;
        scene.set_caption(tag.to_string());
        debug!(
            frame = tag.number(),
            total = tag.total,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "rendered frame"
        );
        Ok(())
    }

    /// Renders one frame on its own; `number` is 1-based.
    pub fn render_still(&self, snapshots: &[Snapshot], number: usize) -> Result<Scene> {
        let total = snapshots.len();
        let snapshot = number
            .checked_sub(1)
            .and_then(|i| snapshots.get(i))
            .ok_or(Error::FrameOutOfRange { index: number, total })?;
        let mut scene = self.canvas();
        self.render_frame(snapshot, FrameTag { index: number - 1, total }, &mut scene)?;
        Ok(scene)
    }

    /// Renders every snapshot in order and feeds each frame to all sinks.
    ///
    /// Returns one outcome per sink, in sink order. An empty sequence produces
    /// zero frames and every sink reports its empty outcome.
    pub fn run(&self, snapshots: &[Snapshot], sinks: &mut [&mut dyn FrameSink]) -> Result<Vec<SinkOutcome>> {
        let result = self.drive(snapshots, sinks);
        if result.is_err() {
            for sink in sinks.iter_mut() {
                sink.abort();
            }
        }
        result
    }

    fn drive(&self, snapshots: &[Snapshot], sinks: &mut [&mut dyn FrameSink]) -> Result<Vec<SinkOutcome>> {
        let total = snapshots.len();
        let (width, height) = (self.config().width, self.config().height);
        for sink in sinks.iter_mut() {
            sink.begin(total, width, height)?;
        }

        let mut scene = self.canvas();
        for (index, snapshot) in snapshots.iter().enumerate() {
            let tag = FrameTag { index, total };
            self.render_frame(snapshot, tag, &mut scene)?;
            for sink in sinks.iter_mut() {
                sink.accept(tag, &scene)?;
            }
        }

        let mut outcomes = Vec::with_capacity(sinks.len());
        for sink in sinks.iter_mut() {
            let outcome = sink.finish()?;
            info!(sink = sink.name(), %outcome, "sink finished");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
