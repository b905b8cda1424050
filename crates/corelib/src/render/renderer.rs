//! Multi-edge renderer.
//!
//! Every edge is an arc whose bend depends on its kind. Successor and
//! predecessor arcs use fixed opposite bends. Finger arcs draw their bend from
//! a seeded RNG and alternate sides per source, so a fan of fingers to the
//! same target spreads out instead of collapsing into one stroke. Self loops
//! are drawn as a teardrop pointing away from the ring centre.

use std::collections::HashMap;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::graph::{EdgeKind, RenderGraph};
use crate::layout::{LayoutPosition, Point};
use crate::node::NodeId;
use crate::render::style::{fixed_curvature, EdgeStyle};
use crate::render::{EdgeMark, EdgePath, NodeMark, Scene};

pub const TITLE: &str = "DHT Chord Ring Visualization";

/// Half-angle between the two ends of a self loop on the node boundary.
const LOOP_SPREAD: f64 = 0.5;

/// Pixels reserved around the ring for labels and loops.
const RING_MARGIN: f64 = 60.0;

/// Draws a `RenderGraph` onto a `Scene`.
#[derive(Debug, Clone)]
pub struct MultiEdgeRenderer {
    config: RenderConfig,
}

impl MultiEdgeRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Edge kinds enabled for this renderer, in legend order.
    pub fn legend(&self) -> Vec<EdgeKind> {
        EdgeKind::ALL
            .into_iter()
            .filter(|k| *k != EdgeKind::Finger || self.config.show_fingers)
            .collect()
    }

    /// Draws `graph` at the positions in `layout`.
    ///
    /// Fails if an edge endpoint has no position, which means the layout was
    /// computed for a different graph.
    pub fn draw(&self, graph: &RenderGraph, layout: &LayoutPosition, scene: &mut Scene) -> Result<()> {
        scene.set_title(TITLE);
        scene.set_legend(self.legend());

        let view = Viewport::new(scene, self.config.radius, self.config.node_radius);
        let node_radius = self.config.node_radius;
        let mut bends = FingerBends::new(self.config.seed, self.config.finger_curvature.clone());

        for edge in graph.edges() {
            let from = view.project(position(layout, edge.from)?);
            let to = view.project(position(layout, edge.to)?);
            let curvature = fixed_curvature(edge.kind).unwrap_or_else(|| bends.next(edge.from));

            let path = if edge.from == edge.to {
                let angle = layout.angle(edge.from).unwrap_or(0.0);
                self_loop(from, angle, curvature, node_radius)
            } else {
                arc(from, to, curvature, node_radius)
            };

            scene.push_edge(EdgeMark {
                from: edge.from.clone(),
                to: edge.to.clone(),
                kind: edge.kind,
                curvature,
                style: EdgeStyle::for_kind(edge.kind, &self.config),
                path,
            });
        }

        for node in graph.nodes() {
            scene.push_node(NodeMark {
                id: node.id.clone(),
                center: view.project(position(layout, &node.id)?),
                radius: node_radius,
                stored_key_count: node.stored_key_count,
                implicit: node.implicit,
            });
        }

        Ok(())
    }
}

fn position(layout: &LayoutPosition, id: &NodeId) -> Result<Point> {
    layout
        .get(id)
        .ok_or_else(|| Error::Render(format!("node {} has no layout position", id)))
}

/// Maps layout space (y up, centred on the origin) to pixels (y down).
struct Viewport {
    center: Point,
    scale: f64,
}

impl Viewport {
    fn new(scene: &Scene, radius: f64, node_radius: f64) -> Self {
        let half = f64::from(scene.width().min(scene.height())) / 2.0;
        let usable = (half - RING_MARGIN - node_radius * 3.0).max(1.0);
        Self {
            center: scene.center(),
            scale: usable / radius,
        }
    }

    fn project(&self, p: Point) -> Point {
        Point::new(self.center.x + p.x * self.scale, self.center.y - p.y * self.scale)
    }
}

/// Seeded source of finger bends.
struct FingerBends<'a> {
    rng: StdRng,
    range: Range<f64>,
    per_source: HashMap<&'a NodeId, usize>,
}

impl<'a> FingerBends<'a> {
    fn new(seed: u64, range: Range<f64>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            range,
            per_source: HashMap::new(),
        }
    }

    fn next(&mut self, from: &'a NodeId) -> f64 {
        let magnitude = if self.range.is_empty() {
            self.range.start
        } else {
            self.rng.random_range(self.range.clone())
        };
        let count = self.per_source.entry(from).or_insert(0);
        let sign = if *count % 2 == 0 { 1.0 } else { -1.0 };
        *count += 1;
        sign * magnitude
    }
}

fn offset(from: Point, toward: Point, distance: f64) -> Point {
    let dx = toward.x - from.x;
    let dy = toward.y - from.y;
    let len = dx.hypot(dy);
    if len < f64::EPSILON {
        return from;
    }
    Point::new(from.x + dx / len * distance, from.y + dy / len * distance)
}

/// Quadratic arc with its control point displaced perpendicular to the chord
/// by `curvature` times the chord length, trimmed to the node boundaries.
fn arc(from: Point, to: Point, curvature: f64, node_radius: f64) -> EdgePath {
    let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let ctrl = Point::new(mid.x + curvature * dy, mid.y - curvature * dx);
    EdgePath::Quadratic {
        from: offset(from, ctrl, node_radius),
        ctrl,
        to: offset(to, ctrl, node_radius),
    }
}

fn rotate(dx: f64, dy: f64, by: f64) -> (f64, f64) {
    let (sin, cos) = by.sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Loop leaving and re-entering `center` on the side facing away from the
/// ring centre. Larger bends make larger loops; the sign picks the direction.
fn self_loop(center: Point, angle: f64, curvature: f64, node_radius: f64) -> EdgePath {
    // Outward direction in pixel space.
    let (ux, uy) = (angle.cos(), -angle.sin());
    let spread = if curvature < 0.0 { -LOOP_SPREAD } else { LOOP_SPREAD };
    let reach = node_radius * (2.2 + 4.0 * curvature.abs());

    let at = |by: f64, distance: f64| {
        let (x, y) = rotate(ux, uy, by);
        Point::new(center.x + x * distance, center.y + y * distance)
    };

    EdgePath::Loop {
        from: at(-spread, node_radius),
        ctrl1: at(-spread * 1.4, reach),
        ctrl2: at(spread * 1.4, reach),
        to: at(spread, node_radius),
    }
}
