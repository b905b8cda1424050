//! Drawing frames.
//!
//! A `Scene` is the canvas for one frame: pixel-space node marks, curved edge
//! marks, a legend and a caption. `MultiEdgeRenderer` fills it from a graph and
//! its layout; the `svg` module turns it into markup. The scene is cleared and
//! refilled for every frame so nothing leaks from one frame into the next.

pub mod renderer;
pub mod style;
pub mod svg;

pub use renderer::MultiEdgeRenderer;
pub use style::EdgeStyle;

use crate::graph::EdgeKind;
use crate::layout::Point;
use crate::node::NodeId;

/// Geometry of a drawn edge in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgePath {
    /// Arc between two distinct nodes.
    Quadratic { from: Point, ctrl: Point, to: Point },
    /// Loop from a node back to itself.
    Loop { from: Point, ctrl1: Point, ctrl2: Point, to: Point },
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match self {
            EdgePath::Quadratic { from, .. } | EdgePath::Loop { from, .. } => *from,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            EdgePath::Quadratic { to, .. } | EdgePath::Loop { to, .. } => *to,
        }
    }
}

/// A drawn edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMark {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
    /// Signed arc bend relative to the chord length.
    pub curvature: f64,
    pub style: EdgeStyle,
    pub path: EdgePath,
}

/// A drawn node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMark {
    pub id: NodeId,
    pub center: Point,
    pub radius: f64,
    pub stored_key_count: Option<usize>,
    pub implicit: bool,
}

impl NodeMark {
    /// Secondary label line, if the node reported a key count.
    pub fn annotation(&self) -> Option<String> {
        self.stored_key_count.map(|n| match n {
            1 => "1 key".to_string(),
            n => format!("{} keys", n),
        })
    }
}

/// Canvas state for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    title: String,
    caption: Option<String>,
    legend: Vec<EdgeKind>,
    nodes: Vec<NodeMark>,
    edges: Vec<EdgeMark>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: String::new(),
            caption: None,
            legend: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Drops everything drawn so far; the canvas size is kept.
    pub fn clear(&mut self) {
        self.title.clear();
        self.caption = None;
        self.legend.clear();
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_legend(&mut self, kinds: Vec<EdgeKind>) {
        self.legend = kinds;
    }

    pub fn legend(&self) -> &[EdgeKind] {
        &self.legend
    }

    pub fn push_node(&mut self, node: NodeMark) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: EdgeMark) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[NodeMark] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeMark] {
        &self.edges
    }
}
