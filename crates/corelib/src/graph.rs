//! Per-frame directed multigraph built from a snapshot.
//!
//! Up to three edges of different kinds may join the same ordered pair of
//! nodes, and the same kind may repeat (fingers often all point at the
//! successor in a small ring). Every one of them is kept, so the graph is a
//! petgraph `DiGraph`, which allows parallel edges and self loops.

use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::node::NodeId;
use crate::snapshot::Snapshot;

/// Which ring relationship an edge represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    Successor,
    Predecessor,
    Finger,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 3] = [EdgeKind::Successor, EdgeKind::Predecessor, EdgeKind::Finger];

    /// Legend text.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Successor => "Successor",
            EdgeKind::Predecessor => "Predecessor",
            EdgeKind::Finger => "Finger",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A node as drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderNode {
    pub id: NodeId,
    pub stored_key_count: Option<usize>,
    /// Referenced by a link but absent from the snapshot's records.
    pub implicit: bool,
}

/// One directed edge of the multigraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderEdge<'a> {
    pub from: &'a NodeId,
    pub to: &'a NodeId,
    pub kind: EdgeKind,
}

/// Node and edge totals for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub implicit_nodes: usize,
    pub successor_edges: usize,
    pub predecessor_edges: usize,
    pub finger_edges: usize,
}

/// Transient graph for a single frame. Never reused across frames.
#[derive(Debug, Default)]
pub struct RenderGraph {
    graph: DiGraph<RenderNode, EdgeKind>,
    index: HashMap<NodeId, NodeIndex>,
}

impl RenderGraph {
    /// Builds the graph for `snapshot`.
    ///
    /// Every record becomes a node, edgeless ones included. Successor and
    /// predecessor edges both start at the node that reported them. Finger
    /// edges are only added when `show_fingers` is set; unset entries are
    /// skipped and repeated targets each get their own edge. A link to an id
    /// with no record turns that id into an implicit node.
    pub fn build(snapshot: &Snapshot, show_fingers: bool) -> Self {
        let mut rg = RenderGraph::default();

        for record in snapshot.nodes() {
            let idx = rg.graph.add_node(RenderNode {
                id: record.id.clone(),
                stored_key_count: record.stored_key_count,
                implicit: false,
            });
            rg.index.insert(record.id.clone(), idx);
        }

        for record in snapshot.nodes() {
            let from = rg.index[&record.id];
            if let Some(successor) = &record.successor {
                let to = rg.ensure_node(successor);
                rg.graph.add_edge(from, to, EdgeKind::Successor);
            }
            if let Some(predecessor) = &record.predecessor {
                let to = rg.ensure_node(predecessor);
                rg.graph.add_edge(from, to, EdgeKind::Predecessor);
            }
            if show_fingers {
                for finger in record.fingers() {
                    let to = rg.ensure_node(finger);
                    rg.graph.add_edge(from, to, EdgeKind::Finger);
                }
            }
        }

        rg
    }

    fn ensure_node(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        debug!(node = %id, "link target has no record, adding implicit node");
        let idx = self.graph.add_node(RenderNode {
            id: id.clone(),
            stored_key_count: None,
            implicit: true,
        });
        self.index.insert(id.clone(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.graph.raw_nodes().iter().map(|n| &n.weight)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes().map(|n| &n.id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&RenderNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = RenderEdge<'_>> {
        self.graph.edge_references().map(move |e| RenderEdge {
            from: &self.graph[e.source()].id,
            to: &self.graph[e.target()].id,
            kind: *e.weight(),
        })
    }

    /// Number of edges of `kind` from `from` to `to`.
    pub fn count_edges(&self, from: &NodeId, to: &NodeId, kind: EdgeKind) -> usize {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self
                .graph
                .edges_connecting(a, b)
                .filter(|e| *e.weight() == kind)
                .count(),
            _ => 0,
        }
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            nodes: self.node_count(),
            implicit_nodes: self.nodes().filter(|n| n.implicit).count(),
            ..GraphStats::default()
        };
        for kind in self.graph.raw_edges().iter().map(|e| e.weight) {
            match kind {
                EdgeKind::Successor => stats.successor_edges += 1,
                EdgeKind::Predecessor => stats.predecessor_edges += 1,
                EdgeKind::Finger => stats.finger_edges += 1,
            }
        }
        stats
    }
}
