//! Node identifiers and per-node ring state.
//!
//! A `NodeId` is the ring position key reported by the DHT. Its ordering is
//! what the circular layout sorts by, so it must be total and stable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value the ring emitter writes for a link it does not know yet.
pub const UNSET_LINK: i64 = -1;

/// Identifier of a node on the ring.
///
/// Integers and strings are both accepted. The derived ordering places every
/// integer before every string; integers compare numerically and strings
/// compare byte-wise.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl NodeId {
    /// True for the `-1` placeholder used for missing links.
    pub fn is_unset(&self) -> bool {
        matches!(self, NodeId::Int(UNSET_LINK))
    }

    /// Normalises a link value: `None` and the unset sentinel both become `None`.
    pub fn link(value: Option<NodeId>) -> Option<NodeId> {
        value.filter(|id| !id.is_unset())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(v) => write!(f, "{}", v),
            NodeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Int(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Text(value)
    }
}

/// State one node reported at a single instant.
///
/// Links are already normalised: absent and sentinel values are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: NodeId,
    /// Next node clockwise, if known.
    pub successor: Option<NodeId>,
    /// Previous node, if known.
    pub predecessor: Option<NodeId>,
    /// Finger entries in table order. `None` marks an unset slot.
    pub finger_table: Option<Vec<Option<NodeId>>>,
    /// Number of keys the node holds; only used to annotate its label.
    pub stored_key_count: Option<usize>,
}

impl NodeRecord {
    /// A record with no links and no payload.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            successor: None,
            predecessor: None,
            finger_table: None,
            stored_key_count: None,
        }
    }

    pub fn with_successor(mut self, successor: impl Into<NodeId>) -> Self {
        self.successor = NodeId::link(Some(successor.into()));
        self
    }

    pub fn with_predecessor(mut self, predecessor: impl Into<NodeId>) -> Self {
        self.predecessor = NodeId::link(Some(predecessor.into()));
        self
    }

    /// Sets the finger table; sentinel entries are stored as `None`.
    pub fn with_fingers<I>(mut self, fingers: I) -> Self
    where
        I: IntoIterator<Item = Option<NodeId>>,
    {
        self.finger_table = Some(fingers.into_iter().map(NodeId::link).collect());
        self
    }

    pub fn with_stored_keys(mut self, count: usize) -> Self {
        self.stored_key_count = Some(count);
        self
    }

    /// Finger targets that are actually set, in table order, duplicates kept.
    pub fn fingers(&self) -> impl Iterator<Item = &NodeId> {
        self.finger_table
            .iter()
            .flatten()
            .filter_map(|entry| entry.as_ref())
    }
}
