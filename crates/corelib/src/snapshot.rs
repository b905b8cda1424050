//! Immutable ring state at one instant.

use std::collections::HashSet;

use crate::node::{NodeId, NodeRecord};

/// The state of every node at one moment, in the order the emitter listed them.
///
/// Node ids are unique; construction rejects duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    nodes: Vec<NodeRecord>,
}

impl Snapshot {
    /// Builds a snapshot, returning the first repeated id on failure.
    pub fn new(nodes: Vec<NodeRecord>) -> Result<Self, NodeId> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(&node.id) {
                return Err(node.id.clone());
            }
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Snapshot::new(vec![NodeRecord::new(1), NodeRecord::new(2), NodeRecord::new(1)])
            .unwrap_err();
        assert_eq!(err, NodeId::from(1));
    }

    #[test]
    fn test_preserves_record_order() {
        let snap = Snapshot::new(vec![NodeRecord::new(9), NodeRecord::new(3)]).unwrap();
        let ids: Vec<_> = snap.nodes().iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![NodeId::from(9), NodeId::from(3)]);
    }
}
