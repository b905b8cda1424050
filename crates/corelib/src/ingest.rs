//! Loading snapshot records.
//!
//! Two layouts are accepted:
//! - one JSON record per line (blank lines ignored)
//! - a single JSON array of records, as the ring emitter writes it
//!
//! The whole input is validated before anything is returned, so a malformed
//! record aborts the run before the first frame is drawn.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::node::{NodeId, NodeRecord};
use crate::snapshot::Snapshot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    number_of_nodes: Option<usize>,
    nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: Option<NodeId>,
    successor: Option<NodeId>,
    predecessor: Option<NodeId>,
    data: Option<Value>,
    finger_table: Option<Vec<Option<NodeId>>>,
}

/// Reads every snapshot from `path`.
pub fn read_snapshots(path: impl AsRef<Path>) -> Result<Vec<Snapshot>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let snapshots = parse_snapshots(&text)?;
    info!(path = %path.display(), snapshots = snapshots.len(), "loaded ring snapshots");
    Ok(snapshots)
}

/// Parses snapshots from text in either accepted layout.
///
/// Record numbers in errors are 1-based: array position for the array
/// layout, line number for the line-delimited layout.
pub fn parse_snapshots(text: &str) -> Result<Vec<Snapshot>> {
    if text.trim_start().starts_with('[') {
        let records: Vec<Value> = serde_json::from_str(text)
            .map_err(|e| Error::malformed(1, format!("invalid JSON array: {}", e)))?;
        records
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let raw = serde_json::from_value(value).map_err(|e| Error::malformed(i + 1, e.to_string()))?;
                convert(i + 1, raw)
            })
            .collect()
    } else {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                let raw = serde_json::from_str(line).map_err(|e| Error::malformed(i + 1, e.to_string()))?;
                convert(i + 1, raw)
            })
            .collect()
    }
}

fn convert(number: usize, raw: RawSnapshot) -> Result<Snapshot> {
    if let Some(declared) = raw.number_of_nodes {
        if declared != raw.nodes.len() {
            warn!(
                snapshot = number,
                declared,
                listed = raw.nodes.len(),
                "numberOfNodes disagrees with node list"
            );
        }
    }

    let mut nodes = Vec::with_capacity(raw.nodes.len());
    for (pos, node) in raw.nodes.into_iter().enumerate() {
        let id = node
            .id
            .ok_or_else(|| Error::malformed(number, format!("node at position {} has no id", pos)))?;
        let stored_key_count = match node.data {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items.len()),
            Some(Value::Object(map)) => Some(map.len()),
            Some(other) => {
                warn!(snapshot = number, node = %id, data = %other, "ignoring non-collection data field");
                None
            }
        };
        nodes.push(NodeRecord {
            id,
            successor: NodeId::link(node.successor),
            predecessor: NodeId::link(node.predecessor),
            finger_table: node
                .finger_table
                .map(|table| table.into_iter().map(NodeId::link).collect()),
            stored_key_count,
        });
    }

    Snapshot::new(nodes).map_err(|dup| Error::malformed(number, format!("duplicate node id {}", dup)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_delimited_records() {
        let text = concat!(
            r#"{"nodes":[{"id":1,"successor":2,"predecessor":2,"data":["a","b"]},{"id":2,"successor":1,"predecessor":1}]}"#,
            "\n\n",
            r#"{"nodes":[{"id":1,"successor":1,"predecessor":null}]}"#,
            "\n",
        );
        let snaps = parse_snapshots(text).unwrap();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].nodes()[0].stored_key_count, Some(2));
        assert_eq!(snaps[0].nodes()[1].stored_key_count, None);
        assert_eq!(snaps[1].nodes()[0].predecessor, None);
    }

    #[test]
    fn test_emitter_array_layout() {
        let text = r#"[
          {"numberOfNodes": 1, "nodes": [
            {"id": 5, "data": {"7": "bar"}, "fingerTable": [5, -1, -1], "predecessor": -1, "successor": 5}
          ]}
        ]"#;
        let snaps = parse_snapshots(text).unwrap();
        let node = &snaps[0].nodes()[0];
        assert_eq!(node.stored_key_count, Some(1));
        assert_eq!(node.predecessor, None);
        assert_eq!(node.successor, Some(NodeId::from(5)));
        assert_eq!(node.finger_table, Some(vec![Some(NodeId::from(5)), None, None]));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let text = "{\"nodes\":[{\"id\":1}]}\n{\"nodes\":[{\"successor\":1}]}\n";
        match parse_snapshots(text) {
            Err(Error::MalformedSnapshot { snapshot, reason }) => {
                assert_eq!(snapshot, 2);
                assert!(reason.contains("no id"));
            }
            other => panic!("expected malformed snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_id_is_malformed() {
        let text = r#"{"nodes":[{"id":3},{"id":3}]}"#;
        let err = parse_snapshots(text).unwrap_err();
        assert!(err.to_string().contains("duplicate node id 3"), "{}", err);
    }

    #[test]
    fn test_empty_input_yields_no_snapshots() {
        assert!(parse_snapshots("").unwrap().is_empty());
        assert!(parse_snapshots("  \n\n").unwrap().is_empty());
        assert!(parse_snapshots("[]").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_line_reports_line_number() {
        let text = "{\"nodes\":[]}\nnot json\n";
        match parse_snapshots(text) {
            Err(Error::MalformedSnapshot { snapshot, .. }) => assert_eq!(snapshot, 2),
            other => panic!("expected malformed snapshot, got {:?}", other),
        }
    }
}
