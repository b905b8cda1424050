//! Per-kind edge styling.
//!
//! Successor and predecessor arcs bend to opposite sides with different
//! magnitudes, so neither the pair between the same two nodes nor a reversed
//! pair can coincide. Fingers get their bend from the renderer.

use crate::config::RenderConfig;
use crate::graph::EdgeKind;

pub const SUCCESSOR_COLOR: &str = "#d62728";
pub const PREDECESSOR_COLOR: &str = "#1f77b4";
pub const FINGER_COLOR: &str = "#2ca02c";

pub const SUCCESSOR_CURVATURE: f64 = 0.15;
pub const PREDECESSOR_CURVATURE: f64 = -0.3;

pub const NODE_FILL: &str = "#add8e6";
pub const IMPLICIT_NODE_FILL: &str = "#e8e8e8";

/// Stroke parameters of one edge kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

impl EdgeStyle {
    pub fn for_kind(kind: EdgeKind, config: &RenderConfig) -> Self {
        match kind {
            EdgeKind::Successor => EdgeStyle {
                color: SUCCESSOR_COLOR,
                width: 2.0,
                opacity: 1.0,
            },
            EdgeKind::Predecessor => EdgeStyle {
                color: PREDECESSOR_COLOR,
                width: 2.0,
                opacity: 1.0,
            },
            EdgeKind::Finger => EdgeStyle {
                color: FINGER_COLOR,
                width: 1.5,
                opacity: config.finger_opacity.clamp(0.0, 1.0),
            },
        }
    }
}

/// Fixed bend for successor and predecessor edges; `None` for fingers.
pub fn fixed_curvature(kind: EdgeKind) -> Option<f64> {
    match kind {
        EdgeKind::Successor => Some(SUCCESSOR_CURVATURE),
        EdgeKind::Predecessor => Some(PREDECESSOR_CURVATURE),
        EdgeKind::Finger => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_have_distinct_colors() {
        let config = RenderConfig::default();
        let colors: Vec<_> = EdgeKind::ALL
            .iter()
            .map(|k| EdgeStyle::for_kind(*k, &config).color)
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_fingers_are_translucent() {
        let style = EdgeStyle::for_kind(EdgeKind::Finger, &RenderConfig::default());
        assert!(style.opacity < 1.0);
    }

    #[test]
    fn test_ring_curvatures_bend_apart() {
        let s = fixed_curvature(EdgeKind::Successor).unwrap();
        let p = fixed_curvature(EdgeKind::Predecessor).unwrap();
        assert!(s > 0.0 && p < 0.0);
        assert_ne!(s.abs(), p.abs());
        assert_eq!(fixed_curvature(EdgeKind::Finger), None);
    }
}
