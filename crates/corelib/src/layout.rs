//! Circular layout keyed on identifier order.
//!
//! Positions depend only on the sorted set of ids and the radius, never on
//! edges or on the previous frame, so an unchanged ring never moves.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::graph::RenderGraph;
use crate::node::NodeId;

/// A point in layout space (y grows upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Placement of one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Angle in radians, counter-clockwise from the positive x axis.
    pub angle: f64,
    pub point: Point,
}

/// Node positions for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPosition {
    placements: BTreeMap<NodeId, Placement>,
}

impl LayoutPosition {
    pub fn get(&self, id: &NodeId) -> Option<Point> {
        self.placements.get(id).map(|p| p.point)
    }

    pub fn angle(&self, id: &NodeId) -> Option<f64> {
        self.placements.get(id).map(|p| p.angle)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Placement)> {
        self.placements.iter()
    }
}

/// Evenly spaced layout on a circle of fixed radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularLayout {
    radius: f64,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl CircularLayout {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Places the sorted, de-duplicated ids at `2π·i/n`.
    pub fn place<'a, I>(&self, ids: I) -> LayoutPosition
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut sorted: Vec<&NodeId> = ids.into_iter().collect();
        sorted.sort();
        sorted.dedup();

        let n = sorted.len() as f64;
        let placements = sorted
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let angle = TAU * i as f64 / n;
                let point = Point::new(self.radius * angle.cos(), self.radius * angle.sin());
                (id.clone(), Placement { angle, point })
            })
            .collect();

        LayoutPosition { placements }
    }

    pub fn layout(&self, graph: &RenderGraph) -> LayoutPosition {
        self.place(graph.node_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn ids(values: &[i64]) -> Vec<NodeId> {
        values.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn test_empty_layout() {
        let pos = CircularLayout::default().place(std::iter::empty::<&NodeId>());
        assert!(pos.is_empty());
    }

    #[test]
    fn test_single_node_at_angle_zero() {
        let pos = CircularLayout::default().place(&ids(&[42]));
        assert_eq!(pos.angle(&NodeId::from(42)), Some(0.0));
        assert_eq!(pos.get(&NodeId::from(42)), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_two_nodes_opposite() {
        let pos = CircularLayout::default().place(&ids(&[2, 1]));
        let p1 = pos.get(&NodeId::from(1)).unwrap();
        let p2 = pos.get(&NodeId::from(2)).unwrap();
        assert_eq!(p1, Point::new(1.0, 0.0));
        assert!((p2.x + 1.0).abs() < 1e-12);
        assert!(p2.y.abs() < 1e-12);
        assert_eq!(pos.angle(&NodeId::from(2)), Some(PI));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let layout = CircularLayout::new(2.5);
        let a = layout.place(&ids(&[5, 1, 9, 3]));
        let b = layout.place(&ids(&[9, 3, 1, 5]));
        assert_eq!(a, b);
        let p = a.get(&NodeId::from(1)).unwrap();
        assert!((p.distance_to(&Point::new(0.0, 0.0)) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let pos = CircularLayout::default().place(&ids(&[1, 1, 2]));
        assert_eq!(pos.len(), 2);
    }
}
