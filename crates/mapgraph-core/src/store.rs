use tracing::debug;

use crate::geometry::{Point, find_node_near};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
}

impl Edge {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    pub fn touches(&self, index: usize) -> bool {
        self.source == index || self.target == index
    }
}

/// Ordered node and edge sequences. A node's index is its position in
/// `nodes`; only the highest index is ever removed, so indices stay stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    pub fn node_near(&self, target: Point) -> Option<usize> {
        find_node_near(self.positions(), target)
    }

    /// Appends a node unless one already sits on the same coordinates.
    pub fn add_node(&mut self, position: Point) -> Option<usize> {
        if self.nodes.iter().any(|node| node.position.coincides_with(position)) {
            debug!(x = position.x, y = position.y, "rejected duplicate node");
            return None;
        }
        let index = self.nodes.len();
        self.nodes.push(Node { position });
        debug!(index, x = position.x, y = position.y, "added node");
        Some(index)
    }

    /// Appends an edge. Self-loops and endpoints past the node list are
    /// rejected; repeated pairs are not.
    pub fn add_edge(&mut self, source: usize, target: usize) -> bool {
        if source == target {
            debug!(index = source, "rejected self-loop");
            return false;
        }
        if source >= self.nodes.len() || target >= self.nodes.len() {
            debug!(source, target, "rejected edge to missing node");
            return false;
        }
        self.edges.push(Edge::new(source, target));
        debug!(source, target, "added edge");
        true
    }

    /// Pops the newest node together with every edge that references it.
    pub fn remove_last_node(&mut self) -> Option<Node> {
        let node = self.nodes.pop()?;
        let index = self.nodes.len();
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(index));
        debug!(index, dropped_edges = before - self.edges.len(), "removed node");
        Some(node)
    }

    pub fn remove_last_edge(&mut self) -> Option<Edge> {
        let edge = self.edges.pop()?;
        debug!(source = edge.source, target = edge.target, "removed edge");
        Some(edge)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Builds a store from already-validated parts, as read from a file.
    /// Positions are kept verbatim; edges that break the index invariant
    /// are dropped.
    pub(crate) fn from_parts(positions: Vec<Point>, pairs: Vec<(usize, usize)>) -> Self {
        let nodes: Vec<Node> = positions.into_iter().map(|position| Node { position }).collect();
        let edges = pairs
            .into_iter()
            .filter(|&(source, target)| source != target && source < nodes.len() && target < nodes.len())
            .map(|(source, target)| Edge::new(source, target))
            .collect();
        Self { nodes, edges }
    }
}
