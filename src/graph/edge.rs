//! Vertex handles and the weighted edge value.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The stable integer identity of a vertex slot.
///
/// Identities are dense and recycled: removing a vertex returns its slot
/// to a free pool, and a later insertion may hand the same id to an
/// unrelated vertex. Callers holding ids across removals should
/// re-resolve them through the name directory.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates an id from a raw slot index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable weighted directed edge between two vertex slots.
///
/// Edges are owned by their source vertex's adjacency list and are never
/// shared between lists. The container holds at most one edge per ordered
/// `(source, target)` pair; re-inserting the pair replaces the weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    weight: i64,
}

impl Edge {
    /// Creates an edge. The container enforces the `source != target`
    /// invariant at insertion; this constructor does not.
    pub const fn new(source: VertexId, target: VertexId, weight: i64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// The vertex this edge leaves.
    #[inline(always)]
    pub const fn source(self) -> VertexId {
        self.source
    }

    /// The vertex this edge enters.
    #[inline(always)]
    pub const fn target(self) -> VertexId {
        self.target
    }

    /// The edge weight.
    #[inline(always)]
    pub const fn weight(self) -> i64 {
        self.weight
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}-> {}", self.source, self.weight, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_round_trip() {
        let edge = Edge::new(VertexId::new(0), VertexId::new(3), -5);
        assert_eq!(edge.source(), VertexId::new(0));
        assert_eq!(edge.target(), VertexId::new(3));
        assert_eq!(edge.weight(), -5);
    }

    #[test]
    fn display_shows_direction_and_weight() {
        let edge = Edge::new(VertexId::new(1), VertexId::new(4), 2);
        assert_eq!(edge.to_string(), "1 --2-> 4");
    }

    #[test]
    fn serde_round_trip() {
        let edge = Edge::new(VertexId::new(2), VertexId::new(7), 11);
        let json = serde_json::to_string(&edge).unwrap();
        let back: Edge = serde_json::from_str(&json).unwrap();
        assert_eq!(edge, back);
    }
}
