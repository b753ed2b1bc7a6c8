//! Change-tracked cursors and their iterator adapters.
//!
//! Every cursor captures the graph's version counter at creation and
//! revalidates it on every advance — the has-more check included — so a
//! structural mutation between steps surfaces as
//! [`GraphError::StructureChanged`] instead of a silently stale walk.
//!
//! Cursors hold no borrow of the graph; the graph is passed to each
//! call. That detachment is what makes interleaved mutation a runtime
//! condition to detect rather than something the borrow checker rejects
//! outright, and it is why cursors cannot expose removal. The `Edges`,
//! `Outgoing` and `Vertices` adapters re-attach a cursor to a borrowed
//! graph for ordinary `for`-loop use.

use super::digraph::Digraph;
use super::edge::{Edge, VertexId};
use crate::error::{GraphError, GraphResult};

fn check(graph: &Digraph, version: u64) -> GraphResult<()> {
    if graph.version() == version {
        Ok(())
    } else {
        Err(GraphError::StructureChanged)
    }
}

/// A fail-fast cursor over every edge, in ascending slot order.
#[derive(Debug, Clone)]
pub struct EdgeCursor {
    version: u64,
    slot: usize,
    offset: usize,
}

impl EdgeCursor {
    pub(crate) fn new(graph: &Digraph) -> Self {
        Self {
            version: graph.version(),
            slot: 0,
            offset: 0,
        }
    }

    /// Whether another edge remains.
    ///
    /// # Errors
    /// [`GraphError::StructureChanged`] if the graph was structurally
    /// mutated since this cursor was created.
    pub fn has_next(&self, graph: &Digraph) -> GraphResult<bool> {
        check(graph, self.version)?;
        Ok(self.peek(graph).is_some())
    }

    /// Advances past the next edge and returns it, or `Ok(None)` at the
    /// end.
    ///
    /// # Errors
    /// [`GraphError::StructureChanged`] if the graph was structurally
    /// mutated since this cursor was created.
    pub fn next(&mut self, graph: &Digraph) -> GraphResult<Option<Edge>> {
        check(graph, self.version)?;
        match self.peek(graph) {
            Some((slot, offset, edge)) => {
                self.slot = slot;
                self.offset = offset + 1;
                Ok(Some(edge))
            }
            None => Ok(None),
        }
    }

    fn peek(&self, graph: &Digraph) -> Option<(usize, usize, Edge)> {
        let mut slot = self.slot;
        let mut offset = self.offset;
        while slot < graph.capacity() {
            if let Some(edge) = graph.outgoing_at(slot).get(offset) {
                return Some((slot, offset, *edge));
            }
            slot += 1;
            offset = 0;
        }
        None
    }
}

/// A fail-fast cursor over one vertex's outgoing edges.
///
/// Created for an invalid vertex, the cursor is empty but still
/// version-checked.
#[derive(Debug, Clone)]
pub struct OutgoingCursor {
    version: u64,
    slot: usize,
    offset: usize,
}

impl OutgoingCursor {
    pub(crate) fn new(graph: &Digraph, vertex: VertexId) -> Self {
        Self {
            version: graph.version(),
            slot: vertex.index(),
            offset: 0,
        }
    }

    /// Whether another edge remains.
    ///
    /// # Errors
    /// [`GraphError::StructureChanged`] if the graph was structurally
    /// mutated since this cursor was created.
    pub fn has_next(&self, graph: &Digraph) -> GraphResult<bool> {
        check(graph, self.version)?;
        Ok(graph.outgoing_at(self.slot).len() > self.offset)
    }

    /// Advances past the next edge and returns it, or `Ok(None)` at the
    /// end.
    ///
    /// # Errors
    /// [`GraphError::StructureChanged`] if the graph was structurally
    /// mutated since this cursor was created.
    pub fn next(&mut self, graph: &Digraph) -> GraphResult<Option<Edge>> {
        check(graph, self.version)?;
        let edge = graph.outgoing_at(self.slot).get(self.offset).copied();
        if edge.is_some() {
            self.offset += 1;
        }
        Ok(edge)
    }
}

/// A fail-fast cursor over every valid vertex, in ascending slot order.
#[derive(Debug, Clone)]
pub struct VertexCursor {
    version: u64,
    slot: usize,
}

impl VertexCursor {
    pub(crate) fn new(graph: &Digraph) -> Self {
        Self {
            version: graph.version(),
            slot: 0,
        }
    }

    /// Whether another vertex remains.
    ///
    /// # Errors
    /// [`GraphError::StructureChanged`] if the graph was structurally
    /// mutated since this cursor was created.
    pub fn has_next(&self, graph: &Digraph) -> GraphResult<bool> {
        check(graph, self.version)?;
        Ok((self.slot..graph.capacity()).any(|index| graph.is_vertex(VertexId::new(index))))
    }

    /// Advances past the next valid vertex and returns its id, or
    /// `Ok(None)` at the end.
    ///
    /// # Errors
    /// [`GraphError::StructureChanged`] if the graph was structurally
    /// mutated since this cursor was created.
    pub fn next(&mut self, graph: &Digraph) -> GraphResult<Option<VertexId>> {
        check(graph, self.version)?;
        while self.slot < graph.capacity() {
            let id = VertexId::new(self.slot);
            self.slot += 1;
            if graph.is_vertex(id) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

/// Borrowing iterator over every edge. See [`Digraph::edges`].
pub struct Edges<'g> {
    graph: &'g Digraph,
    cursor: EdgeCursor,
}

impl<'g> Edges<'g> {
    pub(crate) fn new(graph: &'g Digraph) -> Self {
        Self {
            graph,
            cursor: EdgeCursor::new(graph),
        }
    }
}

impl Iterator for Edges<'_> {
    type Item = GraphResult<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next(self.graph).transpose()
    }
}

/// Borrowing iterator over one vertex's outgoing edges. See
/// [`Digraph::edges_from`].
pub struct Outgoing<'g> {
    graph: &'g Digraph,
    cursor: OutgoingCursor,
}

impl<'g> Outgoing<'g> {
    pub(crate) fn new(graph: &'g Digraph, vertex: VertexId) -> Self {
        Self {
            graph,
            cursor: OutgoingCursor::new(graph, vertex),
        }
    }
}

impl Iterator for Outgoing<'_> {
    type Item = GraphResult<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next(self.graph).transpose()
    }
}

/// Borrowing iterator over every valid vertex. See
/// [`Digraph::vertices`].
pub struct Vertices<'g> {
    graph: &'g Digraph,
    cursor: VertexCursor,
}

impl<'g> Vertices<'g> {
    pub(crate) fn new(graph: &'g Digraph) -> Self {
        Self {
            graph,
            cursor: VertexCursor::new(graph),
        }
    }
}

impl Iterator for Vertices<'_> {
    type Item = GraphResult<VertexId>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next(self.graph).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Digraph, VertexId, VertexId, VertexId) {
        let mut graph = Digraph::new();
        let a = graph.add_vertex("a").unwrap();
        let b = graph.add_vertex("b").unwrap();
        let c = graph.add_vertex("c").unwrap();
        graph.add_edge(a, b, 1).unwrap();
        graph.add_edge(b, c, 2).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn edge_cursor_walks_in_slot_order() {
        let (graph, a, b, c) = sample();
        let mut cursor = graph.edge_cursor();
        assert!(cursor.has_next(&graph).unwrap());
        assert_eq!(cursor.next(&graph).unwrap(), Some(Edge::new(a, b, 1)));
        assert_eq!(cursor.next(&graph).unwrap(), Some(Edge::new(b, c, 2)));
        assert_eq!(cursor.next(&graph).unwrap(), None);
        assert!(!cursor.has_next(&graph).unwrap());
    }

    #[test]
    fn mutation_fails_both_cursor_calls() {
        let (mut graph, ..) = sample();
        let mut edges = graph.edge_cursor();
        let vertices = graph.vertex_cursor();
        graph.add_vertex("d").unwrap();
        assert_eq!(edges.has_next(&graph), Err(GraphError::StructureChanged));
        assert_eq!(edges.next(&graph), Err(GraphError::StructureChanged));
        assert_eq!(vertices.has_next(&graph), Err(GraphError::StructureChanged));
    }

    #[test]
    fn marking_does_not_invalidate_cursors() {
        let (mut graph, a, ..) = sample();
        let mut cursor = graph.edge_cursor();
        graph.mark(a, crate::graph::Mark::SEEN);
        assert!(cursor.next(&graph).unwrap().is_some());
    }

    #[test]
    fn outgoing_cursor_for_invalid_vertex_is_empty() {
        let (graph, ..) = sample();
        let mut cursor = graph.outgoing_cursor(VertexId::new(40));
        assert!(!cursor.has_next(&graph).unwrap());
        assert_eq!(cursor.next(&graph).unwrap(), None);
    }

    #[test]
    fn removal_invalidates_an_outgoing_cursor() {
        let (mut graph, a, b, _) = sample();
        let mut cursor = graph.outgoing_cursor(a);
        graph.remove_edge(a, b);
        assert_eq!(cursor.next(&graph), Err(GraphError::StructureChanged));
    }

    #[test]
    fn vertex_iterator_skips_free_slots() {
        let (mut graph, _, b, _) = sample();
        graph.remove_vertex(b);
        let ids: Vec<_> = graph
            .vertices()
            .collect::<GraphResult<Vec<_>>>()
            .unwrap();
        assert_eq!(ids, vec![VertexId::new(0), VertexId::new(2)]);
    }

    #[test]
    fn edges_iterator_length_matches_edge_count() {
        let (graph, ..) = sample();
        let edges: Vec<_> = graph.edges().collect::<GraphResult<Vec<_>>>().unwrap();
        assert_eq!(edges.len(), graph.edge_count());
    }
}
