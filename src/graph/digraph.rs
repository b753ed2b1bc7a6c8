//! The `Digraph` container: vertex directory, adjacency store, marks.

use std::collections::HashMap;
use std::io::{self, Write};

use tracing::trace;

use super::arena::SlotArena;
use super::cursor::{EdgeCursor, Edges, Outgoing, OutgoingCursor, VertexCursor, Vertices};
use super::edge::{Edge, VertexId};
use super::marks::{Mark, MarkSet};
use crate::error::{GraphError, GraphResult};

/// Number of vertex slots a graph created with [`Digraph::new`] reserves.
pub const INITIAL_CAPACITY: usize = 16;

/// Per-slot vertex state.
///
/// A slot is valid iff `name` is `Some`. Releasing a slot resets it to
/// this default, so a recycled slot never inherits edges or marks from
/// its previous occupant.
#[derive(Debug, Default)]
pub(crate) struct VertexSlot {
    pub(crate) name: Option<String>,
    pub(crate) outgoing: Vec<Edge>,
    pub(crate) marks: MarkSet,
}

/// A weighted, directed graph with dual name/index addressing.
///
/// Vertices live in dense integer slots and simultaneously carry a unique
/// string name; both address spaces work for every operation that has a
/// natural name-addressed form. Slots freed by removal are recycled
/// through a FIFO pool. Every structural mutation (vertex add/remove,
/// edge add/remove/replace — not marking) bumps an internal version
/// counter that invalidates outstanding cursors.
///
/// | Operation        | Complexity        |
/// |------------------|-------------------|
/// | `add_vertex`     | O(1) amortized    |
/// | `remove_vertex`  | O(V + E)          |
/// | `add_edge`       | O(out-degree)     |
/// | `remove_edge`    | O(out-degree)     |
/// | `vertex_id`      | O(1)              |
/// | `vertex_name`    | O(1)              |
#[derive(Debug)]
pub struct Digraph {
    slots: SlotArena<VertexSlot>,
    directory: HashMap<String, VertexId>,
    vertex_count: usize,
    edge_count: usize,
    version: u64,
}

impl Default for Digraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Digraph {
    /// Creates an empty graph with the default slot capacity.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty graph with room for `capacity` vertices before
    /// the first growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotArena::with_capacity(capacity),
            directory: HashMap::new(),
            vertex_count: 0,
            edge_count: 0,
            version: 0,
        }
    }

    // ------------------------------------------------------------------
    // Counts and validity
    // ------------------------------------------------------------------

    /// Number of valid vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `vertex` currently refers to a valid (named) slot.
    pub fn is_vertex(&self, vertex: VertexId) -> bool {
        self.valid_slot(vertex).is_some()
    }

    /// Total slot capacity, live and free.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The structural version counter cursors validate against.
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    fn valid_slot(&self, vertex: VertexId) -> Option<&VertexSlot> {
        self.slots
            .get(vertex.index())
            .filter(|slot| slot.name.is_some())
    }

    fn valid_slot_mut(&mut self, vertex: VertexId) -> Option<&mut VertexSlot> {
        self.slots
            .get_mut(vertex.index())
            .filter(|slot| slot.name.is_some())
    }

    /// Outgoing edges of a slot; empty for free or out-of-bounds slots.
    pub(crate) fn outgoing_at(&self, index: usize) -> &[Edge] {
        match self.slots.get(index) {
            Some(slot) => &slot.outgoing,
            None => &[],
        }
    }

    // ------------------------------------------------------------------
    // Vertex directory
    // ------------------------------------------------------------------

    /// Resolves a vertex name to its slot id.
    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.directory.get(name).copied()
    }

    /// Resolves a slot id to its vertex name. `None` for any id outside
    /// current bounds or pointing at a free slot.
    pub fn vertex_name(&self, vertex: VertexId) -> Option<&str> {
        self.valid_slot(vertex)?.name.as_deref()
    }

    /// Adds a vertex with the given name.
    ///
    /// # Errors
    /// [`GraphError::DuplicateName`] if the name is already taken.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> GraphResult<VertexId> {
        let name = name.into();
        if self.directory.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }
        let id = VertexId::new(self.slots.allocate());
        Ok(self.install_vertex(id, name))
    }

    /// Adds a vertex with a synthesized name of the form `v<slot>`.
    ///
    /// If that name is somehow taken, more `v`s are prefixed until the
    /// name is free, so this never fails.
    pub fn add_anonymous_vertex(&mut self) -> VertexId {
        let id = VertexId::new(self.slots.allocate());
        let mut name = format!("v{}", id.index());
        while self.directory.contains_key(&name) {
            name.insert(0, 'v');
        }
        self.install_vertex(id, name)
    }

    /// Records the name↔id bijection for a freshly allocated slot.
    fn install_vertex(&mut self, id: VertexId, name: String) -> VertexId {
        self.version += 1;
        self.vertex_count += 1;
        trace!(vertex = id.index(), name = %name, "vertex added");
        self.directory.insert(name.clone(), id);
        self.slots.slot_mut(id.index()).name = Some(name);
        id
    }

    /// Removes a vertex along with every incident edge, releasing its
    /// slot for reuse. A no-op on invalid ids.
    pub fn remove_vertex(&mut self, vertex: VertexId) {
        if !self.is_vertex(vertex) {
            return;
        }
        self.version += 1;
        self.vertex_count -= 1;

        // The outgoing list must still be present when its edges are
        // counted out; only then may the slot be cleared.
        let slot = self.slots.slot_mut(vertex.index());
        self.edge_count -= slot.outgoing.len();
        slot.outgoing.clear();
        if let Some(name) = slot.name.take() {
            self.directory.remove(&name);
        }

        self.remove_all_edges_to(vertex);
        self.slots.release(vertex.index());
        trace!(vertex = vertex.index(), "vertex removed");
    }

    /// Removes the vertex with the given name, if any.
    pub fn remove_vertex_named(&mut self, name: &str) {
        if let Some(id) = self.vertex_id(name) {
            self.remove_vertex(id);
        }
    }

    /// Deletes every edge pointing at `target`, adjusting the edge count.
    fn remove_all_edges_to(&mut self, target: VertexId) {
        let mut removed = 0;
        for slot in self.slots.slots_mut() {
            let before = slot.outgoing.len();
            slot.outgoing.retain(|edge| edge.target() != target);
            removed += before - slot.outgoing.len();
        }
        self.edge_count -= removed;
    }

    // ------------------------------------------------------------------
    // Adjacency store
    // ------------------------------------------------------------------

    /// Adds an edge, replacing the weight if the edge already exists.
    ///
    /// Endpoints are validated before any state changes, so a failed call
    /// leaves the graph untouched.
    ///
    /// # Errors
    /// [`GraphError::InvalidEndpoint`] if either endpoint is not a valid
    /// vertex; [`GraphError::SelfLoop`] if `source == target`.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId, weight: i64) -> GraphResult<()> {
        if !self.is_vertex(source) {
            return Err(GraphError::InvalidEndpoint(source));
        }
        if !self.is_vertex(target) {
            return Err(GraphError::InvalidEndpoint(target));
        }
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        self.version += 1;
        let edge = Edge::new(source, target, weight);
        let outgoing = &mut self.slots.slot_mut(source.index()).outgoing;
        if let Some(existing) = outgoing.iter_mut().find(|e| e.target() == target) {
            *existing = edge;
        } else {
            outgoing.push(edge);
            self.edge_count += 1;
        }
        trace!(
            source = source.index(),
            target = target.index(),
            weight,
            "edge added"
        );
        Ok(())
    }

    /// Name-addressed [`Digraph::add_edge`].
    ///
    /// # Errors
    /// [`GraphError::UnknownName`] if either name has no vertex, plus the
    /// index-addressed failure modes.
    pub fn add_edge_named(&mut self, source: &str, target: &str, weight: i64) -> GraphResult<()> {
        let source = self.resolve(source)?;
        let target = self.resolve(target)?;
        self.add_edge(source, target, weight)
    }

    fn resolve(&self, name: &str) -> GraphResult<VertexId> {
        self.vertex_id(name)
            .ok_or_else(|| GraphError::UnknownName(name.to_owned()))
    }

    /// Removes the edge from `source` to `target`. A no-op when the edge
    /// does not exist.
    ///
    /// The source's whole outgoing list is scanned rather than stopping
    /// at the first match.
    pub fn remove_edge(&mut self, source: VertexId, target: VertexId) {
        let Some(slot) = self.slots.get_mut(source.index()) else {
            return;
        };
        let before = slot.outgoing.len();
        slot.outgoing.retain(|edge| edge.target() != target);
        let removed = before - slot.outgoing.len();
        if removed > 0 {
            self.edge_count -= removed;
            self.version += 1;
            trace!(
                source = source.index(),
                target = target.index(),
                "edge removed"
            );
        }
    }

    /// Name-addressed [`Digraph::remove_edge`]. Unknown names are treated
    /// as absent edges: a no-op.
    pub fn remove_edge_named(&mut self, source: &str, target: &str) {
        if let (Some(source), Some(target)) = (self.vertex_id(source), self.vertex_id(target)) {
            self.remove_edge(source, target);
        }
    }

    /// The weight of the edge from `source` to `target`, if present.
    pub fn edge_weight(&self, source: VertexId, target: VertexId) -> Option<i64> {
        self.outgoing_at(source.index())
            .iter()
            .find(|edge| edge.target() == target)
            .map(|edge| edge.weight())
    }

    // ------------------------------------------------------------------
    // Marks
    // ------------------------------------------------------------------

    /// Sets `mark` on `vertex`. A no-op on invalid ids. Marking never
    /// bumps the version counter.
    pub fn mark(&mut self, vertex: VertexId, mark: Mark) {
        if let Some(slot) = self.valid_slot_mut(vertex) {
            slot.marks.insert(mark);
        }
    }

    /// Clears `mark` on `vertex`, leaving other marks. A no-op on
    /// invalid ids.
    pub fn unmark(&mut self, vertex: VertexId, mark: Mark) {
        if let Some(slot) = self.valid_slot_mut(vertex) {
            slot.marks.remove(mark);
        }
    }

    /// Clears every mark on `vertex`. A no-op on invalid ids.
    pub fn unmark_all(&mut self, vertex: VertexId) {
        if let Some(slot) = self.valid_slot_mut(vertex) {
            slot.marks.clear();
        }
    }

    /// Whether `vertex` carries `mark`. `false` for invalid ids.
    pub fn has_mark(&self, vertex: VertexId, mark: Mark) -> bool {
        self.valid_slot(vertex)
            .is_some_and(|slot| slot.marks.contains(mark))
    }

    /// Whether `vertex` carries any mark at all. `false` for invalid ids.
    pub fn is_marked(&self, vertex: VertexId) -> bool {
        self.valid_slot(vertex).is_some_and(|slot| slot.marks.any())
    }

    /// Clears every vertex's marks in one pass.
    pub fn clear_marks(&mut self) {
        for slot in self.slots.slots_mut() {
            slot.marks.clear();
        }
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// All edges in ascending slot order. The iterator's total length
    /// equals [`Digraph::edge_count`].
    pub fn edges(&self) -> Edges<'_> {
        Edges::new(self)
    }

    /// The outgoing edges of one vertex; empty for invalid ids.
    pub fn edges_from(&self, vertex: VertexId) -> Outgoing<'_> {
        Outgoing::new(self, vertex)
    }

    /// Name-addressed [`Digraph::edges_from`]; empty for unknown names.
    pub fn edges_from_named(&self, name: &str) -> Outgoing<'_> {
        let vertex = self
            .vertex_id(name)
            .unwrap_or_else(|| VertexId::new(self.capacity()));
        Outgoing::new(self, vertex)
    }

    /// All valid vertex ids in ascending slot order.
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices::new(self)
    }

    /// A detached fail-fast cursor over all edges.
    pub fn edge_cursor(&self) -> EdgeCursor {
        EdgeCursor::new(self)
    }

    /// A detached fail-fast cursor over one vertex's outgoing edges.
    pub fn outgoing_cursor(&self, vertex: VertexId) -> OutgoingCursor {
        OutgoingCursor::new(self, vertex)
    }

    /// A detached fail-fast cursor over all valid vertices.
    pub fn vertex_cursor(&self) -> VertexCursor {
        VertexCursor::new(self)
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Writes a terse index-addressed listing of the graph.
    ///
    /// # Errors
    /// Propagates write failures from `out`.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "A graph")?;
        writeln!(out, "  with {} vertices", self.vertex_count)?;
        writeln!(out, "  and {} edges", self.edge_count)?;
        for index in 0..self.capacity() {
            if self.is_vertex(VertexId::new(index)) {
                write!(out, "{index}:")?;
                for edge in self.outgoing_at(index) {
                    write!(out, " {edge}")?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Writes a name-resolved listing of the graph.
    ///
    /// # Errors
    /// Propagates write failures from `out`.
    pub fn dump_with_names<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Vertices:")?;
        write!(out, " ")?;
        for index in 0..self.capacity() {
            if let Some(name) = self.vertex_name(VertexId::new(index)) {
                write!(out, " {name}")?;
            }
        }
        writeln!(out)?;
        writeln!(out, "Edges:")?;
        for index in 0..self.capacity() {
            for edge in self.outgoing_at(index) {
                writeln!(
                    out,
                    "  {} --{}-> {}",
                    self.vertex_name(edge.source()).unwrap_or("?"),
                    edge.weight(),
                    self.vertex_name(edge.target()).unwrap_or("?"),
                )?;
            }
        }
        Ok(())
    }
}
