//! Reachability and the two path queries.
//!
//! Both path searches treat unreachable targets as ordinary results, not
//! errors: `path` and `shortest_path` return `None`. The weighted search
//! and the reachability walk finalize vertices through the mark bitset
//! and leave those marks set, so callers reusing marks should
//! [`Digraph::clear_marks`] between runs.

use std::collections::VecDeque;

use tracing::debug;

use super::digraph::Digraph;
use super::edge::{Edge, VertexId};
use super::marks::Mark;

/// Predecessor chains produced by [`Digraph::shortest_path`].
///
/// The tree is rooted at the search's source; following predecessors
/// backward from any reached vertex yields its minimum-weight path.
#[derive(Debug, Clone)]
pub struct PredecessorTree {
    source: VertexId,
    prev: Vec<Option<VertexId>>,
}

impl PredecessorTree {
    /// The vertex the search started from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// The predecessor of `vertex` on its minimum-weight path, if the
    /// search reached it.
    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.prev.get(vertex.index()).copied().flatten()
    }

    /// Reconstructs the vertex sequence from the source to `sink`, both
    /// inclusive. `None` if the search never reached `sink`.
    pub fn walk_back(&self, sink: VertexId) -> Option<Vec<VertexId>> {
        let mut sequence = vec![sink];
        let mut current = sink;
        while current != self.source {
            current = self.predecessor(current)?;
            sequence.push(current);
        }
        sequence.reverse();
        Some(sequence)
    }
}

impl Digraph {
    /// Depth-first reachability walk from `origin`.
    ///
    /// Marks every visited vertex with [`Mark::SEEN`] before descending
    /// and descends into an out-edge's target only while the target is
    /// unmarked at that moment, invoking `visit` once per vertex in
    /// preorder. The walk uses an explicit frame stack, so its depth is
    /// not bounded by the call stack.
    ///
    /// Marks are left set; call [`Digraph::clear_marks`] before reusing
    /// them. An invalid origin visits nothing.
    pub fn reachable_from<F: FnMut(VertexId)>(&mut self, origin: VertexId, mut visit: F) {
        if !self.is_vertex(origin) {
            return;
        }
        debug!(origin = origin.index(), "reachability walk");
        visit(origin);
        self.mark(origin, Mark::SEEN);

        // (slot, next out-edge offset) frames stand in for the call stack.
        let mut stack: Vec<(usize, usize)> = vec![(origin.index(), 0)];
        while !stack.is_empty() {
            let depth = stack.len() - 1;
            let (slot, offset) = stack[depth];
            let Some(edge) = self.outgoing_at(slot).get(offset).copied() else {
                stack.pop();
                continue;
            };
            stack[depth].1 = offset + 1;
            let target = edge.target();
            if !self.is_marked(target) {
                visit(target);
                self.mark(target, Mark::SEEN);
                stack.push((target.index(), 0));
            }
        }
    }

    /// Finds a shortest path from `start` to `finish` by hop count.
    ///
    /// A plain breadth-first search: a FIFO frontier plus a
    /// slot-per-vertex `incoming` table recording the first edge to reach
    /// each vertex; expansion stops as soon as `finish` has been reached.
    /// The result is the edge sequence from `start` to `finish` in
    /// traversal order.
    ///
    /// Returns `Some(vec![])` when `start == finish`, and `None` when
    /// `finish` is unreachable or either endpoint is invalid. Does not
    /// touch the mark bits.
    pub fn path(&self, start: VertexId, finish: VertexId) -> Option<Vec<Edge>> {
        if !self.is_vertex(start) || !self.is_vertex(finish) {
            return None;
        }
        if start == finish {
            return Some(Vec::new());
        }
        debug!(start = start.index(), finish = finish.index(), "bfs path");

        let mut incoming: Vec<Option<Edge>> = vec![None; self.capacity()];
        let mut frontier = VecDeque::new();
        frontier.push_back(start);

        while incoming[finish.index()].is_none() {
            let vertex = frontier.pop_front()?;
            for &edge in self.outgoing_at(vertex.index()) {
                let target = edge.target();
                if incoming[target.index()].is_none() {
                    incoming[target.index()] = Some(edge);
                    frontier.push_back(target);
                }
            }
        }

        let mut edges = Vec::new();
        let mut current = finish;
        while current != start {
            let edge = incoming[current.index()]?;
            edges.push(edge);
            current = edge.source();
        }
        edges.reverse();
        Some(edges)
    }

    /// Name-addressed [`Digraph::path`]; `None` for unknown names.
    pub fn path_named(&self, start: &str, finish: &str) -> Option<Vec<Edge>> {
        self.path(self.vertex_id(start)?, self.vertex_id(finish)?)
    }

    /// Single-source minimum-weight path search.
    ///
    /// Dijkstra-style without a priority queue: `distances` starts with
    /// `source` at zero and everything else unknown. Each round relaxes
    /// every outgoing edge of the most recently finalized vertex
    /// (recording the predecessor whenever a relaxation improves a
    /// distance), then linear-scans all unfinalized vertices with a known
    /// distance for the global minimum — ties break toward the lowest
    /// slot — marks it finalized with [`Mark::SEEN`], and repeats until
    /// `sink` is finalized. The linear scan makes this O(V²), which is
    /// fine at the scale this container targets.
    ///
    /// Returns `None` when `sink` is unreachable from `source` or either
    /// endpoint is invalid. Requires a clear mark state and leaves every
    /// finalized vertex marked, even on the `None` path; callers reusing
    /// marks should [`Digraph::clear_marks`] between runs.
    ///
    /// Weights are expected to be non-negative; negative weights are
    /// accepted but the result is then only a heuristic.
    pub fn shortest_path(&mut self, source: VertexId, sink: VertexId) -> Option<PredecessorTree> {
        if !self.is_vertex(source) || !self.is_vertex(sink) {
            return None;
        }
        debug!(
            source = source.index(),
            sink = sink.index(),
            "weighted shortest path"
        );

        let capacity = self.capacity();
        let mut distances: Vec<Option<i64>> = vec![None; capacity];
        let mut prev: Vec<Option<VertexId>> = vec![None; capacity];
        distances[source.index()] = Some(0);

        let mut current = source;
        self.mark(source, Mark::SEEN);

        while !self.is_marked(sink) {
            // Relax every outgoing edge of the vertex finalized last.
            let base = distances[current.index()]?;
            for &edge in self.outgoing_at(current.index()) {
                let target = edge.target();
                if self.is_marked(target) {
                    continue;
                }
                let candidate = base.saturating_add(edge.weight());
                let improved = distances[target.index()].map_or(true, |known| candidate < known);
                if improved {
                    distances[target.index()] = Some(candidate);
                    prev[target.index()] = Some(current);
                }
            }

            // Global minimum among unfinalized vertices with a known
            // distance; none left means the sink is unreachable.
            let mut min: Option<(VertexId, i64)> = None;
            for index in 0..capacity {
                let id = VertexId::new(index);
                if self.is_marked(id) {
                    continue;
                }
                if let Some(distance) = distances[index] {
                    if min.map_or(true, |(_, best)| distance < best) {
                        min = Some((id, distance));
                    }
                }
            }
            let (next, _) = min?;

            self.mark(next, Mark::SEEN);
            current = next;
        }

        Some(PredecessorTree { source, prev })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The five-vertex sample: a→b(2), a→c(1), c→d(5), d→e(1), b→e(4).
    fn sample() -> (Digraph, [VertexId; 5]) {
        let mut graph = Digraph::new();
        let ids = ["a", "b", "c", "d", "e"].map(|name| graph.add_vertex(name).unwrap());
        let [a, b, c, d, e] = ids;
        graph.add_edge(a, b, 2).unwrap();
        graph.add_edge(a, c, 1).unwrap();
        graph.add_edge(c, d, 5).unwrap();
        graph.add_edge(d, e, 1).unwrap();
        graph.add_edge(b, e, 4).unwrap();
        (graph, ids)
    }

    #[test]
    fn reachability_visits_in_preorder() {
        let (mut graph, [a, b, c, d, e]) = sample();
        let mut order = Vec::new();
        graph.reachable_from(a, |id| order.push(id));
        // a descends into b first (its first out-edge), then e through
        // b, then backtracks to c and d.
        assert_eq!(order, vec![a, b, e, c, d]);
        for id in [a, b, c, d, e] {
            assert!(graph.has_mark(id, Mark::SEEN));
        }
    }

    #[test]
    fn reachability_skips_marked_subtrees() {
        let (mut graph, [a, b, _, _, e]) = sample();
        graph.mark(b, Mark::SEEN);
        let mut order = Vec::new();
        graph.reachable_from(a, |id| order.push(id));
        assert!(!order.contains(&b));
        // e is still reached through c and d.
        assert!(order.contains(&e));
    }

    #[test]
    fn reachability_from_invalid_origin_visits_nothing() {
        let (mut graph, _) = sample();
        let mut visited = 0;
        graph.reachable_from(VertexId::new(77), |_| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn bfs_prefers_fewer_hops_over_lower_weight() {
        let (graph, [a, b, _, _, e]) = sample();
        let path = graph.path(a, e).unwrap();
        assert_eq!(path, vec![Edge::new(a, b, 2), Edge::new(b, e, 4)]);
    }

    #[test]
    fn bfs_path_to_self_is_empty() {
        let (graph, [a, ..]) = sample();
        assert_eq!(graph.path(a, a), Some(Vec::new()));
    }

    #[test]
    fn bfs_unreachable_or_invalid_is_none() {
        let (mut graph, [a, ..]) = sample();
        let lone = graph.add_vertex("lone").unwrap();
        assert_eq!(graph.path(a, lone), None);
        assert_eq!(graph.path(lone, a), None);
        assert_eq!(graph.path(a, VertexId::new(99)), None);
    }

    #[test]
    fn weighted_search_takes_the_cheaper_longer_route_when_cheaper() {
        // a→b→e costs 6 while the 3-hop a→c→d→e costs 7; weight wins.
        let (mut graph, [a, b, _, _, e]) = sample();
        let tree = graph.shortest_path(a, e).unwrap();
        assert_eq!(tree.walk_back(e), Some(vec![a, b, e]));
        assert_eq!(tree.predecessor(e), Some(b));
        assert_eq!(tree.predecessor(b), Some(a));
    }

    #[test]
    fn weighted_search_total_cost_is_minimal() {
        let (mut graph, [a, .., e]) = sample();
        let tree = graph.shortest_path(a, e).unwrap();
        let route = tree.walk_back(e).unwrap();
        let cost: i64 = route
            .windows(2)
            .filter_map(|pair| graph.edge_weight(pair[0], pair[1]))
            .sum();
        assert_eq!(cost, 6);
    }

    #[test]
    fn weighted_search_unreachable_sink_is_none() {
        let (mut graph, [a, ..]) = sample();
        let lone = graph.add_vertex("lone").unwrap();
        assert_eq!(graph.shortest_path(a, lone).map(|_| ()), None);
    }

    #[test]
    fn weighted_search_source_equals_sink() {
        let (mut graph, [a, ..]) = sample();
        let tree = graph.shortest_path(a, a).unwrap();
        assert_eq!(tree.walk_back(a), Some(vec![a]));
    }

    #[test]
    fn weighted_search_breaks_ties_toward_lower_slots() {
        // Two cost-2 routes into d: via b (slot 1) and via c (slot 2).
        // b finalizes first, so d's predecessor is b.
        let mut graph = Digraph::new();
        let a = graph.add_vertex("a").unwrap();
        let b = graph.add_vertex("b").unwrap();
        let c = graph.add_vertex("c").unwrap();
        let d = graph.add_vertex("d").unwrap();
        graph.add_edge(a, b, 1).unwrap();
        graph.add_edge(a, c, 1).unwrap();
        graph.add_edge(b, d, 1).unwrap();
        graph.add_edge(c, d, 1).unwrap();
        let tree = graph.shortest_path(a, d).unwrap();
        assert_eq!(tree.walk_back(d), Some(vec![a, b, d]));
    }

    #[test]
    fn path_queries_see_replaced_weights() {
        let (mut graph, [a, b, _, _, e]) = sample();
        // Make the two-hop route expensive; the weighted search should
        // reroute through c and d.
        graph.add_edge(b, e, 40).unwrap();
        let tree = graph.shortest_path(a, e).unwrap();
        let route = tree.walk_back(e).unwrap();
        assert_eq!(route.len(), 4);
        assert_eq!(
            graph
                .path_named("a", "e")
                .map(|path| path.len()),
            Some(2)
        );
    }
}
