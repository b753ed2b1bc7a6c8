//! # `trellis` - Weighted Directed Graph Container
//!
//! A dynamic, weighted, directed graph built on a dense slot arena with
//! dual addressing: every vertex has a stable integer [`VertexId`] and a
//! unique string name, and every operation is available through either.
//! Removed slots are recycled through an explicit free list, and all
//! iteration is change-tracked: a cursor that outlives a structural
//! mutation fails with [`GraphError::StructureChanged`] instead of
//! walking a stale structure.
//!
//! ## Key Features
//!
//! - **Dual addressing**: stable `VertexId` slots with a name directory
//!   kept in bijection; anonymous vertices synthesize their own names
//! - **Slot recycling**: removal returns a slot to a FIFO free pool;
//!   recycled slots never leak edges or marks from their previous life
//! - **Fail-fast cursors**: a version counter bumped on every structural
//!   mutation invalidates outstanding cursors on their next step
//! - **Path queries**: breadth-first shortest path by hop count and an
//!   O(V²) Dijkstra-style minimum-weight search with explicit
//!   unreachable results
//! - **Mark flags**: eight per-vertex mark bits shared by the traversal
//!   algorithms and available to callers
//!
//! ## Example
//!
//! ```rust
//! use trellis::Digraph;
//!
//! # fn main() -> trellis::GraphResult<()> {
//! let mut graph = Digraph::new();
//! let a = graph.add_vertex("a")?;
//! let b = graph.add_vertex("b")?;
//! let c = graph.add_vertex("c")?;
//! graph.add_edge(a, b, 2)?;
//! graph.add_edge(b, c, 3)?;
//!
//! let path = graph.path(a, c).expect("c is reachable");
//! assert_eq!(path.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod graph;
pub mod io;

pub use error::{GraphError, GraphResult};
pub use graph::cursor::{EdgeCursor, Edges, Outgoing, OutgoingCursor, VertexCursor, Vertices};
pub use graph::traverse::PredecessorTree;
pub use graph::{Digraph, Edge, Mark, MarkSet, VertexId};
