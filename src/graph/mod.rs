//! The digraph container and its supporting pieces.
//!
//! The structure is split the way it is owned:
//! - `arena`: free-list slot storage underneath everything
//! - `edge`: vertex handles and the weighted edge value
//! - `marks`: per-vertex mark flags used by the algorithms
//! - `digraph`: the container itself — directory, adjacency, counts
//! - `cursor`: change-tracked cursors and their iterator adapters
//! - `traverse`: reachability and the two path queries

pub(crate) mod arena;
pub mod cursor;
pub mod digraph;
pub mod edge;
pub mod marks;
pub mod traverse;

pub use digraph::{Digraph, INITIAL_CAPACITY};
pub use edge::{Edge, VertexId};
pub use marks::{Mark, MarkSet};
