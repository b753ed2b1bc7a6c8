//! Edge-list text serialization.
//!
//! One edge per line, whitespace separated: `SOURCE_NAME TARGET_NAME
//! WEIGHT`. Reading is deliberately forgiving: the first malformed line
//! (or end of input, or a rejected edge) stops the load silently, so
//! trailing junk truncates the file rather than failing it. Vertex names
//! not yet in the graph are created on the fly.
//!
//! This is a thin wrapper over the public mutation API; callers needing
//! strict validation should parse lines themselves and drive
//! [`Digraph::add_edge_named`] directly. Names containing whitespace do
//! not survive a round trip.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::error::GraphResult;
use crate::graph::{Digraph, VertexId};

/// Reads edges from `reader` into `graph`, creating unknown vertex names
/// on the fly.
///
/// Returns the number of edges loaded. Stops silently at the first
/// malformed line, read error, or rejected edge (for example a
/// self-loop).
pub fn read_edges<R: BufRead>(graph: &mut Digraph, reader: R) -> usize {
    let mut loaded = 0;
    for line in reader.lines() {
        let Ok(line) = line else { break };
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[source, target, weight] = fields.as_slice() else {
            break;
        };
        let Ok(weight) = weight.parse::<i64>() else {
            break;
        };
        let Ok(source) = intern(graph, source) else {
            break;
        };
        let Ok(target) = intern(graph, target) else {
            break;
        };
        if graph.add_edge(source, target, weight).is_err() {
            break;
        }
        loaded += 1;
    }
    debug!(edges = loaded, "edge list loaded");
    loaded
}

/// Looks up `name`, creating a vertex for it when absent.
fn intern(graph: &mut Digraph, name: &str) -> GraphResult<VertexId> {
    match graph.vertex_id(name) {
        Some(id) => Ok(id),
        None => graph.add_vertex(name),
    }
}

/// Loads a graph from the file at `path`.
///
/// # Errors
/// Failing to open the file surfaces as an error; parse problems inside
/// the file truncate the load as in [`read_edges`].
pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Digraph> {
    let file = File::open(path)?;
    let mut graph = Digraph::new();
    read_edges(&mut graph, BufReader::new(file));
    Ok(graph)
}

/// Writes every edge of `graph` in the format [`read_edges`] accepts.
///
/// # Errors
/// Propagates write failures from `out`.
pub fn write_edges<W: Write>(graph: &Digraph, out: &mut W) -> io::Result<()> {
    for edge in graph.edges() {
        let edge = edge.map_err(io::Error::other)?;
        writeln!(
            out,
            "{} {} {}",
            graph.vertex_name(edge.source()).unwrap_or("?"),
            graph.vertex_name(edge.target()).unwrap_or("?"),
            edge.weight(),
        )?;
    }
    Ok(())
}

/// Saves the graph to `path` in the edge-list format.
///
/// # Errors
/// Propagates file creation and write failures.
pub fn save<P: AsRef<Path>>(graph: &Digraph, path: P) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_edges(graph, &mut file)
}
