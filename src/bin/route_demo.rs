//! Builds the classic five-vertex sample graph and prints both path
//! queries, name-resolved.

use anyhow::{Context, Result};
use trellis::Digraph;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut graph = Digraph::new();
    for name in ["a", "b", "c", "d", "e"] {
        graph.add_vertex(name)?;
    }
    graph.add_edge_named("a", "b", 2)?;
    graph.add_edge_named("a", "c", 1)?;
    graph.add_edge_named("c", "d", 5)?;
    graph.add_edge_named("d", "e", 1)?;
    graph.add_edge_named("b", "e", 4)?;

    graph.dump_with_names(&mut std::io::stdout())?;

    let start = graph.vertex_id("a").context("vertex a missing")?;
    let finish = graph.vertex_id("e").context("vertex e missing")?;

    match graph.path(start, finish) {
        Some(path) => {
            println!("fewest hops ({}):", path.len());
            for edge in &path {
                println!(
                    "  {} --{}-> {}",
                    graph.vertex_name(edge.source()).unwrap_or("?"),
                    edge.weight(),
                    graph.vertex_name(edge.target()).unwrap_or("?"),
                );
            }
        }
        None => println!("no path from a to e"),
    }

    graph.clear_marks();
    match graph.shortest_path(start, finish) {
        Some(tree) => {
            let route = tree.walk_back(finish).context("sink was finalized")?;
            let cost: i64 = route
                .windows(2)
                .filter_map(|pair| graph.edge_weight(pair[0], pair[1]))
                .sum();
            let names: Vec<&str> = route
                .iter()
                .map(|&id| graph.vertex_name(id).unwrap_or("?"))
                .collect();
            println!("cheapest route (weight {cost}): {}", names.join(" -> "));
        }
        None => println!("e unreachable from a"),
    }

    Ok(())
}
