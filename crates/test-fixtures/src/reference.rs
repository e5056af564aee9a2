//! Shortest co-star distance computed independently with petgraph.

use std::collections::HashMap;

use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};

use costar_catalog::InMemoryCatalog;
use costar_core::IDataSource;

#[derive(Default)]
struct CoStarGraph {
    graph: DiGraph<String, u32>,
    nodes: HashMap<String, NodeIndex>,
}

impl CoStarGraph {
    fn node(&mut self, key: String) -> NodeIndex {
        if let Some(&index) = self.nodes.get(&key) {
            return index;
        }
        let index = self.graph.add_node(key.clone());
        self.nodes.insert(key, index);
        index
    }

    fn edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.update_edge(from, to, 1);
    }
}

/// Hop count of the shortest start → target chain, or `None` when the target
/// is unreachable.
///
/// The graph is directed and built from the same lookups the engine makes:
/// actor → movie from filmographies, movie → actor from cast lists. Movies
/// with degenerate titles are left out because the engine skips them.
pub fn reference_distance(catalog: &InMemoryCatalog, start_id: &str, target_id: &str) -> Option<usize> {
    if start_id == target_id {
        return Some(0);
    }
    let mut g = CoStarGraph::default();
    for actor in catalog.to_snapshot().actors {
        let from = g.node(format!("a:{}", actor.id));
        let movies = catalog.list_movies(&actor).unwrap_or_default();
        for movie in movies.iter().filter(|m| !m.has_degenerate_title()) {
            let m = g.node(format!("m:{}", movie.id));
            g.edge(from, m);
            for co_star in catalog.list_cast(movie).unwrap_or_default() {
                let to = g.node(format!("a:{}", co_star.id));
                g.edge(m, to);
            }
        }
    }

    let start = *g.nodes.get(&format!("a:{start_id}"))?;
    let target = *g.nodes.get(&format!("a:{target_id}"))?;
    let distances = dijkstra(&g.graph, start, Some(target), |e| *e.weight());
    distances.get(&target).map(|d| *d as usize / 2)
}
