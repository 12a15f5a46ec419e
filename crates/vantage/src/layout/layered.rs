//! Layered layout engine for process-step DAGs
//!
//! Nodes are ranked by the longest path that reaches them from a source
//! node, so every edge points from a lower rank to a higher one. Rank `r` is
//! placed at `x = r * horizontal_spacing`, and the nodes sharing a rank are
//! spread vertically around `y = 0` in insertion order.
//!
//! Edges are followed in their `source → target` orientation whether or not
//! they are directed. A cyclic graph has no ranking; the engine then falls
//! back to the force layout with the same seed.

use log::{debug, warn};
use petgraph::{Direction, algo::toposort, graph::DiGraph};

use vantage_core::geometry::Point;

use super::{Position, Positions, force};
use crate::structure::Graph;

/// Layered layout engine
#[derive(Debug, Clone)]
pub struct Engine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    fallback: force::Engine,
}

impl Engine {
    /// Create a new layered engine with unit spacing
    pub fn new() -> Self {
        Self {
            horizontal_spacing: 1.0,
            vertical_spacing: 1.0,
            fallback: force::Engine::new(),
        }
    }

    /// Set the distance between consecutive ranks
    pub fn set_horizontal_spacing(&mut self, spacing: f32) -> &mut Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the distance between nodes of the same rank
    pub fn set_vertical_spacing(&mut self, spacing: f32) -> &mut Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Set the force engine used when the graph contains a cycle
    pub fn set_fallback(&mut self, fallback: force::Engine) -> &mut Self {
        self.fallback = fallback;
        self
    }

    /// Calculate positions for every node of `graph`
    pub fn compute(&self, graph: &Graph, seed: u64) -> Positions {
        let Some(ranks) = self.ranks(graph) else {
            warn!(
                nodes_count = graph.nodes_count();
                "Graph contains a cycle, falling back to force layout"
            );
            return self.fallback.compute(graph, seed);
        };

        let rank_count = ranks.iter().max().map_or(0, |max| max + 1);
        let mut rank_sizes = vec![0usize; rank_count];
        for &rank in &ranks {
            rank_sizes[rank] += 1;
        }
        debug!(ranks_count = rank_count; "Ranked graph for layered layout");

        let mut next_slot = vec![0usize; rank_count];
        graph
            .nodes()
            .zip(ranks)
            .map(|(node, rank)| {
                let slot = next_slot[rank];
                next_slot[rank] += 1;

                let offset = slot as f32 - (rank_sizes[rank] - 1) as f32 / 2.0;
                let point = Point::new(
                    rank as f32 * self.horizontal_spacing,
                    offset * self.vertical_spacing,
                );
                Position::new(node.id(), point)
            })
            .collect()
    }

    /// Longest-path rank of every node, indexed by insertion order; `None` on a cycle
    fn ranks(&self, graph: &Graph) -> Option<Vec<usize>> {
        let mut dag = DiGraph::<(), ()>::with_capacity(graph.nodes_count(), graph.edges_count());
        let indices: Vec<_> = graph.nodes().map(|_| dag.add_node(())).collect();

        for edge in graph.edges() {
            if let (Some(source), Some(target)) = (
                graph.node_index(edge.source()),
                graph.node_index(edge.target()),
            ) {
                dag.add_edge(indices[source], indices[target], ());
            }
        }

        let order = toposort(&dag, None).ok()?;

        let mut ranks = vec![0usize; graph.nodes_count()];
        for node in order {
            let rank = ranks[node.index()];
            for successor in dag.neighbors_directed(node, Direction::Outgoing) {
                let successor_rank = &mut ranks[successor.index()];
                *successor_rank = (*successor_rank).max(rank + 1);
            }
        }
        Some(ranks)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
