//! Force-directed layout engine
//!
//! This module implements a Fruchterman–Reingold style spring layout. All
//! nodes repel each other, nodes joined by an edge attract each other, and a
//! linearly cooling temperature bounds how far any node may move in one
//! iteration.
//!
//! The engine never reads global randomness: the caller passes a seed, a
//! fresh generator is created from it for every call, and initial positions
//! are drawn in node insertion order.

use indexmap::IndexMap;
use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use vantage_core::{geometry::Point, identifier::Id};

use super::{DEFAULT_ITERATIONS, Position, Positions};
use crate::structure::Graph;

/// Angle between the fallback directions of consecutive node indices.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Outcome of a force simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    positions: Positions,
    final_temperature: f32,
    final_max_displacement: f32,
}

impl Simulation {
    /// Returns the computed positions
    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Consumes the simulation and returns the computed positions
    pub fn into_positions(self) -> Positions {
        self.positions
    }

    /// Temperature used by the last iteration, zero if no iteration ran
    pub fn final_temperature(&self) -> f32 {
        self.final_temperature
    }

    /// Largest distance any node moved during the last iteration
    pub fn final_max_displacement(&self) -> f32 {
        self.final_max_displacement
    }
}

/// Force layout engine
///
/// Positions start uniformly distributed in `[-1, 1] × [-1, 1]`. Each
/// iteration sums, for every node, a repulsive displacement `δ·k²/d²` from
/// every other node and an attractive displacement `-δ·d/k` from each edge
/// neighbour, where `δ` is the vector between the two nodes, `d` its length
/// and `k` the optimal distance. The summed displacement is clipped to the
/// current temperature, which decays linearly from its initial value to zero
/// over the iteration budget.
#[derive(Debug, Clone)]
pub struct Engine {
    iterations: usize,
    initial_temperature: f32,
    optimal_distance: Option<f32>,
    min_distance: f32,
    pinned: IndexMap<Id, Point>,
}

impl Engine {
    /// Create a new force layout engine with default parameters
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            initial_temperature: 0.1,
            optimal_distance: None,
            min_distance: 0.01,
            pinned: IndexMap::new(),
        }
    }

    /// Set the number of iterations for the force simulation
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the temperature of the first iteration
    pub fn set_initial_temperature(&mut self, temperature: f32) -> &mut Self {
        self.initial_temperature = temperature;
        self
    }

    /// Set the optimal edge length `k`; defaults to `1/sqrt(n)`
    pub fn set_optimal_distance(&mut self, distance: f32) -> &mut Self {
        self.optimal_distance = Some(distance);
        self
    }

    /// Set the distance below which two nodes count as coincident
    pub fn set_min_distance(&mut self, distance: f32) -> &mut Self {
        self.min_distance = distance;
        self
    }

    /// Fix a node at `point`; pinned nodes exert forces but never move
    pub fn set_pinned(&mut self, node_id: Id, point: Point) -> &mut Self {
        self.pinned.insert(node_id, point);
        self
    }

    /// Calculate positions for every node of `graph`
    pub fn compute(&self, graph: &Graph, seed: u64) -> Positions {
        self.simulate(graph, seed).into_positions()
    }

    /// Run the simulation and report convergence information alongside positions
    pub fn simulate(&self, graph: &Graph, seed: u64) -> Simulation {
        let node_count = graph.nodes_count();
        debug!(
            nodes_count = node_count,
            edges_count = graph.edges_count(),
            seed,
            iterations = self.iterations;
            "Running force simulation"
        );

        match node_count {
            0 => {
                return Simulation {
                    positions: Positions::new(),
                    final_temperature: 0.0,
                    final_max_displacement: 0.0,
                };
            }
            1 => {
                let positions = graph
                    .nodes()
                    .map(|node| {
                        let point = self.pinned.get(&node.id()).copied().unwrap_or_default();
                        Position::new(node.id(), point)
                    })
                    .collect();
                return Simulation {
                    positions,
                    final_temperature: 0.0,
                    final_max_displacement: 0.0,
                };
            }
            _ => {}
        }

        let mut points = self.initialize_positions(graph, seed);
        let fixed: Vec<bool> = graph
            .nodes()
            .map(|node| self.pinned.contains_key(&node.id()))
            .collect();
        let adjacency = adjacency(graph);
        let k = self
            .optimal_distance
            .unwrap_or_else(|| 1.0 / (node_count as f32).sqrt());

        let mut final_temperature = 0.0;
        let mut final_max_displacement = 0.0;

        for iteration in 0..self.iterations {
            let temperature = self.temperature(iteration);

            let displacements: Vec<Point> = (0..node_count)
                .map(|idx| self.displacement(idx, &points, &adjacency[idx], k))
                .collect();

            let mut max_step: f32 = 0.0;
            for (idx, displacement) in displacements.into_iter().enumerate() {
                if fixed[idx] {
                    continue;
                }
                let length = displacement.hypot();
                if !length.is_finite() || length <= 0.0 {
                    continue;
                }
                let step = length.min(temperature);
                points[idx] = points[idx].add_point(displacement.scale(step / length));
                max_step = max_step.max(step);
            }

            final_temperature = temperature;
            final_max_displacement = max_step;
        }

        trace!(final_temperature, final_max_displacement; "Force simulation finished");

        let positions = graph
            .nodes()
            .zip(points)
            .map(|(node, point)| Position::new(node.id(), point))
            .collect();

        Simulation {
            positions,
            final_temperature,
            final_max_displacement,
        }
    }

    /// Draw initial positions from a generator seeded once for this call.
    ///
    /// Every node consumes two draws (x then y) in insertion order, pinned
    /// nodes included, so pinning one node does not shift the others.
    fn initialize_positions(&self, graph: &Graph, seed: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);

        graph
            .nodes()
            .map(|node| {
                let x = rng.random_range(-1.0f32..=1.0);
                let y = rng.random_range(-1.0f32..=1.0);
                self.pinned
                    .get(&node.id())
                    .copied()
                    .unwrap_or(Point::new(x, y))
            })
            .collect()
    }

    /// Temperature of `iteration`, decaying linearly to zero at the end of the budget
    fn temperature(&self, iteration: usize) -> f32 {
        let remaining = (self.iterations - iteration) as f32;
        self.initial_temperature * remaining / self.iterations as f32
    }

    /// Net displacement of node `idx` from repulsion and edge attraction
    fn displacement(&self, idx: usize, points: &[Point], neighbors: &[usize], k: f32) -> Point {
        let mut total = Point::default();

        for (other, &other_point) in points.iter().enumerate() {
            if other == idx {
                continue;
            }
            let delta = self.separation(idx, points[idx].sub_point(other_point));
            let distance_sq = delta.x() * delta.x() + delta.y() * delta.y();
            total = total.add_point(delta.scale(k * k / distance_sq));
        }

        for &neighbor in neighbors {
            let delta = self.separation(idx, points[idx].sub_point(points[neighbor]));
            total = total.sub_point(delta.scale(delta.hypot() / k));
        }

        total
    }

    /// Replace a near-zero separation with a minimal vector whose direction depends on `idx`
    fn separation(&self, idx: usize, delta: Point) -> Point {
        if delta.hypot() < self.min_distance {
            Point::from_polar(self.min_distance, idx as f32 * GOLDEN_ANGLE)
        } else {
            delta
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Neighbour indices per node; each edge is listed once at each endpoint.
fn adjacency(graph: &Graph) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); graph.nodes_count()];
    for edge in graph.edges() {
        if let (Some(source), Some(target)) = (
            graph.node_index(edge.source()),
            graph.node_index(edge.target()),
        ) {
            adjacency[source].push(target);
            adjacency[target].push(source);
        }
    }
    adjacency
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::structure::NodeCategory;

    fn graph_strategy() -> impl Strategy<Value = Graph> {
        (0usize..8, prop::collection::vec((0usize..8, 0usize..8), 0..12)).prop_map(
            |(node_count, edges)| {
                let mut graph = Graph::new();
                for idx in 0..node_count {
                    graph
                        .add_node(format!("n{idx}").as_str(), NodeCategory::Step)
                        .unwrap();
                }
                for (a, b) in edges {
                    if a < node_count && b < node_count && a != b {
                        let _ = graph.add_edge(
                            format!("n{a}").as_str(),
                            format!("n{b}").as_str(),
                            false,
                        );
                    }
                }
                graph
            },
        )
    }

    /// Two runs with the same seed give identical positions covering every node once.
    fn check_deterministic_and_complete(graph: Graph, seed: u64) -> Result<(), TestCaseError> {
        let engine = Engine::new();
        let first = engine.compute(&graph, seed);
        let second = engine.compute(&graph, seed);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), graph.nodes_count());
        for (position, node) in first.iter().zip(graph.nodes()) {
            prop_assert_eq!(position.node_id(), node.id());
            prop_assert!(position.point().is_finite());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn deterministic_and_complete(graph in graph_strategy(), seed in any::<u64>()) {
            check_deterministic_and_complete(graph, seed)?;
        }
    }
}
