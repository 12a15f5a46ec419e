//! Graph layout engines.
//!
//! Every engine maps a [`Graph`] to one [`Position`] per node, in node
//! insertion order. Engines are pure: given the same graph and seed they
//! return bit-for-bit identical positions, and they keep no state between
//! calls, so independent layouts may run concurrently.
//!
//! - [`ForceEngine`] - seeded Fruchterman–Reingold spring layout
//! - [`LayeredEngine`] - rank-based placement for process DAGs
//!
//! [`EngineBuilder`] selects and configures an engine from a [`LayoutEngine`]
//! kind, and [`compute_layout`] is the shorthand for a plain force layout.

mod engines;
mod force;
mod layered;
mod positions;

pub use engines::{EngineBuilder, GraphEngine, LayoutEngine};
pub use force::{Engine as ForceEngine, Simulation};
pub use layered::Engine as LayeredEngine;
pub use positions::{Position, Positions};

use crate::structure::Graph;

/// Default number of force simulation iterations
pub const DEFAULT_ITERATIONS: usize = 50;

/// Runs the force-directed layout with an explicit seed and iteration budget.
///
/// # Examples
///
/// ```
/// use vantage::{compute_layout, structure::{Graph, NodeCategory}};
///
/// let graph = Graph::star(
///     "HRHP",
///     NodeCategory::Primary,
///     [("NGOs", NodeCategory::Partner), ("HNWIs", NodeCategory::Funder)],
/// )
/// .unwrap();
///
/// let first = compute_layout(&graph, 42, 50);
/// let second = compute_layout(&graph, 42, 50);
/// assert_eq!(first, second);
/// assert_eq!(first.len(), 3);
/// ```
pub fn compute_layout(graph: &Graph, seed: u64, iterations: usize) -> Positions {
    let mut engine = ForceEngine::new();
    engine.set_iterations(iterations);
    engine.compute(graph, seed)
}
