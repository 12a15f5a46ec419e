//! Layout engine selection
//!
//! [`LayoutEngine`] names an algorithm in configuration, [`GraphEngine`] is
//! the interface every algorithm implements, and [`EngineBuilder`] creates
//! configured engines on demand, reusing one instance per kind.

use std::collections::HashMap;

use serde::Deserialize;

use super::{DEFAULT_ITERATIONS, Positions, force, layered};
use crate::structure::Graph;

/// Available layout algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Seeded force-directed spring layout
    #[default]
    Force,
    /// Longest-path ranks for directed acyclic graphs
    Layered,
}

/// Trait defining the interface for graph layout engines
pub trait GraphEngine {
    /// Calculate one position per node of `graph`, in insertion order.
    ///
    /// The same graph and seed must always yield identical positions.
    fn calculate(&self, graph: &Graph, seed: u64) -> Positions;
}

impl GraphEngine for force::Engine {
    fn calculate(&self, graph: &Graph, seed: u64) -> Positions {
        self.compute(graph, seed)
    }
}

impl GraphEngine for layered::Engine {
    fn calculate(&self, graph: &Graph, seed: u64) -> Positions {
        self.compute(graph, seed)
    }
}

/// Builder for creating and configuring layout engines.
pub struct EngineBuilder {
    engines: HashMap<LayoutEngine, Box<dyn GraphEngine>>,

    iterations: usize,
    initial_temperature: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl EngineBuilder {
    /// Create a new engine builder with default configuration
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            iterations: DEFAULT_ITERATIONS,
            initial_temperature: 0.1,
            horizontal_spacing: 1.0,
            vertical_spacing: 1.0,
        }
    }

    /// Set the force simulation iteration budget
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the initial force simulation temperature
    pub fn with_initial_temperature(mut self, temperature: f32) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Set the distance between layered ranks
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the distance between nodes sharing a layered rank
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Get an engine of the specified kind with the configured options
    pub fn engine(&mut self, kind: LayoutEngine) -> &dyn GraphEngine {
        let force = self.force_engine();
        let horizontal_spacing = self.horizontal_spacing;
        let vertical_spacing = self.vertical_spacing;

        let engine = self
            .engines
            .entry(kind)
            .or_insert_with(|| -> Box<dyn GraphEngine> {
                match kind {
                    LayoutEngine::Force => Box::new(force),
                    LayoutEngine::Layered => {
                        let mut engine = layered::Engine::new();
                        engine
                            .set_horizontal_spacing(horizontal_spacing)
                            .set_vertical_spacing(vertical_spacing)
                            .set_fallback(force);
                        Box::new(engine)
                    }
                }
            });
        &**engine
    }

    fn force_engine(&self) -> force::Engine {
        let mut engine = force::Engine::new();
        engine
            .set_iterations(self.iterations)
            .set_initial_temperature(self.initial_temperature);
        engine
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use vantage_core::identifier::Id;

    use super::*;
    use crate::structure::NodeCategory;

    fn flow() -> Graph {
        let mut graph = Graph::new();
        graph.add_node("source", NodeCategory::Primary).unwrap();
        graph.add_node("sink", NodeCategory::Outcome).unwrap();
        graph.add_edge("source", "sink", true).unwrap();
        graph
    }

    #[test]
    fn test_default_engine_is_force() {
        assert_eq!(LayoutEngine::default(), LayoutEngine::Force);
    }

    #[test]
    fn test_builder_force_engine_matches_direct_engine() {
        let mut builder = EngineBuilder::new().with_iterations(10);
        let from_builder = builder.engine(LayoutEngine::Force).calculate(&flow(), 9);

        let mut direct = force::Engine::new();
        direct.set_iterations(10);
        assert_eq!(from_builder, direct.compute(&flow(), 9));
    }

    #[test]
    fn test_builder_layered_engine_uses_spacing() {
        let mut builder = EngineBuilder::new().with_horizontal_spacing(3.0);
        let positions = builder.engine(LayoutEngine::Layered).calculate(&flow(), 0);
        assert_eq!(positions.get(Id::new("sink")).unwrap().x(), 3.0);
    }

    #[test]
    fn test_builder_reuses_cached_engine() {
        let mut builder = EngineBuilder::new().with_iterations(5);
        let first = builder.engine(LayoutEngine::Layered).calculate(&flow(), 1);
        let second = builder.engine(LayoutEngine::Layered).calculate(&flow(), 1);
        assert_eq!(first, second);
        assert_eq!(builder.engines.len(), 1);
    }

    #[test]
    fn test_engine_kind_deserializes() {
        #[derive(Deserialize)]
        struct Wrapper {
            engine: LayoutEngine,
        }
        let parsed: Wrapper = toml::from_str(r#"engine = "layered""#).unwrap();
        assert_eq!(parsed.engine, LayoutEngine::Layered);
    }
}
