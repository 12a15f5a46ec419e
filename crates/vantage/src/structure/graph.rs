//! Attributed graph with insertion-ordered nodes and per-edge direction.
//!
//! # Edge identity
//!
//! - An undirected edge is identified by its unordered endpoint pair.
//! - A directed edge is identified by its ordered endpoint pair, so `A→B` and
//!   `B→A` are two distinct edges.
//! - Re-adding an edge that already exists is a no-op.
//! - Mixing a directed and an undirected edge on the same pair is rejected.

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vantage_core::identifier::Id;

/// Errors raised while constructing a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate node `{0}`")]
    DuplicateNode(Id),

    #[error("unknown node `{0}`")]
    UnknownNode(Id),

    #[error("self-loop on node `{0}`")]
    SelfLoop(Id),

    #[error("edge `{from}` - `{to}` conflicts with an existing edge of different direction")]
    ParallelEdge { from: Id, to: Id },
}

/// Role of a node; it drives render color and size, never layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Primary,
    Funder,
    Partner,
    Consumer,
    Outcome,
    Step,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeCategory::Primary => "primary",
            NodeCategory::Funder => "funder",
            NodeCategory::Partner => "partner",
            NodeCategory::Consumer => "consumer",
            NodeCategory::Outcome => "outcome",
            NodeCategory::Step => "step",
        };
        f.write_str(name)
    }
}

/// A graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    id: Id,
    category: NodeCategory,
}

impl Node {
    /// Returns the node identifier
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the node category
    pub fn category(&self) -> NodeCategory {
        self.category
    }
}

/// A graph edge between two existing nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    source: Id,
    target: Id,
    directed: bool,
}

impl Edge {
    /// Returns the source node identifier
    pub fn source(&self) -> Id {
        self.source
    }

    /// Returns the target node identifier
    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns true for an oriented `source → target` edge
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Checks whether the edge joins `a` and `b`, ignoring orientation
    fn joins(&self, a: Id, b: Id) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Attributed graph with nodes kept in insertion order.
///
/// # Examples
///
/// ```
/// use vantage::structure::{Graph, GraphError, NodeCategory};
///
/// let mut graph = Graph::new();
/// graph.add_node("HRHP Data Assets", NodeCategory::Primary)?;
/// graph.add_node("Corporate Users", NodeCategory::Consumer)?;
/// graph.add_edge("HRHP Data Assets", "Corporate Users", true)?;
///
/// assert_eq!(graph.nodes_count(), 2);
/// assert_eq!(graph.edges_count(), 1);
/// assert!(matches!(
///     graph.add_edge("Corporate Users", "Nowhere", true),
///     Err(GraphError::UnknownNode(_))
/// ));
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an ego network: `center` joined by an undirected edge to every leaf.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a leaf repeats the center or
    /// another leaf.
    pub fn star<'a>(
        center: &str,
        center_category: NodeCategory,
        leaves: impl IntoIterator<Item = (&'a str, NodeCategory)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        graph.add_node(center, center_category)?;
        for (leaf, category) in leaves {
            graph.add_node(leaf, category)?;
            graph.add_edge(center, leaf, false)?;
        }
        Ok(graph)
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if `id` is already present.
    pub fn add_node(&mut self, id: impl Into<Id>, category: NodeCategory) -> Result<(), GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        trace!(node_id:% = id, category:% = category; "Adding node");
        self.nodes.insert(id, Node { id, category });
        Ok(())
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Adding an edge that already exists has no effect.
    ///
    /// # Errors
    ///
    /// - [`GraphError::SelfLoop`] if `source == target`
    /// - [`GraphError::UnknownNode`] if either endpoint is absent
    /// - [`GraphError::ParallelEdge`] if an edge of different directedness
    ///   already joins the same pair
    pub fn add_edge(
        &mut self,
        source: impl Into<Id>,
        target: impl Into<Id>,
        directed: bool,
    ) -> Result<(), GraphError> {
        let source = source.into();
        let target = target.into();

        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }

        for existing in self.edges.iter().filter(|edge| edge.joins(source, target)) {
            match (existing.directed, directed) {
                (false, false) => return Ok(()),
                (true, true) if existing.source == source => return Ok(()),
                // Opposite orientation is a distinct directed edge
                (true, true) => {}
                _ => {
                    return Err(GraphError::ParallelEdge {
                        from: source,
                        to: target,
                    });
                }
            }
        }

        trace!(source:% = source, target:% = target, directed; "Adding edge");
        self.edges.push(Edge {
            source,
            target,
            directed,
        });
        Ok(())
    }

    /// Iterates over nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Returns the node with the given id
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns the insertion index of the node with the given id
    pub fn node_index(&self, id: Id) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Checks if a node with the given id exists
    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the distinct neighbours of `id` in either direction, in edge insertion order
    pub fn neighbors(&self, id: Id) -> Vec<Id> {
        let mut neighbors = Vec::new();
        for edge in &self.edges {
            let other = if edge.source == id {
                edge.target
            } else if edge.target == id {
                edge.source
            } else {
                continue;
            };
            if !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }

    /// Returns the number of nodes
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges
    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
