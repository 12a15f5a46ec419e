//! Graph structures consumed by the layout engines and the network composer.
//!
//! [`Graph`] is an attributed graph whose nodes keep their insertion order.
//! That order is significant: the force engine consumes its seeded random
//! draws in node insertion order, so two graphs with the same nodes and
//! edges but a different insertion order lay out differently.

mod graph;

pub use graph::{Edge, Graph, GraphError, Node, NodeCategory};
