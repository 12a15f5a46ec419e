//! Category styling for network charts.

use std::collections::HashMap;

use vantage_core::color::Color;

use crate::structure::NodeCategory;

/// Marker color and diameter for one node category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    color: Color,
    size: f32,
}

impl NodeStyle {
    pub fn new(color: Color, size: f32) -> Self {
        Self { color, size }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Lookup from [`NodeCategory`] to [`NodeStyle`].
///
/// [`StyleMap::default`] covers every category. An empty map built with
/// [`StyleMap::new`] makes composition fail for any node, which lets
/// callers restrict a chart to the categories they style explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleMap {
    styles: HashMap<NodeCategory, NodeStyle>,
}

impl StyleMap {
    /// Creates a map with no styles
    pub fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Sets the style of `category`, replacing any previous one
    pub fn with_style(mut self, category: NodeCategory, style: NodeStyle) -> Self {
        self.styles.insert(category, style);
        self
    }

    /// Sets the style of `category` in place
    pub fn insert(&mut self, category: NodeCategory, style: NodeStyle) {
        self.styles.insert(category, style);
    }

    pub fn get(&self, category: NodeCategory) -> Option<NodeStyle> {
        self.styles.get(&category).copied()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        let style = |hex: &str, size| {
            NodeStyle::new(
                Color::new(hex).expect("built-in node colors are valid"),
                size,
            )
        };

        Self::new()
            .with_style(NodeCategory::Primary, style("#09188d", 30.0))
            .with_style(NodeCategory::Funder, style("#2ca02c", 20.0))
            .with_style(NodeCategory::Partner, style("#ff7f0e", 20.0))
            .with_style(NodeCategory::Consumer, style("#ff7f0e", 20.0))
            .with_style(NodeCategory::Outcome, style("#2ca02c", 20.0))
            .with_style(NodeCategory::Step, style("#58508d", 20.0))
    }
}
