//! SVG rendering for network scatter charts.
//!
//! Layout coordinates are fitted into the plot area with a uniform scale, so
//! the aspect ratio of the layout survives. The Y axis is flipped so that a
//! larger layout `y` is drawn higher on the canvas.

use svg::node::element::{Circle, Definitions, Group, Line, Marker, Path};

use vantage_core::{
    color::Color,
    geometry::{Bounds, Point},
};

use super::{SvgRenderer, label};
use crate::compose::{ScatterEdge, ScatterNode};

const EDGE_COLOR: &str = "rgba(150,150,150,0.5)";
const EDGE_WIDTH: f32 = 1.5;

impl SvgRenderer {
    /// Draws edges as lines under nodes drawn as circles with labels above.
    pub(super) fn render_network(
        &self,
        nodes: &[ScatterNode],
        edges: &[ScatterEdge],
        area: Bounds,
    ) -> Group {
        let largest_node = nodes.iter().map(|node| node.size).fold(0.0_f32, f32::max);
        // Keep room for node markers and the labels drawn above them.
        let inner = Bounds::new(
            area.min_x() + largest_node,
            area.min_y() + largest_node,
            area.max_x() - largest_node,
            area.max_y() - largest_node,
        );
        let fit = Fit::new(
            nodes.iter().map(|node| Point::new(node.x, node.y)),
            if inner.width() > 0.0 && inner.height() > 0.0 {
                inner
            } else {
                area
            },
        );
        let edge_color = edge_color();

        let mut edge_group = Group::new().set("class", "edges");
        for edge in edges {
            let start = fit.apply(Point::new(edge.x0, edge.y0));
            let mut end = fit.apply(Point::new(edge.x1, edge.y1));
            if edge.directed {
                // Stop at the target's rim so the arrowhead stays visible.
                let target_radius = nodes
                    .iter()
                    .find(|node| node.label == edge.target)
                    .map_or(0.0, |node| node.size / 2.0);
                end = shorten(start, end, target_radius);
            }
            let mut line = Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y())
                .set("stroke", EDGE_COLOR)
                .set("stroke-width", EDGE_WIDTH);
            if edge.directed {
                line = line.set(
                    "marker-end",
                    format!("url(#arrow-{})", edge_color.to_id_safe_string()),
                );
            }
            edge_group = edge_group.add(line);
        }

        let mut node_group = Group::new().set("class", "nodes");
        for node in nodes {
            let center = fit.apply(Point::new(node.x, node.y));
            let radius = node.size / 2.0;
            node_group = node_group
                .add(
                    Circle::new()
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("r", radius)
                        .set("fill", node.color)
                        .set("stroke", "white")
                        .set("stroke-width", 2),
                )
                .add(label(&node.label, center.x(), center.y() - radius - 8.0, "middle"));
        }

        Group::new()
            .set("class", "network")
            .add(edge_group)
            .add(node_group)
    }
}

/// Arrowhead marker for directed edges; empty when every edge is undirected
pub(super) fn marker_definitions(edges: &[ScatterEdge]) -> Definitions {
    let mut defs = Definitions::new();
    if !edges.iter().any(|edge| edge.directed) {
        return defs;
    }

    let color = edge_color();
    defs = defs.add(
        Marker::new()
            .set("id", format!("arrow-{}", color.to_id_safe_string()))
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 8)
            .set("markerHeight", 8)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.with_alpha(1.0)),
            ),
    );
    defs
}

/// Moves `end` towards `start` by `by`, never past `start`
fn shorten(start: Point, end: Point, by: f32) -> Point {
    let delta = end.sub_point(start);
    let length = delta.hypot();
    if length <= by || length == 0.0 {
        return start;
    }
    start.add_point(delta.scale((length - by) / length))
}

fn edge_color() -> Color {
    Color::new(EDGE_COLOR).expect("edge color constant is a valid CSS color")
}

/// Uniform scale and translation from layout space into a canvas region
struct Fit {
    source_center: Point,
    target_center: Point,
    scale: f32,
}

impl Fit {
    fn new(points: impl IntoIterator<Item = Point>, target: Bounds) -> Self {
        let Some(source) = Bounds::from_points(points) else {
            return Self {
                source_center: Point::default(),
                target_center: target.center(),
                scale: 1.0,
            };
        };

        let scale_x = (source.width() > 0.0).then(|| target.width() / source.width());
        let scale_y = (source.height() > 0.0).then(|| target.height() / source.height());
        let scale = match (scale_x, scale_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };

        Self {
            source_center: source.center(),
            target_center: target.center(),
            scale,
        }
    }

    fn apply(&self, point: Point) -> Point {
        let offset = point.sub_point(self.source_center).scale(self.scale);
        Point::new(
            self.target_center.x() + offset.x(),
            self.target_center.y() - offset.y(),
        )
    }
}
