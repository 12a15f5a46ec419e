//! Chart composition.
//!
//! [`Composer`] turns a [`Dataset`] or a laid-out [`Graph`] into a
//! [`ChartSpec`]. Every mapping is pure: it never re-sorts rows, never
//! normalizes values and never runs a layout of its own.
//!
//! | Operation | Accepted input |
//! |---|---|
//! | [`Composer::compose_funnel`] | one categorical and one numeric field |
//! | [`Composer::compose_network`] | graph, positions and a [`StyleMap`] |
//! | [`Composer::compose_timeline`] | `task`, `start`, `end` and optional `group` |
//! | [`Composer::compose_categorical`] | one categorical and one numeric field |

mod spec;
mod style;

pub use spec::{
    CategoryEntry, ChartSpec, FunnelStage, ScatterEdge, ScatterNode, TimelineBar,
};
pub use style::{NodeStyle, StyleMap};

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use vantage_core::{
    color::Color,
    dataset::{Dataset, Record, ValueKind},
    identifier::Id,
};

use crate::{layout::Positions, structure::Graph, structure::NodeCategory};

/// Default categorical palette, cycled by row or group index.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#09188d", "#58508d", "#bc5090", "#ff7f0e", "#2ca02c", "#ffa600",
];

/// Errors raised while mapping data into a [`ChartSpec`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("dataset does not fit the chart: {0}")]
    SchemaMismatch(String),

    #[error("task `{task}` ends on {end} before it starts on {start}")]
    InvalidInterval {
        task: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("pie chart needs a positive total, got {total}")]
    DegenerateDistribution { total: f64 },

    #[error("no style configured for node category `{0}`")]
    UnknownCategory(NodeCategory),

    #[error("no position computed for node `{0}`")]
    MissingPosition(Id),
}

/// Flavor of a one-category, one-value chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalKind {
    Bar,
    Pie,
}

/// Maps datasets and laid-out graphs into chart specifications.
#[derive(Debug, Clone)]
pub struct Composer {
    palette: Vec<Color>,
}

impl Composer {
    /// Creates a composer cycling through `palette`.
    ///
    /// An empty palette falls back to [`DEFAULT_PALETTE`].
    pub fn new(palette: Vec<Color>) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        Self { palette }
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Maps stage labels and values to a funnel, keeping row order.
    ///
    /// # Examples
    ///
    /// ```
    /// use vantage::compose::{ChartSpec, Composer};
    /// use vantage::dataset::{Dataset, Record, Value};
    ///
    /// let dataset = Dataset::build([
    ///     Record::new()
    ///         .with("stage", Value::categorical("Endowment"))
    ///         .with("share", Value::number(10.0)),
    ///     Record::new()
    ///         .with("stage", Value::categorical("Short-term Grants"))
    ///         .with("share", Value::number(60.0)),
    /// ])
    /// .unwrap();
    ///
    /// let ChartSpec::Funnel { stages } = Composer::default().compose_funnel(&dataset).unwrap() else {
    ///     unreachable!();
    /// };
    /// assert_eq!(stages[0].label, "Endowment");
    /// assert_eq!(stages[1].value, 60.0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::SchemaMismatch`] unless the dataset holds
    /// exactly one categorical and one numeric field.
    pub fn compose_funnel(&self, dataset: &Dataset) -> Result<ChartSpec, ComposeError> {
        let stages = self
            .label_values(dataset)?
            .into_iter()
            .enumerate()
            .map(|(idx, (label, value))| FunnelStage {
                label,
                value,
                color: self.color_at(idx),
            })
            .collect::<Vec<_>>();

        debug!(stages_count = stages.len(); "Composed funnel");
        Ok(ChartSpec::Funnel { stages })
    }

    /// Joins graph nodes with their positions and category styles.
    ///
    /// Nodes and edges keep graph insertion order.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::UnknownCategory`] if a node category is missing from `styles`
    /// - [`ComposeError::MissingPosition`] if a node has no entry in `positions`
    pub fn compose_network(
        &self,
        graph: &Graph,
        positions: &Positions,
        styles: &StyleMap,
    ) -> Result<ChartSpec, ComposeError> {
        let nodes = graph
            .nodes()
            .map(|node| -> Result<ScatterNode, ComposeError> {
                let style = styles
                    .get(node.category())
                    .ok_or(ComposeError::UnknownCategory(node.category()))?;
                let point = positions
                    .get(node.id())
                    .ok_or(ComposeError::MissingPosition(node.id()))?;
                Ok(ScatterNode {
                    label: node.id().to_string(),
                    category: node.category(),
                    x: point.x(),
                    y: point.y(),
                    color: style.color(),
                    size: style.size(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges = graph
            .edges()
            .map(|edge| -> Result<ScatterEdge, ComposeError> {
                let start = positions
                    .get(edge.source())
                    .ok_or(ComposeError::MissingPosition(edge.source()))?;
                let end = positions
                    .get(edge.target())
                    .ok_or(ComposeError::MissingPosition(edge.target()))?;
                Ok(ScatterEdge {
                    source: edge.source().to_string(),
                    target: edge.target().to_string(),
                    x0: start.x(),
                    y0: start.y(),
                    x1: end.x(),
                    y1: end.y(),
                    directed: edge.is_directed(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            nodes_count = nodes.len(),
            edges_count = edges.len();
            "Composed network scatter"
        );
        Ok(ChartSpec::NetworkScatter { nodes, edges })
    }

    /// Maps task rows to timeline bars with their duration in days.
    ///
    /// Field names are matched case-insensitively. Colors are assigned per
    /// distinct group, or per task without a `group` field, in order of
    /// first appearance.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::SchemaMismatch`] if a required field is absent or mistyped
    /// - [`ComposeError::InvalidInterval`] if any row ends before it starts
    pub fn compose_timeline(&self, dataset: &Dataset) -> Result<ChartSpec, ComposeError> {
        let task_field = required_field(dataset, "task", ValueKind::Categorical)?;
        let start_field = required_field(dataset, "start", ValueKind::Date)?;
        let end_field = required_field(dataset, "end", ValueKind::Date)?;
        let group_field = optional_field(dataset, "group", ValueKind::Categorical)?;

        let mut color_keys: IndexMap<String, Color> = IndexMap::new();
        let mut bars = Vec::with_capacity(dataset.len());

        for record in dataset.records() {
            let task = text(record, task_field)?;
            let start = date(record, start_field)?;
            let end = date(record, end_field)?;
            if end < start {
                return Err(ComposeError::InvalidInterval {
                    task: task.to_owned(),
                    start,
                    end,
                });
            }

            let group = group_field
                .map(|field| text(record, field).map(str::to_owned))
                .transpose()?;

            let key = group.clone().unwrap_or_else(|| task.to_owned());
            let next_color = self.color_at(color_keys.len());
            let color = *color_keys.entry(key).or_insert(next_color);

            bars.push(TimelineBar {
                task: task.to_owned(),
                start,
                end,
                duration_days: (end - start).num_days(),
                group,
                color,
            });
        }

        debug!(bars_count = bars.len(); "Composed timeline");
        Ok(ChartSpec::TimelineBars { bars })
    }

    /// Maps categories and values to a bar or pie chart, keeping row order.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::SchemaMismatch`] unless the dataset holds exactly
    ///   one categorical and one numeric field
    /// - [`ComposeError::DegenerateDistribution`] for a pie whose values do
    ///   not sum to a positive, finite total
    pub fn compose_categorical(
        &self,
        dataset: &Dataset,
        kind: CategoricalKind,
    ) -> Result<ChartSpec, ComposeError> {
        let entries = self
            .label_values(dataset)?
            .into_iter()
            .enumerate()
            .map(|(idx, (category, value))| CategoryEntry {
                category,
                value,
                color: self.color_at(idx),
            })
            .collect::<Vec<_>>();

        debug!(entries_count = entries.len(), kind:?; "Composed categorical chart");
        match kind {
            CategoricalKind::Bar => Ok(ChartSpec::CategoricalBar { entries }),
            CategoricalKind::Pie => {
                let total: f64 = entries.iter().map(|entry| entry.value).sum();
                if !total.is_finite() || total <= 0.0 {
                    return Err(ComposeError::DegenerateDistribution { total });
                }
                Ok(ChartSpec::Pie { entries })
            }
        }
    }

    fn color_at(&self, idx: usize) -> Color {
        self.palette[idx % self.palette.len()]
    }

    /// Reads `(label, value)` rows from a one-categorical, one-numeric dataset
    fn label_values(&self, dataset: &Dataset) -> Result<Vec<(String, f64)>, ComposeError> {
        if dataset.is_empty() {
            return Err(ComposeError::SchemaMismatch("dataset has no rows".to_owned()));
        }

        let schema = dataset.schema();
        let field_of = |kind: ValueKind| {
            let mut matching = schema.iter().filter(|field| field.kind() == kind);
            match (matching.next(), matching.next()) {
                (Some(field), None) => Ok(field.name()),
                _ => Err(ComposeError::SchemaMismatch(format!(
                    "expected exactly one {kind} field"
                ))),
            }
        };

        if schema.len() != 2 {
            return Err(ComposeError::SchemaMismatch(format!(
                "expected 2 fields, found {}",
                schema.len()
            )));
        }
        let label_field = field_of(ValueKind::Categorical)?;
        let value_field = field_of(ValueKind::Number)?;

        dataset
            .records()
            .iter()
            .map(|record| -> Result<(String, f64), ComposeError> {
                let label = text(record, label_field)?.to_owned();
                let value = record
                    .get(value_field)
                    .and_then(|value| value.as_number())
                    .ok_or_else(|| missing(value_field))?;
                Ok((label, value))
            })
            .collect()
    }
}

impl Default for Composer {
    fn default() -> Self {
        let palette = DEFAULT_PALETTE
            .iter()
            .map(|hex| Color::new(hex).expect("built-in palette colors are valid"))
            .collect();
        Self { palette }
    }
}

/// Finds a field by case-insensitive name and checks its kind
fn optional_field<'a>(
    dataset: &'a Dataset,
    name: &str,
    kind: ValueKind,
) -> Result<Option<&'a str>, ComposeError> {
    let Some(field) = dataset
        .schema()
        .iter()
        .find(|field| field.name().eq_ignore_ascii_case(name))
    else {
        return Ok(None);
    };

    if field.kind() != kind {
        return Err(ComposeError::SchemaMismatch(format!(
            "field `{}` must be {kind}, found {}",
            field.name(),
            field.kind()
        )));
    }
    Ok(Some(field.name()))
}

fn required_field<'a>(
    dataset: &'a Dataset,
    name: &str,
    kind: ValueKind,
) -> Result<&'a str, ComposeError> {
    optional_field(dataset, name, kind)?
        .ok_or_else(|| ComposeError::SchemaMismatch(format!("missing `{name}` field")))
}

fn text<'a>(record: &'a Record, field: &str) -> Result<&'a str, ComposeError> {
    record
        .get(field)
        .and_then(|value| value.as_str())
        .ok_or_else(|| missing(field))
}

fn date(record: &Record, field: &str) -> Result<NaiveDate, ComposeError> {
    record
        .get(field)
        .and_then(|value| value.as_date())
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> ComposeError {
    ComposeError::SchemaMismatch(format!("row lacks a usable `{field}` value"))
}

#[cfg(test)]
mod tests {
    use vantage_core::{dataset::Value, geometry::Point};

    use super::*;
    use crate::layout::{Position, compute_layout};

    fn label_value_dataset(rows: &[(&str, f64)]) -> Dataset {
        Dataset::build(rows.iter().map(|(label, value)| {
            Record::new()
                .with("label", Value::categorical(*label))
                .with("value", Value::number(*value))
        }))
        .unwrap()
    }

    fn timeline_row(task: &str, start: &str, end: &str) -> Record {
        Record::new()
            .with("Task", Value::categorical(task))
            .with("Start", Value::parse_date(start).unwrap())
            .with("End", Value::parse_date(end).unwrap())
    }

    fn ecosystem(with_edges: bool) -> Graph {
        let mut graph = Graph::new();
        graph.add_node("HRHP", NodeCategory::Primary).unwrap();
        for leaf in ["G1", "G2", "G3", "G4"] {
            graph.add_node(leaf, NodeCategory::Funder).unwrap();
        }
        for leaf in ["P1", "P2", "P3", "P4"] {
            graph.add_node(leaf, NodeCategory::Partner).unwrap();
        }
        if with_edges {
            for leaf in ["G1", "G2", "G3", "G4", "P1", "P2", "P3", "P4"] {
                graph.add_edge("HRHP", leaf, false).unwrap();
            }
        }
        graph
    }

    #[test]
    fn test_funnel_preserves_row_order_and_values() {
        let dataset = label_value_dataset(&[
            ("Endowment", 10.0),
            ("Mid-sized Grants", 30.0),
            ("Short-term Grants", 60.0),
        ]);
        let ChartSpec::Funnel { stages } = Composer::default().compose_funnel(&dataset).unwrap()
        else {
            panic!("expected a funnel");
        };

        let pairs: Vec<_> = stages
            .iter()
            .map(|stage| (stage.label.as_str(), stage.value))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Endowment", 10.0),
                ("Mid-sized Grants", 30.0),
                ("Short-term Grants", 60.0)
            ]
        );
    }

    #[test]
    fn test_funnel_rejects_two_numeric_fields() {
        let dataset = Dataset::build([Record::new()
            .with("a", Value::number(1.0))
            .with("b", Value::number(2.0))])
        .unwrap();
        assert!(matches!(
            Composer::default().compose_funnel(&dataset),
            Err(ComposeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_funnel_rejects_empty_dataset() {
        let dataset = Dataset::build(Vec::new()).unwrap();
        assert!(matches!(
            Composer::default().compose_funnel(&dataset),
            Err(ComposeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_timeline_duration_in_days() {
        let dataset =
            Dataset::build([timeline_row("Grant Acquisition", "2025-03-01", "2025-06-30")])
                .unwrap();
        let ChartSpec::TimelineBars { bars } =
            Composer::default().compose_timeline(&dataset).unwrap()
        else {
            panic!("expected timeline bars");
        };
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].duration_days, 121);
        assert_eq!(bars[0].group, None);
    }

    #[test]
    fn test_timeline_rejects_reversed_interval() {
        let dataset =
            Dataset::build([timeline_row("Grant Acquisition", "2025-06-30", "2025-03-01")])
                .unwrap();
        let err = Composer::default().compose_timeline(&dataset).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidInterval { ref task, .. } if task == "Grant Acquisition"));
    }

    #[test]
    fn test_timeline_accepts_zero_length_interval() {
        let dataset =
            Dataset::build([timeline_row("Kickoff", "2025-03-01", "2025-03-01")]).unwrap();
        let ChartSpec::TimelineBars { bars } =
            Composer::default().compose_timeline(&dataset).unwrap()
        else {
            panic!("expected timeline bars");
        };
        assert_eq!(bars[0].duration_days, 0);
    }

    #[test]
    fn test_timeline_requires_date_fields() {
        let dataset = Dataset::build([Record::new()
            .with("task", Value::categorical("A"))
            .with("start", Value::categorical("soon"))
            .with("end", Value::parse_date("2025-03-01").unwrap())])
        .unwrap();
        assert!(matches!(
            Composer::default().compose_timeline(&dataset),
            Err(ComposeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_timeline_colors_follow_groups() {
        let row = |task: &str, group: &str| {
            timeline_row(task, "2025-03-01", "2025-04-01").with("group", Value::categorical(group))
        };
        let dataset = Dataset::build([
            row("A", "funding"),
            row("B", "partners"),
            row("C", "funding"),
        ])
        .unwrap();
        let composer = Composer::default();
        let ChartSpec::TimelineBars { bars } = composer.compose_timeline(&dataset).unwrap() else {
            panic!("expected timeline bars");
        };

        assert_eq!(bars[0].color, bars[2].color);
        assert_ne!(bars[0].color, bars[1].color);
        assert_eq!(bars[1].group.as_deref(), Some("partners"));
    }

    #[test]
    fn test_network_star_counts() {
        let graph = ecosystem(true);
        let positions = compute_layout(&graph, 42, 50);
        let ChartSpec::NetworkScatter { nodes, edges } = Composer::default()
            .compose_network(&graph, &positions, &StyleMap::default())
            .unwrap()
        else {
            panic!("expected a network scatter");
        };

        assert_eq!(nodes.len(), 9);
        assert_eq!(edges.len(), 8);
        assert_eq!(nodes[0].label, "HRHP");
        assert_eq!(nodes[0].size, 30.0);
        assert!(edges.iter().all(|edge| !edge.directed));
    }

    #[test]
    fn test_network_without_edges_keeps_all_nodes() {
        let graph = ecosystem(false);
        let positions = compute_layout(&graph, 42, 50);
        let ChartSpec::NetworkScatter { nodes, edges } = Composer::default()
            .compose_network(&graph, &positions, &StyleMap::default())
            .unwrap()
        else {
            panic!("expected a network scatter");
        };
        assert_eq!(nodes.len(), 9);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_network_edge_segments_match_positions() {
        let mut graph = Graph::new();
        graph.add_node("a", NodeCategory::Primary).unwrap();
        graph.add_node("b", NodeCategory::Outcome).unwrap();
        graph.add_edge("a", "b", true).unwrap();
        let positions: Positions = [
            Position::new(Id::new("a"), Point::new(0.0, 1.0)),
            Position::new(Id::new("b"), Point::new(2.0, 3.0)),
        ]
        .into_iter()
        .collect();

        let ChartSpec::NetworkScatter { edges, .. } = Composer::default()
            .compose_network(&graph, &positions, &StyleMap::default())
            .unwrap()
        else {
            panic!("expected a network scatter");
        };
        let edge = &edges[0];
        assert_eq!((edge.x0, edge.y0, edge.x1, edge.y1), (0.0, 1.0, 2.0, 3.0));
        assert!(edge.directed);
    }

    #[test]
    fn test_network_unknown_category() {
        let graph = ecosystem(true);
        let positions = compute_layout(&graph, 42, 10);
        let styles = StyleMap::new().with_style(
            NodeCategory::Primary,
            NodeStyle::new(Color::default(), 30.0),
        );
        assert_eq!(
            Composer::default().compose_network(&graph, &positions, &styles),
            Err(ComposeError::UnknownCategory(NodeCategory::Funder))
        );
    }

    #[test]
    fn test_network_missing_position() {
        let graph = ecosystem(false);
        assert_eq!(
            Composer::default().compose_network(&graph, &Positions::new(), &StyleMap::default()),
            Err(ComposeError::MissingPosition(Id::new("HRHP")))
        );
    }

    #[test]
    fn test_bar_keeps_order() {
        let dataset = label_value_dataset(&[("Response", 4.0), ("Quality", 2.5)]);
        let ChartSpec::CategoricalBar { entries } = Composer::default()
            .compose_categorical(&dataset, CategoricalKind::Bar)
            .unwrap()
        else {
            panic!("expected a bar chart");
        };
        assert_eq!(entries[0].category, "Response");
        assert_eq!(entries[1].value, 2.5);
    }

    #[test]
    fn test_pie_with_zero_total_is_degenerate() {
        let dataset = label_value_dataset(&[("a", 0.0), ("b", 0.0)]);
        assert_eq!(
            Composer::default().compose_categorical(&dataset, CategoricalKind::Pie),
            Err(ComposeError::DegenerateDistribution { total: 0.0 })
        );
    }

    #[test]
    fn test_pie_with_infinite_total_is_degenerate() {
        let dataset = label_value_dataset(&[("a", f64::INFINITY), ("b", 1.0)]);
        assert_eq!(
            Composer::default().compose_categorical(&dataset, CategoricalKind::Pie),
            Err(ComposeError::DegenerateDistribution {
                total: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_pie_with_positive_total() {
        let dataset = label_value_dataset(&[("a", 1.0), ("b", 3.0)]);
        let spec = Composer::default()
            .compose_categorical(&dataset, CategoricalKind::Pie)
            .unwrap();
        assert_eq!(spec.kind_name(), "pie");
    }

    #[test]
    fn test_palette_cycles() {
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        let composer = Composer::new(vec![red, blue]);
        let dataset = label_value_dataset(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]);
        let ChartSpec::Funnel { stages } = composer.compose_funnel(&dataset).unwrap() else {
            panic!("expected a funnel");
        };
        assert_eq!(stages[0].color, red);
        assert_eq!(stages[1].color, blue);
        assert_eq!(stages[2].color, red);
    }

    #[test]
    fn test_empty_palette_uses_default() {
        assert_eq!(Composer::new(Vec::new()).palette().len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_chart_spec_serializes_with_kind_tag() {
        let dataset = label_value_dataset(&[("a", 1.0)]);
        let spec = Composer::default()
            .compose_categorical(&dataset, CategoricalKind::Bar)
            .unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "categorical_bar");
        assert_eq!(json["entries"][0]["category"], "a");
    }
}
