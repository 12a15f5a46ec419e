//! Declarative chart specifications
//!
//! A [`ChartSpec`] carries only the geometry, labels and colors a renderer
//! needs. It serializes with a `kind` tag so a backend adapter can translate
//! it one to one.

use chrono::NaiveDate;
use serde::Serialize;

use vantage_core::color::Color;

use crate::structure::NodeCategory;

/// Renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Funnel {
        stages: Vec<FunnelStage>,
    },
    NetworkScatter {
        nodes: Vec<ScatterNode>,
        edges: Vec<ScatterEdge>,
    },
    TimelineBars {
        bars: Vec<TimelineBar>,
    },
    CategoricalBar {
        entries: Vec<CategoryEntry>,
    },
    Pie {
        entries: Vec<CategoryEntry>,
    },
}

impl ChartSpec {
    /// Snake-case name of the chart family, matching the serialized `kind` tag
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartSpec::Funnel { .. } => "funnel",
            ChartSpec::NetworkScatter { .. } => "network_scatter",
            ChartSpec::TimelineBars { .. } => "timeline_bars",
            ChartSpec::CategoricalBar { .. } => "categorical_bar",
            ChartSpec::Pie { .. } => "pie",
        }
    }
}

/// One funnel stage, listed top to bottom
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

/// A positioned, styled node of a network chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterNode {
    pub label: String,
    pub category: NodeCategory,
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub size: f32,
}

/// Line segment between two positioned nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterEdge {
    pub source: String,
    pub target: String,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub directed: bool,
}

/// One row of a Gantt-style timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBar {
    pub task: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
    pub group: Option<String>,
    pub color: Color,
}

/// A category and its value, used by bar and pie charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
    pub category: String,
    pub value: f64,
    pub color: Color,
}
