//! SVG export backend.
//!
//! [`SvgRenderer`] draws every [`ChartSpec`] family on a fixed-size canvas.
//! The chart title sits in a band at the top; the chart itself is fitted
//! into the remaining plot area. Each family lives in its own submodule.

mod categorical;
mod funnel;
mod network;
mod timeline;

use log::{debug, info};
use svg::{
    Document,
    node::element::{Group, Rectangle, Text},
};

use vantage_core::{
    color::Color,
    geometry::{Bounds, Size},
};

use super::{Error, Exporter};
use crate::compose::ChartSpec;

const MARGIN: f32 = 40.0;
const TITLE_BAND: f32 = 40.0;
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Renders chart specifications to SVG markup.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    size: Size,
    background: Option<Color>,
}

impl SvgRenderer {
    /// Create a renderer for a canvas of the given size
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
        }
    }

    /// Fill the canvas with `background` before drawing
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Render a titled chart to a complete SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the canvas cannot hold a plot area or the
    /// chart data cannot be drawn.
    pub fn render(&self, title: &str, spec: &ChartSpec) -> Result<Document, Error> {
        let area = self.plot_area()?;
        debug!(kind = spec.kind_name(), width = area.width(), height = area.height(); "Rendering chart");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("font-family", FONT_FAMILY);

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", self.size.width())
                    .set("height", self.size.height())
                    .set("fill", background),
            );
        }

        doc = doc.add(
            label(title, self.size.width() / 2.0, MARGIN / 2.0 + TITLE_BAND / 2.0, "middle")
                .set("font-size", 20)
                .set("font-weight", "bold"),
        );

        let chart: Group = match spec {
            ChartSpec::Funnel { stages } => self.render_funnel(stages, area),
            ChartSpec::NetworkScatter { nodes, edges } => {
                doc = doc.add(network::marker_definitions(edges));
                self.render_network(nodes, edges, area)
            }
            ChartSpec::TimelineBars { bars } => self.render_timeline(bars, area),
            ChartSpec::CategoricalBar { entries } => self.render_bars(entries, area),
            ChartSpec::Pie { entries } => self.render_pie(entries, area)?,
        };

        Ok(doc.add(chart))
    }

    /// Canvas region left for the chart once margins and the title band are removed
    fn plot_area(&self) -> Result<Bounds, Error> {
        let area = Bounds::new(
            MARGIN,
            MARGIN + TITLE_BAND,
            self.size.width() - MARGIN,
            self.size.height() - MARGIN,
        );
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Err(Error::Render(format!(
                "canvas {}x{} is too small to hold a chart",
                self.size.width(),
                self.size.height()
            )));
        }
        Ok(area)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl Exporter for SvgRenderer {
    fn export_chart(&self, title: &str, spec: &ChartSpec) -> Result<String, Error> {
        let doc = self.render(title, spec)?;
        info!(kind = spec.kind_name(); "SVG document rendered");
        Ok(doc.to_string())
    }
}

/// Text element anchored at `(x, y)`
fn label(content: &str, x: f32, y: f32, anchor: &str) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("dominant-baseline", "middle")
        .set("font-size", 12)
}

/// Formats a chart value without a trailing `.0` for whole numbers
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use vantage_core::color::Color;

    use super::*;
    use crate::compose::{CategoryEntry, FunnelStage};

    fn entry(category: &str, value: f64) -> CategoryEntry {
        CategoryEntry {
            category: category.to_string(),
            value,
            color: Color::new("#58508d").unwrap(),
        }
    }

    #[test]
    fn test_document_has_canvas_size_and_title() {
        let spec = ChartSpec::Funnel {
            stages: vec![FunnelStage {
                label: "Endowment".to_string(),
                value: 10.0,
                color: Color::default(),
            }],
        };
        let svg = SvgRenderer::default()
            .export_chart("Funding Sources Distribution", &spec)
            .unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(svg.contains("Funding Sources Distribution"));
        assert!(svg.contains("Endowment"));
    }

    #[test]
    fn test_background_is_drawn_first() {
        let renderer =
            SvgRenderer::default().with_background(Some(Color::new("white").unwrap()));
        let svg = renderer
            .export_chart("Bars", &ChartSpec::CategoricalBar { entries: vec![entry("a", 1.0)] })
            .unwrap();
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_tiny_canvas_is_rejected() {
        let renderer = SvgRenderer::new(Size::new(50.0, 50.0));
        let result =
            renderer.export_chart("Bars", &ChartSpec::CategoricalBar { entries: Vec::new() });
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(60.0), "60");
        assert_eq!(format_value(2.5), "2.50");
    }
}
