//! View registry for the strategy dashboard.
//!
//! A [`View`] names one of the fixed dashboard charts. [`Dashboard`] builds
//! the view's data from static constants, runs a layout for graph views and
//! hands the result to the [`Composer`]. Nothing is cached between calls.

pub mod data;

use std::{fmt, str::FromStr};

use log::{debug, info};
use thiserror::Error;

use vantage_core::geometry::Size;

use crate::{
    VantageError,
    compose::{CategoricalKind, ChartSpec, Composer},
    config::AppConfig,
    export::{Exporter, OutputFormat, json::JsonExporter, svg::SvgRenderer},
    layout::{EngineBuilder, LayoutEngine},
    structure::Graph,
};

/// One selectable dashboard chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    FundingDiversification,
    DataMonetization,
    ImplementationTimeline,
    #[default]
    PartnershipEcosystem,
    ProcessMetrics,
    FundingMix,
    ProcessFlow,
}

impl View {
    /// Every view, in menu order
    pub const ALL: [View; 7] = [
        View::FundingDiversification,
        View::DataMonetization,
        View::ImplementationTimeline,
        View::PartnershipEcosystem,
        View::ProcessMetrics,
        View::FundingMix,
        View::ProcessFlow,
    ];

    /// Kebab-case identifier used on the command line
    pub fn slug(self) -> &'static str {
        match self {
            View::FundingDiversification => "funding-diversification",
            View::DataMonetization => "data-monetization",
            View::ImplementationTimeline => "implementation-timeline",
            View::PartnershipEcosystem => "partnership-ecosystem",
            View::ProcessMetrics => "process-metrics",
            View::FundingMix => "funding-mix",
            View::ProcessFlow => "process-flow",
        }
    }

    /// Menu entry shown to the user
    pub fn title(self) -> &'static str {
        match self {
            View::FundingDiversification => "Funding Diversification",
            View::DataMonetization => "Data Monetization Strategy",
            View::ImplementationTimeline => "Implementation Timeline",
            View::PartnershipEcosystem => "HRHP Partnership Ecosystem",
            View::ProcessMetrics => "Internal Process Metrics",
            View::FundingMix => "Funding Mix",
            View::ProcessFlow => "Data Processing Flow",
        }
    }

    /// Heading drawn above the chart
    pub fn chart_title(self) -> &'static str {
        match self {
            View::FundingDiversification => "Funding Sources Distribution",
            View::DataMonetization => "Data Monetization Flowchart",
            View::ImplementationTimeline => "HRHP Implementation Timeline",
            View::PartnershipEcosystem => "HRHP Partnership Ecosystem",
            View::ProcessMetrics => "Process Efficiency Scores",
            View::FundingMix => "Share of Funding by Source",
            View::ProcessFlow => "From Data Collection to Reinvestment",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Returned when a string matches no [`View::slug`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view `{name}`")]
pub struct ViewParseError {
    name: String,
}

impl ViewParseError {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for View {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| ViewParseError {
                name: s.to_string(),
            })
    }
}

/// A composed view, ready to export
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    view: View,
    title: String,
    spec: ChartSpec,
}

impl RenderedView {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn into_spec(self) -> ChartSpec {
        self.spec
    }
}

/// Composes and renders dashboard views.
///
/// # Examples
///
/// ```
/// use vantage::{Dashboard, View, compose::ChartSpec};
///
/// let dashboard = Dashboard::default();
/// let rendered = dashboard.compose(View::FundingDiversification).unwrap();
/// assert!(matches!(rendered.spec(), ChartSpec::Funnel { stages } if stages.len() == 3));
///
/// let svg = dashboard.render_svg(View::PartnershipEcosystem).unwrap();
/// assert!(svg.contains("HRHP"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    config: AppConfig,
}

impl Dashboard {
    /// Create a dashboard with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Every selectable view, in menu order
    pub fn views(&self) -> &'static [View] {
        &View::ALL
    }

    /// Builds the view's data and maps it to a chart specification.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Config`] for invalid style settings, or the
    /// graph, dataset or composition error raised while building the view.
    pub fn compose(&self, view: View) -> Result<RenderedView, VantageError> {
        info!(view = view.slug(); "Composing view");
        let composer = Composer::new(self.config.style().palette().map_err(VantageError::Config)?);

        let spec = match view {
            View::FundingDiversification => composer.compose_funnel(&data::funding_sources()?)?,
            View::DataMonetization => {
                let graph = data::data_monetization()?;
                self.compose_graph(&composer, &graph, self.config.layout().network())?
            }
            View::ImplementationTimeline => {
                composer.compose_timeline(&data::implementation_timeline()?)?
            }
            View::PartnershipEcosystem => {
                let graph = data::partnership_ecosystem()?;
                self.compose_graph(&composer, &graph, self.config.layout().network())?
            }
            View::ProcessMetrics => {
                composer.compose_categorical(&data::process_metrics()?, CategoricalKind::Bar)?
            }
            View::FundingMix => {
                let shares = data::funding_sources()?.sort_by(data::FUNDING_PERCENTAGE, false)?;
                composer.compose_categorical(&shares, CategoricalKind::Pie)?
            }
            View::ProcessFlow => {
                let graph = data::process_flow()?;
                self.compose_graph(&composer, &graph, self.config.layout().process())?
            }
        };

        debug!(view = view.slug(), kind = spec.kind_name(); "View composed");
        Ok(RenderedView {
            view,
            title: view.chart_title().to_string(),
            spec,
        })
    }

    /// Composes the view and renders it as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns any [`Dashboard::compose`] error, or [`VantageError::Export`]
    /// if rendering fails.
    pub fn render_svg(&self, view: View) -> Result<String, VantageError> {
        self.render(view, OutputFormat::Svg)
    }

    /// Composes the view and serializes it as JSON.
    ///
    /// # Errors
    ///
    /// Returns any [`Dashboard::compose`] error, or [`VantageError::Export`]
    /// if serialization fails.
    pub fn render_json(&self, view: View) -> Result<String, VantageError> {
        self.render(view, OutputFormat::Json)
    }

    /// Composes the view and exports it in `format`.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::render_svg`] and [`Dashboard::render_json`].
    pub fn render(&self, view: View, format: OutputFormat) -> Result<String, VantageError> {
        let rendered = self.compose(view)?;
        let exporter: Box<dyn Exporter> = match format {
            OutputFormat::Svg => Box::new(self.svg_renderer()?),
            OutputFormat::Json => Box::new(JsonExporter),
        };
        let output = exporter.export_chart(rendered.title(), rendered.spec())?;
        info!(view = view.slug(), format:% = format, bytes = output.len(); "View rendered");
        Ok(output)
    }

    fn compose_graph(
        &self,
        composer: &Composer,
        graph: &Graph,
        engine: LayoutEngine,
    ) -> Result<ChartSpec, VantageError> {
        let layout = self.config.layout();
        let mut engines = EngineBuilder::new()
            .with_iterations(layout.iterations().map_err(VantageError::Config)?)
            .with_initial_temperature(
                layout
                    .initial_temperature()
                    .map_err(VantageError::Config)?,
            );
        let positions = engines.engine(engine).calculate(graph, layout.seed());
        debug!(engine:?, positions_count = positions.len(); "Layout calculated");

        let styles = self
            .config
            .style()
            .node_styles()
            .map_err(VantageError::Config)?;
        Ok(composer.compose_network(graph, &positions, &styles)?)
    }

    fn svg_renderer(&self) -> Result<SvgRenderer, VantageError> {
        let style = self.config.style();
        let background = style.background_color().map_err(VantageError::Config)?;
        Ok(SvgRenderer::new(Size::new(style.width(), style.height())).with_background(background))
    }
}
