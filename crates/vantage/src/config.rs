//! Configuration types for Vantage dashboards.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to the built-in default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Layout engines per graph view, seed and force simulation knobs.
//! - [`StyleConfig`] - Canvas size, background, palette and node category styles.
//!
//! # Example
//!
//! ```
//! # use vantage::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().seed(), 42);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use vantage_core::color::Color;

use crate::{
    compose::{NodeStyle, StyleMap},
    layout::{DEFAULT_ITERATIONS, LayoutEngine},
    structure::NodeCategory,
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for in-place overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout settings shared by every graph view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// [`LayoutEngine`] for network views.
    network: LayoutEngine,

    /// [`LayoutEngine`] for process-step views.
    process: LayoutEngine,

    /// Seed for the force layout's initial positions.
    seed: u64,

    /// Force simulation iteration budget.
    iterations: usize,

    /// Temperature of the first force iteration.
    initial_temperature: f32,
}

impl LayoutConfig {
    /// Returns the [`LayoutEngine`] for network views.
    pub fn network(&self) -> LayoutEngine {
        self.network
    }

    /// Returns the [`LayoutEngine`] for process-step views.
    pub fn process(&self) -> LayoutEngine {
        self.process
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the force simulation iteration budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is zero.
    pub fn iterations(&self) -> Result<usize, String> {
        if self.iterations == 0 {
            return Err("Layout iterations in config must be at least 1".to_owned());
        }
        Ok(self.iterations)
    }

    /// Returns the temperature of the first force iteration.
    ///
    /// # Errors
    ///
    /// Returns an error unless the temperature is positive and finite.
    pub fn initial_temperature(&self) -> Result<f32, String> {
        let temperature = self.initial_temperature;
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(format!(
                "Invalid initial temperature in config: {temperature} (must be positive)"
            ));
        }
        Ok(temperature)
    }

    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }

    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            network: LayoutEngine::Force,
            process: LayoutEngine::Layered,
            seed: 42,
            iterations: DEFAULT_ITERATIONS,
            initial_temperature: 0.1,
        }
    }
}

/// Visual styling configuration for rendered charts.
///
/// Colors are kept as strings and validated when read, so a bad color is
/// reported by the accessor rather than while loading the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    palette: Vec<String>,
    width: f32,
    height: f32,
    nodes: NodeStylesConfig,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured chart palette; empty means the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first palette entry that is not a valid color.
    pub fn palette(&self) -> Result<Vec<Color>, String> {
        self.palette
            .iter()
            .map(|color| Color::new(color))
            .collect::<Result<_, _>>()
            .map_err(|err| format!("Invalid palette color in config: {err}"))
    }

    /// Canvas width in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Default node styles with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if an override carries an invalid color.
    pub fn node_styles(&self) -> Result<StyleMap, String> {
        let mut styles = StyleMap::default();
        for (category, overrides) in self.nodes.entries() {
            let Some(overrides) = overrides else {
                continue;
            };
            let base = styles
                .get(category)
                .unwrap_or_else(|| NodeStyle::new(Color::default(), 20.0));

            let color = match &overrides.color {
                Some(color) => Color::new(color)
                    .map_err(|err| format!("Invalid `{category}` node color in config: {err}"))?,
                None => base.color(),
            };
            let size = overrides.size.unwrap_or(base.size());
            styles.insert(category, NodeStyle::new(color, size));
        }
        Ok(styles)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            palette: Vec::new(),
            width: 800.0,
            height: 600.0,
            nodes: NodeStylesConfig::default(),
        }
    }
}

/// Per-category `[style.nodes.<category>]` tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NodeStylesConfig {
    primary: Option<NodeStyleConfig>,
    funder: Option<NodeStyleConfig>,
    partner: Option<NodeStyleConfig>,
    consumer: Option<NodeStyleConfig>,
    outcome: Option<NodeStyleConfig>,
    step: Option<NodeStyleConfig>,
}

impl NodeStylesConfig {
    fn entries(&self) -> [(NodeCategory, Option<&NodeStyleConfig>); 6] {
        [
            (NodeCategory::Primary, self.primary.as_ref()),
            (NodeCategory::Funder, self.funder.as_ref()),
            (NodeCategory::Partner, self.partner.as_ref()),
            (NodeCategory::Consumer, self.consumer.as_ref()),
            (NodeCategory::Outcome, self.outcome.as_ref()),
            (NodeCategory::Step, self.step.as_ref()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NodeStyleConfig {
    color: Option<String>,
    size: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().network(), LayoutEngine::Force);
        assert_eq!(config.layout().process(), LayoutEngine::Layered);
        assert_eq!(config.layout().iterations(), Ok(50));
        assert_eq!(config.style().width(), 800.0);
        assert_eq!(config.style().height(), 600.0);
        assert_eq!(config.style().background_color(), Ok(None));
        assert!(config.style().palette().unwrap().is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            seed = 7
            network = "layered"

            [style]
            background_color = "white"
            palette = ["#111111", "#222222"]

            [style.nodes.funder]
            size = 25.0
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().seed(), 7);
        assert_eq!(config.layout().network(), LayoutEngine::Layered);
        assert_eq!(config.layout().process(), LayoutEngine::Layered);
        assert_eq!(config.layout().iterations(), Ok(50));
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().palette().unwrap().len(), 2);

        let styles = config.style().node_styles().unwrap();
        let funder = styles.get(NodeCategory::Funder).unwrap();
        assert_eq!(funder.size(), 25.0);
        assert_eq!(funder.color(), Color::new("#2ca02c").unwrap());
    }

    #[test]
    fn test_invalid_node_color_is_reported() {
        let config: AppConfig = toml::from_str(
            r#"
            [style.nodes.primary]
            color = "not-a-color"
            "#,
        )
        .unwrap();
        let err = config.style().node_styles().unwrap_err();
        assert!(err.contains("primary"));
    }

    #[test]
    fn test_unknown_node_category_is_rejected() {
        let parsed: Result<AppConfig, _> = toml::from_str(
            r#"
            [style.nodes.sponsor]
            size = 3.0
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_layout_overrides() {
        let mut config = AppConfig::default();
        config.layout_mut().set_seed(9).set_iterations(5);
        assert_eq!(config.layout().seed(), 9);
        assert_eq!(config.layout().iterations(), Ok(5));
    }

    #[test]
    fn test_non_positive_temperature_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            initial_temperature = -5.0
            "#,
        )
        .unwrap();
        let err = config.layout().initial_temperature().unwrap_err();
        assert!(err.contains("-5"));
    }

    #[test]
    fn test_zero_iterations_is_rejected() {
        let mut config = AppConfig::default();
        config.layout_mut().set_iterations(0);
        assert!(config.layout().iterations().is_err());
    }
}
