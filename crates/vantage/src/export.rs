//! Export of composed charts.
//!
//! This module provides the [`Exporter`] trait, the last stage of the
//! dashboard pipeline:
//!
//! ```text
//! Static data
//!     ↓ structure / dataset
//! Graph or Dataset
//!     ↓ layout (graphs only)
//! Positions
//!     ↓ compose
//! ChartSpec
//!     ↓ export (this module)
//! SVG or JSON text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG markup via [`svg::SvgRenderer`]
//! - [`json`] - pretty-printed JSON via [`json::JsonExporter`]

pub mod json;
pub mod svg;

use std::{fmt, str::FromStr};

use crate::compose::ChartSpec;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Converts a titled chart into the backend's text format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the chart cannot be drawn, or
    /// [`Error::Json`] if serialization fails.
    fn export_chart(&self, title: &str, spec: &ChartSpec) -> Result<String, Error>;
}

/// Output formats supported by the exporters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

impl OutputFormat {
    /// Conventional file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during chart export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// JSON serialization failure.
    Json(serde_json::Error),
    /// An output format name that no exporter handles.
    UnsupportedFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::UnsupportedFormat(name) => write!(f, "Unsupported output format `{name}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::UnsupportedFormat(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "png".parse::<OutputFormat>(),
            Err(Error::UnsupportedFormat(name)) if name == "png"
        ));
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::default().to_string(), "svg");
    }
}
