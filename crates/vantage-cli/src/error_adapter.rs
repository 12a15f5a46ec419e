//! Error adapter for converting VantageError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use vantage::VantageError;

/// Adapter giving a [`VantageError`] a stable diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a VantageError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VantageError::Io(_) => "vantage::io",
            VantageError::Graph(_) => "vantage::graph",
            VantageError::Dataset(_) => "vantage::dataset",
            VantageError::Date(_) => "vantage::date",
            VantageError::Compose(_) => "vantage::compose",
            VantageError::Config(_) => "vantage::config",
            VantageError::Export(_) => "vantage::export",
            VantageError::UnknownView(_) => "vantage::view",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            VantageError::UnknownView(_) => "run `vantage --list` to see the available views",
            VantageError::Config(_) => "check the configuration file passed with --config",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
