//! Error types for Vantage operations.
//!
//! [`VantageError`] wraps the error of every layer so dashboard callers deal
//! with a single type.

use std::io;

use thiserror::Error;

use vantage_core::dataset::DatasetError;

use crate::{compose::ComposeError, dashboard::ViewParseError, structure::GraphError};

/// The main error type for Vantage operations.
#[derive(Debug, Error)]
pub enum VantageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Date error: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),

    #[error("Unknown view: {0}")]
    UnknownView(String),
}

impl From<ViewParseError> for VantageError {
    fn from(err: ViewParseError) -> Self {
        Self::UnknownView(err.name().to_string())
    }
}
