//! Vantage CLI library
//!
//! This module contains the core CLI logic for rendering dashboard views.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::fs;

use log::info;

use vantage::{Dashboard, VantageError, View, export::OutputFormat};

/// Run the Vantage CLI application
///
/// Prints the view list when `--list` is given; otherwise renders the
/// selected view and writes it to the output file.
///
/// # Errors
///
/// Returns `VantageError` for:
/// - Unknown view slugs or output formats
/// - Configuration loading errors
/// - Composition or rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), VantageError> {
    if args.list {
        for view in View::ALL {
            println!("{:<26}{}", view.slug(), view.title());
        }
        return Ok(());
    }

    let view = match &args.view {
        Some(slug) => slug.parse::<View>()?,
        None => View::default(),
    };
    let format: OutputFormat = args.format.parse()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| format!("out.{}", format.extension()));

    info!(view = view.slug(), output_path = output; "Rendering view");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config.layout_mut().set_seed(seed);
    }
    if let Some(iterations) = args.iterations {
        app_config.layout_mut().set_iterations(iterations);
    }

    let dashboard = Dashboard::new(app_config);
    let rendered = dashboard.render(view, format)?;

    fs::write(&output, rendered)?;

    info!(output_file = output; "View exported successfully");

    Ok(())
}
