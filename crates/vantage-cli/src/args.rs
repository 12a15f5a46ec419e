//! Command-line argument definitions for the Vantage CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the dashboard view, the output path and
//! format, configuration overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Vantage dashboard renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Slug of the view to render
    #[arg(help = "View to render (see --list), defaults to partnership-ecosystem")]
    pub view: Option<String>,

    /// Path to the output file, `out.<format>` when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (svg, json)
    #[arg(short, long, default_value = "svg")]
    pub format: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Layout seed, overriding the configuration file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Force simulation iterations, overriding the configuration file
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Print the available views and exit
    #[arg(long)]
    pub list: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
