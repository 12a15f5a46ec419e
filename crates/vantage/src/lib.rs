//! Vantage - graph layout and chart composition for strategy dashboards
//!
//! This library turns small attributed graphs into 2-D coordinates with a
//! seeded force-directed layout, maps tabular datasets and laid-out graphs
//! into declarative [`compose::ChartSpec`]s, and exports those as SVG or
//! JSON.
//!
//! # Pipeline
//!
//! - [`structure`] - graph model with per-edge direction
//! - [`layout`] - force-directed and layered layout engines
//! - [`compose`] - one pure mapping function per chart family
//! - [`export`] - SVG and JSON backends
//! - [`Dashboard`] - the fixed set of dashboard views tying it together
//!
//! # Examples
//!
//! ```
//! use vantage::{Dashboard, View, config::AppConfig};
//!
//! let dashboard = Dashboard::new(AppConfig::default());
//! for view in dashboard.views() {
//!     let json = dashboard.render_json(*view).unwrap();
//!     assert!(json.contains("\"kind\""));
//! }
//! ```

pub mod compose;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use vantage_core::{color, dataset, geometry, identifier};

pub use dashboard::{Dashboard, RenderedView, View, ViewParseError};
pub use error::VantageError;
pub use layout::compute_layout;
