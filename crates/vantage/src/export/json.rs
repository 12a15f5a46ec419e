//! JSON export backend.

use log::debug;
use serde::Serialize;

use super::{Error, Exporter};
use crate::compose::ChartSpec;

/// Serializes a chart specification as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn to_json(spec: &ChartSpec) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(spec)?)
}

/// Writes a chart as `{"title": ..., "chart": {...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

#[derive(Serialize)]
struct Document<'a> {
    title: &'a str,
    chart: &'a ChartSpec,
}

impl Exporter for JsonExporter {
    fn export_chart(&self, title: &str, spec: &ChartSpec) -> Result<String, Error> {
        debug!(kind = spec.kind_name(); "Exporting chart as JSON");
        Ok(serde_json::to_string_pretty(&Document { title, chart: spec })?)
    }
}

#[cfg(test)]
mod tests {
    use vantage_core::color::Color;

    use super::*;
    use crate::compose::FunnelStage;

    fn funnel() -> ChartSpec {
        ChartSpec::Funnel {
            stages: vec![FunnelStage {
                label: "Endowment & Investments".to_string(),
                value: 10.0,
                color: Color::new("#09188d").unwrap(),
            }],
        }
    }

    #[test]
    fn test_to_json_has_kind_tag() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&funnel()).unwrap()).unwrap();
        assert_eq!(json["kind"], "funnel");
        assert_eq!(json["stages"][0]["label"], "Endowment & Investments");
        assert_eq!(json["stages"][0]["value"], 10.0);
    }

    #[test]
    fn test_exporter_wraps_title() {
        let text = JsonExporter.export_chart("Funding", &funnel()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["title"], "Funding");
        assert_eq!(json["chart"]["kind"], "funnel");
    }
}
