//! SVG rendering for funnel charts.

use svg::node::element::{Group, Rectangle};

use vantage_core::geometry::Bounds;

use super::{SvgRenderer, format_value, label};
use crate::compose::FunnelStage;

/// Vertical gap between consecutive stages
const STAGE_GAP: f32 = 6.0;

impl SvgRenderer {
    /// Draws stages top to bottom as bars centered on the plot area, with
    /// widths proportional to value.
    pub(super) fn render_funnel(&self, stages: &[FunnelStage], area: Bounds) -> Group {
        let mut group = Group::new().set("class", "funnel");
        if stages.is_empty() {
            return group;
        }

        let max_value = stages
            .iter()
            .map(|stage| stage.value)
            .fold(0.0_f64, f64::max);
        let scale = if max_value > 0.0 { 1.0 / max_value } else { 0.0 };

        let slot = area.height() / stages.len() as f32;
        let bar_height = (slot - STAGE_GAP).max(1.0);
        let center_x = area.center().x();

        for (idx, stage) in stages.iter().enumerate() {
            let width = area.width() * (stage.value.max(0.0) * scale) as f32;
            let top = area.min_y() + slot * idx as f32;

            group = group
                .add(
                    Rectangle::new()
                        .set("x", center_x - width / 2.0)
                        .set("y", top)
                        .set("width", width)
                        .set("height", bar_height)
                        .set("fill", stage.color),
                )
                .add(
                    label(
                        &format!("{}: {}", stage.label, format_value(stage.value)),
                        center_x,
                        top + bar_height / 2.0,
                        "middle",
                    )
                    .set("fill", "black"),
                );
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use vantage_core::color::Color;

    use super::*;

    #[test]
    fn test_one_bar_per_stage() {
        let stages: Vec<_> = [10.0, 30.0, 60.0]
            .into_iter()
            .map(|value| FunnelStage {
                label: format!("stage {value}"),
                value,
                color: Color::default(),
            })
            .collect();
        let group = SvgRenderer::default().render_funnel(&stages, Bounds::new(0.0, 0.0, 600.0, 300.0));
        let markup = group.to_string();

        assert_eq!(markup.matches("<rect").count(), 3);
        assert!(markup.contains(r#"width="600""#));
        assert!(markup.contains("stage 30: 30"));
    }
}
