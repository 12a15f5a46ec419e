//! SVG rendering for bar and pie charts.

use std::f64::consts::{PI, TAU};

use svg::node::element::{Circle, Group, Path, Rectangle};

use vantage_core::geometry::{Bounds, Point};

use super::{SvgRenderer, format_value, label};
use crate::{compose::CategoryEntry, export::Error};

/// Height reserved below the bars for category names
const CATEGORY_BAND: f32 = 24.0;
/// Share of each slot taken by its bar
const BAR_FILL: f32 = 0.7;

impl SvgRenderer {
    /// Draws vertical bars from a common baseline, tallest value at full height.
    ///
    /// Negative values are drawn as empty bars.
    pub(super) fn render_bars(&self, entries: &[CategoryEntry], area: Bounds) -> Group {
        let mut group = Group::new().set("class", "bars");
        if entries.is_empty() {
            return group;
        }

        let max_value = entries
            .iter()
            .map(|entry| entry.value)
            .fold(0.0_f64, f64::max);
        let scale = if max_value > 0.0 { 1.0 / max_value } else { 0.0 };

        let baseline = area.max_y() - CATEGORY_BAND;
        let usable_height = (baseline - area.min_y() - CATEGORY_BAND).max(1.0);
        let slot = area.width() / entries.len() as f32;
        let bar_width = slot * BAR_FILL;

        for (idx, entry) in entries.iter().enumerate() {
            let height = usable_height * (entry.value.max(0.0) * scale) as f32;
            let center_x = area.min_x() + slot * (idx as f32 + 0.5);

            group = group
                .add(
                    Rectangle::new()
                        .set("x", center_x - bar_width / 2.0)
                        .set("y", baseline - height)
                        .set("width", bar_width)
                        .set("height", height)
                        .set("fill", entry.color),
                )
                .add(label(
                    &format_value(entry.value),
                    center_x,
                    baseline - height - 10.0,
                    "middle",
                ))
                .add(label(
                    &entry.category,
                    center_x,
                    baseline + CATEGORY_BAND / 2.0,
                    "middle",
                ));
        }
        group
    }

    /// Draws one wedge per entry, clockwise from twelve o'clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the values do not add up to a positive total.
    pub(super) fn render_pie(&self, entries: &[CategoryEntry], area: Bounds) -> Result<Group, Error> {
        let total: f64 = entries.iter().map(|entry| entry.value.max(0.0)).sum();
        if total.is_nan() || total <= 0.0 {
            return Err(Error::Render(format!(
                "pie values must add up to a positive total, got {total}"
            )));
        }

        let center = area.center();
        let radius = area.width().min(area.height()) / 2.0 * 0.8;
        let mut group = Group::new().set("class", "pie");
        let mut angle = -PI / 2.0;

        for entry in entries {
            let share = entry.value.max(0.0) / total;
            let sweep = share * TAU;
            let middle = angle + sweep / 2.0;

            if share >= 1.0 {
                group = group.add(
                    Circle::new()
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("r", radius)
                        .set("fill", entry.color),
                );
            } else if share > 0.0 {
                group = group.add(
                    Path::new()
                        .set("d", wedge_path(center, radius, angle, sweep))
                        .set("fill", entry.color)
                        .set("stroke", "white"),
                );
            }

            let anchor = point_on_circle(center, radius * 1.15, middle);
            group = group.add(label(
                &format!("{} ({:.1}%)", entry.category, share * 100.0),
                anchor.x(),
                anchor.y(),
                if anchor.x() < center.x() { "end" } else { "start" },
            ));
            angle += sweep;
        }
        Ok(group)
    }
}

fn point_on_circle(center: Point, radius: f32, angle: f64) -> Point {
    center.add_point(Point::from_polar(radius, angle as f32))
}

/// Path data for a wedge starting at `start` radians and spanning `sweep`
fn wedge_path(center: Point, radius: f32, start: f64, sweep: f64) -> String {
    let from = point_on_circle(center, radius, start);
    let to = point_on_circle(center, radius, start + sweep);
    let large_arc = u8::from(sweep > PI);
    format!(
        "M {} {} L {} {} A {radius} {radius} 0 {large_arc} 1 {} {} Z",
        center.x(),
        center.y(),
        from.x(),
        from.y(),
        to.x(),
        to.y()
    )
}
