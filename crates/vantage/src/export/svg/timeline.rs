//! SVG rendering for Gantt-style timelines.

use chrono::NaiveDate;
use svg::node::element::{Group, Line, Rectangle};

use vantage_core::geometry::Bounds;

use super::{SvgRenderer, label};
use crate::compose::TimelineBar;

/// Width reserved on the left for task names
const LABEL_COLUMN: f32 = 160.0;
/// Height reserved at the bottom for the date axis
const AXIS_BAND: f32 = 24.0;
const ROW_GAP: f32 = 8.0;

impl SvgRenderer {
    /// Draws one horizontal bar per row on a shared day scale.
    pub(super) fn render_timeline(&self, bars: &[TimelineBar], area: Bounds) -> Group {
        let mut group = Group::new().set("class", "timeline");
        let (Some(first_day), Some(last_day)) = (
            bars.iter().map(|bar| bar.start).min(),
            bars.iter().map(|bar| bar.end).max(),
        ) else {
            return group;
        };

        let label_column = LABEL_COLUMN.min(area.width() / 3.0);
        let plot = Bounds::new(
            area.min_x() + label_column,
            area.min_y(),
            area.max_x(),
            (area.max_y() - AXIS_BAND).max(area.min_y() + 1.0),
        );
        let scale = DayScale::new(first_day, last_day, plot);
        let row_height = plot.height() / bars.len() as f32;
        let bar_height = (row_height - ROW_GAP).max(1.0);

        for (idx, bar) in bars.iter().enumerate() {
            let top = plot.min_y() + row_height * idx as f32;
            let x0 = scale.x(bar.start);
            let x1 = scale.x(bar.end);

            group = group
                .add(label(
                    &bar.task,
                    plot.min_x() - 8.0,
                    top + bar_height / 2.0,
                    "end",
                ))
                .add(
                    Rectangle::new()
                        .set("x", x0)
                        .set("y", top)
                        .set("width", (x1 - x0).max(1.0))
                        .set("height", bar_height)
                        .set("fill", bar.color),
                );
        }

        let axis_y = plot.max_y();
        group
            .add(
                Line::new()
                    .set("x1", plot.min_x())
                    .set("y1", axis_y)
                    .set("x2", plot.max_x())
                    .set("y2", axis_y)
                    .set("stroke", "black"),
            )
            .add(label(
                &first_day.to_string(),
                plot.min_x(),
                axis_y + AXIS_BAND / 2.0,
                "start",
            ))
            .add(label(
                &last_day.to_string(),
                plot.max_x(),
                axis_y + AXIS_BAND / 2.0,
                "end",
            ))
    }
}

/// Linear mapping from calendar days to canvas x
struct DayScale {
    first_day: NaiveDate,
    min_x: f32,
    pixels_per_day: f32,
}

impl DayScale {
    fn new(first_day: NaiveDate, last_day: NaiveDate, plot: Bounds) -> Self {
        let span = (last_day - first_day).num_days().max(1);
        Self {
            first_day,
            min_x: plot.min_x(),
            pixels_per_day: plot.width() / span as f32,
        }
    }

    fn x(&self, day: NaiveDate) -> f32 {
        self.min_x + (day - self.first_day).num_days() as f32 * self.pixels_per_day
    }
}

#[cfg(test)]
mod tests {
    use vantage_core::color::Color;

    use super::*;

    fn bar(task: &str, start: &str, end: &str) -> TimelineBar {
        let start: NaiveDate = start.parse().unwrap();
        let end: NaiveDate = end.parse().unwrap();
        TimelineBar {
            task: task.to_string(),
            start,
            end,
            duration_days: (end - start).num_days(),
            group: None,
            color: Color::default(),
        }
    }

    #[test]
    fn test_day_scale_spans_plot() {
        let plot = Bounds::new(100.0, 0.0, 400.0, 50.0);
        let first = "2025-03-01".parse().unwrap();
        let last = "2025-03-31".parse().unwrap();
        let scale = DayScale::new(first, last, plot);

        assert_eq!(scale.x(first), 100.0);
        assert_eq!(scale.x(last), 400.0);
    }

    #[test]
    fn test_rows_and_axis_labels() {
        let bars = [
            bar("Grant Acquisition", "2025-03-01", "2025-06-30"),
            bar("Endowment Structuring", "2025-05-01", "2025-09-30"),
        ];
        let markup = SvgRenderer::default()
            .render_timeline(&bars, Bounds::new(0.0, 0.0, 700.0, 400.0))
            .to_string();

        assert_eq!(markup.matches("<rect").count(), 2);
        assert!(markup.contains("Grant Acquisition"));
        assert!(markup.contains("2025-03-01"));
        assert!(markup.contains("2025-09-30"));
    }

    #[test]
    fn test_empty_timeline_draws_nothing() {
        let markup = SvgRenderer::default()
            .render_timeline(&[], Bounds::new(0.0, 0.0, 700.0, 400.0))
            .to_string();
        assert!(!markup.contains("<rect"));
    }
}
