//! Conversion of reduced runs into pixel polylines.
//!
//! Nothing here samples or clips; input is expected to be reduced already.
//! Output is backend-agnostic and ready to hand to a painter.

use crate::axis::{AxisScale, AxisTransform};
use crate::geom::{PixelPoint, Point};
use crate::selection::non_finite_segments;
use crate::transform::Axes;

/// How consecutive data points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineStyle {
    /// No line; markers only.
    None,
    /// Straight segments between points.
    #[default]
    Line,
    /// Each point's value holds until the next point's key.
    StepLeft,
    /// Each point's value starts at the previous point's key.
    StepRight,
    /// Risers sit halfway between consecutive keys.
    StepCenter,
    /// A spike from the zero line to every point.
    Impulse,
}

/// Convert a reduced run into the pixel polyline for `style`.
///
/// Step styles and impulses emit two pixel points per data point. Impulses
/// of non-finite values collapse to the origin so indices stay aligned with
/// the data.
pub fn lines_from_data(points: &[Point], axes: Axes<'_>, style: LineStyle) -> Vec<PixelPoint> {
    match style {
        LineStyle::None => Vec::new(),
        LineStyle::Line => points
            .iter()
            .map(|point| axes.data_to_pixel(*point))
            .collect(),
        LineStyle::StepLeft => step_left(points, axes),
        LineStyle::StepRight => step_right(points, axes),
        LineStyle::StepCenter => step_center(points, axes),
        LineStyle::Impulse => impulses(points, axes),
    }
}

fn step_left(points: &[Point], axes: Axes<'_>) -> Vec<PixelPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len() * 2);
    let mut last_value = axes.value().to_pixel(first.value);
    for point in points {
        let key = axes.key().to_pixel(point.key);
        out.push(axes.pixel(key, last_value));
        last_value = axes.value().to_pixel(point.value);
        out.push(axes.pixel(key, last_value));
    }
    out
}

fn step_right(points: &[Point], axes: Axes<'_>) -> Vec<PixelPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len() * 2);
    let mut last_key = axes.key().to_pixel(first.key);
    for point in points {
        let value = axes.value().to_pixel(point.value);
        out.push(axes.pixel(last_key, value));
        last_key = axes.key().to_pixel(point.key);
        out.push(axes.pixel(last_key, value));
    }
    out
}

fn step_center(points: &[Point], axes: Axes<'_>) -> Vec<PixelPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len() * 2);
    let mut last_key = axes.key().to_pixel(first.key);
    let mut last_value = axes.value().to_pixel(first.value);
    out.push(axes.pixel(last_key, last_value));
    for point in &points[1..] {
        let key = axes.key().to_pixel(point.key);
        let riser = last_key + (key - last_key) * 0.5;
        out.push(axes.pixel(riser, last_value));
        last_value = axes.value().to_pixel(point.value);
        last_key = key;
        out.push(axes.pixel(riser, last_value));
    }
    out.push(axes.pixel(last_key, last_value));
    out
}

fn impulses(points: &[Point], axes: Axes<'_>) -> Vec<PixelPoint> {
    let zero = axes.value().to_pixel(0.0);
    let mut out = Vec::with_capacity(points.len() * 2);
    for point in points {
        if point.value.is_finite() {
            let key = axes.key().to_pixel(point.key);
            out.push(axes.pixel(key, zero));
            out.push(axes.pixel(key, axes.value().to_pixel(point.value)));
        } else {
            out.push(PixelPoint::new(0.0, 0.0));
            out.push(PixelPoint::new(0.0, 0.0));
        }
    }
    out
}

/// Value pixel that fills close against.
///
/// Linear axes fill towards zero. Log axes have no zero, so they fill
/// towards the lower edge of the visible range.
pub fn fill_base_pixel(value_axis: &dyn AxisTransform) -> f64 {
    match value_axis.scale() {
        AxisScale::Linear => value_axis.to_pixel(0.0),
        AxisScale::Log10 => value_axis.to_pixel(value_axis.visible_range().min),
    }
}

/// Closed fill polygons for a pixel polyline.
///
/// The polyline is split at non-finite points so a fill never bridges a gap
/// in the data. Runs shorter than two points have no area and are skipped.
pub fn fill_polygons(lines: &[PixelPoint], axes: Axes<'_>) -> Vec<Vec<PixelPoint>> {
    let base = fill_base_pixel(axes.value());
    // A missing value cannot be closed against the base line either.
    let gaps: Vec<PixelPoint> = lines
        .iter()
        .map(|point| if point.is_finite() { *point } else { PixelPoint::nan() })
        .collect();
    non_finite_segments(&gaps, axes.key().orientation())
        .into_iter()
        .filter(|range| range.len() >= 2)
        .map(|range| {
            let run = &lines[range.as_range()];
            let (first_key, _) = axes.split(run[0]);
            let (last_key, _) = axes.split(run[run.len() - 1]);
            let mut polygon = Vec::with_capacity(run.len() + 2);
            polygon.push(axes.pixel(first_key, base));
            polygon.extend_from_slice(run);
            polygon.push(axes.pixel(last_key, base));
            polygon
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, Orientation};
    use crate::view::Range;

    fn axes_pair() -> (Axis, Axis) {
        (
            Axis::horizontal(Range::new(0.0, 10.0), 0.0, 100.0).unwrap(),
            Axis::vertical(Range::new(0.0, 10.0), 0.0, 100.0).unwrap(),
        )
    }

    fn sample() -> [Point; 3] {
        [
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 5.0),
        ]
    }

    fn px(x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(x, y)
    }

    #[test]
    fn line_maps_one_to_one() {
        let (key, value) = axes_pair();
        let axes = Axes::new(&key, &value).unwrap();
        let out = lines_from_data(&sample(), axes, LineStyle::Line);
        assert_eq!(out, vec![px(0.0, 100.0), px(50.0, 0.0), px(100.0, 50.0)]);
        assert!(lines_from_data(&sample(), axes, LineStyle::None).is_empty());
    }

    #[test]
    fn step_left_holds_previous_value() {
        let (key, value) = axes_pair();
        let axes = Axes::new(&key, &value).unwrap();
        let out = lines_from_data(&sample(), axes, LineStyle::StepLeft);
        assert_eq!(
            out,
            vec![
                px(0.0, 100.0),
                px(0.0, 100.0),
                px(50.0, 100.0),
                px(50.0, 0.0),
                px(100.0, 0.0),
                px(100.0, 50.0),
            ]
        );
    }

    #[test]
    fn step_right_holds_previous_key() {
        let (key, value) = axes_pair();
        let axes = Axes::new(&key, &value).unwrap();
        let out = lines_from_data(&sample(), axes, LineStyle::StepRight);
        assert_eq!(
            out,
            vec![
                px(0.0, 100.0),
                px(0.0, 100.0),
                px(0.0, 0.0),
                px(50.0, 0.0),
                px(50.0, 50.0),
                px(100.0, 50.0),
            ]
        );
    }

    #[test]
    fn step_center_puts_risers_midway() {
        let (key, value) = axes_pair();
        let axes = Axes::new(&key, &value).unwrap();
        let out = lines_from_data(&sample(), axes, LineStyle::StepCenter);
        assert_eq!(
            out,
            vec![
                px(0.0, 100.0),
                px(25.0, 100.0),
                px(25.0, 0.0),
                px(75.0, 0.0),
                px(75.0, 50.0),
                px(100.0, 50.0),
            ]
        );
        let single = lines_from_data(&sample()[..1], axes, LineStyle::StepCenter);
        assert_eq!(single, vec![px(0.0, 100.0), px(0.0, 100.0)]);
    }

    #[test]
    fn impulses_keep_index_alignment() {
        let (key, value) = axes_pair();
        let axes = Axes::new(&key, &value).unwrap();
        let points = [Point::new(5.0, 10.0), Point::new(10.0, f64::NAN)];
        let out = lines_from_data(&points, axes, LineStyle::Impulse);
        assert_eq!(
            out,
            vec![px(50.0, 100.0), px(50.0, 0.0), px(0.0, 0.0), px(0.0, 0.0)]
        );
    }

    #[test]
    fn steps_follow_a_vertical_key_axis() {
        let key = Axis::vertical(Range::new(0.0, 10.0), 0.0, 100.0).unwrap();
        let value = Axis::horizontal(Range::new(0.0, 10.0), 0.0, 100.0).unwrap();
        let axes = Axes::new(&key, &value).unwrap();
        let out = lines_from_data(&sample()[..2], axes, LineStyle::StepLeft);
        assert_eq!(
            out,
            vec![px(0.0, 100.0), px(0.0, 100.0), px(0.0, 50.0), px(100.0, 50.0)]
        );
    }

    #[test]
    fn fill_splits_at_gaps() {
        let (key, value) = axes_pair();
        let axes = Axes::new(&key, &value).unwrap();
        let points = [
            Point::new(0.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(7.0, f64::NAN),
            Point::new(8.0, 5.0),
            Point::new(10.0, 5.0),
        ];
        let lines = lines_from_data(&points, axes, LineStyle::Line);

        let polygons = fill_polygons(&lines, axes);

        assert_eq!(
            polygons,
            vec![
                vec![px(0.0, 100.0), px(0.0, 50.0), px(50.0, 0.0), px(50.0, 100.0)],
                vec![px(80.0, 100.0), px(80.0, 50.0), px(100.0, 50.0), px(100.0, 100.0)],
            ]
        );
    }

    #[test]
    fn log_axis_fills_towards_lower_edge() {
        let value = Axis::new(
            AxisScale::Log10,
            Orientation::Vertical,
            Range::new(1.0, 100.0),
            0.0,
            100.0,
        )
        .unwrap();
        assert!((fill_base_pixel(&value) - 100.0).abs() < 1e-9);
    }
}
