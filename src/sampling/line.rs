//! Envelope-preserving sampling for line rendering.

use crate::axis::AxisTransform;
use crate::geom::Point;

use super::{KeyColumns, SamplingWindow, should_sample};

/// Reduce a key-ascending run for line rendering.
///
/// A key axis without visible extent yields nothing. Below the activation
/// threshold, or with `adaptive` off, the run is copied unchanged. Otherwise
/// every pixel column holding several points collapses into at most four
/// synthetic points: an anchor at the first real value when the previous
/// column is far away, the column minimum, the column maximum, and a closing
/// point at the value that starts the next column when that column is far
/// away. Columns with a single point keep it verbatim.
pub fn sample_line(points: &[Point], key_axis: &dyn AxisTransform, adaptive: bool) -> Vec<Point> {
    if key_axis.shows_empty_range() {
        return Vec::new();
    }
    if !should_sample(key_axis, points, adaptive) {
        return points.to_vec();
    }

    let mut columns = KeyColumns::new(key_axis, points[0].key);
    let mut out = Vec::new();
    let mut window = columns.open(0, &points[0]);
    let mut previous_end: Option<f64> = None;

    for (index, point) in points.iter().enumerate().skip(1) {
        if window.contains(point.key) {
            window.include(index, point.value);
            continue;
        }
        flush(&window, points, previous_end, Some(point), &mut out);
        previous_end = Some(points[window.last].key);
        window = columns.open(index, point);
    }
    flush(&window, points, previous_end, None, &mut out);

    tracing::trace!(input = points.len(), output = out.len(), "sampled line run");
    out
}

fn flush(
    window: &SamplingWindow,
    points: &[Point],
    previous_end: Option<f64>,
    next: Option<&Point>,
    out: &mut Vec<Point>,
) {
    if window.count < 2 {
        out.push(points[window.first]);
        return;
    }
    let epsilon = window.epsilon;
    let far_from_previous = previous_end.is_none_or(|end| end < window.start_key - epsilon);
    if far_from_previous {
        out.push(Point::new(window.key_at(0.2), points[window.first].value));
    }
    out.push(Point::new(window.key_at(0.25), window.min_value));
    out.push(Point::new(window.key_at(0.75), window.max_value));
    if let Some(next) = next.filter(|next| next.key > window.key_at(2.0)) {
        out.push(Point::new(window.key_at(0.8), next.value));
    }
}
