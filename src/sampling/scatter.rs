//! Density-limited sampling for scatter markers.

use crate::axis::AxisTransform;
use crate::geom::Point;
use crate::transform::Axes;
use crate::view::Range;

use super::{KeyColumns, SamplingWindow, should_sample};

/// Reduce a key-ascending run for marker rendering.
///
/// `first_index` is the store index of `points[0]`; with a non-zero
/// `scatter_skip` only every `scatter_skip + 1`-th store index is considered,
/// so the rendered subset does not shift while panning.
///
/// Nothing is returned when either axis shows an empty range. Below the
/// activation threshold the skipped run is returned unchanged.
/// Otherwise each pixel column keeps roughly one marker per four value pixels
/// plus its extreme values. Points outside the visible value range are never
/// emitted and never become a column extreme.
pub fn sample_scatter(
    points: &[Point],
    first_index: usize,
    axes: Axes<'_>,
    adaptive: bool,
    scatter_skip: usize,
) -> Vec<Point> {
    if axes.key().shows_empty_range() || axes.value().shows_empty_range() {
        return Vec::new();
    }
    let candidates = skip_aligned(points, first_index, scatter_skip);
    let key_axis = axes.key();
    if !should_sample(key_axis, &candidates, adaptive) {
        return candidates;
    }

    let visible = axes.value().visible_range();
    let mut columns = KeyColumns::new(key_axis, candidates[0].key);
    let mut out = Vec::new();
    let mut window = columns.open(0, &candidates[0]);

    for (index, point) in candidates.iter().enumerate().skip(1) {
        if window.contains(point.key) {
            window.include_within(index, point.value, visible);
            continue;
        }
        flush(&window, &candidates, axes.value(), visible, &mut out);
        window = columns.open(index, point);
    }
    flush(&window, &candidates, axes.value(), visible, &mut out);

    tracing::trace!(
        input = points.len(),
        candidates = candidates.len(),
        output = out.len(),
        "sampled scatter run"
    );
    out
}

fn skip_aligned(points: &[Point], first_index: usize, scatter_skip: usize) -> Vec<Point> {
    if scatter_skip == 0 {
        return points.to_vec();
    }
    let modulo = scatter_skip + 1;
    let offset = (modulo - first_index % modulo) % modulo;
    points.iter().skip(offset).step_by(modulo).copied().collect()
}

fn flush(
    window: &SamplingWindow,
    candidates: &[Point],
    value_axis: &dyn AxisTransform,
    visible: Range,
    out: &mut Vec<Point>,
) {
    let run = &candidates[window.first..=window.last];
    if window.count < 2 {
        if visible.contains_strict(run[0].value) {
            out.push(run[0]);
        }
        return;
    }

    let value_span =
        (value_axis.to_pixel(window.min_value) - value_axis.to_pixel(window.max_value)).abs();
    let modulo = density_modulo(window.count, value_span);
    for (offset, point) in run.iter().enumerate() {
        let index = window.first + offset;
        let keep = offset % modulo == 0 || index == window.min_index || index == window.max_index;
        if keep && visible.contains_strict(point.value) {
            out.push(*point);
        }
    }
}

/// Stride that leaves about one marker per four value pixels.
///
/// A column without value extent keeps only its first point and extremes.
fn density_modulo(count: usize, value_pixel_span: f64) -> usize {
    let markers = value_pixel_span / 4.0;
    if !(markers > 0.0) {
        return count.max(1);
    }
    ((count as f64 / markers).round() as usize).max(1)
}
