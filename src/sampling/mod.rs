//! Adaptive sampling of key-ordered runs.
//!
//! Both samplers walk the run once and group points whose keys fall into the
//! same pixel column of the key axis. A closed group is replaced by a few
//! representative points, so output size follows the pixel width of the plot
//! rather than the number of stored points.

mod line;
mod scatter;

pub use line::sample_line;
pub use scatter::sample_scatter;

use crate::axis::{AxisScale, AxisTransform};
use crate::geom::Point;
use crate::view::Range;

/// Minimum number of points at which sampling pays off.
///
/// Sampling starts once there are at least two points per key pixel on
/// average.
pub fn activation_threshold(key_axis: &dyn AxisTransform, first_key: f64, last_key: f64) -> f64 {
    let span = (key_axis.to_pixel(first_key) - key_axis.to_pixel(last_key)).abs();
    2.0 * span + 2.0
}

pub(crate) fn should_sample(
    key_axis: &dyn AxisTransform,
    points: &[Point],
    adaptive: bool,
) -> bool {
    if !adaptive || points.len() < 2 {
        return false;
    }
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return false;
    };
    let threshold = activation_threshold(key_axis, first.key, last.key);
    threshold.is_finite() && points.len() as f64 >= threshold
}

/// Pixel columns along the key axis.
///
/// Column starts are rounded down in pixel space, or up when pixels run
/// against the key direction, so every column starts at its smallest key.
pub(crate) struct KeyColumns<'a> {
    axis: &'a dyn AxisTransform,
    direction: f64,
    round_offset: f64,
    variable_epsilon: bool,
    epsilon: f64,
}

impl<'a> KeyColumns<'a> {
    pub(crate) fn new(axis: &'a dyn AxisTransform, first_key: f64) -> Self {
        let direction = axis.pixel_orientation();
        let mut columns = Self {
            axis,
            direction,
            round_offset: if direction < 0.0 { 1.0 } else { 0.0 },
            variable_epsilon: axis.scale() == AxisScale::Log10,
            epsilon: 0.0,
        };
        let start = columns.interval_start(first_key);
        columns.epsilon = columns.width_at(start);
        columns
    }

    fn interval_start(&self, key: f64) -> f64 {
        let pixel = (self.axis.to_pixel(key) + self.round_offset).floor();
        self.axis.to_coord(pixel)
    }

    /// Key-space width of one pixel starting at `key`.
    fn width_at(&self, key: f64) -> f64 {
        let next = self.axis.to_coord(self.axis.to_pixel(key) + self.direction);
        (key - next).abs()
    }

    /// Open the window for the column holding `point`.
    pub(crate) fn open(&mut self, index: usize, point: &Point) -> SamplingWindow {
        let start_key = self.interval_start(point.key);
        if self.variable_epsilon {
            self.epsilon = self.width_at(start_key);
        }
        SamplingWindow {
            start_key,
            epsilon: self.epsilon,
            min_value: point.value,
            max_value: point.value,
            min_index: index,
            max_index: index,
            first: index,
            last: index,
            count: 1,
        }
    }
}

/// Points mapping to one pixel-wide key interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SamplingWindow {
    pub(crate) start_key: f64,
    pub(crate) epsilon: f64,
    pub(crate) min_value: f64,
    pub(crate) max_value: f64,
    pub(crate) min_index: usize,
    pub(crate) max_index: usize,
    pub(crate) first: usize,
    pub(crate) last: usize,
    pub(crate) count: usize,
}

impl SamplingWindow {
    pub(crate) fn contains(&self, key: f64) -> bool {
        key < self.start_key + self.epsilon
    }

    /// Add a point and track it for the envelope.
    pub(crate) fn include(&mut self, index: usize, value: f64) {
        self.count += 1;
        self.last = index;
        self.track(index, value);
    }

    /// Add a point, tracking it for the envelope only if it is visible.
    pub(crate) fn include_within(&mut self, index: usize, value: f64, visible: Range) {
        self.count += 1;
        self.last = index;
        if visible.contains_strict(value) {
            self.track(index, value);
        }
    }

    fn track(&mut self, index: usize, value: f64) {
        if value < self.min_value {
            self.min_value = value;
            self.min_index = index;
        }
        if value > self.max_value {
            self.max_value = value;
            self.max_index = index;
        }
    }

    /// Key at a fraction of the window width.
    pub(crate) fn key_at(&self, fraction: f64) -> f64 {
        self.start_key + self.epsilon * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, Orientation};

    #[test]
    fn columns_on_linear_axis_are_one_pixel_wide() {
        let axis = Axis::horizontal(Range::new(0.0, 100.0), 0.0, 50.0).unwrap();
        let mut columns = KeyColumns::new(&axis, 3.1);
        let window = columns.open(0, &Point::new(3.1, 1.0));
        assert!((window.start_key - 2.0).abs() < 1e-9);
        assert!((window.epsilon - 2.0).abs() < 1e-9);
        assert!(window.contains(3.9));
        assert!(!window.contains(4.01));
    }

    #[test]
    fn columns_round_up_when_pixels_descend() {
        let axis = Axis::horizontal(Range::new(0.0, 100.0), 0.0, 50.0)
            .unwrap()
            .with_reversed(true);
        let mut columns = KeyColumns::new(&axis, 3.1);
        let window = columns.open(0, &Point::new(3.1, 1.0));
        assert!((window.start_key - 2.0).abs() < 1e-9);
        assert!(window.contains(3.9));
    }

    #[test]
    fn log_columns_widen_with_key() {
        let axis = Axis::new(
            AxisScale::Log10,
            Orientation::Horizontal,
            Range::new(1.0, 1000.0),
            0.0,
            300.0,
        )
        .unwrap();
        let mut columns = KeyColumns::new(&axis, 1.0);
        let narrow = columns.open(0, &Point::new(1.5, 0.0));
        let wide = columns.open(1, &Point::new(500.0, 0.0));
        assert!(wide.epsilon > narrow.epsilon * 100.0);
    }

    #[test]
    fn window_tracks_extrema() {
        let axis = Axis::horizontal(Range::new(0.0, 10.0), 0.0, 10.0).unwrap();
        let mut columns = KeyColumns::new(&axis, 0.0);
        let mut window = columns.open(4, &Point::new(0.0, 1.0));
        window.include(5, -2.0);
        window.include(6, 3.0);
        assert_eq!((window.min_value, window.min_index), (-2.0, 5));
        assert_eq!((window.max_value, window.max_index), (3.0, 6));
        assert_eq!(window.count, 3);
        assert_eq!(window.last, 6);

        window.include_within(7, 100.0, Range::new(-10.0, 10.0));
        assert_eq!(window.max_value, 3.0);
        assert_eq!(window.count, 4);
    }

    #[test]
    fn threshold_scales_with_pixel_span() {
        let axis = Axis::horizontal(Range::new(0.0, 10.0), 0.0, 100.0).unwrap();
        assert_eq!(activation_threshold(&axis, 0.0, 10.0), 202.0);
        assert_eq!(activation_threshold(&axis, 10.0, 0.0), 202.0);
    }
}
