//! Coordinate transforms between data and pixel space.

use crate::axis::{AxisTransform, Orientation};
use crate::error::ReductionError;
use crate::geom::{PixelPoint, Point};

/// Key and value axes of a series.
///
/// The key axis may be vertical, in which case keys map to `y` pixels.
#[derive(Clone, Copy)]
pub struct Axes<'a> {
    key: &'a dyn AxisTransform,
    value: &'a dyn AxisTransform,
}

impl<'a> Axes<'a> {
    /// Pair two orthogonal axes.
    pub fn new(
        key: &'a dyn AxisTransform,
        value: &'a dyn AxisTransform,
    ) -> Result<Self, ReductionError> {
        let axes = Self { key, value };
        axes.validate()?;
        Ok(axes)
    }

    /// Check that the axes are orthogonal and both ranges can be mapped.
    pub fn validate(&self) -> Result<(), ReductionError> {
        if self.key.orientation() == self.value.orientation() {
            return Err(ReductionError::ParallelAxes(self.key.orientation()));
        }
        self.key.validate()?;
        self.value.validate()
    }

    /// Access the key axis.
    pub fn key(&self) -> &'a dyn AxisTransform {
        self.key
    }

    /// Access the value axis.
    pub fn value(&self) -> &'a dyn AxisTransform {
        self.value
    }

    /// Place already-mapped key and value pixels on screen.
    pub fn pixel(&self, key_px: f64, value_px: f64) -> PixelPoint {
        match self.key.orientation() {
            Orientation::Horizontal => PixelPoint::new(key_px, value_px),
            Orientation::Vertical => PixelPoint::new(value_px, key_px),
        }
    }

    /// Map a data point into pixel space.
    pub fn data_to_pixel(&self, point: Point) -> PixelPoint {
        self.coords_to_pixel(point.key, point.value)
    }

    /// Map raw key/value coordinates into pixel space.
    pub fn coords_to_pixel(&self, key: f64, value: f64) -> PixelPoint {
        self.pixel(self.key.to_pixel(key), self.value.to_pixel(value))
    }

    /// Split a screen point into its key and value pixels.
    pub fn split(&self, pixel: PixelPoint) -> (f64, f64) {
        match self.key.orientation() {
            Orientation::Horizontal => (pixel.x, pixel.y),
            Orientation::Vertical => (pixel.y, pixel.x),
        }
    }

    /// Map a pixel point back into data space.
    pub fn pixel_to_data(&self, pixel: PixelPoint) -> Point {
        let (key_px, value_px) = self.split(pixel);
        Point::new(self.key.to_coord(key_px), self.value.to_coord(value_px))
    }

    /// Whether emitted key pixels run against data order.
    pub(crate) fn key_pixels_descend(&self) -> bool {
        self.key.pixel_orientation() < 0.0
    }
}

impl std::fmt::Debug for Axes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Axes")
            .field("key", &self.key.orientation())
            .field("value", &self.value.orientation())
            .finish()
    }
}
