//! Axis scaling and the coordinate transform seam.
//!
//! Reductions only talk to axes through [`AxisTransform`]; [`Axis`] is the
//! stock linear/log implementation.

use crate::error::ReductionError;
use crate::view::Range;

/// Normalized position used for coordinates outside a log axis' domain.
const BELOW_LOG_DOMAIN: f64 = -1.0;

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisScale {
    /// Linear scaling.
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
}

impl AxisScale {
    /// Map a value into axis space.
    pub fn map_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => {
                if value <= 0.0 {
                    None
                } else {
                    Some(value.log10())
                }
            }
        }
    }

    /// Invert a value from axis space back into data space.
    pub fn invert_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => Some(10_f64.powf(value)),
        }
    }

    /// Check whether a data range is valid for this scale.
    pub fn is_range_valid(self, range: Range) -> bool {
        if !range.is_finite() {
            return false;
        }
        match self {
            Self::Linear => true,
            Self::Log10 => range.min > 0.0 && range.max > 0.0,
        }
    }
}

/// Screen direction an axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Pixels grow left to right.
    Horizontal,
    /// Pixels grow top to bottom, so values grow upwards.
    Vertical,
}

/// Conversion between one data dimension and pixels.
pub trait AxisTransform {
    /// Map a data coordinate to a pixel coordinate. NaN maps to NaN.
    fn to_pixel(&self, coord: f64) -> f64;

    /// Map a pixel coordinate back to a data coordinate.
    fn to_coord(&self, pixel: f64) -> f64;

    /// Screen direction of the axis.
    fn orientation(&self) -> Orientation;

    /// Whether the visible range is drawn in reverse.
    fn is_reversed(&self) -> bool;

    /// Currently visible data range.
    fn visible_range(&self) -> Range;

    /// Scale used for the mapping.
    fn scale(&self) -> AxisScale;

    /// `1.0` when pixels grow with the coordinate, `-1.0` otherwise.
    fn pixel_orientation(&self) -> f64 {
        if self.is_reversed() == (self.orientation() == Orientation::Horizontal) {
            -1.0
        } else {
            1.0
        }
    }

    /// Whether the visible range has no extent, so nothing can be drawn.
    fn shows_empty_range(&self) -> bool {
        self.visible_range().span() <= 0.0
    }

    /// Check that the visible range can be mapped.
    fn validate(&self) -> Result<(), ReductionError> {
        let range = self.visible_range();
        if self.scale().is_range_valid(range) {
            Ok(())
        } else {
            Err(ReductionError::InvalidRange {
                scale: self.scale(),
                min: range.min,
                max: range.max,
            })
        }
    }
}

/// Linear or logarithmic axis spanning a pixel interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    scale: AxisScale,
    orientation: Orientation,
    range: Range,
    mapped: Range,
    reversed: bool,
    pixel_start: f64,
    pixel_len: f64,
}

impl Axis {
    /// Create an axis covering `pixel_len` pixels from `pixel_start`.
    ///
    /// `pixel_start` is the left edge of a horizontal axis and the top edge of
    /// a vertical one.
    pub fn new(
        scale: AxisScale,
        orientation: Orientation,
        range: Range,
        pixel_start: f64,
        pixel_len: f64,
    ) -> Result<Self, ReductionError> {
        if !(pixel_len.is_finite() && pixel_len > 0.0) || !pixel_start.is_finite() {
            return Err(ReductionError::EmptyPixelExtent(pixel_len));
        }
        let invalid = || ReductionError::InvalidRange {
            scale,
            min: range.min,
            max: range.max,
        };
        if !scale.is_range_valid(range) {
            return Err(invalid());
        }
        let min = scale.map_value(range.min).ok_or_else(invalid)?;
        let max = scale.map_value(range.max).ok_or_else(invalid)?;
        Ok(Self {
            scale,
            orientation,
            range,
            mapped: Range::new(min, max),
            reversed: false,
            pixel_start,
            pixel_len,
        })
    }

    /// Linear horizontal axis.
    pub fn horizontal(range: Range, left: f64, width: f64) -> Result<Self, ReductionError> {
        Self::new(AxisScale::Linear, Orientation::Horizontal, range, left, width)
    }

    /// Linear vertical axis.
    pub fn vertical(range: Range, top: f64, height: f64) -> Result<Self, ReductionError> {
        Self::new(AxisScale::Linear, Orientation::Vertical, range, top, height)
    }

    /// Draw the visible range in reverse.
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Pixel length of the axis.
    pub fn pixel_len(&self) -> f64 {
        self.pixel_len
    }

    fn normalized(&self, coord: f64) -> f64 {
        if coord.is_nan() {
            return f64::NAN;
        }
        let mapped = match self.scale {
            AxisScale::Linear => coord,
            AxisScale::Log10 => {
                if coord <= 0.0 {
                    return BELOW_LOG_DOMAIN;
                }
                coord.log10()
            }
        };
        let span = self.mapped.span();
        if span <= 0.0 {
            return 0.5;
        }
        (mapped - self.mapped.min) / span
    }

    fn grows_with_pixels(&self) -> bool {
        self.pixel_orientation() > 0.0
    }
}

impl AxisTransform for Axis {
    fn to_pixel(&self, coord: f64) -> f64 {
        let t = self.normalized(coord);
        if self.grows_with_pixels() {
            self.pixel_start + t * self.pixel_len
        } else {
            self.pixel_start + (1.0 - t) * self.pixel_len
        }
    }

    fn to_coord(&self, pixel: f64) -> f64 {
        let offset = (pixel - self.pixel_start) / self.pixel_len;
        let t = if self.grows_with_pixels() {
            offset
        } else {
            1.0 - offset
        };
        let mapped = self.mapped.min + t * self.mapped.span();
        match self.scale {
            AxisScale::Linear => mapped,
            AxisScale::Log10 => 10_f64.powf(mapped),
        }
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn visible_range(&self) -> Range {
        self.range
    }

    fn scale(&self) -> AxisScale {
        self.scale
    }
}
