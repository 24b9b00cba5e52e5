//! Geometric primitives used by the reduction pipeline.
//!
//! Data-space types carry key/value coordinates, pixel-space types carry
//! device coordinates produced by an [`AxisTransform`](crate::axis::AxisTransform).

/// A point of a key-ordered series in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Key (sort) coordinate.
    pub key: f64,
    /// Value coordinate.
    pub value: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(key: f64, value: f64) -> Self {
        Self { key, value }
    }
}

/// A point of a parametric curve.
///
/// Curves are ordered by `t`, which need not follow `key`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Curve parameter used for ordering.
    pub t: f64,
    /// Key coordinate.
    pub key: f64,
    /// Value coordinate.
    pub value: f64,
}

impl CurvePoint {
    /// Create a new curve point.
    pub fn new(t: f64, key: f64, value: f64) -> Self {
        Self { t, key, value }
    }

    /// Drop the curve parameter.
    pub fn point(&self) -> Point {
        Point::new(self.key, self.value)
    }
}

impl From<CurvePoint> for Point {
    fn from(point: CurvePoint) -> Self {
        point.point()
    }
}

/// A point in pixel space.
///
/// Non-finite coordinates mark gaps; see
/// [`non_finite_segments`](crate::selection::non_finite_segments).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl PixelPoint {
    /// Create a new pixel point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point with no geometry.
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Top-left corner.
    pub min: PixelPoint,
    /// Bottom-right corner.
    pub max: PixelPoint,
}

impl PixelRect {
    /// Create a rectangle from two corners, normalizing their order.
    pub fn new(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            min: PixelPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: PixelPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies strictly inside the rectangle.
    pub fn contains_strict(&self, point: PixelPoint) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}
