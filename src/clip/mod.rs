//! Region-based clipping for parametric curves.
//!
//! Curve points are classified against the visible rectangle into a 3x3
//! grid of [`Region`]s. Only points inside the rectangle are kept verbatim;
//! runs outside it are replaced by boundary points that keep the drawn path
//! off the visible area unless the real curve crosses it.

mod clipper;

pub use clipper::RegionClipper;

use crate::axis::AxisTransform;
use crate::geom::{PixelRect, Point};
use crate::transform::Axes;
use crate::view::Range;

const KEY_BELOW: u8 = 1;
const KEY_ABOVE: u8 = 2;
const VALUE_ABOVE: u8 = 4;
const VALUE_BELOW: u8 = 8;

/// Pixel margin added around the visible rectangle for a stroke width.
///
/// Thick strokes would otherwise show their clipped ends at the plot edge.
pub fn stroke_margin(pen_width: f64) -> f64 {
    (0.75 * pen_width).max(1.0)
}

/// Position of a point relative to the visible rectangle.
///
/// Names are in data terms: `Left` lies below the key minimum, `Top` lies
/// above the value maximum, whatever the screen orientation of the axes.
/// Regions are numbered column by column, `1 + 3 * column + row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Key below minimum, value above maximum.
    TopLeft = 1,
    /// Key below minimum.
    Left = 2,
    /// Key below minimum, value below minimum.
    BottomLeft = 3,
    /// Value above maximum.
    Top = 4,
    /// Inside the rectangle.
    Inside = 5,
    /// Value below minimum.
    Bottom = 6,
    /// Key above maximum, value above maximum.
    TopRight = 7,
    /// Key above maximum.
    Right = 8,
    /// Key above maximum, value below minimum.
    BottomRight = 9,
}

impl Region {
    /// Region number in `1..=9`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Region from its column (`0` key below, `2` key above) and row (`0`
    /// value above, `2` value below).
    pub fn from_grid(column: u8, row: u8) -> Self {
        match (column.min(2), row.min(2)) {
            (0, 0) => Self::TopLeft,
            (0, 1) => Self::Left,
            (0, _) => Self::BottomLeft,
            (1, 0) => Self::Top,
            (1, 1) => Self::Inside,
            (1, _) => Self::Bottom,
            (_, 0) => Self::TopRight,
            (_, 1) => Self::Right,
            (_, _) => Self::BottomRight,
        }
    }

    fn outcode(self) -> u8 {
        match self {
            Self::TopLeft => KEY_BELOW | VALUE_ABOVE,
            Self::Left => KEY_BELOW,
            Self::BottomLeft => KEY_BELOW | VALUE_BELOW,
            Self::Top => VALUE_ABOVE,
            Self::Inside => 0,
            Self::Bottom => VALUE_BELOW,
            Self::TopRight => KEY_ABOVE | VALUE_ABOVE,
            Self::Right => KEY_ABOVE,
            Self::BottomRight => KEY_ABOVE | VALUE_BELOW,
        }
    }

    /// Whether this is one of the four diagonal regions.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::BottomLeft | Self::TopRight | Self::BottomRight
        )
    }

    /// Position on the ring of outside regions, clockwise from `TopLeft`.
    ///
    /// Corners sit at even positions.
    pub(crate) fn ring_position(self) -> Option<u8> {
        match self {
            Self::TopLeft => Some(0),
            Self::Top => Some(1),
            Self::TopRight => Some(2),
            Self::Right => Some(3),
            Self::BottomRight => Some(4),
            Self::Bottom => Some(5),
            Self::BottomLeft => Some(6),
            Self::Left => Some(7),
            Self::Inside => None,
        }
    }

    /// Whether a straight segment between the two regions can cross the
    /// inside at all.
    ///
    /// Two outside regions sharing a side of the rectangle can never see a
    /// crossing segment. A `true` answer still needs an exact test.
    pub fn may_traverse(self, other: Region) -> bool {
        self != Self::Inside && other != Self::Inside && self.outcode() & other.outcode() == 0
    }
}

/// Visible rectangle in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    /// Key bounds.
    pub key: Range,
    /// Value bounds.
    pub value: Range,
}

impl ClipRect {
    /// Create a rectangle from key and value bounds.
    pub fn new(key: Range, value: Range) -> Self {
        Self { key, value }
    }

    /// Visible ranges of `axes`, widened by the stroke margin of `pen_width`.
    pub fn from_axes(axes: Axes<'_>, pen_width: f64) -> Self {
        Self::with_pixel_margin(axes, stroke_margin(pen_width))
    }

    /// Visible ranges of `axes`, widened by `margin` pixels on every side.
    pub fn with_pixel_margin(axes: Axes<'_>, margin: f64) -> Self {
        Self {
            key: widened(axes.key(), margin),
            value: widened(axes.value(), margin),
        }
    }

    /// Whether a point lies inside or on the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        self.key.contains(point.key) && self.value.contains(point.value)
    }

    /// Classify a data point.
    ///
    /// Non-finite coordinates compare false on every side and land inside,
    /// so they reach the output and break the drawn line there.
    pub fn region(&self, point: Point) -> Region {
        let column = if point.key < self.key.min {
            0
        } else if point.key > self.key.max {
            2
        } else {
            1
        };
        let row = if point.value > self.value.max {
            0
        } else if point.value < self.value.min {
            2
        } else {
            1
        };
        Region::from_grid(column, row)
    }

    /// Rectangle in pixel space.
    pub fn pixel_rect(&self, axes: Axes<'_>) -> PixelRect {
        PixelRect::new(
            axes.coords_to_pixel(self.key.min, self.value.min),
            axes.coords_to_pixel(self.key.max, self.value.max),
        )
    }
}

fn widened(axis: &dyn AxisTransform, margin: f64) -> Range {
    let visible = axis.visible_range();
    let outward = margin * axis.pixel_orientation();
    Range::new(
        axis.to_coord(axis.to_pixel(visible.min) - outward),
        axis.to_coord(axis.to_pixel(visible.max) + outward),
    )
}
