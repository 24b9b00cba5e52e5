//! Error types for axis validation and point storage.

use thiserror::Error;

use crate::axis::{AxisScale, Orientation};

/// Errors that prevent a reduction pass from producing geometry.
///
/// Degenerate but valid input (an empty index range or a zero-width visible
/// range) is not an error; it yields an empty result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionError {
    /// The visible range cannot be mapped with the axis scale.
    #[error("visible range {min}..{max} is not usable with a {scale:?} axis")]
    InvalidRange {
        /// Scale of the rejected axis.
        scale: AxisScale,
        /// Lower bound of the rejected range.
        min: f64,
        /// Upper bound of the rejected range.
        max: f64,
    },

    /// The axis occupies no pixels.
    #[error("axis pixel extent {0} is not positive")]
    EmptyPixelExtent(f64),

    /// Key and value axes must be orthogonal.
    #[error("key and value axes are both {0:?}")]
    ParallelAxes(Orientation),
}

/// Errors that can occur when inserting into a point store.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StoreError {
    /// Sort keys must be finite for binary search to stay valid.
    #[error("sort key {0} is not finite")]
    NonFiniteSortKey(f64),
}
