//! liveplot_reduce turns large point series into the few pixel-space points a
//! plot actually needs to draw.
//!
//! Key-ordered series are sampled per pixel column so line envelopes and
//! scatter density survive at any zoom level. Parametric curves are clipped
//! region by region so runs far outside the view collapse onto the plot
//! border. Every reduction borrows its store for one pass and returns fresh
//! pixel geometry.

#![forbid(unsafe_code)]

pub mod axis;
pub mod clip;
pub mod config;
pub mod datasource;
pub mod error;
pub mod geom;
pub mod render;
pub mod sampling;
pub mod selection;
pub mod series;
pub mod transform;
pub mod view;

pub use axis::{Axis, AxisScale, AxisTransform, Orientation};
pub use clip::{ClipRect, Region, RegionClipper};
pub use config::{CurveConfig, GraphConfig};
pub use datasource::{PointStore, SortKey};
pub use error::{ReductionError, StoreError};
pub use geom::{CurvePoint, PixelPoint, PixelRect, Point};
pub use render::{LineStyle, fill_polygons, lines_from_data};
pub use sampling::{sample_line, sample_scatter};
pub use selection::{DataSelection, SelectionType, Segments, data_segments};
pub use series::{CurveSeries, GraphSeries, LineRun, SeriesId};
pub use transform::Axes;
pub use view::{IndexRange, Range};
