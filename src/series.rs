//! Series storage and the per-redraw reduction entry points.
//!
//! A series owns its [`PointStore`] across redraws. Every reduction borrows
//! the store for one call, looks up the visible index range, and returns
//! freshly allocated pixel geometry.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::axis::AxisTransform;
use crate::clip::{ClipRect, RegionClipper};
use crate::config::{CurveConfig, GraphConfig};
use crate::datasource::PointStore;
use crate::error::{ReductionError, StoreError};
use crate::geom::{CurvePoint, PixelPoint, Point};
use crate::render::{LineStyle, fill_polygons, lines_from_data};
use crate::sampling::{sample_line, sample_scatter};
use crate::selection::{DataSelection, data_segments};
use crate::transform::Axes;
use crate::view::IndexRange;

static SERIES_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(SERIES_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A pixel polyline for one selection run of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRun {
    /// Store indices the run was reduced from.
    pub range: IndexRange,
    /// Whether the run is drawn with the selected style.
    pub selected: bool,
    /// Pixel polyline of the run.
    pub points: Vec<PixelPoint>,
}

/// Series whose points are ordered by key.
#[derive(Debug, Clone)]
pub struct GraphSeries {
    id: SeriesId,
    name: String,
    data: PointStore<Point>,
    config: GraphConfig,
    selection: DataSelection,
}

impl GraphSeries {
    /// Create an empty series.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_store(name, PointStore::new())
    }

    /// Build a series from points in any order.
    pub fn from_points<I>(name: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        Self::with_store(name, PointStore::from_unsorted(points))
    }

    /// Build a series from values at keys `0, 1, 2, ...`.
    pub fn from_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<f64>,
    {
        Self::with_store(name, PointStore::from_values(values))
    }

    fn with_store(name: impl Into<String>, data: PointStore<Point>) -> Self {
        Self {
            id: SeriesId::next(),
            name: name.into(),
            data,
            config: GraphConfig::default(),
            selection: DataSelection::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self.selection.enforce_type(config.selectable());
        self
    }

    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Access the point store.
    pub fn data(&self) -> &PointStore<Point> {
        &self.data
    }

    /// Insert a point at its key position.
    pub fn push(&mut self, point: Point) -> Result<usize, StoreError> {
        self.data.push(point)
    }

    /// Insert multiple points.
    pub fn extend<I>(&mut self, points: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = Point>,
    {
        self.data.extend(points)
    }

    /// Access the current selection.
    pub fn selection(&self) -> &DataSelection {
        &self.selection
    }

    /// Replace the selection, narrowed to what the series allows.
    pub fn set_selection(&mut self, mut selection: DataSelection) {
        selection.enforce_type(self.config.selectable());
        self.selection = selection;
    }

    /// Indices needed to draw the visible key range, limited to
    /// `restriction`.
    ///
    /// One point beyond each end of the visible range is included so lines
    /// leaving the plot are drawn up to its edge.
    pub fn visible_bounds(
        &self,
        key_axis: &dyn AxisTransform,
        restriction: IndexRange,
    ) -> IndexRange {
        let visible = self.data.visible_range(key_axis.visible_range());
        self.data
            .limit_to_range(visible.begin(), visible.end(), restriction)
    }

    /// Visible points of `range`, or `None` when there is nothing to draw.
    fn visible_run(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Option<(IndexRange, &[Point])>, ReductionError> {
        if self.data.is_empty() || range.is_empty() {
            tracing::debug!(series = %self.name, "nothing to reduce");
            return Ok(None);
        }
        axes.validate()?;
        if axes.key().shows_empty_range() {
            tracing::debug!(series = %self.name, "key axis shows an empty range");
            return Ok(None);
        }
        let bounds = self.visible_bounds(axes.key(), range);
        if bounds.is_empty() {
            return Ok(None);
        }
        Ok(Some((bounds, &self.data.points()[bounds.as_range()])))
    }

    /// Reduce `range` to the pixel polyline of the configured line style.
    ///
    /// Output runs with ascending key pixels whatever the axis direction.
    pub fn reduce_line(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Vec<PixelPoint>, ReductionError> {
        let style = self.config.line_style();
        if style == LineStyle::None {
            return Ok(Vec::new());
        }
        let Some((_, run)) = self.visible_run(axes, range)? else {
            return Ok(Vec::new());
        };
        let mut sampled = sample_line(run, axes.key(), self.config.adaptive_sampling());
        if axes.key_pixels_descend() {
            sampled.reverse();
        }
        let lines = lines_from_data(&sampled, axes, style);
        tracing::trace!(
            series = %self.name,
            visible = run.len(),
            output = lines.len(),
            "reduced line"
        );
        Ok(lines)
    }

    /// Reduce `range` to marker positions.
    pub fn reduce_scatter(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Vec<PixelPoint>, ReductionError> {
        let Some((bounds, run)) = self.visible_run(axes, range)? else {
            return Ok(Vec::new());
        };
        let mut sampled = sample_scatter(
            run,
            bounds.begin(),
            axes,
            self.config.adaptive_sampling(),
            self.config.scatter_skip(),
        );
        if axes.key_pixels_descend() {
            sampled.reverse();
        }
        Ok(sampled
            .into_iter()
            .map(|point| axes.data_to_pixel(point))
            .collect())
    }

    /// Line polylines for every selection run, unselected runs first.
    ///
    /// A run that cannot be reduced is logged and left out; the others are
    /// still returned.
    pub fn segments(&self, axes: Axes<'_>) -> Vec<LineRun> {
        let partition = data_segments(&self.selection, self.config.selectable(), self.data.len());
        partition
            .iter()
            .filter_map(|(range, selected)| match self.reduce_line(axes, range) {
                Ok(points) => Some(LineRun {
                    range,
                    selected,
                    points,
                }),
                Err(error) => {
                    tracing::warn!(series = %self.name, %error, "dropping line segment");
                    None
                }
            })
            .collect()
    }

    /// Fill polygons for `range`, split at gaps in the data.
    pub fn fill_polygons(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Vec<Vec<PixelPoint>>, ReductionError> {
        let lines = self.reduce_line(axes, range)?;
        Ok(fill_polygons(&lines, axes))
    }
}

/// Parametric curve ordered by its curve parameter.
#[derive(Debug, Clone)]
pub struct CurveSeries {
    id: SeriesId,
    name: String,
    data: PointStore<CurvePoint>,
    config: CurveConfig,
}

impl CurveSeries {
    /// Create an empty curve.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_store(name, PointStore::new())
    }

    /// Build a curve from points in any parameter order.
    pub fn from_points<I>(name: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = CurvePoint>,
    {
        Self::with_store(name, PointStore::from_unsorted(points))
    }

    fn with_store(name: impl Into<String>, data: PointStore<CurvePoint>) -> Self {
        Self {
            id: SeriesId::next(),
            name: name.into(),
            data,
            config: CurveConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: CurveConfig) -> Self {
        self.config = config;
        self
    }

    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the configuration.
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Access the point store.
    pub fn data(&self) -> &PointStore<CurvePoint> {
        &self.data
    }

    /// Insert a point at its parameter position.
    pub fn push(&mut self, point: CurvePoint) -> Result<usize, StoreError> {
        self.data.push(point)
    }

    /// Points of `range`, or `None` when there is nothing to draw.
    fn run(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Option<(IndexRange, &[CurvePoint])>, ReductionError> {
        let bounds = range.intersection(IndexRange::full(self.data.len()));
        if bounds.is_empty() {
            tracing::debug!(series = %self.name, "nothing to clip");
            return Ok(None);
        }
        axes.validate()?;
        if axes.key().shows_empty_range() || axes.value().shows_empty_range() {
            tracing::debug!(series = %self.name, "axes show an empty range");
            return Ok(None);
        }
        Ok(Some((bounds, &self.data.points()[bounds.as_range()])))
    }

    /// Clip `range` against the visible rectangle widened for the pen.
    pub fn clip_parametric(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Vec<PixelPoint>, ReductionError> {
        let rect = ClipRect::from_axes(axes, self.config.pen_width());
        self.clip_to(axes, range, rect)
    }

    /// Clip `range` against an explicit rectangle.
    pub fn clip_to(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
        rect: ClipRect,
    ) -> Result<Vec<PixelPoint>, ReductionError> {
        let Some((_, run)) = self.run(axes, range)? else {
            return Ok(Vec::new());
        };
        Ok(RegionClipper::new(axes, rect).clip(run))
    }

    /// Marker positions of `range` near the visible rectangle.
    ///
    /// Markers whose centre lies within one marker size outside the view are
    /// kept so they are not cut at the edge.
    pub fn curve_scatter(
        &self,
        axes: Axes<'_>,
        range: IndexRange,
    ) -> Result<Vec<PixelPoint>, ReductionError> {
        let Some((bounds, run)) = self.run(axes, range)? else {
            return Ok(Vec::new());
        };
        let rect = ClipRect::with_pixel_margin(axes, self.config.scatter_size());
        let modulo = self.config.scatter_skip() + 1;
        let offset = (modulo - bounds.begin() % modulo) % modulo;
        Ok(run
            .iter()
            .skip(offset)
            .step_by(modulo)
            .map(|point| point.point())
            .filter(|point| rect.contains(*point))
            .map(|point| axes.data_to_pixel(point))
            .collect())
    }
}
