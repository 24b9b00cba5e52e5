//! Per-series reduction settings.

use crate::render::LineStyle;
use crate::selection::SelectionType;

/// Settings for key-ordered series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    line_style: LineStyle,
    adaptive_sampling: bool,
    scatter_skip: usize,
    selectable: SelectionType,
}

impl GraphConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            line_style: LineStyle::Line,
            adaptive_sampling: true,
            scatter_skip: 0,
            selectable: SelectionType::Whole,
        }
    }

    /// Access the line style.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Set the line style.
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Whether dense runs are sampled down to the pixel grid.
    pub fn adaptive_sampling(&self) -> bool {
        self.adaptive_sampling
    }

    /// Enable or disable adaptive sampling.
    pub fn with_adaptive_sampling(mut self, enabled: bool) -> Self {
        self.adaptive_sampling = enabled;
        self
    }

    /// Number of points skipped between scatter markers.
    pub fn scatter_skip(&self) -> usize {
        self.scatter_skip
    }

    /// Draw a marker only for every `skip + 1`-th point.
    pub fn with_scatter_skip(mut self, skip: usize) -> Self {
        self.scatter_skip = skip;
        self
    }

    /// Selection granularity.
    pub fn selectable(&self) -> SelectionType {
        self.selectable
    }

    /// Set the selection granularity.
    pub fn with_selectable(mut self, selectable: SelectionType) -> Self {
        self.selectable = selectable;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for parametric curves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveConfig {
    pen_width: f64,
    scatter_skip: usize,
    scatter_size: f64,
}

impl CurveConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            pen_width: 1.0,
            scatter_skip: 0,
            scatter_size: 6.0,
        }
    }

    /// Stroke width in pixels.
    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    /// Set the stroke width. Negative and non-finite widths become zero.
    pub fn with_pen_width(mut self, width: f64) -> Self {
        self.pen_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self
    }

    /// Number of points skipped between scatter markers.
    pub fn scatter_skip(&self) -> usize {
        self.scatter_skip
    }

    /// Draw a marker only for every `skip + 1`-th point.
    pub fn with_scatter_skip(mut self, skip: usize) -> Self {
        self.scatter_skip = skip;
        self
    }

    /// Marker size in pixels.
    pub fn scatter_size(&self) -> f64 {
        self.scatter_size
    }

    /// Set the marker size.
    pub fn with_scatter_size(mut self, size: f64) -> Self {
        self.scatter_size = if size.is_finite() { size.max(0.0) } else { 0.0 };
        self
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.line_style(), LineStyle::Line);
        assert!(config.adaptive_sampling());
        assert_eq!(config.scatter_skip(), 0);
        assert_eq!(config.selectable(), SelectionType::Whole);
    }

    #[test]
    fn curve_builders_sanitize_sizes() {
        let config = CurveConfig::new()
            .with_pen_width(-2.0)
            .with_scatter_size(f64::NAN)
            .with_scatter_skip(3);
        assert_eq!(config.pen_width(), 0.0);
        assert_eq!(config.scatter_size(), 0.0);
        assert_eq!(config.scatter_skip(), 3);
    }
}
