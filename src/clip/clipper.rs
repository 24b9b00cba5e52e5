use crate::geom::{PixelPoint, Point};
use crate::transform::Axes;

use super::{ClipRect, Region};

/// Below this pixel delta a segment counts as parallel to an axis.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Key and value pixel of a point, before placing it on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisPixel {
    key: f64,
    value: f64,
}

impl AxisPixel {
    fn new(key: f64, value: f64) -> Self {
        Self { key, value }
    }

    fn distance_sq(self, other: Self) -> f64 {
        let dk = self.key - other.key;
        let dv = self.value - other.value;
        dk * dk + dv * dv
    }
}

/// Single-pass clipper for curves that may leave and re-enter the view.
///
/// The pass treats the point sequence as closed: the first point is reached
/// from the last one, and boundary points that segment produces ahead of the
/// first point are appended at the end.
#[derive(Debug, Clone, Copy)]
pub struct RegionClipper<'a> {
    axes: Axes<'a>,
    rect: ClipRect,
    key_min: f64,
    key_max: f64,
    value_min: f64,
    value_max: f64,
}

impl<'a> RegionClipper<'a> {
    /// Create a clipper for `rect` drawn on `axes`.
    pub fn new(axes: Axes<'a>, rect: ClipRect) -> Self {
        Self {
            axes,
            rect,
            key_min: axes.key().to_pixel(rect.key.min),
            key_max: axes.key().to_pixel(rect.key.max),
            value_min: axes.value().to_pixel(rect.value.min),
            value_max: axes.value().to_pixel(rect.value.max),
        }
    }

    /// Clipping rectangle in data coordinates.
    pub fn rect(&self) -> ClipRect {
        self.rect
    }

    /// Classify a data point.
    pub fn region(&self, point: Point) -> Region {
        self.rect.region(point)
    }

    /// Clip a curve into a pixel polyline.
    ///
    /// Inside points are kept verbatim, repeats included. Segments that stay
    /// outside are dropped or replaced by rectangle corners, segments
    /// crossing the rectangle keep their exact entry and exit points.
    /// Boundary and corner points equal to the point before them are not
    /// emitted again. Axes showing an empty range yield nothing.
    pub fn clip<P>(&self, points: &[P]) -> Vec<PixelPoint>
    where
        P: Copy + Into<Point>,
    {
        let Some(&last) = points.last() else {
            return Vec::new();
        };
        if self.axes.key().shows_empty_range() || self.axes.value().shows_empty_range() {
            tracing::debug!("axes show an empty range, nothing to clip");
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut trailing = Vec::new();
        let mut prev: Point = last.into();
        let mut prev_region = self.region(prev);

        for (index, &cur) in points.iter().enumerate() {
            let cur: Point = cur.into();
            let first = index == 0;
            let cur_region = self.region(cur);

            if cur_region == prev_region {
                if cur_region == Region::Inside {
                    out.push(self.axes.data_to_pixel(cur));
                }
            } else if cur_region == Region::Inside {
                let entry = self.optimized_point(prev_region, prev, cur);
                if first {
                    trailing.push(entry);
                } else {
                    emit(&mut out, entry);
                }
                out.push(self.axes.data_to_pixel(cur));
            } else if prev_region == Region::Inside {
                emit(&mut out, self.optimized_point(cur_region, cur, prev));
                for corner in self.optimized_corner_points(prev_region, cur_region, prev, cur) {
                    emit(&mut out, corner);
                }
            } else if let Some((cross_a, cross_b)) = prev_region
                .may_traverse(cur_region)
                .then(|| self.traverse(prev, cur))
                .flatten()
            {
                let (before, after) = self.traverse_corner_points(prev_region, cur_region);
                if first {
                    emit(&mut out, cross_b);
                    if let Some(after) = after {
                        emit(&mut out, after);
                    }
                    trailing.extend(before);
                    trailing.push(cross_a);
                } else {
                    for point in [before, Some(cross_a), Some(cross_b), after]
                        .into_iter()
                        .flatten()
                    {
                        emit(&mut out, point);
                    }
                }
            } else {
                for corner in self.optimized_corner_points(prev_region, cur_region, prev, cur) {
                    emit(&mut out, corner);
                }
            }

            prev = cur;
            prev_region = cur_region;
        }

        for point in trailing {
            emit(&mut out, point);
        }
        tracing::trace!(input = points.len(), output = out.len(), "clipped curve");
        out
    }

    /// Boundary point standing in for `outside` on the segment to `inside`.
    ///
    /// Edge regions intersect their own edge. Corner regions try the value
    /// edge first and fall back to the key edge when the hit lies beyond the
    /// rectangle.
    pub fn optimized_point(&self, region: Region, outside: Point, inside: Point) -> PixelPoint {
        let a = self.project(outside);
        let b = self.project(inside);
        let point = match region {
            Region::Left => self.at_key(self.key_min, a, b),
            Region::Right => self.at_key(self.key_max, a, b),
            Region::Top => self.at_value(self.value_max, a, b),
            Region::Bottom => self.at_value(self.value_min, a, b),
            Region::TopLeft => self.corner_exit(self.value_max, self.key_min, a, b),
            Region::BottomLeft => self.corner_exit(self.value_min, self.key_min, a, b),
            Region::TopRight => self.corner_exit(self.value_max, self.key_max, a, b),
            Region::BottomRight => self.corner_exit(self.value_min, self.key_max, a, b),
            Region::Inside => b,
        };
        self.screen(point)
    }

    /// Corners routing a segment between two regions around the rectangle.
    ///
    /// Walks the ring of outside regions the short way from `from` to `to`
    /// and returns every corner passed, ends included. When both ways are
    /// equally long the segment itself decides on which side of the
    /// rectangle it passes. With `Inside` on one end only the other end's
    /// corner is returned.
    pub fn optimized_corner_points(
        &self,
        from: Region,
        to: Region,
        from_point: Point,
        to_point: Point,
    ) -> Vec<PixelPoint> {
        let (start, end) = match (from.ring_position(), to.ring_position()) {
            (Some(start), Some(end)) => (start, end),
            (None, Some(position)) | (Some(position), None) => {
                return self
                    .corner_at(position)
                    .map(|corner| self.screen(corner))
                    .into_iter()
                    .collect();
            }
            (None, None) => return Vec::new(),
        };

        let clockwise = (end + 8 - start) % 8;
        let forward = match clockwise {
            0..=3 => true,
            5..=7 => false,
            _ => self.passes_clockwise(from, to, start, from_point, to_point),
        };
        let steps = if forward { clockwise } else { 8 - clockwise };

        (0..=steps)
            .map(|step| {
                if forward {
                    (start + step) % 8
                } else {
                    (start + 8 - step) % 8
                }
            })
            .filter_map(|position| self.corner_at(position))
            .map(|corner| self.screen(corner))
            .collect()
    }

    /// Where a segment between two outside points crosses the rectangle.
    ///
    /// Returns the entry and exit points in segment direction, or `None`
    /// when the segment misses. Hits through a corner produce duplicate
    /// candidates; the pair farthest apart is used.
    pub fn traverse(&self, from: Point, to: Point) -> Option<(PixelPoint, PixelPoint)> {
        let a = self.project(from);
        let b = self.project(to);
        let dk = b.key - a.key;
        let dv = b.value - a.value;

        let mut hits: Vec<AxisPixel> = Vec::with_capacity(4);
        if dk.abs() <= PARALLEL_EPSILON {
            hits.push(AxisPixel::new(b.key, self.value_min));
            hits.push(AxisPixel::new(b.key, self.value_max));
        } else if dv.abs() <= PARALLEL_EPSILON {
            hits.push(AxisPixel::new(self.key_min, b.value));
            hits.push(AxisPixel::new(self.key_max, b.value));
        } else {
            let (key_low, key_high) = ordered(self.key_min, self.key_max);
            let (value_low, value_high) = ordered(self.value_min, self.value_max);
            for edge in [self.value_max, self.value_min] {
                let key = a.key + (edge - a.value) * dk / dv;
                if key >= key_low && key <= key_high {
                    hits.push(AxisPixel::new(key, edge));
                }
            }
            for edge in [self.key_min, self.key_max] {
                let value = a.value + (edge - a.key) * dv / dk;
                if value >= value_low && value <= value_high {
                    hits.push(AxisPixel::new(edge, value));
                }
            }
        }

        let (mut cross_a, mut cross_b) = farthest_pair(&hits)?;
        let along = dk * (cross_b.key - cross_a.key) + dv * (cross_b.value - cross_a.value);
        if along < 0.0 {
            std::mem::swap(&mut cross_a, &mut cross_b);
        }
        Some((self.screen(cross_a), self.screen(cross_b)))
    }

    /// Corners framing a traversal: one before the entry point when `from`
    /// is a corner region, one after the exit point when `to` is.
    pub fn traverse_corner_points(
        &self,
        from: Region,
        to: Region,
    ) -> (Option<PixelPoint>, Option<PixelPoint>) {
        let corner = |region: Region| {
            region
                .ring_position()
                .and_then(|position| self.corner_at(position))
                .map(|point| self.screen(point))
        };
        (corner(from), corner(to))
    }

    fn project(&self, point: Point) -> AxisPixel {
        AxisPixel::new(
            self.axes.key().to_pixel(point.key),
            self.axes.value().to_pixel(point.value),
        )
    }

    fn screen(&self, point: AxisPixel) -> PixelPoint {
        self.axes.pixel(point.key, point.value)
    }

    fn corner_at(&self, position: u8) -> Option<AxisPixel> {
        match position {
            0 => Some(AxisPixel::new(self.key_min, self.value_max)),
            2 => Some(AxisPixel::new(self.key_max, self.value_max)),
            4 => Some(AxisPixel::new(self.key_max, self.value_min)),
            6 => Some(AxisPixel::new(self.key_min, self.value_min)),
            _ => None,
        }
    }

    fn at_key(&self, key: f64, a: AxisPixel, b: AxisPixel) -> AxisPixel {
        let value = a.value + (b.value - a.value) * (key - a.key) / (b.key - a.key);
        AxisPixel::new(key, value)
    }

    fn at_value(&self, value: f64, a: AxisPixel, b: AxisPixel) -> AxisPixel {
        let key = a.key + (b.key - a.key) * (value - a.value) / (b.value - a.value);
        AxisPixel::new(key, value)
    }

    fn corner_exit(&self, value_edge: f64, key_edge: f64, a: AxisPixel, b: AxisPixel) -> AxisPixel {
        let (low, high) = ordered(self.key_min, self.key_max);
        let hit = self.at_value(value_edge, a, b);
        if hit.key >= low && hit.key <= high {
            hit
        } else {
            self.at_key(key_edge, a, b)
        }
    }

    /// Decide which way around the rectangle a segment between opposite
    /// ring positions passes.
    fn passes_clockwise(
        &self,
        from: Region,
        to: Region,
        start: u8,
        from_point: Point,
        to_point: Point,
    ) -> bool {
        const TOP: u8 = 1;
        const RIGHT: u8 = 3;
        const BOTTOM: u8 = 5;
        const LEFT: u8 = 7;

        let a = self.project(from_point);
        let b = self.project(to_point);
        let via = if matches!((from, to), (Region::Top, Region::Bottom) | (Region::Bottom, Region::Top)) {
            let key = self.at_value(self.value_max, a, b).key;
            let left = (key - self.key_min) * self.axes.key().pixel_orientation() < 0.0;
            if left { LEFT } else { RIGHT }
        } else {
            let value = self.at_key(self.key_min, a, b).value;
            let below = (value - self.value_min) * self.axes.value().pixel_orientation() < 0.0;
            if below { BOTTOM } else { TOP }
        };
        (via + 8 - start) % 8 < 4
    }
}

fn emit(out: &mut Vec<PixelPoint>, point: PixelPoint) {
    if out.last() != Some(&point) {
        out.push(point);
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn farthest_pair(hits: &[AxisPixel]) -> Option<(AxisPixel, AxisPixel)> {
    match hits {
        [] | [_] => None,
        [a, b] => Some((*a, *b)),
        _ => {
            let mut best: Option<(f64, AxisPixel, AxisPixel)> = None;
            for (i, &a) in hits.iter().enumerate() {
                for &b in &hits[i + 1..] {
                    let distance = a.distance_sq(b);
                    if best.is_none_or(|(max, _, _)| distance > max) {
                        best = Some((distance, a, b));
                    }
                }
            }
            best.map(|(_, a, b)| (a, b))
        }
    }
}
