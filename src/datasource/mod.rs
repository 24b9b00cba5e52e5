//! Sorted point storage.
//!
//! The store keeps points ordered by their sort key so visible-range lookups
//! are binary searches. Reductions borrow a slice for the duration of one
//! pass and never hold on to indices afterwards.

use crate::error::StoreError;
use crate::geom::{CurvePoint, Point};
use crate::view::{IndexRange, Range};

/// Types that can be ordered inside a [`PointStore`].
pub trait SortKey: Copy {
    /// Key used for ordering and range lookups.
    fn sort_key(&self) -> f64;
}

impl SortKey for Point {
    fn sort_key(&self) -> f64 {
        self.key
    }
}

impl SortKey for CurvePoint {
    fn sort_key(&self) -> f64 {
        self.t
    }
}

/// Points ordered by ascending sort key.
#[derive(Debug, Clone)]
pub struct PointStore<T> {
    points: Vec<T>,
}

impl<T> Default for PointStore<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: SortKey> PointStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from unordered points.
    ///
    /// Points with a non-finite sort key are dropped.
    pub fn from_unsorted<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut points: Vec<T> = iter
            .into_iter()
            .filter(|point| point.sort_key().is_finite())
            .collect();
        points.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
        Self { points }
    }

    /// Insert a point at its sorted position and return its index.
    ///
    /// Points with equal keys keep insertion order. Appending in key order is
    /// the fast path.
    pub fn push(&mut self, point: T) -> Result<usize, StoreError> {
        let key = point.sort_key();
        if !key.is_finite() {
            return Err(StoreError::NonFiniteSortKey(key));
        }
        let appends = self
            .points
            .last()
            .is_none_or(|last| last.sort_key() <= key);
        if appends {
            self.points.push(point);
            return Ok(self.points.len() - 1);
        }
        let index = upper_bound(&self.points, key);
        self.points.insert(index, point);
        Ok(index)
    }

    /// Insert multiple points.
    ///
    /// Every valid point is stored even when some are rejected; the first
    /// rejection is reported.
    pub fn extend<I>(&mut self, points: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = T>,
    {
        let points = points.into_iter();
        let (reserve, _) = points.size_hint();
        self.points.reserve(reserve);

        let mut added = 0;
        let mut first_error = None;
        for point in points {
            match self.push(point) {
                Ok(_) => added += 1,
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(added),
        }
    }

    /// Access all points as a slice.
    pub fn points(&self) -> &[T] {
        &self.points
    }

    /// Access a single point by index.
    pub fn point(&self, index: usize) -> Option<T> {
        self.points.get(index).copied()
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Range of sort keys, if any points are stored.
    pub fn sort_key_range(&self) -> Option<Range> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some(Range::new(first.sort_key(), last.sort_key()))
    }

    /// First index whose key is not below `key`.
    ///
    /// With `expanded`, the index steps back by one so the segment leading
    /// into the range is kept.
    pub fn find_begin(&self, key: f64, expanded: bool) -> usize {
        let index = lower_bound(&self.points, key);
        if expanded && index > 0 {
            index - 1
        } else {
            index
        }
    }

    /// One past the last index whose key is not above `key`.
    ///
    /// With `expanded`, the index steps forward by one so the segment leaving
    /// the range is kept.
    pub fn find_end(&self, key: f64, expanded: bool) -> usize {
        let index = upper_bound(&self.points, key);
        if expanded && index < self.points.len() {
            index + 1
        } else {
            index
        }
    }

    /// Index range covering `range`, expanded by one point on each side.
    pub fn visible_range(&self, range: Range) -> IndexRange {
        IndexRange::new(
            self.find_begin(range.min, true),
            self.find_end(range.max, true),
        )
    }

    /// Clamp `begin..end` to a requested index range and to the store.
    pub fn limit_to_range(&self, begin: usize, end: usize, restriction: IndexRange) -> IndexRange {
        IndexRange::new(begin, end)
            .intersection(restriction)
            .intersection(IndexRange::full(self.points.len()))
    }
}

impl PointStore<Point> {
    /// Build a store with implicit keys `0, 1, 2, ...`.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<f64>,
    {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Point::new(index as f64, value.into()))
            .collect();
        Self { points }
    }

    /// Range of values, ignoring non-finite ones.
    pub fn value_range(&self) -> Option<Range> {
        let mut range: Option<Range> = None;
        for point in self.points.iter().filter(|point| point.value.is_finite()) {
            match range.as_mut() {
                None => range = Some(Range::new(point.value, point.value)),
                Some(existing) => existing.expand_to_include(point.value),
            }
        }
        range
    }
}

impl<T: SortKey> FromIterator<T> for PointStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unsorted(iter)
    }
}

fn lower_bound<T: SortKey>(points: &[T], target: f64) -> usize {
    points.partition_point(|point| point.sort_key() < target)
}

fn upper_bound<T: SortKey>(points: &[T], target: f64) -> usize {
    points.partition_point(|point| point.sort_key() <= target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(keys: &[f64]) -> PointStore<Point> {
        keys.iter().map(|&key| Point::new(key, key * 10.0)).collect()
    }

    #[test]
    fn from_values_uses_index_keys() {
        let data = PointStore::from_values([1.0, 2.0, 3.0]);
        assert_eq!(data.point(0), Some(Point::new(0.0, 1.0)));
        assert_eq!(data.point(2), Some(Point::new(2.0, 3.0)));
    }

    #[test]
    fn push_out_of_order_inserts_sorted() {
        let mut data = store(&[0.0, 1.0, 3.0]);
        let index = data.push(Point::new(2.0, 0.0)).unwrap();
        assert_eq!(index, 2);
        let keys: Vec<f64> = data.points().iter().map(|point| point.key).collect();
        assert_eq!(keys, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn push_rejects_nan_key() {
        let mut data = PointStore::new();
        let result = data.push(Point::new(f64::NAN, 1.0));
        assert!(matches!(result, Err(StoreError::NonFiniteSortKey(_))));
        assert!(data.is_empty());
    }

    #[test]
    fn extend_keeps_valid_points_after_error() {
        let mut data = PointStore::new();
        let result = data.extend([
            Point::new(0.0, 0.0),
            Point::new(f64::INFINITY, 0.0),
            Point::new(1.0, 0.0),
        ]);
        assert!(result.is_err());
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn find_begin_and_end_expand_by_one() {
        let data = store(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(data.find_begin(1.5, false), 2);
        assert_eq!(data.find_begin(1.5, true), 1);
        assert_eq!(data.find_end(2.5, false), 3);
        assert_eq!(data.find_end(2.5, true), 4);
        assert_eq!(data.find_begin(-10.0, true), 0);
        assert_eq!(data.find_end(10.0, true), 5);
    }

    #[test]
    fn visible_range_is_limited_to_restriction() {
        let data = store(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let visible = data.visible_range(Range::new(1.5, 3.5));
        assert_eq!(visible, IndexRange::new(1, 5));
        let limited = data.limit_to_range(visible.begin(), visible.end(), IndexRange::new(3, 9));
        assert_eq!(limited, IndexRange::new(3, 5));
    }

    #[test]
    fn curve_points_sort_by_parameter() {
        let data: PointStore<CurvePoint> = [
            CurvePoint::new(2.0, 0.0, 0.0),
            CurvePoint::new(0.0, 5.0, 5.0),
            CurvePoint::new(1.0, -5.0, 5.0),
        ]
        .into_iter()
        .collect();
        let ts: Vec<f64> = data.points().iter().map(|point| point.t).collect();
        assert_eq!(ts, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.sort_key_range(), Some(Range::new(0.0, 2.0)));
    }

    #[test]
    fn value_range_skips_nan() {
        let mut data = PointStore::from_values([1.0, f64::NAN, -3.0]);
        assert_eq!(data.value_range(), Some(Range::new(-3.0, 1.0)));
        data.clear();
        assert_eq!(data.value_range(), None);
    }
}
